//! Segment addressing for `SegmentTemplate`.
//!
//! Two modes are supported, chosen per adaptation set:
//!
//! - Timeline mode, when the template carries a `SegmentTimeline`. Positions are computed
//!   from the `S` elements, where `S@d` is the duration and `S@r` the number of additional
//!   repetitions of that duration.
//! - Duration mode, when only `SegmentTemplate@duration` is present.
//!
//! Both modes produce `(number, time)` pairs lazily, in increasing number order.
use std::slice;

use dash_mpd::{SegmentTemplate, S};

/// Timescale used when `SegmentTemplate@timescale` is absent or zero.
pub const DEFAULT_TIMESCALE: u64 = 1000;

/// How much of a `SegmentTimeline` is expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimelineCoverage {
    /// Only the repeat run of the first `S` element, starting at the presentation time offset.
    #[default]
    FirstEntry,
    /// Every `S` element in document order, honouring `S@t`.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentPosition {
    /// $Number$
    pub number: u64,
    /// $Time$
    pub time: u64,
}

impl SegmentPosition {
    pub fn new(number: u64, time: u64) -> Self {
        Self { number, time }
    }
}

/// Number of segments described by one `S` element.
///
/// > Only additional segment references are counted by @r, so S@r=5 indicates a total of
/// > 6 consecutive media segments with the same duration.
///
/// Negative repeat counts (repeat until the period end) are treated as a single segment.
pub fn occurrences(s: &S) -> u64 {
    match s.r {
        Some(r) if r > 0 => (r as u64).saturating_add(1),
        _ => 1,
    }
}

pub struct SegmentSequence<'a> {
    inner: Addressing<'a>,
}

enum Addressing<'a> {
    Timeline {
        entries: slice::Iter<'a, S>,
        honour_start_time: bool,
        run: Option<Run>,
        next_time: u64,
        number: u64,
    },
    Duration {
        offset: u64,
        duration: u64,
        timescale: u64,
        number: u64,
    },
}

struct Run {
    time: u64,
    duration: u64,
    remaining: u64,
}

impl<'a> SegmentSequence<'a> {
    pub fn from_template(template: &'a SegmentTemplate, coverage: TimelineCoverage) -> Self {
        let offset = template.presentationTimeOffset.unwrap_or(0);
        let timescale = template
            .timescale
            .filter(|t| *t != 0)
            .unwrap_or(DEFAULT_TIMESCALE);

        match template.SegmentTimeline {
            Some(ref timeline) => {
                tracing::debug!(timescale, offset, ?coverage, "expanding segment timeline");
                let entries = match coverage {
                    TimelineCoverage::FirstEntry => {
                        &timeline.segments[..timeline.segments.len().min(1)]
                    }
                    TimelineCoverage::Complete => &timeline.segments[..],
                };
                Self::timeline(entries, offset, coverage == TimelineCoverage::Complete)
            }
            None => {
                // @duration is an unsigned int in timescale units
                let duration = template.duration.map(|d| d as u64).unwrap_or(0);
                tracing::debug!(timescale, offset, duration, "expanding fixed segment duration");
                Self::duration(offset, duration, timescale)
            }
        }
    }

    /// Timeline mode over `entries`, with segment numbers starting at 0.
    ///
    /// The first run starts at `offset`, so a first entry without `S@t` begins at the
    /// presentation time offset rather than at 0. When `honour_start_time` is set, an `S@t`
    /// on any entry overrides the running time, otherwise entries continue from the
    /// previous end.
    pub fn timeline(entries: &'a [S], offset: u64, honour_start_time: bool) -> Self {
        Self {
            inner: Addressing::Timeline {
                entries: entries.iter(),
                honour_start_time,
                run: None,
                next_time: offset,
                number: 0,
            },
        }
    }

    /// Duration mode: numbers `1..duration`, at `offset + number * duration * timescale`.
    ///
    /// The upper bound is the raw duration value, not a computed segment count.
    pub fn duration(offset: u64, duration: u64, timescale: u64) -> Self {
        Self {
            inner: Addressing::Duration {
                offset,
                duration,
                timescale,
                number: 1,
            },
        }
    }
}

impl Iterator for SegmentSequence<'_> {
    type Item = SegmentPosition;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Addressing::Timeline {
                entries,
                honour_start_time,
                run,
                next_time,
                number,
            } => loop {
                if let Some(current) = run.as_mut().filter(|r| r.remaining > 0) {
                    let position = SegmentPosition::new(*number, current.time);
                    current.time = current.time.saturating_add(current.duration);
                    current.remaining -= 1;
                    *next_time = current.time;
                    *number += 1;
                    return Some(position);
                }

                let s = entries.next()?;
                let time = match s.t {
                    Some(t) if *honour_start_time => t,
                    _ => *next_time,
                };
                *run = Some(Run {
                    time,
                    duration: s.d,
                    remaining: occurrences(s),
                });
            },
            Addressing::Duration {
                offset,
                duration,
                timescale,
                number,
            } => {
                if *number >= *duration {
                    return None;
                }
                let i = *number;
                *number += 1;
                let time =
                    offset.saturating_add(i.saturating_mul(*duration).saturating_mul(*timescale));
                Some(SegmentPosition::new(i, time))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Addressing::Duration {
                duration, number, ..
            } => {
                let remaining = usize::try_from(duration.saturating_sub(*number)).ok();
                (remaining.unwrap_or(usize::MAX), remaining)
            }
            Addressing::Timeline { .. } => (0, None),
        }
    }
}
