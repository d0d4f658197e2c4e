use std::fmt;

use dash_mpd::{AdaptationSet, Period, Representation, SegmentTimeline};
use serde::Serialize;

use super::{manifest::Manifest, timeline::occurrences};

#[derive(Debug, Serialize)]
pub struct ManifestSummary {
    pub base_url: String,
    pub periods: Vec<PeriodSummary>,
}

#[derive(Debug, Serialize)]
pub struct PeriodSummary {
    pub id: Option<String>,
    /// Period duration, in seconds
    pub duration: Option<f64>,
    pub adaptation_sets: Vec<AdaptationSetSummary>,
}

#[derive(Debug, Serialize)]
pub struct AdaptationSetSummary {
    pub content_type: Option<String>,
    pub lang: Option<String>,
    pub mime_type: Option<String>,
    pub codecs: Option<String>,
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    pub media: Option<String>,
    pub initialization: Option<String>,
    /// End time of each `S` run of the timeline, in timescale units
    pub timeline_ends: Vec<u64>,
    pub start_number: Option<u64>,
    pub timescale: Option<u64>,
    pub representations: Vec<RepresentationSummary>,
}

#[derive(Debug, Serialize)]
pub struct RepresentationSummary {
    pub id: Option<String>,
    pub codecs: Option<String>,
    pub frame_rate: Option<String>,
    pub bandwidth: Option<u64>,
    pub width: Option<u64>,
    pub height: Option<u64>,
}

impl Manifest {
    pub fn summary(&self) -> ManifestSummary {
        ManifestSummary {
            base_url: self.base_url().to_string(),
            periods: self.periods.iter().map(PeriodSummary::from).collect(),
        }
    }
}

impl From<&Period> for PeriodSummary {
    fn from(period: &Period) -> Self {
        Self {
            id: period.id.clone(),
            duration: period.duration.map(|d| d.as_secs_f64()),
            adaptation_sets: period
                .adaptations
                .iter()
                .map(AdaptationSetSummary::from)
                .collect(),
        }
    }
}

impl From<&AdaptationSet> for AdaptationSetSummary {
    fn from(adaptation: &AdaptationSet) -> Self {
        let template = adaptation.SegmentTemplate.as_ref();
        Self {
            content_type: adaptation.contentType.clone(),
            lang: adaptation.lang.clone(),
            mime_type: adaptation.mimeType.clone(),
            codecs: adaptation.codecs.clone(),
            max_width: adaptation.maxWidth,
            max_height: adaptation.maxHeight,
            media: template.and_then(|t| t.media.clone()),
            initialization: template.and_then(|t| t.initialization.clone()),
            timeline_ends: template
                .and_then(|t| t.SegmentTimeline.as_ref())
                .map(timeline_ends)
                .unwrap_or_default(),
            start_number: template.and_then(|t| t.startNumber),
            timescale: template.and_then(|t| t.timescale),
            representations: adaptation
                .representations
                .iter()
                .map(RepresentationSummary::from)
                .collect(),
        }
    }
}

impl From<&Representation> for RepresentationSummary {
    fn from(representation: &Representation) -> Self {
        Self {
            id: representation.id.clone(),
            codecs: representation.codecs.clone(),
            frame_rate: representation.frameRate.clone(),
            bandwidth: representation.bandwidth,
            width: representation.width,
            height: representation.height,
        }
    }
}

fn timeline_ends(timeline: &SegmentTimeline) -> Vec<u64> {
    let mut time = 0u64;
    timeline
        .segments
        .iter()
        .map(|s| {
            let start = s.t.unwrap_or(time);
            time = start.saturating_add(s.d.saturating_mul(occurrences(s)));
            time
        })
        .collect()
}

fn write_field<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    indent: usize,
    key: &str,
    value: Option<T>,
) -> fmt::Result {
    match value {
        Some(value) => writeln!(f, "{:indent$}{key}: {value}", "", indent = indent * 2),
        None => Ok(()),
    }
}

impl fmt::Display for ManifestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, period) in self.periods.iter().enumerate() {
            writeln!(f, "Period {i}:")?;
            write_field(f, 1, "ID", period.id.as_deref())?;
            write_field(f, 1, "Duration", period.duration.map(|d| format!("{d}s")))?;

            for (j, adaptation) in period.adaptation_sets.iter().enumerate() {
                writeln!(f, "  Adaptation Set {j}:")?;
                write_field(f, 2, "ContentType", adaptation.content_type.as_deref())?;
                write_field(f, 2, "Lang", adaptation.lang.as_deref())?;
                write_field(f, 2, "MimeType", adaptation.mime_type.as_deref())?;
                write_field(f, 2, "Codecs", adaptation.codecs.as_deref())?;
                if let (Some(w), Some(h)) = (adaptation.max_width, adaptation.max_height) {
                    write_field(f, 2, "MaxResolution", Some(format!("{w}x{h}")))?;
                }
                write_field(f, 2, "Media", adaptation.media.as_deref())?;
                write_field(f, 2, "Initialization", adaptation.initialization.as_deref())?;
                for end in adaptation.timeline_ends.iter() {
                    write_field(f, 3, "Segment End", Some(end))?;
                }
                write_field(f, 2, "StartNumber", adaptation.start_number)?;
                write_field(f, 2, "Timescale", adaptation.timescale)?;

                for (k, representation) in adaptation.representations.iter().enumerate() {
                    writeln!(f, "    Representation {k}:")?;
                    write_field(f, 3, "ID", representation.id.as_deref())?;
                    write_field(f, 3, "Codecs", representation.codecs.as_deref())?;
                    write_field(f, 3, "FrameRate", representation.frame_rate.as_deref())?;
                    write_field(f, 3, "Bandwidth", representation.bandwidth)?;
                    if let (Some(w), Some(h)) = (representation.width, representation.height) {
                        write_field(f, 3, "Resolution", Some(format!("{w}x{h}")))?;
                    }
                }
            }
        }
        Ok(())
    }
}
