use dash_mpd::{AdaptationSet, Representation};

use crate::error::{DumpError, DumpResult};

/// Surface area of a `width x height` pair. `None` when either dimension is missing.
pub fn surface(width: Option<u64>, height: Option<u64>) -> Option<u64> {
    width.zip(height).map(|(w, h)| w.saturating_mul(h))
}

/// Picks the candidate with the greatest key, keeping the first one on ties.
///
/// Candidates without a key never win, but the first candidate is returned as a
/// fallback when no candidate has a key greater than zero.
fn first_max_by<'a, T, I, F>(candidates: I, key: F) -> Option<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> Option<u64>,
{
    let mut candidates = candidates.into_iter();
    let mut best = candidates.next()?;
    let mut max = key(best).unwrap_or(0);

    for candidate in candidates {
        let Some(value) = key(candidate) else {
            continue;
        };
        if value > max {
            max = value;
            best = candidate;
        }
    }
    Some(best)
}

/// Selects the adaptation set declaring the largest `maxWidth * maxHeight`.
pub fn best_adaptation_set<'a, I>(candidates: I) -> DumpResult<&'a AdaptationSet>
where
    I: IntoIterator<Item = &'a AdaptationSet>,
{
    first_max_by(candidates, |a| surface(a.maxWidth, a.maxHeight))
        .ok_or(DumpError::NoCandidate("AdaptationSet"))
}

/// Selects the representation with the largest `width * height` in an adaptation set.
pub fn best_representation(adaptation: &AdaptationSet) -> DumpResult<&Representation> {
    first_max_by(&adaptation.representations, |r| surface(r.width, r.height))
        .ok_or(DumpError::NoCandidate("Representation"))
}

/// Returns the highest declared bandwidth of an adaptation set and the representation declaring it.
///
/// Representations without `@bandwidth` are ignored. `(0, None)` is returned when nothing matches.
pub fn best_bandwidth(adaptation: Option<&AdaptationSet>) -> (u64, Option<&Representation>) {
    let Some(adaptation) = adaptation else {
        return (0, None);
    };

    let mut max = 0;
    let mut best = None;
    for representation in adaptation.representations.iter() {
        if let Some(bandwidth) = representation.bandwidth {
            if bandwidth > max {
                max = bandwidth;
                best = Some(representation);
            }
        }
    }
    (max, best)
}
