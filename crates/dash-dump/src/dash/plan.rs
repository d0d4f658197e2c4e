use std::iter;

use dash_mpd::{AdaptationSet, Representation, SegmentTemplate};
use url::Url;

use super::{
    manifest::Manifest,
    selector::{best_adaptation_set, best_bandwidth, best_representation},
    timeline::{SegmentPosition, SegmentSequence, TimelineCoverage},
};
use crate::error::{DumpError, DumpResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    /// Index of the period to take video adaptation sets from
    pub period: usize,
    pub timeline: TimelineCoverage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSegment {
    pub number: u64,
    pub time: u64,
    pub url: Url,
}

impl PlannedSegment {
    pub fn is_initialization(&self) -> bool {
        self.time == 0
    }
}

/// The ordered list of segments to fetch for the best video of a manifest.
///
/// The plan always starts with the initialization segment at time 0, followed by the
/// positions of the selected adaptation set's template. URLs are built on demand.
pub struct SegmentPlan<'a> {
    manifest: &'a Manifest,
    adaptation: &'a AdaptationSet,
    representation: &'a Representation,
    template: &'a SegmentTemplate,
    bandwidth: u64,
    coverage: TimelineCoverage,
}

impl<'a> SegmentPlan<'a> {
    pub fn new(manifest: &'a Manifest, options: PlanOptions) -> DumpResult<Self> {
        let candidates = manifest.video_adaptation_sets(options.period)?;
        let adaptation = best_adaptation_set(candidates)?;
        if let (Some(width), Some(height)) = (adaptation.maxWidth, adaptation.maxHeight) {
            tracing::info!("best video ({width} x {height})");
        }

        let representation = best_representation(adaptation)?;
        let (bandwidth, _) = best_bandwidth(Some(adaptation));
        tracing::info!(
            id = representation.id.as_deref().unwrap_or_default(),
            bandwidth,
            "selected representation"
        );

        let template = adaptation
            .SegmentTemplate
            .as_ref()
            .ok_or(DumpError::MissingSegmentTemplate)?;

        Ok(Self {
            manifest,
            adaptation,
            representation,
            template,
            bandwidth,
            coverage: options.timeline,
        })
    }

    pub fn adaptation_set(&self) -> &'a AdaptationSet {
        self.adaptation
    }

    pub fn representation(&self) -> &'a Representation {
        self.representation
    }

    /// Highest bandwidth declared in the selected adaptation set.
    pub fn bandwidth(&self) -> u64 {
        self.bandwidth
    }

    /// Resolution of the selected representation, falling back to the adaptation set maximum.
    pub fn resolution(&self) -> Option<(u64, u64)> {
        self.representation
            .width
            .zip(self.representation.height)
            .or_else(|| self.adaptation.maxWidth.zip(self.adaptation.maxHeight))
    }

    /// `(number, time)` pairs in fetch order, starting with the initialization segment.
    pub fn positions(&self) -> impl Iterator<Item = SegmentPosition> + 'a {
        iter::once(SegmentPosition::new(0, 0))
            .chain(SegmentSequence::from_template(self.template, self.coverage))
    }

    pub fn segments(&self) -> impl Iterator<Item = DumpResult<PlannedSegment>> + 'a {
        let manifest = self.manifest;
        let adaptation = self.adaptation;
        let representation = self.representation;
        let bandwidth = self.bandwidth;

        self.positions().map(move |position| {
            let url = manifest.segment_url(
                adaptation,
                position.time,
                bandwidth,
                position.number,
                representation,
            )?;
            tracing::debug!("url is {url}");

            Ok(PlannedSegment {
                number: position.number,
                time: position.time,
                url,
            })
        })
    }
}
