//! # MPEG-DASH segment addressing
//!
//! This module turns a decoded MPD into the ordered list of segment URLs of its best
//! video representation. Nothing here performs I/O.
//!
//! - [`manifest::Manifest`] wraps the decoded [`dash_mpd::MPD`] with the URL it was fetched
//!   from, and provides lookups by content type, language and period.
//! - [`selector`] picks the best adaptation set and representation by resolution, and the
//!   highest declared bandwidth.
//! - [`timeline::SegmentSequence`] expands a `SegmentTemplate` into `(number, time)` pairs,
//!   either from its `SegmentTimeline` or from its fixed `@duration`.
//! - [`template::Template`] substitutes `$RepresentationID$`, `$Number$`, `$Time$` and
//!   `$Bandwidth$` and resolves the result against the manifest URL.
//! - [`plan::SegmentPlan`] ties the above together.
//!
//! ```no_run
//! # fn run(xml: &str) -> dash_dump::error::DumpResult<()> {
//! use dash_dump::dash::{Manifest, PlanOptions, SegmentPlan};
//!
//! let manifest = Manifest::parse("https://example.com/dash/file.mpd", xml)?;
//! let plan = SegmentPlan::new(&manifest, PlanOptions::default())?;
//! for segment in plan.segments() {
//!     println!("{}", segment?.url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod manifest;
pub mod plan;
pub mod selector;
pub mod summary;
pub mod template;
pub mod timeline;

pub use manifest::Manifest;
pub use plan::{PlanOptions, PlannedSegment, SegmentPlan};
pub use timeline::{SegmentPosition, TimelineCoverage};
