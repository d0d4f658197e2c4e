//! ```text
//! ┌──────────────────┐  video sets   ┌──────────────────┐
//! │                  ├───────────────►                  │
//! │     Manifest     │               │   SegmentPlan    │
//! │                  ◄───────────────┤                  │
//! └──────────────────┘  segment_url  └────────┬─────────┘
//!                                             │ (number, time)
//!                                    ┌────────▼─────────┐
//!                                    │ SegmentSequence  │
//!                                    └──────────────────┘
//! ```
//!
//! Every planned URL is fetched in order by [`DumpClient::process`].

pub mod dash;
pub mod dump;
pub mod error;
pub mod http;

pub use dump::{DumpClient, DumpReport};
pub use error::{DumpError, DumpResult};
pub use http::HttpClient;
