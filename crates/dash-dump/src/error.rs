use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("URL template is missing or empty")]
    InvalidTemplate,

    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),

    #[error("AdaptationSet has no SegmentTemplate")]
    MissingSegmentTemplate,

    #[error("URL template requires $RepresentationID$ but the representation has no id")]
    MissingRepresentationId,

    #[error("Period {period} out of range, manifest has {periods} period(s)")]
    PeriodOutOfRange { period: usize, periods: usize },

    #[error("No candidate {0} to select from")]
    NoCandidate(&'static str),

    #[error("HTTP error: {0}")]
    HttpError(reqwest::StatusCode),

    #[error(transparent)]
    RequestError(#[from] reqwest::Error),

    #[error("Manifest body is not valid UTF-8: {0}")]
    ManifestEncodingError(#[from] std::str::Utf8Error),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    // MPEG-DASH errors
    #[error(transparent)]
    MpdParseError(#[from] dash_mpd::DashMpdError),
}

pub type DumpResult<T> = Result<T, DumpError>;
