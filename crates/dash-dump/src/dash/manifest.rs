use std::ops::Deref;

use dash_mpd::{AdaptationSet, Representation, MPD};
use url::Url;

use super::template::Template;
use crate::error::{DumpError, DumpResult};

pub const CONTENT_TYPE_VIDEO: &str = "video";
pub const CONTENT_TYPE_AUDIO: &str = "audio";

/// A decoded MPD together with the URL it was fetched from.
///
/// Relative segment addresses are resolved against `base_url`. The manifest is never
/// mutated after construction, every lookup returns a view into it.
#[derive(Debug, Clone)]
pub struct Manifest {
    base_url: Url,
    mpd: MPD,
}

impl Manifest {
    pub fn new(base_url: &str, mpd: MPD) -> DumpResult<Self> {
        Ok(Self::from_url(Url::parse(base_url)?, mpd))
    }

    pub fn from_url(base_url: Url, mpd: MPD) -> Self {
        Self { base_url, mpd }
    }

    /// Decodes `xml` and wraps it with `base_url`.
    pub fn parse(base_url: &str, xml: &str) -> DumpResult<Self> {
        let base_url = Url::parse(base_url)?;
        let mpd = dash_mpd::parse(xml)?;
        Ok(Self::from_url(base_url, mpd))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Finds the first adaptation set of `content_type` across all periods.
    ///
    /// An adaptation set declaring `@lang` only matches when it equals `lang`. One without
    /// `@lang` matches unconditionally, so it wins over any later language-tagged set.
    pub fn media(&self, content_type: &str, lang: &str) -> Option<&AdaptationSet> {
        self.mpd
            .periods
            .iter()
            .flat_map(|p| p.adaptations.iter())
            .filter(|a| a.contentType.as_deref() == Some(content_type))
            .find(|a| a.lang.as_deref().map_or(true, |l| l == lang))
    }

    pub fn audio(&self, lang: &str) -> Option<&AdaptationSet> {
        self.media(CONTENT_TYPE_AUDIO, lang)
    }

    pub fn video(&self, lang: &str) -> Option<&AdaptationSet> {
        self.media(CONTENT_TYPE_VIDEO, lang)
    }

    /// All video adaptation sets of a period, in document order.
    pub fn video_adaptation_sets(&self, period: usize) -> DumpResult<Vec<&AdaptationSet>> {
        let periods = self.mpd.periods.len();
        let period = self
            .mpd
            .periods
            .get(period)
            .ok_or(DumpError::PeriodOutOfRange { period, periods })?;

        Ok(period
            .adaptations
            .iter()
            .filter(|a| a.contentType.as_deref() == Some(CONTENT_TYPE_VIDEO))
            .collect())
    }

    /// Builds the address of one segment of `adaptation`.
    ///
    /// A `timestamp` of 0 addresses the initialization segment, anything else a media segment.
    pub fn segment_url(
        &self,
        adaptation: &AdaptationSet,
        timestamp: u64,
        bandwidth: u64,
        number: u64,
        representation: &Representation,
    ) -> DumpResult<Url> {
        let segment_template = adaptation
            .SegmentTemplate
            .as_ref()
            .ok_or(DumpError::MissingSegmentTemplate)?;

        let url_template = if timestamp == 0 {
            segment_template.initialization.as_deref()
        } else {
            segment_template.media.as_deref()
        };

        if let Some(url_template) = url_template {
            if representation.id.is_none()
                && Template::references(url_template, Template::REPRESENTATION_ID)
            {
                return Err(DumpError::MissingRepresentationId);
            }
        }

        let mut template = Template::new();
        template
            .insert(Template::BANDWIDTH, bandwidth)
            .insert(Template::TIME, timestamp)
            .insert(Template::NUMBER, number)
            .insert_optional(Template::REPRESENTATION_ID, representation.id.as_deref());

        template.resolve_url(&self.base_url, url_template)
    }
}

impl Deref for Manifest {
    type Target = MPD;

    fn deref(&self) -> &Self::Target {
        &self.mpd
    }
}
