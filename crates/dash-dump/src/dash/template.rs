// References:
// 1. https://github.com/clitic/vsd/blob/30ca1985e4a467ea3304b11c08d3176deaafd22a/vsd/src/dash/template.rs
// 2. https://github.com/emarsden/dash-mpd-rs/blob/6ebdfb4759adbda8233b5b3520804e23ff86e7de/src/fetch.rs#L435-L466

use regex::{Captures, Regex, Replacer};
use std::{collections::HashMap, fmt, sync::LazyLock};
use url::Url;

use crate::error::{DumpError, DumpResult};

// From https://dashif.org/docs/DASH-IF-IOP-v4.3.pdf:
// "For the avoidance of doubt, only %0[width]d is permitted and no other identifiers. The reason
// is that such a string replacement can be easily implemented without requiring a specific library."
//
// Example template: "$RepresentationID$/$Number%06d$.m4s"
static TEMPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(RepresentationID|Number|Time|Bandwidth)(?:%0(\d+)d)?\$").unwrap()
});

/// Value bound to a template identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValue {
    Unsigned(u64),
    Text(String),
}

impl fmt::Display for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateValue::Unsigned(value) => write!(f, "{value}"),
            TemplateValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<u64> for TemplateValue {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Default, Clone)]
pub struct Template {
    args: HashMap<&'static str, TemplateValue>,
}

impl Template {
    pub const REPRESENTATION_ID: &'static str = "RepresentationID";
    pub const NUMBER: &'static str = "Number";
    pub const TIME: &'static str = "Time";
    pub const BANDWIDTH: &'static str = "Bandwidth";

    pub fn new() -> Self {
        Self {
            args: HashMap::with_capacity(4),
        }
    }

    pub fn insert<V>(&mut self, key: &'static str, value: V) -> &mut Self
    where
        V: Into<TemplateValue>,
    {
        self.args.insert(key, value.into());
        self
    }

    pub fn insert_optional<V>(&mut self, key: &'static str, value: Option<V>) -> &mut Self
    where
        V: Into<TemplateValue>,
    {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Substitutes every recognised identifier bound in this template.
    ///
    /// Identifiers without a bound value, and names that are not DASH identifiers,
    /// are left as they are.
    pub fn resolve(&self, template: &str) -> String {
        TEMPLATE_REGEX
            .replace_all(template, TemplateReplacer(&self.args))
            .to_string()
    }

    /// Returns true when `template` contains the identifier `key`, with or without a width.
    pub fn references(template: &str, key: &str) -> bool {
        TEMPLATE_REGEX
            .captures_iter(template)
            .any(|caps| &caps[1] == key)
    }

    /// Expands `template` and resolves it as a reference relative to `base`.
    pub fn resolve_url(&self, base: &Url, template: Option<&str>) -> DumpResult<Url> {
        let template = template
            .filter(|t| !t.is_empty())
            .ok_or(DumpError::InvalidTemplate)?;

        let path = self.resolve(template);
        Ok(base.join(&path)?)
    }
}

struct TemplateReplacer<'a>(&'a HashMap<&'static str, TemplateValue>);

impl Replacer for TemplateReplacer<'_> {
    fn replace_append(&mut self, caps: &Captures<'_>, dst: &mut String) {
        let Some(value) = self.0.get(&caps[1]) else {
            dst.push_str(&caps[0]);
            return;
        };

        let value = value.to_string();
        let width = caps.get(2).and_then(|m| m.as_str().parse::<usize>().ok());
        if let Some(width) = width {
            dst.push_str(&format!("{value:0>width$}"));
        } else {
            dst.push_str(&value);
        }
    }
}
