//! Path templates and captured parameters.
//!
//! # Grammar
//! ```text
//! /developers/                                  static segments
//! /developers/{pk}/                             capture
//! /developers/{language__author}/languages/...  chained ancestor capture
//! /.{format}                                    format-suffixed root
//! ```
//!
//! Captures match `[^/.]+`; the `format` capture matches `[a-z0-9]+`.

use std::collections::BTreeMap;
use std::fmt;

use crate::routing::router::ReverseError;

/// Capture naming the terminal record of a detail route.
pub const PK_CAPTURE: &str = "pk";

/// Capture carrying the format suffix, e.g. `json` in `/.json`.
pub const FORMAT_CAPTURE: &str = "format";

/// One `/`-separated piece of a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Static(String),
    Capture(String),
}

/// A routable path with named captures.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathTemplate {
    segments: Vec<Segment>,
    trailing_slash: bool,
    format_suffix: bool,
}

impl Default for PathTemplate {
    fn default() -> Self {
        Self::root()
    }
}

impl PathTemplate {
    /// The bare root, `/`.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
            trailing_slash: true,
            format_suffix: false,
        }
    }

    pub fn push_static(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(Segment::Static(segment.into()));
        self
    }

    pub fn push_capture(mut self, name: impl Into<String>) -> Self {
        self.segments.push(Segment::Capture(name.into()));
        self
    }

    /// Whether a non-root path ends with `/`. The root is always `/`.
    pub fn with_trailing_slash(mut self, trailing_slash: bool) -> Self {
        self.trailing_slash = trailing_slash;
        self
    }

    /// Append a `.{format}` suffix to the last segment.
    pub fn with_format_suffix(mut self) -> Self {
        self.format_suffix = true;
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    pub fn format_suffix(&self) -> bool {
        self.format_suffix
    }

    /// Capture names in path order, the format capture last.
    pub fn captures(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Capture(name) => Some(name.as_str()),
                Segment::Static(_) => None,
            })
            .chain(self.format_suffix.then_some(FORMAT_CAPTURE))
    }

    /// Render a concrete path, substituting every capture from `params`.
    /// `params` must name exactly the template's captures.
    pub fn expand(&self, params: &PathParams) -> Result<String, ReverseError> {
        if let Some(missing) = self.captures().find(|c| params.get(c).is_none()) {
            return Err(ReverseError::MissingParameter {
                capture: missing.to_owned(),
            });
        }
        if let Some(unexpected) = params.keys().find(|key| !self.captures().any(|c| c == *key)) {
            return Err(ReverseError::UnexpectedParameter {
                param: unexpected.to_owned(),
            });
        }
        for (capture, value) in params.iter() {
            if !capture_accepts(capture, value) {
                return Err(ReverseError::InvalidValue {
                    capture: capture.to_owned(),
                    value: value.to_owned(),
                });
            }
        }

        Ok(self.render(|out, name| out.push_str(params.get(name).unwrap_or_default())))
    }

    fn render(&self, mut write_capture: impl FnMut(&mut String, &str)) -> String {
        let mut out = String::from("/");
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('/');
            }
            match segment {
                Segment::Static(text) => out.push_str(text),
                Segment::Capture(name) => write_capture(&mut out, name),
            }
        }

        if self.format_suffix {
            // `/developers.json` and `/.json`: the suffix replaces the slash
            out.push('.');
            write_capture(&mut out, FORMAT_CAPTURE);
        } else if self.trailing_slash && !self.segments.is_empty() {
            out.push('/');
        }
        out
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.render(|out, name| {
            out.push('{');
            out.push_str(name);
            out.push('}');
        });
        f.write_str(&rendered)
    }
}

/// Whether `value` can fill `capture`.
pub fn capture_accepts(capture: &str, value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    if capture == FORMAT_CAPTURE {
        value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    } else {
        !value.contains(['/', '.'])
    }
}

/// Values captured from a request path, keyed by capture name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    values: BTreeMap<String, String>,
}

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
