//! Path matching against compiled templates.
//!
//! # Responsibilities
//! - Match a request path against one path template
//! - Extract capture values into `PathParams`
//! - Split off a `.{format}` suffix when the template carries one
//!
//! # Design Decisions
//! - Paths are case-sensitive and matched segment by segment
//! - Trailing slash must agree with the template exactly (no redirects)
//! - Captures never span `/` and never contain `.` (the suffix delimiter)
//! - No regex: a linear walk over segments

use crate::routing::template::{capture_accepts, PathParams, PathTemplate, Segment, FORMAT_CAPTURE};

/// Something a request path can be matched against.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Captured parameters when `path` matches, `None` otherwise.
    fn match_path(&self, path: &str) -> Option<PathParams>;
}

impl Matcher for PathTemplate {
    fn match_path(&self, path: &str) -> Option<PathParams> {
        let rest = path.strip_prefix('/')?;
        let mut params = PathParams::new();

        let body = if self.format_suffix() {
            // suffixed paths tolerate one trailing slash after the format
            let rest = rest.strip_suffix('/').unwrap_or(rest);
            let (body, format) = rest.rsplit_once('.')?;
            if !capture_accepts(FORMAT_CAPTURE, format) {
                return None;
            }
            params.insert(FORMAT_CAPTURE, format);
            body
        } else if self.segments().is_empty() {
            rest
        } else if self.trailing_slash() {
            rest.strip_suffix('/')?
        } else {
            rest
        };

        let parts: Vec<&str> = if body.is_empty() {
            Vec::new()
        } else {
            body.split('/').collect()
        };
        if parts.len() != self.segments().len() {
            return None;
        }

        for (segment, part) in self.segments().iter().zip(parts) {
            match segment {
                Segment::Static(text) if text == part => {}
                Segment::Static(_) => return None,
                Segment::Capture(name) => {
                    if !capture_accepts(name, part) {
                        return None;
                    }
                    params.insert(name.as_str(), part);
                }
            }
        }

        Some(params)
    }
}
