//! Turn a request's captured path parameters into a filter.
//!
//! # Design Decisions
//! - One filtered lookup, never an existence check per ancestor: a missing
//!   parent and a parent that does not own the record both come back as
//!   zero rows, so callers can only ever report not-found
//! - A capture absent from the parameters is a dispatcher bug, reported as
//!   [`ResolveError`] rather than folded into not-found

use thiserror::Error;

use crate::lookup::chain::{FieldPath, LookupChain};
use crate::lookup::filter::FilterSpec;
use crate::routing::router::RouteKind;
use crate::routing::template::{PathParams, PK_CAPTURE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The route declares a capture the matched path did not supply.
    #[error("path parameter `{0}` was not captured")]
    MissingCapture(String),
}

/// Build the filter for a request on a route with `chain`.
///
/// Ancestor constraints come first in chain order; detail requests then pin
/// `pk`.
pub fn resolve(
    chain: &LookupChain,
    kind: RouteKind,
    params: &PathParams,
) -> Result<FilterSpec, ResolveError> {
    let spec = chain.steps().iter().try_fold(
        FilterSpec::new(),
        |spec, step| -> Result<FilterSpec, ResolveError> {
            let value = params
                .get(step.capture())
                .ok_or_else(|| ResolveError::MissingCapture(step.capture().to_owned()))?;
            Ok(spec.and(step.field().clone(), value))
        },
    )?;

    match kind {
        RouteKind::List => Ok(spec),
        RouteKind::Detail => {
            let pk = params
                .get(PK_CAPTURE)
                .ok_or_else(|| ResolveError::MissingCapture(PK_CAPTURE.to_owned()))?;
            Ok(spec.and(FieldPath::new(PK_CAPTURE), pk))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> PathParams {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_root_list_has_no_constraints() {
        let spec = resolve(&LookupChain::root(), RouteKind::List, &PathParams::new()).unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_root_detail_pins_pk() {
        let spec = resolve(
            &LookupChain::root(),
            RouteKind::Detail,
            &params(&[("pk", "1")]),
        )
        .unwrap();
        assert_eq!(spec.to_string(), "pk=1");
    }

    #[test]
    fn test_grandchild_detail_orders_ancestors_first() {
        let chain = LookupChain::root().descend("author").descend("language");
        let spec = resolve(
            &chain,
            RouteKind::Detail,
            &params(&[("pk", "3"), ("language", "2"), ("language__author", "1")]),
        )
        .unwrap();

        assert_eq!(
            spec.to_string(),
            "language__author=1 AND language=2 AND pk=3"
        );
        assert_eq!(spec.primary_key(), Some("3"));
    }

    #[test]
    fn test_missing_capture_is_an_error() {
        let chain = LookupChain::root().descend("author");

        assert_eq!(
            resolve(&chain, RouteKind::List, &PathParams::new()).unwrap_err(),
            ResolveError::MissingCapture("author".into())
        );
        assert_eq!(
            resolve(&chain, RouteKind::Detail, &params(&[("author", "1")])).unwrap_err(),
            ResolveError::MissingCapture("pk".into())
        );
    }
}
