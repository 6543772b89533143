//! Racing policy over adapter futures.
//!
//! Two primitives:
//! - [`first_fulfilled`]: the first attempt to succeed wins; if every attempt
//!   fails, the failure of the earliest attempt by argument order is returned.
//! - [`race_first_success`]: a primary attempt runs beside a
//!   [`first_fulfilled`] group of fallbacks. Both are awaited to completion,
//!   then the primary's success wins over the group's, and the primary's
//!   failure wins over the group's.

use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use geofix_core::{ErrorCode, GeolocationFailure, Locale};

use crate::adapter::LocateResult;

/// Resolve with the first attempt to succeed, by completion order.
///
/// Pending attempts are dropped once a winner is found.
///
/// # Errors
///
/// When every attempt fails, returns the failure of the first attempt in
/// argument order. An empty set of attempts fails with
/// [`ErrorCode::PositionUnavailable`], localized to `locale`.
pub async fn first_fulfilled<I, F>(attempts: I, locale: Locale) -> LocateResult
where
    I: IntoIterator<Item = F>,
    F: Future<Output = LocateResult>,
{
    let mut pending: FuturesUnordered<_> = attempts
        .into_iter()
        .enumerate()
        .map(|(index, attempt)| async move { (index, attempt.await) })
        .collect();

    let mut first_failure: Option<(usize, GeolocationFailure)> = None;
    while let Some((index, outcome)) = pending.next().await {
        match outcome {
            Ok(fix) => {
                tracing::debug!(backend = %fix.geolocator, index, "attempt fulfilled first");
                return Ok(fix);
            }
            Err(failure) => {
                tracing::debug!(index, error = %failure, "attempt failed");
                if first_failure.as_ref().is_none_or(|(seen, _)| index < *seen) {
                    first_failure = Some((index, failure));
                }
            }
        }
    }

    Err(first_failure.map_or_else(
        || {
            GeolocationFailure::new(
                ErrorCode::PositionUnavailable,
                locale,
                Some("no backends to race".to_string()),
            )
        },
        |(_, failure)| failure,
    ))
}

/// Run `primary` beside a [`first_fulfilled`] race of `fallbacks`.
///
/// Waits for both sides to settle. The primary's fix wins whenever it has
/// one, even if a fallback finished first.
///
/// # Errors
///
/// Fails only when both sides fail, and then always with the primary's
/// failure. `locale` only matters for an empty fallback group.
pub async fn race_first_success<P, I, F>(
    primary: P,
    fallbacks: I,
    locale: Locale,
) -> LocateResult
where
    P: Future<Output = LocateResult>,
    I: IntoIterator<Item = F>,
    F: Future<Output = LocateResult>,
{
    let (primary, fallback) = futures::join!(primary, first_fulfilled(fallbacks, locale));

    match (primary, fallback) {
        (Ok(fix), _) => Ok(fix),
        (Err(primary_failure), Ok(fix)) => {
            tracing::debug!(
                backend = %fix.geolocator,
                primary_error = %primary_failure,
                "primary failed, using fallback fix"
            );
            Ok(fix)
        }
        (Err(primary_failure), Err(fallback_failure)) => {
            tracing::debug!(
                primary_error = %primary_failure,
                fallback_error = %fallback_failure,
                "primary and every fallback failed"
            );
            Err(primary_failure)
        }
    }
}
