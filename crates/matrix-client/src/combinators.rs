//! Conditional and racing combinators
//!
//! Small pieces of control flow shared by discovery and the endpoint
//! operations: a boolean-gated resolve/reject pair and a first-success race
//! over asynchronous operations.

use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};

use crate::{Error, Result};

/// Evaluate `then` when the condition holds, otherwise fail with `reason`
///
/// The reason may be empty; the caller only learns that a gated step was
/// refused.
pub fn ensure<T>(
    condition: bool,
    then: impl FnOnce() -> T,
    reason: impl Into<String>,
) -> Result<T> {
    if condition {
        Ok(then())
    } else {
        Err(Error::Precondition(reason.into()))
    }
}

/// Curried form of [`ensure`], taking the condition last
///
/// Useful when the boolean is computed earlier in a pipeline:
///
/// ```rust
/// use matrix_client::combinators::gate;
///
/// let confirmed = true;
/// let value = gate(|| "yay", "was refused")(confirmed).unwrap();
/// assert_eq!(value, "yay");
/// ```
pub fn gate<T>(
    then: impl FnOnce() -> T,
    reason: impl Into<String>,
) -> impl FnOnce(bool) -> Result<T> {
    let reason = reason.into();
    move |condition| ensure(condition, then, reason)
}

/// Race operations and resolve with the first one to succeed
///
/// Failures do not end the race; the result is `Err` only once every
/// operation has failed, carrying the collected errors in completion order.
/// An empty input fails immediately with no errors. Operations still pending
/// when a winner emerges are dropped, so no failure goes unobserved and
/// nothing keeps running behind the caller's back.
///
/// Note this is distinct from a first-completion race: a fast failure never
/// beats a slow success.
pub async fn first_ok<T, E, F>(
    operations: impl IntoIterator<Item = F>,
) -> std::result::Result<T, Vec<E>>
where
    F: Future<Output = std::result::Result<T, E>>,
{
    let mut pending: FuturesUnordered<F> = operations.into_iter().collect();
    let mut failures = Vec::new();

    while let Some(outcome) = pending.next().await {
        match outcome {
            Ok(value) => return Ok(value),
            Err(error) => failures.push(error),
        }
    }

    Err(failures)
}
