//! Request Deadline
//!
//! A point in time, derived from the inbound request, after which
//! downstream work (database, hashing, filesystem) is abandoned.
//! Handlers create one per request and pass it down by value.
//!
//! Only async work is cancelled by dropping it. Work handed to a blocking
//! thread runs to completion once started, so callers [`Deadline::check`]
//! before spawning it.

use std::future::IntoFuture;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

/// Returned when a bounded call does not finish before its deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Request deadline exceeded")]
pub struct DeadlineExceeded;

/// Absolute deadline for a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Deadline `timeout` from now
    pub fn after(timeout: Duration) -> Self {
        Self {
            at: Instant::now() + timeout,
        }
    }

    /// Deadline at an explicit instant
    pub fn at(at: Instant) -> Self {
        Self { at }
    }

    pub fn is_elapsed(&self) -> bool {
        Instant::now() >= self.at
    }

    /// `Err` once the deadline has passed
    pub fn check(&self) -> Result<(), DeadlineExceeded> {
        if self.is_elapsed() {
            Err(DeadlineExceeded)
        } else {
            Ok(())
        }
    }

    /// Drive `fut` to completion unless the deadline passes first.
    ///
    /// On expiry the inner future is dropped, which cancels any
    /// outstanding I/O it owns. A `spawn_blocking` handle is only
    /// detached; the closure keeps running and its result is discarded.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, DeadlineExceeded>
    where
        F: IntoFuture,
    {
        tokio::time::timeout_at(self.at, fut)
            .await
            .map_err(|_| DeadlineExceeded)
    }
}
