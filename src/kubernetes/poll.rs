// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Poll-until-ready against an eventually consistent API.
//!
//! Every assertion in this crate is a call to [`poll_until_ready`] with a
//! different check closure: the check returns [`Readiness::Ready`] when done,
//! [`Readiness::Pending`] with a diagnostic to keep polling, or an error to
//! abort. Attempts never overlap and are separated by the configured interval.

use crate::error::{E2eError, Result};
use crate::kubernetes::objects::{describe, is_malformed_request};
use kube::{Api, Resource};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info};

/// Interval and deadline of one polling loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollSettings {
    pub const fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

/// Result of a single poll attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness<T> {
    Ready(T),
    /// Not there yet; the message says what was observed instead
    Pending(String),
}

impl<T> Readiness<T> {
    pub fn pending(message: impl Into<String>) -> Self {
        Readiness::Pending(message.into())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready(_))
    }
}

/// Run `check` until it reports ready, fails, or `settings.timeout` elapses.
///
/// The first attempt runs immediately. An attempt still running at the
/// deadline is cancelled. On timeout the error carries the most recent
/// pending message so the failure is actionable.
pub async fn poll_until_ready<T, F, Fut>(
    what: &str,
    settings: PollSettings,
    mut check: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Readiness<T>>>,
{
    let start = Instant::now();
    let mut attempts = 0u32;
    let mut last_observed = String::from("no attempt completed");

    let timed_out = |attempts: u32, last_observed: String| E2eError::Timeout {
        what: what.to_string(),
        timeout: settings.timeout,
        attempts,
        last_observed,
    };

    loop {
        attempts += 1;

        let remaining = settings.timeout.saturating_sub(start.elapsed());
        let Ok(outcome) = timeout(remaining, check()).await else {
            debug!("Attempt {} for {} still running at the deadline", attempts, what);
            return Err(timed_out(attempts, last_observed));
        };

        match outcome? {
            Readiness::Ready(value) => {
                info!("{} is ready after {} attempt(s)", what, attempts);
                return Ok(value);
            }
            Readiness::Pending(message) => {
                debug!("Waiting for {}: {}, retrying...", what, message);
                last_observed = message;
            }
        }

        if start.elapsed() >= settings.timeout {
            return Err(timed_out(attempts, last_observed));
        }

        sleep(settings.interval).await;
    }
}

/// Fetch `name` through `api` until `predicate` accepts it, returning the last
/// fetched object.
///
/// Fetch failures count as "not ready yet", except malformed requests which
/// can never succeed and abort the poll.
pub async fn poll_object<K, P>(
    api: &Api<K>,
    name: &str,
    settings: PollSettings,
    predicate: P,
) -> Result<K>
where
    K: Resource + Clone + DeserializeOwned + Debug,
    K::DynamicType: Default,
    P: Fn(&K) -> Readiness<()>,
{
    let what = describe::<K>(name);
    let label = &what;
    let predicate = &predicate;

    poll_until_ready(&what, settings, move || async move {
        match api.get(name).await {
            Ok(obj) => Ok(match predicate(&obj) {
                Readiness::Ready(()) => Readiness::Ready(obj),
                Readiness::Pending(message) => Readiness::Pending(message),
            }),
            Err(e) if is_malformed_request(&e) => Err(E2eError::Fetch {
                what: label.clone(),
                source: e,
            }),
            Err(e) => Ok(Readiness::pending(format!("failed to get {}: {}", label, e))),
        }
    })
    .await
}
