// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per request options and waiter configuration.
//!
//! While the defaults are intended to work for most applications, it is
//! sometimes necessary to change the configuration. Applications sometimes
//! change the timeout for a specific call, or need to wait longer for a
//! resource that takes a long time to provision.
//!
//! [RequestOptions] are forwarded verbatim to the state-changing call made by
//! a composite operation. [WaiterOptions] control how the waiter polls the
//! resource after the call succeeds.

use crate::polling_backoff_policy::{PollingBackoffPolicy, PollingBackoffPolicyArg};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// The name of the header used to make state-changing requests idempotent.
pub const RETRY_TOKEN_HEADER: &str = "opc-retry-token";

/// A set of options configuring a single request.
///
/// Application only use this class directly in mocks, where they may want to
/// verify their application has configured all the right request parameters and
/// options.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    user_agent: Option<String>,
    attempt_timeout: Option<Duration>,
    retry_token: Option<String>,
    if_match: Option<String>,
}

impl RequestOptions {
    /// Prepends this prefix to the user agent header value.
    pub fn set_user_agent<T: Into<String>>(&mut self, v: T) {
        self.user_agent = Some(v.into());
    }

    /// Gets the current user-agent prefix
    pub fn user_agent(&self) -> &Option<String> {
        &self.user_agent
    }

    /// Sets the per-attempt timeout.
    pub fn set_attempt_timeout<T: Into<Duration>>(&mut self, v: T) {
        self.attempt_timeout = Some(v.into());
    }

    /// Gets the current per-attempt timeout.
    pub fn attempt_timeout(&self) -> &Option<Duration> {
        &self.attempt_timeout
    }

    /// Sets the retry token.
    ///
    /// Services use this token to detect duplicate state-changing requests.
    /// It is sent in the `opc-retry-token` header.
    pub fn set_retry_token<T: Into<String>>(&mut self, v: T) {
        self.retry_token = Some(v.into());
    }

    /// Gets the current retry token.
    pub fn retry_token(&self) -> Option<&str> {
        self.retry_token.as_deref()
    }

    /// Sets the `if-match` precondition.
    ///
    /// The request only succeeds if the resource `etag` matches this value.
    pub fn set_if_match<T: Into<String>>(&mut self, v: T) {
        self.if_match = Some(v.into());
    }

    /// Gets the current `if-match` precondition.
    pub fn if_match(&self) -> Option<&str> {
        self.if_match.as_deref()
    }

    /// Sets the user agent, consuming and returning `self`.
    pub fn with_user_agent<T: Into<String>>(mut self, v: T) -> Self {
        self.set_user_agent(v);
        self
    }

    /// Sets the per-attempt timeout, consuming and returning `self`.
    pub fn with_attempt_timeout<T: Into<Duration>>(mut self, v: T) -> Self {
        self.set_attempt_timeout(v);
        self
    }

    /// Sets the retry token, consuming and returning `self`.
    pub fn with_retry_token<T: Into<String>>(mut self, v: T) -> Self {
        self.set_retry_token(v);
        self
    }

    /// Sets the `if-match` precondition, consuming and returning `self`.
    pub fn with_if_match<T: Into<String>>(mut self, v: T) -> Self {
        self.set_if_match(v);
        self
    }
}

/// Default upper bound on the delay between polls.
pub const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(30);

/// Default total time budget for a wait.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(1200);

/// Configures how a waiter polls a resource.
///
/// # Example
/// ```
/// # use cloudsdk_gax::options::WaiterOptions;
/// use std::time::Duration;
/// let options = WaiterOptions::default()
///     .with_max_interval(Duration::from_secs(5))
///     .with_max_wait(Duration::from_secs(600));
/// assert_eq!(options.max_interval(), Duration::from_secs(5));
/// assert_eq!(options.max_wait(), Duration::from_secs(600));
/// assert!(!options.succeed_on_not_found());
/// ```
#[derive(Clone, Debug)]
pub struct WaiterOptions {
    max_interval: Duration,
    max_wait: Duration,
    succeed_on_not_found: bool,
    polling_backoff_policy: Option<Arc<dyn PollingBackoffPolicy>>,
    cancellation_token: Option<CancellationToken>,
}

impl WaiterOptions {
    /// The upper bound on the delay between polls.
    pub fn max_interval(&self) -> Duration {
        self.max_interval
    }

    /// Sets the upper bound on the delay between polls.
    ///
    /// The waiter always sleeps at least one millisecond between polls, a
    /// zero value does not result in continuous polling.
    pub fn set_max_interval<V: Into<Duration>>(&mut self, v: V) {
        self.max_interval = v.into();
    }

    /// The total time budget for the wait.
    pub fn max_wait(&self) -> Duration {
        self.max_wait
    }

    /// Sets the total time budget for the wait.
    ///
    /// The waiter fetches the resource at least once, even if this value is
    /// zero.
    pub fn set_max_wait<V: Into<Duration>>(&mut self, v: V) {
        self.max_wait = v.into();
    }

    /// If true, a "not found" error while polling completes the wait.
    pub fn succeed_on_not_found(&self) -> bool {
        self.succeed_on_not_found
    }

    /// Treat a "not found" error while polling as the successful completion
    /// of the wait.
    ///
    /// Composite delete operations always enable this option. Composite
    /// create, update, and action operations need the resource at the end of
    /// the wait, for them a resource that no longer exists is a wait failure
    /// regardless of this option.
    pub fn set_succeed_on_not_found(&mut self, v: bool) {
        self.succeed_on_not_found = v;
    }

    /// Get the current polling backoff policy override, if any.
    pub fn polling_backoff_policy(&self) -> &Option<Arc<dyn PollingBackoffPolicy>> {
        &self.polling_backoff_policy
    }

    /// Sets the polling backoff policy.
    pub fn set_polling_backoff_policy<V: Into<PollingBackoffPolicyArg>>(&mut self, v: V) {
        self.polling_backoff_policy = Some(v.into().0);
    }

    /// Get the cancellation token, if any.
    pub fn cancellation_token(&self) -> Option<&CancellationToken> {
        self.cancellation_token.as_ref()
    }

    /// Sets a token to cancel the wait.
    ///
    /// Cancelling the token aborts any in-flight fetch and any pending sleep.
    /// The waiter then returns an error where
    /// [is_cancelled][crate::error::Error::is_cancelled] is true.
    pub fn set_cancellation_token(&mut self, v: CancellationToken) {
        self.cancellation_token = Some(v);
    }

    /// Sets the upper bound on the delay between polls.
    pub fn with_max_interval<V: Into<Duration>>(mut self, v: V) -> Self {
        self.set_max_interval(v);
        self
    }

    /// Sets the total time budget for the wait.
    pub fn with_max_wait<V: Into<Duration>>(mut self, v: V) -> Self {
        self.set_max_wait(v);
        self
    }

    /// Treat a "not found" error as the successful completion of the wait.
    pub fn with_succeed_on_not_found(mut self, v: bool) -> Self {
        self.set_succeed_on_not_found(v);
        self
    }

    /// Sets the polling backoff policy.
    pub fn with_polling_backoff_policy<V: Into<PollingBackoffPolicyArg>>(mut self, v: V) -> Self {
        self.set_polling_backoff_policy(v);
        self
    }

    /// Sets a token to cancel the wait.
    pub fn with_cancellation_token(mut self, v: CancellationToken) -> Self {
        self.set_cancellation_token(v);
        self
    }
}

impl Default for WaiterOptions {
    fn default() -> Self {
        Self {
            max_interval: DEFAULT_MAX_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
            succeed_on_not_found: false,
            polling_backoff_policy: None,
            cancellation_token: None,
        }
    }
}

/// The serialized form of [WaiterOptions].
///
/// Applications may load wait overrides from their configuration files. All
/// the fields are optional, missing fields use the defaults.
///
/// # Example
/// ```
/// # use cloudsdk_gax::options::{WaiterConfig, WaiterOptions};
/// use std::time::Duration;
/// let config: WaiterConfig = serde_json::from_str(r#"{"max_wait_seconds": 60}"#)?;
/// let options = WaiterOptions::from(config);
/// assert_eq!(options.max_wait(), Duration::from_secs(60));
/// assert_eq!(options.max_interval(), Duration::from_secs(30));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
#[non_exhaustive]
pub struct WaiterConfig {
    /// Upper bound on the delay between polls, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_interval_seconds: Option<u64>,

    /// The total time budget for the wait, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_wait_seconds: Option<u64>,

    /// Treat a "not found" error as the successful completion of the wait.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub succeed_on_not_found: Option<bool>,
}

impl WaiterConfig {
    /// Applies the configured values on top of `options`.
    pub fn apply(&self, mut options: WaiterOptions) -> WaiterOptions {
        if let Some(v) = self.max_interval_seconds {
            options.set_max_interval(Duration::from_secs(v));
        }
        if let Some(v) = self.max_wait_seconds {
            options.set_max_wait(Duration::from_secs(v));
        }
        if let Some(v) = self.succeed_on_not_found {
            options.set_succeed_on_not_found(v);
        }
        options
    }
}

impl From<WaiterConfig> for WaiterOptions {
    fn from(value: WaiterConfig) -> Self {
        value.apply(WaiterOptions::default())
    }
}
