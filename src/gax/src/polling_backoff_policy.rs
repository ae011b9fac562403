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

//! Defines the trait for polling backoff policies and a common implementation.
//!
//! Waiters poll a resource until it reaches one of the desired lifecycle
//! states. When doing so they backoff between polls to avoid overloading the
//! service.
//!
//! These policies should not be confused with retry backoff policies. Their
//! purpose is different, and their implementation is too. Notably, polling
//! backoff policies should not use jitter.
//!
//! The most common implementation is truncated [exponential backoff]
//! **without** jitter. The backoff period grows exponentially until some limit
//! is reached. This works well when the expected provisioning time is not
//! known in advance.
//!
//! Regardless of the policy, the waiter never sleeps longer than the
//! configured [maximum interval], nor past the end of the [maximum wait].
//!
//! [maximum interval]: crate::options::WaiterOptions::max_interval
//! [maximum wait]: crate::options::WaiterOptions::max_wait
//!
//! # Example
//! ```
//! # use cloudsdk_gax::exponential_backoff::Error;
//! # use cloudsdk_gax::exponential_backoff::ExponentialBackoffBuilder;
//! use std::time::Duration;
//!
//! let policy = ExponentialBackoffBuilder::new()
//!     .with_initial_delay(Duration::from_millis(100))
//!     .with_maximum_delay(Duration::from_secs(5))
//!     .with_scaling(4.0)
//!     .build()?;
//! // `policy` implements the `PollingBackoffPolicy` trait.
//! # Ok::<(), Error>(())
//! ```
//!
//! [Exponential backoff]: https://en.wikipedia.org/wiki/Exponential_backoff

use crate::polling_state::PollingState;
use std::sync::Arc;

/// Defines the trait implemented by all polling backoff strategies.
pub trait PollingBackoffPolicy: Send + Sync + std::fmt::Debug {
    /// Returns the delay before the next fetch.
    ///
    /// # Parameters
    /// * `state` - the current state of the polling loop. This method is
    ///   always called after the first fetch.
    fn wait_period(&self, state: &PollingState) -> std::time::Duration;
}

/// A helper type to use [PollingBackoffPolicy] in waiter options.
#[derive(Clone)]
pub struct PollingBackoffPolicyArg(pub(crate) Arc<dyn PollingBackoffPolicy>);

impl<T: PollingBackoffPolicy + 'static> std::convert::From<T> for PollingBackoffPolicyArg {
    fn from(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl std::convert::From<Arc<dyn PollingBackoffPolicy>> for PollingBackoffPolicyArg {
    fn from(value: Arc<dyn PollingBackoffPolicy>) -> Self {
        Self(value)
    }
}

/// A fixed polling interval.
///
/// The waiter still caps the interval at the maximum interval configured in
/// its options.
///
/// # Example
/// ```
/// # use cloudsdk_gax::polling_backoff_policy::{FixedInterval, PollingBackoffPolicy};
/// # use cloudsdk_gax::polling_state::PollingState;
/// use std::time::Duration;
/// let policy = FixedInterval::new(Duration::from_secs(30));
/// assert_eq!(policy.wait_period(&PollingState::default()), Duration::from_secs(30));
/// ```
#[derive(Clone, Debug)]
pub struct FixedInterval(std::time::Duration);

impl FixedInterval {
    /// Creates a new policy that always waits `interval` between polls.
    pub fn new(interval: std::time::Duration) -> Self {
        Self(interval)
    }
}

impl PollingBackoffPolicy for FixedInterval {
    fn wait_period(&self, _state: &PollingState) -> std::time::Duration {
        self.0
    }
}
