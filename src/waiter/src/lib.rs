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

//! Types and functions to wait for resources to reach a lifecycle state.
//!
//! Many state-changing calls return before the change is complete. For
//! example, creating a virtual network returns a resource in the
//! `PROVISIONING` state, and the network is only usable once it reaches the
//! `AVAILABLE` state. This crate provides:
//!
//! * A [Waiter] that polls a resource until a predicate is satisfied, the
//!   wait runs out of time, or fetching the resource fails.
//! * [CompositeOperations], combining a state-changing call with a wait
//!   for the affected resource to reach one of several target states.
//!
//! # Example
//! ```no_run
//! # use cloudsdk_waiter::*;
//! # use gax::options::WaiterOptions;
//! # async fn sample<C>(client: &C) -> anyhow::Result<()>
//! # where C: ResourceReader, C::Resource: std::fmt::Debug {
//! let fetcher = ResourceFetcher::new(client, "ocid1.vcn.oc1..example");
//! let completion = wait_for_states(fetcher, ["AVAILABLE"], WaiterOptions::default())
//!     .until_done()
//!     .await?;
//! println!("resource is ready: {completion:?}");
//! # Ok(()) }
//! ```

pub use gax::Result;
pub use gax::error::Error;
use gax::response::Response;
use std::future::Future;

mod client;
pub use client::*;
mod composite;
pub use composite::*;
mod fetcher;
pub use fetcher::*;
mod state;
pub use state::*;
mod polling;
pub use polling::*;

/// The result of polling a resource.
///
/// # Parameters
/// * `R` - the resource type.
#[derive(Debug)]
pub enum PollingResult<R> {
    /// The resource has not reached any of the desired states.
    ///
    /// Contains the latest observation of the resource.
    InProgress(Response<R>),
    /// The wait completed. This includes the final result.
    ///
    /// An error indicates the resource could not be fetched, the wait ran out
    /// of time, or the wait was cancelled.
    Completed(Result<Completion<R>>),
}

/// How a successful wait completed.
#[derive(Debug)]
pub enum Completion<R> {
    /// The resource reached one of the desired states.
    Reached(Response<R>),
    /// The resource no longer exists.
    ///
    /// Only returned when the waiter is configured to succeed on "not found".
    NotFound,
}

impl<R> Completion<R> {
    /// The final observation, if the resource still exists.
    pub fn response(&self) -> Option<&Response<R>> {
        match self {
            Self::Reached(r) => Some(r),
            Self::NotFound => None,
        }
    }

    /// Consumes the completion returning the final observation, if any.
    pub fn into_response(self) -> Option<Response<R>> {
        match self {
            Self::Reached(r) => Some(r),
            Self::NotFound => None,
        }
    }

    /// Returns true if the resource no longer exists.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// The trait implemented by waiters.
///
/// # Parameters
/// * `R` - the resource type, that is, the type of each observation.
pub trait Poller<R>: Send + sealed::Poller {
    /// Fetch the resource once and evaluate the predicate.
    ///
    /// This function does not sleep. Returns `None` once the wait has
    /// completed.
    fn poll(&mut self) -> impl Future<Output = Option<PollingResult<R>>> + Send;

    /// Poll the resource until the wait completes.
    ///
    /// Sleeps between polls, using the polling backoff policy capped at the
    /// maximum interval and at the remaining time budget.
    fn until_done(self) -> impl Future<Output = Result<Completion<R>>> + Send;

    /// Convert a poller to a [Stream][futures::stream::Stream].
    ///
    /// The stream sleeps between polls, just like
    /// [until_done][Poller::until_done], and ends after the
    /// [Completed][PollingResult::Completed] item.
    #[cfg(feature = "unstable-stream")]
    fn into_stream(self) -> impl futures::Stream<Item = PollingResult<R>> + Unpin;
}

mod sealed {
    pub trait Poller {}
}
