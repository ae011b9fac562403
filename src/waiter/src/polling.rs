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

//! The polling loop.

use crate::{Completion, Error, Fetch, Lifecycle, Poller, PollingResult, Result, TargetStates};
use gax::exponential_backoff::ExponentialBackoff;
use gax::options::WaiterOptions;
use gax::polling_backoff_policy::PollingBackoffPolicy;
use gax::polling_state::PollingState;
use gax::response::Response;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// The shortest delay between polls, regardless of the options.
pub const MINIMUM_POLLING_INTERVAL: Duration = Duration::from_millis(1);

/// The source of the error returned when a wait runs out of time.
///
/// The resource may still reach one of the desired states later.
///
/// # Example
/// ```
/// # use cloudsdk_waiter::{Error, MaximumWaitExceeded};
/// fn last_state(error: &Error) -> Option<&str> {
///     use std::error::Error as _;
///     error
///         .source()
///         .and_then(|e| e.downcast_ref::<MaximumWaitExceeded>())
///         .and_then(|e| e.last_state.as_deref())
/// }
/// ```
#[derive(Clone, Debug, thiserror::Error)]
#[error(
    "the resource did not reach the desired state after {elapsed:?} (maximum wait is {maximum:?}), last observed state was {last_state:?}"
)]
#[non_exhaustive]
pub struct MaximumWaitExceeded {
    /// How long the waiter polled the resource.
    pub elapsed: Duration,
    /// The configured maximum wait.
    pub maximum: Duration,
    /// The lifecycle state in the last observation, if any.
    pub last_state: Option<String>,
}

/// Creates a waiter polling `fetcher` until `predicate` is satisfied.
///
/// # Example
/// ```
/// # use cloudsdk_waiter::*;
/// # use gax::options::WaiterOptions;
/// # use gax::response::Response;
/// # #[derive(Debug)]
/// # struct Vcn { cidr_blocks: Vec<String> }
/// # impl Lifecycle for Vcn {}
/// # struct Client;
/// # impl ResourceReader for Client {
/// #     type Resource = Vcn;
/// #     async fn get(&self, _id: &str) -> Result<Response<Vcn>> {
/// #         Ok(Response::from(Vcn { cidr_blocks: vec!["10.0.0.0/16".into()] }))
/// #     }
/// # }
/// # tokio_test::block_on(async {
/// let client = Client;
/// let fetcher = ResourceFetcher::new(&client, "ocid1.vcn.oc1..example");
/// let waiter = wait_until(
///     fetcher,
///     |vcn: &Vcn| !vcn.cidr_blocks.is_empty(),
///     WaiterOptions::default(),
/// );
/// let completion = waiter.until_done().await?;
/// assert!(matches!(completion, Completion::Reached(_)));
/// # Ok::<(), Error>(()) });
/// ```
pub fn wait_until<F, P>(fetcher: F, predicate: P, options: WaiterOptions) -> Waiter<F, P>
where
    F: Fetch,
    P: Fn(&F::Output) -> bool + Send + Sync,
{
    Waiter::new(fetcher, predicate, options)
}

/// Creates a waiter polling `fetcher` until the resource reaches one of the
/// `target_states`.
///
/// States are compared without regard to ASCII case. If `target_states` is
/// empty the waiter completes after the first successful fetch.
pub fn wait_for_states<F, S>(
    fetcher: F,
    target_states: S,
    options: WaiterOptions,
) -> Waiter<F, impl Fn(&F::Output) -> bool + Send + Sync>
where
    F: Fetch,
    F::Output: Lifecycle,
    S: Into<TargetStates>,
{
    let states = target_states.into();
    let predicate = move |observation: &F::Output| states.is_empty() || states.matches(observation);
    wait_until(fetcher, predicate, options)
}

/// Polls a resource until a predicate is satisfied.
///
/// Each poll fetches a fresh observation and evaluates the predicate, with no
/// memory of previous observations. The wait completes when:
///
/// * the predicate is satisfied,
/// * the fetch fails with a "not found" error and the options are configured
///   to succeed on "not found",
/// * the fetch fails with any other error,
/// * the maximum wait elapses after an observation that does not satisfy the
///   predicate, or
/// * the cancellation token in the options is cancelled.
///
/// Use [wait_until] or [wait_for_states] to create instances of this type.
pub struct Waiter<F, P> {
    fetcher: F,
    predicate: P,
    options: WaiterOptions,
    backoff_policy: Arc<dyn PollingBackoffPolicy>,
    state: PollingState,
    done: bool,
}

impl<F, P> Waiter<F, P>
where
    F: Fetch,
    P: Fn(&F::Output) -> bool + Send + Sync,
{
    fn new(fetcher: F, predicate: P, options: WaiterOptions) -> Self {
        let backoff_policy = options
            .polling_backoff_policy()
            .clone()
            .unwrap_or_else(|| Arc::new(ExponentialBackoff::default()));
        Self {
            fetcher,
            predicate,
            options,
            backoff_policy,
            state: PollingState::default(),
            done: false,
        }
    }

    /// The number of fetches so far.
    pub fn attempt_count(&self) -> u32 {
        self.state.attempt_count
    }

    async fn fetch(&mut self) -> Result<Response<F::Output>> {
        let fetch = self.fetcher.fetch();
        match self.options.cancellation_token() {
            None => fetch.await,
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(Error::cancelled()),
                r = fetch => r,
            },
        }
    }

    /// The delay before the next fetch.
    ///
    /// Never shorter than [MINIMUM_POLLING_INTERVAL], unless less time than
    /// that remains in the budget.
    fn wait_period(&self) -> Duration {
        let remaining = self
            .options
            .max_wait()
            .saturating_sub(self.state.elapsed());
        self.backoff_policy
            .wait_period(&self.state)
            .min(self.options.max_interval())
            .max(MINIMUM_POLLING_INTERVAL)
            .min(remaining)
    }

    fn sleep(&self) -> impl Future<Output = Result<()>> + Send + 'static {
        let period = self.wait_period();
        tracing::debug!(
            attempt = self.state.attempt_count,
            ?period,
            "sleeping before the next poll"
        );
        let token = self.options.cancellation_token().cloned();
        async move {
            let sleep = tokio::time::sleep(period);
            match token {
                None => {
                    sleep.await;
                    Ok(())
                }
                Some(token) => tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(Error::cancelled()),
                    _ = sleep => Ok(()),
                },
            }
        }
    }
}

impl<F, P> Waiter<F, P>
where
    F: Fetch,
    F::Output: Lifecycle,
    P: Fn(&F::Output) -> bool + Send + Sync,
{
    fn handle_fetch(&self, result: Result<Response<F::Output>>) -> PollingResult<F::Output> {
        let attempt = self.state.attempt_count;
        match result {
            Err(e) if e.is_not_found() && self.options.succeed_on_not_found() => {
                tracing::debug!(attempt, "the resource no longer exists, the wait is complete");
                PollingResult::Completed(Ok(Completion::NotFound))
            }
            Err(e) => {
                tracing::debug!(attempt, error = %e, "cannot fetch the resource");
                PollingResult::Completed(Err(e))
            }
            Ok(response) => {
                let state = response.body().lifecycle_state();
                let satisfied = (self.predicate)(response.body());
                tracing::debug!(attempt, ?state, satisfied, "observed the resource");
                if satisfied {
                    return PollingResult::Completed(Ok(Completion::Reached(response)));
                }
                let elapsed = self.state.elapsed();
                let maximum = self.options.max_wait();
                if elapsed >= maximum {
                    tracing::warn!(
                        attempt,
                        ?state,
                        ?elapsed,
                        ?maximum,
                        "the resource did not reach the desired state in time"
                    );
                    let source = MaximumWaitExceeded {
                        elapsed,
                        maximum,
                        last_state: state.map(str::to_string),
                    };
                    return PollingResult::Completed(Err(Error::timeout(source)));
                }
                PollingResult::InProgress(response)
            }
        }
    }
}

impl<F, P> crate::sealed::Poller for Waiter<F, P> {}

impl<F, P> Poller<F::Output> for Waiter<F, P>
where
    F: Fetch,
    F::Output: Lifecycle,
    P: Fn(&F::Output) -> bool + Send + Sync,
{
    async fn poll(&mut self) -> Option<PollingResult<F::Output>> {
        if self.done {
            return None;
        }
        if self.state.attempt_count == 0 {
            self.state = PollingState::default();
        }
        self.state.attempt_count += 1;
        let result = self.fetch().await;
        let poll = self.handle_fetch(result);
        self.done = matches!(poll, PollingResult::Completed(_));
        Some(poll)
    }

    async fn until_done(mut self) -> Result<Completion<F::Output>> {
        while let Some(p) = self.poll().await {
            match p {
                // Return, the resource reached a target state, the wait
                // failed, or the wait ran out of time.
                PollingResult::Completed(r) => return r,
                // Continue, the resource was successfully fetched but is not
                // in a target state.
                PollingResult::InProgress(_) => (),
            }
            self.sleep().await?;
        }
        // Only reachable if the application polled the waiter to completion
        // before calling this function.
        Err(Error::exhausted("the wait already completed"))
    }

    #[cfg(feature = "unstable-stream")]
    fn into_stream(self) -> impl futures::Stream<Item = PollingResult<F::Output>> + Unpin {
        use futures::stream::unfold;
        Box::pin(unfold(Some(self), move |state| async move {
            let mut poller = state?;
            if poller.state.attempt_count != 0 && !poller.done {
                if let Err(e) = poller.sleep().await {
                    poller.done = true;
                    return Some((PollingResult::Completed(Err(e)), Some(poller)));
                }
            }
            let pr = poller.poll().await?;
            Some((pr, Some(poller)))
        }))
    }
}
