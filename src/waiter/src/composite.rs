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

//! Combine state-changing calls with a wait for the affected resource.

use crate::{
    Completion, Error, Identified, Poller, ResourceFetcher, ResourceReader, Result,
    TargetStates, WORK_REQUEST_ID_HEADER, WorkRequestFetcher, WorkRequestReader, wait_for_states,
};
use gax::options::WaiterOptions;
use gax::response::Response;
use std::future::Future;
use tracing::{Instrument, field};

/// The error returned by composite operations.
///
/// # Parameters
/// * `P` - the type of the partial result, that is, the result of the
///   state-changing call.
///
/// # Example
/// ```
/// # use cloudsdk_waiter::CompositeError;
/// # use gax::response::Response;
/// fn report(e: CompositeError<Response<String>>) {
///     match e {
///         CompositeError::Operation(e) => println!("nothing changed: {e}"),
///         CompositeError::Wait { partial_result, source } => {
///             println!("{} was committed, but: {source}", partial_result.body());
///         }
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum CompositeError<P> {
    /// The state-changing call failed.
    ///
    /// This is the error returned by the call, unmodified. No changes were
    /// made, or the call itself reports what changed.
    #[error(transparent)]
    Operation(Error),

    /// The state-changing call succeeded, but waiting for the resource
    /// failed.
    ///
    /// The source is the waiter error: it may indicate the resource could
    /// not be fetched, the wait ran out of time, or the wait was cancelled.
    /// The changes made by the call are committed, the partial result
    /// contains the call result.
    #[error("the operation succeeded, but waiting for the resource failed: {source}")]
    Wait {
        /// The result of the state-changing call.
        partial_result: Box<P>,
        /// The reason waiting failed.
        #[source]
        source: Error,
    },
}

impl<P> CompositeError<P> {
    /// The result of the state-changing call, if it succeeded.
    pub fn partial_result(&self) -> Option<&P> {
        match self {
            Self::Operation(_) => None,
            Self::Wait { partial_result, .. } => Some(partial_result.as_ref()),
        }
    }

    /// Consumes the error returning the result of the state-changing call,
    /// if it succeeded.
    pub fn into_partial_result(self) -> Option<P> {
        match self {
            Self::Operation(_) => None,
            Self::Wait { partial_result, .. } => Some(*partial_result),
        }
    }

    /// Returns true if the state-changing call succeeded and the wait failed.
    pub fn is_wait_failure(&self) -> bool {
        matches!(self, Self::Wait { .. })
    }

    /// The underlying error, from the call or from the waiter.
    pub fn error(&self) -> &Error {
        match self {
            Self::Operation(e) => e,
            Self::Wait { source, .. } => source,
        }
    }

    /// Consumes this error returning the underlying error.
    pub fn into_error(self) -> Error {
        match self {
            Self::Operation(e) => e,
            Self::Wait { source, .. } => source,
        }
    }

    fn wait(partial_result: P, source: Error) -> Self {
        tracing::warn!(error = %source, "waiting for the resource failed");
        Self::Wait {
            partial_result: Box::new(partial_result),
            source,
        }
    }
}

/// The result of a composite delete operation.
#[derive(Debug)]
pub enum Deletion<R> {
    /// The delete call succeeded and no wait was requested.
    Accepted(Response<()>),
    /// The resource reached one of the target states.
    Observed(Response<R>),
    /// The resource no longer exists.
    Gone,
}

/// The result of a composite operation tracked by a work request.
#[derive(Debug)]
pub enum WorkRequestOutcome<R, W> {
    /// The call succeeded and no wait was requested.
    Accepted(Response<R>),
    /// The work request reached one of the target states.
    Completed(Response<W>),
}

/// Performs state-changing calls and waits for the affected resources to
/// reach the desired lifecycle states.
///
/// Each function takes the state-changing call as a future. The future is
/// awaited exactly once, and only after any preconditions of the operation
/// are met.
///
/// # Example
/// ```no_run
/// # use cloudsdk_waiter::*;
/// # use gax::options::WaiterOptions;
/// # use gax::response::Response;
/// # #[derive(Debug)]
/// # struct Vcn { id: String, lifecycle_state: String }
/// # impl Lifecycle for Vcn { fn lifecycle_state(&self) -> Option<&str> { Some(&self.lifecycle_state) } }
/// # impl Identified for Vcn { fn identifier(&self) -> Option<&str> { Some(&self.id) } }
/// # struct Client;
/// # impl ResourceReader for Client {
/// #     type Resource = Vcn;
/// #     async fn get(&self, _id: &str) -> Result<Response<Vcn>> { panic!() }
/// # }
/// # impl Client { async fn create_vcn(&self) -> Result<Response<Vcn>> { panic!() } }
/// # async fn sample() -> anyhow::Result<()> {
/// let operations = CompositeOperations::new(Client);
/// let vcn = operations
///     .do_and_wait(
///         operations.client().create_vcn(),
///         ["AVAILABLE"],
///         WaiterOptions::default(),
///     )
///     .await?;
/// println!("created {vcn:?}");
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct CompositeOperations<C> {
    client: C,
}

impl<C> CompositeOperations<C> {
    /// Creates a new instance using `client` for all calls.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The client used by this instance.
    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C> CompositeOperations<C>
where
    C: ResourceReader,
    C::Resource: Identified,
{
    /// Performs a create, update, or action call, then waits for the resource
    /// to reach one of `target_states`.
    ///
    /// Returns the call result, unmodified, if `target_states` is empty.
    /// Otherwise, returns the last observation of the resource. If the call
    /// fails returns its error as [CompositeError::Operation]. If waiting
    /// fails returns [CompositeError::Wait] with the call result.
    ///
    /// The resource must exist at the end of the wait. If it disappears
    /// the wait fails with a "not found" error, even if `options` are
    /// configured to [succeed on not found].
    ///
    /// [succeed on not found]: WaiterOptions::succeed_on_not_found
    pub async fn do_and_wait<F, S>(
        &self,
        call: F,
        target_states: S,
        options: WaiterOptions,
    ) -> std::result::Result<Response<C::Resource>, CompositeError<Response<C::Resource>>>
    where
        F: Future<Output = Result<Response<C::Resource>>>,
        S: Into<TargetStates>,
    {
        let span = tracing::info_span!(
            "composite_operation",
            shape = "create_or_update",
            identifier = field::Empty
        );
        let target_states = target_states.into();
        async move {
            let response = call.await.map_err(CompositeError::Operation)?;
            if target_states.is_empty() {
                tracing::info!("no target states, returning the call result");
                return Ok(response);
            }
            let identifier = match response.body().identifier() {
                Some(id) => id.to_string(),
                None => {
                    return Err(CompositeError::wait(
                        response,
                        Error::deser("the response does not contain the resource identifier"),
                    ));
                }
            };
            tracing::Span::current().record("identifier", identifier.as_str());

            let fetcher = ResourceFetcher::new(&self.client, identifier);
            match wait_for_states(fetcher, target_states, options)
                .until_done()
                .await
            {
                Ok(Completion::Reached(r)) => {
                    tracing::info!("the resource reached a target state");
                    Ok(r)
                }
                Ok(Completion::NotFound) => Err(CompositeError::wait(
                    response,
                    Error::service(
                        gax::error::Status::default()
                            .set_code("NotFound")
                            .set_message("the resource no longer exists"),
                    ),
                )),
                Err(e) => Err(CompositeError::wait(response, e)),
            }
        }
        .instrument(span)
        .await
    }

    /// Deletes a resource, then waits for it to reach one of
    /// `target_states`, or to no longer exist.
    ///
    /// The resource is fetched before `call` is awaited. If this fetch fails
    /// the call is not made, and the error is returned as
    /// [CompositeError::Operation]. While waiting, a "not found" error is
    /// always a successful completion.
    pub async fn do_and_wait_for_delete<F, S>(
        &self,
        identifier: &str,
        call: F,
        target_states: S,
        options: WaiterOptions,
    ) -> std::result::Result<Deletion<C::Resource>, CompositeError<Response<()>>>
    where
        F: Future<Output = Result<Response<()>>>,
        S: Into<TargetStates>,
    {
        let span = tracing::info_span!(
            "composite_operation",
            shape = "delete",
            identifier = identifier
        );
        let target_states = target_states.into();
        async move {
            let initial = self
                .client
                .get(identifier)
                .await
                .map_err(CompositeError::Operation)?;
            let identifier = initial
                .body()
                .identifier()
                .unwrap_or(identifier)
                .to_string();

            let response = call.await.map_err(CompositeError::Operation)?;
            if target_states.is_empty() {
                tracing::info!("no target states, returning the call result");
                return Ok(Deletion::Accepted(response));
            }

            let options = options.with_succeed_on_not_found(true);
            let fetcher = ResourceFetcher::new(&self.client, identifier);
            match wait_for_states(fetcher, target_states, options)
                .until_done()
                .await
            {
                Ok(Completion::Reached(r)) => {
                    tracing::info!("the resource reached a target state");
                    Ok(Deletion::Observed(r))
                }
                Ok(Completion::NotFound) => {
                    tracing::info!("the resource no longer exists");
                    Ok(Deletion::Gone)
                }
                Err(e) => Err(CompositeError::wait(response, e)),
            }
        }
        .instrument(span)
        .await
    }
}

impl<C> CompositeOperations<C>
where
    C: WorkRequestReader,
{
    /// Performs a call tracked by a work request, then waits for the work
    /// request to reach one of `target_states`.
    ///
    /// The call response must include the `opc-work-request-id` header.
    /// Returns the call result, unmodified, if `target_states` is empty.
    pub async fn do_and_wait_for_work_request<F, R, S>(
        &self,
        call: F,
        target_states: S,
        options: WaiterOptions,
    ) -> std::result::Result<WorkRequestOutcome<R, C::WorkRequest>, CompositeError<Response<R>>>
    where
        F: Future<Output = Result<Response<R>>>,
        S: Into<TargetStates>,
    {
        let span = tracing::info_span!(
            "composite_operation",
            shape = "work_request",
            identifier = field::Empty
        );
        let target_states = target_states.into();
        async move {
            let response = call.await.map_err(CompositeError::Operation)?;
            if target_states.is_empty() {
                tracing::info!("no target states, returning the call result");
                return Ok(WorkRequestOutcome::Accepted(response));
            }
            let identifier = match response.header(WORK_REQUEST_ID_HEADER) {
                Some(id) => id.to_string(),
                None => {
                    return Err(CompositeError::wait(
                        response,
                        Error::deser(format!(
                            "the response does not contain the `{WORK_REQUEST_ID_HEADER}` header"
                        )),
                    ));
                }
            };
            tracing::Span::current().record("identifier", identifier.as_str());

            let fetcher = WorkRequestFetcher::new(&self.client, identifier);
            match wait_for_states(fetcher, target_states, options)
                .until_done()
                .await
            {
                Ok(Completion::Reached(r)) => {
                    tracing::info!("the work request reached a target state");
                    Ok(WorkRequestOutcome::Completed(r))
                }
                Ok(Completion::NotFound) => Err(CompositeError::wait(
                    response,
                    Error::service(
                        gax::error::Status::default()
                            .set_code("NotFound")
                            .set_message("the work request no longer exists"),
                    ),
                )),
                Err(e) => Err(CompositeError::wait(response, e)),
            }
        }
        .instrument(span)
        .await
    }
}
