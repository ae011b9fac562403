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

//! The client interfaces used by waiters and composite operations.
//!
//! Generated clients implement these traits, typically as thin wrappers
//! around their "get" calls. Applications may implement them in mocks.

use crate::{Lifecycle, Result};
use gax::response::Response;
use std::future::Future;

/// The name of the header carrying the work request id of an asynchronous
/// operation.
pub const WORK_REQUEST_ID_HEADER: &str = "opc-work-request-id";

/// Fetches the current state of a resource.
///
/// # Example
/// ```
/// # use cloudsdk_waiter::{Lifecycle, ResourceReader, Result};
/// # use gax::response::Response;
/// #[derive(Debug)]
/// struct Vcn { lifecycle_state: String }
/// impl Lifecycle for Vcn {
///     fn lifecycle_state(&self) -> Option<&str> { Some(&self.lifecycle_state) }
/// }
///
/// struct Client;
/// impl ResourceReader for Client {
///     type Resource = Vcn;
///     async fn get(&self, _identifier: &str) -> Result<Response<Vcn>> {
///         Ok(Response::from(Vcn { lifecycle_state: "AVAILABLE".into() }))
///     }
/// }
/// ```
pub trait ResourceReader: Send + Sync {
    /// The resource type returned by [get][ResourceReader::get].
    type Resource: Lifecycle + Send;

    /// Fetches the current state of the resource named by `identifier`.
    fn get(&self, identifier: &str)
    -> impl Future<Output = Result<Response<Self::Resource>>> + Send;
}

/// Fetches the current state of a work request.
///
/// Some state-changing calls do not return the affected resource. Instead,
/// they start a work request and return its identifier in the
/// `opc-work-request-id` header. The work request status is its lifecycle
/// state.
pub trait WorkRequestReader: Send + Sync {
    /// The work request type returned by
    /// [get_work_request][WorkRequestReader::get_work_request].
    type WorkRequest: Lifecycle + Send;

    /// Fetches the current state of the work request named by `identifier`.
    fn get_work_request(
        &self,
        identifier: &str,
    ) -> impl Future<Output = Result<Response<Self::WorkRequest>>> + Send;
}
