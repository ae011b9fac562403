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

//! Fetchers bind a client to the identifier of the resource being polled.

use crate::{ResourceReader, Result, WorkRequestReader};
use gax::response::Response;
use std::future::Future;

/// Fetches a fresh observation of a single resource.
///
/// Waiters call [fetch][Fetch::fetch] once per poll. Implementations must not
/// cache observations.
pub trait Fetch: Send {
    /// The observation type.
    type Output: Send;

    /// Fetches the current representation of the resource.
    fn fetch(&mut self) -> impl Future<Output = Result<Response<Self::Output>>> + Send;
}

/// Fetches a resource by identifier, using a [ResourceReader].
///
/// # Example
/// ```
/// # use cloudsdk_waiter::{Lifecycle, ResourceFetcher, ResourceReader, Result};
/// # use gax::response::Response;
/// # struct Vcn;
/// # impl Lifecycle for Vcn {}
/// # struct Client;
/// # impl ResourceReader for Client {
/// #     type Resource = Vcn;
/// #     async fn get(&self, _id: &str) -> Result<Response<Vcn>> { Ok(Response::from(Vcn)) }
/// # }
/// let client = Client;
/// let fetcher = ResourceFetcher::new(&client, "ocid1.vcn.oc1..example");
/// assert_eq!(fetcher.identifier(), "ocid1.vcn.oc1..example");
/// ```
#[derive(Debug)]
pub struct ResourceFetcher<'a, C> {
    client: &'a C,
    identifier: String,
}

impl<'a, C> ResourceFetcher<'a, C> {
    /// Creates a fetcher for the resource named by `identifier`.
    pub fn new<T: Into<String>>(client: &'a C, identifier: T) -> Self {
        Self {
            client,
            identifier: identifier.into(),
        }
    }

    /// The identifier of the resource.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl<C> Fetch for ResourceFetcher<'_, C>
where
    C: ResourceReader,
{
    type Output = C::Resource;

    fn fetch(&mut self) -> impl Future<Output = Result<Response<Self::Output>>> + Send {
        self.client.get(&self.identifier)
    }
}

/// Fetches a work request by identifier, using a [WorkRequestReader].
#[derive(Debug)]
pub struct WorkRequestFetcher<'a, C> {
    client: &'a C,
    identifier: String,
}

impl<'a, C> WorkRequestFetcher<'a, C> {
    /// Creates a fetcher for the work request named by `identifier`.
    pub fn new<T: Into<String>>(client: &'a C, identifier: T) -> Self {
        Self {
            client,
            identifier: identifier.into(),
        }
    }

    /// The identifier of the work request.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl<C> Fetch for WorkRequestFetcher<'_, C>
where
    C: WorkRequestReader,
{
    type Output = C::WorkRequest;

    fn fetch(&mut self) -> impl Future<Output = Result<Response<Self::Output>>> + Send {
        self.client.get_work_request(&self.identifier)
    }
}
