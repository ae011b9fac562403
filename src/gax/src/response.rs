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

//! Response types.
//!
//! This module contains types related to service responses. Notably it
//! contains the `Response` type itself. Typically you'll import this type.
//!
//! # Examples
//!
//! Inspecting the result of a request
//!
//! ```no_run
//! # use cloudsdk_gax::Result;
//! # use cloudsdk_gax::response::Response;
//! // A type representing a service resource, for example, a virtual network.
//! struct Resource {
//!   // ...
//! }
//!
//! async fn get_resource(id: &str) -> Result<Response<Resource>> {
//!   // ...
//! # panic!()
//! }
//!
//! # tokio_test::block_on(async {
//! let response = get_resource("ocid1.vcn.oc1..example").await?;
//! if let Some(etag) = response.headers().get("etag") {
//!     // do something with the etag
//! }
//! let resource = response.body();
//! // do something with the resource
//! # Result::<()>::Ok(()) });
//! ```
//!
//! Creating a response for mocks
//!
//! ```
//! # use cloudsdk_gax::Result;
//! # use cloudsdk_gax::response::Response;
//! struct Resource {
//!   // ...
//! }
//!
//! fn make_mock_response(body: Resource) -> Result<Response<Resource>> {
//!     Ok(Response::from(body))
//! }
//! ```

use crate::error::REQUEST_ID_HEADER;

/// Represents a service response.
///
/// A response consists of a body (potentially the unit type), and some
/// metadata, currently the HTTP status code and headers.
///
/// Typically you get a response as the result of making a request via some
/// client. You may also create responses directly when mocking clients for
/// your own tests.
#[derive(Clone, Debug)]
pub struct Response<T> {
    parts: Parts,
    body: T,
}

impl<T> Response<T> {
    /// Creates a response from the body.
    ///
    /// # Example
    /// ```
    /// # use cloudsdk_gax::response::Response;
    /// #[derive(Clone, Default)]
    /// pub struct Resource {
    ///   // ...
    /// }
    ///
    /// let body = Resource::default();
    /// let response = Response::from(body);
    /// ```
    pub fn from(body: T) -> Self {
        Self {
            body,
            parts: Parts::default(),
        }
    }

    /// Creates a response from the given parts.
    ///
    /// # Example
    /// ```
    /// # use cloudsdk_gax::response::Response;
    /// # use cloudsdk_gax::response::Parts;
    /// let mut headers = http::HeaderMap::new();
    /// headers.insert("etag", http::HeaderValue::from_static("abc"));
    /// let response = Response::from_parts(Parts::new().set_headers(headers), ());
    /// assert!(response.headers().get("etag").is_some());
    /// ```
    pub fn from_parts(parts: Parts, body: T) -> Self {
        Self { parts, body }
    }

    /// Returns the headers associated with this response.
    ///
    /// # Example
    /// ```
    /// # use cloudsdk_gax::response::Response;
    /// let response = Response::from(());
    /// assert!(response.headers().is_empty());
    /// ```
    pub fn headers(&self) -> &http::HeaderMap<http::HeaderValue> {
        &self.parts.headers
    }

    /// Returns the HTTP status code, if the response came from a transport.
    pub fn status_code(&self) -> Option<u16> {
        self.parts.status_code
    }

    /// Returns the value of a header, if present and valid UTF-8.
    ///
    /// # Example
    /// ```
    /// # use cloudsdk_gax::response::{Parts, Response};
    /// let mut headers = http::HeaderMap::new();
    /// headers.insert("opc-work-request-id", http::HeaderValue::from_static("wr-1"));
    /// let response = Response::from_parts(Parts::new().set_headers(headers), ());
    /// assert_eq!(response.header("opc-work-request-id"), Some("wr-1"));
    /// assert_eq!(response.header("missing"), None);
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The request id assigned by the service, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.header(REQUEST_ID_HEADER)
    }

    /// Returns the body associated with this response.
    ///
    /// # Example
    /// ```
    /// # use cloudsdk_gax::response::Response;
    /// let response = Response::from("test".to_string());
    /// assert_eq!(response.body().as_str(), "test");
    /// ```
    pub fn body(&self) -> &T {
        &self.body
    }

    /// Consumes the response returning the metadata, and body.
    ///
    /// # Example
    /// ```
    /// # use cloudsdk_gax::response::Response;
    /// let response = Response::from("test".to_string());
    /// let (parts, body) = response.into_parts();
    /// assert_eq!(body.as_str(), "test");
    /// assert!(parts.headers.is_empty());
    /// ```
    pub fn into_parts(self) -> (Parts, T) {
        (self.parts, self.body)
    }

    /// Consumes the response returning only its body.
    pub fn into_body(self) -> T {
        self.body
    }

    /// Transforms the body, preserving the metadata.
    ///
    /// # Example
    /// ```
    /// # use cloudsdk_gax::response::Response;
    /// let response = Response::from("test".to_string());
    /// let response = response.map(|s| s.len());
    /// assert_eq!(response.body(), &4);
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            parts: self.parts,
            body: f(self.body),
        }
    }
}

/// Component parts of a response.
///
/// The response parts, other than the body, consist of the HTTP status code
/// and headers. We anticipate the addition of new fields over time.
///
/// # Example
/// ```
/// # use cloudsdk_gax::response::Parts;
/// let mut headers = http::HeaderMap::new();
/// headers.insert(http::header::CONTENT_TYPE, http::HeaderValue::from_static("application/json"));
/// let parts = Parts::new().set_headers(headers).set_status_code(200_u16);
///
/// assert_eq!(
///     parts.headers.get(http::header::CONTENT_TYPE),
///     Some(&http::HeaderValue::from_static("application/json"))
/// );
/// assert_eq!(parts.status_code, Some(200));
/// ```
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct Parts {
    /// The HTTP headers.
    pub headers: http::HeaderMap<http::HeaderValue>,
    /// The HTTP status code, if any.
    pub status_code: Option<u16>,
}

impl Parts {
    /// Create a new instance.
    pub fn new() -> Self {
        Parts::default()
    }

    /// Set the headers.
    pub fn set_headers<V>(mut self, v: V) -> Self
    where
        V: Into<http::HeaderMap>,
    {
        self.headers = v.into();
        self
    }

    /// Set the status code.
    pub fn set_status_code<V>(mut self, v: V) -> Self
    where
        V: Into<u16>,
    {
        self.status_code = Some(v.into());
        self
    }
}
