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

//! A minimal REST client for the fake virtual network service.

use super::model::*;
use gax::Result;
use gax::error::{Error, Status};
use gax::options::{RETRY_TOKEN_HEADER, RequestOptions};
use gax::response::{Parts, Response};
use reqwest::header::{HeaderValue, IF_MATCH, USER_AGENT};
use waiter::{ResourceReader, WorkRequestReader};

const API_VERSION: &str = "/20160918";

/// Performs calls against the virtual network service.
#[derive(Clone, Debug)]
pub struct VirtualNetworkClient {
    inner: reqwest::Client,
    endpoint: String,
}

impl VirtualNetworkClient {
    /// Creates a client for the service at `endpoint`.
    pub fn new<T: Into<String>>(endpoint: T) -> Self {
        Self {
            inner: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub async fn create_vcn(
        &self,
        details: CreateVcnDetails,
        options: RequestOptions,
    ) -> Result<Response<Vcn>> {
        let builder = self.builder(reqwest::Method::POST, "/vcns".to_string());
        self.execute(builder, Some(details), options).await
    }

    pub async fn get_vcn(&self, vcn_id: &str, options: RequestOptions) -> Result<Response<Vcn>> {
        let builder = self.builder(reqwest::Method::GET, format!("/vcns/{vcn_id}"));
        self.execute(builder, None::<()>, options).await
    }

    pub async fn update_vcn(
        &self,
        vcn_id: &str,
        details: UpdateVcnDetails,
        options: RequestOptions,
    ) -> Result<Response<Vcn>> {
        let builder = self.builder(reqwest::Method::PUT, format!("/vcns/{vcn_id}"));
        self.execute(builder, Some(details), options).await
    }

    pub async fn delete_vcn(&self, vcn_id: &str, options: RequestOptions) -> Result<Response<()>> {
        let builder = self.builder(reqwest::Method::DELETE, format!("/vcns/{vcn_id}"));
        self.execute(builder, None::<()>, options).await
    }

    /// Moves a VCN to a different compartment.
    ///
    /// The service tracks the move with a work request, its identifier is
    /// returned in the `opc-work-request-id` header.
    pub async fn change_vcn_compartment(
        &self,
        vcn_id: &str,
        details: ChangeVcnCompartmentDetails,
        options: RequestOptions,
    ) -> Result<Response<()>> {
        let builder = self.builder(
            reqwest::Method::POST,
            format!("/vcns/{vcn_id}/actions/changeCompartment"),
        );
        self.execute(builder, Some(details), options).await
    }

    pub async fn get_work_request(
        &self,
        work_request_id: &str,
        options: RequestOptions,
    ) -> Result<Response<WorkRequest>> {
        let builder =
            self.builder(reqwest::Method::GET, format!("/workRequests/{work_request_id}"));
        self.execute(builder, None::<()>, options).await
    }

    fn builder(&self, method: reqwest::Method, path: String) -> reqwest::RequestBuilder {
        self.inner
            .request(method, format!("{}{API_VERSION}{path}", &self.endpoint))
    }

    async fn execute<I, O>(
        &self,
        mut builder: reqwest::RequestBuilder,
        body: Option<I>,
        options: RequestOptions,
    ) -> Result<Response<O>>
    where
        I: serde::ser::Serialize,
        O: serde::de::DeserializeOwned + Default,
    {
        if let Some(user_agent) = options.user_agent() {
            builder = builder.header(
                USER_AGENT,
                HeaderValue::from_str(user_agent).map_err(Error::ser)?,
            );
        }
        if let Some(token) = options.retry_token() {
            builder = builder.header(
                RETRY_TOKEN_HEADER,
                HeaderValue::from_str(token).map_err(Error::ser)?,
            );
        }
        if let Some(etag) = options.if_match() {
            builder = builder.header(IF_MATCH, HeaderValue::from_str(etag).map_err(Error::ser)?);
        }
        if let Some(timeout) = options.attempt_timeout() {
            builder = builder.timeout(*timeout);
        }
        if let Some(body) = body {
            let payload = serde_json::to_vec(&body).map_err(Error::ser)?;
            builder = builder
                .header(
                    reqwest::header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )
                .body(payload);
        }
        let response = builder.send().await.map_err(map_send_error)?;
        if !response.status().is_success() {
            return to_http_error(response).await;
        }
        to_http_response(response).await
    }
}

impl ResourceReader for VirtualNetworkClient {
    type Resource = Vcn;

    async fn get(&self, identifier: &str) -> Result<Response<Vcn>> {
        self.get_vcn(identifier, RequestOptions::default()).await
    }
}

impl WorkRequestReader for VirtualNetworkClient {
    type WorkRequest = WorkRequest;

    async fn get_work_request(&self, identifier: &str) -> Result<Response<WorkRequest>> {
        VirtualNetworkClient::get_work_request(self, identifier, RequestOptions::default()).await
    }
}

fn map_send_error(err: reqwest::Error) -> Error {
    match err {
        e if e.is_timeout() => Error::timeout(e),
        e => Error::io(e),
    }
}

async fn to_http_error<O>(response: reqwest::Response) -> Result<O> {
    let status_code = response.status().as_u16();
    let headers = response.headers().clone();
    let body = response.bytes().await.map_err(Error::io)?;

    let error = match Status::try_from(&body) {
        Ok(status) => Error::service_with_http_metadata(status, Some(status_code), Some(headers)),
        Err(_) => Error::http(status_code, headers, body),
    };
    Err(error)
}

async fn to_http_response<O: serde::de::DeserializeOwned + Default>(
    response: reqwest::Response,
) -> Result<Response<O>> {
    // 202 Accepted and 204 No Content may have an empty body.
    let no_content_status = matches!(
        response.status(),
        reqwest::StatusCode::NO_CONTENT | reqwest::StatusCode::ACCEPTED
    );
    let status_code = response.status().as_u16();
    let headers = response.headers().clone();
    let body = response.bytes().await.map_err(Error::io)?;

    let response = match body {
        content if (content.is_empty() && no_content_status) => O::default(),
        content => serde_json::from_slice::<O>(&content).map_err(Error::deser)?,
    };

    Ok(Response::from_parts(
        Parts::new()
            .set_headers(headers)
            .set_status_code(status_code),
        response,
    ))
}
