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

//! Canned responses for the fake virtual network service.

use super::model::{Vcn, WorkRequest};
use httptest::http::StatusCode;
use serde_json::json;

pub const REQUEST_ID: &str = "fake-request-id";

/// A response returned by the fake service.
#[derive(Clone, Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl Reply {
    pub fn new<T: Into<String>>(status: StatusCode, body: T) -> Self {
        Self {
            status,
            headers: vec![("opc-request-id", REQUEST_ID.to_string())],
            body: body.into(),
        }
    }

    pub fn with_header<V: Into<String>>(mut self, name: &'static str, value: V) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn to_http(&self) -> httptest::http::Response<Vec<u8>> {
        let builder = httptest::http::Response::builder().status(self.status);
        let builder = self
            .headers
            .iter()
            .fold(builder, |b, (k, v)| b.header(*k, v.as_str()));
        let builder = if self.body.is_empty() {
            builder
        } else {
            builder.header("content-type", "application/json")
        };
        builder
            .body(self.body.clone().into_bytes())
            .expect("canned responses are valid")
    }
}

pub fn vcn(id: &str, state: &str) -> Reply {
    let vcn = Vcn::default()
        .set_id(id)
        .set_compartment_id("ocid1.compartment.oc1..test")
        .set_display_name("test-vcn")
        .set_cidr_blocks(["10.0.0.0/16"])
        .set_lifecycle_state(state);
    let body = serde_json::to_string(&vcn).expect("the model is serializable");
    Reply::new(StatusCode::OK, body).with_header("etag", format!("etag-{state}"))
}

/// A VCN response without an identifier.
pub fn anonymous_vcn(state: &str) -> Reply {
    vcn("", state)
}

pub fn work_request(id: &str, status: &str, percent_complete: f32) -> Reply {
    let wr = WorkRequest::default()
        .set_id(id)
        .set_operation_type("CHANGE_VCN_COMPARTMENT")
        .set_status(status)
        .set_percent_complete(percent_complete);
    let body = serde_json::to_string(&wr).expect("the model is serializable");
    Reply::new(StatusCode::OK, body)
}

/// The response of a call tracked by a work request.
pub fn accepted(work_request_id: &str) -> Reply {
    Reply::new(StatusCode::ACCEPTED, "").with_header("opc-work-request-id", work_request_id)
}

/// An accepted response missing the work request header.
pub fn accepted_without_work_request() -> Reply {
    Reply::new(StatusCode::ACCEPTED, "")
}

pub fn deleted() -> Reply {
    Reply::new(StatusCode::NO_CONTENT, "")
}

pub fn not_found() -> Reply {
    error(
        StatusCode::NOT_FOUND,
        "NotAuthorizedOrNotFound",
        "Authorization failed or requested resource not found.",
    )
}

pub fn conflict() -> Reply {
    error(
        StatusCode::CONFLICT,
        "IncorrectState",
        "The requested state for the resource conflicts with its current state.",
    )
}

pub fn internal() -> Reply {
    error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "InternalServerError",
        "An internal server error occurred.",
    )
}

/// An error response that is not a service error payload.
pub fn bad_gateway() -> Reply {
    Reply::new(StatusCode::BAD_GATEWAY, "upstream connect error")
}

fn error(status: StatusCode, code: &str, message: &str) -> Reply {
    let body = json!({"code": code, "message": message});
    Reply::new(status, body.to_string())
}
