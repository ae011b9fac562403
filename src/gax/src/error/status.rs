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

use serde::{Deserialize, Serialize};

/// The error payload returned by the services.
///
/// When a request fails the services return a JSON object with a
/// machine-readable `code` (for example `NotAuthorizedOrNotFound`, or
/// `IncorrectState`) and a human-readable `message`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Status {
    /// The service-specific error code.
    pub code: String,

    /// A developer-facing error message, in English.
    pub message: String,
}

impl Status {
    /// Sets the value for [code][Status::code].
    pub fn set_code<T: Into<String>>(mut self, v: T) -> Self {
        self.code = v.into();
        self
    }

    /// Sets the value for [message][Status::message].
    pub fn set_message<T: Into<String>>(mut self, v: T) -> Self {
        self.message = v.into();
        self
    }

    /// Returns true if the code indicates the resource does not exist.
    ///
    /// Services return `NotAuthorizedOrNotFound` when the caller cannot tell
    /// apart a missing resource from one they cannot access. Both are treated
    /// as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self.code.as_str(), "NotFound" | "NotAuthorizedOrNotFound")
    }
}

impl TryFrom<&bytes::Bytes> for Status {
    type Error = serde_json::Error;

    fn try_from(value: &bytes::Bytes) -> Result<Self, Self::Error> {
        let status = serde_json::from_slice::<Status>(value.as_ref())?;
        if status.code.is_empty() {
            use serde::de::Error as _;
            return Err(serde_json::Error::custom("missing error code"));
        }
        Ok(status)
    }
}
