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

//! Cloud SDK helpers.
//!
//! This crate contains a number of types and functions shared by the
//! generated REST clients and by the lifecycle waiters built on top of them:
//! the error type returned by all calls, the response wrapper, per-request
//! options, waiter options, and the policies controlling the polling loops.

/// An alias of [std::result::Result] where the error is always [crate::error::Error].
///
/// This is the result type used by all functions wrapping REST calls.
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// The core error types used by generated clients and waiters.
pub mod error;

pub mod exponential_backoff;
pub mod options;
pub mod polling_backoff_policy;
pub mod polling_state;
pub mod response;
