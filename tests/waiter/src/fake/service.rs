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

//! A fake virtual network service.
//!
//! Each route returns the next response in its queue. The "get" routes
//! repeat their last response once the queue has a single element, as a
//! resource keeps its state until something changes it.

use super::responses::Reply;
use httptest::http::{Response, StatusCode};
use httptest::{Expectation, Server, matchers::*};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const VCNS: &str = "/20160918/vcns";
const VCN: &str = r"^/20160918/vcns/[^/]+$";
const CHANGE_COMPARTMENT: &str = r"^/20160918/vcns/[^/]+/actions/changeCompartment$";
const WORK_REQUEST: &str = r"^/20160918/workRequests/[^/]+$";

#[derive(Debug, Default)]
pub struct ServerState {
    pub create: VecDeque<Reply>,
    pub get: VecDeque<Reply>,
    pub update: VecDeque<Reply>,
    pub delete: VecDeque<Reply>,
    pub change_compartment: VecDeque<Reply>,
    pub work_request: VecDeque<Reply>,
    /// The routes called, in order.
    pub calls: Vec<&'static str>,
}

impl ServerState {
    pub fn calls(&self, route: &str) -> usize {
        self.calls.iter().filter(|c| **c == route).count()
    }
}

pub type SharedServerState = Arc<Mutex<ServerState>>;

pub fn start(initial_state: ServerState) -> (String, Server, SharedServerState) {
    let state: SharedServerState = Arc::new(Mutex::new(initial_state));
    let server = Server::run();

    let create_state = Arc::clone(&state);
    server.expect(
        Expectation::matching(all_of![request::method("POST"), request::path(VCNS)])
            .times(..)
            .respond_with(move || next(&create_state, "create", |s| &mut s.create, false)),
    );

    let get_state = Arc::clone(&state);
    server.expect(
        Expectation::matching(all_of![request::method("GET"), request::path(matches(VCN))])
            .times(..)
            .respond_with(move || next(&get_state, "get", |s| &mut s.get, true)),
    );

    let update_state = Arc::clone(&state);
    server.expect(
        Expectation::matching(all_of![request::method("PUT"), request::path(matches(VCN))])
            .times(..)
            .respond_with(move || next(&update_state, "update", |s| &mut s.update, false)),
    );

    let delete_state = Arc::clone(&state);
    server.expect(
        Expectation::matching(all_of![
            request::method("DELETE"),
            request::path(matches(VCN))
        ])
        .times(..)
        .respond_with(move || next(&delete_state, "delete", |s| &mut s.delete, false)),
    );

    let change_state = Arc::clone(&state);
    server.expect(
        Expectation::matching(all_of![
            request::method("POST"),
            request::path(matches(CHANGE_COMPARTMENT))
        ])
        .times(..)
        .respond_with(move || {
            next(
                &change_state,
                "change_compartment",
                |s| &mut s.change_compartment,
                false,
            )
        }),
    );

    let work_request_state = Arc::clone(&state);
    server.expect(
        Expectation::matching(all_of![
            request::method("GET"),
            request::path(matches(WORK_REQUEST))
        ])
        .times(..)
        .respond_with(move || {
            next(
                &work_request_state,
                "work_request",
                |s| &mut s.work_request,
                true,
            )
        }),
    );

    let endpoint = format!("http://{}", server.addr());
    (endpoint, server, state)
}

fn next<F>(
    state: &SharedServerState,
    route: &'static str,
    queue: F,
    repeat_last: bool,
) -> Response<Vec<u8>>
where
    F: FnOnce(&mut ServerState) -> &mut VecDeque<Reply>,
{
    let mut state = state.lock().expect("shared state is poisoned");
    state.calls.push(route);
    let queue = queue(&mut *state);
    let reply = match (queue.len(), repeat_last) {
        (1, true) => queue.front().cloned(),
        _ => queue.pop_front(),
    };
    reply
        .unwrap_or_else(|| {
            Reply::new(
                StatusCode::BAD_REQUEST,
                format!("exhausted {route} responses"),
            )
        })
        .to_http()
}
