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

//! Verify the fake client forwards request options and maps errors.

#[cfg(test)]
mod tests {
    use gax::options::{RequestOptions, WaiterOptions};
    use httptest::{Expectation, Server, matchers::*, responders::*};
    use integration_tests_waiter::Result;
    use integration_tests_waiter::fake::client::VirtualNetworkClient;
    use integration_tests_waiter::fake::composite::VirtualNetworkClientCompositeOperations;
    use integration_tests_waiter::fake::model::*;
    use integration_tests_waiter::tracing::enable_tracing;
    use serde_json::json;
    use std::time::Duration;

    const VCN_ID: &str = "ocid1.vcn.oc1..test";
    const VCN_PATH: &str = "/20160918/vcns/ocid1.vcn.oc1..test";

    fn vcn_body(state: &str) -> String {
        json!({
            "id": VCN_ID,
            "compartmentId": "ocid1.compartment.oc1..test",
            "displayName": "test-vcn",
            "cidrBlocks": ["10.0.0.0/16"],
            "lifecycleState": state,
        })
        .to_string()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn create_forwards_request_options() -> Result<()> {
        let _guard = enable_tracing();
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/20160918/vcns"),
                request::headers(contains(("opc-retry-token", "retry-token-123"))),
                request::headers(contains(("user-agent", "test-agent/1.0"))),
                request::body(json_decoded(eq(json!({
                    "compartmentId": "ocid1.compartment.oc1..test",
                    "displayName": "test-vcn",
                    "cidrBlocks": ["10.0.0.0/16"],
                })))),
            ])
            .times(1)
            .respond_with(status_code(200).body(vcn_body("PROVISIONING"))),
        );
        let client = VirtualNetworkClient::new(format!("http://{}", server.addr()));

        let details = CreateVcnDetails::default()
            .set_compartment_id("ocid1.compartment.oc1..test")
            .set_display_name("test-vcn")
            .set_cidr_blocks(["10.0.0.0/16"]);
        let options = RequestOptions::default()
            .with_retry_token("retry-token-123")
            .with_user_agent("test-agent/1.0");
        let response = client.create_vcn(details, options).await?;
        assert_eq!(response.body().id, VCN_ID);
        assert_eq!(response.status_code(), Some(200));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn composite_update_forwards_request_options() -> Result<()> {
        let _guard = enable_tracing();
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", VCN_PATH),
                request::headers(contains(("if-match", "etag-42"))),
            ])
            .times(1)
            .respond_with(status_code(200).body(vcn_body("AVAILABLE"))),
        );
        let operations = VirtualNetworkClientCompositeOperations::new(VirtualNetworkClient::new(
            format!("http://{}", server.addr()),
        ));

        let response = operations
            .update_vcn_and_wait_for_state(
                VCN_ID,
                UpdateVcnDetails::default().set_display_name("renamed"),
                Vec::<String>::new(),
                RequestOptions::default().with_if_match("etag-42"),
                WaiterOptions::default(),
            )
            .await?;
        assert_eq!(response.body().display_name, "test-vcn");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn attempt_timeout() -> Result<()> {
        let _guard = enable_tracing();
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method("GET"))
                .times(0..2)
                .respond_with(delay_and_then(
                    Duration::from_secs(2),
                    status_code(200).body(vcn_body("AVAILABLE")),
                )),
        );
        let client = VirtualNetworkClient::new(format!("http://{}", server.addr()));

        let options = RequestOptions::default().with_attempt_timeout(Duration::from_millis(50));
        let err = client.get_vcn(VCN_ID, options).await.unwrap_err();
        assert!(err.is_timeout(), "{err:?}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn connection_error() -> Result<()> {
        let _guard = enable_tracing();
        // Nothing listens on the discard port.
        let client = VirtualNetworkClient::new("http://127.0.0.1:9");

        let err = client
            .get_vcn(VCN_ID, RequestOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_io(), "{err:?}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn malformed_response() -> Result<()> {
        let _guard = enable_tracing();
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method("GET"))
                .times(1)
                .respond_with(status_code(200).body("not json")),
        );
        let client = VirtualNetworkClient::new(format!("http://{}", server.addr()));

        let err = client
            .get_vcn(VCN_ID, RequestOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_deserialization(), "{err:?}");
        Ok(())
    }
}
