//! Verify request building and response classification against the JSON test
//! vectors stored in `test-vectors/`.
//!
//! Bodies are compared as parsed JSON, not raw strings, so field ordering in
//! the encoder does not cause false failures.

use loops_core::{ClientConfig, HttpMethod, HttpResponse, LoopsClient, LoopsError, RequestSpec};
use serde_json::Value;

fn client() -> LoopsClient {
    LoopsClient::from_config(ClientConfig::new("test-key"))
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn string_pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn query_pairs(value: &Value) -> Vec<(String, Option<String>)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().map(str::to_string))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let spec_json = &case["spec"];
        let mut spec = RequestSpec::new(
            parse_method(spec_json["method"].as_str().unwrap()),
            spec_json["path"].as_str().unwrap(),
        )
        .headers(&string_pairs(&spec_json["headers"]));
        spec.query = query_pairs(&spec_json["query"]);
        if !spec_json["body"].is_null() {
            spec = spec.json(spec_json["body"].clone());
        }

        let req = c.build_request(spec).unwrap();
        let expected = &case["expected_request"];
        let method = parse_method(expected["method"].as_str().unwrap());
        assert_eq!(req.method, method, "{name}: method");
        assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(req.query, query_pairs(&expected["query"]), "{name}: query");
        assert_eq!(req.headers, string_pairs(&expected["headers"]), "{name}: headers");

        match req.body.as_deref() {
            Some(body) => {
                let body: Value = serde_json::from_str(body).unwrap();
                assert_eq!(body, expected["body"], "{name}: body");
            }
            None => assert!(expected["body"].is_null(), "{name}: body should be None"),
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse {
            status: case["status"].as_u64().unwrap() as u16,
            headers: string_pairs(&case["headers"]),
            body: case["body"].as_str().unwrap().to_string(),
        };
        let expected = &case["expected"];
        let result = c.parse_response(response);

        match expected["kind"].as_str().unwrap() {
            "ok" => {
                assert_eq!(result.unwrap(), expected["value"], "{name}: value");
            }
            "invalid_response" => {
                assert!(
                    matches!(result, Err(LoopsError::InvalidResponse(_))),
                    "{name}: expected InvalidResponse"
                );
            }
            "rate_limited" => match result {
                Err(LoopsError::RateLimited(info)) => {
                    assert_eq!(info.limit, expected["limit"].as_str().unwrap(), "{name}: limit");
                    assert_eq!(
                        info.remaining,
                        expected["remaining"].as_str().unwrap(),
                        "{name}: remaining"
                    );
                    assert_eq!(
                        info.to_string(),
                        expected["message"].as_str().unwrap(),
                        "{name}: message"
                    );
                }
                other => panic!("{name}: expected RateLimited, got {other:?}"),
            },
            "api" => match result {
                Err(LoopsError::Api(api)) => {
                    assert_eq!(
                        u64::from(api.status()),
                        expected["status"].as_u64().unwrap(),
                        "{name}: status"
                    );
                    assert_eq!(api.body(), expected["body"].as_str().unwrap(), "{name}: body");
                    assert_eq!(
                        api.to_string(),
                        expected["message"].as_str().unwrap(),
                        "{name}: message"
                    );
                }
                other => panic!("{name}: expected Api, got {other:?}"),
            },
            other => panic!("{name}: unknown expected kind: {other}"),
        }
    }
}
