//! End-to-end behavior of the interceptor pipeline.

use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::{service_fn, BoxError, ServiceBuilder, ServiceExt};

use request_interceptor::codec::{DecodeError, MAX_TREE_DEPTH, MAX_TREE_NODES};
use request_interceptor::{
    InterceptError, ParsedRequest, PatternRegistry, RequestInterceptor, RequestParseLayer, RpcCall,
};

mod common;

#[tokio::test]
async fn test_handler_sees_enriched_request() {
    let seen: Arc<Mutex<Option<RpcCall<ParsedRequest>>>> = Arc::new(Mutex::new(None));
    let sink = seen.clone();

    let service = ServiceBuilder::new()
        .layer(RequestParseLayer::new(common::interceptor(false)))
        .service(service_fn(move |call: RpcCall<ParsedRequest>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some(call);
                Ok::<_, BoxError>("handled")
            }
        }));

    let call = common::call(
        "orders.get",
        &json!({
            "originalUrl": "/users/42/orders/777",
            "rawHeaders": ["Content-Type", "application/json", "X-Trace", "abc"],
            "body": { "qty": 3 }
        }),
    )
    .with_args(vec![json!({ "subject": "orders.get" })]);

    let response = service.oneshot(call).await.unwrap();
    assert_eq!(response, "handled");

    let call = seen.lock().unwrap().take().unwrap();
    let request = call.data;
    assert_eq!(
        serde_json::to_value(request.params.as_ref().unwrap()).unwrap(),
        json!({ "id": "42", "orderId": "777" })
    );
    assert_eq!(
        serde_json::to_value(&request.headers).unwrap(),
        json!({ "content-type": "application/json", "x-trace": "abc" })
    );
    assert_eq!(request.field_value("body").unwrap().unwrap(), json!({ "qty": 3 }));
    assert_eq!(call.args, vec![json!({ "subject": "orders.get" })]);
}

#[tokio::test]
async fn test_downstream_error_is_forwarded() {
    let service = ServiceBuilder::new()
        .layer(RequestParseLayer::new(common::interceptor(false)))
        .service(service_fn(|_: RpcCall<ParsedRequest>| async move {
            Err::<(), BoxError>("handler failed".into())
        }));

    let err = service
        .oneshot(common::call("users.get", &json!({ "originalUrl": "/users/1" })))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "handler failed");
    assert!(err.downcast_ref::<InterceptError>().is_none());
}

#[test]
fn test_pattern_without_digits_gives_empty_params() {
    let call = common::call("users.get", &json!({ "originalUrl": "/users" }));
    let call = common::interceptor(false).prepare(call).unwrap();
    assert_eq!(call.data.params.map(|p| p.len()), Some(0));
}

#[test]
fn test_fewer_digit_runs_than_placeholders() {
    let call = common::call("orders.get", &json!({ "originalUrl": "/users/7/orders" }));
    let request = common::interceptor(false).prepare(call).unwrap().data;
    assert_eq!(request.param("id"), Some("7"));
    assert_eq!(request.param("orderId"), None);
    assert_eq!(request.params.unwrap().len(), 1);
}

#[test]
fn test_header_count_matches_pairs() {
    let raw: Vec<String> = (0..5)
        .flat_map(|i| [format!("X-Header-{i}"), format!("v{i}")])
        .collect();
    let call = common::call("users.get", &json!({ "rawHeaders": raw }));
    let request = common::interceptor(false).prepare(call).unwrap().data;

    assert_eq!(request.headers.len(), raw.len() / 2);
    assert!(request.headers.keys().all(|k| *k == k.to_lowercase()));
}

#[test]
fn test_odd_raw_headers_give_empty_map() {
    let call = common::call("users.get", &json!({ "rawHeaders": ["A", "1", "B"] }));
    let request = common::interceptor(false).prepare(call).unwrap().data;
    assert!(request.headers.is_empty());
}

#[test]
fn test_number_payload_rejected_before_decode() {
    let err = common::interceptor(false)
        .prepare(RpcCall::new("users.get", json!(42)))
        .unwrap_err();
    assert!(err.is_type_violation());
    assert_eq!(err.to_string(), "Error parsing request JSON: Request must be a string");
}

#[test]
fn test_file_mode_seeds_empty_list() {
    let call = common::call("users.get", &json!({ "originalUrl": "/users/1" }));
    let request = common::interceptor(true).prepare(call).unwrap().data;
    assert_eq!(request.files, Some(Vec::new()));
}

#[test]
fn test_file_mode_keeps_decoded_files() {
    let call = common::call(
        "users.get",
        &json!({
            "originalUrl": "/users/1",
            "files": [{
                "fieldname": "doc",
                "buffer": { "type": "Buffer", "data": [1, 2, 3] },
                "mimetype": "application/pdf",
                "size": 3,
                "encoding": "7bit",
                "originalname": "doc.pdf"
            }]
        }),
    );
    let request = common::interceptor(true).prepare(call).unwrap().data;
    let files = request.files.unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].originalname, "doc.pdf");
    assert_eq!(files[0].size, 3);
}

#[test]
fn test_cyclic_request_is_accepted() {
    // Express-style request whose socket points back at the request
    let raw = r#"[{"originalUrl":"1","rawHeaders":"2","socket":"3"},"/users/9",["4","5"],{"parser":"0"},"Host","svc"]"#;
    let call = RpcCall::new("users.get", Value::String(raw.to_string()));
    let request = common::interceptor(false).prepare(call).unwrap().data;

    assert_eq!(request.param("id"), Some("9"));
    assert_eq!(request.header("host"), Some("svc"));

    let socket = request.field("socket").unwrap();
    assert_eq!(request.payload.field(socket, "parser"), Some(request.payload.root()));
    assert!(request.field_value("socket").unwrap().is_err());
}

#[test]
fn test_every_decode_failure_has_one_shape() {
    let payloads = [
        json!(null),
        json!(["not", "a", "string"]),
        json!("not json"),
        json!("[]"),
        json!(r#"[{"originalUrl":"9"}]"#),
        json!(r#"["just a string"]"#),
    ];

    for data in payloads {
        let err = common::interceptor(false)
            .prepare(RpcCall::new("users.get", data.clone()))
            .unwrap_err();
        assert!(
            err.to_string().starts_with("Error parsing request JSON: "),
            "payload {data} gave {err}"
        );
    }
}

/// `[{"files":"1"},{"x":"2"},{"x":"3"},...]`: one object nested per entry.
fn files_chain(depth: usize) -> Value {
    let mut table = vec![r#"{"files":"1"}"#.to_string()];
    table.extend((2..=depth).map(|i| format!(r#"{{"x":"{i}"}}"#)));
    table.push("{}".to_string());
    Value::String(format!("[{}]", table.join(",")))
}

/// `[{"files":"1"},["2","2"],["3","3"],...]`: each level shared twice.
fn files_dag(levels: usize) -> Value {
    let mut table = vec![r#"{"files":"1"}"#.to_string()];
    table.extend((2..=levels).map(|i| format!(r#"["{i}","{i}"]"#)));
    table.push(r#""leaf""#.to_string());
    Value::String(format!("[{}]", table.join(",")))
}

#[test]
fn test_deeply_nested_files_are_rejected() {
    let err = common::interceptor(true)
        .prepare(RpcCall::new("users.get", files_chain(200_000)))
        .unwrap_err();
    assert!(matches!(err.decode_error(), DecodeError::TooDeep { limit: MAX_TREE_DEPTH }));
}

#[test]
fn test_exponentially_shared_files_are_rejected() {
    let err = common::interceptor(true)
        .prepare(RpcCall::new("users.get", files_dag(30)))
        .unwrap_err();
    assert!(matches!(err.decode_error(), DecodeError::TooLarge { limit: MAX_TREE_NODES }));
}

#[test]
fn test_nested_body_fails_on_materialization_only() {
    let raw = files_chain(200_000);
    let raw = raw.as_str().unwrap().replacen("files", "body", 1);
    let request = common::interceptor(false)
        .prepare(RpcCall::new("users.get", Value::String(raw)))
        .unwrap()
        .data;
    assert!(matches!(
        request.field_value("body").unwrap(),
        Err(DecodeError::TooDeep { .. })
    ));
}

#[test]
fn test_empty_pattern_leaves_params_unset() {
    let registry = PatternRegistry::new().with_route("h", "").unwrap();
    let interceptor = RequestInterceptor::new(Arc::new(registry), false);

    let call = common::call("h", &json!({ "originalUrl": "/users/42" }));
    let request = interceptor.prepare(call).unwrap().data;
    assert!(request.params.is_none());
}
