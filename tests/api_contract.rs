//! Contract tests for the tuning API response shapes.

mod common;

use axum::http::StatusCode;
use common::{make_app, send, send_json, tuning_request};
use tuning_db::tuning::FIELD_NAMES;

#[tokio::test]
async fn test_contract_json_keys() {
    let mut app = make_app();
    let request = tuning_request("/tuning?format=json", None, r#"{"memory_gb": "16 GB"}"#);

    let (response, body) = send_json(&mut app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let object = body.as_object().unwrap();
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();

    let mut expected = vec![
        "max_connections",
        "innodb_buffer_pool_size",
        "innodb_dedicated_server",
        "innodb_change_buffering",
        "slow_query_log",
        "slow_query_log_file",
        "long_query_time",
        "performance_schema",
        "max_allowed_packet",
        "table_open_cache",
        "thread_stack",
        "thread_cache_size",
        "join_buffer_size",
        "sort_buffer_size",
        "tmp_table_size",
        "max_heap_table_size",
        "innodb_flush_method",
        "innodb_file_per_table",
        "innodb_open_files",
        "innodb_io_capacity",
        "innodb_io_capacity_max",
        "read_buffer_size",
    ];
    expected.sort_unstable();

    assert_eq!(keys, expected);
}

#[tokio::test]
async fn test_contract_json_value_types() {
    let mut app = make_app();
    let request = tuning_request("/tuning?format=json", None, r#"{"memory_gb": "16 GB"}"#);

    let (_, body) = send_json(&mut app, request).await;

    assert!(body["max_connections"].is_i64());
    assert!(body["innodb_buffer_pool_size"].is_string());
    assert_eq!(body["innodb_dedicated_server"], "ON");
    assert_eq!(body["innodb_change_buffering"], "none");
    assert_eq!(body["slow_query_log"], "ON");
    assert_eq!(body["slow_query_log_file"], "/var/log/mysql/slow_queries.log");
    assert_eq!(body["long_query_time"], 10);
    assert_eq!(body["performance_schema"], 1);
    assert_eq!(body["max_allowed_packet"], "64M");
    assert_eq!(body["table_open_cache"], 2000);
    assert_eq!(body["thread_stack"], "256K");
    assert_eq!(body["thread_cache_size"], -1);
    assert_eq!(body["join_buffer_size"], "2M");
    assert_eq!(body["sort_buffer_size"], "2M");
    assert_eq!(body["tmp_table_size"], "16M");
    assert_eq!(body["max_heap_table_size"], "16M");
    assert_eq!(body["innodb_flush_method"], "O_DIRECT");
    assert_eq!(body["innodb_file_per_table"], 1);
    assert_eq!(body["innodb_open_files"], -1);
    assert_eq!(body["innodb_io_capacity"], 200);
    assert_eq!(body["innodb_io_capacity_max"], 400);
}

#[tokio::test]
async fn test_contract_text_line_order() {
    let mut app = make_app();
    let request = tuning_request("/tuning?format=text", None, r#"{"memory_gb": "16 GB"}"#);

    let (_, body) = send(&mut app, request).await;
    let lines: Vec<&str> = body.lines().collect();

    assert_eq!(lines[0], "[mysqld]");
    assert_eq!(lines[1], "");
    for (i, name) in FIELD_NAMES.iter().enumerate() {
        assert!(
            lines[i + 2].starts_with(&format!("{}=", name)),
            "line {} should be {}, got {}",
            i + 2,
            name,
            lines[i + 2]
        );
    }
    assert_eq!(lines[24], "");
    assert!(lines[25].starts_with("# Save in a file with extension .cnf"));
}

#[tokio::test]
async fn test_contract_error_format() {
    let mut app = make_app();
    let request = tuning_request("/tuning", None, r#"{"memory_gb": "lots"}"#);

    let (response, body) = send_json(&mut app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body.get("error").is_some());
    assert!(body["error"].get("message").is_some());
    assert_eq!(body["error"]["type"], "invalid_request_error");
}
