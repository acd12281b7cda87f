use serde_json::{Value, json};
use sqlizer::{
    IdentifierPolicy, Query, QueryOptions, Row, SqlLogger, Sqlizer, SqlizerConfig, SqlizerError,
    build_statement, extract_count, format_datetime, rows_to_camel, to_snake,
};
use std::io;
use std::sync::{Arc, Mutex};
use tracing::Level;

fn row(value: Value) -> Row {
    value.as_object().cloned().unwrap()
}

#[test]
fn listing_endpoint_round_trip() {
    // Request payload arrives camelCased; the table uses snake_case columns.
    let filter = to_snake(json!({"ownerId": 7, "createdAt": {"$gte": "2024-01-01 00:00:00"}}), 1);
    let query = Query::new("documents")
        .filter(filter)
        .order_by("created_at DESC");

    let sqlizer = Sqlizer::default();
    let paged = sqlizer
        .paged(&query, &QueryOptions::new().fields(["id", "owner_id", "created_at"]), 2, 15)
        .unwrap();

    assert_eq!(
        paged.rows,
        "SELECT id,owner_id,created_at FROM `documents` WHERE (`owner_id` = 7 AND (`created_at` >= \"2024-01-01 00:00:00\")) ORDER BY created_at DESC LIMIT 15, 15"
    );
    assert_eq!(
        paged.count,
        "SELECT COUNT(0) FROM `documents` WHERE (`owner_id` = 7 AND (`created_at` >= \"2024-01-01 00:00:00\"))"
    );

    // What a driver would hand back.
    let total = extract_count(&[row(json!({"COUNT(0)": 31}))]).unwrap();
    assert_eq!(total, 31);

    let rows = rows_to_camel(
        vec![row(json!({"id": 1, "owner_id": 7, "created_at": "2024-02-01 09:00:00"}))],
        1,
    );
    assert_eq!(
        Value::Object(rows[0].clone()),
        json!({"id": 1, "ownerId": 7, "createdAt": "2024-02-01 09:00:00"})
    );
}

#[test]
fn values_are_escaped_inline() {
    let query = Query::new("users").filter(json!({
        "name": "O'Brien \"Bob\"\n",
        "bio": {"$like": "50%_off"},
    }));
    assert_eq!(
        build_statement(&query, None).unwrap(),
        "SELECT * FROM `users` WHERE (`name` = \"O\\'Brien \\\"Bob\\\"\\n\" AND (`bio` LIKE \"%50\\%\\_off%\"))"
    );
}

#[test]
fn datetime_filters() {
    let since = format_datetime("2024-03-05T10:20:30+02:00").unwrap();
    let query = Query::new("events").filter(json!({"at": {"$gte": since, "$lt": "2024-04-01 00:00:00"}}));
    assert_eq!(
        build_statement(&query, None).unwrap(),
        "SELECT * FROM `events` WHERE ((`at` >= \"2024-03-05 10:20:30\" AND `at` < \"2024-04-01 00:00:00\"))"
    );
}

#[test]
fn null_and_boolean_values() {
    let query = Query::new("users").filter(json!({
        "deleted_at": null,
        "active": true,
        "parent_id": {"$neq": null},
    }));
    assert_eq!(
        build_statement(&query, None).unwrap(),
        "SELECT * FROM `users` WHERE (`deleted_at` IS NULL AND `active` = true AND (`parent_id` IS NOT NULL))"
    );
}

#[test]
fn top_level_or_group() {
    let query = Query::new("tickets").filter(json!({
        "$or": [
            {"status": "open"},
            {"status": "pending", "priority": {"$gte": 3}},
        ],
    }));
    assert_eq!(
        build_statement(&query, None).unwrap(),
        "SELECT * FROM `tickets` WHERE (((`status` = \"open\") OR (`status` = \"pending\" AND (`priority` >= 3))))"
    );
}

#[test]
fn strict_identifiers_block_injection() {
    let sqlizer = Sqlizer::new(SqlizerConfig::new().identifier_policy(IdentifierPolicy::Strict));
    let query = Query::new("users").filter(json!({"id` = 1 OR `1": 1}));
    let err = sqlizer.statement(&query, &QueryOptions::new()).unwrap_err();
    assert!(matches!(err, SqlizerError::Validation(_)));
}

#[test]
fn error_messages_are_readable() {
    let err = build_statement(&Query::new("users").limit(json!("10")), None).unwrap_err();
    assert!(err.to_string().contains("limit"));

    let err = build_statement(&Query::new(""), None).unwrap_err();
    assert!(err.to_string().contains("Table name is required"));
}

#[derive(Clone, Default)]
struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn statements_are_logged() {
    let writer = CaptureWriter::default();
    let make_writer = {
        let writer = writer.clone();
        move || writer.clone()
    };
    let subscriber = tracing_subscriber::fmt()
        .with_writer(make_writer)
        .with_ansi(false)
        .with_max_level(Level::TRACE)
        .finish();

    let sqlizer = Sqlizer::new(SqlizerConfig::new().log_sql(SqlLogger::new().level(Level::INFO)));
    let query = Query::new("users").filter(json!({"id": 1}));

    tracing::subscriber::with_default(subscriber, || {
        sqlizer
            .statement(&query, &QueryOptions::new().count())
            .unwrap();
    });

    let output = String::from_utf8(writer.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("sqlizer.sql"), "{output}");
    assert!(output.contains("INFO"), "{output}");
    assert!(
        output.contains("SELECT COUNT(0) FROM `users` WHERE (`id` = 1)"),
        "{output}"
    );
}

#[test]
fn logging_disabled_emits_nothing() {
    let writer = CaptureWriter::default();
    let make_writer = {
        let writer = writer.clone();
        move || writer.clone()
    };
    let subscriber = tracing_subscriber::fmt()
        .with_writer(make_writer)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .finish();

    let sqlizer = Sqlizer::new(SqlizerConfig::new().no_log());
    tracing::subscriber::with_default(subscriber, || {
        sqlizer
            .statement(&Query::new("users"), &QueryOptions::new())
            .unwrap();
    });

    assert!(writer.0.lock().unwrap().is_empty());
}
