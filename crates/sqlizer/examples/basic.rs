//! Basic usage example for sqlizer
//!
//! Run with: cargo run --example basic -p sqlizer
//!
//! Set RUST_LOG=sqlizer=debug to see the generated statements logged.

use serde_json::json;
use sqlizer::{
    DEFAULT_DEPTH, Query, QueryOptions, SqlLogger, Sqlizer, SqlizerConfig, SqlizerError,
    extract_count, format_datetime, rows_to_camel,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), SqlizerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let sqlizer = Sqlizer::new(SqlizerConfig::new().log_sql(SqlLogger::new()));

    // ============================================
    // Example 1: Query description from JSON
    // ============================================
    println!("=== Statement from JSON ===");

    let query = Query::from_json(json!({
        "table": "users",
        "where": {
            "status": "active",
            "age": {"$gte": 18, "$lt": 65},
            "name": {"$like": "ali"},
            "$or": {"role": "admin", "team_id": {"$in": [1, 2, 3]}},
        },
        "orderBy": ["created_at DESC", "id"],
        "limit": [0, 20],
    }))?;

    let sql = sqlizer.statement(&query, &QueryOptions::new().fields(["id", "name"]))?;
    println!("{sql}");

    // ============================================
    // Example 2: Builder API with a datetime filter
    // ============================================
    println!("\n=== Builder API ===");

    let since = format_datetime("2024-01-01T00:00:00Z")?;
    let query = Query::new("orders")
        .filter(json!({"created_at": {"$gte": since}, "note": null}))
        .group_by("customer_id");
    let sql = sqlizer.statement(&query, &QueryOptions::new().distincts(["customer_id"]))?;
    println!("{sql}");

    // ============================================
    // Example 3: Pagination
    // ============================================
    println!("\n=== Pagination ===");

    let paged = sqlizer.paged(&query, &QueryOptions::new(), "3", "25")?;
    println!("rows:  {}", paged.rows);
    println!("count: {}", paged.count);

    // Rows as a driver would return them.
    let count_rows = vec![json!({"COUNT(0)": "42"}).as_object().cloned().unwrap_or_default()];
    println!("total: {}", extract_count(&count_rows)?);

    let rows = vec![
        json!({"customer_id": 7, "created_at": "2024-01-02 10:00:00"})
            .as_object()
            .cloned()
            .unwrap_or_default(),
    ];
    println!("camel: {:?}", rows_to_camel(rows, DEFAULT_DEPTH));

    Ok(())
}
