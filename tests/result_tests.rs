use std::time::Duration;

use dotquery::{Query, QueryError, QueryResult, Value};
use serde::Deserialize;

const STORE: &str = r#"{
    "vendor": {
        "name": "Star Trek",
        "active": true,
        "ping": "250ms",
        "uptimes": ["1h30m", "45m", 1500000000],
        "items": [
            {"id": 1, "name": "MacBook Pro 13 inch retina", "price": 1350},
            {"id": 2, "name": "MacBook Pro 15 inch retina", "price": 1700},
            {"id": null, "name": "HP core i3 SSD", "price": 850}
        ],
        "names": ["John Doe", "Jane Doe", "Tom"],
        "prices": [2400, 2100, 89.9]
    }
}"#;

fn q(json: &str) -> Query {
    let mut query = Query::new();
    query.json(json);
    query
}

fn wrap(path: &str) -> QueryResult {
    QueryResult::new(q(STORE).find(path))
}

// ========================================
// scalar accessors
// ========================================

#[test]
fn test_string_accessor() {
    assert_eq!(wrap("vendor.name").string().unwrap(), "Star Trek");
    assert_eq!(
        wrap("vendor.active").string(),
        Err(QueryError::WrongType("boolean"))
    );
}

#[test]
fn test_bool_accessor() {
    assert!(wrap("vendor.active").bool().unwrap());
    assert_eq!(
        wrap("vendor.name").bool(),
        Err(QueryError::WrongType("string"))
    );
}

#[test]
fn test_numeric_accessors_truncate() {
    let price = wrap("vendor.prices.[2]");
    assert_eq!(price.f64().unwrap(), 89.9);
    assert_eq!(price.i64().unwrap(), 89);
    assert_eq!(price.u64().unwrap(), 89);
    assert_eq!(
        wrap("vendor.name").f64(),
        Err(QueryError::WrongType("string"))
    );
}

#[test]
fn test_is_null() {
    assert!(wrap("vendor.items.[2].id").is_null());
    assert!(!wrap("vendor.name").is_null());
}

// ========================================
// durations
// ========================================

#[test]
fn test_duration_from_string() {
    assert_eq!(
        wrap("vendor.ping").duration().unwrap(),
        Duration::from_millis(250)
    );
}

#[test]
fn test_duration_from_number_counts_nanoseconds() {
    let d = QueryResult::new(Value::Number(1_500_000_000.0)).duration().unwrap();
    assert_eq!(d, Duration::from_millis(1500));
}

#[test]
fn test_duration_compound_expression() {
    let d = QueryResult::new(Value::String("1h30m".to_string())).duration().unwrap();
    assert_eq!(d, Duration::from_secs(5400));
}

#[test]
fn test_duration_bare_numeric_string_is_nanoseconds() {
    let d = QueryResult::new(Value::String("1000".to_string())).duration().unwrap();
    assert_eq!(d, Duration::from_nanos(1000));
}

#[test]
fn test_duration_malformed_string_errors() {
    assert!(QueryResult::new(Value::String("abc".to_string())).duration().is_err());
    assert!(QueryResult::new(Value::Bool(true)).duration().is_err());
}

// ========================================
// slice accessors
// ========================================

#[test]
fn test_string_slice() {
    assert_eq!(
        wrap("vendor.names").string_slice().unwrap(),
        vec!["John Doe", "Jane Doe", "Tom"]
    );
}

#[test]
fn test_f64_and_i64_slices() {
    assert_eq!(
        wrap("vendor.prices").f64_slice().unwrap(),
        vec![2400.0, 2100.0, 89.9]
    );
    assert_eq!(wrap("vendor.prices").i64_slice().unwrap(), vec![2400, 2100, 89]);
}

#[test]
fn test_slices_skip_foreign_elements() {
    let mixed = QueryResult::new(Value::Array(vec![
        Value::String("a".to_string()),
        Value::Number(1.0),
        Value::Bool(true),
        Value::Null,
    ]));
    assert_eq!(mixed.string_slice().unwrap(), vec!["a"]);
    assert_eq!(mixed.f64_slice().unwrap(), vec![1.0]);
    assert_eq!(mixed.bool_slice().unwrap(), vec![true]);
}

#[test]
fn test_duration_slice() {
    assert_eq!(
        wrap("vendor.uptimes").duration_slice().unwrap(),
        vec![
            Duration::from_secs(5400),
            Duration::from_secs(2700),
            Duration::from_millis(1500),
        ]
    );
}

#[test]
fn test_slice_on_non_array_errors() {
    assert_eq!(
        wrap("vendor.name").string_slice(),
        Err(QueryError::WrongType("string"))
    );
}

// ========================================
// typed materialization
// ========================================

#[derive(Debug, PartialEq, Deserialize)]
struct Item {
    id: Option<i64>,
    name: String,
    price: f64,
}

#[test]
fn test_out_into_struct_list() {
    let mut query = q(STORE);
    let items: Vec<Item> = query.from("vendor.items").out().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(
        items[0],
        Item {
            id: Some(1),
            name: "MacBook Pro 13 inch retina".to_string(),
            price: 1350.0,
        }
    );
    assert_eq!(items[2].id, None);
    assert!(query.errors().is_empty());
}

#[test]
fn test_out_into_single_struct() {
    let mut query = q(STORE);
    let item: Item = query.from("vendor.items.[1]").out().unwrap();
    assert_eq!(item.id, Some(2));
    assert_eq!(item.price, 1700.0);
}

#[test]
fn test_out_composes_with_filtering() {
    let mut query = q(STORE);
    let items: Vec<Item> = query
        .from("vendor.items")
        .where_("price", "<", 1500)
        .out()
        .unwrap();
    assert_eq!(items.len(), 2);
}

#[test]
fn test_out_shape_mismatch_records_error() {
    let mut query = q(STORE);
    let out: Option<Vec<String>> = query.from("vendor.items").out();
    assert!(out.is_none());
    assert!(matches!(query.last_error(), Some(QueryError::Decode(_))));
}
