use dotquery::{Decoder, DefaultDecoder, Query, QueryError, Value};

const STORE: &str = r#"{
    "name": "computers",
    "vendor": {
        "name": "Star Trek",
        "items": [
            {"id": 1, "name": "MacBook Pro 13 inch retina", "price": 1350},
            {"id": 2, "name": "MacBook Pro 15 inch retina", "price": 1700},
            {"id": 3, "name": "Sony VAIO", "price": 1200},
            {"id": 4, "name": "Fujitsu", "price": 850},
            {"id": 5, "key": 2300, "name": "HP core i5", "price": 850},
            {"id": 6, "name": "HP core i7", "price": 950},
            {"id": null, "name": "HP core i3 SSD", "price": 850}
        ],
        "names": ["John Doe", "Jane Doe", "Tom", "Jerry", "Nicolas", "Abby"],
        "prices": [2400, 2100, 1200, 400.87, 89.9, 150.1]
    }
}"#;

const EPSILON: f64 = 1e-9;

fn q(json: &str) -> Query {
    let mut query = Query::new();
    query.json(json);
    query
}

fn v(json: &str) -> Value {
    DefaultDecoder.decode(json.as_bytes()).unwrap()
}

// ========================================
// count / first / last / nth / pluck
// ========================================

#[test]
fn test_count_of_list() {
    assert_eq!(q(STORE).from("vendor.items").count(), 7);
}

#[test]
fn test_count_of_object_counts_keys() {
    assert_eq!(q(STORE).from("vendor").count(), 4);
}

#[test]
fn test_count_of_scalar_is_zero() {
    assert_eq!(q(STORE).from("vendor.name").count(), 0);
}

#[test]
fn test_count_with_distinct() {
    assert_eq!(q(STORE).from("vendor.items").distinct("price").count(), 5);
}

#[test]
fn test_first() {
    let out = q(STORE).from("vendor.items").first();
    assert_eq!(
        out,
        v(r#"{"id": 1, "name": "MacBook Pro 13 inch retina", "price": 1350}"#)
    );
}

#[test]
fn test_first_of_empty_result_is_null_without_error() {
    let mut query = q(STORE);
    let out = query.from("vendor.items").where_("price", ">", 1800).first();
    assert!(out.is_null());
    assert!(query.errors().is_empty());
}

#[test]
fn test_last() {
    let out = q(STORE).from("vendor.items").last();
    assert_eq!(
        out,
        v(r#"{"id": null, "name": "HP core i3 SSD", "price": 850}"#)
    );
}

#[test]
fn test_last_of_empty_result_is_null_without_error() {
    let mut query = q(STORE);
    let out = query.from("vendor.items").where_("price", ">", 1800).last();
    assert!(out.is_null());
    assert!(query.errors().is_empty());
}

#[test]
fn test_nth_positive_is_one_based() {
    let out = q(STORE).from("vendor.items").nth(1);
    assert_eq!(
        out,
        v(r#"{"id": 1, "name": "MacBook Pro 13 inch retina", "price": 1350}"#)
    );
}

#[test]
fn test_nth_negative_counts_from_end() {
    let out = q(STORE).from("vendor.items").nth(-1);
    assert_eq!(
        out,
        v(r#"{"id": null, "name": "HP core i3 SSD", "price": 850}"#)
    );
}

#[test]
fn test_nth_zero_records_error() {
    let mut query = q(STORE);
    let out = query.from("vendor.items").nth(0);
    assert!(out.is_null());
    assert_eq!(
        query.last_error(),
        Some(&QueryError::Position("index is not zero based".to_string()))
    );
}

#[test]
fn test_nth_out_of_range_records_error() {
    let mut query = q(STORE);
    let out = query.from("vendor.items").nth(100);
    assert!(out.is_null());
    assert_eq!(
        query.last_error(),
        Some(&QueryError::Position("index out of range".to_string()))
    );
}

#[test]
fn test_nth_on_empty_list_records_error() {
    let mut query = q(STORE);
    let out = query.from("vendor.items").where_("price", ">", 1800).nth(1);
    assert!(out.is_null());
    assert_eq!(
        query.last_error(),
        Some(&QueryError::Position("list is empty".to_string()))
    );
}

#[test]
fn test_nth_on_object_is_null_without_error() {
    let mut query = q(STORE);
    let out = query.from("vendor").nth(1);
    assert!(out.is_null());
    assert!(query.errors().is_empty());
}

#[test]
fn test_pluck() {
    let out = q(STORE).from("vendor.items").pluck("price");
    assert_eq!(out, v("[1350, 1700, 1200, 850, 850, 950, 850]"));
}

#[test]
fn test_pluck_missing_property_is_empty() {
    let out = q(STORE).from("vendor.items").pluck("nonexistent");
    assert_eq!(out, v("[]"));
}

#[test]
fn test_pluck_with_distinct_and_limit() {
    let out = q(STORE)
        .from("vendor.items")
        .distinct("price")
        .limit(3)
        .pluck("price");
    assert_eq!(out, v("[1350, 1700, 1200]"));
}

// ========================================
// sum / avg / min / max
// ========================================

#[test]
fn test_sum_of_numeric_array() {
    let sum = q(STORE).from("vendor.prices").sum(None);
    assert!((sum - 6340.87).abs() < EPSILON);
}

#[test]
fn test_sum_of_records_property() {
    let sum = q(STORE).from("vendor.items").sum(Some("price"));
    assert!((sum - 7750.0).abs() < EPSILON);
}

#[test]
fn test_sum_property_forbidden_for_numeric_array() {
    let mut query = q(STORE);
    let sum = query.from("vendor.prices").sum(Some("price"));
    assert_eq!(sum, 0.0);
    assert!(matches!(query.last_error(), Some(QueryError::Aggregate(_))));
}

#[test]
fn test_sum_property_required_for_records() {
    let mut query = q(STORE);
    let sum = query.from("vendor.items").sum(None);
    assert_eq!(sum, 0.0);
    assert!(matches!(query.last_error(), Some(QueryError::Aggregate(_))));
}

#[test]
fn test_sum_invalid_property_records_error() {
    let mut query = q(STORE);
    let sum = query.from("vendor.items").sum(Some("nonexistent"));
    assert_eq!(sum, 0.0);
    assert!(matches!(
        query.last_error(),
        Some(QueryError::InvalidNode(_))
    ));
}

#[test]
fn test_sum_non_numeric_property_records_error() {
    let mut query = q(STORE);
    let sum = query.from("vendor.items").sum(Some("name"));
    assert_eq!(sum, 0.0);
    assert!(matches!(query.last_error(), Some(QueryError::Aggregate(_))));
}

#[test]
fn test_sum_of_single_object_property() {
    let sum = q(STORE).from("vendor.items.[0]").sum(Some("price"));
    assert!((sum - 1350.0).abs() < EPSILON);
}

#[test]
fn test_sum_after_filtering() {
    let sum = q(STORE)
        .from("vendor.items")
        .where_("price", ">", 1200)
        .or_where("id", "=", Value::Null)
        .sum(Some("price"));
    assert!((sum - 3900.0).abs() < EPSILON);
}

#[test]
fn test_sum_of_string_array_gathers_nothing() {
    let mut query = q(STORE);
    let sum = query.from("vendor.names").sum(None);
    assert_eq!(sum, 0.0);
    assert!(query.errors().is_empty());
}

#[test]
fn test_avg() {
    let avg = q(STORE).from("vendor.prices").avg(None);
    assert!((avg - 6340.87 / 6.0).abs() < EPSILON);

    let avg = q(STORE).from("vendor.items").avg(Some("price"));
    assert!((avg - 7750.0 / 7.0).abs() < EPSILON);
}

#[test]
fn test_avg_of_empty_gather_is_zero_with_error() {
    // averaging nothing is defined as 0.0, never NaN
    let mut query = q(STORE);
    let avg = query
        .from("vendor.items")
        .where_("price", ">", 9999)
        .avg(Some("price"));
    assert_eq!(avg, 0.0);
    assert!(matches!(query.last_error(), Some(QueryError::Aggregate(_))));
}

#[test]
fn test_min_and_max_of_numeric_array() {
    let min = q(STORE).from("vendor.prices").min(None);
    assert!((min - 89.9).abs() < EPSILON);
    let max = q(STORE).from("vendor.prices").max(None);
    assert!((max - 2400.0).abs() < EPSILON);
}

#[test]
fn test_min_and_max_of_records_property() {
    let min = q(STORE).from("vendor.items").min(Some("price"));
    assert!((min - 850.0).abs() < EPSILON);
    let max = q(STORE).from("vendor.items").max(Some("price"));
    assert!((max - 1700.0).abs() < EPSILON);
}

#[test]
fn test_min_max_bound_every_element() {
    let mut query = q(STORE);
    let values = match query.from("vendor.prices").get() {
        Value::Array(items) => items,
        other => panic!("expected array, got {other:?}"),
    };
    query.reset();
    let min = query.from("vendor.prices").min(None);
    query.reset();
    let max = query.from("vendor.prices").max(None);
    for item in values {
        let n = item.as_f64().unwrap();
        assert!(min <= n && n <= max);
    }
}

#[test]
fn test_min_max_of_empty_gather_is_zero() {
    let mut query = q(STORE);
    let min = query.from("vendor.items").where_("price", ">", 9999).min(Some("price"));
    assert_eq!(min, 0.0);
}
