use api_query::query::{Condition, Pattern};
use api_query::{ParamValue, RawParameters};
use serde_json::json;

mod common;

#[test]
fn test_repeated_keys_merge_operator_objects() {
    let query = common::translate_pairs(&[("age", "{gte}18")]);
    assert_eq!(query.filter.to_json(), json!({"age": {"$gte": "18"}}));

    // the same key twice arrives as a multi-value and is joined, so use two groups instead
    let query = common::translate_query("age=%7Bgte%7D18%7Blte%7D65");
    assert_eq!(query.filter.to_json(), json!({"age": {"$gte": "18", "$lte": "65"}}));
}

#[test]
fn test_repeated_query_keys_are_joined() {
    let query = common::translate_query("tags=red&tags=blue");
    assert_eq!(
        query.filter.get("tags"),
        Some(&Condition::operator(
            "in",
            Condition::pattern_list(["red", "blue"])
        ))
    );
}

#[test]
fn test_unknown_fields_are_dropped() {
    let query = common::translate_query("nickname=bob&photo=x&name.first=a&foods.spicy=yes");
    assert!(query.filter.is_empty());
}

#[test]
fn test_string_lists() {
    let query = common::translate_query("name=red,blue");
    assert_eq!(
        query.filter.get("name"),
        Some(&Condition::operator(
            "in",
            Condition::List(vec![
                Condition::Pattern(Pattern::case_insensitive("red")),
                Condition::Pattern(Pattern::case_insensitive("blue")),
            ])
        ))
    );

    let query = common::translate_pairs(&[("name", "{all}red,blue")]);
    assert!(query.filter.get("name").unwrap().get_operator("all").is_some());
}

#[test]
fn test_string_default_is_partial_match() {
    let query = common::translate_query("name=pizza");
    assert_eq!(
        query.filter.to_json(),
        json!({"name": {"$regex": "pizza", "$options": "-i"}})
    );
}

#[test]
fn test_string_exact_and_negation() {
    let query = common::translate_pairs(&[("name", "{exact}Pizza Palace")]);
    assert_eq!(query.filter.get("name"), Some(&Condition::Text("Pizza Palace".into())));

    let query = common::translate_pairs(&[("name", "{ne}pizza")]);
    assert_eq!(
        query.filter.get("name"),
        Some(&Condition::operator(
            "not",
            Condition::Pattern(Pattern::case_insensitive("pizza"))
        ))
    );
}

#[test]
fn test_number_list_is_never_scalar() {
    for (value, op) in [
        ("1,2,3", "in"),
        ("{all}1,2", "all"),
        ("{nin}4,5", "nin"),
        ("{mod}4,0", "mod"),
    ] {
        let query = common::translate_pairs(&[("rating", value)]);
        let condition = query.filter.get("rating").unwrap();
        assert!(
            matches!(condition.get_operator(op), Some(Condition::List(_))),
            "{} should yield ${}",
            value,
            op
        );
    }
}

#[test]
fn test_number_scalar() {
    let query = common::translate_query("rating=4");
    assert_eq!(query.filter.get("rating"), Some(&Condition::Int(4)));

    let query = common::translate_query("rating=four");
    assert!(!query.filter.contains_key("rating"));
}

#[test]
fn test_boolean_words() {
    for (value, expected) in [("Yes", true), ("T", true), ("no", false), ("maybe", false)] {
        let query = common::translate_pairs(&[("active", value)]);
        assert_eq!(query.filter.get("active"), Some(&Condition::Bool(expected)));
    }
}

#[test]
fn test_geo_near() {
    let query = common::translate_pairs(&[("location", "{near}40.0,-75.0,10")]);
    assert_eq!(
        query.filter.to_json(),
        json!({"location": {"$near": [40.0, -75.0], "$maxDistance": 10.0 / 69.0}})
    );
}

#[test]
fn test_identifier_is_literal() {
    let query = common::translate_query("owner=507f1f77bcf86cd799439011");
    assert_eq!(query.filter.to_json(), json!({"owner": "507f1f77bcf86cd799439011"}));
}

#[test]
fn test_dates() {
    let query = common::translate_pairs(&[("created", "{gt}2024-05-01")]);
    assert_eq!(
        query.filter.to_json(),
        json!({"created": {"$gt": {"$date": "2024-05-01T00:00:00.000Z"}}})
    );

    let query = common::translate_query("created=1714521600000");
    assert_eq!(
        query.filter.to_json(),
        json!({"created": {"$date": "2024-05-01T00:00:00.000Z"}})
    );
}

#[test]
fn test_empty_values_are_skipped() {
    let query = common::translate_pairs(&[("name", ""), ("age", "{gt}"), ("sort_by", "")]);
    assert!(query.filter.is_empty());
    assert_eq!(query.directives.sort, None);
}

#[test]
fn test_empty_multi_value_is_skipped() {
    let mut params = RawParameters::new();
    params.insert("name", ParamValue::Multi(vec![]));
    let query = api_query::translate(&common::create_test_schema(), &params);
    assert!(query.filter.is_empty());
}

#[test]
fn test_later_literal_replaces_operator_object() {
    // the second group has no comparison operator, so it becomes a plain integer
    let query = common::translate_pairs(&[("rating", "{gte}3{exact}5")]);
    assert_eq!(query.filter.to_json(), json!({"rating": 5}));
}
