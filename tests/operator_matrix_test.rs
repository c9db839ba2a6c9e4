use serde_json::{json, Value};

mod common;

fn filter_for(field: &str, value: &str) -> Value {
    common::translate_pairs(&[(field, value)]).filter.to_json()
}

// Runs one range operator against every field kind that supports it
macro_rules! range_operator_test {
    ($op:ident) => {
        paste::paste! {
            #[test]
            fn [<test_ $op _on_number>]() {
                let value = format!("{{{}}}7", stringify!($op));
                assert_eq!(
                    filter_for("rating", &value),
                    json!({"rating": {(concat!("$", stringify!($op))): "7"}})
                );
            }

            #[test]
            fn [<test_ $op _on_digit_string>]() {
                let value = format!("{{{}}}7", stringify!($op));
                assert_eq!(
                    filter_for("name", &value),
                    json!({"name": {(concat!("$", stringify!($op))): "7"}})
                );
            }

            #[test]
            fn [<test_ $op _on_date>]() {
                let value = format!("{{{}}}0", stringify!($op));
                assert_eq!(
                    filter_for("created", &value),
                    json!({
                        "created": {
                            (concat!("$", stringify!($op))): {"$date": "1970-01-01T00:00:00.000Z"}
                        }
                    })
                );
            }
        }
    };
}

range_operator_test!(gt);
range_operator_test!(gte);
range_operator_test!(lt);
range_operator_test!(lte);

#[test]
fn test_ne_only_compares_numbers() {
    assert_eq!(filter_for("rating", "{ne}7"), json!({"rating": {"$ne": "7"}}));
    assert_eq!(filter_for("name", "{ne}7"), json!({"name": "7"}));
    assert_eq!(
        filter_for("created", "{ne}0"),
        json!({"created": {"$date": "1970-01-01T00:00:00.000Z"}})
    );
}

#[test]
fn test_unknown_operator_falls_back_to_default() {
    assert_eq!(filter_for("rating", "{between}7"), json!({"rating": 7}));
    assert_eq!(
        filter_for("name", "{between}pie"),
        json!({"name": {"$regex": "pie", "$options": "-i"}})
    );
}
