#![allow(dead_code)]

use api_query::schema::{PathType, Schema};
use api_query::{translate, RawParameters, TranslatedQuery};

/// Schema for a restaurant-review style collection used across the integration tests
pub fn create_test_schema() -> Schema {
    Schema::new()
        .with_path("name", PathType::String)
        .with_path("tags", PathType::Array)
        .with_path("age", PathType::Number)
        .with_path("rating", PathType::Number)
        .with_path("active", PathType::Boolean)
        .with_path("created", PathType::Date)
        .with_path("owner", PathType::ObjectId)
        .with_path("location", PathType::Array)
        .with_path("photo", PathType::Unsupported)
        .with_nested(
            "foods",
            PathType::DocumentArray,
            Schema::new()
                .with_path("name", PathType::String)
                .with_path("calories", PathType::Number)
                .with_path("vegan", PathType::Boolean),
        )
        .with_path("meta", PathType::Mixed)
}

pub fn translate_query(query: &str) -> TranslatedQuery {
    let params = RawParameters::from_query_string(query);
    translate(&create_test_schema(), &params)
}

pub fn translate_pairs(pairs: &[(&str, &str)]) -> TranslatedQuery {
    let params: RawParameters = pairs.iter().copied().collect();
    translate(&create_test_schema(), &params)
}
