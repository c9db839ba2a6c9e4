//! Final query settings handed to whatever executes the query
//!
//! This is the pure part of running a translated query: choosing the filter, settling
//! pagination and passing sort/projection through. Nothing here touches a store.

use serde::{Deserialize, Serialize};

use super::filter::FilterTree;
use super::translator::TranslatedQuery;
use crate::parser::SortSpec;

/// How a caller-supplied fixed filter combines with the translated one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Combine {
    /// The fixed filter is used instead of the translated one
    #[default]
    Overwrite,
    /// The fixed filter's paths are laid over the translated filter
    Merge,
}

/// Fallbacks applied when only one of `page`/`per_page` is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingDefaults {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    10
}

impl Default for PagingDefaults {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    pub find_cond: Option<FilterTree>,
    pub combine: Combine,
    pub paging: PagingDefaults,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryPlan {
    pub filter: FilterTree,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    pub sort: Option<String>,
    pub select: Option<String>,
}

impl QueryPlan {
    pub fn build(translated: TranslatedQuery, options: &PlanOptions) -> Self {
        let TranslatedQuery { filter, directives } = translated;

        let filter = match (&options.find_cond, options.combine) {
            (Some(fixed), Combine::Overwrite) => fixed.clone(),
            (Some(fixed), Combine::Merge) => {
                let mut merged = filter;
                merged.overlay(fixed.clone());
                merged
            }
            (None, _) => filter,
        };

        let (limit, skip) = if directives.uses_offset_paging() {
            (directives.limit, directives.skip)
        } else if directives.page.is_some() || directives.per_page.is_some() {
            let per_page = directives.per_page.unwrap_or(options.paging.per_page);
            let page = directives.page.unwrap_or(options.paging.page);
            (
                Some(per_page),
                Some(page.saturating_sub(1).saturating_mul(per_page)),
            )
        } else {
            (None, None)
        };

        Self {
            filter,
            limit,
            skip,
            sort: directives.sort,
            select: directives.select,
        }
    }

    /// Sort directive as structured terms
    pub fn sort_fields(&self) -> Vec<SortSpec> {
        self.sort
            .as_deref()
            .map(SortSpec::parse_directive)
            .unwrap_or_default()
    }
}
