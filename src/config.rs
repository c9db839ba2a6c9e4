use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::query::{Combine, FilterTree, PagingDefaults, PlanOptions};
use crate::schema::Schema;

lazy_static! {
    /// `${VAR_NAME}` or `${VAR_NAME:-default}`
    static ref ENV_VAR: Regex = Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").unwrap();
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub schema: Schema,
    #[serde(default)]
    pub paging: PagingDefaults,
    #[serde(default)]
    pub combine: Combine,
}

impl AppConfig {
    /// Load configuration from YAML file
    pub fn load_from_file<P: AsRef<Path>>(config_path: P) -> AppResult<Self> {
        let path = config_path.as_ref();

        if !path.exists() {
            return Err(AppError::Configuration(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content).map_err(|e| {
            AppError::Configuration(format!("Failed to load {}: {}", path.display(), e))
        })
    }

    /// Parse configuration from YAML, expanding environment variables first
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let expanded = Self::expand_env_vars(content)?;
        let config: AppConfig = serde_yaml::from_str(&expanded)?;

        if config.paging.per_page == 0 {
            return Err(AppError::Configuration(
                "paging.per_page must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }

    /// Configuration used when no file is present: an empty schema, so only directives
    /// and combinators are translated
    pub fn default_config() -> Self {
        AppConfig::default()
    }

    /// Plan options for this configuration, with an optional fixed filter
    pub fn plan_options(&self, find_cond: Option<FilterTree>) -> PlanOptions {
        PlanOptions {
            find_cond,
            combine: self.combine,
            paging: self.paging,
        }
    }

    /// Expand environment variables in format ${VAR_NAME} or ${VAR_NAME:-default}
    fn expand_env_vars(content: &str) -> AppResult<String> {
        let mut expanded = String::with_capacity(content.len());
        let mut last = 0;

        for captures in ENV_VAR.captures_iter(content) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            let var_name = &captures[1];

            let value = match (std::env::var(var_name), captures.get(2)) {
                (Ok(val), _) => val,
                (Err(_), Some(default)) => default.as_str().to_string(),
                (Err(_), None) => {
                    return Err(AppError::Configuration(format!(
                        "Environment variable {} not found and no default provided",
                        var_name
                    )));
                }
            };

            expanded.push_str(&content[last..whole.start()]);
            expanded.push_str(&value);
            last = whole.end();
        }

        expanded.push_str(&content[last..]);
        Ok(expanded)
    }
}
