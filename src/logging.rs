use tracing::{info, Level};

use crate::parser::RawParameters;
use crate::query::QueryPlan;

/// Install the fmt subscriber on stderr, keeping stdout for results
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// One summary line per translated query
pub fn log_translation(params: &RawParameters, plan: &QueryPlan) {
    info!(
        target: "query_log",
        "{} params -> {} filter paths, limit={} skip={} sort=\"{}\" select=\"{}\"",
        params.len(),
        plan.filter.len(),
        format_optional(plan.limit),
        format_optional(plan.skip),
        plan.sort.as_deref().unwrap_or("-"),
        plan.select.as_deref().unwrap_or("-"),
    );
}

fn format_optional(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(20)), "20");
        assert_eq!(format_optional(None), "-");
    }

    #[test]
    fn test_log_translation_without_subscriber() {
        let params = RawParameters::from_query_string("name=a&limit=2");
        log_translation(&params, &QueryPlan::default());
    }
}
