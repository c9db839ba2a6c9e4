use clap::Parser;
use std::path::Path;
use tracing::warn;

use api_query::config::AppConfig;
use api_query::error::AppError;
use api_query::logging;
use api_query::query::{Combine, FilterTree, QueryPlan};
use api_query::{translate, RawParameters};

#[derive(Parser, Debug)]
#[command(name = "api-query")]
#[command(about = "Translate HTTP query parameters into a document-store filter")]
struct Args {
    /// Query string to translate, e.g. "name=john&age={gte}18&sort_by=-age"
    query: String,

    /// Configuration file path (default: config.yaml)
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Fixed filter as a JSON object, combined with the translated one
    #[arg(long)]
    find_cond: Option<String>,

    /// How the fixed filter combines with the translated one (overrides config file)
    #[arg(long, value_enum)]
    combine: Option<Combine>,

    /// Log skipped parameters
    #[arg(short, long)]
    verbose: bool,
}

fn parse_find_cond(raw: &str) -> Result<FilterTree, AppError> {
    match serde_json::from_str::<serde_json::Value>(raw)? {
        serde_json::Value::Object(object) => Ok(FilterTree::from_json_object(object)),
        _ => Err(AppError::BadRequest("--find-cond must be a JSON object".to_string())),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logging::init_tracing(args.verbose);

    let mut app_config = if args.config == "config.yaml" && !Path::new("config.yaml").exists() {
        warn!("No config.yaml found, using an empty schema");
        AppConfig::default_config()
    } else {
        AppConfig::load_from_file(&args.config)?
    };

    if let Some(combine) = args.combine {
        app_config.combine = combine;
    }

    let find_cond = args.find_cond.as_deref().map(parse_find_cond).transpose()?;

    let params = RawParameters::from_query_string(&args.query);
    let translated = translate(&app_config.schema, &params);
    let plan = QueryPlan::build(translated, &app_config.plan_options(find_cond));

    logging::log_translation(&params, &plan);
    println!("{}", serde_json::to_string_pretty(&plan)?);

    Ok(())
}
