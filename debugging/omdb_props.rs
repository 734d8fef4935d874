//! Fetch one raw OMDb record and print every field the provider returns.
//! Usage:
//!   cargo run --bin omdb_props -- id <imdb_id>
//!   cargo run --bin omdb_props -- search <term> [page]
//! Requires OMDB_API_KEY in the environment (.env supported).

use anyhow::{Context, Result};
use cinescope::omdb::MovieQuery;
use cinescope::OmdbConfig;
use dotenvy::dotenv;
use reqwest::Client;
use serde_json::Value;
use std::env;

fn parse_query(args: &[String]) -> Result<MovieQuery> {
    match args.first().map(String::as_str) {
        Some("id") => {
            let id = args.get(1).context("missing imdb id")?;
            Ok(MovieQuery::by_id(id.as_str()))
        }
        Some("search") => {
            let term = args.get(1).context("missing search term")?;
            let page = match args.get(2) {
                Some(p) => p.parse::<u32>().context("page must be a number")?,
                None => 1,
            };
            Ok(MovieQuery::search(term.as_str(), page))
        }
        _ => anyhow::bail!("first argument must be 'id' or 'search'"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present for local runs.
    dotenv().ok();

    let config = OmdbConfig::from_env()?;
    let args: Vec<String> = env::args().skip(1).collect();
    let query = parse_query(&args)?;
    query.validate()?;

    let url = format!(
        "{}?{}",
        config.base_url.trim_end_matches('?'),
        query.to_query_string(&config.api_key)
    );
    let body: Value = Client::new()
        .get(&url)
        .send()
        .await
        .context("Failed to call OMDb")?
        .error_for_status()
        .context("OMDb returned an error status")?
        .json()
        .await
        .context("Failed to parse OMDb response")?;

    let fields = body
        .as_object()
        .context("OMDb response is not a JSON object")?;
    for (name, value) in fields {
        match value {
            Value::String(s) => println!("{name}: {s}"),
            other => println!("{name}: {}", serde_json::to_string_pretty(other)?),
        }
    }

    Ok(())
}
