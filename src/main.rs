use anyhow::{bail, Context, Result};
use cinescope::omdb::{MovieSummary, OmdbApi, OmdbClient};
use cinescope::screens::{
    BrowseState, BrowseViewModel, DetailState, DetailViewModel, SearchState, SearchViewModel,
};
use dotenvy::dotenv;
use std::env;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: cinescope browse [page] | search <term> | show <imdb-id>";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn print_row(movie: &MovieSummary) {
    let poster = if movie.poster_url.is_some() { "" } else { " [no image]" };
    println!(
        "{:<11} {:<48} {} • {}{}",
        movie.imdb_id,
        movie.title,
        movie.display_type(),
        movie.year,
        poster
    );
}

async fn browse(client: OmdbClient, page: u32) -> Result<()> {
    let config = client.config().clone();
    let api: Arc<dyn OmdbApi> = Arc::new(client);
    let vm = BrowseViewModel::new(api, &config);
    vm.set_page(page).await;
    match vm.state() {
        BrowseState::Ready(results) => {
            println!(
                "'{}' page {} of {}",
                config.browse_term,
                vm.page(),
                results.page_count().unwrap_or(1).max(1)
            );
            results.movies.iter().for_each(print_row);
            Ok(())
        }
        BrowseState::Error(message) => bail!("browse failed: {}", message),
        other => bail!("browse ended in unexpected state {:?}", other),
    }
}

async fn search(client: OmdbClient, term: &str) -> Result<()> {
    let config = client.config().clone();
    let api: Arc<dyn OmdbApi> = Arc::new(client);
    let vm = SearchViewModel::new(api, &config);
    vm.set_query(term);
    vm.submit().await;
    match vm.state() {
        SearchState::ResultsReady(movies) => {
            movies.iter().for_each(print_row);
            Ok(())
        }
        SearchState::ResultsEmpty => {
            println!("No movies found for \"{}\"", term.trim());
            Ok(())
        }
        SearchState::Failed(message) => bail!("search failed: {}", message),
        SearchState::NotSearched => bail!("search term must not be empty"),
        SearchState::Searching => bail!("search did not complete"),
    }
}

async fn show(client: OmdbClient, id: &str) -> Result<()> {
    let vm = DetailViewModel::new(Arc::new(client));
    vm.show(id).await;
    match vm.state() {
        DetailState::Found(movie) => {
            let summary = movie.summary();
            println!(
                "{} ({})  {} • {} • {}",
                summary.title,
                summary.year,
                summary.display_type(),
                movie.rated,
                movie.runtime
            );
            for rating in movie.top_ratings(3) {
                println!("  {:<24} {}", rating.source, rating.value);
            }
            println!("\n{}\n", movie.plot);
            println!("Genre:     {}", movie.genres().join(", "));
            println!("Released:  {}", movie.released);
            println!("Director:  {}", movie.director);
            println!("Actors:    {}", movie.actors().join(", "));
            if let (Some(score), Some(votes)) = (movie.audience_score(), movie.vote_count()) {
                println!("IMDb:      {score}/10 ({votes} votes)");
            }
            if let Some(score) = movie.critic_score() {
                println!("Metascore: {score}/100");
            }
            if let Some(box_office) = &movie.box_office {
                println!("Box office: {box_office}");
            }
            println!("{}", movie.imdb_url());
            Ok(())
        }
        DetailState::NotFound => {
            warn!("No movie with id {}", id);
            println!("Movie not found");
            Ok(())
        }
        DetailState::Error(message) => bail!("failed to fetch movie details: {}", message),
        DetailState::Loading => bail!("detail lookup did not complete"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let client = OmdbClient::from_env()?;
    info!("Using OMDb endpoint {}", client.config().base_url);

    match args.first().map(String::as_str) {
        Some("browse") => {
            let page = match args.get(1) {
                Some(raw) => raw
                    .parse::<u32>()
                    .ok()
                    .filter(|p| *p >= 1)
                    .with_context(|| format!("page must be a positive integer, got '{raw}'"))?,
                None => 1,
            };
            browse(client, page).await
        }
        Some("search") if args.len() > 1 => search(client, &args[1..].join(" ")).await,
        Some("show") if args.len() == 2 => show(client, &args[1]).await,
        _ => bail!(USAGE),
    }
}
