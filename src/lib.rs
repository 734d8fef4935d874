pub mod config;
pub mod omdb;
pub mod screens;

pub use config::OmdbConfig;
pub use omdb::{MovieDetail, MovieSummary, OmdbApi, OmdbClient, QueryResult, SearchPage};
