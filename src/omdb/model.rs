use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::warn;

/// The provider always pages search results in tens.
pub const RESULTS_PER_PAGE: u32 = 10;

const IMDB_TITLE_BASE: &str = "https://www.imdb.com/title";
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum MediaType {
    Movie,
    Series,
    Episode,
    Game,
    Other(String),
}

impl MediaType {
    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
            MediaType::Episode => "episode",
            MediaType::Game => "game",
            MediaType::Other(s) => s,
        }
    }
}

impl Default for MediaType {
    fn default() -> Self {
        MediaType::Other(String::new())
    }
}

impl From<String> for MediaType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "movie" => MediaType::Movie,
            "series" => MediaType::Series,
            "episode" => MediaType::Episode,
            "game" => MediaType::Game,
            _ => MediaType::Other(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieSummary {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Type", default)]
    pub media_type: MediaType,
    #[serde(rename = "Poster", default, deserialize_with = "na_as_none")]
    pub poster_url: Option<String>,
}

impl MovieSummary {
    /// Path the detail screen is mounted under.
    pub fn detail_route(&self) -> String {
        format!("/movie/{}", self.imdb_id)
    }

    /// Media type with its first letter upper-cased, as list rows show it.
    pub fn display_type(&self) -> String {
        let raw = self.media_type.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// One page of search hits plus the provider's total across all pages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchPage {
    pub movies: Vec<MovieSummary>,
    /// `None` when the provider omitted the total or sent something unreadable.
    pub total_results: Option<u32>,
}

impl SearchPage {
    pub fn page_count(&self) -> Option<u32> {
        self.total_results.map(|t| t.div_ceil(RESULTS_PER_PAGE))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieDetail {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Type", default)]
    pub media_type: MediaType,
    #[serde(rename = "Poster", default, deserialize_with = "na_as_none")]
    pub poster_url: Option<String>,
    #[serde(rename = "Rated", default)]
    pub rated: String,
    #[serde(rename = "Released", default)]
    pub released: String,
    #[serde(rename = "Runtime", default)]
    pub runtime: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
    #[serde(rename = "Director", default)]
    pub director: String,
    #[serde(rename = "Writer", default)]
    pub writer: String,
    #[serde(rename = "Actors", default)]
    pub actors: String,
    #[serde(rename = "Plot", default)]
    pub plot: String,
    #[serde(rename = "Language", default)]
    pub language: String,
    #[serde(rename = "Country", default)]
    pub country: String,
    #[serde(rename = "Awards", default)]
    pub awards: String,
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<Rating>,
    #[serde(rename = "Metascore", default)]
    pub metascore: String,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
    #[serde(rename = "imdbVotes", default)]
    pub imdb_votes: String,
    #[serde(rename = "DVD", default, deserialize_with = "na_as_none")]
    pub dvd: Option<String>,
    #[serde(rename = "BoxOffice", default, deserialize_with = "na_as_none")]
    pub box_office: Option<String>,
    #[serde(rename = "Production", default, deserialize_with = "na_as_none")]
    pub production: Option<String>,
    #[serde(rename = "Website", default, deserialize_with = "na_as_none")]
    pub website: Option<String>,
    #[serde(rename = "Response", deserialize_with = "provider_flag")]
    pub response: bool,
}

impl MovieDetail {
    /// A record only counts when the provider flagged the lookup as successful.
    pub fn is_valid(&self) -> bool {
        self.response
    }

    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            imdb_id: self.imdb_id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            media_type: self.media_type.clone(),
            poster_url: self.poster_url.clone(),
        }
    }

    pub fn imdb_url(&self) -> String {
        format!("{IMDB_TITLE_BASE}/{}", self.imdb_id)
    }

    /// Metascore, 0 to 100.
    pub fn critic_score(&self) -> Option<u8> {
        self.metascore
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|s| *s <= 100)
    }

    /// IMDb user rating, 0 to 10.
    pub fn audience_score(&self) -> Option<f32> {
        self.imdb_rating
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|s| (0.0..=10.0).contains(s))
    }

    pub fn vote_count(&self) -> Option<u64> {
        let digits: String = self
            .imdb_votes
            .chars()
            .filter(|c| *c != ',')
            .collect();
        digits.trim().parse().ok()
    }

    pub fn genres(&self) -> Vec<&str> {
        split_list(&self.genre)
    }

    pub fn actors(&self) -> Vec<&str> {
        split_list(&self.actors)
    }

    pub fn released_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.released.trim(), "%d %b %Y").ok()
    }

    pub fn top_ratings(&self, max: usize) -> &[Rating] {
        &self.ratings[..max.min(self.ratings.len())]
    }
}

/// Fields every provider response carries, checked before the payload is parsed.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(rename = "Response", deserialize_with = "provider_flag")]
    pub(crate) response: bool,
    #[serde(rename = "Error")]
    pub(crate) error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    #[serde(rename = "Search", default)]
    pub(crate) search: Vec<MovieSummary>,
    #[serde(rename = "totalResults", default, deserialize_with = "string_count")]
    pub(crate) total_results: Option<u32>,
}

impl SearchEnvelope {
    pub(crate) fn into_page(self) -> SearchPage {
        SearchPage {
            movies: self.search,
            total_results: self.total_results,
        }
    }
}

fn split_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != NOT_AVAILABLE)
        .collect()
}

fn na_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| {
        let trimmed = s.trim();
        !trimmed.is_empty() && trimmed != NOT_AVAILABLE
    }))
}

fn provider_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s.trim().eq_ignore_ascii_case("true"),
    })
}

fn string_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u32),
        Text(String),
    }

    Ok(match Option::<Count>::deserialize(deserializer)? {
        Some(Count::Number(n)) => Some(n),
        Some(Count::Text(s)) => {
            let parsed = s.trim().parse().ok();
            if parsed.is_none() {
                warn!("Unreadable totalResults value {:?}", s);
            }
            parsed
        }
        None => None,
    })
}
