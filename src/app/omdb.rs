use image::DynamicImage;
use serde::Deserialize;

use crate::error::{AppError, Result};

/// OMDb's marker for any field it has no value for, posters included.
pub const NOT_AVAILABLE: &str = "N/A";

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// One row of a search response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieSummary {
    pub title: String,
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(default = "not_available")]
    pub poster: String,
}

impl MovieSummary {
    pub fn has_poster(&self) -> bool {
        !self.poster.is_empty() && self.poster != NOT_AVAILABLE
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieDetail {
    #[serde(default = "not_available")]
    pub title: String,
    #[serde(default = "not_available")]
    pub year: String,
    #[serde(default = "not_available")]
    pub genre: String,
    #[serde(default = "not_available")]
    pub runtime: String,
    #[serde(default = "not_available")]
    pub director: String,
    #[serde(default = "not_available")]
    pub actors: String,
    #[serde(default = "not_available")]
    pub plot: String,
    #[serde(rename = "imdbRating", default = "not_available")]
    pub imdb_rating: String,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(default = "not_available")]
    pub poster: String,
}

impl MovieDetail {
    pub fn has_poster(&self) -> bool {
        !self.poster.is_empty() && self.poster != NOT_AVAILABLE
    }
}

/// Envelope shared by both endpoints: `Response` is the string `"True"` or `"False"`.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(rename = "Search", default)]
    search: Vec<MovieSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Vec<MovieSummary>),
    /// Negative result flag, carrying OMDb's explanation when it sent one.
    NotFound(Option<String>),
}

pub fn search_url(endpoint: &str, api_key: &str, query: &str) -> String {
    format!(
        "{}?apikey={}&s={}",
        endpoint,
        urlencoding::encode(api_key),
        urlencoding::encode(query)
    )
}

pub fn detail_url(endpoint: &str, api_key: &str, imdb_id: &str) -> String {
    format!(
        "{}?apikey={}&i={}",
        endpoint,
        urlencoding::encode(api_key),
        urlencoding::encode(imdb_id)
    )
}

pub fn parse_search_response(body: &str) -> Result<SearchOutcome> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.response != "True" {
        return Ok(SearchOutcome::NotFound(envelope.error));
    }
    let results: SearchBody = serde_json::from_str(body)?;
    Ok(SearchOutcome::Found(results.search))
}

pub fn parse_detail_response(body: &str) -> Result<MovieDetail> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.response == "False" {
        let message = envelope
            .error
            .unwrap_or_else(|| "Movie not found".to_string());
        return Err(AppError::NotFound(message));
    }
    Ok(serde_json::from_str(body)?)
}

/// The network seam between the app and OMDb.
///
/// Every call blocks, so callers run them off the UI thread.
pub trait MovieApi: Send + Sync {
    fn search(&self, query: &str) -> Result<SearchOutcome>;
    fn details(&self, imdb_id: &str) -> Result<MovieDetail>;
    fn poster(&self, poster_url: &str) -> Result<DynamicImage>;
}

pub struct OmdbClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OmdbClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    fn key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(AppError::MissingApiKey)
    }

    fn get_text(&self, url: &str) -> Result<String> {
        let response = self.http.get(url).send()?;
        if !response.status().is_success() {
            return Err(AppError::Status(response.status()));
        }
        Ok(response.text()?)
    }
}

impl MovieApi for OmdbClient {
    fn search(&self, query: &str) -> Result<SearchOutcome> {
        let url = search_url(&self.endpoint, self.key()?, query);
        tracing::debug!(query, "search request started");
        let body = self.get_text(&url)?;
        parse_search_response(&body)
    }

    fn details(&self, imdb_id: &str) -> Result<MovieDetail> {
        let url = detail_url(&self.endpoint, self.key()?, imdb_id);
        tracing::debug!(imdb_id, "detail request started");
        let body = self.get_text(&url)?;
        parse_detail_response(&body)
    }

    fn poster(&self, poster_url: &str) -> Result<DynamicImage> {
        let response = self.http.get(poster_url).send()?;
        if !response.status().is_success() {
            return Err(AppError::Status(response.status()));
        }
        let bytes = response.bytes()?;
        Ok(image::load_from_memory(&bytes)?)
    }
}
