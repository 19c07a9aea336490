//! Open Library catalog client
//!
//! Canonical lookup is two requests: the edition (`/isbn/{id}.json`) for the
//! title and work link, then the work (`/works/{key}.json`) for subjects.
//! Searches go to `/search.json`.

use super::client::{CatalogClient, CatalogError, CatalogResult};
use super::types::{CatalogRecord, SearchQuery};
use crate::config::CatalogSettings;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

const SEARCH_FIELDS: &str = "title,author_name,edition_count,subject";

/// Edition-level document (`/isbn/{id}.json`)
#[derive(Debug, Deserialize)]
struct EditionDoc {
    title: Option<String>,
    #[serde(default)]
    works: Vec<WorkRef>,
}

#[derive(Debug, Deserialize)]
struct WorkRef {
    key: String,
}

/// Work-level document (`/works/{key}.json`)
#[derive(Debug, Deserialize)]
struct WorkDoc {
    #[serde(default)]
    subjects: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    title: Option<String>,
    #[serde(default)]
    author_name: Vec<String>,
    #[serde(default)]
    edition_count: u32,
    #[serde(default)]
    subject: Vec<String>,
}

/// HTTP client for the Open Library JSON API.
#[derive(Debug, Clone)]
pub struct OpenLibraryClient {
    client: Client,
    base_url: Url,
}

impl OpenLibraryClient {
    /// Build a client from catalog settings.
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(settings: &CatalogSettings) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| CatalogError::Transport(format!("failed to build HTTP client: {}", e)))?;
        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", settings.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(settings.base_url.clone()));
        }
        Ok(Self { client, base_url })
    }

    /// Append path segments to the base URL.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> CatalogResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a JSON document; `Ok(None)` on 404.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> CatalogResult<Option<T>> {
        debug!(url = %url, "catalog request");
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                CatalogError::Timeout(url.to_string())
            } else {
                CatalogError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let doc = response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Decode(format!("{}: {}", url, e)))?;
        Ok(Some(doc))
    }

    /// Subjects of the work behind an edition. Failures degrade to none.
    async fn work_subjects(&self, work_key: &str) -> Vec<String> {
        let Some((prefix, last)) = work_key.trim_matches('/').rsplit_once('/') else {
            warn!(work_key, "malformed work key");
            return Vec::new();
        };
        let file = format!("{}.json", last);
        let url = match self.endpoint(prefix.split('/').chain(std::iter::once(file.as_str()))) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "could not build work URL");
                return Vec::new();
            }
        };
        match self.get_json::<WorkDoc>(url).await {
            Ok(Some(work)) => work.subjects,
            Ok(None) => {
                warn!(work_key, "linked work not found");
                Vec::new()
            }
            Err(e) => {
                warn!(work_key, error = %e, "work fetch failed; continuing without subjects");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl CatalogClient for OpenLibraryClient {
    async fn fetch_canonical(&self, identifier: &str) -> CatalogResult<Option<CatalogRecord>> {
        let file = format!("{}.json", identifier);
        let url = self.endpoint(["isbn", file.as_str()])?;
        let Some(edition) = self.get_json::<EditionDoc>(url).await? else {
            return Ok(None);
        };

        let title = edition
            .title
            .unwrap_or_else(|| format!("Unknown Title ({})", identifier));

        let subjects = match edition.works.first() {
            Some(work) => self.work_subjects(&work.key).await,
            None => {
                debug!(identifier, "edition has no linked work");
                Vec::new()
            }
        };

        Ok(Some(CatalogRecord {
            title,
            subjects,
            author_name: Vec::new(),
            edition_count: 1,
        }))
    }

    async fn search(&self, query: &SearchQuery, limit: usize) -> CatalogResult<Vec<CatalogRecord>> {
        let mut url = self.endpoint(["search.json"])?;
        let field = match query {
            SearchQuery::Subject(_) => "subject",
            SearchQuery::FreeText(_) => "q",
        };
        url.query_pairs_mut()
            .append_pair(field, query.text())
            .append_pair("limit", &limit.to_string())
            .append_pair("fields", SEARCH_FIELDS);

        let Some(response) = self.get_json::<SearchResponse>(url).await? else {
            return Ok(Vec::new());
        };

        let records: Vec<CatalogRecord> = response
            .docs
            .into_iter()
            .filter_map(|doc| {
                let title = doc.title?;
                Some(CatalogRecord {
                    title,
                    subjects: doc.subject,
                    author_name: doc.author_name,
                    edition_count: doc.edition_count,
                })
            })
            .collect();
        debug!(query = %query, count = records.len(), "catalog search returned");
        Ok(records)
    }
}
