//! Genre element source
//!
//! The extraction pipeline only needs a finite, read-only collection of
//! element views per cycle. [`ElementSource`] is that seam; the live
//! implementation fetches the map page over HTTP and reads the
//! attributes out of the parsed document. The source handle is passed
//! explicitly into each cycle, there is no process-wide session.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Default page carrying the genre map.
pub const DEFAULT_PAGE_URL: &str = "https://everynoise.com/";

const USER_AGENT: &str = concat!("enao-scraper/", env!("CARGO_PKG_VERSION"));
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// The element collection could not be obtained. Fatal to the cycle,
/// unlike per-element extraction failures.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to fetch genre page: {0}")]
    Http(#[from] reqwest::Error),

    #[error("genre page contained no genre elements")]
    NoElements,
}

/// Owned, read-once view of one genre DOM element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreElement {
    /// Rendered text of the element (`innerText`).
    pub display_text: String,
    /// `title` attribute; empty when absent.
    pub title_text: String,
    /// `preview_url` attribute; empty when absent.
    pub preview_url: String,
    /// `style` attribute, semicolon-delimited `key: value` pairs.
    pub style_text: String,
}

/// Supplies the element collection for one scrape pass.
#[async_trait]
pub trait ElementSource: Send + Sync {
    async fn fetch_elements(&self) -> Result<Vec<GenreElement>, SourceError>;
}

/// Live source: fetches the genre map page over HTTP.
pub struct EveryNoiseSource {
    client: reqwest::Client,
    page_url: String,
}

impl EveryNoiseSource {
    pub fn new(page_url: impl Into<String>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            page_url: page_url.into(),
        })
    }
}

#[async_trait]
impl ElementSource for EveryNoiseSource {
    async fn fetch_elements(&self) -> Result<Vec<GenreElement>, SourceError> {
        info!(url = %self.page_url, "fetching genre page");
        let body = self
            .client
            .get(&self.page_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let elements = elements_from_html(&body);
        if elements.is_empty() {
            return Err(SourceError::NoElements);
        }
        info!(element_count = elements.len(), "genre page parsed");
        Ok(elements)
    }
}

/// Read every `div.genre` element of a parsed page into owned views.
/// Absent attributes become empty strings; validation is downstream.
pub fn elements_from_html(html: &str) -> Vec<GenreElement> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("div.genre").unwrap();

    document
        .select(&selector)
        .map(|element| GenreElement {
            display_text: element.text().collect::<String>().trim().to_string(),
            title_text: attr_or_empty(&element, "title"),
            preview_url: attr_or_empty(&element, "preview_url"),
            style_text: attr_or_empty(&element, "style"),
        })
        .collect()
}

fn attr_or_empty(element: &scraper::ElementRef<'_>, name: &str) -> String {
    element.value().attr(name).unwrap_or_default().to_string()
}
