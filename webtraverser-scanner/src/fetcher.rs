use crate::error::{FetchError, Result};
use crate::graph::EdgeKind;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use scraper::{Html, Selector};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_USER_AGENT: &str = "webtraverser";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// What the traverser needs to know about a fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    /// Raw `href` values in document order.
    pub links: Vec<String>,
}

impl Page {
    pub fn new(title: impl Into<String>, links: Vec<String>) -> Self {
        Self {
            title: title.into(),
            links,
        }
    }
}

/// Fetches and parses a single page.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = std::result::Result<Page, FetchError>> + Send;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_options(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<Page, FetchError> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_lowercase());

        if let Some(content_type) = content_type
            && !is_markup(&content_type)
        {
            return Err(FetchError::UnsupportedContentType {
                url: url.to_string(),
                content_type,
            });
        }

        let body = response.text().await?;
        parse_page(&body)
    }
}

/// Text and XML documents are parsed; anything else is refused.
fn is_markup(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or("").trim();
    mime.starts_with("text/") || mime == "application/xml" || mime.ends_with("+xml")
}

/// Extract the title and anchor hrefs from an HTML document.
pub fn parse_page(html: &str) -> std::result::Result<Page, FetchError> {
    let document = Html::parse_document(html);

    let title_selector =
        Selector::parse("title").map_err(|e| FetchError::ParseError(e.to_string()))?;
    let link_selector = Selector::parse(EdgeKind::Anchor.selector())
        .map_err(|e| FetchError::ParseError(e.to_string()))?;

    let title = document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .unwrap_or_default();

    let links = document
        .select(&link_selector)
        .map(|element| element.value().attr("href").unwrap_or("").to_string())
        .collect();

    Ok(Page::new(title, links))
}
