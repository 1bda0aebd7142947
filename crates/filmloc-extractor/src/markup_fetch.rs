//! Raw wiki markup collaborator.
//!
//! Markup is optional input: every failure here degrades to "no markup" at
//! the call site instead of failing the page.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::ExtractorError;

const WIKI_HOST_SUFFIX: &str = "wikipedia.org";
const WIKI_PATH_PREFIX: &str = "/wiki/";

/// `true` when `url` is an article page whose raw markup can be fetched.
#[must_use]
pub fn is_markup_source(url: &str) -> bool {
    wiki_title(url).is_some()
}

/// Map an article URL to its raw-markup URL.
///
/// `https://en.wikipedia.org/wiki/Vertigo_(film)` becomes
/// `https://en.wikipedia.org/w/index.php?title=Vertigo_(film)&action=raw`.
/// Returns `None` for anything that is not an article URL.
#[must_use]
pub fn raw_markup_url(url: &str) -> Option<String> {
    let (origin, title) = wiki_title(url)?;
    Some(raw_url_for(&origin, &title))
}

fn wiki_title(url: &str) -> Option<(String, String)> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    if host != WIKI_HOST_SUFFIX && !host.ends_with(&format!(".{WIKI_HOST_SUFFIX}")) {
        return None;
    }
    let title = parsed.path().strip_prefix(WIKI_PATH_PREFIX)?;
    if title.is_empty() {
        return None;
    }
    Some((parsed.origin().ascii_serialization(), title.to_string()))
}

fn raw_url_for(origin: &str, title: &str) -> String {
    format!(
        "{}/w/index.php?title={title}&action=raw",
        origin.trim_end_matches('/')
    )
}

/// Fetches raw markup over HTTP: one GET per page, no retry.
#[derive(Debug, Clone)]
pub struct MarkupFetcher {
    client: Client,
    /// Replaces the article's origin when building raw-markup URLs.
    origin_override: Option<String>,
}

impl MarkupFetcher {
    /// # Errors
    ///
    /// Returns [`ExtractorError::Http`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ExtractorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            origin_override: None,
        })
    }

    /// Fetch markup from `origin` (a mirror) instead of the article's host.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin_override = Some(origin.into());
        self
    }

    /// GET `raw_url` and return the body.
    ///
    /// # Errors
    ///
    /// - [`ExtractorError::UnexpectedStatus`] for any non-2xx response.
    /// - [`ExtractorError::Http`] on network, timeout or body decode failure.
    pub async fn fetch_raw(&self, raw_url: &str) -> Result<String, ExtractorError> {
        let response = self.client.get(raw_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractorError::UnexpectedStatus {
                status: status.as_u16(),
                url: raw_url.to_owned(),
            });
        }
        Ok(response.text().await?)
    }

    /// Fetch the raw markup behind `page_url`.
    ///
    /// Returns `Ok(None)` without any request when the page is not a
    /// markup-bearing article.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`MarkupFetcher::fetch_raw`].
    pub async fn fetch_for_page(&self, page_url: &str) -> Result<Option<String>, ExtractorError> {
        let Some((origin, title)) = wiki_title(page_url) else {
            return Ok(None);
        };
        let origin = self.origin_override.as_deref().unwrap_or(&origin);
        let raw_url = raw_url_for(origin, &title);
        self.fetch_raw(&raw_url).await.map(Some)
    }

    /// Like [`MarkupFetcher::fetch_for_page`], but a failure is logged and
    /// treated as "no markup available".
    pub async fn fetch_best_effort(&self, page_url: &str) -> Option<String> {
        match self.fetch_for_page(page_url).await {
            Ok(markup) => markup,
            Err(e) => {
                tracing::warn!(
                    url = page_url,
                    error = %e,
                    "raw markup unavailable; continuing without it"
                );
                None
            }
        }
    }
}

/// Where a page's raw markup comes from.
#[derive(Debug, Clone)]
pub enum MarkupSource {
    /// The markup-based path is turned off.
    Disabled,
    /// Fetch over HTTP for markup-bearing pages.
    Remote(MarkupFetcher),
    /// Fixed markup used for every page (saved files, tests).
    Static(String),
}

impl MarkupSource {
    /// Markup for `page_url`, or `None` when unavailable for any reason.
    pub async fn markup_for(&self, page_url: &str) -> Option<String> {
        match self {
            MarkupSource::Disabled => None,
            MarkupSource::Remote(fetcher) => fetcher.fetch_best_effort(page_url).await,
            MarkupSource::Static(markup) => Some(markup.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_urls_map_to_raw_endpoint() {
        assert_eq!(
            raw_markup_url("https://en.wikipedia.org/wiki/Vertigo_(film)").as_deref(),
            Some("https://en.wikipedia.org/w/index.php?title=Vertigo_(film)&action=raw")
        );
        assert_eq!(
            raw_markup_url("https://de.m.wikipedia.org/wiki/Vertigo").as_deref(),
            Some("https://de.m.wikipedia.org/w/index.php?title=Vertigo&action=raw")
        );
    }

    #[test]
    fn non_article_urls_are_not_markup_sources() {
        assert!(!is_markup_source("https://www.imdb.com/title/tt0052357/locations"));
        assert!(!is_markup_source("https://en.wikipedia.org/w/index.php?title=X"));
        assert!(!is_markup_source("https://en.wikipedia.org/wiki/"));
        assert!(!is_markup_source("https://notwikipedia.org/wiki/Vertigo"));
        assert!(!is_markup_source("not a url"));
        assert!(is_markup_source("https://en.wikipedia.org/wiki/Vertigo_(film)"));
    }

    #[tokio::test]
    async fn disabled_and_static_sources_need_no_network() {
        assert_eq!(
            MarkupSource::Disabled
                .markup_for("https://en.wikipedia.org/wiki/Vertigo")
                .await,
            None
        );
        let source = MarkupSource::Static("== Filming locations ==".to_string());
        assert_eq!(
            source.markup_for("https://example.org").await.as_deref(),
            Some("== Filming locations ==")
        );
    }
}
