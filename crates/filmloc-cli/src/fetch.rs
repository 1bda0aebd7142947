//! Page loading for the extract command.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use filmloc_extractor::MarkupSource;
use reqwest::Client;

/// Rendered HTML plus optional raw markup for one page.
#[derive(Debug)]
pub(crate) struct LoadedPage {
    pub html: String,
    pub raw_markup: Option<String>,
}

/// Fetches page HTML: one GET, no retry.
pub(crate) struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub(crate) fn new(timeout_secs: u64, user_agent: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }

    pub(crate) async fn fetch_html(&self, url: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("unexpected HTTP status {} from {url}", status.as_u16());
        }

        response
            .text()
            .await
            .with_context(|| format!("failed to read body from {url}"))
    }
}

/// Load the page HTML (from `html_file` when given, else over HTTP) and its
/// raw markup concurrently. Markup is best-effort and never fails the page.
pub(crate) async fn load_page(
    url: &str,
    html_file: Option<&Path>,
    pages: &PageFetcher,
    markup: &MarkupSource,
) -> anyhow::Result<LoadedPage> {
    let html = async {
        match html_file {
            Some(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path.display())),
            None => pages.fetch_html(url).await,
        }
    };

    let (html, raw_markup) = tokio::join!(html, markup.markup_for(url));

    Ok(LoadedPage {
        html: html?,
        raw_markup,
    })
}
