//! Integration tests for `MarkupFetcher`.
//!
//! Uses `wiremock` as a stand-in wiki mirror so no real network traffic is
//! made.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use filmloc_extractor::{ExtractorError, MarkupFetcher, MarkupSource};

const ARTICLE_URL: &str = "https://en.wikipedia.org/wiki/Vertigo_(film)";

const MARKUP: &str = "== Filming locations ==\n* [[Fort Point]], San Francisco\n";

/// 5-second timeout, descriptive UA, pointed at the mock server.
fn test_fetcher(server: &MockServer) -> MarkupFetcher {
    MarkupFetcher::new(5, "filmloc-test/0.1")
        .expect("failed to build test MarkupFetcher")
        .with_origin(server.uri())
}

async fn mount_raw(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/w/index.php"))
        .and(query_param("title", "Vertigo_(film)"))
        .and(query_param("action", "raw"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_for_page_returns_raw_markup() {
    let server = MockServer::start().await;
    mount_raw(&server, 200, MARKUP).await;

    let result = test_fetcher(&server).fetch_for_page(ARTICLE_URL).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert_eq!(result.unwrap().as_deref(), Some(MARKUP));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    mount_raw(&server, 404, "missing").await;

    let result = test_fetcher(&server).fetch_for_page(ARTICLE_URL).await;

    assert!(
        matches!(result, Err(ExtractorError::UnexpectedStatus { status: 404, .. })),
        "expected UnexpectedStatus(404), got: {result:?}"
    );
}

#[tokio::test]
async fn best_effort_degrades_to_none_on_failure() {
    let server = MockServer::start().await;
    mount_raw(&server, 503, "unavailable").await;

    let markup = test_fetcher(&server).fetch_best_effort(ARTICLE_URL).await;

    assert_eq!(markup, None);
}

#[tokio::test]
async fn non_article_page_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MARKUP))
        .expect(0)
        .mount(&server)
        .await;

    let result = test_fetcher(&server)
        .fetch_for_page("https://www.imdb.com/title/tt0052357/locations")
        .await;

    assert!(matches!(result, Ok(None)), "expected Ok(None), got: {result:?}");
}

#[tokio::test]
async fn remote_source_yields_markup() {
    let server = MockServer::start().await;
    mount_raw(&server, 200, MARKUP).await;

    let source = MarkupSource::Remote(test_fetcher(&server));

    assert_eq!(source.markup_for(ARTICLE_URL).await.as_deref(), Some(MARKUP));
}
