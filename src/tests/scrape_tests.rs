use crate::error::{MenuError, NetworkError};
use crate::fetchers::HttpFetcher;
use crate::locator::MenuLocator;
use crate::results::MenuUrl;
use crate::scrape::scrape;
use crate::tests::support::{Reply, TestServer};
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (menu-finder)";

fn fetcher(timeout_ms: u64) -> HttpFetcher {
    HttpFetcher::new(USER_AGENT, Duration::from_millis(timeout_ms)).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scrape_flattens_page() {
        let server = TestServer::start(vec![(
            "/menu",
            Reply::html("<html><body><h1>Lunch</h1><p>Soup</p><p>$5</p></body></html>"),
        )])
        .await;

        let text = scrape(&fetcher(2000), &server.url("/menu")).await.unwrap();
        assert_eq!(text, "Lunch\nSoup\n$5");
    }

    #[tokio::test]
    async fn test_scrape_is_idempotent() {
        let server = TestServer::start(vec![(
            "/menu",
            Reply::html("<body><p>Waffles</p><p>7.50</p></body>"),
        )])
        .await;
        let fetcher = fetcher(2000);

        let first = scrape(&fetcher, &server.url("/menu")).await.unwrap();
        let second = scrape(&fetcher, &server.url("/menu")).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(server.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_scrape_non_success_status() {
        let server =
            TestServer::start(vec![("/menu", Reply::Body(500, "boom".to_string()))]).await;

        let result = scrape(&fetcher(2000), &server.url("/menu")).await;
        match result {
            Err(MenuError::Network(NetworkError::Status { status, .. })) => {
                assert_eq!(status, 500)
            }
            other => panic!("expected status error, got {:?}", other),
        }

        // Unknown paths answer 404
        let result = scrape(&fetcher(2000), &server.url("/missing")).await;
        assert!(matches!(
            result,
            Err(MenuError::Network(NetworkError::Status { status: 404, .. }))
        ));
    }

    #[tokio::test]
    async fn test_scrape_timeout() {
        let server = TestServer::start(vec![("/slow", Reply::Hang)]).await;

        let result = scrape(&fetcher(200), &server.url("/slow")).await;
        assert!(matches!(
            result,
            Err(MenuError::Network(NetworkError::Timeout { .. }))
        ));
    }

    #[tokio::test]
    async fn test_scrape_empty_url_fails_in_transport() {
        let result = scrape(&fetcher(200), "").await;
        assert!(matches!(
            result,
            Err(MenuError::Network(NetworkError::Transport { .. }))
        ));
    }

    #[tokio::test]
    async fn test_locate_sends_search_request() {
        let server = TestServer::start(vec![(
            "/html",
            Reply::html(
                r#"<body><a href="/about">About</a><a href="/food-menu.pdf">View</a></body>"#,
            ),
        )])
        .await;
        let fetcher = fetcher(2000);
        let search_url = server.url("/html");

        let located = MenuLocator::new(&fetcher, &search_url)
            .locate("Example Diner")
            .await
            .unwrap();
        assert_eq!(located, MenuUrl::Found("/food-menu.pdf".to_string()));

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].target, "/html?q=Example+Diner+menu&t=h_&ia=web");
        assert_eq!(requests[0].header("user-agent"), Some(USER_AGENT));
    }

    #[tokio::test]
    async fn test_locate_without_links() {
        let server = TestServer::start(vec![(
            "/html",
            Reply::html("<body><p>No results.</p></body>"),
        )])
        .await;
        let fetcher = fetcher(2000);
        let search_url = server.url("/html");

        let located = MenuLocator::new(&fetcher, &search_url)
            .locate("Nowhere Cafe")
            .await
            .unwrap();
        assert_eq!(located, MenuUrl::NotFound);
    }

    #[tokio::test]
    async fn test_locate_provider_failure() {
        let server =
            TestServer::start(vec![("/html", Reply::Body(503, "busy".to_string()))]).await;
        let fetcher = fetcher(2000);
        let search_url = server.url("/html");

        let result = MenuLocator::new(&fetcher, &search_url)
            .locate("Example Diner")
            .await;
        assert!(matches!(
            result,
            Err(MenuError::Network(NetworkError::Status { status: 503, .. }))
        ));
    }
}
