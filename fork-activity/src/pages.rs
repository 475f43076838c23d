//! Link-header pagination for GitHub list endpoints.
//!
//! GitHub list endpoints return at most one page of results per request and
//! advertise the next page through a `Link` response header. The helpers here
//! follow those links until the last page and hand back the concatenated
//! items.

use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Results per page (GitHub maximum).
const RESULTS_PER_PAGE: u8 = 100;

/// Query parameters sent with the first page request.
#[derive(Debug, Clone, Copy, Serialize)]
struct ListParams {
    per_page: u8,
}

/// Fetches every page of a list endpoint and concatenates the items.
///
/// The first non-success response aborts the whole fetch; no partial result
/// is returned and no request is retried.
///
/// # Errors
///
/// Returns the underlying [`octocrab::Error`] of the failing request.
pub async fn fetch_all<T>(octocrab: &Octocrab, route: &str) -> Result<Vec<T>, octocrab::Error>
where
    T: DeserializeOwned,
{
    let params = ListParams {
        per_page: RESULTS_PER_PAGE,
    };
    let page: Page<T> = octocrab.get(route, Some(&params)).await?;
    let items = collect_pages(octocrab, page).await?;
    debug!(route, count = items.len(), "Fetched all pages");
    Ok(items)
}

/// Drains `first` and every page linked after it, in page-arrival order.
///
/// No request is made once a page carries no `next` link.
///
/// # Errors
///
/// Returns the underlying [`octocrab::Error`] of the failing request.
pub async fn collect_pages<T>(
    octocrab: &Octocrab,
    first: Page<T>,
) -> Result<Vec<T>, octocrab::Error>
where
    T: DeserializeOwned,
{
    let mut page = first;
    let mut items = std::mem::take(&mut page.items);

    while let Some(mut next) = octocrab.get_page::<T>(&page.next).await? {
        items.append(&mut next.items);
        page = next;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_stub_server, StubRoute};

    // Three disjoint pages linked via the Link header must concatenate in
    // arrival order, with no request made after the page lacking a next link.
    #[tokio::test]
    async fn fetch_all_concatenates_linked_pages_in_order() {
        let addr = spawn_stub_server(vec![
            StubRoute {
                matches: "page=3",
                body: r#"["e","f"]"#.to_string(),
                next_link: None,
            },
            StubRoute {
                matches: "page=2",
                body: r#"["c","d"]"#.to_string(),
                next_link: Some("http://{addr}/items?page=3".to_string()),
            },
            StubRoute {
                matches: "/items",
                body: r#"["a","b"]"#.to_string(),
                next_link: Some("http://{addr}/items?page=2".to_string()),
            },
        ])
        .await;

        let octocrab = Octocrab::builder()
            .base_uri(format!("http://{addr}"))
            .unwrap()
            .build()
            .unwrap();

        let items: Vec<String> = fetch_all(&octocrab, "/items").await.unwrap();

        assert_eq!(items, vec!["a", "b", "c", "d", "e", "f"]);
    }

    // A page without a next link must be drained without any further request;
    // the default client would fail on any real network call here.
    #[tokio::test]
    async fn collect_pages_stops_without_next_link() {
        let octocrab = Octocrab::default();
        let mut page = Page::<String>::default();
        page.items = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let items = collect_pages(&octocrab, page).await.unwrap();

        assert_eq!(items, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn collect_pages_empty_page() {
        let octocrab = Octocrab::default();
        let page = Page::<String>::default();

        let items = collect_pages(&octocrab, page).await.unwrap();

        assert!(items.is_empty());
    }
}
