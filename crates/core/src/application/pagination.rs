// Cursor Traversal - materialize a server-paginated collection in memory

use crate::domain::Slice;
use crate::error::{ClientError, Result};
use std::future::Future;
use tracing::debug;

/// Upper bound on the number of pages a traversal may request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimit {
    pub max_pages: usize,
}

impl PageLimit {
    pub const fn new(max_pages: usize) -> Self {
        Self { max_pages }
    }
}

/// Follow the cursor until the server reports no further page
///
/// `fetch` receives the `after` cursor (empty for the first page). Nodes are
/// accumulated in page-then-edge order. Any page error aborts the traversal
/// and discards what was collected so far.
///
/// There is no page cap: termination relies on the server eventually
/// reporting `hasNextPage = false`. Use [`collect_pages_with_limit`] to bound
/// it.
pub async fn collect_pages<T, F, Fut>(fetch: F) -> Result<Vec<T>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Slice<T>>>,
{
    collect_pages_with_limit(None, fetch).await
}

/// Same as [`collect_pages`], failing with `PageLimitExceeded` once `limit`
/// pages were fetched and the server still reports another one
pub async fn collect_pages_with_limit<T, F, Fut>(
    limit: Option<PageLimit>,
    mut fetch: F,
) -> Result<Vec<T>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Slice<T>>>,
{
    let mut items = Vec::new();
    let mut after = String::new();
    let mut pages = 0usize;

    loop {
        if let Some(limit) = limit {
            if pages >= limit.max_pages {
                return Err(ClientError::PageLimitExceeded(limit.max_pages));
            }
        }

        let Slice { edges, page_info } = fetch(after).await?;
        pages += 1;
        items.extend(edges.into_iter().map(|edge| edge.node));

        if !page_info.has_next_page {
            break;
        }

        after = page_info.end_cursor.ok_or_else(|| {
            ClientError::Protocol("hasNextPage is set but endCursor is null".to_string())
        })?;
    }

    debug!(pages = pages, items = items.len(), "Cursor traversal finished");

    Ok(items)
}
