//! Paginated collection aggregation.
//!
//! Every Graph collection (users, applications, sites, site pages) pages the
//! same way: a first page plus an opaque continuation link. [`aggregate`]
//! walks that chain once, normalizing each record into an identifier-keyed
//! [`Collection`].

use serde::de::DeserializeOwned;
use tracing::debug;

use graphscout_shared::{Attributes, Collection, Result};

use crate::client::GraphClient;
use crate::models::CollectionPage;

/// A source of continuation pages for one record type.
///
/// Implementations must tolerate being called once per token handed out;
/// [`aggregate`] never calls past a page whose token is absent or empty.
#[allow(async_fn_in_trait)]
pub trait PageSource<T> {
    /// Fetch the page behind a continuation token.
    async fn next_page(&self, token: &str) -> Result<CollectionPage<T>>;
}

impl<T: DeserializeOwned> PageSource<T> for GraphClient {
    async fn next_page(&self, token: &str) -> Result<CollectionPage<T>> {
        self.fetch_next_page(token).await
    }
}

/// Collect every record reachable from `first` into a [`Collection`].
///
/// `normalize` converts one raw record into `(identifier, attributes)`;
/// returning `None` drops the record (e.g. it has no identifier). Records on
/// later pages overwrite earlier ones on identifier collision — the service
/// enforces identifier uniqueness, so collisions only occur when a record
/// reappears across pages.
///
/// A fetch failure aborts the whole aggregation; nothing partial is returned.
pub async fn aggregate<T, S, F>(
    source: &S,
    first: CollectionPage<T>,
    mut normalize: F,
) -> Result<Collection>
where
    S: PageSource<T>,
    F: FnMut(&T) -> Option<(String, Attributes)>,
{
    let mut collection = Collection::new();
    let mut page = first;
    let mut page_count = 1usize;

    loop {
        for record in &page.records {
            if let Some((id, attrs)) = normalize(record) {
                collection.insert(id, attrs);
            }
        }

        match page.next_link.take() {
            Some(token) if !token.is_empty() => {
                page = source.next_page(&token).await?;
                page_count += 1;
            }
            _ => break,
        }
    }

    debug!(pages = page_count, records = collection.len(), "aggregation complete");
    Ok(collection)
}
