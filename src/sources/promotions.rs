//! Store promotions endpoint.

use super::client::ApiClient;
use super::envelope::normalize_page;
use super::Result;
use crate::state::{Page, Promotion};

/// What: Fetch the promotions currently offered.
///
/// Inputs:
/// - `api`: Backend client.
///
/// Output:
/// - Every promotion on the first page; the endpoint is not paginated in practice.
///
/// # Errors
/// - Transport, status and decoding failures
pub async fn fetch_promotions(api: &ApiClient) -> Result<Vec<Promotion>> {
    let url = api.endpoint("promotions", &[])?;
    let page: Page<Promotion> = normalize_page(api.get_json(url).await?)?;
    if page.next_cursor.is_some() {
        tracing::debug!("promotions response carried a cursor; only the first page is used");
    }
    tracing::info!(count = page.items.len(), "fetched promotions");
    Ok(page.items)
}
