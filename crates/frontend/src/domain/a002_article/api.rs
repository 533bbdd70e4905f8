use contracts::domain::a002_article::{ArticleCatalog, ArticleListResponse};
use gloo_net::http::Request;
use web_sys::RequestCredentials;

use crate::shared::api_utils::api_url;

/// Cap on the catalog size loaded into the article selector
pub const CATALOG_LIMIT: usize = 1000;

/// Fetch the article catalog (read-only lookup for one editing session)
pub async fn fetch_articles(limit: usize) -> Result<ArticleCatalog, String> {
    let url = api_url(&format!("/api/articles?limit={}", limit));

    let response = Request::get(&url)
        .credentials(RequestCredentials::Include)
        .header("Cache-Control", "no-store")
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch articles: {}", response.status()));
    }

    response
        .json::<ArticleListResponse>()
        .await
        .map(ArticleCatalog::from)
        .map_err(|e| format!("Failed to parse response: {}", e))
}
