use contracts::domain::a003_devis::{DevisExists, ExistingDevis};
use gloo_net::http::Request;
use web_sys::RequestCredentials;

use crate::shared::api_utils::api_url;

/// Look up the quote already issued for a demande, if any.
///
/// An unreadable body counts as "no quote"; only transport failures are `Err`.
pub async fn fetch_existing_devis(
    demande_id: &str,
    numero: &str,
) -> Result<Option<ExistingDevis>, String> {
    let url = api_url(&format!(
        "/api/devis/admin/by-demande/{}?numero={}",
        demande_id,
        urlencoding::encode(numero)
    ));

    let response = Request::get(&url)
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    Ok(response
        .json::<DevisExists>()
        .await
        .unwrap_or_default()
        .into_existing())
}
