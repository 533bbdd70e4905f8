use contracts::usecases::u501_create_devis_from_demandes::{
    CreateDevisFromDemandesRequest, CreateDevisResponse,
};
use gloo_net::http::Request;
use web_sys::RequestCredentials;

use crate::shared::api_utils::api_url;

/// Create one quote from several demandes of the same client.
///
/// `Err` only for transport failures. An unreadable body is treated as an
/// empty response, which the caller reads as a rejection.
pub async fn create_devis_from_demandes(
    request: &CreateDevisFromDemandesRequest,
) -> Result<CreateDevisResponse, String> {
    let url = api_url("/api/devis/admin/from-demande");

    let response = Request::post(&url)
        .credentials(RequestCredentials::Include)
        .json(request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.ok() {
        log::warn!("devis creation answered HTTP {}", response.status());
    }

    Ok(response
        .json::<CreateDevisResponse>()
        .await
        .unwrap_or_default())
}

/// Open a generated document in a new browsing context
pub fn open_document(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer") {
        log::warn!("could not open {}: {:?}", url, e);
    }
}
