use contracts::domain::a001_demande::{Demande, DemandeFile, DemandeListResponse, FileOpenError};
use gloo_net::http::Request;
use web_sys::RequestCredentials;

use crate::shared::api_utils::api_url;
use crate::shared::object_url::open_bytes_in_new_tab;

/// Fetch the demandes waiting for a quote
pub async fn fetch_pending_demandes() -> Result<Vec<Demande>, String> {
    let url = api_url("/api/admin/devis/fil");

    let response = Request::get(&url)
        .credentials(RequestCredentials::Include)
        .header("Cache-Control", "no-cache, no-store, must-revalidate")
        .header("Pragma", "no-cache")
        .send()
        .await
        .map_err(|_| "Erreur réseau".to_string())?;

    let status = response.status();
    // the body carries the server message even on error statuses
    let body = response.json::<DemandeListResponse>().await.ok();

    match body {
        Some(data) if response.ok() && data.success => Ok(data.items),
        Some(data) => Err(data
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Erreur ({})", status))),
        None => Err(format!("Erreur ({})", status)),
    }
}

/// Download a file of a demande and show it in a new tab
pub async fn open_demande_file(demande_id: &str, file: DemandeFile) -> Result<(), FileOpenError> {
    let url = api_url(&file.path(demande_id));

    let response = Request::get(&url)
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| {
            log::warn!("{} failed: {}", url, e);
            FileOpenError::OpenFailed(file)
        })?;

    if !response.ok() {
        log::warn!("{} answered HTTP {}", url, response.status());
        return Err(FileOpenError::Unavailable(file));
    }

    let content_type = response.headers().get("content-type");
    let bytes = response.binary().await.map_err(|e| {
        log::warn!("{} body unreadable: {}", url, e);
        FileOpenError::OpenFailed(file)
    })?;

    open_bytes_in_new_tab(&bytes, content_type.as_deref()).map_err(|e| {
        log::warn!("{}", e);
        FileOpenError::OpenFailed(file)
    })
}
