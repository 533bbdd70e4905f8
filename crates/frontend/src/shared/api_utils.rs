//! API utilities for frontend-backend communication
//!
//! The backend base URL is resolved once per call:
//! 1. `BACKEND_URL` baked in at build time (`BACKEND_URL=https://api.example.tn trunk build`)
//! 2. same host as the page, port 4000
//! 3. `http://localhost:4000` when there is no window (tests, SSR tooling)

/// Port the backend listens on when it shares the page's host
pub const BACKEND_PORT: u16 = 4000;

const FALLBACK_BASE: &str = "http://localhost:4000";

/// Get the base URL for API requests, without trailing slash
///
/// # Example
/// ```ignore
/// let url = format!("{}/api/articles?limit=1000", api_base());
/// ```
pub fn api_base() -> String {
    let location = web_sys::window().map(|w| {
        let location = w.location();
        (
            location.protocol().unwrap_or_else(|_| "http:".to_string()),
            location.hostname().unwrap_or_default(),
        )
    });
    resolve_api_base(option_env!("BACKEND_URL"), location)
}

/// Build a full API URL from a path starting with "/api/"
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Pure part of [`api_base`]: `configured` wins, then `(protocol, hostname)` of the page
pub fn resolve_api_base(configured: Option<&str>, location: Option<(String, String)>) -> String {
    if let Some(url) = configured.map(str::trim).filter(|u| !u.is_empty()) {
        return url.trim_end_matches('/').to_string();
    }
    match location {
        Some((protocol, hostname)) if !hostname.is_empty() => {
            format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
        }
        _ => FALLBACK_BASE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_url_wins() {
        let loc = Some(("https:".to_string(), "admin.example.tn".to_string()));
        assert_eq!(
            resolve_api_base(Some("https://api.example.tn/"), loc),
            "https://api.example.tn"
        );
    }

    #[test]
    fn test_same_host_as_page() {
        let loc = Some(("https:".to_string(), "admin.example.tn".to_string()));
        assert_eq!(resolve_api_base(None, loc), "https://admin.example.tn:4000");
        let loc = Some(("http:".to_string(), "127.0.0.1".to_string()));
        assert_eq!(resolve_api_base(Some("  "), loc), "http://127.0.0.1:4000");
    }

    #[test]
    fn test_fallback_without_window() {
        assert_eq!(resolve_api_base(None, None), "http://localhost:4000");
        let loc = Some(("http:".to_string(), String::new()));
        assert_eq!(resolve_api_base(None, loc), "http://localhost:4000");
    }
}
