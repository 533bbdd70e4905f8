use super::submission::{CreatedDevis, SubmitError};
use serde::{Deserialize, Serialize};

/// Response of `POST /api/devis/admin/from-demande`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateDevisResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,

    /// URL of the generated PDF, when the backend produced one
    #[serde(default)]
    pub pdf: Option<String>,
}

impl CreateDevisResponse {
    /// `success: true` is the only accepted outcome; anything else is a rejection
    /// carrying the server message when there is one.
    pub fn into_result(self) -> Result<CreatedDevis, SubmitError> {
        if !self.success {
            let message = self.message.filter(|m| !m.trim().is_empty());
            return Err(SubmitError::Rejected(message));
        }
        Ok(CreatedDevis {
            pdf: self.pdf.filter(|p| !p.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_with_pdf() {
        let resp: CreateDevisResponse =
            serde_json::from_str(r#"{"success":true,"pdf":"https://x/devis/DV-1.pdf"}"#).unwrap();
        let created = resp.into_result().unwrap();
        assert_eq!(created.pdf.as_deref(), Some("https://x/devis/DV-1.pdf"));
    }

    #[test]
    fn test_missing_success_flag_is_rejection() {
        let resp: CreateDevisResponse = serde_json::from_str(r#"{}"#).unwrap();
        let err = resp.into_result().unwrap_err();
        assert_eq!(err, SubmitError::Rejected(None));
        assert_eq!(err.to_string(), "Erreur création devis");
    }

    #[test]
    fn test_server_message_is_surfaced() {
        let resp: CreateDevisResponse =
            serde_json::from_str(r#"{"success":false,"message":"Article inconnu"}"#).unwrap();
        assert_eq!(resp.into_result().unwrap_err().to_string(), "Article inconnu");
    }
}
