use serde::{Deserialize, Serialize};

/// Quote header as embedded in lookup responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DevisSummary {
    #[serde(default)]
    pub numero: Option<String>,
}

/// Response of `GET /api/devis/admin/by-demande/:id?numero=`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DevisExists {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub exists: bool,

    #[serde(default)]
    pub devis: Option<DevisSummary>,

    /// Link to the quote's PDF
    #[serde(default)]
    pub pdf: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

/// A quote already issued for a demande
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingDevis {
    pub numero: String,
    pub pdf: Option<String>,
}

impl DevisExists {
    /// `Some` only for a successful lookup that found a quote
    pub fn into_existing(self) -> Option<ExistingDevis> {
        if !(self.success && self.exists) {
            return None;
        }
        Some(ExistingDevis {
            numero: self
                .devis
                .and_then(|d| d.numero)
                .unwrap_or_default(),
            pdf: self.pdf.filter(|p| !p.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_quote() {
        let json = r#"{
            "success": true,
            "exists": true,
            "devis": { "_id": "x1", "numero": "DV-2025-0007" },
            "pdf": "https://files.example.tn/devis/DV-2025-0007.pdf"
        }"#;
        let resp: DevisExists = serde_json::from_str(json).unwrap();
        assert_eq!(
            resp.into_existing(),
            Some(ExistingDevis {
                numero: "DV-2025-0007".to_string(),
                pdf: Some("https://files.example.tn/devis/DV-2025-0007.pdf".to_string()),
            })
        );
    }

    #[test]
    fn test_no_quote_yet() {
        let resp: DevisExists =
            serde_json::from_str(r#"{"success":true,"exists":false}"#).unwrap();
        assert_eq!(resp.into_existing(), None);
    }

    #[test]
    fn test_failed_lookup_is_not_a_quote() {
        let resp: DevisExists =
            serde_json::from_str(r#"{"success":false,"exists":true,"message":"Interdit"}"#)
                .unwrap();
        assert_eq!(resp.into_existing(), None);
    }

    #[test]
    fn test_quote_without_number_or_pdf() {
        let resp: DevisExists =
            serde_json::from_str(r#"{"success":true,"exists":true,"pdf":""}"#).unwrap();
        let existing = resp.into_existing().unwrap();
        assert_eq!(existing.numero, "");
        assert_eq!(existing.pdf, None);
    }
}
