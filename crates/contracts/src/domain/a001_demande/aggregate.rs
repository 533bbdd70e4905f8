use chrono::{DateTime, Utc};
use crate::shared::serde_utils::lenient_number;
use serde::{Deserialize, Serialize};

/// Client owning a demande (the `user` sub-document of the backend record)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DemandeClient {
    #[serde(rename = "_id", default)]
    pub id: String,

    #[serde(default)]
    pub prenom: Option<String>,

    #[serde(default)]
    pub nom: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

impl DemandeClient {
    /// "Prénom Nom", or the e-mail when both names are blank
    pub fn display_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.prenom.as_deref().unwrap_or(""),
            self.nom.as_deref().unwrap_or("")
        );
        let full = full.trim();
        if !full.is_empty() {
            return full.to_string();
        }
        self.email.clone().unwrap_or_default()
    }
}

/// File attached to a demande by the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DemandeDocument {
    /// Position used by the download route; the array position when absent
    #[serde(default)]
    pub index: Option<usize>,

    #[serde(default)]
    pub filename: Option<String>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub size: Option<f64>,
}

/// A customer request awaiting a quote. Read-only on this side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Demande {
    #[serde(rename = "_id")]
    pub id: String,

    /// Display number, e.g. "DDV-2025-0042"
    #[serde(default)]
    pub numero: String,

    #[serde(default)]
    pub user: Option<DemandeClient>,

    /// Requested quantity; the backend sends either a number or a numeric string
    #[serde(default, deserialize_with = "lenient_number")]
    pub quantite: Option<f64>,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,

    /// The demande form was stored as a PDF
    #[serde(rename = "hasDemandePdf", default)]
    pub has_demande_pdf: bool,

    #[serde(default)]
    pub documents: Vec<DemandeDocument>,
}

impl Demande {
    /// Client id, empty when the demande has no owner attached
    pub fn client_id(&self) -> &str {
        self.user.as_ref().map(|u| u.id.as_str()).unwrap_or("")
    }

    pub fn client_name(&self) -> String {
        self.user
            .as_ref()
            .map(DemandeClient::display_name)
            .unwrap_or_default()
    }

    /// Quantity to seed a quote line with: the requested quantity, or 1
    pub fn default_quantity(&self) -> u32 {
        match self.quantite {
            Some(q) if q.is_finite() && q >= 1.0 => q.trunc().min(u32::MAX as f64) as u32,
            _ => 1,
        }
    }

    /// Attachments worth offering for download, as `(index, filename)`.
    ///
    /// Empty files and office lock files (`~$...`) are skipped.
    pub fn viewable_documents(&self) -> Vec<(usize, String)> {
        self.documents
            .iter()
            .enumerate()
            .filter_map(|(position, doc)| {
                let filename = doc.filename.as_deref().unwrap_or("").trim();
                if filename.is_empty() || filename.starts_with("~$") {
                    return None;
                }
                if doc.size.unwrap_or(0.0) <= 0.0 {
                    return None;
                }
                Some((doc.index.unwrap_or(position), filename.to_string()))
            })
            .collect()
    }
}

/// Response of `GET /api/admin/devis/fil`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DemandeListResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub items: Vec<Demande>,

    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_record() {
        let json = r#"{
            "_id": "d1",
            "numero": "DDV-001",
            "quantite": "250",
            "createdAt": "2025-03-04T09:30:00.000Z",
            "user": { "_id": "u1", "prenom": "Amine", "nom": "Ben Salah", "email": "a@x.tn" }
        }"#;
        let d: Demande = serde_json::from_str(json).unwrap();
        assert_eq!(d.id, "d1");
        assert_eq!(d.quantite, Some(250.0));
        assert_eq!(d.client_id(), "u1");
        assert_eq!(d.client_name(), "Amine Ben Salah");
        assert!(d.created_at.is_some());
    }

    #[test]
    fn test_default_quantity() {
        let mut d: Demande = serde_json::from_str(r#"{"_id":"d1"}"#).unwrap();
        assert_eq!(d.default_quantity(), 1);
        d.quantite = Some(0.0);
        assert_eq!(d.default_quantity(), 1);
        d.quantite = Some(12.0);
        assert_eq!(d.default_quantity(), 12);
        d.quantite = Some(f64::NAN);
        assert_eq!(d.default_quantity(), 1);
    }

    #[test]
    fn test_viewable_documents() {
        let json = r#"{
            "_id": "d1",
            "hasDemandePdf": true,
            "documents": [
                { "filename": "plan.pdf", "size": 2048 },
                { "filename": "~$plan.docx", "size": 162 },
                { "filename": "vide.txt", "size": 0 },
                { "index": 7, "filename": "photo.jpg", "size": "5120" },
                { "size": 10 }
            ]
        }"#;
        let d: Demande = serde_json::from_str(json).unwrap();
        assert!(d.has_demande_pdf);
        assert_eq!(
            d.viewable_documents(),
            vec![(0, "plan.pdf".to_string()), (7, "photo.jpg".to_string())]
        );
    }

    #[test]
    fn test_missing_documents_default_to_none() {
        let d: Demande = serde_json::from_str(r#"{"_id":"d1"}"#).unwrap();
        assert!(!d.has_demande_pdf);
        assert!(d.viewable_documents().is_empty());
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let c = DemandeClient {
            id: "u1".into(),
            prenom: Some("  ".into()),
            nom: None,
            email: Some("contact@client.tn".into()),
        };
        assert_eq!(c.display_name(), "contact@client.tn");
    }
}
