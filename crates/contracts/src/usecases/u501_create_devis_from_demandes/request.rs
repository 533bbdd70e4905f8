use serde::{Deserialize, Serialize};

/// One line item of the creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevisLineRequest {
    #[serde(rename = "demandeId")]
    pub demande_id: String,

    #[serde(rename = "articleId")]
    pub article_id: String,

    pub qty: u32,

    #[serde(rename = "remisePct")]
    pub remise_pct: f64,

    #[serde(rename = "tvaPct")]
    pub tva_pct: f64,
}

/// Body of `POST /api/devis/admin/from-demande`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDevisFromDemandesRequest {
    #[serde(rename = "demandeIds")]
    pub demande_ids: Vec<String>,

    pub lines: Vec<DevisLineRequest>,

    /// Asks the backend to e-mail the quote to the client. Not confirmed back.
    #[serde(rename = "sendEmail", default = "default_true")]
    pub send_email: bool,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let req = CreateDevisFromDemandesRequest {
            demande_ids: vec!["d1".into()],
            lines: vec![DevisLineRequest {
                demande_id: "d1".into(),
                article_id: "a1".into(),
                qty: 3,
                remise_pct: 5.0,
                tva_pct: 19.0,
            }],
            send_email: true,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["demandeIds"][0], "d1");
        assert_eq!(json["sendEmail"], true);
        let line = &json["lines"][0];
        assert_eq!(line["demandeId"], "d1");
        assert_eq!(line["articleId"], "a1");
        assert_eq!(line["qty"], 3);
        assert_eq!(line["remisePct"], 5.0);
        assert_eq!(line["tvaPct"], 19.0);
    }
}
