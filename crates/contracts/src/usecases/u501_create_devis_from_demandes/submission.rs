use super::lines::QuoteLines;
use super::request::CreateDevisFromDemandesRequest;
use super::response::CreateDevisResponse;
use thiserror::Error;

/// Quote successfully created by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedDevis {
    pub pdf: Option<String>,
}

/// Failed creation attempt. `Display` is the text shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The request never got a usable answer (transport, CORS, unreadable body)
    #[error("{}", non_blank(.0).unwrap_or("Erreur réseau"))]
    Network(String),

    /// The backend answered without `success: true`
    #[error("{}", .0.as_deref().unwrap_or("Erreur création devis"))]
    Rejected(Option<String>),
}

fn non_blank(s: &str) -> Option<&str> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Builds the batched creation request for the current lines
pub fn build_request(lines: &QuoteLines) -> CreateDevisFromDemandesRequest {
    CreateDevisFromDemandesRequest {
        demande_ids: lines.demande_ids(),
        lines: lines.iter().map(|l| l.to_request()).collect(),
        send_email: true,
    }
}

/// Guards a single creation attempt per editing session.
///
/// `begin` hands out the request only when the lines are submittable and no
/// attempt is in flight; `finish` releases the gate whatever the outcome.
/// Lines are never touched here, so a failed attempt leaves them as they were.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionGate {
    in_flight: bool,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether the submit action should be enabled
    pub fn can_start(&self, lines: &QuoteLines) -> bool {
        !self.in_flight && lines.can_submit()
    }

    pub fn begin(&mut self, lines: &QuoteLines) -> Option<CreateDevisFromDemandesRequest> {
        if !self.can_start(lines) {
            return None;
        }
        self.in_flight = true;
        Some(build_request(lines))
    }

    /// `outcome` is the parsed response, or the transport error text
    pub fn finish(
        &mut self,
        outcome: Result<CreateDevisResponse, String>,
    ) -> Result<CreatedDevis, SubmitError> {
        self.in_flight = false;
        outcome
            .map_err(SubmitError::Network)?
            .into_result()
    }

    /// Drops an in-flight attempt without an outcome (editing surface closed)
    pub fn reset(&mut self) {
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_demande::{Demande, DemandeClient};

    fn lines(ids: &[&str]) -> QuoteLines {
        let demandes: Vec<Demande> = ids
            .iter()
            .map(|id| Demande {
                id: id.to_string(),
                numero: format!("DDV-{id}"),
                user: Some(DemandeClient {
                    id: "c1".into(),
                    ..Default::default()
                }),
                quantite: Some(2.0),
                created_at: None,
                ..Default::default()
            })
            .collect();
        QuoteLines::from_demandes(&demandes)
    }

    fn ready_lines() -> QuoteLines {
        let mut l = lines(&["d1", "d2"]);
        l.set_article("d1", "a1");
        l.set_article("d2", "a2");
        l.set_discount("d2", 15.0);
        l
    }

    #[test]
    fn test_build_request() {
        let req = build_request(&ready_lines());
        assert_eq!(req.demande_ids, vec!["d1".to_string(), "d2".to_string()]);
        assert_eq!(req.lines.len(), 2);
        assert_eq!(req.lines[1].article_id, "a2");
        assert_eq!(req.lines[1].qty, 2);
        assert_eq!(req.lines[1].remise_pct, 15.0);
        assert_eq!(req.lines[1].tva_pct, 19.0);
        assert!(req.send_email);
    }

    #[test]
    fn test_begin_requires_submittable_lines() {
        let mut gate = SubmissionGate::new();
        assert!(gate.begin(&lines(&["d1"])).is_none());
        assert!(gate.begin(&QuoteLines::default()).is_none());
        assert!(!gate.is_in_flight());
    }

    #[test]
    fn test_no_reentrant_submission() {
        let mut gate = SubmissionGate::new();
        let l = ready_lines();
        assert!(gate.begin(&l).is_some());
        assert!(gate.is_in_flight());
        assert!(!gate.can_start(&l));
        assert!(gate.begin(&l).is_none());

        let _ = gate.finish(Ok(CreateDevisResponse {
            success: true,
            ..Default::default()
        }));
        assert!(gate.begin(&l).is_some());
    }

    #[test]
    fn test_success_outcome() {
        let mut gate = SubmissionGate::new();
        gate.begin(&ready_lines());
        let created = gate
            .finish(Ok(CreateDevisResponse {
                success: true,
                message: None,
                pdf: Some("https://backend/pdf/DV-7.pdf".into()),
            }))
            .unwrap();
        assert_eq!(created.pdf.as_deref(), Some("https://backend/pdf/DV-7.pdf"));
        assert!(!gate.is_in_flight());
    }

    #[test]
    fn test_failure_preserves_lines() {
        let mut gate = SubmissionGate::new();
        let l = ready_lines();
        let before = l.clone();
        let could_submit = l.can_submit();

        gate.begin(&l);
        let err = gate
            .finish(Err("TypeError: Failed to fetch".into()))
            .unwrap_err();
        assert_eq!(err.to_string(), "TypeError: Failed to fetch");
        assert_eq!(l, before);
        assert_eq!(l.can_submit(), could_submit);
        assert!(!gate.is_in_flight());
    }

    #[test]
    fn test_error_fallback_messages() {
        assert_eq!(SubmitError::Network(String::new()).to_string(), "Erreur réseau");
        assert_eq!(SubmitError::Rejected(None).to_string(), "Erreur création devis");
        assert_eq!(
            SubmitError::Rejected(Some("Demande déjà chiffrée".into())).to_string(),
            "Demande déjà chiffrée"
        );
    }
}
