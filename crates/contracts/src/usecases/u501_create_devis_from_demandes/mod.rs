pub mod lines;
pub mod pricing;
pub mod request;
pub mod response;
pub mod session;
pub mod submission;

pub use lines::{parse_percent_input, parse_quantity_input, QuoteLine, QuoteLines};
pub use pricing::{compute_totals, round3, LineAmounts, OrderTotals, FODEC_RATE};
pub use request::{CreateDevisFromDemandesRequest, DevisLineRequest};
pub use response::CreateDevisResponse;
pub use session::EditSession;
pub use submission::{build_request, CreatedDevis, SubmissionGate, SubmitError};

use crate::usecases::common::UseCaseMetadata;

pub struct CreateDevisFromDemandes;

impl UseCaseMetadata for CreateDevisFromDemandes {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "create_devis_from_demandes"
    }

    fn display_name() -> &'static str {
        "Créer un devis (multi-demandes)"
    }

    fn description() -> &'static str {
        "Chiffrage ligne par ligne de plusieurs demandes d'un même client et création du devis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        assert_eq!(
            CreateDevisFromDemandes::full_name(),
            "u501_create_devis_from_demandes"
        );
    }

    #[test]
    fn test_description_names_the_client_constraint() {
        let description = CreateDevisFromDemandes::description();
        assert!(!description.is_empty());
        assert!(description.contains("même client"));
    }
}
