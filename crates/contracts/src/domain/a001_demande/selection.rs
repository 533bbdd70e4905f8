use super::aggregate::Demande;
use thiserror::Error;

/// Why a selection of demandes cannot be priced together
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Aucune demande sélectionnée.")]
    EmptySelection,

    #[error("Sélectionne des demandes appartenant au même client.")]
    MixedClients,
}

/// Checks that every selected demande belongs to the same client.
///
/// Returns the shared client id (empty when none of the demandes has an owner).
/// A demande without an owner never groups with one that has one.
pub fn ensure_same_client(selected: &[Demande]) -> Result<String, SelectionError> {
    let first = selected.first().ok_or(SelectionError::EmptySelection)?;
    let client_id = first.client_id();
    if selected.iter().all(|d| d.client_id() == client_id) {
        Ok(client_id.to_string())
    } else {
        Err(SelectionError::MixedClients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_demande::DemandeClient;

    fn demande(id: &str, client: Option<&str>) -> Demande {
        Demande {
            id: id.to_string(),
            numero: format!("DDV-{id}"),
            user: client.map(|c| DemandeClient {
                id: c.to_string(),
                ..Default::default()
            }),
            quantite: None,
            created_at: None,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_selection() {
        assert_eq!(ensure_same_client(&[]), Err(SelectionError::EmptySelection));
    }

    #[test]
    fn test_same_client() {
        let selected = vec![demande("1", Some("c1")), demande("2", Some("c1"))];
        assert_eq!(ensure_same_client(&selected), Ok("c1".to_string()));
    }

    #[test]
    fn test_mixed_clients_rejected() {
        let selected = vec![demande("1", Some("c1")), demande("2", Some("c2"))];
        assert_eq!(ensure_same_client(&selected), Err(SelectionError::MixedClients));

        let selected = vec![demande("1", Some("c1")), demande("2", None)];
        assert_eq!(ensure_same_client(&selected), Err(SelectionError::MixedClients));
    }

    #[test]
    fn test_mixed_clients_message() {
        assert_eq!(
            SelectionError::MixedClients.to_string(),
            "Sélectionne des demandes appartenant au même client."
        );
    }
}
