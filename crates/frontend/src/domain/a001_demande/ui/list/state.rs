use contracts::domain::a001_demande::Demande;
use contracts::domain::a003_devis::ExistingDevis;
use contracts::shared::generation::Generation;
use leptos::prelude::*;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug, Default)]
pub struct DemandeListState {
    pub items: Vec<Demande>,
    pub selected_ids: HashSet<String>,
    pub is_loaded: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Quotes already issued, by demande id
    pub existing_devis: HashMap<String, ExistingDevis>,
    load: Generation,
}

impl DemandeListState {
    /// Replace the pool; selected ids that left the pool are dropped
    pub fn set_items(&mut self, items: Vec<Demande>) {
        self.selected_ids
            .retain(|id| items.iter().any(|d| &d.id == id));
        self.existing_devis
            .retain(|id, _| items.iter().any(|d| &d.id == id));
        self.items = items;
        self.is_loaded = true;
    }

    /// Start a pool load; answers of earlier loads are ignored from now on
    pub fn begin_load(&mut self) -> u64 {
        self.is_loading = true;
        self.load.next()
    }

    /// Apply a load answer. Returns `false` (and changes nothing) when a newer
    /// load has started since `ticket` was issued.
    pub fn finish_load(&mut self, ticket: u64, result: Result<Vec<Demande>, String>) -> bool {
        if !self.load.is_current(ticket) {
            return false;
        }
        self.is_loading = false;
        match result {
            Ok(items) => {
                self.set_items(items);
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
        true
    }

    /// Record the quote lookup of one demande, for the load `ticket` belongs to
    pub fn record_existing_devis(
        &mut self,
        ticket: u64,
        demande_id: &str,
        existing: Option<ExistingDevis>,
    ) -> bool {
        if !self.load.is_current(ticket) {
            return false;
        }
        match existing {
            Some(devis) => {
                self.existing_devis.insert(demande_id.to_string(), devis);
            }
            None => {
                self.existing_devis.remove(demande_id);
            }
        }
        true
    }

    pub fn existing_devis_for(&self, demande_id: &str) -> Option<&ExistingDevis> {
        self.existing_devis.get(demande_id)
    }

    /// A quote was created from the selection: clear it and reload the pool
    pub fn devis_created(&mut self) -> u64 {
        self.clear_selection();
        self.begin_load()
    }

    pub fn toggle(&mut self, id: &str, checked: bool) {
        if checked {
            self.selected_ids.insert(id.to_string());
        } else {
            self.selected_ids.remove(id);
        }
    }

    pub fn toggle_all(&mut self, checked: bool) {
        if checked {
            self.selected_ids = self.items.iter().map(|d| d.id.clone()).collect();
        } else {
            self.selected_ids.clear();
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_ids.contains(id)
    }

    pub fn all_selected(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|d| self.selected_ids.contains(&d.id))
    }

    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
    }

    /// Selected demandes in pool order
    pub fn selected_demandes(&self) -> Vec<Demande> {
        self.items
            .iter()
            .filter(|d| self.selected_ids.contains(&d.id))
            .cloned()
            .collect()
    }
}

pub fn create_state() -> RwSignal<DemandeListState> {
    RwSignal::new(DemandeListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_demande::DemandeClient;

    fn demande(id: &str, client: &str) -> Demande {
        Demande {
            id: id.to_string(),
            numero: format!("DDV-{id}"),
            user: Some(DemandeClient {
                id: client.to_string(),
                ..Default::default()
            }),
            quantite: None,
            created_at: None,
            ..Default::default()
        }
    }

    fn loaded() -> DemandeListState {
        let mut state = DemandeListState::default();
        state.set_items(vec![demande("d1", "c1"), demande("d2", "c1"), demande("d3", "c2")]);
        state
    }

    #[test]
    fn test_toggle_all_and_back() {
        let mut state = loaded();
        state.toggle_all(true);
        assert!(state.all_selected());
        assert_eq!(state.selected_demandes().len(), 3);

        state.toggle("d2", false);
        assert!(!state.all_selected());
        assert!(!state.is_selected("d2"));

        state.toggle_all(false);
        assert!(state.selected_ids.is_empty());
    }

    #[test]
    fn test_selected_demandes_follow_pool_order() {
        let mut state = loaded();
        state.toggle("d3", true);
        state.toggle("d1", true);
        let ids: Vec<_> = state.selected_demandes().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["d1", "d3"]);
    }

    #[test]
    fn test_reload_drops_vanished_selection() {
        let mut state = loaded();
        state.toggle("d1", true);
        state.toggle("d2", true);
        state.set_items(vec![demande("d2", "c1")]);
        assert!(state.is_selected("d2"));
        assert!(!state.is_selected("d1"));
        assert_eq!(state.selected_ids.len(), 1);
    }

    fn existing(numero: &str) -> ExistingDevis {
        ExistingDevis {
            numero: numero.to_string(),
            pdf: None,
        }
    }

    #[test]
    fn test_stale_load_is_ignored() {
        let mut state = DemandeListState::default();
        let manual = state.begin_load();
        let after_create = state.begin_load();

        // the newer load answers first, without the demandes just quoted
        assert!(state.finish_load(after_create, Ok(vec![demande("d3", "c2")])));
        assert!(!state.is_loading);

        // the older answer still lists them and must not bring them back
        let stale = vec![demande("d1", "c1"), demande("d3", "c2")];
        assert!(!state.finish_load(manual, Ok(stale)));
        let ids: Vec<_> = state.items.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["d3"]);
    }

    #[test]
    fn test_loading_until_latest_load_answers() {
        let mut state = DemandeListState::default();
        let first = state.begin_load();
        let second = state.begin_load();

        state.finish_load(first, Err("Erreur réseau".to_string()));
        assert!(state.is_loading);
        assert_eq!(state.error, None);

        state.finish_load(second, Err("Erreur (500)".to_string()));
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Erreur (500)"));
    }

    #[test]
    fn test_successful_load_clears_error() {
        let mut state = DemandeListState::default();
        let ticket = state.begin_load();
        state.finish_load(ticket, Err("Erreur réseau".to_string()));
        let ticket = state.begin_load();
        state.finish_load(ticket, Ok(vec![demande("d1", "c1")]));
        assert_eq!(state.error, None);
        assert!(state.is_loaded);
    }

    #[test]
    fn test_devis_created_clears_selection_and_reloads() {
        let mut state = loaded();
        let items = state.items.clone();
        let before = state.begin_load();
        state.finish_load(before, Ok(items));
        state.toggle("d1", true);
        state.toggle("d2", true);

        let reload = state.devis_created();
        assert!(state.selected_ids.is_empty());
        assert!(state.is_loading);
        assert_ne!(reload, before);

        assert!(state.finish_load(reload, Ok(vec![demande("d3", "c2")])));
        assert_eq!(state.items.len(), 1);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_existing_devis_follow_current_load() {
        let mut state = DemandeListState::default();
        let first = state.begin_load();
        state.finish_load(first, Ok(vec![demande("d1", "c1"), demande("d2", "c1")]));
        assert!(state.record_existing_devis(first, "d1", Some(existing("DV-1"))));
        assert!(state.record_existing_devis(first, "d2", None));
        assert_eq!(state.existing_devis_for("d1").map(|d| d.numero.as_str()), Some("DV-1"));
        assert!(state.existing_devis_for("d2").is_none());

        // a lookup from an older load is dropped
        let second = state.begin_load();
        assert!(!state.record_existing_devis(first, "d2", Some(existing("DV-2"))));
        assert!(state.existing_devis_for("d2").is_none());

        // demandes that left the pool lose their marker
        state.finish_load(second, Ok(vec![demande("d2", "c1")]));
        assert!(state.existing_devis_for("d1").is_none());
    }

    #[test]
    fn test_empty_pool_is_never_all_selected() {
        let mut state = DemandeListState::default();
        state.toggle_all(true);
        assert!(!state.all_selected());
    }
}
