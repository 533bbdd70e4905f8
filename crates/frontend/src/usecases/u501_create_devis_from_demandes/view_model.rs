//! ViewModel of the multi-demande quote modal
//!
//! Owns the editing session: the quote lines, the article catalog loaded for
//! the session and the submission gate. Totals are derived signals, recomputed
//! from the current lines and catalog on every change.

use super::model;
use crate::domain::a002_article::api::{fetch_articles, CATALOG_LIMIT};
use contracts::domain::a001_demande::Demande;
use contracts::domain::a002_article::ArticleCatalog;
use contracts::usecases::u501_create_devis_from_demandes::{
    parse_percent_input, parse_quantity_input, EditSession, LineAmounts, OrderTotals, QuoteLines,
    SubmissionGate,
};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct CreateDevisVm {
    pub is_open: RwSignal<bool>,
    pub client_name: RwSignal<String>,

    // === Session data ===
    pub lines: RwSignal<QuoteLines>,
    pub catalog: RwSignal<ArticleCatalog>,

    // === UI state ===
    pub loading_articles: RwSignal<bool>,
    pub gate: RwSignal<SubmissionGate>,
    pub error: RwSignal<Option<String>>,

    /// Async results carry its ticket; stale ones are dropped
    session: StoredValue<EditSession>,
}

impl CreateDevisVm {
    pub fn new() -> Self {
        Self {
            is_open: RwSignal::new(false),
            client_name: RwSignal::new(String::new()),
            lines: RwSignal::new(QuoteLines::default()),
            catalog: RwSignal::new(ArticleCatalog::empty()),
            loading_articles: RwSignal::new(false),
            gate: RwSignal::new(SubmissionGate::new()),
            error: RwSignal::new(None),
            session: StoredValue::new(EditSession::new()),
        }
    }

    // === Derived signals ===

    pub fn totals(&self) -> Memo<OrderTotals> {
        let lines = self.lines;
        let catalog = self.catalog;
        Memo::new(move |_| catalog.with(|cat| lines.with(|ls| ls.totals(cat))))
    }

    /// Amounts of one line, `None` once the line is removed
    pub fn line_amounts(&self, demande_id: String) -> Memo<Option<LineAmounts>> {
        let lines = self.lines;
        let catalog = self.catalog;
        Memo::new(move |_| {
            catalog.with(|cat| lines.with(|ls| ls.get(&demande_id).map(|l| l.amounts(cat))))
        })
    }

    /// The chosen article exists but carries no price (or no longer exists)
    pub fn is_unpriced(&self, demande_id: String) -> Signal<bool> {
        let lines = self.lines;
        let catalog = self.catalog;
        let loading = self.loading_articles;
        Signal::derive(move || {
            if loading.get() {
                return false;
            }
            catalog.with(|cat| {
                lines.with(|ls| {
                    ls.get(&demande_id)
                        .map(|l| l.has_article() && !cat.is_priced(&l.article_id))
                        .unwrap_or(false)
                })
            })
        })
    }

    pub fn is_submitting(&self) -> Signal<bool> {
        let gate = self.gate;
        Signal::derive(move || gate.get().is_in_flight())
    }

    pub fn is_submit_disabled(&self) -> Signal<bool> {
        let gate = self.gate;
        let lines = self.lines;
        Signal::derive(move || !lines.with(|ls| gate.get().can_start(ls)))
    }

    // === Session lifecycle ===

    /// Start a session for demandes already checked to share one client
    pub fn open(&self, demandes: &[Demande]) {
        let ticket = self
            .session
            .try_update_value(|s| s.open())
            .unwrap_or_default();

        self.client_name
            .set(demandes.first().map(Demande::client_name).unwrap_or_default());
        self.lines.set(QuoteLines::from_demandes(demandes));
        self.catalog.set(ArticleCatalog::empty());
        self.gate.set(SubmissionGate::new());
        self.error.set(None);
        self.is_open.set(true);

        log::debug!("quote session {} opened with {} demande(s)", ticket, demandes.len());
        self.load_catalog(ticket);
    }

    /// Discard the session without effect
    pub fn close(&self) {
        self.session.update_value(|s| s.close());
        self.is_open.set(false);
        self.lines.set(QuoteLines::default());
        self.gate.update(|g| g.reset());
        self.loading_articles.set(false);
        self.error.set(None);
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.session
            .try_with_value(|s| s.is_current(ticket))
            .unwrap_or(false)
    }

    fn load_catalog(&self, ticket: u64) {
        let this = *self;
        this.loading_articles.set(true);

        leptos::task::spawn_local(async move {
            let catalog = match fetch_articles(CATALOG_LIMIT).await {
                Ok(catalog) => catalog,
                Err(e) => {
                    log::warn!("article catalog unavailable: {}", e);
                    ArticleCatalog::empty()
                }
            };
            if !this.is_current(ticket) {
                return;
            }
            log::debug!("article catalog loaded: {} article(s)", catalog.len());
            this.catalog.set(catalog);
            this.loading_articles.set(false);
        });
    }

    // === Line edits ===

    pub fn set_article(&self, demande_id: &str, article_id: String) {
        self.lines.update(|ls| {
            ls.set_article(demande_id, article_id);
        });
    }

    pub fn set_quantity_input(&self, demande_id: &str, raw: &str) {
        let quantity = parse_quantity_input(raw);
        self.lines.update(|ls| {
            ls.set_quantity(demande_id, quantity);
        });
    }

    pub fn set_discount_input(&self, demande_id: &str, raw: &str) {
        let discount = parse_percent_input(raw);
        self.lines.update(|ls| {
            ls.set_discount(demande_id, discount);
        });
    }

    pub fn set_vat_input(&self, demande_id: &str, raw: &str) {
        let vat = parse_percent_input(raw);
        self.lines.update(|ls| {
            ls.set_vat(demande_id, vat);
        });
    }

    pub fn remove_line(&self, demande_id: &str) {
        self.lines.update(|ls| {
            ls.remove(demande_id);
        });
    }

    // === Commands ===

    /// Send the batch. On success the document (if any) is opened, the modal
    /// closes and `on_created` runs; on failure the lines stay as they are.
    pub fn submit(&self, on_created: Callback<()>) {
        let lines = self.lines.get_untracked();
        let Some(request) = self.gate.try_update(|g| g.begin(&lines)).flatten() else {
            return;
        };

        let this = *self;
        let ticket = self.session.with_value(|s| s.ticket());
        this.error.set(None);

        leptos::task::spawn_local(async move {
            let outcome = model::create_devis_from_demandes(&request).await;
            let Some(result) = this
                .session
                .try_with_value(|s| *s)
                .and_then(|session| {
                    this.gate
                        .try_update(|g| session.settle(ticket, g, outcome))
                })
            else {
                return;
            };

            match result {
                Ok(created) => {
                    log::info!(
                        "devis created for {} demande(s)",
                        request.demande_ids.len()
                    );
                    if this.is_current(ticket) {
                        this.close();
                    }
                    on_created.run(());
                    if let Some(pdf) = created.pdf {
                        model::open_document(&pdf);
                    }
                }
                Err(e) => {
                    log::error!("devis creation failed: {}", e);
                    if this.is_current(ticket) {
                        this.error.set(Some(e.to_string()));
                    }
                }
            }
        });
    }
}

impl Default for CreateDevisVm {
    fn default() -> Self {
        Self::new()
    }
}
