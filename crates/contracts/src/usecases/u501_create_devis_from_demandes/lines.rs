use super::pricing::{compute_totals, LineAmounts, OrderTotals, DEFAULT_VAT_PERCENT};
use super::request::DevisLineRequest;
use crate::domain::a001_demande::Demande;
use crate::domain::a002_article::ArticleCatalog;

/// One article-and-terms assignment for a single demande
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteLine {
    pub demande_id: String,
    /// Display copy of the demande number
    pub request_number: String,
    /// Empty while no article is chosen
    pub article_id: String,
    pub quantity: u32,
    pub discount_percent: f64,
    pub vat_percent: f64,
}

impl QuoteLine {
    pub fn from_demande(demande: &Demande) -> Self {
        Self {
            demande_id: demande.id.clone(),
            request_number: demande.numero.clone(),
            article_id: String::new(),
            quantity: demande.default_quantity(),
            discount_percent: 0.0,
            vat_percent: DEFAULT_VAT_PERCENT,
        }
    }

    pub fn has_article(&self) -> bool {
        !self.article_id.is_empty()
    }

    /// Ready to be sent: an article is chosen and the quantity is positive
    pub fn is_complete(&self) -> bool {
        self.has_article() && self.quantity > 0
    }

    pub fn amounts(&self, catalog: &ArticleCatalog) -> LineAmounts {
        LineAmounts::of(self, catalog)
    }

    pub fn to_request(&self) -> DevisLineRequest {
        DevisLineRequest {
            demande_id: self.demande_id.clone(),
            article_id: self.article_id.clone(),
            qty: self.quantity,
            remise_pct: self.discount_percent,
            tva_pct: self.vat_percent,
        }
    }
}

/// Ordered lines of one quote batch, addressed by demande id.
///
/// A demande appears at most once. Lines are only changed through the
/// setters below; edits naming an unknown demande are ignored and return `false`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteLines {
    lines: Vec<QuoteLine>,
}

impl QuoteLines {
    /// One line per demande, in selection order. Repeated demandes are skipped.
    pub fn from_demandes(demandes: &[Demande]) -> Self {
        let mut lines: Vec<QuoteLine> = Vec::with_capacity(demandes.len());
        for d in demandes {
            if lines.iter().any(|l| l.demande_id == d.id) {
                continue;
            }
            lines.push(QuoteLine::from_demande(d));
        }
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuoteLine> {
        self.lines.iter()
    }

    pub fn get(&self, demande_id: &str) -> Option<&QuoteLine> {
        self.lines.iter().find(|l| l.demande_id == demande_id)
    }

    fn get_mut(&mut self, demande_id: &str) -> Option<&mut QuoteLine> {
        self.lines.iter_mut().find(|l| l.demande_id == demande_id)
    }

    fn edit(&mut self, demande_id: &str, f: impl FnOnce(&mut QuoteLine)) -> bool {
        match self.get_mut(demande_id) {
            Some(line) => {
                f(line);
                true
            }
            None => false,
        }
    }

    pub fn set_article(&mut self, demande_id: &str, article_id: impl Into<String>) -> bool {
        let article_id = article_id.into();
        self.edit(demande_id, |l| l.article_id = article_id)
    }

    pub fn set_quantity(&mut self, demande_id: &str, quantity: u32) -> bool {
        self.edit(demande_id, |l| l.quantity = quantity)
    }

    pub fn set_discount(&mut self, demande_id: &str, discount_percent: f64) -> bool {
        self.edit(demande_id, |l| l.discount_percent = discount_percent)
    }

    pub fn set_vat(&mut self, demande_id: &str, vat_percent: f64) -> bool {
        self.edit(demande_id, |l| l.vat_percent = vat_percent)
    }

    pub fn remove(&mut self, demande_id: &str) -> Option<QuoteLine> {
        let pos = self.lines.iter().position(|l| l.demande_id == demande_id)?;
        Some(self.lines.remove(pos))
    }

    /// At least one line, and every line complete
    pub fn can_submit(&self) -> bool {
        !self.lines.is_empty() && self.lines.iter().all(QuoteLine::is_complete)
    }

    pub fn totals(&self, catalog: &ArticleCatalog) -> OrderTotals {
        compute_totals(&self.lines, catalog)
    }

    pub fn demande_ids(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.demande_id.clone()).collect()
    }

    /// Lines with a chosen article that the catalog cannot price
    pub fn unpriced(&self, catalog: &ArticleCatalog) -> Vec<&QuoteLine> {
        self.lines
            .iter()
            .filter(|l| l.has_article() && !catalog.is_priced(&l.article_id))
            .collect()
    }
}

impl<'a> IntoIterator for &'a QuoteLines {
    type Item = &'a QuoteLine;
    type IntoIter = std::slice::Iter<'a, QuoteLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

// === Edit boundary ===

/// Quantity typed by the operator: at least 1, non-numeric input gives 1
pub fn parse_quantity_input(raw: &str) -> u32 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 1.0 => v.trunc().min(u32::MAX as f64) as u32,
        _ => 1,
    }
}

/// Percentage typed by the operator, clamped to [0, 100]; non-numeric input gives 0
pub fn parse_percent_input(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v.clamp(0.0, 100.0),
        _ => 0.0,
    }
}
