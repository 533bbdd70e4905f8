use crate::shared::serde_utils::lenient_number;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Catalog article (read-only here)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub reference: String,

    #[serde(default)]
    pub designation: String,

    /// Unit price before tax; older records use `priceHT` instead
    #[serde(
        rename = "prixHT",
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub prix_ht: Option<f64>,

    #[serde(
        rename = "priceHT",
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_ht: Option<f64>,
}

impl Article {
    /// `prixHT`, then `priceHT`. `None` when neither holds a finite number.
    pub fn known_unit_price(&self) -> Option<f64> {
        self.prix_ht
            .or(self.price_ht)
            .filter(|p| p.is_finite())
    }

    /// Unit price before tax, 0 when unknown
    pub fn unit_price(&self) -> f64 {
        self.known_unit_price().unwrap_or(0.0)
    }

    /// Option label used by the article selector
    pub fn label(&self) -> String {
        format!("{} — {}", self.reference, self.designation)
    }
}

/// Response of `GET /api/articles`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ArticleListResponse {
    #[serde(default)]
    pub data: Vec<Article>,
}

/// Immutable lookup table of the articles loaded for one editing session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleCatalog {
    articles: Vec<Article>,
    index: HashMap<String, usize>,
}

impl ArticleCatalog {
    pub fn new(articles: Vec<Article>) -> Self {
        let mut index = HashMap::with_capacity(articles.len());
        for (i, a) in articles.iter().enumerate() {
            // first occurrence wins, as a linear `find` would
            index.entry(a.id.clone()).or_insert(i);
        }
        Self { articles, index }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, article_id: &str) -> Option<&Article> {
        self.index.get(article_id).map(|&i| &self.articles[i])
    }

    /// Unit price for an article id. Unknown ids and unpriced articles give 0.
    pub fn unit_price(&self, article_id: &str) -> f64 {
        self.get(article_id).map(Article::unit_price).unwrap_or(0.0)
    }

    /// Whether the id resolves to an article carrying a real price
    pub fn is_priced(&self, article_id: &str) -> bool {
        self.get(article_id)
            .and_then(Article::known_unit_price)
            .is_some()
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

impl From<ArticleListResponse> for ArticleCatalog {
    fn from(resp: ArticleListResponse) -> Self {
        Self::new(resp.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, prix_ht: Option<f64>, price_ht: Option<f64>) -> Article {
        Article {
            id: id.to_string(),
            reference: format!("REF-{id}"),
            designation: "Ressort de compression".to_string(),
            prix_ht,
            price_ht,
        }
    }

    #[test]
    fn test_price_field_precedence() {
        assert_eq!(article("a", Some(12.5), Some(99.0)).unit_price(), 12.5);
        assert_eq!(article("a", None, Some(99.0)).unit_price(), 99.0);
        assert_eq!(article("a", None, None).unit_price(), 0.0);
    }

    #[test]
    fn test_catalog_lookup_miss_is_zero() {
        let catalog = ArticleCatalog::new(vec![article("a1", Some(100.0), None)]);
        assert_eq!(catalog.unit_price("a1"), 100.0);
        assert_eq!(catalog.unit_price("missing"), 0.0);
        assert_eq!(catalog.unit_price(""), 0.0);
        assert!(catalog.is_priced("a1"));
        assert!(!catalog.is_priced("missing"));
    }

    #[test]
    fn test_unpriced_article_is_not_priced() {
        let catalog = ArticleCatalog::new(vec![article("a1", None, None)]);
        assert!(catalog.get("a1").is_some());
        assert!(!catalog.is_priced("a1"));
    }

    #[test]
    fn test_deserialize_list_response() {
        let json = r#"{"data":[
            {"_id":"a1","reference":"RC-10","designation":"Ressort","prixHT":4.25},
            {"_id":"a2","reference":"RT-20","designation":"Torsion","priceHT":"7"}
        ]}"#;
        let resp: ArticleListResponse = serde_json::from_str(json).unwrap();
        let catalog = ArticleCatalog::from(resp);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.unit_price("a2"), 7.0);
        assert_eq!(catalog.get("a1").unwrap().label(), "RC-10 — Ressort");
    }
}
