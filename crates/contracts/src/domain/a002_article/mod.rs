pub mod aggregate;

pub use aggregate::{Article, ArticleCatalog, ArticleListResponse};
