pub mod a001_demande;
pub mod a002_article;
pub mod a003_devis;
