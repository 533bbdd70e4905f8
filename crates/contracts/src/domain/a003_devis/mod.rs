pub mod aggregate;

pub use aggregate::{DevisExists, DevisSummary, ExistingDevis};
