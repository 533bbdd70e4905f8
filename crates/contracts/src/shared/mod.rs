pub mod serde_utils;
pub mod generation;
