pub mod aggregate;
pub mod files;
pub mod selection;

pub use aggregate::{Demande, DemandeClient, DemandeDocument, DemandeListResponse};
pub use files::{DemandeFile, FileOpenError};
pub use selection::{ensure_same_client, SelectionError};
