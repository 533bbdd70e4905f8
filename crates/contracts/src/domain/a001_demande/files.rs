use thiserror::Error;

/// A file stored with a demande on the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemandeFile {
    /// The demande form rendered as PDF
    Pdf,
    /// Attachment at the given index
    Document(usize),
}

impl DemandeFile {
    /// API path serving the file, starting with "/api/"
    pub fn path(&self, demande_id: &str) -> String {
        match self {
            DemandeFile::Pdf => format!("/api/admin/devis/fil/{}/pdf", demande_id),
            DemandeFile::Document(index) => {
                format!("/api/admin/devis/fil/{}/document/{}", demande_id, index)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FileOpenError {
    /// The backend answered with an error status
    #[error("{}", unavailable_text(.0))]
    Unavailable(DemandeFile),

    /// The file could not be downloaded or shown
    #[error("{}", open_failed_text(.0))]
    OpenFailed(DemandeFile),
}

fn unavailable_text(file: &DemandeFile) -> &'static str {
    match file {
        DemandeFile::Pdf => "PDF indisponible.",
        DemandeFile::Document(_) => "Document indisponible.",
    }
}

fn open_failed_text(file: &DemandeFile) -> &'static str {
    match file {
        DemandeFile::Pdf => "Impossible d'ouvrir le PDF.",
        DemandeFile::Document(_) => "Impossible d'ouvrir le document.",
    }
}
