// Generation lifecycle: render → persist artifacts → record → list/download/delete.
// All render calls go through the Renderer seam — no document bytes are
// produced in this crate.

pub mod filename;
pub mod handlers;
pub mod service;

/// Which of the two artifacts a download targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Unknown kinds are a `None` — callers surface that as not-found rather
    /// than a validation hint about what kinds exist.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}
