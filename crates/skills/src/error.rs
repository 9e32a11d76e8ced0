use std::path::PathBuf;

use crate::types::Diagnostic;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Walkdir(#[from] walkdir::Error),
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
    #[error(transparent)]
    StripPrefix(#[from] std::path::StripPrefixError),
    #[error("Missing or malformed YAML frontmatter delimiters")]
    MalformedHeader,
    #[error("Skill directory does not exist: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("Validation failed:\n{}", format_diagnostics(diagnostics))]
    ValidationFailed { diagnostics: Vec<Diagnostic> },
    #[error("{reason}")]
    InvalidName { reason: String },
    #[error("Skill directory already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },
}

impl Error {
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    #[must_use]
    pub fn invalid_name(reason: impl Into<String>) -> Self {
        Self::InvalidName {
            reason: reason.into(),
        }
    }
}

/// Render diagnostics as `- <message>` lines, one per diagnostic.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("- {d}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, Error>;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failed_lists_every_diagnostic() {
        let err = Error::ValidationFailed {
            diagnostics: vec![
                Diagnostic::new("SKILL.md not found"),
                Diagnostic::new("Missing required section: ## Examples"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Validation failed:\n- SKILL.md not found\n- Missing required section: ## Examples"
        );
    }

    #[test]
    fn invalid_name_displays_reason_verbatim() {
        let err = Error::invalid_name("Skill name must be 64 characters or fewer.");
        assert_eq!(err.to_string(), "Skill name must be 64 characters or fewer.");
    }
}
