//! Error types for loading and resolving token documents.

use std::path::PathBuf;

use thiserror::Error;

use crate::colorspace::FormatError;

/// Why a color entry could not be resolved to a concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionErrorKind {
    /// A path segment names a key that does not exist.
    #[error("reference '{reference}' is dangling: no '{missing}' under '{parent}'")]
    DanglingReference {
        reference: String,
        parent: String,
        missing: String,
    },

    /// A path walks through, or ends on, something that is not a color entry.
    #[error("reference '{reference}' hits '{at}', which is not a color entry")]
    NotAMapping { reference: String, at: String },

    /// The value is neither a hex literal nor a `{reference}`.
    #[error("'{value}' is neither a hex literal nor a reference")]
    NotAColorValue { value: String },

    /// A hex literal with a digit count other than 6 or 8.
    #[error("unsupported hex length: '{value}' (expected 6 or 8 digits)")]
    UnsupportedHexLength { value: String },

    /// A hex literal with a non-hex character.
    #[error("invalid hex digit in '{value}'")]
    InvalidHexDigit { value: String },

    /// The reference chain loops or exceeds the hop limit.
    #[error("reference chain is cyclic or too deep: {}", chain.join(" -> "))]
    CycleOrTooDeep { chain: Vec<String> },
}

impl From<FormatError> for ResolutionErrorKind {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::UnsupportedLength { value } => {
                ResolutionErrorKind::UnsupportedHexLength { value }
            }
            FormatError::InvalidDigit { value } => ResolutionErrorKind::InvalidHexDigit { value },
        }
    }
}

/// A resolution failure, tagged with the token path when one is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionError {
    /// Dotted path of the token being resolved, if resolution started from a path.
    pub token: Option<String>,
    pub kind: ResolutionErrorKind,
}

impl ResolutionError {
    pub fn new(kind: ResolutionErrorKind) -> Self {
        Self { token: None, kind }
    }

    /// Attaches the token path, keeping an existing (outermost) one.
    pub fn at(mut self, token: impl Into<String>) -> Self {
        if self.token.is_none() {
            self.token = Some(token.into());
        }
        self
    }

    pub fn kind(&self) -> &ResolutionErrorKind {
        &self.kind
    }
}

impl std::fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.token {
            Some(token) => write!(f, "token '{}': {}", token, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for ResolutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<ResolutionErrorKind> for ResolutionError {
    fn from(kind: ResolutionErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<FormatError> for ResolutionError {
    fn from(err: FormatError) -> Self {
        Self::new(err.into())
    }
}

/// Failure to load a token document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML syntax error.
    #[error("failed to parse token document{}: {message}", location(path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// The top level is not a mapping.
    #[error("token document{} must be a mapping at the top level", location(path))]
    NotAMapping { path: Option<PathBuf> },

    /// A color entry with an invalid `value` or `alpha`.
    #[error("invalid entry '{token}'{}: {message}", location(path))]
    InvalidEntry {
        token: String,
        message: String,
        path: Option<PathBuf>,
    },
}

impl DocumentError {
    /// Records the source file on errors raised while parsing its content.
    pub(crate) fn with_path(self, file: PathBuf) -> Self {
        match self {
            DocumentError::Parse { path: None, message } => DocumentError::Parse {
                path: Some(file),
                message,
            },
            DocumentError::NotAMapping { path: None } => {
                DocumentError::NotAMapping { path: Some(file) }
            }
            DocumentError::InvalidEntry {
                token,
                message,
                path: None,
            } => DocumentError::InvalidEntry {
                token,
                message,
                path: Some(file),
            },
            other => other,
        }
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

/// Any error raised by this crate.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("failed to read version file {}: {source}", path.display())]
    Version {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for token operations.
pub type Result<T> = std::result::Result<T, TokenError>;
