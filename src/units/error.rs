use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattingError {
    InvalidTemplate(String),
    SpecifierCount { found: usize },
    ArgumentMismatch(String),
    Allocation(String),
    LengthMismatch { expected: usize, actual: usize },
    Render(String),
}

impl fmt::Display for FormattingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormattingError::InvalidTemplate(msg) => write!(f, "Invalid template: {}", msg),
            FormattingError::SpecifierCount { found } => write!(
                f,
                "Template must contain exactly 2 conversions (quantity, unit), found {}",
                found
            ),
            FormattingError::ArgumentMismatch(msg) => write!(f, "Argument mismatch: {}", msg),
            FormattingError::Allocation(msg) => write!(f, "Allocation failed: {}", msg),
            FormattingError::LengthMismatch { expected, actual } => write!(
                f,
                "Rendered {} bytes but the dry run measured {}",
                actual, expected
            ),
            FormattingError::Render(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for FormattingError {}
