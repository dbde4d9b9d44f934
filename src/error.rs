use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configuration operations
pub type ParseResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading, querying or saving a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A line matched none of the INI line forms (strict mode only)
    #[error("Syntax error on line {line}")]
    MalformedLine { line: usize },

    /// Section already present
    #[error("Duplicate section \"{section}\"{}", on_line(.line))]
    DuplicateSection {
        section: String,
        line: Option<usize>,
    },

    /// Key already present in its section
    #[error("Duplicate key \"{key}\" in section \"{section}\"{}", on_line(.line))]
    DuplicateKey {
        section: String,
        key: String,
        line: Option<usize>,
    },

    /// Section not found
    #[error("Section \"{section}\" not found")]
    UnknownSection { section: String },

    /// Key not found in an existing section
    #[error("Key \"{key}\" not found in section \"{section}\"")]
    UnknownKey { section: String, key: String },

    /// File I/O error
    #[error("I/O error for '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn on_line(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" on line {}", line),
        None => String::new(),
    }
}

impl ConfigError {
    /// Create a malformed line error
    pub fn malformed(line: usize) -> Self {
        ConfigError::MalformedLine { line }
    }

    /// Create a duplicate section error
    pub fn duplicate_section(section: impl Into<String>, line: Option<usize>) -> Self {
        ConfigError::DuplicateSection {
            section: section.into(),
            line,
        }
    }

    /// Create a duplicate key error
    pub fn duplicate_key(
        section: impl Into<String>,
        key: impl Into<String>,
        line: Option<usize>,
    ) -> Self {
        ConfigError::DuplicateKey {
            section: section.into(),
            key: key.into(),
            line,
        }
    }

    /// Create an unknown section error
    pub fn unknown_section(section: impl Into<String>) -> Self {
        ConfigError::UnknownSection {
            section: section.into(),
        }
    }

    /// Create an unknown key error
    pub fn unknown_key(section: impl Into<String>, key: impl Into<String>) -> Self {
        ConfigError::UnknownKey {
            section: section.into(),
            key: key.into(),
        }
    }

    /// Create an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the source line to a duplicate error raised during a load
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            ConfigError::DuplicateSection { section, .. } => ConfigError::DuplicateSection {
                section,
                line: Some(line),
            },
            ConfigError::DuplicateKey { section, key, .. } => ConfigError::DuplicateKey {
                section,
                key,
                line: Some(line),
            },
            other => other,
        }
    }
}
