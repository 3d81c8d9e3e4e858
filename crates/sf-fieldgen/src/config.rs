//! Generator configuration.

use std::path::PathBuf;

use crate::error::{Error, ErrorKind, Result};
use crate::types::DEFAULT_API_VERSION;

/// Configuration for a generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Root of the Salesforce project that receives the generated files.
    pub project_root: PathBuf,
    /// Delimiters used by the input sheet.
    pub delimiters: Delimiters,
    /// Encoding of the input file.
    pub encoding: TextEncoding,
    /// API version written into the package manifest.
    pub api_version: String,
    /// Drop repeated `<object>.<field>` members from the manifest.
    pub dedupe_members: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            delimiters: Delimiters::default(),
            encoding: TextEncoding::Utf8,
            api_version: DEFAULT_API_VERSION.to_string(),
            dedupe_members: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a new generator config builder.
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }
}

/// Builder for GeneratorConfig.
#[derive(Debug, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Set the project root.
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.project_root = root.into();
        self
    }

    /// Set the input delimiters.
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.config.delimiters = delimiters;
        self
    }

    /// Set the input encoding.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.config.encoding = encoding;
        self
    }

    /// Set the manifest API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    /// Enable or disable manifest member deduplication.
    pub fn with_dedupe_members(mut self, enabled: bool) -> Self {
        self.config.dedupe_members = enabled;
        self
    }

    /// Build the generator configuration.
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}

/// Field, row and quote delimiters of an input sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    /// Separator between cells.
    pub field: u8,
    /// Separator between rows.
    pub row: RowDelimiter,
    /// Quote character that lets a cell contain the field delimiter.
    pub quote: u8,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::semicolon()
    }
}

impl Delimiters {
    /// Semicolon-separated cells, one row per line.
    pub fn semicolon() -> Self {
        Self {
            field: b';',
            row: RowDelimiter::LineEnding,
            quote: b'"',
        }
    }

    /// Comma-separated cells, one row per line.
    pub fn comma() -> Self {
        Self {
            field: b',',
            ..Self::semicolon()
        }
    }

    /// Use a custom row delimiter.
    pub fn with_row(mut self, row: RowDelimiter) -> Self {
        self.row = row;
        self
    }
}

/// How rows are separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowDelimiter {
    /// `\n`, `\r\n` or `\r`.
    #[default]
    LineEnding,
    /// A single custom byte.
    Byte(u8),
}

/// Text encodings accepted for the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
}

impl TextEncoding {
    /// Decode raw file bytes.
    pub fn decode(&self, bytes: Vec<u8>) -> Result<String> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes).map_err(|e| {
                Error::new(ErrorKind::InvalidEncoding(format!(
                    "input is not valid UTF-8: {}",
                    e.utf8_error()
                )))
            }),
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "utf-8"),
        }
    }
}

impl std::str::FromStr for TextEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            _ => Err(Error::new(ErrorKind::UnsupportedEncoding(s.to_string()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.api_version, "62.0");
        assert_eq!(config.delimiters, Delimiters::semicolon());
        assert!(!config.dedupe_members);
    }

    #[test]
    fn test_builder() {
        let config = GeneratorConfig::builder()
            .with_project_root("/tmp/project")
            .with_delimiters(Delimiters::comma())
            .with_api_version("61.0")
            .with_dedupe_members(true)
            .build();

        assert_eq!(config.project_root, PathBuf::from("/tmp/project"));
        assert_eq!(config.delimiters.field, b',');
        assert_eq!(config.api_version, "61.0");
        assert!(config.dedupe_members);
    }

    #[test]
    fn test_encoding_parse() {
        assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("utf8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);

        let err = "latin1".parse::<TextEncoding>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnsupportedEncoding(_)));
    }

    #[test]
    fn test_encoding_rejects_invalid_bytes() {
        let err = TextEncoding::Utf8.decode(vec![0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidEncoding(_)));
    }

    #[test]
    fn test_custom_row_delimiter() {
        let delimiters = Delimiters::semicolon().with_row(RowDelimiter::Byte(b'~'));
        assert_eq!(delimiters.row, RowDelimiter::Byte(b'~'));
        assert_eq!(delimiters.field, b';');
    }
}
