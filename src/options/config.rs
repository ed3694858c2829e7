//! JSON options files.
//!
//! The file format mirrors the option names used by the command line:
//!
//! ```json
//! { "match": "^~/", "replaceBy": "./src/", "flags": "g", "escapeRegExp": false }
//! ```
//!
//! Unlike [`crate::transform`], loading a file is strict: a pattern that does
//! not compile is an error here rather than a silent no-op.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{NormalizedOptions, PatternError, TransformOptions};

/// Errors that can occur while loading an options file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The `match` pattern does not compile with the given flags.
    #[error(transparent)]
    InvalidPattern(#[from] PatternError),
}

/// Result type alias for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// On-disk representation of [`TransformOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsFile {
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub match_pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,

    #[serde(rename = "replaceBy", default, skip_serializing_if = "Option::is_none")]
    pub replace_by: Option<String>,

    #[serde(rename = "escapeRegExp", default)]
    pub escape_regexp: bool,
}

impl OptionsFile {
    /// Convert into transform options, checking that the pattern compiles.
    pub fn into_options(self) -> ConfigResult<TransformOptions> {
        let options = TransformOptions::from(self);
        NormalizedOptions::try_normalize(&options)?;
        Ok(options)
    }
}

impl From<OptionsFile> for TransformOptions {
    fn from(file: OptionsFile) -> Self {
        let mut options = TransformOptions::new().with_escape_regexp(file.escape_regexp);
        if let Some(pattern) = file.match_pattern {
            options = options.with_match(pattern);
        }
        if let Some(flags) = file.flags {
            options = options.with_flags(flags);
        }
        if let Some(template) = file.replace_by {
            options = options.with_replace_by(template);
        }
        options
    }
}

/// Parses an options file from a string.
///
/// # Example
///
/// ```
/// use esm2cjs::options::config::parse_str;
///
/// let file = parse_str(r#"{"match": "^lodash$", "replaceBy": "lodash-es"}"#).unwrap();
/// assert_eq!(file.match_pattern.as_deref(), Some("^lodash$"));
/// ```
pub fn parse_str(content: &str) -> ConfigResult<OptionsFile> {
    let file: OptionsFile = serde_json::from_str(content)?;
    Ok(file)
}

/// Parses an options file from disk.
pub fn parse_file(path: &Path) -> ConfigResult<OptionsFile> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Reads, parses and validates an options file.
pub fn load(path: &Path) -> ConfigResult<TransformOptions> {
    let file = parse_file(path)?;
    tracing::debug!(path = %path.display(), ?file, "loaded options file");
    file.into_options()
}
