//! Caller-facing transform options.
//!
//! [`TransformOptions`] is what a caller hands to [`crate::transform`]. It is
//! deliberately loose: nothing here is validated until the options are
//! normalized, and normalization never fails (see [`NormalizedOptions`]).
//!
//! # Example
//!
//! ```
//! use esm2cjs::{transform, TransformOptions};
//!
//! let options = TransformOptions::new()
//!     .with_match(r"^\./lib/")
//!     .with_replace_by("./dist/");
//!
//! let out = transform("import x from './lib/x'", &options);
//! assert_eq!(out, "const x = require('./dist/x')");
//! ```

pub mod config;
mod normalize;

use std::fmt;
use std::sync::Arc;

use regex::{Captures, Regex};

pub use config::{ConfigError, ConfigResult, OptionsFile};
pub use normalize::{NormalizedOptions, PatternError};

/// Signature of a replacement callback. Receives the captures of one match,
/// the full match first.
pub type ReplaceFn = dyn Fn(&Captures<'_>) -> String + Send + Sync;

/// The pattern that selects what part of a module path gets rewritten.
#[derive(Debug, Clone)]
pub enum PathPattern {
    /// Pattern source, compiled with [`TransformOptions::flags`].
    Source(String),
    /// An already compiled pattern. Flags do not apply.
    Compiled(Regex),
}

/// What the matched part of a module path is replaced by.
#[derive(Clone)]
pub enum Replacement {
    /// Template with `$&`, `$1`, `$<name>`, `` $` ``, `$'` and `$$` placeholders.
    Template(String),
    /// Called once per match.
    Callback(Arc<ReplaceFn>),
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Replacement::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// Options for one transform call.
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    /// Pattern matched against each module path. `None` disables rewriting.
    pub match_pattern: Option<PathPattern>,
    /// Pattern flags (`g`, `i`, `m`, `s`, `u`, `y`), used only with
    /// [`PathPattern::Source`].
    pub flags: Option<String>,
    /// Treat a [`PathPattern::Source`] as a literal string.
    pub escape_regexp: bool,
    /// Replacement for matched text. `None` leaves paths unchanged.
    pub replace_by: Option<Replacement>,
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_match(mut self, pattern: impl Into<String>) -> Self {
        self.match_pattern = Some(PathPattern::Source(pattern.into()));
        self
    }

    pub fn with_regex(mut self, regex: Regex) -> Self {
        self.match_pattern = Some(PathPattern::Compiled(regex));
        self
    }

    pub fn with_flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into());
        self
    }

    pub fn with_escape_regexp(mut self, escape: bool) -> Self {
        self.escape_regexp = escape;
        self
    }

    pub fn with_replace_by(mut self, template: impl Into<String>) -> Self {
        self.replace_by = Some(Replacement::Template(template.into()));
        self
    }

    pub fn with_replace_fn<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Captures<'_>) -> String + Send + Sync + 'static,
    {
        self.replace_by = Some(Replacement::Callback(Arc::new(callback)));
        self
    }
}
