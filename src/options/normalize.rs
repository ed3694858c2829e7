//! Options normalization: turns loose [`TransformOptions`] into a compiled
//! pattern plus replacement, or into a no-op.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use super::{PathPattern, Replacement, TransformOptions};

/// Why a pattern could not be compiled.
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Unsupported pattern flag: '{0}'")]
    UnknownFlag(char),
}

/// Options in the form the path rewriter consumes.
///
/// `pattern == None` is the never-matches state; `replacement == None` makes
/// every substitution a no-op.
#[derive(Debug, Clone, Default)]
pub struct NormalizedOptions {
    pub(crate) pattern: Option<Regex>,
    pub(crate) global: bool,
    pub(crate) replacement: Option<Replacement>,
}

impl NormalizedOptions {
    /// Normalize without failing. A pattern that does not compile disables
    /// path rewriting and is reported with a warning.
    pub fn normalize(options: &TransformOptions) -> Self {
        match Self::try_normalize(options) {
            Ok(normalized) => normalized,
            Err(err) => {
                tracing::warn!(error = %err, "path rewriting disabled");
                Self {
                    pattern: None,
                    global: false,
                    replacement: options.replace_by.clone(),
                }
            }
        }
    }

    /// Normalize, surfacing pattern errors instead of degrading.
    pub fn try_normalize(options: &TransformOptions) -> Result<Self, PatternError> {
        let (pattern, global) = match &options.match_pattern {
            Some(PathPattern::Source(source)) => {
                let source = if options.escape_regexp {
                    regex::escape(source)
                } else {
                    source.clone()
                };
                let (regex, global) = compile(&source, options.flags.as_deref().unwrap_or(""))?;
                (Some(regex), global)
            }
            Some(PathPattern::Compiled(regex)) => (Some(regex.clone()), false),
            None => (None, false),
        };

        Ok(Self {
            pattern,
            global,
            replacement: options.replace_by.clone(),
        })
    }

    /// True when rewriting can never change a path.
    pub fn is_noop(&self) -> bool {
        self.pattern.is_none() || self.replacement.is_none()
    }

    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    pub fn is_global(&self) -> bool {
        self.global
    }
}

fn compile(source: &str, flags: &str) -> Result<(Regex, bool), PatternError> {
    let mut builder = RegexBuilder::new(source);
    let mut global = false;
    for flag in flags.chars() {
        match flag {
            'g' => global = true,
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            // Unicode is always on; sticky has no meaning for a single replace.
            'u' | 'y' => {}
            other => return Err(PatternError::UnknownFlag(other)),
        }
    }
    Ok((builder.build()?, global))
}
