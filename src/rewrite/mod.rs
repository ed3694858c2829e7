//! Module path rewriting.
//!
//! Every `require(...)` the emitters produce routes its path through one
//! [`PathRewriter`], so a single rule governs imports and exports alike.

mod template;

use std::borrow::Cow;

use regex::Captures;

use crate::options::{NormalizedOptions, Replacement, TransformOptions};

/// Applies the caller's search/replace rule to module paths.
#[derive(Debug, Clone, Default)]
pub struct PathRewriter {
    options: NormalizedOptions,
}

impl PathRewriter {
    pub fn new(options: &TransformOptions) -> Self {
        Self::from_normalized(NormalizedOptions::normalize(options))
    }

    pub fn from_normalized(options: NormalizedOptions) -> Self {
        Self { options }
    }

    /// Rewrite the text of one module path (without its quotes).
    ///
    /// Only the first match is replaced unless the `g` flag was given.
    pub fn rewrite<'p>(&self, path: &'p str) -> Cow<'p, str> {
        let (Some(pattern), Some(replacement)) =
            (&self.options.pattern, &self.options.replacement)
        else {
            return Cow::Borrowed(path);
        };
        let limit = if self.options.global { 0 } else { 1 };

        let rewritten = match replacement {
            Replacement::Template(tpl) => pattern.replacen(path, limit, |caps: &Captures<'_>| {
                template::expand(tpl, caps, path)
            }),
            Replacement::Callback(callback) => {
                pattern.replacen(path, limit, |caps: &Captures<'_>| callback(caps))
            }
        };
        if let Cow::Owned(ref changed) = rewritten {
            tracing::trace!(from = path, to = %changed, "rewrote module path");
        }
        rewritten
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn rewriter(options: TransformOptions) -> PathRewriter {
        PathRewriter::new(&options)
    }

    #[test]
    fn test_no_options_is_identity() {
        let r = PathRewriter::default();
        assert_eq!(r.rewrite("./a"), "./a");
        assert!(matches!(r.rewrite("./a"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_match_without_replacement_is_identity() {
        let r = rewriter(TransformOptions::new().with_match("a"));
        assert_eq!(r.rewrite("./a"), "./a");
    }

    #[test]
    fn test_literal_replacement() {
        let r = rewriter(TransformOptions::new().with_match("m").with_replace_by("n"));
        assert_eq!(r.rewrite("m"), "n");
    }

    #[test]
    fn test_first_match_only_without_global_flag() {
        let r = rewriter(TransformOptions::new().with_match("a").with_replace_by("b"));
        assert_eq!(r.rewrite("a/a/a"), "b/a/a");

        let r = rewriter(
            TransformOptions::new()
                .with_match("a")
                .with_flags("g")
                .with_replace_by("b"),
        );
        assert_eq!(r.rewrite("a/a/a"), "b/b/b");
    }

    #[test]
    fn test_template_back_references() {
        let r = rewriter(
            TransformOptions::new()
                .with_match(r"^@(\w+)/(\w+)$")
                .with_replace_by("./vendor/$1-$2"),
        );
        assert_eq!(r.rewrite("@scope/pkg"), "./vendor/scope-pkg");
    }

    #[test]
    fn test_callback_replacement() {
        let r = rewriter(
            TransformOptions::new()
                .with_regex(Regex::new(r"\.(mjs|ts)$").unwrap())
                .with_replace_fn(|caps| format!(".{}.js", &caps[1])),
        );
        assert_eq!(r.rewrite("./a.ts"), "./a.ts.js");
        assert_eq!(r.rewrite("./a.cjs"), "./a.cjs");
    }

    #[test]
    fn test_escaped_match() {
        let r = rewriter(
            TransformOptions::new()
                .with_match("./")
                .with_escape_regexp(true)
                .with_replace_by("../"),
        );
        assert_eq!(r.rewrite("./a"), "../a");
        assert_eq!(r.rewrite("xya"), "xya");
    }

    #[test]
    fn test_invalid_pattern_leaves_paths_alone() {
        let r = rewriter(TransformOptions::new().with_match("(").with_replace_by("x"));
        assert_eq!(r.rewrite("(a)"), "(a)");
    }
}
