//! The two-pass transform: imports first, then exports over the result.

use std::ops::Range;

use crate::options::TransformOptions;
use crate::rewrite::PathRewriter;
use crate::scan::ModulePath;
use crate::{exports, imports};

/// Joins the statements one rewrite expands into.
pub(crate) const STATEMENT_SEPARATOR: &str = ";\n";

/// Counts of what one transform call rewrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Import statements rewritten.
    pub imports: usize,
    /// Export statements rewritten, namespace re-exports included.
    pub exports: usize,
    /// `export * from` statements rewritten.
    pub namespace_reexports: usize,
}

impl TransformReport {
    /// True when the source contained nothing to rewrite.
    pub fn is_unchanged(&self) -> bool {
        self.imports == 0 && self.exports == 0
    }

    pub fn merge(&mut self, other: TransformReport) {
        self.imports += other.imports;
        self.exports += other.exports;
        self.namespace_reexports += other.namespace_reexports;
    }
}

/// State threaded through both passes of one transform call.
#[derive(Debug)]
pub(crate) struct PassContext {
    rewriter: PathRewriter,
    next_uid: usize,
}

impl PassContext {
    pub(crate) fn new(rewriter: PathRewriter) -> Self {
        Self {
            rewriter,
            next_uid: 0,
        }
    }

    /// Next suffix for namespace re-export temporaries. Unique per call.
    pub(crate) fn next_uid(&mut self) -> usize {
        let uid = self.next_uid;
        self.next_uid += 1;
        uid
    }

    /// Render `require(<path>)` with the rewritten path and original quotes.
    pub(crate) fn require(&self, path: &ModulePath<'_>) -> String {
        format!("require({})", path.quoted_with(&self.rewriter.rewrite(path.value)))
    }
}

/// Replace each span with its text. Spans must be sorted and disjoint.
pub(crate) fn splice<I>(source: &str, edits: I) -> String
where
    I: IntoIterator<Item = (Range<usize>, String)>,
{
    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for (span, replacement) in edits {
        out.push_str(&source[last..span.start]);
        out.push_str(&replacement);
        last = span.end;
    }
    out.push_str(&source[last..]);
    out
}

/// Rewrite ES module `import`/`export` statements in `source` to CommonJS.
///
/// Statements the rewriter does not recognize are left as they are, so this
/// never fails. See [`transform_with_report`] for counts of what changed.
///
/// # Example
///
/// ```
/// use esm2cjs::{transform, TransformOptions};
///
/// let out = transform("import { a } from 'm'", &TransformOptions::default());
/// assert_eq!(out, "const { a } = require('m')");
/// ```
pub fn transform(source: &str, options: &TransformOptions) -> String {
    transform_with_report(source, options).0
}

/// Like [`transform`], also reporting how many statements were rewritten.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn transform_with_report(source: &str, options: &TransformOptions) -> (String, TransformReport) {
    let mut ctx = PassContext::new(PathRewriter::new(options));

    let (after_imports, imports) = imports::run_pass(source, &ctx);
    let (output, exports, namespace_reexports) = exports::run_pass(&after_imports, &mut ctx);

    let report = TransformReport {
        imports,
        exports,
        namespace_reexports,
    };
    tracing::debug!(?report, "transform finished");
    (output, report)
}
