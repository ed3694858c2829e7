//! Import statement recognition and rewriting.
//!
//! An import is recognized only when the `import` keyword starts a line.
//! Indented imports, imports after other code on the same line, and anything
//! inside a comment are left alone.
//!
//! # Supported shapes
//!
//! | Source                                  | Binding                       |
//! |-----------------------------------------|-------------------------------|
//! | `import 'm'`                            | [`ImportBinding::SideEffect`] |
//! | `import x from 'm'`                     | [`ImportBinding::Default`]    |
//! | `import * as ns from 'm'`               | [`ImportBinding::Namespace`]  |
//! | `import { a, b as c } from 'm'`         | [`ImportBinding::Named`]      |
//! | `import x, { a } from 'm'`              | [`ImportBinding::DefaultAndNamed`] |
//! | `import x, * as ns from 'm'`            | [`ImportBinding::DefaultAndNamespace`] |

mod emit;

use std::ops::Range;

use crate::scan::{line_starts, Cursor, ModulePath, Specifier};
use crate::transform::{splice, PassContext};

pub(crate) use emit::emit_import;

/// What an import statement binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportBinding<'a> {
    /// `import 'm'`
    SideEffect,
    /// `import x from 'm'`
    Default(&'a str),
    /// `import * as ns from 'm'`, or `import * from 'm'` with no name.
    Namespace(Option<&'a str>),
    /// `import { a, b as c } from 'm'`
    Named(Vec<Specifier<'a>>),
    /// `import x, { a } from 'm'`
    DefaultAndNamed {
        default: &'a str,
        named: Vec<Specifier<'a>>,
    },
    /// `import x, * as ns from 'm'`
    DefaultAndNamespace {
        default: &'a str,
        namespace: Option<&'a str>,
    },
}

/// A recognized import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement<'a> {
    /// Byte range replaced by the rewrite. A trailing `;` is not included.
    pub span: Range<usize>,
    /// Line number in the source (1-indexed).
    pub line: usize,
    pub binding: ImportBinding<'a>,
    pub path: ModulePath<'a>,
}

/// Find every import statement in `source`, top to bottom.
pub fn find_imports(source: &str) -> Vec<ImportStatement<'_>> {
    let mut found = Vec::new();
    let mut resume = 0;

    for (line, start) in line_starts(source) {
        if start < resume {
            continue;
        }
        if let Some(statement) = recognize(source, start, line) {
            resume = statement.span.end;
            found.push(statement);
        }
    }

    found
}

/// Rewrite every import in `source`. Returns the new text and the number of
/// statements rewritten.
pub(crate) fn run_pass(source: &str, ctx: &PassContext) -> (String, usize) {
    let statements = find_imports(source);
    tracing::debug!(count = statements.len(), "import pass");

    let output = splice(
        source,
        statements.iter().map(|statement| {
            let require = ctx.require(&statement.path);
            tracing::trace!(line = statement.line, binding = ?statement.binding, "rewriting import");
            (statement.span.clone(), emit_import(&statement.binding, &require))
        }),
    );
    (output, statements.len())
}

fn recognize(source: &str, start: usize, line: usize) -> Option<ImportStatement<'_>> {
    let mut cursor = Cursor::new(source, start);
    if !cursor.eat_keyword("import") || !cursor.skip_ws() {
        return None;
    }

    let binding = if matches!(cursor.peek()?, b'\'' | b'"' | b'`') {
        ImportBinding::SideEffect
    } else {
        let binding = binding_clause(&mut cursor)?;
        cursor.skip_ws();
        if !cursor.eat_keyword("from") {
            return None;
        }
        cursor.skip_ws();
        binding
    };
    let path = cursor.module_path()?;

    Some(ImportStatement {
        span: start..cursor.pos(),
        line,
        binding,
        path,
    })
}

fn binding_clause<'a>(cursor: &mut Cursor<'a>) -> Option<ImportBinding<'a>> {
    match cursor.peek()? {
        b'{' => cursor.brace_list().map(ImportBinding::Named),
        b'*' => namespace_clause(cursor).map(ImportBinding::Namespace),
        _ => {
            let default = cursor.ident()?;
            let mut ahead = cursor.clone();
            ahead.skip_ws();
            if !ahead.eat(b',') {
                return Some(ImportBinding::Default(default));
            }
            ahead.skip_ws();
            let binding = match ahead.peek()? {
                b'{' => ImportBinding::DefaultAndNamed {
                    default,
                    named: ahead.brace_list()?,
                },
                b'*' => ImportBinding::DefaultAndNamespace {
                    default,
                    namespace: namespace_clause(&mut ahead)?,
                },
                _ => return None,
            };
            *cursor = ahead;
            Some(binding)
        }
    }
}

/// Reads `*` or `* as name`.
fn namespace_clause<'a>(cursor: &mut Cursor<'a>) -> Option<Option<&'a str>> {
    if !cursor.eat(b'*') {
        return None;
    }
    cursor.skip_ws();
    if !cursor.eat_keyword("as") {
        return Some(None);
    }
    cursor.skip_ws();
    cursor.ident().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(source: &str) -> ImportStatement<'_> {
        let mut found = find_imports(source);
        assert_eq!(found.len(), 1, "expected one import in {source:?}");
        found.remove(0)
    }

    #[test]
    fn test_side_effect_import() {
        let statement = only("import './styles.css';");
        assert_eq!(statement.binding, ImportBinding::SideEffect);
        assert_eq!(statement.path.value, "./styles.css");
        assert_eq!(statement.span, 0..21);
    }

    #[test]
    fn test_default_import() {
        let statement = only("import React from 'react';");
        assert_eq!(statement.binding, ImportBinding::Default("React"));
        assert_eq!(statement.path.quote, '\'');
    }

    #[test]
    fn test_namespace_import() {
        assert_eq!(
            only("import * as path from \"path\"").binding,
            ImportBinding::Namespace(Some("path"))
        );
        assert_eq!(only("import * from 'm'").binding, ImportBinding::Namespace(None));
    }

    #[test]
    fn test_named_imports() {
        let statement = only("import { useState, useEffect as effect } from 'react'");
        assert_eq!(
            statement.binding,
            ImportBinding::Named(vec![
                Specifier { name: "useState", alias: None },
                Specifier { name: "useEffect", alias: Some("effect") },
            ])
        );
    }

    #[test]
    fn test_default_and_named() {
        let statement = only("import React, { useState } from 'react'");
        assert_eq!(
            statement.binding,
            ImportBinding::DefaultAndNamed {
                default: "React",
                named: vec![Specifier { name: "useState", alias: None }],
            }
        );
    }

    #[test]
    fn test_default_and_namespace() {
        let statement = only("import React, * as all from 'react'");
        assert_eq!(
            statement.binding,
            ImportBinding::DefaultAndNamespace {
                default: "React",
                namespace: Some("all"),
            }
        );
    }

    #[test]
    fn test_multiline_brace_list() {
        let source = "import {\n  a,\n  b as c,\n} from './m';\nfoo();";
        let statement = only(source);
        assert_eq!(statement.line, 1);
        assert_eq!(&source[statement.span.clone()], "import {\n  a,\n  b as c,\n} from './m'");
    }

    #[test]
    fn test_line_numbers() {
        let source = "// header\nimport a from 'a';\n\nimport 'b';\n";
        let found = find_imports(source);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].line, 2);
        assert_eq!(found[1].line, 4);
    }

    #[test]
    fn test_line_numbers_in_large_file() {
        let mut source = String::new();
        for i in 0..5_000 {
            source.push_str(&format!("import a{i} from './a{i}';\n// spacer\n"));
        }
        let found = find_imports(&source);
        assert_eq!(found.len(), 5_000);
        for (i, statement) in found.iter().enumerate() {
            assert_eq!(statement.line, 2 * i + 1);
        }
    }

    #[test]
    fn test_ignored_forms() {
        let ignored = [
            "  import a from 'a'",
            "// import a from 'a'",
            " * import a from 'a'",
            "const x = 1; import a from 'a'",
            "import('a')",
            "import.meta.url",
            "importer from 'a'",
            "import type { A } from 'a'",
            "import { a: b } from 'a'",
            "import a from a",
            "import a, b from 'a'",
        ];
        for source in ignored {
            assert!(find_imports(source).is_empty(), "should ignore {source:?}");
        }
    }
}
