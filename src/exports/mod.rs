//! Export statement recognition and rewriting.
//!
//! Like imports, an export is recognized only when `export` starts a line.
//! Shapes are tried in a fixed order and the first one that fits wins:
//!
//! 1. `export default VALUE`
//! 2. `export { a, b as c }` with an optional `from 'm'`
//! 3. `export function f`, `export async function f`, `export class C`
//! 4. `export * from 'm'` and `export * as ns from 'm'`
//! 5. `export const|let|var NAME`
//! 6. `export NAME` on its own
//!
//! Anything else (`export interface`, destructuring declarations, ...) is
//! passed through untouched.

mod emit;

use std::ops::Range;

use crate::scan::{line_starts, Cursor, ModulePath, Specifier};
use crate::transform::{splice, PassContext};

pub(crate) use emit::emit_export;

/// The classified shape of an export statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportKind<'a> {
    /// `export default VALUE`. Only the `export default ` prefix is
    /// replaced, along with any line breaks before the value; `value` is
    /// the first line of what follows.
    Default { value: &'a str },
    /// `export { ... }`, re-exported when `from` is set.
    Named {
        specifiers: Vec<Specifier<'a>>,
        from: Option<ModulePath<'a>>,
    },
    /// `export function NAME` or `export class NAME`. Only the `export`
    /// keyword is replaced; the declaration stays as written.
    Declaration { name: &'a str },
    /// `export * from 'm'`. The alias of `export * as ns` is dropped.
    Namespace {
        alias: Option<&'a str>,
        from: ModulePath<'a>,
    },
    /// `export const NAME`. The initializer that follows is kept.
    Variable { name: &'a str },
    /// `export NAME`
    Identifier { name: &'a str },
}

/// A recognized export statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportStatement<'a> {
    /// Byte range replaced by the rewrite.
    pub span: Range<usize>,
    /// Line number in the source (1-indexed).
    pub line: usize,
    pub kind: ExportKind<'a>,
}

/// Find every export statement in `source`, top to bottom.
pub fn find_exports(source: &str) -> Vec<ExportStatement<'_>> {
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

/// Rewrite every export in `source`. Returns the new text, the number of
/// statements rewritten and how many of them were namespace re-exports.
pub(crate) fn run_pass(source: &str, ctx: &mut PassContext) -> (String, usize, usize) {
    let statements = find_exports(source);
    let namespaces = statements
        .iter()
        .filter(|s| matches!(s.kind, ExportKind::Namespace { .. }))
        .count();
    tracing::debug!(count = statements.len(), namespaces, "export pass");

    let output = splice(
        source,
        statements.iter().map(|statement| {
            tracing::trace!(line = statement.line, kind = ?statement.kind, "rewriting export");
            (statement.span.clone(), emit_export(&statement.kind, ctx))
        }),
    );
    (output, statements.len(), namespaces)
}

fn recognize(source: &str, start: usize, line: usize) -> Option<ExportStatement<'_>> {
    let mut cursor = Cursor::new(source, start);
    if !cursor.eat_keyword("export") {
        return None;
    }
    let spaced = cursor.skip_ws();
    let keyword_end = cursor.pos();

    let kind = if cursor.eat_keyword("default") {
        cursor.skip_ws();
        let rest = &source[cursor.pos()..];
        let value = rest.lines().next().unwrap_or("").trim_end();
        if value.is_empty() {
            return None;
        }
        ExportKind::Default { value }
    } else {
        match cursor.peek()? {
            b'{' => named_clause(&mut cursor)?,
            b'*' => namespace_clause(&mut cursor)?,
            _ if spaced => {
                let word = cursor.ident()?;
                match word {
                    "function" | "async" | "class" => {
                        let name = declaration_name(&mut cursor, word)?;
                        return Some(ExportStatement {
                            span: start..keyword_end,
                            line,
                            kind: ExportKind::Declaration { name },
                        });
                    }
                    "const" | "let" | "var" => {
                        if !cursor.skip_ws() {
                            return None;
                        }
                        ExportKind::Variable {
                            name: cursor.ident()?,
                        }
                    }
                    _ if cursor.at_statement_end() => ExportKind::Identifier { name: word },
                    _ => return None,
                }
            }
            _ => return None,
        }
    };

    Some(ExportStatement {
        span: start..cursor.pos(),
        line,
        kind,
    })
}

fn named_clause<'a>(cursor: &mut Cursor<'a>) -> Option<ExportKind<'a>> {
    let specifiers = cursor.brace_list()?;
    let mut ahead = cursor.clone();
    ahead.skip_ws();
    let from = if ahead.eat_keyword("from") {
        ahead.skip_ws();
        let path = ahead.module_path()?;
        *cursor = ahead;
        Some(path)
    } else {
        None
    };
    Some(ExportKind::Named { specifiers, from })
}

fn namespace_clause<'a>(cursor: &mut Cursor<'a>) -> Option<ExportKind<'a>> {
    if !cursor.eat(b'*') {
        return None;
    }
    cursor.skip_ws();
    let alias = if cursor.eat_keyword("as") {
        cursor.skip_ws();
        let alias = cursor.ident()?;
        cursor.skip_ws();
        Some(alias)
    } else {
        None
    };
    if !cursor.eat_keyword("from") {
        return None;
    }
    cursor.skip_ws();
    let from = cursor.module_path()?;
    Some(ExportKind::Namespace { alias, from })
}

/// Reads the declared name after `function`, `async function`,
/// `function*` or `class`. The cursor sits right after `word`.
fn declaration_name<'a>(cursor: &mut Cursor<'a>, word: &str) -> Option<&'a str> {
    match word {
        "class" => {
            if !cursor.skip_ws() {
                return None;
            }
        }
        "async" => {
            if !cursor.skip_ws() || !cursor.eat_keyword("function") {
                return None;
            }
            cursor.skip_ws();
            cursor.eat(b'*');
            cursor.skip_ws();
        }
        _ => {
            cursor.skip_ws();
            cursor.eat(b'*');
            cursor.skip_ws();
        }
    }
    cursor.ident()
}
