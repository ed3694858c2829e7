//! Line scanner shared by the import and export recognizers.
//!
//! The recognizers never tokenize the whole file. They visit every line
//! start, try to read one statement shape from there, and either produce a
//! classified statement or give up and let the text pass through.

/// A quoted module path as written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModulePath<'a> {
    /// The quote character: `'`, `"` or `` ` ``.
    pub quote: char,
    /// The text between the quotes.
    pub value: &'a str,
}

impl ModulePath<'_> {
    /// Render the literal with its original quotes around `value`.
    pub fn quoted_with(&self, value: &str) -> String {
        format!("{q}{value}{q}", q = self.quote)
    }
}

/// A `name` or `name as alias` item from a brace list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Specifier<'a> {
    /// The name on the left of `as`.
    pub name: &'a str,
    /// The name on the right of `as`, if written.
    pub alias: Option<&'a str>,
}

impl<'a> Specifier<'a> {
    /// The name this item binds: the alias if present, otherwise the name.
    pub fn local(&self) -> &'a str {
        self.alias.unwrap_or(self.name)
    }

    pub fn is_aliased(&self) -> bool {
        self.alias.is_some()
    }
}

pub(crate) fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Every line start in `text` as `(line, offset)`, line 1-indexed.
pub(crate) fn line_starts(text: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    std::iter::once(0)
        .chain(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1)
                .filter(move |&i| i < text.len()),
        )
        .enumerate()
        .map(|(index, offset)| (index + 1, offset))
}

/// Forward-only reader over a statement candidate.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    pub(crate) fn starts_with(&self, s: &str) -> bool {
        self.text[self.pos..].starts_with(s)
    }

    /// Skip spaces, tabs, and line breaks. Returns whether anything was skipped.
    pub(crate) fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
        self.pos > start
    }

    /// Skip spaces and tabs only.
    pub(crate) fn skip_inline_ws(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.pos += 1;
        }
        self.pos > start
    }

    pub(crate) fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `kw` only when it is a whole word.
    pub(crate) fn eat_keyword(&mut self, kw: &str) -> bool {
        if !self.starts_with(kw) {
            return false;
        }
        let end = self.pos + kw.len();
        if self.bytes().get(end).is_some_and(|&b| is_ident_byte(b)) {
            return false;
        }
        self.pos = end;
        true
    }

    pub(crate) fn ident(&mut self) -> Option<&'a str> {
        let text = self.text;
        let start = self.pos;
        while self.peek().is_some_and(is_ident_byte) {
            self.pos += 1;
        }
        let end = self.pos;
        (end > start).then(|| &text[start..end])
    }

    /// Read a quoted module path. Quotes must match and the path may not
    /// contain a line break.
    pub(crate) fn module_path(&mut self) -> Option<ModulePath<'a>> {
        let quote = match self.peek()? {
            q @ (b'\'' | b'"' | b'`') => q,
            _ => return None,
        };
        let start = self.pos + 1;
        let len = self.text[start..].find(|c: char| c == quote as char || c == '\n')?;
        let end = start + len;
        if len == 0 || self.bytes()[end] != quote {
            return None;
        }
        self.pos = end + 1;
        Some(ModulePath {
            quote: quote as char,
            value: &self.text[start..end],
        })
    }

    /// Read a `{ ... }` list (possibly across lines) and split it into
    /// specifiers. Empty items from trailing commas are dropped; any item
    /// that is not `ident` or `ident as ident` fails the whole list.
    pub(crate) fn brace_list(&mut self) -> Option<Vec<Specifier<'a>>> {
        if self.peek() != Some(b'{') {
            return None;
        }
        let start = self.pos + 1;
        let len = self.text[start..].find(['}', '{', ';'])?;
        let end = start + len;
        if self.bytes()[end] != b'}' {
            return None;
        }
        self.pos = end + 1;
        self.text[start..end]
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(parse_specifier)
            .collect()
    }

    /// True when only inline whitespace separates the cursor from `;`, a
    /// line break, a trailing `//` comment, or the end of input.
    pub(crate) fn at_statement_end(&self) -> bool {
        let mut ahead = self.clone();
        ahead.skip_inline_ws();
        match ahead.peek() {
            None | Some(b';' | b'\n' | b'\r') => true,
            Some(b'/') => ahead.starts_with("//"),
            _ => false,
        }
    }
}

fn parse_specifier(item: &str) -> Option<Specifier<'_>> {
    let mut words = item.split_whitespace();
    let name = words.next().filter(|w| is_ident(w))?;
    match (words.next(), words.next(), words.next()) {
        (None, _, _) => Some(Specifier { name, alias: None }),
        (Some("as"), Some(alias), None) if is_ident(alias) => Some(Specifier {
            name,
            alias: Some(alias),
        }),
        _ => None,
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_ident_byte)
}
