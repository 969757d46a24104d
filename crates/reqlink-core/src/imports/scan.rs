//! Specifier scanner.
//!
//! Finds the string literals a JavaScript/TypeScript file passes to
//! `require`, `import` and `export ... from` without parsing the file.
//! Comments and unrelated string literals are skipped.

use serde::Serialize;
use std::ops::Range;

/// Longest import/export clause scanned while looking for `from`.
const MAX_CLAUSE_LEN: usize = 1000;

/// How a specifier was referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// `require("x")`
    Require,
    /// `import a from "x"`
    Import,
    /// `import "x"`
    SideEffectImport,
    /// `import("x")`
    DynamicImport,
    /// `export { a } from "x"`, `export * from "x"`
    ExportFrom,
}

impl ImportKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Require => "require",
            Self::Import => "import",
            Self::SideEffectImport => "side_effect_import",
            Self::DynamicImport => "dynamic_import",
            Self::ExportFrom => "export_from",
        }
    }
}

/// A specifier found in source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSpecifier {
    /// Specifier text exactly as written between the quotes.
    pub raw: String,
    pub kind: ImportKind,
    /// 1-based line of the opening quote.
    pub line: u32,
    /// Byte range of `raw` within the source (quotes excluded).
    pub span: Range<usize>,
}

/// Scan source code for specifiers.
///
/// Every occurrence is reported, in source order.
#[must_use]
pub fn scan_imports(source: &str) -> Vec<ImportSpecifier> {
    let mut scanner = Scanner::new(source);
    let mut found = Vec::new();

    while let Some((kind, span)) = scanner.next_specifier() {
        found.push((kind, span));
    }

    let mut lines = LineCounter::new(source);
    found
        .into_iter()
        .map(|(kind, span)| ImportSpecifier {
            raw: source[span.clone()].to_string(),
            kind,
            line: lines.line_of(span.start.saturating_sub(1)),
            span,
        })
        .collect()
}

struct Scanner<'s> {
    bytes: &'s [u8],
    pos: usize,
}

impl<'s> Scanner<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn next_specifier(&mut self) -> Option<(ImportKind, Range<usize>)> {
        while let Some(b) = self.peek() {
            if self.skip_comment() {
                continue;
            }

            match b {
                b'"' | b'\'' | b'`' => {
                    self.skip_string();
                }
                b'r' if self.at_keyword("require") => {
                    self.pos += "require".len();
                    if let Some(span) = self.call_argument() {
                        return Some((ImportKind::Require, span));
                    }
                }
                b'i' if self.at_keyword("import") => {
                    self.pos += "import".len();
                    if let Some(found) = self.import_clause() {
                        return Some(found);
                    }
                }
                b'e' if self.at_keyword("export") => {
                    self.pos += "export".len();
                    if let Some(span) = self.from_clause() {
                        return Some((ImportKind::ExportFrom, span));
                    }
                }
                _ => self.pos += 1,
            }
        }
        None
    }

    /// After `import`: dynamic, side-effect or `... from "x"`.
    fn import_clause(&mut self) -> Option<(ImportKind, Range<usize>)> {
        self.skip_trivia();
        match self.peek()? {
            b'(' => self
                .call_argument()
                .map(|span| (ImportKind::DynamicImport, span)),
            b'"' | b'\'' => self.string_literal().map(|span| (ImportKind::SideEffectImport, span)),
            _ => self.from_clause().map(|span| (ImportKind::Import, span)),
        }
    }

    /// `(` "x" `)` directly after a keyword.
    fn call_argument(&mut self) -> Option<Range<usize>> {
        self.skip_trivia();
        if self.peek()? != b'(' {
            return None;
        }
        self.pos += 1;
        self.skip_trivia();
        let span = self.string_literal()?;
        self.skip_trivia();
        // `require("a" + b)` is not a static specifier.
        matches!(self.peek(), Some(b')' | b',')).then_some(span)
    }

    /// Scan an import/export clause up to `from "x"`, stopping at `;`.
    fn from_clause(&mut self) -> Option<Range<usize>> {
        let limit = (self.pos + MAX_CLAUSE_LEN).min(self.bytes.len());

        while self.pos < limit {
            if self.skip_comment() {
                continue;
            }
            match self.bytes[self.pos] {
                b';' | b'"' | b'\'' | b'`' | b'=' | b'(' => return None,
                b'i' | b'e' if self.at_keyword("import") || self.at_keyword("export") => {
                    return None;
                }
                b'f' if self.at_keyword("from") => {
                    self.pos += "from".len();
                    self.skip_trivia();
                    if matches!(self.peek(), Some(b'"' | b'\'')) {
                        return self.string_literal();
                    }
                }
                _ => self.pos += 1,
            }
        }
        None
    }

    /// Read a single- or double-quoted literal at the cursor.
    ///
    /// Returns the span between the quotes. Template literals and strings
    /// broken by a newline yield `None`.
    fn string_literal(&mut self) -> Option<Range<usize>> {
        let quote = self.peek()?;
        if quote != b'"' && quote != b'\'' {
            return None;
        }
        let start = self.pos + 1;
        let end = self.skip_string()?;
        Some(start..end)
    }

    /// Skip the string literal at the cursor, returning the offset of its
    /// closing quote if it was terminated.
    fn skip_string(&mut self) -> Option<usize> {
        let quote = self.bytes[self.pos];
        self.pos += 1;

        while let Some(b) = self.peek() {
            match b {
                b'\\' => self.pos += 2,
                b'\n' if quote != b'`' => return None,
                _ if b == quote => {
                    let end = self.pos;
                    self.pos += 1;
                    return Some(end);
                }
                _ => self.pos += 1,
            }
        }
        self.pos = self.pos.min(self.bytes.len());
        None
    }

    fn skip_comment(&mut self) -> bool {
        if self.peek() != Some(b'/') {
            return false;
        }
        match self.bytes.get(self.pos + 1) {
            Some(b'/') => {
                while self.peek().is_some_and(|b| b != b'\n') {
                    self.pos += 1;
                }
                true
            }
            Some(b'*') => {
                self.pos += 2;
                while self.pos < self.bytes.len() && !self.bytes[self.pos..].starts_with(b"*/") {
                    self.pos += 1;
                }
                self.pos = (self.pos + 2).min(self.bytes.len());
                true
            }
            _ => false,
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
                self.pos += 1;
            }
            if !self.skip_comment() {
                break;
            }
        }
    }

    /// Keyword at the cursor with identifier boundaries on both sides.
    /// A preceding `.` means member access (`foo.require`), not a keyword.
    fn at_keyword(&self, keyword: &str) -> bool {
        if !self.bytes[self.pos..].starts_with(keyword.as_bytes()) {
            return false;
        }
        if self.pos > 0 {
            let prev = self.bytes[self.pos - 1];
            if is_ident_byte(prev) || prev == b'.' {
                return false;
            }
        }
        !self
            .bytes
            .get(self.pos + keyword.len())
            .is_some_and(|&b| is_ident_byte(b))
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

/// Maps increasing byte offsets to 1-based line numbers in one pass.
struct LineCounter<'s> {
    bytes: &'s [u8],
    offset: usize,
    line: u32,
}

impl<'s> LineCounter<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            bytes: source.as_bytes(),
            offset: 0,
            line: 1,
        }
    }

    fn line_of(&mut self, offset: usize) -> u32 {
        let offset = offset.min(self.bytes.len());
        if offset > self.offset {
            let newlines = self.bytes[self.offset..offset]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            self.line += newlines as u32;
            self.offset = offset;
        }
        self.line
    }
}
