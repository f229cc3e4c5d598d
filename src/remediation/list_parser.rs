//! Decode a stored cell that represents a list of strings.
//!
//! Cells come from tabular data that was never uniformly typed: a cell may be
//! missing, an actual array, a scalar, or text that looks like a list literal
//! (`"['Rest', 'Fluids']"`) without being guaranteed to be one. Bracketed text
//! goes through an ordered chain of strategies; each returns `None` on failure
//! and the last one always succeeds, so parsing never fails.

use serde_json::Value;

const QUOTES: &[char] = &['\'', '"'];

/// One way of reading bracketed list text. `None` hands over to the next.
pub type ListStrategy = fn(&str) -> Option<Vec<String>>;

/// Strategies for bracketed text, tried in order.
pub const LIST_STRATEGIES: &[(&str, ListStrategy)] = &[
    ("literal", parse_literal),
    ("quote_aware_scan", scan_quote_aware),
    ("naive_split", split_naive),
];

/// Parse any cell into trimmed, non-empty strings, preserving order.
pub fn parse_list(cell: &Value) -> Vec<String> {
    match cell {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().filter_map(cell_to_text).collect(),
        Value::String(text) => parse_list_text(text),
        other => cell_to_text(other).into_iter().collect(),
    }
}

/// Parse list text directly (bracketed literal or a bare single item).
pub fn parse_list_text(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if !(text.starts_with('[') && text.ends_with(']')) {
        return vec![text.to_string()];
    }

    for (name, strategy) in LIST_STRATEGIES {
        match strategy(text) {
            Some(items) => return items,
            None => tracing::debug!(strategy = *name, "List strategy failed, falling back"),
        }
    }

    Vec::new()
}

/// Scalar cell → trimmed text; `None` for null or blank.
pub fn cell_to_text(cell: &Value) -> Option<String> {
    let text = match cell {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    };
    (!text.is_empty()).then_some(text)
}

fn inner(bracketed: &str) -> Option<&str> {
    bracketed.strip_prefix('[')?.strip_suffix(']')
}

fn keep_non_blank<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    items
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

// ═══════════════════════════════════════════════════════════
// Strict literal parsing
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
enum Scalar {
    Str(String),
    /// Numeric and boolean literals keep their source text.
    Raw(String),
    Null,
}

/// Structural parse of a flat list literal: quoted strings with escapes,
/// numbers, `True`/`False`/`None`, optional trailing comma. Nothing is evaluated.
fn parse_literal(text: &str) -> Option<Vec<String>> {
    let mut reader = LiteralReader::new(text);
    let scalars = reader.list()?;
    Some(keep_non_blank(scalars.iter().filter_map(|s| match s {
        Scalar::Str(s) | Scalar::Raw(s) => Some(s.as_str()),
        Scalar::Null => None,
    })))
}

struct LiteralReader {
    chars: Vec<char>,
    pos: usize,
}

impl LiteralReader {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn list(&mut self) -> Option<Vec<Scalar>> {
        self.skip_whitespace();
        if self.bump()? != '[' {
            return None;
        }

        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(']') {
            self.pos += 1;
        } else {
            loop {
                items.push(self.scalar()?);
                self.skip_whitespace();
                match self.bump()? {
                    ',' => {
                        self.skip_whitespace();
                        if self.peek() == Some(']') {
                            self.pos += 1;
                            break;
                        }
                    }
                    ']' => break,
                    _ => return None,
                }
            }
        }

        self.skip_whitespace();
        (self.pos == self.chars.len()).then_some(items)
    }

    fn scalar(&mut self) -> Option<Scalar> {
        match self.peek()? {
            q @ ('\'' | '"') => self.quoted(q).map(Scalar::Str),
            c if c.is_ascii_alphabetic() => self.keyword(),
            c if c.is_ascii_digit() || matches!(c, '+' | '-' | '.') => self.number(),
            _ => None,
        }
    }

    fn quoted(&mut self, quote: char) -> Option<String> {
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.bump()? {
                '\\' => match self.bump()? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    '\n' => {}
                    c @ ('\\' | '\'' | '"') => out.push(c),
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                },
                c if c == quote => return Some(out),
                '\n' => return None,
                c => out.push(c),
            }
        }
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while self.peek().is_some_and(&keep) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn keyword(&mut self) -> Option<Scalar> {
        let word = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        match word.as_str() {
            "True" | "False" => Some(Scalar::Raw(word)),
            "None" => Some(Scalar::Null),
            _ => None,
        }
    }

    fn number(&mut self) -> Option<Scalar> {
        let raw = self.take_while(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E' | '_'));
        raw.replace('_', "")
            .parse::<f64>()
            .ok()
            .map(|_| Scalar::Raw(raw))
    }
}

// ═══════════════════════════════════════════════════════════
// Lenient fallbacks
// ═══════════════════════════════════════════════════════════

/// Split the inner content on commas outside quoted spans. A quote opens a
/// span only at the start of an item and must be closed by the same quote
/// character; an item like `Crohn's diet` therefore never opens one. A span
/// still open at the end keeps the items closed before it and only its own
/// tail is split on commas. Fails when the text is not bracketed.
fn scan_quote_aware(text: &str) -> Option<Vec<String>> {
    let body = inner(text)?;
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut open: Option<char> = None;

    for ch in body.chars() {
        match open {
            Some(quote) => {
                current.push(ch);
                if ch == quote {
                    open = None;
                }
            }
            None => match ch {
                ',' => segments.push(std::mem::take(&mut current)),
                '\'' | '"' if current.trim().is_empty() => {
                    open = Some(ch);
                    current.push(ch);
                }
                _ => current.push(ch),
            },
        }
    }

    if open.is_some() {
        segments.extend(current.split(',').map(String::from));
    } else {
        segments.push(current);
    }

    Some(keep_non_blank(
        segments.iter().map(|s| strip_quote_layer(s.trim())),
    ))
}

/// Remove one pair of matching quotes, or a lone quote at either end.
fn strip_quote_layer(s: &str) -> &str {
    for quote in QUOTES {
        if s.len() >= 2 && s.starts_with(*quote) && s.ends_with(*quote) {
            return &s[1..s.len() - 1];
        }
    }
    s.strip_prefix(QUOTES)
        .or_else(|| s.strip_suffix(QUOTES))
        .unwrap_or(s)
}

/// Last resort: plain comma split, quotes and whitespace trimmed per item.
fn split_naive(text: &str) -> Option<Vec<String>> {
    Some(keep_non_blank(
        inner(text).unwrap_or(text).split(',').map(|item| item.trim().trim_matches(QUOTES)),
    ))
}
