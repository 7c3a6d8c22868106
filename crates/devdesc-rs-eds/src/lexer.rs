// crates/devdesc-rs-eds/src/lexer.rs

//! Splits EDS text into `[Section]` headers and `key = field, field;` entries.
//!
//! The grammar handled here:
//! - `$` starts a comment that runs to the end of the line;
//! - an entry may span lines and ends at `;`;
//! - adjacent quoted literals (`"ab" "cd"`) are concatenated;
//! - `{ a, b }` groups nest.
//!
//! Problems are reported as `EDS-L*` diagnostics with line and column. The
//! lexer always makes progress, so damaged input still yields every entry it
//! can recognise.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use devdesc_rs::eds::EdsValue;
use devdesc_rs::{Diagnostic, SourceLocation};

/// One `key = fields;` entry with the position of its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub key: String,
    pub fields: Vec<EdsValue>,
    pub line: u32,
    pub column: u32,
}

/// A section header and the entries that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection {
    /// Header text without brackets, trimmed.
    pub name: String,
    pub line: u32,
    pub column: u32,
    pub entries: Vec<RawEntry>,
}

/// Result of [`lex`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexOutput {
    pub sections: Vec<RawSection>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Tokenizes a complete EDS file.
pub fn lex(text: &str) -> LexOutput {
    let mut lexer = Lexer::new(text);
    lexer.run();
    log::trace!(
        "lexed {} sections, {} diagnostics",
        lexer.sections.len(),
        lexer.diagnostics.len()
    );
    LexOutput {
        sections: lexer.sections,
        diagnostics: lexer.diagnostics,
    }
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    sections: Vec<RawSection>,
    diagnostics: Vec<Diagnostic>,
}

impl Lexer {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            sections: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Skips whitespace (line breaks included) and comments.
    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c == '$' {
                self.skip_line();
            } else if c.is_whitespace() || c == '\u{feff}' {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Advances to the next line break without consuming it.
    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn report(&mut self, diagnostic: Diagnostic, line: u32, column: u32) {
        let section = self.sections.last().map(|s| s.name.clone());
        let diagnostic = diagnostic.with_location(SourceLocation::at(section, line, column));
        log::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    fn run(&mut self) {
        loop {
            self.skip_trivia();
            match self.peek() {
                None => break,
                Some('[') => self.section_header(),
                Some(_) => self.entry(),
            }
        }
    }

    fn section_header(&mut self) {
        let (line, column) = (self.line, self.column);
        self.bump();
        let mut name = String::new();
        loop {
            match self.peek() {
                Some(']') => {
                    self.bump();
                    break;
                }
                Some('\n') | None => {
                    self.report(
                        Diagnostic::error(
                            "EDS-L004",
                            format!("unterminated section header '[{}'", name.trim()),
                        ),
                        line,
                        column,
                    );
                    break;
                }
                Some(c) => {
                    name.push(c);
                    self.bump();
                }
            }
        }
        self.sections.push(RawSection {
            name: String::from(name.trim()),
            line,
            column,
            entries: Vec::new(),
        });
    }

    fn entry(&mut self) {
        let (line, column) = (self.line, self.column);
        let mut key = String::new();
        loop {
            match self.peek() {
                Some('=') => {
                    self.bump();
                    break;
                }
                Some('\n') | Some(';') | Some('$') | None => {
                    self.report(
                        Diagnostic::error(
                            "EDS-L005",
                            format!("expected '=' after key '{}'", key.trim()),
                        ),
                        line,
                        column,
                    );
                    // Always consume something so the main loop advances.
                    if self.peek() == Some(';') {
                        self.bump();
                    }
                    self.skip_line();
                    return;
                }
                Some(c) => {
                    key.push(c);
                    self.bump();
                }
            }
        }

        let (fields, terminated) = self.fields(';');
        if !terminated {
            self.report(
                Diagnostic::warn(
                    "EDS-L002",
                    format!("entry '{}' is not terminated by ';'", key.trim()),
                ),
                line,
                column,
            );
        }

        let entry = RawEntry {
            key: String::from(key.trim()),
            fields,
            line,
            column,
        };
        match self.sections.last_mut() {
            Some(section) => section.entries.push(entry),
            None => self.report(
                Diagnostic::warn(
                    "EDS-L003",
                    format!("entry '{}' outside of any section is ignored", entry.key),
                ),
                line,
                column,
            ),
        }
    }

    /// Reads comma-separated fields up to `close`.
    ///
    /// Returns the fields and whether `close` was found.
    fn fields(&mut self, close: char) -> (Vec<EdsValue>, bool) {
        let mut fields = Vec::new();
        loop {
            self.skip_trivia();
            let field = match self.peek() {
                None => return (fields, false),
                Some(c) if c == close => {
                    self.bump();
                    fields.push(EdsValue::Empty);
                    return (fields, true);
                }
                Some(',') => EdsValue::Empty,
                Some('"') => self.quoted(),
                Some('{') => self.group(),
                Some(_) => self.token(),
            };
            fields.push(field);

            self.skip_trivia();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(c) if c == close => {
                    self.bump();
                    return (fields, true);
                }
                _ => return (fields, false),
            }
        }
    }

    fn group(&mut self) -> EdsValue {
        let (line, column) = (self.line, self.column);
        self.bump();
        let (items, terminated) = self.fields('}');
        if !terminated {
            self.report(
                Diagnostic::error("EDS-L004", "unterminated '{' group"),
                line,
                column,
            );
        }
        EdsValue::Group(items)
    }

    /// Reads one or more adjacent quoted literals into a single value.
    fn quoted(&mut self) -> EdsValue {
        let mut text = String::new();
        loop {
            let (line, column) = (self.line, self.column);
            self.bump();
            let mut closed = false;
            while let Some(c) = self.peek() {
                if c == '\n' {
                    break;
                }
                self.bump();
                match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    // Escapes are kept as written.
                    '\\' => {
                        text.push(c);
                        if let Some(next) = self.peek().filter(|n| *n != '\n') {
                            text.push(next);
                            self.bump();
                        }
                    }
                    _ => text.push(c),
                }
            }
            if !closed {
                self.report(
                    Diagnostic::error("EDS-L001", "unterminated quoted string"),
                    line,
                    column,
                );
                return EdsValue::Quoted(text);
            }
            self.skip_trivia();
            if self.peek() != Some('"') {
                return EdsValue::Quoted(text);
            }
        }
    }

    fn token(&mut self) -> EdsValue {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if matches!(c, ',' | ';' | '{' | '}' | '"' | '$' | '=' | '[' | '\n') {
                break;
            }
            text.push(c);
            self.bump();
        }
        let text = text.trim();
        if text.is_empty() {
            EdsValue::Empty
        } else {
            EdsValue::token(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_sections_and_entries() {
        let out = lex("$ header comment\n[File]\n  DescText = \"Demo\";\n  Revision = 1.1; $ trailing\n\n[Device]\nVendCode = 0x0001;\n");
        assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        assert_eq!(out.sections.len(), 2);
        let file = &out.sections[0];
        assert_eq!(file.name, "File");
        assert_eq!(file.entries[0].key, "DescText");
        assert_eq!(file.entries[0].fields, vec![EdsValue::quoted("Demo")]);
        assert_eq!(file.entries[1].fields, vec![EdsValue::token("1.1")]);
        assert_eq!((file.entries[1].line, file.entries[1].column), (4, 3));
        assert_eq!(out.sections[1].entries[0].fields, vec![EdsValue::token("0x0001")]);
    }

    #[test]
    fn test_multi_line_entry_with_empty_fields() {
        let out = lex("[Params]\nParam1 =\n    0,        $ reserved\n    ,,\n    \"Speed\";\n");
        assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        let fields = &out.sections[0].entries[0].fields;
        assert_eq!(
            fields,
            &vec![
                EdsValue::token("0"),
                EdsValue::Empty,
                EdsValue::Empty,
                EdsValue::quoted("Speed"),
            ]
        );
    }

    #[test]
    fn test_adjacent_literals_are_concatenated() {
        let out = lex("[File]\nDescText = \"Part one, \"\n   \"part two\";\n");
        assert_eq!(
            out.sections[0].entries[0].fields,
            vec![EdsValue::quoted("Part one, part two")]
        );
    }

    #[test]
    fn test_nested_groups() {
        let out = lex("[X]\nKey = 1, {2, {3, 4}}, ;\n");
        assert_eq!(
            out.sections[0].entries[0].fields,
            vec![
                EdsValue::token("1"),
                EdsValue::Group(vec![
                    EdsValue::token("2"),
                    EdsValue::Group(vec![EdsValue::token("3"), EdsValue::token("4")]),
                ]),
                EdsValue::Empty,
            ]
        );
    }

    #[test]
    fn test_empty_value() {
        let out = lex("[X]\nKey = ;\n");
        assert_eq!(out.sections[0].entries[0].fields, vec![EdsValue::Empty]);
    }

    #[test]
    fn test_missing_terminator_is_recovered() {
        let out = lex("[Device]\nVendCode = 1\nVendName = \"Acme\";\n");
        let entries = &out.sections[0].entries;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].key, "VendName");
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].code, "EDS-L002");
        assert_eq!(out.diagnostics[0].location.line, Some(2));
    }

    #[test]
    fn test_lexical_errors() {
        let out = lex("Orphan = 1;\n[File]\nDescText = \"open\nBroken line\n[Dev\n");
        let codes: Vec<&str> = out.diagnostics.iter().map(|d| d.code.as_str()).collect();
        assert!(codes.contains(&"EDS-L003"), "{:?}", codes);
        assert!(codes.contains(&"EDS-L001"), "{:?}", codes);
        assert!(codes.contains(&"EDS-L005"), "{:?}", codes);
        assert!(codes.contains(&"EDS-L004"), "{:?}", codes);
        assert_eq!(out.sections.len(), 2);
    }
}
