//! ECMAScript patterns for `prohibitRegexp`.
//!
//! Declarations carry JavaScript `RegExp` sources. They are rewritten into the
//! `fancy-regex` dialect before compiling so that matching follows the
//! ECMAScript rules:
//!
//! - `\d`, `\w` and `\b` are ASCII-only, and `\s` is the ECMAScript whitespace set.
//! - `.` stops at `\n`, `\r`, U+2028 and U+2029 unless the `s` flag is set.
//! - With `m`, `^` and `$` also match around every line terminator.
//! - `[` inside a class is a literal, `[]` never matches and `[^]` matches anything.
//!
//! Lookaround and backreferences are handled by `fancy-regex` itself.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use fancy_regex::{Regex, RegexBuilder};

use crate::model::PatternConfig;

const DIGIT: &str = "0-9";
const WORD: &str = "A-Za-z0-9_";
const SPACE: &str = r"\t\n\x0B\x0C\r \xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";
const LINE_TERMINATORS: &str = r"\n\r\x{2028}\x{2029}";

/// Why a pattern could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    Flags(String),
    Pattern(String),
}

/// Flags of a JavaScript regular expression that change matching.
///
/// `u` is accepted and Unicode code points are always matched. `g` and `y`
/// only affect stateful matching, which a single test never uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternFlags {
    pub ignore_case: bool,
    pub multi_line: bool,
    pub dot_all: bool,
}

impl PatternFlags {
    pub fn parse(flags: &str) -> Result<Self, PatternError> {
        let mut parsed = Self::default();
        let mut seen = String::new();

        for flag in flags.chars() {
            if seen.contains(flag) {
                return Err(PatternError::Flags(format!("flag '{flag}' repeated")));
            }
            seen.push(flag);

            match flag {
                'i' => parsed.ignore_case = true,
                'm' => parsed.multi_line = true,
                's' => parsed.dot_all = true,
                'u' | 'g' | 'y' => {}
                other => return Err(PatternError::Flags(format!("unsupported flag '{other}'"))),
            }
        }
        Ok(parsed)
    }
}

/// A compiled `prohibitRegexp` pattern, keeping the declared source for display.
#[derive(Clone)]
pub struct JsPattern {
    source: String,
    flags: String,
    regex: Regex,
}

impl JsPattern {
    pub fn compile(config: &PatternConfig) -> Result<Self, PatternError> {
        let flags = PatternFlags::parse(config.flags())?;
        let translated = translate(&config.pattern, flags);
        let regex = RegexBuilder::new(&translated)
            .build()
            .map_err(|err| PatternError::Pattern(err.to_string()))?;

        Ok(Self {
            source: config.pattern.clone(),
            flags: config.flags().to_string(),
            regex,
        })
    }

    /// Whether the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> Result<bool, fancy_regex::Error> {
        self.regex.is_match(text)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }
}

impl fmt::Debug for JsPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

impl fmt::Display for JsPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

/// Rewrite an ECMAScript pattern into the `fancy-regex` dialect.
///
/// Malformed input is passed through so that `fancy-regex` reports it.
pub fn translate(pattern: &str, flags: PatternFlags) -> String {
    let mut out = String::with_capacity(pattern.len() + 16);
    if flags.ignore_case {
        out.push_str("(?i)");
    }

    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        if in_class {
            match c {
                '\\' => push_escape(&mut out, &mut chars, true),
                ']' => {
                    in_class = false;
                    out.push(']');
                }
                // Nesting and set operators in the target dialect.
                '[' | '&' | '~' => {
                    out.push('\\');
                    out.push(c);
                }
                _ => out.push(c),
            }
            continue;
        }

        match c {
            '\\' => push_escape(&mut out, &mut chars, false),
            '[' => {
                let negated = chars.next_if_eq(&'^').is_some();
                if chars.next_if_eq(&']').is_some() {
                    out.push_str(if negated { r"[\s\S]" } else { r"[^\s\S]" });
                } else {
                    out.push_str(if negated { "[^" } else { "[" });
                    in_class = true;
                }
            }
            '.' if flags.dot_all => out.push_str(r"[\s\S]"),
            '.' => push_set(&mut out, LINE_TERMINATORS, true, false),
            '^' if flags.multi_line => {
                out.push_str(&format!(r"(?:\A|(?<=[{LINE_TERMINATORS}]))"));
            }
            '$' if flags.multi_line => {
                out.push_str(&format!(r"(?:\z|(?=[{LINE_TERMINATORS}]))"));
            }
            _ => out.push(c),
        }
    }

    out
}

fn push_escape(out: &mut String, chars: &mut Peekable<Chars<'_>>, in_class: bool) {
    let Some(c) = chars.next() else {
        out.push('\\');
        return;
    };

    match c {
        'd' | 'D' => push_set(out, DIGIT, c == 'D', in_class),
        'w' | 'W' => push_set(out, WORD, c == 'W', in_class),
        's' | 'S' => push_set(out, SPACE, c == 'S', in_class),
        'b' if in_class => out.push_str(r"\x08"),
        'b' => out.push_str(&format!(
            "(?:(?<![{WORD}])(?=[{WORD}])|(?<=[{WORD}])(?![{WORD}]))"
        )),
        'B' => out.push_str(&format!(
            "(?:(?<=[{WORD}])(?=[{WORD}])|(?<![{WORD}])(?![{WORD}]))"
        )),
        '0' if !chars.peek().is_some_and(char::is_ascii_digit) => out.push_str(r"\x00"),
        'c' if chars.peek().is_some_and(char::is_ascii_alphabetic) => {
            if let Some(letter) = chars.next() {
                out.push_str(&format!(r"\x{:02X}", (letter as u32) % 32));
            }
        }
        '/' => out.push('/'),
        other => {
            out.push('\\');
            out.push(other);
        }
    }

    // A class escape cannot start a range.
    if in_class && matches!(c, 'd' | 'D' | 'w' | 'W' | 's' | 'S') && chars.next_if_eq(&'-').is_some() {
        out.push_str(r"\-");
    }
}

fn push_set(out: &mut String, body: &str, negated: bool, in_class: bool) {
    if in_class && !negated {
        out.push_str(body);
        return;
    }
    out.push_str(if negated { "[^" } else { "[" });
    out.push_str(body);
    out.push(']');
}
