//! Header Parser -- turns a directive's raw header text into a typed
//! attribute record.
//!
//! Question documents are hand-authored prose, so this scanner never
//! hard-fails: malformed attribute text is skipped and every field
//! degrades to absent. Whether the degraded result is acceptable is the
//! validation pass's call, not this stage's.

use crate::ast::QuestionType;

/// A parsed directive header.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Intro,
    Outro,
    Question(QuestionHeader),
    /// A marker whose first word is none of the known kinds. The
    /// assembler skips these, but they still consume a directive ordinal.
    Unknown,
}

/// Typed attributes of a `question` directive header.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionHeader {
    pub id: Option<String>,
    pub kind: QuestionType,
    pub depends_on: Option<String>,
    pub depends_values: Option<Vec<String>>,
    pub max_select: Option<u32>,
}

/// Parse a trimmed header into a directive record.
///
/// The leading word decides the kind: `intro` and `outro` must stand
/// alone; `question` may be followed by attributes. Anything else is an
/// unknown directive.
pub fn parse_header(header: &str) -> Directive {
    let mut words = header.splitn(2, char::is_whitespace);
    let keyword = words.next().unwrap_or("");
    let attrs_text = words.next().unwrap_or("");

    match keyword {
        "intro" if attrs_text.trim().is_empty() => Directive::Intro,
        "outro" if attrs_text.trim().is_empty() => Directive::Outro,
        "question" => Directive::Question(parse_question_attrs(attrs_text)),
        _ => Directive::Unknown,
    }
}

fn parse_question_attrs(text: &str) -> QuestionHeader {
    let attrs = scan_attributes(text);
    // first occurrence of a name wins; empty values count as absent
    let lookup = |name: &str| -> Option<&str> {
        attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    };

    let kind = lookup("type")
        .map(QuestionType::from_tag)
        .unwrap_or(QuestionType::Radio);

    let depends_values: Option<Vec<String>> = lookup("depends-values")
        .map(|v| v.split(',').map(|s| s.trim().to_owned()).collect());

    let max_select = lookup("max-select")
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|n| *n > 0);

    QuestionHeader {
        id: lookup("id").map(str::to_owned),
        kind,
        depends_on: lookup("depends-on").map(str::to_owned),
        depends_values,
        max_select,
    }
}

/// Scan `name="value"` pairs left to right, in any order, with anything
/// between them ignored. Text that does not fit the pair shape is
/// skipped; the scan never fails.
fn scan_attributes(text: &str) -> Vec<(String, String)> {
    let chars: Vec<char> = text.chars().collect();
    let mut pairs = Vec::new();
    let mut pos = 0usize;

    while pos < chars.len() {
        if !is_name_char(chars[pos]) {
            pos += 1;
            continue;
        }

        let name_start = pos;
        while pos < chars.len() && is_name_char(chars[pos]) {
            pos += 1;
        }
        let name: String = chars[name_start..pos].iter().collect();

        // a name opens a value only as `name="`
        if pos + 1 >= chars.len() || chars[pos] != '=' || chars[pos + 1] != '"' {
            continue;
        }
        pos += 2;

        let value_start = pos;
        while pos < chars.len() && chars[pos] != '"' {
            pos += 1;
        }
        if pos >= chars.len() {
            // unterminated value: drop the pair; nothing left to scan
            break;
        }
        let value: String = chars[value_start..pos].iter().collect();
        pos += 1;

        pairs.push((name, value));
    }

    pairs
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}
