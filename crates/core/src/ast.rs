//! Shared model types for the questionnaire parser.
//!
//! These types are produced by the assembler and consumed by the
//! validation and serialization stages. They live here so that stage
//! modules can import them without depending on each other.

// ──────────────────────────────────────────────
// Provenance
// ──────────────────────────────────────────────

/// Source position of a directive: file plus the 1-based line of its
/// opening `<!--` marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    pub file: String,
    pub line: u32,
}

// ──────────────────────────────────────────────
// Question type
// ──────────────────────────────────────────────

/// The input-widget tag carried by a question directive.
///
/// Unknown tags are passed through verbatim; deciding what to do with
/// them is the consuming UI's job. An absent `type` attribute means
/// [`QuestionType::Radio`].
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionType {
    Radio,
    Checkbox,
    Textarea,
    Other(String),
}

impl QuestionType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "radio" => QuestionType::Radio,
            "checkbox" => QuestionType::Checkbox,
            "textarea" => QuestionType::Textarea,
            other => QuestionType::Other(other.to_owned()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            QuestionType::Radio => "radio",
            QuestionType::Checkbox => "checkbox",
            QuestionType::Textarea => "textarea",
            QuestionType::Other(tag) => tag,
        }
    }
}

// ──────────────────────────────────────────────
// Document model
// ──────────────────────────────────────────────

/// One questionnaire step.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Unique within the document; synthetic `q{ordinal}` when the
    /// source omitted one.
    pub id: String,
    pub kind: QuestionType,
    /// Prompt text with option and placeholder lines removed.
    pub text: String,
    /// Option values in source line order; never sorted or deduplicated.
    pub options: Vec<String>,
    /// Empty unless the type is `textarea` and the body carried a
    /// `placeholder:` line.
    pub placeholder: String,
    /// Id of the question whose answer controls this one's visibility.
    pub depends_on: Option<String>,
    /// Answers that make this question visible; present only together
    /// with `depends_on`.
    pub depends_values: Option<Vec<String>>,
    /// Cap on selectable options for multi-select types; always positive.
    pub max_select: Option<u32>,
    pub prov: Provenance,
}

/// A fully parsed questionnaire document.
///
/// Rebuilt fresh on every parse; nothing is mutated in place afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Prose shown before the first question.
    pub intro: String,
    /// Prose shown after the last question.
    pub outro: String,
    /// Step order equals directive order in the source text.
    pub questions: Vec<Question>,
}
