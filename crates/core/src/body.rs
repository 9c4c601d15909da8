//! Body Classifier -- separates a question body into option lines, an
//! optional placeholder line, and the remaining prompt text.

use crate::ast::QuestionType;

/// The classified parts of one question body.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedBody {
    /// Prompt text: the non-option, non-blank lines joined with newlines.
    pub text: String,
    /// Option values in source line order.
    pub options: Vec<String>,
    /// Empty unless the question is a `textarea` with a placeholder line.
    pub placeholder: String,
}

const OPTION_MARKER: &str = "- ";
const PLACEHOLDER_PREFIX: &str = "placeholder:";

/// Classify a body's lines for a question of the given type.
///
/// A line whose trimmed form starts with `- ` is an option; its value is
/// the remainder, trimmed. Blank lines are dropped. For `textarea`
/// questions the first remaining line starting with `placeholder:`
/// supplies the placeholder and is excluded from the prompt text.
pub fn classify_body(body: &str, kind: &QuestionType) -> ClassifiedBody {
    let mut options = Vec::new();
    let mut candidates: Vec<&str> = Vec::new();

    for raw in body.lines() {
        let trimmed = raw.trim();
        if let Some(rest) = trimmed.strip_prefix(OPTION_MARKER) {
            options.push(rest.trim().to_owned());
        } else if !trimmed.is_empty() {
            candidates.push(raw);
        }
    }

    let mut placeholder = String::new();
    if *kind == QuestionType::Textarea {
        if let Some(at) = candidates
            .iter()
            .position(|l| l.trim().starts_with(PLACEHOLDER_PREFIX))
        {
            let line = candidates.remove(at).trim();
            placeholder = line[PLACEHOLDER_PREFIX.len()..].trim().to_owned();
        }
    }

    ClassifiedBody {
        text: candidates.join("\n").trim().to_owned(),
        options,
        placeholder,
    }
}
