//! Four-stage parse pipeline: questionnaire markdown -> [`Document`].
//!
//! This is a thin orchestrator over the stage modules; each stage is a
//! pure function and the stages compose top to bottom.

use crate::assemble::assemble;
use crate::ast::Document;
use crate::error::ParseError;
use crate::split::split_sections;

/// Parse the given source text into a document, or return the structural
/// error that prevented sectioning.
///
/// `filename` feeds error and finding provenance only; no I/O happens
/// here. The transform is pure and stateless: the same text always
/// yields the same document, and independent texts may be parsed on
/// independent threads with no synchronization.
pub fn parse(src: &str, filename: &str) -> Result<Document, ParseError> {
    // Stage 1: section splitting -- the only stage that can fail
    let sections = split_sections(src, filename)?;

    // Stages 2-4: header parsing, body classification, assembly
    Ok(assemble(sections))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::QuestionType;

    const SCENARIO: &str = "<!-- intro -->\nWelcome.\n<!-- question id=\"q1\" type=\"radio\" -->\nPick one:\n- A\n- B\n<!-- outro -->\nDone.";

    #[test]
    fn scenario_document_parses_exactly() {
        let doc = parse(SCENARIO, "doc.md").unwrap();
        assert_eq!(doc.intro, "Welcome.");
        assert_eq!(doc.outro, "Done.");
        assert_eq!(doc.questions.len(), 1);

        let q = &doc.questions[0];
        assert_eq!(q.id, "q1");
        assert_eq!(q.kind, QuestionType::Radio);
        assert_eq!(q.text, "Pick one:");
        assert_eq!(q.options, vec!["A", "B"]);
        assert_eq!(q.placeholder, "");
        assert_eq!(q.depends_on, None);
        assert_eq!(q.depends_values, None);
        assert_eq!(q.max_select, None);
    }

    #[test]
    fn repeated_parses_agree() {
        assert_eq!(parse(SCENARIO, "doc.md"), parse(SCENARIO, "doc.md"));
    }

    #[test]
    fn empty_document_parses_to_empty_record() {
        let doc = parse("", "doc.md").unwrap();
        assert_eq!(doc.intro, "");
        assert_eq!(doc.outro, "");
        assert!(doc.questions.is_empty());
    }

    #[test]
    fn synthetic_ids_are_stable_and_distinct() {
        let src = "<!-- intro -->\nHi.\n<!-- question -->\nFirst?\n<!-- question -->\nSecond?";
        let a = parse(src, "doc.md").unwrap();
        let b = parse(src, "doc.md").unwrap();
        let ids: Vec<&str> = a.questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2"]);
        assert_eq!(a, b);
    }

    #[test]
    fn checkbox_with_max_select_keeps_all_options() {
        let src = "<!-- question id=\"subjects\" type=\"checkbox\" max-select=\"2\" -->\nPick up to two:\n- X\n- Y\n- Z";
        let doc = parse(src, "doc.md").unwrap();
        let q = &doc.questions[0];
        assert_eq!(q.max_select, Some(2));
        assert_eq!(q.options.len(), 3);
    }

    #[test]
    fn conditional_visibility_attributes_come_through() {
        let src = "<!-- question id=\"q1\" -->\nInterested?\n- Yes\n- Maybe\n- No\n<!-- question id=\"q2\" depends-on=\"q1\" depends-values=\"Yes, Maybe\" -->\nWhy?";
        let doc = parse(src, "doc.md").unwrap();
        let q2 = &doc.questions[1];
        assert_eq!(q2.depends_on.as_deref(), Some("q1"));
        assert_eq!(
            q2.depends_values,
            Some(vec!["Yes".to_owned(), "Maybe".to_owned()])
        );
    }

    #[test]
    fn textarea_placeholder_leaves_prompt_text() {
        let src = "<!-- question id=\"more\" type=\"textarea\" -->\nAnything else?\nplaceholder: Tell us more";
        let doc = parse(src, "doc.md").unwrap();
        let q = &doc.questions[0];
        assert_eq!(q.placeholder, "Tell us more");
        assert_eq!(q.text, "Anything else?");
    }

    #[test]
    fn unterminated_marker_fails_the_whole_parse() {
        let err = parse("<!-- question id=\"q1\"\nPick:", "doc.md").unwrap_err();
        assert_eq!(err.stage, "split");
        assert_eq!(err.line, 1);
    }

    #[test]
    fn question_provenance_points_at_its_marker() {
        let doc = parse(SCENARIO, "doc.md").unwrap();
        assert_eq!(doc.questions[0].prov.file, "doc.md");
        assert_eq!(doc.questions[0].prov.line, 3);
    }
}
