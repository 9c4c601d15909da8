//! Document Assembler -- folds the ordered section stream into the final
//! document record.

use crate::ast::{Document, Question};
use crate::body::classify_body;
use crate::header::{parse_header, Directive};
use crate::split::Section;

/// Fold sections in stream order into a [`Document`].
///
/// `intro` and `outro` are slots: a later directive of the same kind
/// overwrites an earlier one. Unknown directives are skipped. A question
/// without an explicit id gets the synthetic id `q{ordinal}`, where the
/// ordinal counter advances once per section regardless of kind -- the
/// id is a pure function of position in the source text, so repeated
/// parses of the same text always agree.
pub fn assemble(sections: Vec<Section>) -> Document {
    let mut doc = Document::default();
    let mut ordinal = 0usize;

    for section in sections {
        match parse_header(&section.header) {
            Directive::Intro => doc.intro = section.body,
            Directive::Outro => doc.outro = section.body,
            Directive::Unknown => {}
            Directive::Question(header) => {
                let id = header
                    .id
                    .unwrap_or_else(|| format!("q{}", ordinal));
                let classified = classify_body(&section.body, &header.kind);
                // the value list is meaningless without a controlling question
                let depends_values = if header.depends_on.is_some() {
                    header.depends_values
                } else {
                    None
                };
                doc.questions.push(Question {
                    id,
                    kind: header.kind,
                    text: classified.text,
                    options: classified.options,
                    placeholder: classified.placeholder,
                    depends_on: header.depends_on,
                    depends_values,
                    max_select: header.max_select,
                    prov: section.prov,
                });
            }
        }
        ordinal += 1;
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Provenance;

    fn section(header: &str, body: &str) -> Section {
        Section {
            header: header.to_owned(),
            body: body.to_owned(),
            prov: Provenance {
                file: "doc.md".to_owned(),
                line: 1,
            },
        }
    }

    #[test]
    fn later_intro_overwrites_earlier() {
        let doc = assemble(vec![
            section("intro", "First."),
            section("intro", "Second."),
        ]);
        assert_eq!(doc.intro, "Second.");
    }

    #[test]
    fn synthetic_ids_count_every_section() {
        let doc = assemble(vec![
            section("intro", "Hi."),
            section("question", "First?"),
            section("note for editors", "ignored"),
            section("question", "Second?"),
        ]);
        assert_eq!(doc.questions[0].id, "q1");
        assert_eq!(doc.questions[1].id, "q3");
    }

    #[test]
    fn explicit_id_is_kept() {
        let doc = assemble(vec![section(r#"question id="color""#, "Favorite?")]);
        assert_eq!(doc.questions[0].id, "color");
    }

    #[test]
    fn unknown_directives_contribute_nothing() {
        let doc = assemble(vec![
            section("note", "invisible"),
            section("intro", "Hello."),
        ]);
        assert_eq!(doc.intro, "Hello.");
        assert!(doc.questions.is_empty());
    }

    #[test]
    fn depends_values_require_depends_on() {
        let doc = assemble(vec![section(
            r#"question id="q2" depends-values="Yes,No""#,
            "Orphaned values.",
        )]);
        assert_eq!(doc.questions[0].depends_on, None);
        assert_eq!(doc.questions[0].depends_values, None);
    }

    #[test]
    fn depends_on_alone_is_kept() {
        let doc = assemble(vec![section(
            r#"question id="q2" depends-on="q1""#,
            "Follow-up.",
        )]);
        assert_eq!(doc.questions[0].depends_on.as_deref(), Some("q1"));
        assert_eq!(doc.questions[0].depends_values, None);
    }
}
