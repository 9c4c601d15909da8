//! Integrity validation -- an opt-in pass layered on the raw parse.
//!
//! The parse itself degrades malformed attributes to absent fields so a
//! hand-edited document never fails to load; this pass is where a caller
//! asks whether the degraded result is actually sound. Findings are
//! itemized per offending question and never abort anything -- tooling
//! can display them while still rendering the valid part of the
//! questionnaire.

use crate::ast::Document;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The integrity checks this pass performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrityCheck {
    DuplicateId,
    UnknownDependsOn,
    MaxSelectNotPositive,
}

/// One integrity defect, tied to the question that carries it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub check: IntegrityCheck,
    pub question_id: String,
    pub line: u32,
    pub message: String,
}

impl Finding {
    /// Serialize to JSON matching the expected-findings.json format.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "check":      self.check,
            "line":       self.line,
            "message":    self.message,
            "questionId": self.question_id,
        })
    }
}

/// Check id uniqueness and reference resolvability over a parsed document.
///
/// Returns all findings in question order; an empty list means the
/// document is sound. Forward references are accepted -- whether a
/// question may depend on one answered later is step-order policy and
/// belongs to the consuming UI, not to this pass.
pub fn validate(doc: &Document) -> Vec<Finding> {
    let mut findings = Vec::new();

    let known_ids: HashSet<&str> = doc.questions.iter().map(|q| q.id.as_str()).collect();
    let mut first_seen: HashMap<&str, u32> = HashMap::new();

    for q in &doc.questions {
        match first_seen.get(q.id.as_str()) {
            Some(first_line) => findings.push(Finding {
                check: IntegrityCheck::DuplicateId,
                question_id: q.id.clone(),
                line: q.prov.line,
                message: format!(
                    "duplicate question id '{}': first declared at line {}",
                    q.id, first_line
                ),
            }),
            None => {
                first_seen.insert(q.id.as_str(), q.prov.line);
            }
        }

        if let Some(target) = &q.depends_on {
            if !known_ids.contains(target.as_str()) {
                findings.push(Finding {
                    check: IntegrityCheck::UnknownDependsOn,
                    question_id: q.id.clone(),
                    line: q.prov.line,
                    message: format!(
                        "question '{}' depends on unknown question id '{}'",
                        q.id, target
                    ),
                });
            }
        }

        // the parser never produces 0, but hand-built documents can
        if q.max_select == Some(0) {
            findings.push(Finding {
                check: IntegrityCheck::MaxSelectNotPositive,
                question_id: q.id.clone(),
                line: q.prov.line,
                message: format!("question '{}' has a non-positive max-select", q.id),
            });
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn sound_document_has_no_findings() {
        let src = "<!-- question id=\"q1\" -->\nInterested?\n- Yes\n- No\n<!-- question id=\"q2\" depends-on=\"q1\" depends-values=\"Yes\" -->\nWhy?";
        let doc = parse(src, "doc.md").unwrap();
        assert!(validate(&doc).is_empty());
    }

    #[test]
    fn duplicate_id_is_reported_with_first_declaration_line() {
        let src = "<!-- question id=\"q1\" -->\nFirst?\n<!-- question id=\"q1\" -->\nSecond?";
        let doc = parse(src, "doc.md").unwrap();
        let findings = validate(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].check, IntegrityCheck::DuplicateId);
        assert_eq!(findings[0].question_id, "q1");
        assert!(findings[0].message.contains("line 1"));
    }

    #[test]
    fn dangling_depends_on_is_reported() {
        let src = "<!-- question id=\"q2\" depends-on=\"missing\" -->\nWhy?";
        let doc = parse(src, "doc.md").unwrap();
        let findings = validate(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].check, IntegrityCheck::UnknownDependsOn);
        assert_eq!(findings[0].question_id, "q2");
    }

    #[test]
    fn forward_references_are_accepted() {
        let src = "<!-- question id=\"q1\" depends-on=\"q2\" depends-values=\"Yes\" -->\nEarly?\n<!-- question id=\"q2\" -->\nLate?";
        let doc = parse(src, "doc.md").unwrap();
        assert!(validate(&doc).is_empty());
    }

    #[test]
    fn one_bad_question_does_not_hide_later_findings() {
        let src = "<!-- question id=\"a\" -->\nOne?\n<!-- question id=\"a\" -->\nTwo?\n<!-- question id=\"b\" depends-on=\"nope\" -->\nThree?";
        let doc = parse(src, "doc.md").unwrap();
        let findings = validate(&doc);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].check, IntegrityCheck::DuplicateId);
        assert_eq!(findings[1].check, IntegrityCheck::UnknownDependsOn);
    }

    #[test]
    fn non_positive_max_select_on_hand_built_document() {
        let src = "<!-- question id=\"q1\" type=\"checkbox\" max-select=\"2\" -->\nPick:\n- A\n- B";
        let mut doc = parse(src, "doc.md").unwrap();
        doc.questions[0].max_select = Some(0);
        let findings = validate(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].check, IntegrityCheck::MaxSelectNotPositive);
    }
}
