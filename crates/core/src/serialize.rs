//! Interchange JSON serialization -- canonical output with sorted keys
//! and explicit nulls for absent fields.

use crate::ast::{Document, Question};
use serde_json::{json, Map, Value};

/// Serialize a document to the interchange shape consumed by the form UI.
///
/// Every optional field is present, with an explicit `null` when absent,
/// so consumers can index fields without existence checks. Provenance is
/// internal and not serialized.
pub fn serialize(doc: &Document) -> Value {
    let questions: Vec<Value> = doc.questions.iter().map(serialize_question).collect();

    let mut root = Map::new();
    root.insert("intro".to_owned(), Value::String(doc.intro.clone()));
    root.insert("outro".to_owned(), Value::String(doc.outro.clone()));
    root.insert("questions".to_owned(), Value::Array(questions));
    Value::Object(root)
}

fn serialize_question(q: &Question) -> Value {
    json!({
        "dependsOn":     q.depends_on,
        "dependsValues": q.depends_values,
        "id":            q.id,
        "maxSelect":     q.max_select,
        "options":       q.options,
        "placeholder":   q.placeholder,
        "text":          q.text,
        "type":          q.kind.as_tag(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn absent_fields_serialize_as_null() {
        let src = "<!-- question id=\"q1\" -->\nPick:\n- A";
        let doc = parse(src, "doc.md").unwrap();
        let value = serialize(&doc);
        let q = &value["questions"][0];
        assert_eq!(q["dependsOn"], Value::Null);
        assert_eq!(q["dependsValues"], Value::Null);
        assert_eq!(q["maxSelect"], Value::Null);
        assert_eq!(q["placeholder"], "");
    }

    #[test]
    fn scenario_document_serializes_to_expected_shape() {
        let src = "<!-- intro -->\nWelcome.\n<!-- question id=\"q1\" type=\"radio\" -->\nPick one:\n- A\n- B\n<!-- outro -->\nDone.";
        let doc = parse(src, "doc.md").unwrap();
        let value = serialize(&doc);
        assert_eq!(
            value,
            json!({
                "intro": "Welcome.",
                "outro": "Done.",
                "questions": [{
                    "dependsOn": null,
                    "dependsValues": null,
                    "id": "q1",
                    "maxSelect": null,
                    "options": ["A", "B"],
                    "placeholder": "",
                    "text": "Pick one:",
                    "type": "radio"
                }]
            })
        );
    }

    #[test]
    fn depends_metadata_serializes_verbatim() {
        let src = "<!-- question id=\"q2\" depends-on=\"q1\" depends-values=\"Yes, Maybe\" max-select=\"2\" type=\"checkbox\" -->\nWhich?\n- X\n- Y\n- Z";
        let doc = parse(src, "doc.md").unwrap();
        let q = &serialize(&doc)["questions"][0];
        assert_eq!(q["dependsOn"], "q1");
        assert_eq!(q["dependsValues"], json!(["Yes", "Maybe"]));
        assert_eq!(q["maxSelect"], 2);
        assert_eq!(q["type"], "checkbox");
    }
}
