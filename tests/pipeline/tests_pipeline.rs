//! The facade as a caller sees it.

use std::thread;

use cellml_text::{document_to_text, reformat, text_to_document, validate, validate_all};

use crate::helpers::assertions::assert_no_errors;
use crate::helpers::fixtures::{EXPRESSION_MODEL, MEMBRANE_MODEL};

#[test]
fn test_text_to_document_and_back() {
    let (document, issues) = text_to_document(MEMBRANE_MODEL);
    assert_no_errors(&issues);
    let document = document.unwrap();
    assert_eq!(document.model_name(), "membrane_cell");
    assert_eq!(document.components().count(), 2);

    let text = document_to_text(&document);
    assert!(text.starts_with("def model {membrane_model} membrane_cell as\n"));
    assert!(text.ends_with("enddef;\n"));
}

#[test]
fn test_reformat_is_stable() {
    let (first, issues) = reformat(EXPRESSION_MODEL);
    assert_no_errors(&issues);
    let first = first.unwrap();
    let (second, _) = reformat(&first);
    assert_eq!(second.as_deref(), Some(first.as_str()));
}

#[test]
fn test_reformat_without_header() {
    let (text, issues) = reformat("comp c as enddef;");
    assert!(text.is_none());
    assert!(!issues.is_empty());
}

#[test]
fn test_validate_reports_every_problem() {
    let source = "def model m as
  def comp c as
    var x volt;
    var y: volt;
    y = ;
  enddef;
enddef;";
    let issues = validate(source);
    assert_eq!(issues.iter().filter(|issue| issue.is_error()).count(), 2);
    assert!(issues[0].line() < issues[1].line());
}

#[test]
fn test_validate_all_matches_validate() {
    let texts = [MEMBRANE_MODEL, "def model broken as", EXPRESSION_MODEL];
    let results = validate_all(&texts);
    for (text, issues) in texts.iter().zip(&results) {
        assert_eq!(issues, &validate(text));
    }
    assert!(results[1].iter().any(|issue| issue.is_error()));
}

#[test]
fn test_calls_from_separate_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(|| reformat(MEMBRANE_MODEL).0))
        .collect();
    let outputs: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    assert!(outputs[0].is_some());
    assert!(outputs.iter().all(|output| output == &outputs[0]));
}

#[cfg(feature = "interchange")]
mod interchange {
    use cellml_text::interchange::{CellmlXml, DocumentFormat, namespace};

    use crate::helpers::assertions::parse_ok;
    use crate::helpers::fixtures::{EXPRESSION_MODEL, MEMBRANE_MODEL};

    fn export(source: &str) -> String {
        let bytes = CellmlXml.write(&parse_ok(source)).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_membrane_model_export() {
        let xml = export(MEMBRANE_MODEL);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(namespace::CELLML_1_1), "{xml}");
        assert!(xml.contains("xlink:href=\"units.cellml\""), "{xml}");
        assert!(xml.contains("<component name=\"membrane\""), "{xml}");
        assert!(xml.contains("<map_variables variable_1=\"time\" variable_2=\"time\"/>"), "{xml}");
        assert!(xml.contains("<diff/>"), "{xml}");
    }

    #[test]
    fn test_expression_model_export() {
        let xml = export(EXPRESSION_MODEL);
        assert!(xml.contains(namespace::CELLML_1_0), "{xml}");
        assert!(xml.contains("<piecewise>"), "{xml}");
        assert!(xml.contains("<otherwise>"), "{xml}");
        assert!(xml.contains("<logbase>"), "{xml}");
        assert!(xml.contains("<degree>"), "{xml}");
        assert_eq!(xml.matches("<math").count(), 1);
    }
}
