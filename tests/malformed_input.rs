mod common;

use arborgraph::{error::ParseError, prelude::*};

fn read(text: &str) -> Result<Imported, ParseError> {
    read_str(text, &ParserConfig::default())
}

#[test]
fn test_unbalanced_brackets_are_fatal() {
    for edge in [
        "[label1:name1 label4 e [label2:name2]",
        "[label1:name1] label4 e label2:name2]",
        "[label1:name1] label4 e [label2:name2",
        "[label1:name1]] label4 e [label2:name2]",
    ] {
        let text = format!("graph\nlabel1 name1\nlabel2 name2\n{edge}\n");
        let err = read(&text).unwrap_err();
        assert!(matches!(err, ParseError::MalformedEdge { .. }), "{edge}: {err}");
        assert!(err.to_string().contains("malformed edge format"));
    }
}

#[test]
fn test_unresolved_reference_is_fatal() {
    let err = read("graph\nlabel1 a\n[label1:a] l e [label1:missing]\n").unwrap_err();
    match err {
        ParseError::UnresolvedNodeRef { reference, edge } => {
            assert_eq!(reference, "label1:missing");
            assert_eq!(edge, "[label1:a] l e [label1:missing]");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn test_skipped_indentation_is_fatal() {
    assert!(matches!(
        read("tree\nn r\n\t\tn too_deep\n"),
        Err(ParseError::MissingParent { .. })
    ));
}

#[test]
fn test_name_without_label_in_cross_links_is_fatal() {
    assert!(matches!(
        read("treegraph\nn r\n[n:r] l e [n:r]\nstray node\n"),
        Err(ParseError::UnexpectedNode { .. })
    ));
}

#[test]
fn test_unclosed_continuation_is_fatal() {
    assert!(matches!(
        read("graph\nlabel1 a\n\tp = String(\"x +\n"),
        Err(ParseError::UnclosedContinuation(_))
    ));
}

#[test]
fn test_continuation_joins_property_value() {
    let graph = read("graph\nlabel1 a\n\tp = String(\"one +\ntwo\")\n")
        .unwrap()
        .into_graph()
        .unwrap();
    assert_eq!(
        graph.find_node("a").unwrap().property("p"),
        Some(Value::from("one two"))
    );
}

#[test]
fn test_quoted_delimiters_survive() {
    let graph = read("graph\nlabel1 a\n\tp = String(\"[x], (y) = z // w\")\n")
        .unwrap()
        .into_graph()
        .unwrap();
    assert_eq!(
        graph.find_node("a").unwrap().property("p"),
        Some(Value::from("[x], (y) = z // w"))
    );
}

#[test]
fn test_header_must_match_a_whole_keyword() {
    for header in ["graphite", "trees", "treegraphs"] {
        let err = read(&format!("{header}\nnode a\n")).unwrap_err();
        assert!(matches!(&err, ParseError::UnknownFormat(h) if h == header), "{header}: {err}");
    }
}

#[cfg(feature = "tracing")]
mod logged {
    use arborgraph::{
        factory::ElementClass,
        tracing_support::{CapturedEvent, capture_logs},
    };
    use tracing::Level;

    use super::*;

    fn errors(events: &[CapturedEvent]) -> Vec<&str> {
        events
            .iter()
            .filter(|e| e.level == Level::ERROR)
            .map(|e| e.message.as_str())
            .collect()
    }

    #[test]
    fn test_unknown_property_type_is_logged_and_dropped() {
        let (result, events) = capture_logs(|| {
            read("graph\nlabel1 a\n\tgood = Integer(1)\n\tbad = Table(3)\n")
        });
        let graph = result.unwrap().into_graph().unwrap();
        let a = graph.find_node("a").unwrap();
        assert_eq!(a.property("good"), Some(Value::Integer(1)));
        assert!(a.properties().is_some_and(|p| !p.has("bad")));
        assert_eq!(errors(&events), vec!["unknown property type, dropping property"]);
    }

    #[test]
    fn test_dialect_keyword_in_body_is_read_as_a_node() {
        let (result, events) = capture_logs(|| read("graph\nlabel1 a\ngraph\n"));
        let graph = result.unwrap().into_graph().unwrap();
        assert_eq!(graph.size(), 2);
        assert!(graph.nodes().iter().any(|n| n.label() == "graph"));
        assert!(events.iter().any(|e| e.level == Level::WARN
            && e.message == "dialect keyword in document body, reading it as a node"));
    }

    #[test]
    fn test_unparsable_value_is_stored_as_null() {
        let (result, events) = capture_logs(|| read("graph\nlabel1 a\n\tn = Integer(abc)\n"));
        let graph = result.unwrap().into_graph().unwrap();
        assert_eq!(graph.find_node("a").unwrap().property("n"), Some(Value::Null));
        assert!(events.iter().any(|e| e.level == Level::WARN));
    }

    #[test]
    fn test_missing_constructor_falls_back_to_default_class() {
        let mut config = ParserConfig::default();
        // Only takes properties, but the document gives none.
        config.catalog.add_node_class(ElementClass::read_only_data("Person"));
        let (result, events) = capture_logs(|| {
            read_str("graph\nperson = String(Person)\nperson ann\n", &config)
        });
        let graph = result.unwrap().into_graph().unwrap();
        let ann = graph.find_node("ann").unwrap();
        assert_eq!(ann.class_name(), "SimpleNode");
        assert_eq!(ann.label(), "person");
        assert_eq!(
            errors(&events),
            vec!["no matching constructor, using the default node class"]
        );
    }

    #[test]
    fn test_duplicate_declaration_is_logged() {
        let (result, events) = capture_logs(|| read("graph\nn a\nn a\n"));
        assert_eq!(result.unwrap().size(), 1);
        assert_eq!(errors(&events), vec!["duplicate node declaration, skipping"]);
    }

    #[test]
    fn test_unknown_class_name_is_logged() {
        let (result, events) = capture_logs(|| read("graph\nperson = String(Nobody)\nperson ann\n"));
        let graph = result.unwrap().into_graph().unwrap();
        assert_eq!(graph.find_node("ann").unwrap().class_name(), "SimpleNode");
        assert_eq!(
            errors(&events),
            vec!["unknown class, label keeps the default class"]
        );
    }
}
