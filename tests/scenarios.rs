//! Black-box scenario tests: build a short event stream, emit it, and check
//! the exact resulting bytes.

use pretty_assertions::assert_eq;

use yaml_emit::{
    EmitterError, Emitter, Encoding, MappingStyle, ScalarStyle, SequenceStyle, TagDirective,
    VersionDirective,
};

fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init()
        .ok();
}

fn emit_to_string(events: Vec<yaml_emit::Event>) -> String {
    init_logging();
    let mut buffer = Vec::new();
    let mut emitter = Emitter::new();
    emitter.set_output_string(&mut buffer);
    for event in events {
        emitter.emit(event).expect("emit should succeed");
    }
    String::from_utf8(buffer).expect("output should be valid utf-8")
}

#[test]
fn plain_scalar_document() {
    use yaml_emit::Event;
    let events = vec![
        Event::stream_start(Encoding::Utf8),
        Event::document_start(None, &[], true),
        Event::scalar(None, None, "hello", true, true, ScalarStyle::Plain),
        Event::document_end(true),
        Event::stream_end(),
    ];
    assert_eq!(emit_to_string(events), "hello\n");
}

#[test]
fn block_sequence_of_scalars() {
    use yaml_emit::Event;
    let events = vec![
        Event::stream_start(Encoding::Utf8),
        Event::document_start(None, &[], true),
        Event::sequence_start(None, None, true, SequenceStyle::Block),
        Event::scalar(None, None, "a", true, true, ScalarStyle::Plain),
        Event::scalar(None, None, "b", true, true, ScalarStyle::Plain),
        Event::sequence_end(),
        Event::document_end(true),
        Event::stream_end(),
    ];
    assert_eq!(emit_to_string(events), "- a\n- b\n");
}

#[test]
fn block_mapping_with_simple_key() {
    use yaml_emit::Event;
    let events = vec![
        Event::stream_start(Encoding::Utf8),
        Event::document_start(None, &[], true),
        Event::mapping_start(None, None, true, MappingStyle::Block),
        Event::scalar(None, None, "key", true, true, ScalarStyle::Plain),
        Event::scalar(None, None, "value", true, true, ScalarStyle::Plain),
        Event::mapping_end(),
        Event::document_end(true),
        Event::stream_end(),
    ];
    assert_eq!(emit_to_string(events), "key: value\n");
}

#[test]
fn canonical_mapping_uses_explicit_flow_pairs() {
    use yaml_emit::Event;
    let events = vec![
        Event::stream_start(Encoding::Utf8),
        Event::document_start(None, &[], true),
        Event::mapping_start(None, None, true, MappingStyle::Block),
        Event::scalar(None, None, "key", true, true, ScalarStyle::Plain),
        Event::scalar(None, None, "value", true, true, ScalarStyle::Plain),
        Event::mapping_end(),
        Event::document_end(false),
        Event::stream_end(),
    ];
    init_logging();
    let mut buffer = Vec::new();
    let mut emitter = Emitter::new();
    emitter.set_canonical(true);
    emitter.set_output_string(&mut buffer);
    for event in events {
        emitter.emit(event).expect("emit should succeed");
    }
    let output = String::from_utf8(buffer).unwrap();
    assert_eq!(output, "---\n{\n  ? \"key\"\n  : \"value\",\n}\n...\n");
}

#[test]
fn multiline_scalar_prefers_single_quoted_over_plain() {
    // Ported from the teacher's own integration test: a scalar with an
    // embedded line break and no leading/trailing whitespace is not legal
    // plain (the break disqualifies it) but remains legal single-quoted, so
    // the style selector prefers the shorter single-quoted rendering over
    // double-quoted.
    use yaml_emit::Event;
    let events = vec![
        Event::stream_start(Encoding::Utf8),
        Event::document_start(None, &[], true),
        Event::scalar(
            None,
            None,
            "1st non-empty\n2nd non-empty 3rd non-empty",
            true,
            true,
            ScalarStyle::Plain,
        ),
        Event::document_end(true),
        Event::stream_end(),
    ];
    assert_eq!(
        emit_to_string(events),
        "'1st non-empty\n\n  2nd non-empty 3rd non-empty'\n"
    );
}

#[test]
fn tab_forces_double_quoted_style() {
    // A tab is not a printable character by this emitter's rules, which
    // rules out plain, single-quoted, and block styles alike, leaving
    // double-quoted as the only legal style.
    use yaml_emit::Event;
    let events = vec![
        Event::stream_start(Encoding::Utf8),
        Event::document_start(None, &[], true),
        Event::scalar(None, None, "has\ttab", true, true, ScalarStyle::Plain),
        Event::document_end(true),
        Event::stream_end(),
    ];
    assert_eq!(emit_to_string(events), "\"has\\ttab\"\n");
}

#[test]
fn tag_directive_resolves_custom_handle() {
    use yaml_emit::Event;
    let tags = [TagDirective {
        handle: String::from("!e!"),
        prefix: String::from("tag:example.com,2024:"),
    }];
    let events = vec![
        Event::stream_start(Encoding::Utf8),
        Event::document_start(
            Some(VersionDirective { major: 1, minor: 1 }),
            &tags,
            true,
        ),
        Event::scalar(
            None,
            Some("tag:example.com,2024:foo"),
            "bar",
            false,
            false,
            ScalarStyle::Any,
        ),
        Event::document_end(true),
        Event::stream_end(),
    ];
    assert_eq!(
        emit_to_string(events),
        "%YAML 1.1\n%TAG !e! tag:example.com,2024:\n--- !e!foo bar\n"
    );
}

#[test]
fn open_ended_document_is_closed_before_next_directive() {
    use yaml_emit::Event;
    let events = vec![
        Event::stream_start(Encoding::Utf8),
        Event::document_start(None, &[], true),
        Event::scalar(None, None, "hello", true, true, ScalarStyle::Plain),
        Event::document_end(true),
        Event::document_start(Some(VersionDirective { major: 1, minor: 1 }), &[], true),
        Event::scalar(None, None, "world", true, true, ScalarStyle::Plain),
        Event::document_end(true),
        Event::stream_end(),
    ];
    assert_eq!(
        emit_to_string(events),
        "hello\n...\n%YAML 1.1\n--- world\n"
    );
}

#[test]
fn unexpected_event_is_rejected() {
    use yaml_emit::Event;
    init_logging();
    let mut buffer = Vec::new();
    let mut emitter = Emitter::new();
    emitter.set_output_string(&mut buffer);
    emitter.emit(Event::stream_start(Encoding::Utf8)).unwrap();
    let result = emitter.emit(Event::mapping_end());
    assert!(matches!(result, Err(EmitterError::UnexpectedEvent(_))));
}

#[test]
fn incompatible_version_directive_is_rejected() {
    use yaml_emit::Event;
    init_logging();
    let mut buffer = Vec::new();
    let mut emitter = Emitter::new();
    emitter.set_output_string(&mut buffer);
    emitter.emit(Event::stream_start(Encoding::Utf8)).unwrap();
    emitter
        .emit(Event::document_start(
            Some(VersionDirective { major: 2, minor: 0 }),
            &[],
            true,
        ))
        .unwrap();
    // DOCUMENT-START needs one event of look-ahead before it dispatches.
    let result = emitter.emit(Event::scalar(None, None, "x", true, true, ScalarStyle::Plain));
    assert!(matches!(
        result,
        Err(EmitterError::InvalidVersion { major: 2, minor: 0 })
    ));
}

#[test]
fn duplicate_tag_handle_is_rejected() {
    use yaml_emit::Event;
    let tags = [
        TagDirective {
            handle: String::from("!e!"),
            prefix: String::from("tag:example.com,2024:"),
        },
        TagDirective {
            handle: String::from("!e!"),
            prefix: String::from("tag:other.example.com,2024:"),
        },
    ];
    init_logging();
    let mut buffer = Vec::new();
    let mut emitter = Emitter::new();
    emitter.set_output_string(&mut buffer);
    emitter.emit(Event::stream_start(Encoding::Utf8)).unwrap();
    emitter
        .emit(Event::document_start(None, &tags, true))
        .unwrap();
    // DOCUMENT-START needs one event of look-ahead before it dispatches.
    let result = emitter.emit(Event::scalar(None, None, "x", true, true, ScalarStyle::Plain));
    assert!(matches!(
        result,
        Err(EmitterError::DuplicateTagDirective(_))
    ));
}
