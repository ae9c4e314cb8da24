//! The 18-state dispatch table and its per-state emission routines, plus
//! the look-ahead event queue and indentation stack that feed it.

use log::trace;

use crate::event::EventData;
use crate::{EmitterError, Event, MappingStyle, SequenceStyle, TagDirective};

use super::analyze::{self, Analysis};
use super::write;
use super::{Emitter, EmitterState};

fn unexpected_event<T>(expected: &'static str) -> Result<T, EmitterError> {
    Err(EmitterError::UnexpectedEvent(expected))
}

/// Pop the next event off the queue once enough trailing context has
/// accumulated to decide its layout, per event kind:
/// `DocumentStart` needs 1 event of look-ahead, `SequenceStart` 2,
/// `MappingStart` 3 — everything else is dispatched immediately.
pub(super) fn dequeue_ready_event(emitter: &mut Emitter) -> Option<Event> {
    let first = emitter.events.front()?;

    let accumulate = match &first.data {
        EventData::DocumentStart { .. } => 1,
        EventData::SequenceStart { .. } => 2,
        EventData::MappingStart { .. } => 3,
        _ => return emitter.events.pop_front(),
    };

    if emitter.events.len() > accumulate {
        return emitter.events.pop_front();
    }

    trace!("deferring dispatch, only {} events queued", emitter.events.len());

    let mut level = 0;
    for event in &emitter.events {
        match event.data {
            EventData::StreamStart { .. }
            | EventData::DocumentStart { .. }
            | EventData::SequenceStart { .. }
            | EventData::MappingStart { .. } => level += 1,
            EventData::StreamEnd
            | EventData::DocumentEnd { .. }
            | EventData::SequenceEnd
            | EventData::MappingEnd => level -= 1,
            _ => {}
        }
        if level == 0 {
            return emitter.events.pop_front();
        }
    }
    None
}

fn append_tag_directive(
    emitter: &mut Emitter,
    value: TagDirective,
    allow_duplicates: bool,
) -> Result<(), EmitterError> {
    for tag_directive in &emitter.tag_directives {
        if value.handle == tag_directive.handle {
            if allow_duplicates {
                return Ok(());
            }
            return Err(EmitterError::DuplicateTagDirective(value.handle));
        }
    }
    emitter.tag_directives.push(value);
    Ok(())
}

fn increase_indent(emitter: &mut Emitter, flow: bool, indentless: bool) {
    emitter.indents.push(emitter.indent);
    if emitter.indent < 0 {
        emitter.indent = if flow { emitter.best_indent } else { 0 };
    } else if !indentless {
        emitter.indent += emitter.best_indent;
    }
}

pub(super) fn state_machine<'a>(
    emitter: &mut Emitter,
    event: &'a Event,
    analysis: &mut Analysis<'a>,
) -> Result<(), EmitterError> {
    match emitter.state {
        EmitterState::StreamStart => emit_stream_start(emitter, event),
        EmitterState::FirstDocumentStart => emit_document_start(emitter, event, true),
        EmitterState::DocumentStart => emit_document_start(emitter, event, false),
        EmitterState::DocumentContent => emit_document_content(emitter, event, analysis),
        EmitterState::DocumentEnd => emit_document_end(emitter, event),
        EmitterState::FlowSequenceFirstItem => emit_flow_sequence_item(emitter, event, true, analysis),
        EmitterState::FlowSequenceItem => emit_flow_sequence_item(emitter, event, false, analysis),
        EmitterState::FlowMappingFirstKey => emit_flow_mapping_key(emitter, event, true, analysis),
        EmitterState::FlowMappingKey => emit_flow_mapping_key(emitter, event, false, analysis),
        EmitterState::FlowMappingSimpleValue => emit_flow_mapping_value(emitter, event, true, analysis),
        EmitterState::FlowMappingValue => emit_flow_mapping_value(emitter, event, false, analysis),
        EmitterState::BlockSequenceFirstItem => emit_block_sequence_item(emitter, event, true, analysis),
        EmitterState::BlockSequenceItem => emit_block_sequence_item(emitter, event, false, analysis),
        EmitterState::BlockMappingFirstKey => emit_block_mapping_key(emitter, event, true, analysis),
        EmitterState::BlockMappingKey => emit_block_mapping_key(emitter, event, false, analysis),
        EmitterState::BlockMappingSimpleValue => emit_block_mapping_value(emitter, event, true, analysis),
        EmitterState::BlockMappingValue => emit_block_mapping_value(emitter, event, false, analysis),
        EmitterState::End => unexpected_event("nothing after STREAM-END"),
    }
}

fn emit_stream_start(emitter: &mut Emitter, event: &Event) -> Result<(), EmitterError> {
    use crate::{Break, Encoding};

    emitter.open_ended = 0;
    let EventData::StreamStart { ref encoding } = event.data else {
        return unexpected_event("STREAM-START");
    };

    if emitter.encoding == Encoding::Any {
        emitter.encoding = *encoding;
    }
    if emitter.encoding == Encoding::Any {
        emitter.encoding = Encoding::Utf8;
    }
    if emitter.best_indent < 2 || emitter.best_indent > 9 {
        emitter.best_indent = 2;
    }
    if emitter.best_width >= 0 && emitter.best_width <= emitter.best_indent * 2 {
        emitter.best_width = 80;
    }
    if emitter.best_width < 0 {
        emitter.best_width = i32::MAX;
    }
    if emitter.line_break == Break::Any {
        emitter.line_break = Break::Ln;
    }
    emitter.indent = -1;
    emitter.line = 0;
    emitter.column = 0;
    emitter.whitespace = true;
    emitter.indention = true;
    if emitter.encoding != Encoding::Utf8 {
        write::write_bom(emitter)?;
    }
    emitter.state = EmitterState::FirstDocumentStart;
    Ok(())
}

fn emit_document_start(emitter: &mut Emitter, event: &Event, first: bool) -> Result<(), EmitterError> {
    if let EventData::DocumentStart {
        version_directive,
        tag_directives,
        implicit,
    } = &event.data
    {
        let default_tag_directives: [TagDirective; 2] = [
            TagDirective {
                handle: String::from("!"),
                prefix: String::from("!"),
            },
            TagDirective {
                handle: String::from("!!"),
                prefix: String::from("tag:yaml.org,2002:"),
            },
        ];
        let mut implicit = *implicit;
        if let Some(version_directive) = version_directive {
            analyze::analyze_version_directive(*version_directive)?;
        }
        for tag_directive in tag_directives {
            analyze::analyze_tag_directive(tag_directive)?;
            append_tag_directive(emitter, tag_directive.clone(), false)?;
        }
        for tag_directive in default_tag_directives {
            append_tag_directive(emitter, tag_directive, true)?;
        }
        if !first || emitter.canonical {
            implicit = false;
        }
        if (version_directive.is_some() || !tag_directives.is_empty()) && emitter.open_ended != 0 {
            write::write_indicator(emitter, "...", true, false, false)?;
            write::write_indent(emitter)?;
        }
        emitter.open_ended = 0;
        if let Some(version_directive) = version_directive {
            implicit = false;
            write::write_indicator(emitter, "%YAML", true, false, false)?;
            if version_directive.minor == 1 {
                write::write_indicator(emitter, "1.1", true, false, false)?;
            } else {
                write::write_indicator(emitter, "1.2", true, false, false)?;
            }
            write::write_indent(emitter)?;
        }
        if !tag_directives.is_empty() {
            implicit = false;
            for tag_directive in tag_directives {
                write::write_indicator(emitter, "%TAG", true, false, false)?;
                write::write_tag_handle(emitter, &tag_directive.handle)?;
                write::write_tag_content(emitter, &tag_directive.prefix, true)?;
                write::write_indent(emitter)?;
            }
        }
        if analyze::check_empty_document(emitter) {
            implicit = false;
        }
        if !implicit {
            write::write_indent(emitter)?;
            write::write_indicator(emitter, "---", true, false, false)?;
            if emitter.canonical {
                write::write_indent(emitter)?;
            }
        }
        emitter.state = EmitterState::DocumentContent;
        emitter.open_ended = 0;
        return Ok(());
    } else if let EventData::StreamEnd = &event.data {
        if emitter.open_ended == 2 {
            write::write_indicator(emitter, "...", true, false, false)?;
            emitter.open_ended = 0;
            write::write_indent(emitter)?;
        }
        crate::writer::flush(emitter)?;
        emitter.state = EmitterState::End;
        return Ok(());
    }

    unexpected_event("DOCUMENT-START or STREAM-END")
}

fn emit_document_content(
    emitter: &mut Emitter,
    event: &Event,
    analysis: &mut Analysis,
) -> Result<(), EmitterError> {
    emitter.states.push(EmitterState::DocumentEnd);
    emit_node(emitter, event, true, false, false, false, analysis)
}

fn emit_document_end(emitter: &mut Emitter, event: &Event) -> Result<(), EmitterError> {
    if let EventData::DocumentEnd { implicit } = &event.data {
        let implicit = *implicit;
        write::write_indent(emitter)?;
        if !implicit {
            write::write_indicator(emitter, "...", true, false, false)?;
            emitter.open_ended = 0;
            write::write_indent(emitter)?;
        } else if emitter.open_ended == 0 {
            emitter.open_ended = 1;
        }
        crate::writer::flush(emitter)?;
        emitter.state = EmitterState::DocumentStart;
        emitter.tag_directives.clear();
        return Ok(());
    }
    unexpected_event("DOCUMENT-END")
}

fn emit_flow_sequence_item(
    emitter: &mut Emitter,
    event: &Event,
    first: bool,
    analysis: &mut Analysis,
) -> Result<(), EmitterError> {
    if first {
        write::write_indicator(emitter, "[", true, true, false)?;
        increase_indent(emitter, true, false);
        emitter.flow_level += 1;
    }
    if let EventData::SequenceEnd = &event.data {
        emitter.flow_level -= 1;
        emitter.indent = emitter.indents.pop().unwrap();
        if emitter.canonical && !first {
            write::write_indicator(emitter, ",", false, false, false)?;
            write::write_indent(emitter)?;
        }
        write::write_indicator(emitter, "]", false, false, false)?;
        emitter.state = emitter.states.pop().unwrap();
        return Ok(());
    }
    if !first {
        write::write_indicator(emitter, ",", false, false, false)?;
    }
    if emitter.canonical || emitter.column > emitter.best_width {
        write::write_indent(emitter)?;
    }
    emitter.states.push(EmitterState::FlowSequenceItem);
    emit_node(emitter, event, false, true, false, false, analysis)
}

fn emit_flow_mapping_key(
    emitter: &mut Emitter,
    event: &Event,
    first: bool,
    analysis: &mut Analysis,
) -> Result<(), EmitterError> {
    if first {
        write::write_indicator(emitter, "{", true, true, false)?;
        increase_indent(emitter, true, false);
        emitter.flow_level += 1;
    }
    if let EventData::MappingEnd = &event.data {
        assert!(!emitter.indents.is_empty());
        emitter.flow_level -= 1;
        emitter.indent = emitter.indents.pop().unwrap();
        if emitter.canonical && !first {
            write::write_indicator(emitter, ",", false, false, false)?;
            write::write_indent(emitter)?;
        }
        write::write_indicator(emitter, "}", false, false, false)?;
        emitter.state = emitter.states.pop().unwrap();
        return Ok(());
    }
    if !first {
        write::write_indicator(emitter, ",", false, false, false)?;
    }
    if emitter.canonical || emitter.column > emitter.best_width {
        write::write_indent(emitter)?;
    }
    if !emitter.canonical && analyze::check_simple_key(emitter, event, analysis) {
        emitter.states.push(EmitterState::FlowMappingSimpleValue);
        emit_node(emitter, event, false, false, true, true, analysis)
    } else {
        write::write_indicator(emitter, "?", true, false, false)?;
        emitter.states.push(EmitterState::FlowMappingValue);
        emit_node(emitter, event, false, false, true, false, analysis)
    }
}

fn emit_flow_mapping_value(
    emitter: &mut Emitter,
    event: &Event,
    simple: bool,
    analysis: &mut Analysis,
) -> Result<(), EmitterError> {
    if simple {
        write::write_indicator(emitter, ":", false, false, false)?;
    } else {
        if emitter.canonical || emitter.column > emitter.best_width {
            write::write_indent(emitter)?;
        }
        write::write_indicator(emitter, ":", true, false, false)?;
    }
    emitter.states.push(EmitterState::FlowMappingKey);
    emit_node(emitter, event, false, false, true, false, analysis)
}

fn emit_block_sequence_item(
    emitter: &mut Emitter,
    event: &Event,
    first: bool,
    analysis: &mut Analysis,
) -> Result<(), EmitterError> {
    if first {
        increase_indent(emitter, false, emitter.mapping_context && !emitter.indention);
    }
    if let EventData::SequenceEnd = &event.data {
        emitter.indent = emitter.indents.pop().unwrap();
        emitter.state = emitter.states.pop().unwrap();
        return Ok(());
    }
    write::write_indent(emitter)?;
    write::write_indicator(emitter, "-", true, false, true)?;
    emitter.states.push(EmitterState::BlockSequenceItem);
    emit_node(emitter, event, false, true, false, false, analysis)
}

fn emit_block_mapping_key(
    emitter: &mut Emitter,
    event: &Event,
    first: bool,
    analysis: &mut Analysis,
) -> Result<(), EmitterError> {
    if first {
        increase_indent(emitter, false, false);
    }
    if let EventData::MappingEnd = &event.data {
        emitter.indent = emitter.indents.pop().unwrap();
        emitter.state = emitter.states.pop().unwrap();
        return Ok(());
    }
    write::write_indent(emitter)?;
    if analyze::check_simple_key(emitter, event, analysis) {
        emitter.states.push(EmitterState::BlockMappingSimpleValue);
        emit_node(emitter, event, false, false, true, true, analysis)
    } else {
        write::write_indicator(emitter, "?", true, false, true)?;
        emitter.states.push(EmitterState::BlockMappingValue);
        emit_node(emitter, event, false, false, true, false, analysis)
    }
}

fn emit_block_mapping_value(
    emitter: &mut Emitter,
    event: &Event,
    simple: bool,
    analysis: &mut Analysis,
) -> Result<(), EmitterError> {
    if simple {
        write::write_indicator(emitter, ":", false, false, false)?;
    } else {
        write::write_indent(emitter)?;
        write::write_indicator(emitter, ":", true, false, true)?;
    }
    emitter.states.push(EmitterState::BlockMappingKey);
    emit_node(emitter, event, false, false, true, false, analysis)
}

fn emit_node(
    emitter: &mut Emitter,
    event: &Event,
    root: bool,
    sequence: bool,
    mapping: bool,
    simple_key: bool,
    analysis: &mut Analysis,
) -> Result<(), EmitterError> {
    emitter.root_context = root;
    emitter.sequence_context = sequence;
    emitter.mapping_context = mapping;
    emitter.simple_key_context = simple_key;

    match event.data {
        EventData::Alias { .. } => emit_alias(emitter, &analysis.anchor),
        EventData::Scalar { .. } => emit_scalar(emitter, event, analysis),
        EventData::SequenceStart { .. } => emit_sequence_start(emitter, event, analysis),
        EventData::MappingStart { .. } => emit_mapping_start(emitter, event, analysis),
        _ => unexpected_event("SCALAR, SEQUENCE-START, MAPPING-START, or ALIAS"),
    }
}

fn emit_alias(
    emitter: &mut Emitter,
    analysis: &Option<super::analyze::AnchorAnalysis>,
) -> Result<(), EmitterError> {
    analyze::process_anchor(emitter, analysis)?;
    if emitter.simple_key_context {
        write::write_space(emitter)?;
    }
    emitter.state = emitter.states.pop().unwrap();
    Ok(())
}

fn emit_scalar(emitter: &mut Emitter, event: &Event, analysis: &mut Analysis) -> Result<(), EmitterError> {
    let Analysis {
        anchor,
        tag,
        scalar: Some(scalar),
    } = analysis
    else {
        unreachable!("no scalar analysis")
    };

    analyze::select_scalar_style(emitter, event, scalar, tag)?;
    analyze::process_anchor(emitter, anchor)?;
    analyze::process_tag(emitter, tag)?;
    increase_indent(emitter, true, false);
    analyze::process_scalar(emitter, scalar)?;
    emitter.indent = emitter.indents.pop().unwrap();
    emitter.state = emitter.states.pop().unwrap();
    Ok(())
}

fn emit_sequence_start(emitter: &mut Emitter, event: &Event, analysis: &Analysis) -> Result<(), EmitterError> {
    let Analysis { anchor, tag, .. } = analysis;
    analyze::process_anchor(emitter, anchor)?;
    analyze::process_tag(emitter, tag)?;

    let EventData::SequenceStart { style, .. } = &event.data else {
        unreachable!()
    };

    emitter.state = if emitter.flow_level != 0
        || emitter.canonical
        || *style == SequenceStyle::Flow
        || analyze::check_empty_sequence(emitter, event)
    {
        EmitterState::FlowSequenceFirstItem
    } else {
        EmitterState::BlockSequenceFirstItem
    };
    Ok(())
}

fn emit_mapping_start(emitter: &mut Emitter, event: &Event, analysis: &Analysis) -> Result<(), EmitterError> {
    let Analysis { anchor, tag, .. } = analysis;
    analyze::process_anchor(emitter, anchor)?;
    analyze::process_tag(emitter, tag)?;

    let EventData::MappingStart { style, .. } = &event.data else {
        unreachable!()
    };

    emitter.state = if emitter.flow_level != 0
        || emitter.canonical
        || *style == MappingStyle::Flow
        || analyze::check_empty_mapping(emitter, event)
    {
        EmitterState::FlowMappingFirstKey
    } else {
        EmitterState::BlockMappingFirstKey
    };
    Ok(())
}
