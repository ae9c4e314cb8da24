//! The streaming YAML emitter: a look-ahead event queue feeding an
//! 18-state dispatch table, plus the scalar analysis and writing routines
//! that table calls into.

use std::collections::VecDeque;
use std::io::Write;

use log::debug;

use crate::{Break, Encoding, Event, EmitterError, TagDirective, OUTPUT_BUFFER_SIZE};

mod analyze;
mod dispatch;
mod write;

/// The emitter's internal state. Drives [`dispatch::state_machine`].
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub(crate) enum EmitterState {
    #[default]
    StreamStart,
    FirstDocumentStart,
    DocumentStart,
    DocumentContent,
    DocumentEnd,
    FlowSequenceFirstItem,
    FlowSequenceItem,
    FlowMappingFirstKey,
    FlowMappingKey,
    FlowMappingSimpleValue,
    FlowMappingValue,
    BlockSequenceFirstItem,
    BlockSequenceItem,
    BlockMappingFirstKey,
    BlockMappingKey,
    BlockMappingSimpleValue,
    BlockMappingValue,
    End,
}

/// A streaming YAML emitter.
///
/// Feed it events with [`Emitter::emit`] in the order a well-formed document
/// produces them (`StreamStart`, `DocumentStart`, node events, `DocumentEnd`,
/// ..., `StreamEnd`); it writes valid YAML text to whatever sink was given to
/// [`Emitter::set_output`] or [`Emitter::set_output_string`].
#[non_exhaustive]
pub struct Emitter<'w> {
    pub(crate) write_handler: Option<&'w mut dyn Write>,
    pub(crate) buffer: String,
    pub(crate) raw_buffer: Vec<u8>,

    pub(crate) encoding: Encoding,
    pub(crate) canonical: bool,
    pub(crate) best_indent: i32,
    pub(crate) best_width: i32,
    pub(crate) unicode: bool,
    pub(crate) line_break: Break,

    state: EmitterState,
    states: Vec<EmitterState>,
    events: VecDeque<Event>,
    indents: Vec<i32>,
    tag_directives: Vec<TagDirective>,

    pub(crate) indent: i32,
    pub(crate) flow_level: i32,

    pub(crate) root_context: bool,
    pub(crate) sequence_context: bool,
    pub(crate) mapping_context: bool,
    pub(crate) simple_key_context: bool,

    pub(crate) line: i32,
    pub(crate) column: i32,
    pub(crate) whitespace: bool,
    pub(crate) indention: bool,
    pub(crate) open_ended: i32,
}

impl<'w> Default for Emitter<'w> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'w> Emitter<'w> {
    /// Create a new emitter with no output sink attached yet.
    pub fn new() -> Self {
        Emitter {
            write_handler: None,
            buffer: String::with_capacity(OUTPUT_BUFFER_SIZE),
            raw_buffer: Vec::with_capacity(OUTPUT_BUFFER_SIZE),
            encoding: Encoding::Any,
            canonical: false,
            best_indent: 0,
            best_width: 0,
            unicode: false,
            line_break: Break::default(),
            states: Vec::with_capacity(16),
            state: EmitterState::default(),
            events: VecDeque::with_capacity(16),
            indents: Vec::with_capacity(16),
            tag_directives: Vec::with_capacity(16),
            indent: 0,
            flow_level: 0,
            root_context: false,
            sequence_context: false,
            mapping_context: false,
            simple_key_context: false,
            line: 0,
            column: 0,
            whitespace: false,
            indention: false,
            open_ended: 0,
        }
    }

    /// Reset the emitter to a freshly constructed state.
    pub fn reset(&mut self) {
        *self = Emitter::new();
    }

    /// Direct output to a byte string, growing it as needed.
    ///
    /// The encoding is forced to UTF-8 if it has not already been set; a
    /// UTF-16 encoding combined with a `String` output cannot round-trip as
    /// valid UTF-8, so that combination panics.
    pub fn set_output_string(&mut self, output: &'w mut Vec<u8>) {
        assert!(self.write_handler.is_none(), "output already set");
        if self.encoding == Encoding::Any {
            self.set_encoding(Encoding::Utf8);
        } else if self.encoding != Encoding::Utf8 {
            panic!("cannot emit a non-UTF-8 encoding into a Vec<u8> output");
        }
        output.clear();
        self.write_handler = Some(output);
    }

    /// Direct output to an arbitrary [`std::io::Write`] sink.
    pub fn set_output(&mut self, handler: &'w mut dyn Write) {
        assert!(self.write_handler.is_none(), "output already set");
        self.write_handler = Some(handler);
    }

    /// Set the output encoding. Can only be set once, before the first event.
    pub fn set_encoding(&mut self, encoding: Encoding) {
        assert_eq!(self.encoding, Encoding::Any, "encoding already set");
        self.encoding = encoding;
    }

    /// Emit in the verbose "canonical" format defined by the YAML spec.
    pub fn set_canonical(&mut self, canonical: bool) {
        self.canonical = canonical;
    }

    /// Set the indentation increment. Values outside `2..=9` are clamped to 2.
    pub fn set_indent(&mut self, indent: i32) {
        self.best_indent = if indent > 1 && indent < 10 { indent } else { 2 };
    }

    /// Set the preferred line width. A negative value means unlimited.
    pub fn set_width(&mut self, width: i32) {
        self.best_width = if width >= 0 { width } else { -1 };
    }

    /// Allow unescaped non-ASCII characters in the output.
    pub fn set_unicode(&mut self, unicode: bool) {
        self.unicode = unicode;
    }

    /// Set the preferred line break style.
    pub fn set_break(&mut self, line_break: Break) {
        self.line_break = line_break;
    }

    /// Feed one event to the emitter.
    ///
    /// Events are queued until enough look-ahead is available to decide
    /// layout, so a single call may emit zero or more events' worth of text.
    pub fn emit(&mut self, event: Event) -> Result<(), EmitterError> {
        self.events.push_back(event);
        while let Some(event) = dispatch::dequeue_ready_event(self) {
            let tag_directives = std::mem::take(&mut self.tag_directives);
            let mut analysis = analyze::analyze_event(self, &event, &tag_directives)?;
            debug!(
                "dispatching {:?} in state {:?}",
                std::mem::discriminant(&event.data),
                self.state
            );
            dispatch::state_machine(self, &event, &mut analysis)?;

            // DOCUMENT-START populates the tag directives itself; don't
            // clobber them with the pre-dispatch snapshot in that case.
            if self.tag_directives.is_empty() {
                self.tag_directives = tag_directives;
            }
        }
        Ok(())
    }
}
