//! Scalar/tag/anchor analysis: decides, before any character is written,
//! which styles are legal for a given event.

use crate::chars::{is_alpha, is_ascii, is_blankz, is_break, is_printable, is_space};
use crate::event::EventData;
use crate::{EmitterError, Event, ScalarStyle, TagDirective, VersionDirective};

use super::Emitter;

#[derive(Default)]
pub(crate) struct Analysis<'a> {
    pub anchor: Option<AnchorAnalysis<'a>>,
    pub tag: Option<TagAnalysis<'a>>,
    pub scalar: Option<ScalarAnalysis<'a>>,
}

pub(crate) struct AnchorAnalysis<'a> {
    pub anchor: &'a str,
    pub alias: bool,
}

pub(crate) struct TagAnalysis<'a> {
    pub handle: &'a str,
    pub suffix: &'a str,
}

pub(crate) struct ScalarAnalysis<'a> {
    /// The scalar value.
    pub value: &'a str,
    /// Does the scalar contain line breaks?
    pub multiline: bool,
    /// Can the scalar be expressed in the flow plain style?
    pub flow_plain_allowed: bool,
    /// Can the scalar be expressed in the block plain style?
    pub block_plain_allowed: bool,
    /// Can the scalar be expressed in the single-quoted style?
    pub single_quoted_allowed: bool,
    /// Can the scalar be expressed in the literal or folded styles?
    pub block_allowed: bool,
    /// The output style, chosen by `select_scalar_style`.
    pub style: ScalarStyle,
}

fn emitter_error<T>(problem: &'static str) -> Result<T, EmitterError> {
    Err(EmitterError::InvalidArgument(problem))
}

pub(super) fn check_empty_sequence(emitter: &Emitter, event: &Event) -> bool {
    if emitter.events.is_empty() {
        return false;
    }
    let start = matches!(event.data, EventData::SequenceStart { .. });
    let end = matches!(emitter.events[0].data, EventData::SequenceEnd);
    start && end
}

pub(super) fn check_empty_mapping(emitter: &Emitter, event: &Event) -> bool {
    if emitter.events.is_empty() {
        return false;
    }
    let start = matches!(event.data, EventData::MappingStart { .. });
    let end = matches!(emitter.events[0].data, EventData::MappingEnd);
    start && end
}

/// An empty document never suppresses the `---` indicator in this emitter;
/// kept as its own predicate (rather than inlined `false`) because a
/// document-level emptiness rule is a plausible future YAML 1.2 addition.
pub(super) fn check_empty_document(_emitter: &Emitter) -> bool {
    false
}

pub(super) fn check_simple_key(emitter: &Emitter, event: &Event, analysis: &Analysis) -> bool {
    let Analysis {
        tag,
        anchor,
        scalar,
    } = analysis;

    let mut length = anchor.as_ref().map_or(0, |a| a.anchor.len())
        + tag.as_ref().map_or(0, |t| t.handle.len() + t.suffix.len());

    match event.data {
        EventData::Alias { .. } => {
            length = analysis.anchor.as_ref().map_or(0, |a| a.anchor.len());
        }
        EventData::Scalar { .. } => {
            let Some(scalar) = scalar else {
                panic!("no analysis for scalar")
            };
            if scalar.multiline {
                return false;
            }
            length += scalar.value.len();
        }
        EventData::SequenceStart { .. } => {
            if !check_empty_sequence(emitter, event) {
                return false;
            }
        }
        EventData::MappingStart { .. } => {
            if !check_empty_mapping(emitter, event) {
                return false;
            }
        }
        _ => return false,
    }

    length <= 128
}

pub(super) fn select_scalar_style(
    emitter: &mut Emitter,
    event: &Event,
    scalar_analysis: &mut ScalarAnalysis,
    tag_analysis: &Option<TagAnalysis>,
) -> Result<(), EmitterError> {
    let EventData::Scalar {
        plain_implicit,
        quoted_implicit,
        style,
        ..
    } = &event.data
    else {
        unreachable!()
    };

    let mut style: ScalarStyle = *style;
    let no_tag = tag_analysis.is_none();
    if no_tag && !*plain_implicit && !*quoted_implicit {
        return emitter_error("neither tag nor implicit flags are specified");
    }
    if style == ScalarStyle::Any {
        style = ScalarStyle::Plain;
    }
    if emitter.canonical {
        style = ScalarStyle::DoubleQuoted;
    }
    if emitter.simple_key_context && scalar_analysis.multiline {
        style = ScalarStyle::DoubleQuoted;
    }
    if style == ScalarStyle::Plain {
        if emitter.flow_level != 0 && !scalar_analysis.flow_plain_allowed
            || emitter.flow_level == 0 && !scalar_analysis.block_plain_allowed
        {
            style = ScalarStyle::SingleQuoted;
        }
        if scalar_analysis.value.is_empty()
            && (emitter.flow_level != 0 || emitter.simple_key_context)
        {
            style = ScalarStyle::SingleQuoted;
        }
        if no_tag && !*plain_implicit {
            style = ScalarStyle::SingleQuoted;
        }
    }
    if style == ScalarStyle::SingleQuoted && !scalar_analysis.single_quoted_allowed {
        style = ScalarStyle::DoubleQuoted;
    }
    if (style == ScalarStyle::Literal || style == ScalarStyle::Folded)
        && (!scalar_analysis.block_allowed || emitter.flow_level != 0 || emitter.simple_key_context)
    {
        style = ScalarStyle::DoubleQuoted;
    }
    // No implicit `!` tag is synthesized here for non-plain, non-quoted-implicit
    // scalars with no tag of their own: earlier revisions of this routine set
    // one, but nothing downstream relies on it and it degrades readability of
    // the output. See DESIGN.md.
    scalar_analysis.style = style;
    Ok(())
}

pub(super) fn process_anchor(
    emitter: &mut Emitter,
    analysis: &Option<AnchorAnalysis>,
) -> Result<(), EmitterError> {
    let Some(analysis) = analysis.as_ref() else {
        return Ok(());
    };
    super::write::write_indicator(
        emitter,
        if analysis.alias { "*" } else { "&" },
        true,
        false,
        false,
    )?;
    super::write::write_anchor(emitter, analysis.anchor)
}

pub(super) fn process_tag(
    emitter: &mut Emitter,
    analysis: &Option<TagAnalysis>,
) -> Result<(), EmitterError> {
    let Some(analysis) = analysis.as_ref() else {
        return Ok(());
    };
    if analysis.handle.is_empty() && analysis.suffix.is_empty() {
        return Ok(());
    }
    if analysis.handle.is_empty() {
        super::write::write_indicator(emitter, "!<", true, false, false)?;
        super::write::write_tag_content(emitter, analysis.suffix, false)?;
        super::write::write_indicator(emitter, ">", false, false, false)?;
    } else {
        super::write::write_tag_handle(emitter, analysis.handle)?;
        if !analysis.suffix.is_empty() {
            super::write::write_tag_content(emitter, analysis.suffix, false)?;
        }
    }
    Ok(())
}

pub(super) fn process_scalar(
    emitter: &mut Emitter,
    analysis: &ScalarAnalysis,
) -> Result<(), EmitterError> {
    match analysis.style {
        ScalarStyle::Plain => {
            super::write::write_plain_scalar(emitter, analysis.value, !emitter.simple_key_context)
        }
        ScalarStyle::SingleQuoted => super::write::write_single_quoted_scalar(
            emitter,
            analysis.value,
            !emitter.simple_key_context,
        ),
        ScalarStyle::DoubleQuoted => super::write::write_double_quoted_scalar(
            emitter,
            analysis.value,
            !emitter.simple_key_context,
        ),
        ScalarStyle::Literal => super::write::write_literal_scalar(emitter, analysis.value),
        ScalarStyle::Folded => super::write::write_folded_scalar(emitter, analysis.value),
        ScalarStyle::Any => unreachable!("no scalar style chosen"),
    }
}

pub(super) fn analyze_version_directive(
    version_directive: VersionDirective,
) -> Result<(), EmitterError> {
    if version_directive.major != 1
        || (version_directive.minor != 1 && version_directive.minor != 2)
    {
        return Err(EmitterError::InvalidVersion {
            major: version_directive.major,
            minor: version_directive.minor,
        });
    }
    Ok(())
}

fn is_alpha_char(ch: char) -> bool {
    is_alpha(ch)
}

pub(super) fn analyze_tag_directive(tag_directive: &TagDirective) -> Result<(), EmitterError> {
    if tag_directive.handle.is_empty() {
        return emitter_error("tag handle must not be empty");
    }
    if !tag_directive.handle.starts_with('!') {
        return emitter_error("tag handle must start with '!'");
    }
    if !tag_directive.handle.ends_with('!') {
        return emitter_error("tag handle must end with '!'");
    }
    if tag_directive.handle.len() > 2 {
        let tag_content = &tag_directive.handle[1..tag_directive.handle.len() - 1];
        for ch in tag_content.chars() {
            if !is_alpha_char(ch) {
                return emitter_error("tag handle must contain alphanumerical characters only");
            }
        }
    }
    if tag_directive.prefix.is_empty() {
        return emitter_error("tag prefix must not be empty");
    }
    Ok(())
}

fn analyze_anchor(anchor: &str, alias: bool) -> Result<AnchorAnalysis, EmitterError> {
    if anchor.is_empty() {
        return emitter_error(if alias {
            "alias value must not be empty"
        } else {
            "anchor value must not be empty"
        });
    }
    for ch in anchor.chars() {
        if !is_alpha_char(ch) {
            return emitter_error(if alias {
                "alias value must contain alphanumerical characters only"
            } else {
                "anchor value must contain alphanumerical characters only"
            });
        }
    }
    Ok(AnchorAnalysis { anchor, alias })
}

fn analyze_tag<'a>(tag: &'a str, tag_directives: &'a [TagDirective]) -> Result<TagAnalysis<'a>, EmitterError> {
    if tag.is_empty() {
        return emitter_error("tag value must not be empty");
    }

    let mut handle = "";
    let mut suffix = tag;

    for tag_directive in tag_directives {
        let prefix_len = tag_directive.prefix.len();
        if prefix_len < tag.len() && tag_directive.prefix == tag[0..prefix_len] {
            handle = &tag_directive.handle;
            suffix = &tag[prefix_len..];
            break;
        }
    }

    Ok(TagAnalysis { handle, suffix })
}

pub(super) fn analyze_scalar(emitter: &Emitter, value: &str) -> ScalarAnalysis<'_> {
    let mut block_indicators = false;
    let mut flow_indicators = false;
    let mut line_breaks = false;
    let mut special_characters = false;
    let mut leading_space = false;
    let mut leading_break = false;
    let mut trailing_space = false;
    let mut trailing_break = false;
    let mut break_space = false;
    let mut space_break = false;
    let mut previous_space = false;
    let mut previous_break = false;

    if value.is_empty() {
        return ScalarAnalysis {
            value: "",
            multiline: false,
            flow_plain_allowed: false,
            block_plain_allowed: true,
            single_quoted_allowed: true,
            block_allowed: false,
            style: ScalarStyle::Any,
        };
    }

    if value.starts_with("---") || value.starts_with("...") {
        block_indicators = true;
        flow_indicators = true;
    }
    let mut preceded_by_whitespace = true;

    let mut chars = value.chars();
    let mut first = true;

    while let Some(ch) = chars.next() {
        let next = chars.clone().next();
        let followed_by_whitespace = is_blankz(next);
        if first {
            match ch {
                '#' | ',' | '[' | ']' | '{' | '}' | '&' | '*' | '!' | '|' | '>' | '\'' | '"'
                | '%' | '@' | '`' => {
                    flow_indicators = true;
                    block_indicators = true;
                }
                '?' | ':' => {
                    flow_indicators = true;
                    if followed_by_whitespace {
                        block_indicators = true;
                    }
                }
                '-' if followed_by_whitespace => {
                    flow_indicators = true;
                    block_indicators = true;
                }
                _ => {}
            }
        } else {
            match ch {
                ',' | '?' | '[' | ']' | '{' | '}' => {
                    flow_indicators = true;
                }
                ':' => {
                    flow_indicators = true;
                    if followed_by_whitespace {
                        block_indicators = true;
                    }
                }
                '#' if preceded_by_whitespace => {
                    flow_indicators = true;
                    block_indicators = true;
                }
                _ => {}
            }
        }

        if !is_printable(ch) || !is_ascii(ch) && !emitter.unicode {
            special_characters = true;
        }
        if is_break(ch) {
            line_breaks = true;
        }

        if is_space(ch) {
            if first {
                leading_space = true;
            }
            if next.is_none() {
                trailing_space = true;
            }
            if previous_break {
                break_space = true;
            }
            previous_space = true;
            previous_break = false;
        } else if is_break(ch) {
            if first {
                leading_break = true;
            }
            if next.is_none() {
                trailing_break = true;
            }
            if previous_space {
                space_break = true;
            }
            previous_space = false;
            previous_break = true;
        } else {
            previous_space = false;
            previous_break = false;
        }

        preceded_by_whitespace = is_blankz(ch);
        first = false;
    }

    let mut analysis = ScalarAnalysis {
        value,
        multiline: line_breaks,
        flow_plain_allowed: true,
        block_plain_allowed: true,
        single_quoted_allowed: true,
        block_allowed: true,
        style: ScalarStyle::Any,
    };

    if leading_space || leading_break || trailing_space || trailing_break {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
    }
    if trailing_space {
        analysis.block_allowed = false;
    }
    if break_space {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
        analysis.single_quoted_allowed = false;
    }
    if space_break || special_characters {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
        analysis.single_quoted_allowed = false;
        analysis.block_allowed = false;
    }
    if line_breaks {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
    }
    if flow_indicators {
        analysis.flow_plain_allowed = false;
    }
    if block_indicators {
        analysis.block_plain_allowed = false;
    }
    analysis
}

pub(super) fn analyze_event<'a>(
    emitter: &mut Emitter,
    event: &'a Event,
    tag_directives: &'a [TagDirective],
) -> Result<Analysis<'a>, EmitterError> {
    let mut analysis = Analysis::default();

    match &event.data {
        EventData::Alias { anchor } => {
            analysis.anchor = Some(analyze_anchor(anchor, true)?);
        }
        EventData::Scalar {
            anchor,
            tag,
            value,
            plain_implicit,
            quoted_implicit,
            ..
        } => {
            let (plain_implicit, quoted_implicit) = (*plain_implicit, *quoted_implicit);
            if let Some(anchor) = anchor {
                analysis.anchor = Some(analyze_anchor(anchor, false)?);
            }
            if tag.is_some() && (emitter.canonical || !plain_implicit && !quoted_implicit) {
                analysis.tag = Some(analyze_tag(tag.as_deref().unwrap(), tag_directives)?);
            }
            analysis.scalar = Some(analyze_scalar(emitter, value));
        }
        EventData::SequenceStart {
            anchor,
            tag,
            implicit,
            ..
        } => {
            if let Some(anchor) = anchor {
                analysis.anchor = Some(analyze_anchor(anchor, false)?);
            }
            if tag.is_some() && (emitter.canonical || !*implicit) {
                analysis.tag = Some(analyze_tag(tag.as_deref().unwrap(), tag_directives)?);
            }
        }
        EventData::MappingStart {
            anchor,
            tag,
            implicit,
            ..
        } => {
            if let Some(anchor) = anchor {
                analysis.anchor = Some(analyze_anchor(anchor, false)?);
            }
            if tag.is_some() && (emitter.canonical || !*implicit) {
                analysis.tag = Some(analyze_tag(tag.as_deref().unwrap(), tag_directives)?);
            }
        }
        _ => {}
    }

    Ok(analysis)
}

