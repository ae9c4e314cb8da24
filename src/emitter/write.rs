//! Low-level output: column/line tracking, indicators, indentation, and the
//! five scalar-writing routines (plain, single- and double-quoted, literal,
//! folded).

use crate::chars::{is_alpha, is_ascii, is_blank, is_blankz, is_bom, is_break, is_breakz, is_printable, is_space};
use crate::{Break, EmitterError, WriterError};

use super::Emitter;

fn flush(emitter: &mut Emitter) -> Result<(), WriterError> {
    if emitter.buffer.len() < crate::OUTPUT_BUFFER_SIZE - 5 {
        Ok(())
    } else {
        crate::writer::flush(emitter)
    }
}

fn put(emitter: &mut Emitter, value: u8) -> Result<(), WriterError> {
    flush(emitter)?;
    emitter.buffer.push(char::from(value));
    emitter.column += 1;
    Ok(())
}

fn put_break(emitter: &mut Emitter) -> Result<(), WriterError> {
    flush(emitter)?;
    match emitter.line_break {
        Break::Cr => emitter.buffer.push('\r'),
        Break::Ln => emitter.buffer.push('\n'),
        Break::CrLn => emitter.buffer.push_str("\r\n"),
        Break::Any => {}
    }
    emitter.column = 0;
    emitter.line += 1;
    Ok(())
}

fn write_char(emitter: &mut Emitter, ch: char) -> Result<(), WriterError> {
    flush(emitter)?;
    emitter.buffer.push(ch);
    emitter.column += 1;
    Ok(())
}

fn write_str(emitter: &mut Emitter, string: &str) -> Result<(), WriterError> {
    for ch in string.chars() {
        write_char(emitter, ch)?;
    }
    Ok(())
}

fn write_break_char(emitter: &mut Emitter, ch: char) -> Result<(), WriterError> {
    flush(emitter)?;
    if ch == '\n' {
        put_break(emitter)?;
    } else {
        write_char(emitter, ch)?;
        emitter.column = 0;
        emitter.line += 1;
    }
    Ok(())
}

/// Write a single space without touching the whitespace/indention flags,
/// e.g. the separator before an alias in simple-key context.
pub(super) fn write_space(emitter: &mut Emitter) -> Result<(), EmitterError> {
    put(emitter, b' ')?;
    Ok(())
}

pub(super) fn write_bom(emitter: &mut Emitter) -> Result<(), EmitterError> {
    flush(emitter)?;
    emitter.buffer.push('\u{feff}');
    Ok(())
}

pub(super) fn write_indent(emitter: &mut Emitter) -> Result<(), EmitterError> {
    let indent = if emitter.indent >= 0 { emitter.indent } else { 0 };
    if !emitter.indention || emitter.column > indent || (emitter.column == indent && !emitter.whitespace) {
        put_break(emitter)?;
    }
    while emitter.column < indent {
        put(emitter, b' ')?;
    }
    emitter.whitespace = true;
    emitter.indention = true;
    Ok(())
}

pub(super) fn write_indicator(
    emitter: &mut Emitter,
    indicator: &str,
    need_whitespace: bool,
    is_whitespace: bool,
    is_indention: bool,
) -> Result<(), EmitterError> {
    if need_whitespace && !emitter.whitespace {
        put(emitter, b' ')?;
    }
    write_str(emitter, indicator)?;
    emitter.whitespace = is_whitespace;
    emitter.indention = emitter.indention && is_indention;
    Ok(())
}

pub(super) fn write_anchor(emitter: &mut Emitter, value: &str) -> Result<(), EmitterError> {
    write_str(emitter, value)?;
    emitter.whitespace = false;
    emitter.indention = false;
    Ok(())
}

pub(super) fn write_tag_handle(emitter: &mut Emitter, value: &str) -> Result<(), EmitterError> {
    if !emitter.whitespace {
        put(emitter, b' ')?;
    }
    write_str(emitter, value)?;
    emitter.whitespace = false;
    emitter.indention = false;
    Ok(())
}

pub(super) fn write_tag_content(
    emitter: &mut Emitter,
    value: &str,
    need_whitespace: bool,
) -> Result<(), EmitterError> {
    if need_whitespace && !emitter.whitespace {
        put(emitter, b' ')?;
    }

    for ch in value.chars() {
        if is_alpha(ch) {
            write_char(emitter, ch)?;
            continue;
        }
        match ch {
            ';' | '/' | '?' | ':' | '@' | '&' | '=' | '+' | '$' | ',' | '_' | '.' | '~' | '*'
            | '(' | ')' | '[' | ']' | '!' => {
                write_char(emitter, ch)?;
                continue;
            }
            _ => {}
        }

        let mut encode_buffer = [0u8; 4];
        let encoded = ch.encode_utf8(&mut encode_buffer);
        for byte in encoded.bytes() {
            let upper = (byte >> 4) + if (byte >> 4) < 10 { b'0' } else { b'A' - 10 };
            let lower = (byte & 0x0F) + if (byte & 0x0F) < 10 { b'0' } else { b'A' - 10 };
            put(emitter, b'%')?;
            put(emitter, upper)?;
            put(emitter, lower)?;
        }
    }

    emitter.whitespace = false;
    emitter.indention = false;
    Ok(())
}

pub(super) fn write_plain_scalar(
    emitter: &mut Emitter,
    value: &str,
    allow_breaks: bool,
) -> Result<(), EmitterError> {
    let mut spaces = false;
    let mut breaks = false;
    if !emitter.whitespace && (!value.is_empty() || emitter.flow_level != 0) {
        put(emitter, b' ')?;
    }

    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        let next = chars.clone().next();
        if is_space(ch) {
            if allow_breaks && !spaces && emitter.column > emitter.best_width && !is_space(next) {
                write_indent(emitter)?;
            } else {
                write_char(emitter, ch)?;
            }
            spaces = true;
        } else if is_break(ch) {
            if !breaks && ch == '\n' {
                put_break(emitter)?;
            }
            write_break_char(emitter, ch)?;
            emitter.indention = true;
            breaks = true;
        } else {
            if breaks {
                write_indent(emitter)?;
            }
            write_char(emitter, ch)?;
            emitter.indention = false;
            spaces = false;
            breaks = false;
        }
    }
    emitter.whitespace = false;
    emitter.indention = false;
    Ok(())
}

pub(super) fn write_single_quoted_scalar(
    emitter: &mut Emitter,
    value: &str,
    allow_breaks: bool,
) -> Result<(), EmitterError> {
    let mut spaces = false;
    let mut breaks = false;
    write_indicator(emitter, "'", true, false, false)?;

    let mut chars = value.chars();
    let mut is_first = true;
    while let Some(ch) = chars.next() {
        let next = chars.clone().next();
        let is_last = next.is_none();

        if is_space(ch) {
            if allow_breaks
                && !spaces
                && emitter.column > emitter.best_width
                && !is_first
                && !is_last
                && !is_space(next)
            {
                write_indent(emitter)?;
            } else {
                write_char(emitter, ch)?;
            }
            spaces = true;
        } else if is_break(ch) {
            if !breaks && ch == '\n' {
                put_break(emitter)?;
            }
            write_break_char(emitter, ch)?;
            emitter.indention = true;
            breaks = true;
        } else {
            if breaks {
                write_indent(emitter)?;
            }
            if ch == '\'' {
                put(emitter, b'\'')?;
            }
            write_char(emitter, ch)?;
            emitter.indention = false;
            spaces = false;
            breaks = false;
        }

        is_first = false;
    }
    if breaks {
        write_indent(emitter)?;
    }
    write_indicator(emitter, "'", false, false, false)?;
    emitter.whitespace = false;
    emitter.indention = false;
    Ok(())
}

pub(super) fn write_double_quoted_scalar(
    emitter: &mut Emitter,
    value: &str,
    allow_breaks: bool,
) -> Result<(), EmitterError> {
    let mut spaces = false;
    write_indicator(emitter, "\"", true, false, false)?;

    let mut chars = value.chars();
    let mut first = true;
    while let Some(ch) = chars.next() {
        if !is_printable(ch)
            || !emitter.unicode && !is_ascii(ch)
            || is_bom(ch)
            || is_break(ch)
            || ch == '"'
            || ch == '\\'
        {
            put(emitter, b'\\')?;
            match ch {
                '\0' => put(emitter, b'0')?,
                '\x07' => put(emitter, b'a')?,
                '\x08' => put(emitter, b'b')?,
                '\x09' => put(emitter, b't')?,
                '\x0A' => put(emitter, b'n')?,
                '\x0B' => put(emitter, b'v')?,
                '\x0C' => put(emitter, b'f')?,
                '\x0D' => put(emitter, b'r')?,
                '\x1B' => put(emitter, b'e')?,
                '\x22' => put(emitter, b'"')?,
                '\x5C' => put(emitter, b'\\')?,
                '\u{0085}' => put(emitter, b'N')?,
                '\u{00A0}' => put(emitter, b'_')?,
                '\u{2028}' => put(emitter, b'L')?,
                '\u{2029}' => put(emitter, b'P')?,
                _ => {
                    let (prefix, width) = if ch <= '\u{00ff}' {
                        (b'x', 2)
                    } else if ch <= '\u{ffff}' {
                        (b'u', 4)
                    } else {
                        (b'U', 8)
                    };
                    put(emitter, prefix)?;
                    let mut k = (width - 1) * 4;
                    let value_0 = ch as u32;
                    while k >= 0 {
                        let digit = (value_0 >> k) & 0x0F;
                        let digit_char = char::from_digit(digit, 16)
                            .expect("digit out of range")
                            .to_ascii_uppercase();
                        put(emitter, digit_char as u8)?;
                        k -= 4;
                    }
                }
            }
            spaces = false;
        } else if is_space(ch) {
            if allow_breaks
                && !spaces
                && emitter.column > emitter.best_width
                && !first
                && chars.clone().next().is_some()
            {
                write_indent(emitter)?;
                if is_space(chars.clone().next()) {
                    put(emitter, b'\\')?;
                }
            } else {
                write_char(emitter, ch)?;
            }
            spaces = true;
        } else {
            write_char(emitter, ch)?;
            spaces = false;
        }

        first = false;
    }
    write_indicator(emitter, "\"", false, false, false)?;
    emitter.whitespace = false;
    emitter.indention = false;
    Ok(())
}

fn write_block_scalar_hints(emitter: &mut Emitter, string: &str) -> Result<(), EmitterError> {
    let mut chomp_hint: Option<&str> = None;

    let first = string.chars().next();
    if is_space(first) || is_break(first) {
        let indent_hint =
            char::from_digit(emitter.best_indent as u32, 10).expect("best_indent out of range");
        let mut indent_hint_buffer = [0u8; 1];
        let indent_hint = indent_hint.encode_utf8(&mut indent_hint_buffer);
        write_indicator(emitter, indent_hint, false, false, false)?;
    }
    emitter.open_ended = 0;

    if string.is_empty() {
        chomp_hint = Some("-");
    } else {
        let mut chars_rev = string.chars().rev();
        let ch = chars_rev.next();
        let next = chars_rev.next();

        if !is_break(ch) {
            chomp_hint = Some("-");
        } else if is_breakz(next) {
            chomp_hint = Some("+");
            emitter.open_ended = 2;
        }
    }

    if let Some(chomp_hint) = chomp_hint {
        write_indicator(emitter, chomp_hint, false, false, false)?;
    }
    Ok(())
}

pub(super) fn write_literal_scalar(emitter: &mut Emitter, value: &str) -> Result<(), EmitterError> {
    let mut breaks = true;
    write_indicator(emitter, "|", true, false, false)?;
    write_block_scalar_hints(emitter, value)?;
    put_break(emitter)?;
    emitter.indention = true;
    emitter.whitespace = true;

    for ch in value.chars() {
        if is_break(ch) {
            write_break_char(emitter, ch)?;
            emitter.indention = true;
            breaks = true;
        } else {
            if breaks {
                write_indent(emitter)?;
            }
            write_char(emitter, ch)?;
            emitter.indention = false;
            breaks = false;
        }
    }
    Ok(())
}

pub(super) fn write_folded_scalar(emitter: &mut Emitter, value: &str) -> Result<(), EmitterError> {
    let mut breaks = true;
    let mut leading_spaces = true;
    write_indicator(emitter, ">", true, false, false)?;
    write_block_scalar_hints(emitter, value)?;
    put_break(emitter)?;
    emitter.indention = true;
    emitter.whitespace = true;

    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if is_break(ch) {
            if !breaks && !leading_spaces && ch == '\n' {
                let mut skip_breaks = chars.clone();
                while is_break(skip_breaks.next()) {}
                if !is_blankz(skip_breaks.next()) {
                    put_break(emitter)?;
                }
            }
            write_break_char(emitter, ch)?;
            emitter.indention = true;
            breaks = true;
        } else {
            if breaks {
                write_indent(emitter)?;
                leading_spaces = is_blank(ch);
            }
            if !breaks
                && is_space(ch)
                && !is_space(chars.clone().next())
                && emitter.column > emitter.best_width
            {
                write_indent(emitter)?;
            } else {
                write_char(emitter, ch)?;
            }
            emitter.indention = false;
            breaks = false;
        }
    }
    Ok(())
}
