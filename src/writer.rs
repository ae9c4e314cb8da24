use crate::{Emitter, Encoding, WriterError};

/// Flush the accumulated characters to the output.
pub(crate) fn flush(emitter: &mut Emitter) -> Result<(), WriterError> {
    assert!(emitter.write_handler.is_some());
    assert_ne!(emitter.encoding, Encoding::Any);

    if emitter.buffer.is_empty() {
        return Ok(());
    }

    if emitter.encoding == Encoding::Utf8 {
        let to_emit = emitter.buffer.as_bytes();
        emitter
            .write_handler
            .as_mut()
            .expect("non-null writer")
            .write_all(to_emit)?;
        emitter.buffer.clear();
        return Ok(());
    }

    let big_endian = match emitter.encoding {
        Encoding::Any | Encoding::Utf8 => unreachable!("unhandled encoding"),
        Encoding::Utf16Le => false,
        Encoding::Utf16Be => true,
    };

    for unit in emitter.buffer.encode_utf16() {
        let bytes = if big_endian {
            unit.to_be_bytes()
        } else {
            unit.to_le_bytes()
        };
        emitter.raw_buffer.extend(bytes);
    }

    let to_emit = emitter.raw_buffer.as_slice();
    emitter
        .write_handler
        .as_mut()
        .expect("non-null writer")
        .write_all(to_emit)?;
    emitter.buffer.clear();
    emitter.raw_buffer.clear();
    Ok(())
}
