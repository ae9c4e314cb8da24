/// Errors produced while emitting a YAML event stream.
///
/// Every variant corresponds to a distinct way the caller violated the
/// emitter's contract; none of them indicate a transient condition. An
/// emitter that has returned an error must not be used again.
#[derive(Debug, thiserror::Error)]
pub enum EmitterError {
    /// An event arrived that the current emitter state cannot handle, e.g.
    /// a `MappingEnd` while no mapping is open.
    #[error("unexpected event: {0}")]
    UnexpectedEvent(&'static str),
    /// A `%YAML` directive named a version this emitter cannot produce.
    #[error("incompatible %YAML directive: {major}.{minor}")]
    InvalidVersion {
        /// The offending major version.
        major: i32,
        /// The offending minor version.
        minor: i32,
    },
    /// The same tag handle was declared by two `%TAG` directives in one document.
    #[error("duplicate %TAG directive for handle {0:?}")]
    DuplicateTagDirective(String),
    /// An anchor, alias, or tag directive failed validation (empty value,
    /// disallowed characters, malformed handle, ...).
    #[error("{0}")]
    InvalidArgument(&'static str),
    /// The emitter was asked to do something its current state forbids,
    /// most commonly: emitting after `StreamEnd` has already been produced.
    #[error("invalid emitter state: {0}")]
    InvalidState(&'static str),
    /// The output sink returned an error.
    #[error(transparent)]
    Writer(#[from] WriterError),
}

/// Errors from the byte sink the emitter writes to.
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// The underlying `std::io::Write` implementation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_version_message_names_the_offending_numbers() {
        let err = EmitterError::InvalidVersion { major: 2, minor: 0 };
        assert_eq!(err.to_string(), "incompatible %YAML directive: 2.0");
    }

    #[test]
    fn duplicate_tag_directive_message_quotes_the_handle() {
        let err = EmitterError::DuplicateTagDirective(String::from("!e!"));
        assert_eq!(
            err.to_string(),
            "duplicate %TAG directive for handle \"!e!\""
        );
    }
}
