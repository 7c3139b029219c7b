use std::fmt;

/// Position of a value inside an upload record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Image,
    Text,
    Format,
    Trailer,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Image => "image",
            Field::Text => "text",
            Field::Format => "format",
            Field::Trailer => "trailer",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("record ended before the {0} value")]
    Missing(Field),

    #[error("malformed {field} value")]
    Malformed {
        field: Field,
        #[source]
        source: rmpv::decode::Error,
    },

    #[error("expected {expected} for the {field} value, found {found}")]
    UnexpectedType {
        field: Field,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0} value is not valid UTF-8")]
    InvalidUtf8(Field),

    #[error("{0} unexpected bytes after the record")]
    TrailingBytes(usize),
}
