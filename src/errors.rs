use std::{fmt, io, str::Utf8Error};
use quick_xml::events::attributes::AttrError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Xml,
    Json,
    Config,
    /// A `lat`/`lon` attribute that is not a finite float.
    NumericParse,
    /// A child tag without the attribute needed to route it.
    MissingAttribute,
    Other,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Error {
            kind,
            message: message.into(),
        }
    }

    pub fn numeric_parse(attribute: &str, value: &str) -> Self {
        Error::new(
            ErrorKind::NumericParse,
            format!("could not parse {attribute}={value:?} as a finite float"),
        )
    }

    pub fn missing_attribute(child: &str, attribute: &str) -> Self {
        Error::new(
            ErrorKind::MissingAttribute,
            format!("<{child}> is missing the '{attribute}' attribute"),
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            message: value.to_string()
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(value: quick_xml::Error) -> Self {
        Error {
            kind: ErrorKind::Xml,
            message: value.to_string()
        }
    }
}

impl From<AttrError> for Error {
    fn from(value: AttrError) -> Self {
        Error {
            kind: ErrorKind::Xml,
            message: value.to_string()
        }
    }
}

impl From<Utf8Error> for Error {
    fn from(value: Utf8Error) -> Self {
        Error {
            kind: ErrorKind::Xml,
            message: value.to_string()
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Json,
            message: value.to_string()
        }
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error {
            kind: ErrorKind::Other,
            message: value
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
