// crates/devdesc-rs-iodd/src/error.rs

use alloc::fmt;
use quick_xml::Error as XmlError;
use quick_xml::errors::serialize::DeError;
use quick_xml::errors::serialize::SeError;

/// Errors that can occur during IODD parsing or reconstruction.
#[derive(Debug)]
pub enum IoddError {
    /// An error from the underlying `quick-xml` deserializer (malformed XML).
    XmlParsing(DeError),

    /// An error from the underlying `quick-xml` serializer.
    XmlSerializing(SeError),

    /// An error from the underlying `quick-xml` reader or writer.
    XmlWriting(XmlError),

    /// An error occurred during string formatting.
    FmtError(fmt::Error),

    /// A required XML element was missing (e.g. the `IODevice` root).
    MissingElement { element: &'static str },
}

impl From<DeError> for IoddError {
    fn from(e: DeError) -> Self {
        IoddError::XmlParsing(e)
    }
}

impl From<SeError> for IoddError {
    fn from(e: SeError) -> Self {
        IoddError::XmlSerializing(e)
    }
}

impl From<XmlError> for IoddError {
    fn from(e: XmlError) -> Self {
        IoddError::XmlWriting(e)
    }
}

impl From<fmt::Error> for IoddError {
    fn from(e: fmt::Error) -> Self {
        IoddError::FmtError(e)
    }
}

impl fmt::Display for IoddError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoddError::XmlParsing(e) => write!(f, "XML parsing error: {}", e),
            IoddError::XmlSerializing(e) => write!(f, "XML serializing error: {}", e),
            IoddError::XmlWriting(e) => write!(f, "XML writing error: {}", e),
            IoddError::FmtError(e) => write!(f, "Formatting error: {}", e),
            IoddError::MissingElement { element } => {
                write!(f, "Missing required XML element: {}", element)
            }
        }
    }
}
