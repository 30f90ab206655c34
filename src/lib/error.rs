use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    /// A reduction was asked to bound zero elements.
    EmptyInput,
    UnrecognizedGeometryKind(String),
    UnrecognizedDocumentKind(String),
    /// A feature with a `null` geometry.
    MissingGeometry,
    /// A position with fewer than two ordinates.
    PositionTooShort(usize),
    GeoJson(geojson::Error),
    Json(serde_json::Error),
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "no geometry to bound"),
            Error::UnrecognizedGeometryKind(kind) => {
                write!(f, "unrecognized geometry type: {}", kind)
            }
            Error::UnrecognizedDocumentKind(kind) => {
                write!(f, "unrecognized document type: {}", kind)
            }
            Error::MissingGeometry => write!(f, "feature without geometry"),
            Error::PositionTooShort(len) => {
                write!(f, "a position needs two ordinates, found {}", len)
            }
            Error::GeoJson(e) => write!(f, "invalid geojson: {}", e),
            Error::Json(e) => write!(f, "invalid json: {}", e),
            Error::Io(e) => write!(f, "i/o error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::GeoJson(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json(error)
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
