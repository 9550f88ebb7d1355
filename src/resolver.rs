//! Content Resolver Module
//!
//! The boundary between the cache and whatever backs its sources. The cache
//! never opens a source itself; it asks an injected [`ContentResolver`] to
//! turn an opaque [`SourceUri`] into a sequential byte stream.

use std::collections::HashMap;
use std::fmt;
use std::io::{Cursor, Read};

use thiserror::Error;

// == Source Uri ==
/// An opaque content-source identifier.
///
/// The cache attaches no meaning to the identifier beyond its scheme, which
/// is used to decide whether the injected resolver recognizes the source at
/// all. The identifier is never interpreted as a filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceUri(String);

impl SourceUri {
    /// Wraps a raw identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The scheme portion of the identifier (text before the first `:`),
    /// or `None` if the identifier carries no scheme.
    pub fn scheme(&self) -> Option<&str> {
        match self.0.split_once(':') {
            Some(("", _)) => None,
            Some((scheme, _)) => Some(scheme),
            None => None,
        }
    }

    /// The full identifier as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceUri {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for SourceUri {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

// == Resolve Error ==
/// Failure modes reported by a resolver when opening a source.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The source does not exist (or no longer exists).
    #[error("source not found: {0}")]
    NotFound(String),

    /// The source exists but could not be opened.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// == Content Resolver Trait ==
/// Injected capability that opens an opaque source as a readable stream.
///
/// The cache does not know or care how sources are backed; a resolver may
/// serve remote handles, virtual documents, or anything else that yields
/// bytes. Implementations must answer [`recognizes`](Self::recognizes)
/// without performing I/O, since the cache consults it before touching
/// storage.
pub trait ContentResolver: Send + Sync {
    /// Whether this resolver can handle sources of the given kind.
    fn recognizes(&self, source: &SourceUri) -> bool;

    /// Opens the source as a sequential byte stream.
    fn open_stream(&self, source: &SourceUri) -> Result<Box<dyn Read + Send>, ResolveError>;
}

// == Memory Resolver ==
/// A resolver serving byte buffers registered up front, keyed by the full
/// source identifier.
///
/// Useful as a stand-in where no real source backend exists; the crate's
/// own tests admit sources through it.
#[derive(Debug, Default)]
pub struct MemoryResolver {
    scheme: String,
    sources: HashMap<String, Vec<u8>>,
}

impl MemoryResolver {
    /// Creates a resolver recognizing the given scheme.
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            sources: HashMap::new(),
        }
    }

    /// Registers the bytes served for `uri`.
    pub fn insert(&mut self, uri: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.sources.insert(uri.into(), bytes.into());
    }
}

impl ContentResolver for MemoryResolver {
    fn recognizes(&self, source: &SourceUri) -> bool {
        source.scheme() == Some(self.scheme.as_str())
    }

    fn open_stream(&self, source: &SourceUri) -> Result<Box<dyn Read + Send>, ResolveError> {
        match self.sources.get(source.as_str()) {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
            None => Err(ResolveError::NotFound(source.to_string())),
        }
    }
}
