//! Size-bounded JSON document used for every settings load and save.
//!
//! A [`BoundedDocument`] is a JSON object (the *root*) together with a fixed
//! capacity in bytes.  The capacity bounds the document's **serialized** size:
//!
//! - Parsing rejects any input longer than the capacity before looking at it.
//! - Encoding rejects any root whose compact JSON form would not fit.
//!
//! Neither direction ever truncates.  A document that does not fit is an
//! error, and the caller decides what to do about it (the persistence
//! controller falls back to defaults on load and reports failure on save).
//!
//! # Why bound the size at all? (for beginners)
//!
//! On a microcontroller the file system may be a few hundred kilobytes of
//! flash and the heap a few tens of kilobytes.  Reading an arbitrarily large
//! (possibly corrupted) file into memory could exhaust the heap.  Sharing a
//! single constant, [`MAX_FILE_SIZE`], between the file-size check and the
//! document buffer keeps the worst case known at compile time.

use serde_json::{Map, Value};
use thiserror::Error;

/// Maximum size in bytes of a persisted settings document.
pub const MAX_FILE_SIZE: usize = 1024;

/// The root object type of a settings document.
pub type JsonObject = Map<String, Value>;

/// Errors produced while parsing or encoding a [`BoundedDocument`].
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The input or the encoded output is larger than the document capacity.
    #[error("document of {size} bytes exceeds capacity of {capacity} bytes")]
    TooLarge { size: usize, capacity: usize },

    /// The bytes are not valid JSON.
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The bytes are valid JSON but the root is not an object.
    #[error("document root must be an object, found {0}")]
    RootNotObject(&'static str),
}

/// A JSON object with a fixed maximum serialized size.
///
/// # Examples
///
/// ```rust
/// use settings_core::BoundedDocument;
///
/// let doc = BoundedDocument::from_slice(br#"{"led_on":true}"#, 64).unwrap();
/// assert_eq!(doc.root()["led_on"], true);
///
/// // Arrays parse as JSON but are not accepted as a settings root.
/// assert!(BoundedDocument::from_slice(b"[1,2,3]", 64).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedDocument {
    capacity: usize,
    root: JsonObject,
}

impl BoundedDocument {
    /// Creates an empty document with capacity [`MAX_FILE_SIZE`].
    pub fn new() -> Self {
        Self::with_capacity(MAX_FILE_SIZE)
    }

    /// Creates an empty document with the given capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            root: JsonObject::new(),
        }
    }

    /// Parses `bytes` into a document of the given capacity.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::TooLarge`] if `bytes` is longer than `capacity`
    ///   (checked before parsing).
    /// - [`DocumentError::Malformed`] if `bytes` is not valid JSON.
    /// - [`DocumentError::RootNotObject`] if the JSON root is not an object.
    pub fn from_slice(bytes: &[u8], capacity: usize) -> Result<Self, DocumentError> {
        if bytes.len() > capacity {
            return Err(DocumentError::TooLarge {
                size: bytes.len(),
                capacity,
            });
        }

        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(root) => Ok(Self { capacity, root }),
            other => Err(DocumentError::RootNotObject(kind_of(&other))),
        }
    }

    /// Returns the capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the root object.
    pub fn root(&self) -> &JsonObject {
        &self.root
    }

    /// Returns the root object for modification.
    pub fn root_mut(&mut self) -> &mut JsonObject {
        &mut self.root
    }

    /// Returns `true` if the root object has no members.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Encodes the document as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::TooLarge`] if the encoding is longer than the
    /// capacity.  The output is never truncated to fit.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        let bytes = serde_json::to_vec(&self.root)?;
        if bytes.len() > self.capacity {
            return Err(DocumentError::TooLarge {
                size: bytes.len(),
                capacity: self.capacity,
            });
        }
        Ok(bytes)
    }
}

impl Default for BoundedDocument {
    fn default() -> Self {
        Self::new()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
