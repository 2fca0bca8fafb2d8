//! Object-id encoding for the browse tree.
//!
//! Object ids are a persisted contract: control points cache them and
//! re-submit them in later Browse calls, so the encoding must stay stable
//! across requests and releases.
//!
//! - `"0"` is the root container;
//! - `"ar-<n>"` addresses artist `n`;
//! - `"al-<n>"` addresses album `n`;
//! - bare numeric song ids terminate the tree and are never browsed as
//!   containers; they decode to [`ObjectId::Unrecognized`], and the
//!   directory rejects them as unsupported.

use crate::error::{DirectoryError, Result};
use std::fmt;

/// Object id of the root container
pub const ROOT_ID: &str = "0";

/// Parent id advertised for the root container
pub const ROOT_PARENT_ID: &str = "-1";

/// Marker prefix for artist container ids
pub const ARTIST_ID_PREFIX: &str = "ar-";

/// Marker prefix for album container ids
pub const ALBUM_ID_PREFIX: &str = "al-";

/// Decoded identity of a browse-tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectId {
    Root,
    Artist(u32),
    Album(u32),
    /// Anything without a recognized marker, raw song ids included
    Unrecognized(String),
}

impl ObjectId {
    /// Decodes a protocol-visible object id.
    ///
    /// A recognized marker followed by a non-numeric suffix is a
    /// [`DirectoryError::MalformedId`]; an id without any marker decodes to
    /// [`ObjectId::Unrecognized`] and is rejected later, at dispatch.
    pub fn decode(raw: &str) -> Result<Self> {
        if raw == ROOT_ID {
            return Ok(ObjectId::Root);
        }
        if let Some(suffix) = raw.strip_prefix(ARTIST_ID_PREFIX) {
            return suffix
                .parse()
                .map(ObjectId::Artist)
                .map_err(|_| DirectoryError::MalformedId(raw.to_string()));
        }
        if let Some(suffix) = raw.strip_prefix(ALBUM_ID_PREFIX) {
            return suffix
                .parse()
                .map(ObjectId::Album)
                .map_err(|_| DirectoryError::MalformedId(raw.to_string()));
        }
        Ok(ObjectId::Unrecognized(raw.to_string()))
    }

    /// Encodes back to the protocol-visible string form.
    pub fn encode(&self) -> String {
        match self {
            ObjectId::Root => ROOT_ID.to_string(),
            ObjectId::Artist(id) => format!("{ARTIST_ID_PREFIX}{id}"),
            ObjectId::Album(id) => format!("{ALBUM_ID_PREFIX}{id}"),
            ObjectId::Unrecognized(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
