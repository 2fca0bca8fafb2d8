//! # musocatalog
//!
//! Catalog entities and provider traits for MusoBridge.
//!
//! The media library itself (scanning, database, tagging) lives outside this
//! workspace; the bridge only ever reads from it. This crate defines the
//! read-only seams the browse adapter consumes:
//!
//! - [`ArtistProvider`] : alphabetical artist listing and lookups
//! - [`AlbumProvider`] : albums of an artist and lookups
//! - [`SongProvider`] : songs of an album
//!
//! All providers are `Send + Sync` and must tolerate concurrent calls; the
//! browse adapter holds no state and issues independent read queries per
//! request.
//!
//! [`memory::MemoryCatalog`] is a complete in-process implementation used by
//! tests and demos.

pub mod memory;

use serde::{Deserialize, Serialize};

/// Error types for catalog lookups
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("artist not found: {0}")]
    ArtistNotFound(u32),

    #[error("artist not found: {0}")]
    ArtistNameNotFound(String),

    #[error("album not found: {0}")]
    AlbumNotFound(u32),

    #[error("catalog backend error: {0}")]
    Backend(String),
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// An artist as stored in the media library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: u32,
    pub name: String,
}

/// An album as stored in the media library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: u32,
    pub name: String,
    /// Name of the album artist
    pub artist: String,
    /// Free-text comment attached to the album
    pub comment: Option<String>,
    pub song_count: u32,
}

/// A song as stored in the media library
///
/// Optional fields mirror what taggers actually deliver: anything can be
/// missing except the id and title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Song {
    pub id: u32,
    pub title: String,
    pub album: Option<String>,
    pub artist: Option<String>,
    pub year: Option<i32>,
    pub track_number: Option<u32>,
    pub genre: Option<String>,
    /// Free-text comment attached to the song
    pub comment: Option<String>,
    /// File suffix of the stored media ("mp3", "flac", ...)
    pub suffix: Option<String>,
    /// Pre-formatted duration display string ("4:06")
    pub duration: Option<String>,
}

/// Read-only access to the artist table
#[async_trait::async_trait]
pub trait ArtistProvider: Send + Sync {
    /// Lists artists in stable alphabetical order
    ///
    /// # Arguments
    ///
    /// * `offset` - Starting index (0-based)
    /// * `limit` - Maximum number of artists to return
    async fn list_alphabetical(&self, offset: u32, limit: u32) -> Result<Vec<Artist>>;

    /// Total number of artists in the library
    async fn count(&self) -> Result<u32>;

    /// Looks up an artist by numeric id
    async fn get_by_id(&self, id: u32) -> Result<Artist>;

    /// Looks up an artist by exact name
    ///
    /// Albums reference their artist by name, so resolving an album's parent
    /// container goes through this lookup.
    async fn get_by_name(&self, name: &str) -> Result<Artist>;
}

/// Read-only access to the album table
#[async_trait::async_trait]
pub trait AlbumProvider: Send + Sync {
    /// Lists the albums of an artist, in the library's stable order
    async fn list_for_artist(&self, artist: &str) -> Result<Vec<Album>>;

    /// Looks up an album by numeric id
    async fn get_by_id(&self, id: u32) -> Result<Album>;
}

/// Read-only access to the song table
#[async_trait::async_trait]
pub trait SongProvider: Send + Sync {
    /// Lists the songs of an album, in track order
    async fn list_for_album(&self, artist: &str, album: &str) -> Result<Vec<Song>>;
}

pub use async_trait::async_trait;
