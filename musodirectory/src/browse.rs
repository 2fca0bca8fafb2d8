//! Browse request/response model.
//!
//! These types are what the directory hands to the transport: typed content
//! nodes, not DIDL-Lite XML. Serializing to the wire format is the
//! transport's job.

use crate::error::DirectoryError;
use crate::resource::ResourceDescriptor;
use std::str::FromStr;

/// The two browse modes of the ContentDirectory `Browse` action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseMode {
    /// Metadata of the addressed object itself
    Metadata,
    /// Direct children of the addressed container
    DirectChildren,
}

impl FromStr for BrowseMode {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BrowseMetadata" => Ok(BrowseMode::Metadata),
            "BrowseDirectChildren" => Ok(BrowseMode::DirectChildren),
            other => Err(DirectoryError::InvalidBrowseFlag(other.to_string())),
        }
    }
}

/// Pagination window of a browse request
///
/// `max == 0` means "everything from `first` on", per the ContentDirectory
/// convention for RequestedCount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowseWindow {
    pub first: u32,
    pub max: u32,
}

impl BrowseWindow {
    pub fn new(first: u32, max: u32) -> Self {
        Self { first, max }
    }

    /// The whole list, no windowing
    pub fn everything() -> Self {
        Self { first: 0, max: 0 }
    }

    /// Requested count with the `0 = unbounded` convention applied
    pub fn effective_max(&self) -> u32 {
        if self.max == 0 { u32::MAX } else { self.max }
    }

    /// Applies the window to a fully materialized list.
    ///
    /// Returns `full[first .. min(len, first + max)]`; a `first` beyond the
    /// end yields an empty slice.
    pub fn slice<'a, T>(&self, full: &'a [T]) -> &'a [T] {
        let len = full.len();
        let first = self.first as usize;
        if first >= len {
            return &[];
        }
        let end = len.min(first.saturating_add(self.effective_max() as usize));
        &full[first..end]
    }
}

/// The root container of the whole library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootContainer {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    /// Total number of artists in the library
    pub child_count: u32,
}

/// One artist, child of the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistContainer {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    /// Number of albums of this artist, recomputed per request
    pub child_count: u32,
}

/// One album, child of an artist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumContainer {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    pub artist: String,
    pub cover_art_url: String,
    /// Album comment from the library, when present
    pub description: Option<String>,
    pub child_count: u32,
}

/// One playable song, child of an album
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongItem {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    pub album: Option<String>,
    pub artist: Option<String>,
    /// Release date rendered as `"<year>-01-01"` when the year is known
    pub date: Option<String>,
    pub track_number: Option<u32>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub resource: ResourceDescriptor,
}

/// A node of the browse tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    Root(RootContainer),
    Artist(ArtistContainer),
    Album(AlbumContainer),
    Song(SongItem),
}

impl ContentNode {
    pub fn id(&self) -> &str {
        match self {
            ContentNode::Root(c) => &c.id,
            ContentNode::Artist(c) => &c.id,
            ContentNode::Album(c) => &c.id,
            ContentNode::Song(s) => &s.id,
        }
    }

    pub fn parent_id(&self) -> &str {
        match self {
            ContentNode::Root(c) => &c.parent_id,
            ContentNode::Artist(c) => &c.parent_id,
            ContentNode::Album(c) => &c.parent_id,
            ContentNode::Song(s) => &s.parent_id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ContentNode::Root(c) => &c.title,
            ContentNode::Artist(c) => &c.title,
            ContentNode::Album(c) => &c.title,
            ContentNode::Song(s) => &s.title,
        }
    }

    /// Conventional UPnP class string the transport tags DIDL output with
    pub fn upnp_class(&self) -> &'static str {
        match self {
            ContentNode::Root(_) => "object.container.storageFolder",
            ContentNode::Artist(_) => "object.container.person.musicArtist",
            ContentNode::Album(_) => "object.container.album.musicAlbum",
            ContentNode::Song(_) => "object.item.audioItem.musicTrack",
        }
    }

    pub fn is_container(&self) -> bool {
        !matches!(self, ContentNode::Song(_))
    }
}

/// Result of a browse call
///
/// `total_matches` counts the full, unwindowed list so control points can
/// page through it; the returned count is always the emitted node count,
/// never the window size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseResult {
    pub nodes: Vec<ContentNode>,
    pub total_matches: u32,
}

impl BrowseResult {
    /// A single-node metadata result (`returned = total = 1`)
    pub fn single(node: ContentNode) -> Self {
        Self {
            nodes: vec![node],
            total_matches: 1,
        }
    }

    /// Number of emitted nodes
    pub fn returned(&self) -> u32 {
        self.nodes.len() as u32
    }
}
