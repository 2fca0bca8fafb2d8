//! # musodirectory - ContentDirectory adapter for MusoBridge
//!
//! This crate maps a read-only music catalog onto the UPnP ContentDirectory
//! `Browse` contract. The UPnP stack itself (SSDP discovery, SOAP dispatch,
//! device descriptors, DIDL-Lite encoding) is an external collaborator
//! behind the [`DirectoryTransport`] trait; what lives here is everything
//! that has logic in it:
//!
//! - [`object_id`] : the stable object-id scheme (`"0"`, `"ar-<n>"`,
//!   `"al-<n>"`) control points cache and re-submit;
//! - [`browse`] : browse modes, pagination windows, typed content nodes;
//! - [`directory`] : the stateless [`ContentDirectory`] adapter;
//! - [`resource`] : stream/cover URL construction with transcoding-aware
//!   MIME types;
//! - [`mime`] : the suffix → MIME table;
//! - [`lifecycle`] : explicit start/stop of the transport with an injected
//!   shutdown hook.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use musocatalog::{Artist, memory::MemoryCatalog};
//! use musodirectory::{
//!     BrowseMode, BrowseWindow, ContentDirectory, PassthroughTranscoding, StaticMimeTypes,
//!     StreamUrlBuilder,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), musodirectory::DirectoryError> {
//! let mut catalog = MemoryCatalog::new();
//! catalog.add_artist(Artist { id: 1, name: "Air".into() });
//! let catalog = Arc::new(catalog);
//!
//! let urls = StreamUrlBuilder::new(
//!     "192.168.1.42",
//!     4040,
//!     "",
//!     500,
//!     Arc::new(PassthroughTranscoding),
//!     Arc::new(StaticMimeTypes),
//! );
//! let directory = ContentDirectory::new(
//!     catalog.clone(),
//!     catalog.clone(),
//!     catalog,
//!     urls,
//!     "MusoBridge Media",
//! );
//!
//! let result = directory
//!     .browse("0", BrowseMode::DirectChildren, BrowseWindow::everything())
//!     .await?;
//! assert_eq!(result.returned(), 1);
//! # Ok(())
//! # }
//! ```

pub mod browse;
pub mod directory;
pub mod error;
pub mod lifecycle;
pub mod mime;
pub mod object_id;
pub mod resource;

pub use browse::{
    AlbumContainer, ArtistContainer, BrowseMode, BrowseResult, BrowseWindow, ContentNode,
    RootContainer, SongItem,
};
pub use directory::ContentDirectory;
pub use error::{DirectoryError, Result, UPNP_CANNOT_PROCESS};
pub use lifecycle::{DirectoryRuntime, DirectoryTransport, ServerIdentity};
pub use mime::{MimeTypeTable, StaticMimeTypes};
pub use object_id::{ALBUM_ID_PREFIX, ARTIST_ID_PREFIX, ObjectId, ROOT_ID, ROOT_PARENT_ID};
pub use resource::{
    PassthroughTranscoding, PlaybackProfile, ResourceDescriptor, StreamUrlBuilder,
    TranscodingDecision,
};
