//! # ContentDirectory browse adapter
//!
//! Maps the library hierarchy (root → artists → albums → songs) onto the
//! generic ContentDirectory `Browse` contract. The adapter is stateless:
//! every call resolves its object id against the catalog providers and
//! returns a fully materialized [`BrowseResult`]. Concurrent requests need
//! no coordination beyond the providers tolerating concurrent reads.
//!
//! Pagination follows the ContentDirectory convention: the window selects
//! the emitted slice, while `total_matches` always reports the full
//! unwindowed count so control points can page. The artist list is windowed
//! at the provider (the artist table can be large); album and song lists are
//! fetched whole and sliced in memory.

use crate::browse::{
    AlbumContainer, ArtistContainer, BrowseMode, BrowseResult, BrowseWindow, ContentNode,
    RootContainer, SongItem,
};
use crate::error::{DirectoryError, Result};
use crate::object_id::{ObjectId, ROOT_ID, ROOT_PARENT_ID};
use crate::resource::StreamUrlBuilder;
use musocatalog::{Album, Artist, ArtistProvider, AlbumProvider, Song, SongProvider};
use std::sync::Arc;
use tracing::debug;

/// The browse adapter exposed to the UPnP transport
pub struct ContentDirectory {
    artists: Arc<dyn ArtistProvider>,
    albums: Arc<dyn AlbumProvider>,
    songs: Arc<dyn SongProvider>,
    urls: StreamUrlBuilder,
    root_title: String,
}

impl ContentDirectory {
    pub fn new(
        artists: Arc<dyn ArtistProvider>,
        albums: Arc<dyn AlbumProvider>,
        songs: Arc<dyn SongProvider>,
        urls: StreamUrlBuilder,
        root_title: impl Into<String>,
    ) -> Self {
        Self {
            artists,
            albums,
            songs,
            urls,
            root_title: root_title.into(),
        }
    }

    /// Browses an object of the content tree.
    ///
    /// # Arguments
    ///
    /// * `object_id` - Protocol-visible id (`"0"`, `"ar-<n>"`, `"al-<n>"`)
    /// * `mode` - Metadata of the object itself, or its direct children
    /// * `window` - Pagination window (`max == 0` = everything)
    ///
    /// Fails with a NotFound-class error when the id has no catalog entity,
    /// `MalformedId` when a marker carries a non-numeric suffix, and
    /// `Unsupported` for any other id class (raw song ids included).
    pub async fn browse(
        &self,
        object_id: &str,
        mode: BrowseMode,
        window: BrowseWindow,
    ) -> Result<BrowseResult> {
        debug!(
            object_id = %object_id,
            mode = ?mode,
            first = window.first,
            max = window.max,
            "ContentDirectory::Browse"
        );

        let result = match ObjectId::decode(object_id)? {
            ObjectId::Root => match mode {
                BrowseMode::Metadata => self.root_metadata().await?,
                BrowseMode::DirectChildren => self.list_artists(window).await?,
            },
            ObjectId::Artist(id) => {
                let artist = self.artists.get_by_id(id).await?;
                match mode {
                    BrowseMode::Metadata => {
                        BrowseResult::single(ContentNode::Artist(self.artist_container(&artist).await?))
                    }
                    BrowseMode::DirectChildren => self.list_albums(&artist, window).await?,
                }
            }
            ObjectId::Album(id) => {
                let album = self.albums.get_by_id(id).await?;
                let artist = self.artists.get_by_name(&album.artist).await?;
                match mode {
                    BrowseMode::Metadata => {
                        BrowseResult::single(ContentNode::Album(self.album_container(&artist, &album)))
                    }
                    BrowseMode::DirectChildren => self.list_songs(&album, window).await?,
                }
            }
            ObjectId::Unrecognized(raw) => return Err(DirectoryError::Unsupported(raw)),
        };

        debug!(
            returned = result.returned(),
            total = result.total_matches,
            "Browse completed"
        );
        Ok(result)
    }

    /// Searches the library. Not implemented: every call reports the
    /// default not-supported failure.
    pub async fn search(
        &self,
        container_id: &str,
        criteria: &str,
        _window: BrowseWindow,
    ) -> Result<BrowseResult> {
        debug!(
            container_id = %container_id,
            criteria = %criteria,
            "ContentDirectory::Search"
        );
        Err(DirectoryError::SearchNotSupported)
    }

    /// Metadata of the root container; the window never applies here.
    async fn root_metadata(&self) -> Result<BrowseResult> {
        let root = RootContainer {
            id: ROOT_ID.to_string(),
            parent_id: ROOT_PARENT_ID.to_string(),
            title: self.root_title.clone(),
            child_count: self.artists.count().await?,
        };
        Ok(BrowseResult::single(ContentNode::Root(root)))
    }

    /// Children of the root: the artist list, windowed at the provider.
    async fn list_artists(&self, window: BrowseWindow) -> Result<BrowseResult> {
        let page = self
            .artists
            .list_alphabetical(window.first, window.effective_max())
            .await?;

        let mut nodes = Vec::with_capacity(page.len());
        for artist in &page {
            nodes.push(ContentNode::Artist(self.artist_container(artist).await?));
        }

        Ok(BrowseResult {
            nodes,
            total_matches: self.artists.count().await?,
        })
    }

    /// Children of an artist: its albums, fetched whole and sliced.
    async fn list_albums(&self, artist: &Artist, window: BrowseWindow) -> Result<BrowseResult> {
        let albums = self.albums.list_for_artist(&artist.name).await?;
        let nodes = window
            .slice(&albums)
            .iter()
            .map(|album| ContentNode::Album(self.album_container(artist, album)))
            .collect();

        Ok(BrowseResult {
            nodes,
            total_matches: albums.len() as u32,
        })
    }

    /// Children of an album: its songs, fetched whole and sliced.
    async fn list_songs(&self, album: &Album, window: BrowseWindow) -> Result<BrowseResult> {
        let songs = self.songs.list_for_album(&album.artist, &album.name).await?;
        let nodes = window
            .slice(&songs)
            .iter()
            .map(|song| ContentNode::Song(self.song_item(album, song)))
            .collect();

        Ok(BrowseResult {
            nodes,
            total_matches: songs.len() as u32,
        })
    }

    /// The album count is recomputed on every request so the child count
    /// never drifts from what browsing the container would return.
    async fn artist_container(&self, artist: &Artist) -> Result<ArtistContainer> {
        let album_count = self.albums.list_for_artist(&artist.name).await?.len() as u32;
        Ok(ArtistContainer {
            id: ObjectId::Artist(artist.id).encode(),
            parent_id: ROOT_ID.to_string(),
            title: artist.name.clone(),
            child_count: album_count,
        })
    }

    fn album_container(&self, artist: &Artist, album: &Album) -> AlbumContainer {
        let id = ObjectId::Album(album.id).encode();
        let cover_art_url = self.urls.cover_art_url(&id);
        AlbumContainer {
            id,
            parent_id: ObjectId::Artist(artist.id).encode(),
            title: album.name.clone(),
            artist: artist.name.clone(),
            cover_art_url,
            description: album.comment.clone(),
            child_count: album.song_count,
        }
    }

    fn song_item(&self, album: &Album, song: &Song) -> SongItem {
        SongItem {
            id: song.id.to_string(),
            parent_id: ObjectId::Album(album.id).encode(),
            title: song.title.clone(),
            album: song.album.clone(),
            artist: song.artist.clone(),
            date: song.year.map(|year| format!("{year}-01-01")),
            track_number: song.track_number,
            genre: song.genre.clone(),
            description: song.comment.clone(),
            resource: self.urls.resource_for(song),
        }
    }
}
