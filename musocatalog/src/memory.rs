//! In-memory catalog implementation.
//!
//! Backs tests and demos with a small, fully owned library. Entries are
//! registered up front; afterwards the catalog is read-only and can be
//! shared behind an `Arc` across concurrent browse requests.

use crate::{
    Album, AlbumProvider, Artist, ArtistProvider, CatalogError, Result, Song, SongProvider,
};

/// Song entry keyed by the album it belongs to
#[derive(Debug, Clone)]
struct SongEntry {
    album_artist: String,
    album_name: String,
    song: Song,
}

/// A complete in-process media catalog
///
/// # Examples
///
/// ```
/// use musocatalog::memory::MemoryCatalog;
/// use musocatalog::{Artist, Album, Song};
///
/// let mut catalog = MemoryCatalog::new();
/// catalog.add_artist(Artist { id: 1, name: "Air".into() });
/// catalog.add_album(Album {
///     id: 10,
///     name: "Moon Safari".into(),
///     artist: "Air".into(),
///     comment: None,
///     song_count: 1,
/// });
/// catalog.add_song("Air", "Moon Safari", Song {
///     id: 100,
///     title: "La Femme d'Argent".into(),
///     ..Song::default()
/// });
/// ```
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    artists: Vec<Artist>,
    albums: Vec<Album>,
    songs: Vec<SongEntry>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_artist(&mut self, artist: Artist) {
        self.artists.push(artist);
    }

    pub fn add_album(&mut self, album: Album) {
        self.albums.push(album);
    }

    /// Registers a song under the album identified by `(album_artist, album_name)`
    pub fn add_song(&mut self, album_artist: &str, album_name: &str, song: Song) {
        self.songs.push(SongEntry {
            album_artist: album_artist.to_string(),
            album_name: album_name.to_string(),
            song,
        });
    }
}

#[async_trait::async_trait]
impl ArtistProvider for MemoryCatalog {
    async fn list_alphabetical(&self, offset: u32, limit: u32) -> Result<Vec<Artist>> {
        let mut sorted = self.artists.clone();
        sorted.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(sorted
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<u32> {
        Ok(self.artists.len() as u32)
    }

    async fn get_by_id(&self, id: u32) -> Result<Artist> {
        self.artists
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(CatalogError::ArtistNotFound(id))
    }

    async fn get_by_name(&self, name: &str) -> Result<Artist> {
        self.artists
            .iter()
            .find(|a| a.name == name)
            .cloned()
            .ok_or_else(|| CatalogError::ArtistNameNotFound(name.to_string()))
    }
}

#[async_trait::async_trait]
impl AlbumProvider for MemoryCatalog {
    async fn list_for_artist(&self, artist: &str) -> Result<Vec<Album>> {
        Ok(self
            .albums
            .iter()
            .filter(|a| a.artist == artist)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: u32) -> Result<Album> {
        self.albums
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(CatalogError::AlbumNotFound(id))
    }
}

#[async_trait::async_trait]
impl SongProvider for MemoryCatalog {
    async fn list_for_album(&self, artist: &str, album: &str) -> Result<Vec<Song>> {
        Ok(self
            .songs
            .iter()
            .filter(|e| e.album_artist == artist && e.album_name == album)
            .map(|e| e.song.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> MemoryCatalog {
        let mut catalog = MemoryCatalog::new();
        catalog.add_artist(Artist {
            id: 2,
            name: "Bach".into(),
        });
        catalog.add_artist(Artist {
            id: 1,
            name: "air".into(),
        });
        catalog.add_album(Album {
            id: 10,
            name: "Moon Safari".into(),
            artist: "air".into(),
            comment: Some("debut".into()),
            song_count: 2,
        });
        catalog.add_song(
            "air",
            "Moon Safari",
            Song {
                id: 100,
                title: "La Femme d'Argent".into(),
                track_number: Some(1),
                ..Song::default()
            },
        );
        catalog.add_song(
            "air",
            "Moon Safari",
            Song {
                id: 101,
                title: "Sexy Boy".into(),
                track_number: Some(2),
                ..Song::default()
            },
        );
        catalog
    }

    #[tokio::test]
    async fn alphabetical_order_ignores_case() {
        let catalog = sample_catalog();
        let artists = catalog.list_alphabetical(0, 10).await.unwrap();
        let names: Vec<_> = artists.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["air", "Bach"]);
    }

    #[tokio::test]
    async fn alphabetical_window() {
        let catalog = sample_catalog();
        let artists = catalog.list_alphabetical(1, 10).await.unwrap();
        assert_eq!(artists.len(), 1);
        assert_eq!(artists[0].name, "Bach");
        assert_eq!(catalog.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn lookups() {
        let catalog = sample_catalog();
        assert_eq!(
            ArtistProvider::get_by_id(&catalog, 1).await.unwrap().name,
            "air"
        );
        assert_eq!(catalog.get_by_name("Bach").await.unwrap().id, 2);
        assert!(matches!(
            ArtistProvider::get_by_id(&catalog, 99).await,
            Err(CatalogError::ArtistNotFound(99))
        ));
        assert_eq!(
            AlbumProvider::get_by_id(&catalog, 10).await.unwrap().name,
            "Moon Safari"
        );
    }

    #[tokio::test]
    async fn songs_follow_album_key() {
        let catalog = sample_catalog();
        let songs = catalog.list_for_album("air", "Moon Safari").await.unwrap();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].title, "La Femme d'Argent");

        let none = catalog.list_for_album("air", "Talkie Walkie").await.unwrap();
        assert!(none.is_empty());
    }
}
