//! Stream and cover-art URL construction.
//!
//! Resources are recomputed for every request: the MIME type depends on the
//! transcoding decision for the requesting profile, and the host address may
//! change between runs. Nothing here is persisted.

use crate::mime::MimeTypeTable;
use musocatalog::Song;
use musoconfig::Config;
use std::sync::Arc;
use tracing::debug;

/// A playback profile a stream is produced for
///
/// The bridge serves anonymous control points, so only the shared "guest"
/// profile is ever resolved here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackProfile {
    pub id: u32,
    pub name: String,
}

/// Decides the delivered format for a song and profile
///
/// The actual transcoding engine lives with the media server; the directory
/// only needs the resulting suffix to announce a correct MIME type.
pub trait TranscodingDecision: Send + Sync {
    /// The profile used for anonymous UPnP playback
    fn guest_profile(&self) -> PlaybackProfile;

    /// File suffix of the stream that will be delivered for `song`
    fn suffix_for(&self, profile: &PlaybackProfile, song: &Song) -> String;
}

/// No-transcoding default: songs are delivered in their stored format
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranscoding;

impl TranscodingDecision for PassthroughTranscoding {
    fn guest_profile(&self) -> PlaybackProfile {
        PlaybackProfile {
            id: 0,
            name: "guest".to_string(),
        }
    }

    fn suffix_for(&self, _profile: &PlaybackProfile, song: &Song) -> String {
        song.suffix.clone().unwrap_or_else(|| "mp3".to_string())
    }
}

/// A playable stream reference attached to a song item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// MIME type of the delivered stream, when the suffix is known
    pub mime_type: Option<String>,
    pub url: String,
    /// Pre-formatted duration display string ("4:06")
    pub duration: Option<String>,
}

/// Builds stream and cover-art URLs for the directory
pub struct StreamUrlBuilder {
    base_url: String,
    cover_art_size: u32,
    transcoder: Arc<dyn TranscodingDecision>,
    mime_types: Arc<dyn MimeTypeTable>,
}

impl StreamUrlBuilder {
    /// Builds from explicit host parameters.
    pub fn new(
        host: &str,
        port: u16,
        context_path: &str,
        cover_art_size: u32,
        transcoder: Arc<dyn TranscodingDecision>,
        mime_types: Arc<dyn MimeTypeTable>,
    ) -> Self {
        Self {
            base_url: build_base_url(host, port, context_path),
            cover_art_size,
            transcoder,
            mime_types,
        }
    }

    /// Builds from the configuration, guessing the local IP address.
    pub fn from_config(
        config: &Config,
        transcoder: Arc<dyn TranscodingDecision>,
        mime_types: Arc<dyn MimeTypeTable>,
    ) -> Self {
        Self::new(
            &musoutils::guess_local_ip(),
            config.get_http_port(),
            &config.get_url_context_path(),
            config.get_cover_art_size(),
            transcoder,
            mime_types,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Cover-art URL for an album container id
    pub fn cover_art_url(&self, album_object_id: &str) -> String {
        format!(
            "{}cover?id={}&size={}",
            self.base_url, album_object_id, self.cover_art_size
        )
    }

    /// Builds the playable resource for a song under the guest profile.
    pub fn resource_for(&self, song: &Song) -> ResourceDescriptor {
        let profile = self.transcoder.guest_profile();
        let suffix = self.transcoder.suffix_for(&profile, song);
        let mime_type = self.mime_types.lookup(&suffix);
        let url = format!("{}stream?id={}&player={}", self.base_url, song.id, profile.id);
        debug!(url = %url, suffix = %suffix, "Built stream resource");

        ResourceDescriptor {
            mime_type,
            url,
            duration: song.duration.clone(),
        }
    }
}

/// `http://<host>:<port>/[<context>/]`; an empty context path omits the
/// segment entirely.
fn build_base_url(host: &str, port: u16, context_path: &str) -> String {
    let mut url = format!("http://{host}:{port}/");
    let context = context_path.trim_matches('/');
    if !context.is_empty() {
        url.push_str(context);
        url.push('/');
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mime::StaticMimeTypes;

    fn builder(context_path: &str) -> StreamUrlBuilder {
        StreamUrlBuilder::new(
            "192.168.1.42",
            4040,
            context_path,
            500,
            Arc::new(PassthroughTranscoding),
            Arc::new(StaticMimeTypes),
        )
    }

    fn song(id: u32, suffix: Option<&str>) -> Song {
        Song {
            id,
            title: "Sexy Boy".to_string(),
            suffix: suffix.map(str::to_string),
            duration: Some("4:58".to_string()),
            ..Song::default()
        }
    }

    #[test]
    fn base_url_without_context_path() {
        assert_eq!(builder("").base_url(), "http://192.168.1.42:4040/");
    }

    #[test]
    fn base_url_with_context_path() {
        assert_eq!(
            builder("musobridge").base_url(),
            "http://192.168.1.42:4040/musobridge/"
        );
        // Surrounding slashes in the configured value are tolerated
        assert_eq!(
            builder("/musobridge/").base_url(),
            "http://192.168.1.42:4040/musobridge/"
        );
    }

    #[test]
    fn stream_url_carries_song_and_profile() {
        let res = builder("").resource_for(&song(101, Some("flac")));
        assert_eq!(res.url, "http://192.168.1.42:4040/stream?id=101&player=0");
        assert_eq!(res.mime_type.as_deref(), Some("audio/flac"));
        assert_eq!(res.duration.as_deref(), Some("4:58"));
    }

    #[test]
    fn unknown_suffix_yields_no_mime_type() {
        struct OddFormat;
        impl TranscodingDecision for OddFormat {
            fn guest_profile(&self) -> PlaybackProfile {
                PlaybackProfile {
                    id: 3,
                    name: "guest".to_string(),
                }
            }
            fn suffix_for(&self, _: &PlaybackProfile, _: &Song) -> String {
                "xyz".to_string()
            }
        }

        let builder = StreamUrlBuilder::new(
            "10.0.0.5",
            8080,
            "",
            500,
            Arc::new(OddFormat),
            Arc::new(StaticMimeTypes),
        );
        let res = builder.resource_for(&song(7, None));
        assert!(res.mime_type.is_none());
        assert_eq!(res.url, "http://10.0.0.5:8080/stream?id=7&player=3");
    }

    #[test]
    fn passthrough_falls_back_to_mp3() {
        let transcoder = PassthroughTranscoding;
        let profile = transcoder.guest_profile();
        assert_eq!(transcoder.suffix_for(&profile, &song(1, None)), "mp3");
        assert_eq!(transcoder.suffix_for(&profile, &song(1, Some("ogg"))), "ogg");
    }

    #[test]
    fn cover_art_url_format() {
        assert_eq!(
            builder("").cover_art_url("al-10"),
            "http://192.168.1.42:4040/cover?id=al-10&size=500"
        );
    }
}
