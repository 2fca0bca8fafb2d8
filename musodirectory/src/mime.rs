//! Suffix to MIME type mapping for stream resources.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// MIME type lookup by file suffix
///
/// Implemented by the host when it carries its own MIME registry;
/// [`StaticMimeTypes`] is the built-in table.
pub trait MimeTypeTable: Send + Sync {
    /// Returns the MIME type for a suffix, or `None` when unknown
    fn lookup(&self, suffix: &str) -> Option<String>;
}

static SUFFIX_TO_MIME: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("mp3", "audio/mpeg"),
        ("ogg", "audio/ogg"),
        ("oga", "audio/ogg"),
        ("opus", "audio/ogg"),
        ("flac", "audio/flac"),
        ("wav", "audio/x-wav"),
        ("aif", "audio/x-aiff"),
        ("aiff", "audio/x-aiff"),
        ("m4a", "audio/mp4"),
        ("m4b", "audio/mp4"),
        ("aac", "audio/aac"),
        ("wma", "audio/x-ms-wma"),
        ("ape", "audio/x-monkeys-audio"),
        ("mpc", "audio/x-musepack"),
        ("shn", "audio/x-shn"),
    ])
});

/// Static table of the audio suffixes the bridge can announce
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticMimeTypes;

impl MimeTypeTable for StaticMimeTypes {
    fn lookup(&self, suffix: &str) -> Option<String> {
        SUFFIX_TO_MIME
            .get(suffix.to_ascii_lowercase().as_str())
            .map(|mime| (*mime).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_suffixes() {
        let table = StaticMimeTypes;
        assert_eq!(table.lookup("mp3").as_deref(), Some("audio/mpeg"));
        assert_eq!(table.lookup("flac").as_deref(), Some("audio/flac"));
        assert_eq!(table.lookup("m4a").as_deref(), Some("audio/mp4"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let table = StaticMimeTypes;
        assert_eq!(table.lookup("MP3").as_deref(), Some("audio/mpeg"));
        assert_eq!(table.lookup("Flac").as_deref(), Some("audio/flac"));
    }

    #[test]
    fn unknown_suffix_is_none() {
        let table = StaticMimeTypes;
        assert!(table.lookup("xyz").is_none());
        assert!(table.lookup("").is_none());
    }
}
