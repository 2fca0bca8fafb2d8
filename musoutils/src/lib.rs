//! # musoutils - Small shared helpers for MusoBridge
//!
//! Currently limited to network address guessing, used to build the
//! stream and cover-art URLs advertised to UPnP control points.

mod ip;

pub use ip::guess_local_ip;
