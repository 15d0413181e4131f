//! MusicBrainz integration
//!
//! Searches and looks up releases on musicbrainz.org. Rate limited to
//! one request per second by the caller.

pub mod adapter;
pub mod dto;
mod client;

pub use client::{MusicBrainzClient, DEFAULT_BASE_URL};
