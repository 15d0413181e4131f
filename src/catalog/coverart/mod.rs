//! Cover Art Archive integration
//!
//! Resolves front covers for MusicBrainz release IDs via coverartarchive.org.
//! No API key required.

pub mod dto;
mod client;

pub use client::{CoverArtClient, DEFAULT_BASE_URL};
