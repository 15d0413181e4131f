//! Cover Art Archive API Data Transfer Objects
//!
//! The Cover Art Archive (https://coverartarchive.org) provides album artwork
//! for MusicBrainz releases. It's a free service with no API key required.
//!
//! API Reference: https://wiki.musicbrainz.org/Cover_Art_Archive/API

use serde::{Deserialize, Serialize};

use crate::catalog::de;

/// Cover art listing for a release
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoverArtResponse {
    #[serde(default, deserialize_with = "de::null_default")]
    pub images: Vec<Image>,
    /// URL of the release on MusicBrainz
    pub release: Option<String>,
}

impl CoverArtResponse {
    /// The image flagged as front cover, else the first one listed
    pub fn front_or_first(&self) -> Option<&Image> {
        self.images
            .iter()
            .find(|image| image.front)
            .or_else(|| self.images.first())
    }
}

/// A single cover art image
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    #[serde(default)]
    pub front: bool,
    #[serde(default)]
    pub back: bool,
    /// Image types (Front, Back, Booklet, etc.)
    #[serde(default, deserialize_with = "de::null_default")]
    pub types: Vec<String>,
    /// URL to full-size image
    pub image: String,
    #[serde(default)]
    pub approved: bool,
}
