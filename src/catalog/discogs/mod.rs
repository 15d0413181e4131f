//! Discogs integration
//!
//! Text and barcode searches plus release lookups against the Discogs database.

pub mod adapter;
pub mod dto;
mod client;

pub use client::{DiscogsClient, DEFAULT_BASE_URL};
