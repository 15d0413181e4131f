//! Test utilities and fixtures for vinyl-vault tests.
//!
//! This module provides provider DTO factories and a one-shot HTTP server
//! to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use vinyl_vault::test_utils::{serve_once, TIMEOUT};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (base_url, request) = serve_once(200, r#"{"results": []}"#).await;
//!     let client = DiscogsClient::with_base_url(None, base_url, TIMEOUT).unwrap();
//!     // ... test logic
//!     assert!(request.await.unwrap().starts_with("GET /database/search"));
//! }
//! ```

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::catalog::discogs::dto as discogs;
use crate::catalog::musicbrainz::dto as musicbrainz;

/// Request timeout for clients pointed at [`serve_once`]
pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Serves exactly one HTTP response on a loopback port.
///
/// Returns the base URL to point a client at and a handle that resolves to
/// the raw request head (request line plus headers) once it was answered.
pub async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    let body = body.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("No client connected");

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.expect("Failed to read request");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("Failed to write response");
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{addr}"), handle)
}

/// Accepts connections on a loopback port and never answers them.
///
/// Abort the returned handle when the test is done.
pub async fn serve_stalled() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    let handle = tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });

    (format!("http://{addr}"), handle)
}

/// Creates a Discogs search hit with sensible defaults.
///
/// Customize using struct update syntax or by mutating the result.
pub fn discogs_search_item(id: u64, title: &str, formats: &[&str]) -> discogs::SearchItem {
    discogs::SearchItem {
        id: id.to_string(),
        result_type: Some("release".to_string()),
        title: title.to_string(),
        year: Some(1973),
        country: Some("UK".to_string()),
        format: formats.iter().map(|f| f.to_string()).collect(),
        label: vec!["Harvest".to_string()],
        barcode: vec!["5099902987766".to_string()],
        genre: vec!["Rock".to_string()],
        style: vec!["Prog Rock".to_string()],
        cover_image: Some(format!("https://i.discogs.com/{id}-full.jpg")),
        thumb: Some(format!("https://i.discogs.com/{id}-thumb.jpg")),
        resource_url: Some(format!("https://api.discogs.com/releases/{id}")),
        uri: Some(format!("/release/{id}")),
    }
}

/// Creates a Discogs release by Pink Floyd on Harvest, without images or tracks.
pub fn discogs_release(id: u64, title: &str) -> discogs::Release {
    discogs::Release {
        id: id.to_string(),
        title: title.to_string(),
        year: Some(1973),
        country: Some("UK".to_string()),
        artists: vec![discogs::ArtistCredit {
            name: "Pink Floyd".to_string(),
            anv: None,
            join: None,
        }],
        formats: vec![discogs::Format {
            name: "Vinyl".to_string(),
            qty: Some("1".to_string()),
            descriptions: Vec::new(),
        }],
        labels: vec![discogs::Label {
            name: "Harvest".to_string(),
            catno: Some("SHVL 804".to_string()),
        }],
        identifiers: vec![discogs::Identifier {
            identifier_type: "Barcode".to_string(),
            value: Some("5099902987766".to_string()),
        }],
        genres: vec!["Rock".to_string()],
        styles: vec!["Prog Rock".to_string()],
        tracklist: Vec::new(),
        images: Vec::new(),
        notes: None,
        uri: Some(format!("https://www.discogs.com/release/{id}")),
    }
}

pub fn discogs_image(image_type: &str, uri: &str) -> discogs::Image {
    discogs::Image {
        image_type: Some(image_type.to_string()),
        uri: Some(uri.to_string()),
        uri150: None,
    }
}

pub fn discogs_track(position: &str, title: &str, duration: &str) -> discogs::TrackEntry {
    discogs::TrackEntry {
        position: position.to_string(),
        title: title.to_string(),
        duration: Some(duration.to_string()),
        entry_type: None,
    }
}

/// Creates a MusicBrainz Pink Floyd release with one medium per format.
pub fn mb_release(id: &str, title: &str, formats: &[&str]) -> musicbrainz::Release {
    musicbrainz::Release {
        id: id.to_string(),
        title: title.to_string(),
        status: Some("Official".to_string()),
        date: Some("1973-03-24".to_string()),
        country: Some("GB".to_string()),
        barcode: Some("5099902987766".to_string()),
        score: Some(100),
        artist_credit: vec![musicbrainz::ArtistCredit {
            name: Some("Pink Floyd".to_string()),
            joinphrase: None,
            artist: Some(musicbrainz::Artist {
                id: "83d91898-7763-47d7-b03b-b92132375c47".to_string(),
                name: "Pink Floyd".to_string(),
                sort_name: Some("Pink Floyd".to_string()),
            }),
        }],
        release_group: None,
        label_info: vec![musicbrainz::LabelInfo {
            catalog_number: Some("SHVL 804".to_string()),
            label: Some(musicbrainz::Label {
                id: None,
                name: "Harvest".to_string(),
            }),
        }],
        media: formats.iter().map(|f| mb_medium(f, Vec::new())).collect(),
    }
}

pub fn mb_medium(format: &str, tracks: Vec<musicbrainz::Track>) -> musicbrainz::Medium {
    musicbrainz::Medium {
        position: None,
        format: Some(format.to_string()),
        track_count: Some(tracks.len() as u32),
        tracks,
    }
}

pub fn mb_track(title: Option<&str>, length: Option<u64>) -> musicbrainz::Track {
    musicbrainz::Track {
        position: None,
        number: None,
        title: title.map(str::to_string),
        length,
    }
}
