//! Catalog search and lookup commands.

use tokio::runtime::Runtime;

use crate::catalog::{Pagination, ReleaseCandidate, ReleaseDetail, SearchPage};
use crate::collection::NewRelease;
use crate::config::Config;

use super::build_service;

/// Search the configured catalog by text
pub fn cmd_search(
    rt: &Runtime,
    config: &Config,
    query: &str,
    release_type: &str,
    page: u32,
    per_page: u32,
    json: bool,
) -> anyhow::Result<()> {
    let service = build_service(config)?;
    let results = rt.block_on(service.search_by_text(query, release_type, page, per_page))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("Searching {} for {:?}", service.source(), query);
        print_page(&results);
    }
    Ok(())
}

/// Search the configured catalog by barcode
pub fn cmd_barcode(
    rt: &Runtime,
    config: &Config,
    code: &str,
    page: u32,
    per_page: u32,
    json: bool,
) -> anyhow::Result<()> {
    let service = build_service(config)?;
    let results = rt.block_on(service.search_by_barcode(code, page, per_page))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("Looking up barcode {} on {}", code, service.source());
        print_page(&results);
    }
    Ok(())
}

/// Show a release, or the collection entry it would prefill.
///
/// `prefill` is `Some(category)` when the collection entry should be printed.
pub fn cmd_release(
    rt: &Runtime,
    config: &Config,
    id: &str,
    json: bool,
    prefill: Option<Option<&str>>,
) -> anyhow::Result<()> {
    let service = build_service(config)?;
    let detail = rt.block_on(service.get_detail(id))?;

    if let Some(category) = prefill {
        println!("{}", serde_json::to_string_pretty(&prefill_entry(detail, category))?);
    } else if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        print_detail(&detail);
    }
    Ok(())
}

fn prefill_entry(detail: ReleaseDetail, category: Option<&str>) -> NewRelease {
    let entry = NewRelease::from(detail);
    match category {
        Some(category) => entry.in_category(category),
        None => entry,
    }
}

fn print_page(page: &SearchPage) {
    if page.results.is_empty() {
        match page.pagination {
            Some(_) => println!("No vinyl releases found."),
            None => println!("No results (catalog unavailable, see log for details)."),
        }
        return;
    }

    println!();
    for (index, candidate) in page.results.iter().enumerate() {
        println!("{:>3}. {}", index + 1, summary_line(candidate));
    }

    if let Some(pagination) = page.pagination {
        println!();
        println!("{}", pagination_line(&pagination));
    }
}

fn print_detail(detail: &ReleaseDetail) {
    let release = &detail.release;
    println!("{} - {}", release.artist, release.title);
    println!();
    println!("  Source:  {} {}", release.source, release.id);
    if let Some(year) = release.year {
        println!("  Year:    {}", year);
    }
    if let Some(format) = &release.format {
        println!("  Format:  {}", format);
    }
    if let Some(label) = &release.label {
        println!("  Label:   {}", label);
    }
    if let Some(country) = &release.country {
        println!("  Country: {}", country);
    }
    if let Some(barcode) = &release.barcode {
        println!("  Barcode: {}", barcode);
    }
    if !detail.genres.is_empty() {
        println!("  Genres:  {}", detail.genres.join(", "));
    }
    if !detail.styles.is_empty() {
        println!("  Styles:  {}", detail.styles.join(", "));
    }
    if let Some(cover) = &release.cover_image {
        println!("  Cover:   {}", cover);
    }
    if let Some(url) = &release.url {
        println!("  Link:    {}", url);
    }

    if !detail.tracks.is_empty() {
        println!();
        println!("Tracks:");
        for track in &detail.tracks {
            match &track.duration {
                Some(duration) => println!("  {:<5} {} ({})", track.position, track.title, duration),
                None => println!("  {:<5} {}", track.position, track.title),
            }
        }
    }

    if let Some(notes) = &detail.notes {
        println!();
        println!("{}", notes);
    }
}

fn summary_line(candidate: &ReleaseCandidate) -> String {
    let mut line = format!("[{}] {}", candidate.id, candidate.title);
    if !candidate.title.starts_with(candidate.artist.as_str()) {
        line = format!("[{}] {} - {}", candidate.id, candidate.artist, candidate.title);
    }

    let extras: Vec<String> = [
        candidate.year.map(|y| y.to_string()),
        candidate.format.clone(),
        candidate.country.clone(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !extras.is_empty() {
        line.push_str(&format!(" ({})", extras.join(" | ")));
    }
    line
}

fn pagination_line(pagination: &Pagination) -> String {
    format!(
        "Page {} of {} ({} matches before filtering, {} per page)",
        pagination.page, pagination.pages, pagination.total, pagination.per_page
    )
}
