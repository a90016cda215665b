use anyhow::{Context, Result, anyhow};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// A file linked from a directory listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedFile {
    /// Last path segment of the link; used as the object name.
    pub name: String,
    /// Absolute download URL.
    pub url: String,
}

/// Extracts file links from an HTML directory listing.
///
/// Links ending in `/` (parent and sub-directories) are skipped. Names are
/// deduplicated, keeping the first link seen.
pub fn parse_listing(html: &str, base_url: &str) -> Result<Vec<ListedFile>> {
    let base = Url::parse(base_url).with_context(|| format!("invalid listing URL '{base_url}'"))?;
    let selector = Selector::parse("a[href]").map_err(|e| anyhow!("bad selector: {e:?}"))?;
    let document = Html::parse_document(html);

    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for href in document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
    {
        if href.is_empty() || href.ends_with('/') {
            continue;
        }

        let url = base
            .join(href)
            .with_context(|| format!("unresolvable link '{href}'"))?;
        let name = match url.path_segments().and_then(|mut s| s.next_back()) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };

        if seen.insert(name.clone()) {
            files.push(ListedFile {
                name,
                url: url.to_string(),
            });
        }
    }

    Ok(files)
}
