//! URL construction for the character catalog

use crate::error::Result;
use url::Url;

/// Path of the character listing, relative to the API base URL
pub const CHARACTERS_PATH: &str = "character";

/// Build `GET {base}/character` with optional `page` and `status` query parameters
///
/// An absent page or an empty status is left off entirely; with neither present the
/// URL carries no query string at all.
///
/// # Errors
/// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) if `base_url` does not parse
pub fn characters_url(base_url: &str, page: Option<u32>, status: Option<&str>) -> Result<Url> {
    let mut url = Url::parse(&format!(
        "{}/{}",
        base_url.trim().trim_end_matches('/'),
        CHARACTERS_PATH
    ))?;

    let mut params: Vec<(&str, String)> = Vec::with_capacity(2);
    if let Some(page) = page {
        params.push(("page", page.to_string()));
    }
    if let Some(status) = status.map(str::trim).filter(|s| !s.is_empty()) {
        params.push(("status", status.to_string()));
    }

    // query_pairs_mut() leaves a bare '?' behind even when nothing is appended
    if !params.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
    }
    Ok(url)
}
