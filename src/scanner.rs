//! Exhibit scanning: eligibility, URL normalization and content matching.
//!
//! For each filing the scanner walks the attachment list, downloads every
//! eligible `.htm` exhibit with a freshly rotated user-agent and keeps the
//! ones whose body mentions dividends. A fixed pause follows every
//! download, successful or not, to respect the SEC host's access
//! expectations.

use std::time::Duration;
use tokio::time::sleep;

use super::agent::AgentRotator;
use super::filings::{Filing, FilingFile, RawFiling, format_filed_at};
use super::traits::FilingOperations;

/// Sole content-filtering rule: case-insensitive presence of this marker.
pub const DIVIDEND_MARKER: &str = "dividend";

/// Rewrites inline-XBRL viewer links to the underlying archive document.
/// `https://www.sec.gov/ix?doc=/Archives/...` serves a JS shell, not the
/// exhibit itself.
fn rewrite_viewer_url(url: &str) -> String {
    url.replace("/ix?doc=/Archives", "/Archives")
}

/// True when the URL's path segment ends in `.htm` (case-sensitive, the
/// source system's convention). Query and fragment are ignored.
pub fn is_eligible(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.ends_with(".htm")
}

/// True when the body contains the dividend marker, any case.
pub fn contains_marker(content: &str) -> bool {
    content.to_ascii_lowercase().contains(DIVIDEND_MARKER)
}

/// Absolutizes an exhibit URL against the SEC archive base.
///
/// Viewer links are rewritten first; anything without an `http(s)://`
/// scheme prefix is treated as a bare archive path and prefixed, everything
/// else passes through unchanged.
pub fn normalize_url(archive_base: &str, url: &str) -> String {
    let url = rewrite_viewer_url(url);
    if url.starts_with("http://") || url.starts_with("https://") {
        url
    } else {
        format!(
            "{}/{}",
            archive_base.trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    }
}

/// Scans one filing's attachments and returns the filing with its matching
/// exhibits, or `None` when nothing matched.
///
/// Download failures are logged with file context and count as non-matches;
/// they never abort the filing or the symbol. The post-download pause runs
/// unconditionally, including after failures.
pub async fn scan_filing<A, R>(
    api: &A,
    rotator: &R,
    archive_base: &str,
    delay: Duration,
    raw: &RawFiling,
) -> Option<Filing>
where
    A: FilingOperations + Sync,
    R: AgentRotator + Sync,
{
    let mut matched = Vec::new();

    for attachment in &raw.files {
        if attachment.url.is_empty() {
            tracing::debug!("attachment has no URL, skipping");
            continue;
        }

        let url = rewrite_viewer_url(&attachment.url);
        if !is_eligible(&url) {
            tracing::debug!(url = %url, "attachment is not an .htm exhibit, skipping");
            continue;
        }
        let url = normalize_url(archive_base, &url);

        let user_agent = rotator.next();
        let fetched = api.fetch_document(&url, user_agent).await;

        // Throttle towards the SEC host, regardless of outcome.
        sleep(delay).await;

        match fetched {
            Ok(content) if contains_marker(&content) => {
                tracing::debug!(url = %url, "exhibit mentions dividends, retained");
                matched.push(FilingFile {
                    url,
                    file_type: attachment.file_type.clone(),
                    mime: attachment.mime.clone(),
                });
            }
            Ok(_) => {
                tracing::debug!(url = %url, "exhibit has no dividend content, dropped");
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "exhibit download failed, dropped");
            }
        }
    }

    if matched.is_empty() {
        tracing::debug!(filing_url = %raw.filing_url, "filing retained no exhibits, dropped");
        return None;
    }

    Some(Filing {
        url: normalize_url(archive_base, &raw.filing_url),
        filed_at: format_filed_at(raw.filed_at),
        files: matched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.sec.gov/Archives/edgar/data/";

    #[test]
    fn htm_paths_are_eligible() {
        assert!(is_eligible("737468/000073746825000031/exhibit9912025q2.htm"));
        assert!(is_eligible("https://www.sec.gov/Archives/a/b/doc.htm"));
    }

    #[test]
    fn other_paths_are_not_eligible() {
        assert!(!is_eligible("737468/000073746825000031/press.pdf"));
        assert!(!is_eligible("737468/000073746825000031/data.xml"));
        // case-sensitive by convention
        assert!(!is_eligible("737468/000073746825000031/DOC.HTM"));
        assert!(!is_eligible("737468/doc.html"));
    }

    #[test]
    fn marker_match_is_case_insensitive() {
        assert!(contains_marker("declared a quarterly DIVIDEND of $0.20"));
        assert!(contains_marker("Dividend Announcement"));
        assert!(!contains_marker("share repurchase program"));
    }

    #[test]
    fn bare_path_is_prefixed() {
        assert_eq!(
            normalize_url(BASE, "737468/000073746825000031/exhibit9912025q2.htm"),
            "https://www.sec.gov/Archives/edgar/data/737468/000073746825000031/exhibit9912025q2.htm"
        );
    }

    #[test]
    fn absolute_url_passes_through() {
        let url = "https://www.sec.gov/Archives/edgar/data/737468/doc.htm";
        assert_eq!(normalize_url(BASE, url), url);
    }

    #[test]
    fn viewer_link_is_rewritten() {
        assert_eq!(
            normalize_url(BASE, "https://www.sec.gov/ix?doc=/Archives/edgar/data/737468/doc.htm"),
            "https://www.sec.gov/Archives/edgar/data/737468/doc.htm"
        );
    }
}
