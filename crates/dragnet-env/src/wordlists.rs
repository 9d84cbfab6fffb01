//! Wordlist asset fetching.

use dragnet_core::fetch::ContentFetcher;
use dragnet_types::DragnetError;
use std::path::Path;

/// Fixed remote wordlist and suffix-list assets, fetched into the wordlist
/// directory during stack initialization.
pub const WORDLIST_SOURCES: &[(&str, &str)] = &[
    (
        "https://raw.githubusercontent.com/publicsuffix/list/master/public_suffix_list.dat",
        "public_suffix_list.dat",
    ),
    (
        "https://raw.githubusercontent.com/danielmiessler/SecLists/master/Discovery/Infrastructure/nmap-ports-top1000.txt",
        "nmap-ports-top1000.txt",
    ),
    (
        "https://raw.githubusercontent.com/danielmiessler/SecLists/master/Discovery/DNS/deepmagic.com-prefixes-top50000.txt",
        "deepmagic.com-prefixes-top50000.txt",
    ),
    (
        "https://raw.githubusercontent.com/danielmiessler/SecLists/master/Discovery/DNS/subdomains-top1million-5000.txt",
        "subdomains-top1million-5000.txt",
    ),
];

/// Fetch every wordlist asset into `dir`.
///
/// Fetches are independent: a failure for one URL is reported and the
/// remaining assets are still attempted. Returns the failures.
pub fn fetch_all(dir: &Path, fetcher: &dyn ContentFetcher) -> Vec<(String, DragnetError)> {
    let mut failures = Vec::new();
    for (url, file_name) in WORDLIST_SOURCES {
        let dest = dir.join(file_name);
        if let Err(e) = fetcher.fetch(url, &dest) {
            tracing::warn!(url, error = %e, "wordlist fetch failed");
            failures.push((url.to_string(), e));
        }
    }
    failures
}
