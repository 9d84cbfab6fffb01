//! Remote content fetch seam.

use dragnet_types::Result;
use std::path::Path;

/// Fetches one remote asset to a local file.
///
/// The production implementation lives in `dragnet-services`; the trait
/// seam keeps materialization testable without network access. Each fetch
/// is independent: a failure for one URL never aborts the others.
pub trait ContentFetcher {
    /// Download `url` and write the body to `dest`, creating parents.
    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}
