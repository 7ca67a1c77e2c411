//! Short document fingerprints, used as the `/preview` ETag and in verbose
//! render logs.

use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Eight hex digits identifying `text`. Not stable across builds.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    let digest = hasher.finish();
    format!("{:08x}", (digest >> 32) as u32 ^ digest as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_document_same_etag() {
        let a = fingerprint("<p>hello</p>");
        assert_eq!(a.len(), 8);
        assert_eq!(a, fingerprint("<p>hello</p>"));
    }

    #[test]
    fn test_edit_changes_etag() {
        assert_ne!(fingerprint("<p>hello</p>"), fingerprint("<p>hello!</p>"));
    }
}
