//! # Asset Paths
//!
//! A binary item named `name` whose remote content path is `content` is
//! cached at `{base_dir}/{name}{ext}`, where `ext` is the extension of the
//! last segment of `content`.
//!
//! | `content` | `ext` |
//! |-----------|-------|
//! | `/a/b.png` | `.png` |
//! | `/a/b.tar.gz` | `.gz` |
//! | `/a.d/b` | (none) |
//! | `/a/b.p%g` | (none, not alphanumeric) |

use std::path::{Path, PathBuf};

use arona_core::AssetName;

/// Longest extension carried over from a remote path.
const MAX_EXT_LEN: usize = 16;

/// The local extension (with leading dot) for a remote content path, or an
/// empty string when the path has no usable extension.
pub fn extension_of(content: &str) -> String {
    let path = content.split(['?', '#']).next().unwrap_or_default();
    let last = path.rsplit('/').next().unwrap_or_default();
    match last.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= MAX_EXT_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!(".{ext}")
        }
        _ => String::new(),
    }
}

/// `{base_dir}/{name}{ext}`.
pub fn asset_path(base_dir: &Path, name: &AssetName, content: &str) -> PathBuf {
    base_dir.join(format!("{}{}", name.as_str(), extension_of(content)))
}
