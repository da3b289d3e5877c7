//! # arona-cli: Command-Line Front End
//!
//! Stands in for the chat platform: each reply event from the resolution
//! engine is printed as it arrives, one reply per block.
//!
//! ## Subcommands
//!
//! - `arona query <name...>`: Resolve a strategy name and print replies.
//! - `arona cache list`: Dump the `name -> hash` index.
//! - `arona cache show <name>`: Show one index entry and its asset file.
//!
//! ```bash
//! arona query ミカ
//! arona query --method 2 --size 5 --auto-select 国际服 总力战
//! arona --data-dir /var/lib/arona cache list
//! ```

pub mod cache;
pub mod query;

use std::path::{Path, PathBuf};

/// Data directory used when neither `--data-dir` nor `ARONA_DATA_DIR` is set.
pub const DEFAULT_DATA_DIR: &str = "./data/arona";

/// Resolve the data directory: explicit flag, then `ARONA_DATA_DIR`, then
/// [`DEFAULT_DATA_DIR`].
pub fn resolve_data_dir(flag: Option<&Path>) -> PathBuf {
    data_dir_from(flag, std::env::var_os("ARONA_DATA_DIR").map(PathBuf::from))
}

fn data_dir_from(flag: Option<&Path>, env: Option<PathBuf>) -> PathBuf {
    match (flag, env) {
        (Some(flag), _) => flag.to_path_buf(),
        (None, Some(env)) if !env.as_os_str().is_empty() => env,
        _ => PathBuf::from(DEFAULT_DATA_DIR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_env() {
        let dir = data_dir_from(Some(Path::new("/flag")), Some(PathBuf::from("/env")));
        assert_eq!(dir, PathBuf::from("/flag"));
    }

    #[test]
    fn env_used_without_flag() {
        let dir = data_dir_from(None, Some(PathBuf::from("/env")));
        assert_eq!(dir, PathBuf::from("/env"));
    }

    #[test]
    fn empty_env_falls_back_to_default() {
        assert_eq!(
            data_dir_from(None, Some(PathBuf::new())),
            PathBuf::from(DEFAULT_DATA_DIR)
        );
        assert_eq!(data_dir_from(None, None), PathBuf::from(DEFAULT_DATA_DIR));
    }
}
