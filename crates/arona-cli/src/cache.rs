//! # Cache Subcommand
//!
//! Read-only inspection of the local asset cache.
//!
//! ## Commands
//!
//! - `arona cache list`: Every `name<TAB>hash` pair, sorted by name.
//! - `arona cache show <name>`: Stored hash and matching asset files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use arona_cache::AssetCache;
use arona_core::AssetName;

/// Arguments for the `arona cache` subcommand.
#[derive(Args, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommand,
}

/// Cache subcommands.
#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// List every cached name with its recorded hash.
    List,
    /// Show the recorded hash and asset file for one name.
    Show {
        /// Logical name as returned by the search service.
        name: String,
    },
}

/// Execute the cache subcommand.
pub fn run_cache(args: &CacheArgs, data_dir: &Path) -> Result<u8> {
    let cache = AssetCache::open(data_dir)
        .with_context(|| format!("failed to open asset cache at {}", data_dir.display()))?;

    match &args.command {
        CacheCommand::List => {
            for (name, hash) in cache.store().entries() {
                println!("{name}\t{hash}");
            }
            Ok(0)
        }
        CacheCommand::Show { name } => {
            let name = AssetName::new(name).context("invalid asset name")?;
            let Some(hash) = cache.store().lookup(name.as_str()) else {
                println!("{name}: not cached");
                return Ok(1);
            };
            println!("name: {name}");
            println!("hash: {hash}");
            let files = asset_files(cache.base_dir(), &name)?;
            if files.is_empty() {
                println!("file: missing");
            }
            for file in files {
                println!("file: {}", file.display());
            }
            Ok(0)
        }
    }
}

/// Files in `base_dir` that could hold the asset for `name`: the bare
/// name, or the name followed by an alphanumeric extension.
fn asset_files(base_dir: &Path, name: &AssetName) -> Result<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(base_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", base_dir.display()))
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read {}", base_dir.display()))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if is_asset_file_name(file_name, name.as_str()) && entry.path().is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

fn is_asset_file_name(file_name: &str, name: &str) -> bool {
    match file_name.strip_prefix(name) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('.')
            .is_some_and(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric())),
        None => false,
    }
}
