//! # Query Subcommand
//!
//! Resolves one query through [`ResolutionEngine`] and prints replies as
//! they are produced. Text replies are printed verbatim; image replies as
//! `[image] {path}`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;
use tokio::sync::mpsc;

use arona_cache::AssetCache;
use arona_client::{ApiConfig, ImageClient};
use arona_core::{Reply, SearchMethod};
use arona_engine::{EngineConfig, FuzzyPolicy, ResolutionEngine};

/// Arguments for the `arona query` subcommand.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Strategy name. Multiple words are joined with single spaces.
    #[arg(required = true, num_args = 1..)]
    pub words: Vec<String>,

    /// Fuzzy-matching strategy (1 or 2). Overrides ARONA_METHOD.
    #[arg(long)]
    pub method: Option<SearchMethod>,

    /// Maximum fuzzy candidates to request. Overrides ARONA_RESULT_SIZE.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub size: Option<u32>,

    /// Deliver the first fuzzy candidate after listing them.
    #[arg(long)]
    pub auto_select: bool,
}

impl QueryArgs {
    /// The query text as sent to the service.
    pub fn query(&self) -> String {
        self.words.join(" ")
    }

    /// Apply command-line overrides on top of `base`.
    pub fn engine_config(&self, base: EngineConfig) -> EngineConfig {
        let mut config = base;
        if let Some(method) = self.method {
            config.method = method;
        }
        if let Some(size) = self.size {
            config.result_size = size;
        }
        if self.auto_select {
            config.fuzzy_policy = FuzzyPolicy::AutoSelectFirst;
        }
        config
    }
}

/// Execute the query subcommand.
pub async fn run_query(args: &QueryArgs, data_dir: &Path) -> Result<u8> {
    let query = args.query();
    if query.trim().is_empty() {
        bail!("query must not be empty");
    }

    let config = args.engine_config(
        EngineConfig::from_env().context("invalid engine configuration")?,
    );
    let api = ApiConfig::from_env().context("invalid API configuration")?;
    let client = ImageClient::new(api).context("failed to build HTTP client")?;
    let cache = AssetCache::open(data_dir)
        .with_context(|| format!("failed to open asset cache at {}", data_dir.display()))?;

    tracing::debug!(
        query = %query,
        method = %config.method,
        size = config.result_size,
        fuzzy_policy = %config.fuzzy_policy,
        "running query"
    );

    let method: SearchMethod = config.method;
    let engine = ResolutionEngine::new(client, cache, config);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let produce = async move {
        engine.handle_query(&query, method, &tx).await;
    };
    let consume = async {
        while let Some(reply) = rx.recv().await {
            println!("{}", format_reply(&reply));
        }
    };
    tokio::join!(produce, consume);

    Ok(0)
}

/// Printable form of a reply.
pub fn format_reply(reply: &Reply) -> String {
    match reply {
        Reply::Text(text) => text.clone(),
        Reply::Image(path) => format!("[image] {}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(words: &[&str]) -> QueryArgs {
        QueryArgs {
            words: words.iter().map(|w| w.to_string()).collect(),
            method: None,
            size: None,
            auto_select: false,
        }
    }

    #[test]
    fn words_are_joined_verbatim() {
        assert_eq!(args(&["国际服", "总力战"]).query(), "国际服 总力战");
        assert_eq!(args(&["  ミカ"]).query(), "  ミカ");
    }

    #[test]
    fn no_flags_keep_base_config() {
        let base = EngineConfig {
            result_size: 4,
            method: SearchMethod::Method2,
            fuzzy_policy: FuzzyPolicy::ListOnly,
        };
        assert_eq!(args(&["x"]).engine_config(base.clone()), base);
    }

    #[test]
    fn flags_override_base_config() {
        let mut a = args(&["x"]);
        a.method = Some(SearchMethod::Method2);
        a.size = Some(3);
        a.auto_select = true;
        let config = a.engine_config(EngineConfig::default());
        assert_eq!(config.method, SearchMethod::Method2);
        assert_eq!(config.result_size, 3);
        assert_eq!(config.fuzzy_policy, FuzzyPolicy::AutoSelectFirst);
    }

    #[test]
    fn format_reply_marks_images() {
        assert_eq!(format_reply(&Reply::text("hello")), "hello");
        assert_eq!(
            format_reply(&Reply::Image(PathBuf::from("/data/ミカ.png"))),
            "[image] /data/ミカ.png"
        );
    }
}
