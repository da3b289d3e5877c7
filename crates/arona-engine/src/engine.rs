//! # Resolution Engine
//!
//! Drives one query from free text to replies:
//!
//! 1. Emit the in-progress notice.
//! 2. Search the remote service.
//! 3. Branch on the outcome (exact / fuzzy / not found / service error).
//! 4. For a selected item, deliver its content: text directly, binaries
//!    from the local cache or, on a miss, via download-write-record.
//!
//! ## Ordering
//!
//! An image reply is emitted only after its file is fully written and the
//! index entry is durably recorded. A failure anywhere in step 4 produces
//! one error reply and leaves the index as it was.
//!
//! ## Concurrency
//!
//! At most one network call is outstanding per query. Same-name
//! downloads across concurrent queries are serialized by the cache's
//! per-name lock and re-checked after the lock is taken, so a burst of
//! identical queries downloads once.

use arona_cache::{AssetCache, IndexStorage, JsonFileStorage};
use arona_client::ImageClient;
use arona_core::{AssetName, ItemKind, Reply, ResolutionOutcome, ResultItem, SearchMethod};
use tokio::sync::mpsc;

use crate::config::{EngineConfig, FuzzyPolicy};
use crate::render;

/// Where reply events go. Unbounded so emitting never blocks the flow.
pub type ReplySender = mpsc::UnboundedSender<Reply>;

/// Orchestrates the search client and the asset cache.
///
/// Share it behind an `Arc` across concurrent queries; the cache index
/// inside is the only shared mutable state.
#[derive(Debug)]
pub struct ResolutionEngine<S = JsonFileStorage> {
    client: ImageClient,
    cache: AssetCache<S>,
    config: EngineConfig,
}

impl<S: IndexStorage> ResolutionEngine<S> {
    pub fn new(client: ImageClient, cache: AssetCache<S>, config: EngineConfig) -> Self {
        Self {
            client,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &AssetCache<S> {
        &self.cache
    }

    /// Handle `query` with the configured search method, collecting every
    /// reply in emission order.
    pub async fn replies_for(&self, query: &str) -> Vec<Reply> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        self.handle_query(query, self.config.method, &tx).await;
        drop(tx);
        let mut replies = Vec::new();
        while let Some(reply) = rx.recv().await {
            replies.push(reply);
        }
        replies
    }

    /// Resolve `query` and stream replies into `replies` as they are
    /// produced. Every terminal branch emits exactly one explanatory reply
    /// after the in-progress notice; binary items add the image reply.
    pub async fn handle_query(&self, query: &str, method: SearchMethod, replies: &ReplySender) {
        emit(replies, Reply::text(render::IN_PROGRESS));

        let outcome = self
            .client
            .resolve(query, self.config.result_size, method)
            .await;
        tracing::info!(query, %method, outcome = outcome.label(), "query resolved");

        match outcome {
            ResolutionOutcome::Exact(item) => {
                emit(replies, Reply::text(render::exact_summary(&item)));
                self.deliver(&item, replies).await;
            }
            ResolutionOutcome::Fuzzy(items) => {
                emit(replies, Reply::text(render::fuzzy_list(&items)));
                if self.config.fuzzy_policy == FuzzyPolicy::AutoSelectFirst {
                    if let Some(first) = items.first() {
                        tracing::debug!(name = %first.name, "auto-selecting first fuzzy candidate");
                        self.deliver(first, replies).await;
                    }
                }
            }
            ResolutionOutcome::NotFound => {
                emit(replies, Reply::text(render::NOT_FOUND));
            }
            ResolutionOutcome::ServiceError(failure) => {
                emit(replies, Reply::text(render::service_error(&failure)));
            }
        }
    }

    /// Deliver a selected item's content.
    async fn deliver(&self, item: &ResultItem, replies: &ReplySender) {
        match item.kind {
            ItemKind::Text => emit(replies, Reply::text(render::text_content(item))),
            ItemKind::Binary => {
                let reply = self.resolve_asset(item).await;
                emit(replies, reply);
            }
        }
    }

    /// Fetch-or-reuse for a binary item. Returns the single reply to emit:
    /// the image on success, an error text otherwise.
    async fn resolve_asset(&self, item: &ResultItem) -> Reply {
        let name = match AssetName::new(&item.name) {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(name = %item.name, error = %e, "refusing to cache item");
                return Reply::text(render::invalid_name(&item.name));
            }
        };
        let path = self.cache.asset_path(&name, &item.content);

        if self.cache.is_fresh(&name, &item.hash, &path) {
            tracing::info!(name = %name, hash = %item.hash, "cache hit");
            return Reply::Image(path);
        }

        let _guard = self.cache.lock(&name).await;
        // Another query may have finished the same download while we waited.
        if self.cache.is_fresh(&name, &item.hash, &path) {
            tracing::info!(name = %name, hash = %item.hash, "cache hit after waiting on download");
            return Reply::Image(path);
        }

        tracing::info!(
            name = %name,
            hash = %item.hash,
            previous = ?self.cache.store().lookup(name.as_str()),
            "cache miss, downloading"
        );
        let bytes = match self.client.fetch_asset(&item.content).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "asset download failed");
                return Reply::text(render::download_failed(&e.to_string()));
            }
        };

        match self.cache.store_asset(&name, &item.hash, &path, &bytes) {
            Ok(()) => Reply::Image(path),
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "failed to cache asset");
                Reply::text(render::cache_failed(&e.to_string()))
            }
        }
    }
}

fn emit(replies: &ReplySender, reply: Reply) {
    if replies.send(reply).is_err() {
        tracing::debug!("reply receiver dropped, discarding reply");
    }
}
