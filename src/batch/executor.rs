//! Batch executor.

use super::chunk::split_entries;
use super::config::{BatchExecutorConfig, BatchStrategy, SiblingPolicy};
use super::entries::Entries;
use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::time::Instant;
use tracing::{debug, warn};

/// Runs async work over a collection one chunk at a time.
///
/// Every call of a chunk is dispatched before any of them is awaited, and the
/// next chunk starts only after the whole current chunk has settled. All work
/// is driven inside the caller's task; nothing is spawned.
///
/// Worker errors come back untouched and end the operation: no partial
/// results, no retries.
pub struct BatchExecutor {
    config: BatchExecutorConfig,
}

struct ChunkPlan<K, V> {
    op: &'static str,
    len: usize,
    chunks: Vec<Vec<(K, V)>>,
}

impl BatchExecutor {
    pub fn new() -> Self {
        Self {
            config: BatchExecutorConfig::default(),
        }
    }
    pub fn with_config(config: BatchExecutorConfig) -> Self {
        Self { config }
    }
    /// Executor using [`BatchStrategy::for_len`].
    pub fn for_len(len: usize) -> Self {
        Self::with_config(BatchExecutorConfig::new().with_strategy(BatchStrategy::for_len(len)))
    }
    pub fn config(&self) -> &BatchExecutorConfig {
        &self.config
    }

    /// Apply `worker` to every value, keeping keys and order.
    pub async fn map<C, U, E, F, Fut>(&self, collection: C, mut worker: F) -> Result<C::Rebuilt<U>, E>
    where
        C: Entries,
        F: FnMut(C::Value) -> Fut,
        Fut: Future<Output = Result<U, E>>,
    {
        let plan = self.plan("map", collection.into_entries());
        let mut out = Vec::with_capacity(plan.len);
        for (index, group) in plan.chunks.into_iter().enumerate() {
            let (keys, calls): (Vec<_>, Vec<_>) = group
                .into_iter()
                .map(|(key, value)| (key, worker(value)))
                .unzip();
            let values = in_position(self.settle(plan.op, index, calls).await?);
            out.extend(keys.into_iter().zip(values));
        }
        Ok(C::rebuild(out))
    }

    /// Keep the entries whose predicate resolves to `true`.
    ///
    /// The predicate only borrows the value, so the future it returns must own
    /// whatever it needs from it.
    pub async fn filter<C, E, F, Fut>(
        &self,
        collection: C,
        mut predicate: F,
    ) -> Result<C::Rebuilt<C::Value>, E>
    where
        C: Entries,
        F: FnMut(&C::Value) -> Fut,
        Fut: Future<Output = Result<bool, E>>,
    {
        let plan = self.plan("filter", collection.into_entries());
        let mut out = Vec::new();
        for (index, group) in plan.chunks.into_iter().enumerate() {
            let calls: Vec<Fut> = group.iter().map(|(_, value)| predicate(value)).collect();
            let verdicts = in_position(self.settle(plan.op, index, calls).await?);
            out.extend(
                group
                    .into_iter()
                    .zip(verdicts)
                    .filter_map(|(entry, keep)| keep.then_some(entry)),
            );
        }
        Ok(C::rebuild(out))
    }

    /// Fold the collection chunk by chunk.
    ///
    /// This is not a strict left fold. Every call in a chunk receives a clone
    /// of the accumulator as it stood when the chunk started, and the result
    /// that settles last becomes the accumulator for the next chunk. With
    /// [`BatchStrategy::Sequential`] each chunk holds one entry, which makes it
    /// an ordinary left fold.
    pub async fn reduce<C, A, E, F, Fut>(&self, collection: C, reducer: F, init: A) -> Result<A, E>
    where
        C: Entries,
        A: Clone,
        F: FnMut(A, C::Value) -> Fut,
        Fut: Future<Output = Result<A, E>>,
    {
        let plan = self.plan("reduce", collection.into_entries());
        self.fold(plan, reducer, init).await
    }

    /// [`reduce`](Self::reduce) over the entries in reverse order.
    pub async fn reduce_right<C, A, E, F, Fut>(
        &self,
        collection: C,
        reducer: F,
        init: A,
    ) -> Result<A, E>
    where
        C: Entries,
        A: Clone,
        F: FnMut(A, C::Value) -> Fut,
        Fut: Future<Output = Result<A, E>>,
    {
        let mut entries = collection.into_entries();
        entries.reverse();
        let plan = self.plan("reduce_right", entries);
        self.fold(plan, reducer, init).await
    }

    pub async fn for_each<C, E, F, Fut>(&self, collection: C, mut action: F) -> Result<(), E>
    where
        C: Entries,
        F: FnMut(C::Value) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        let plan = self.plan("for_each", collection.into_entries());
        for (index, group) in plan.chunks.into_iter().enumerate() {
            let calls: Vec<Fut> = group.into_iter().map(|(_, value)| action(value)).collect();
            self.settle(plan.op, index, calls).await?;
        }
        Ok(())
    }

    async fn fold<K, V, A, E, F, Fut>(
        &self,
        plan: ChunkPlan<K, V>,
        mut reducer: F,
        init: A,
    ) -> Result<A, E>
    where
        A: Clone,
        F: FnMut(A, V) -> Fut,
        Fut: Future<Output = Result<A, E>>,
    {
        let mut acc = init;
        for (index, group) in plan.chunks.into_iter().enumerate() {
            let calls: Vec<Fut> = group
                .into_iter()
                .map(|(_, value)| reducer(acc.clone(), value))
                .collect();
            // settle() reports in completion order
            if let Some((_, last)) = self.settle(plan.op, index, calls).await?.pop() {
                acc = last;
            }
        }
        Ok(acc)
    }

    fn plan<K, V>(&self, op: &'static str, entries: Vec<(K, V)>) -> ChunkPlan<K, V> {
        let len = entries.len();
        let size = self.config.strategy.chunk_size(len);
        let chunks = split_entries(entries, size);
        debug!(
            op,
            entries = len,
            chunk_size = size,
            chunks = chunks.len(),
            strategy = ?self.config.strategy,
            "batch started"
        );
        ChunkPlan { op, len, chunks }
    }

    /// Await one chunk. Results are `(slot, value)` pairs in the order they
    /// settled, where `slot` is the call's position within the chunk.
    async fn settle<R, E, Fut>(
        &self,
        op: &'static str,
        index: usize,
        calls: Vec<Fut>,
    ) -> Result<Vec<(usize, R)>, E>
    where
        Fut: Future<Output = Result<R, E>>,
    {
        let size = calls.len();
        let started = Instant::now();
        let mut pending: FuturesUnordered<_> = calls
            .into_iter()
            .enumerate()
            .map(|(slot, call)| async move { (slot, call.await) })
            .collect();

        let mut settled = Vec::with_capacity(size);
        let mut failure = None;
        while let Some((slot, outcome)) = pending.next().await {
            match outcome {
                Ok(value) => settled.push((slot, value)),
                Err(err) if failure.is_none() => {
                    warn!(
                        op,
                        chunk = index,
                        slot,
                        pending = pending.len(),
                        policy = ?self.config.sibling_policy,
                        "batch call failed"
                    );
                    if self.config.sibling_policy == SiblingPolicy::Cancel {
                        return Err(err);
                    }
                    failure = Some(err);
                }
                Err(_) => {}
            }
        }
        if let Some(err) = failure {
            return Err(err);
        }

        debug!(
            op,
            chunk = index,
            size,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "chunk settled"
        );
        Ok(settled)
    }
}

impl Default for BatchExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn in_position<R>(mut settled: Vec<(usize, R)>) -> Vec<R> {
    settled.sort_unstable_by_key(|&(slot, _)| slot);
    settled.into_iter().map(|(_, value)| value).collect()
}
