//! Stateless shortcuts over [`BatchExecutor`].
//!
//! The `*_limit` functions run chunks of `limit` calls at a time (a `limit` of
//! zero behaves like one). The `*_ordered` functions run one call at a time.
//! All of them cancel the rest of a chunk on the first error.

use super::config::{BatchExecutorConfig, BatchStrategy};
use super::entries::Entries;
use super::executor::BatchExecutor;
use std::future::Future;

fn limited(limit: usize) -> BatchExecutor {
    BatchExecutor::with_config(BatchExecutorConfig::new().with_strategy(
        BatchStrategy::Concurrent {
            max_concurrency: limit,
        },
    ))
}

fn ordered() -> BatchExecutor {
    BatchExecutor::with_config(BatchExecutorConfig::new().with_strategy(BatchStrategy::Sequential))
}

pub async fn map_limit<C, U, E, F, Fut>(collection: C, worker: F, limit: usize) -> Result<C::Rebuilt<U>, E>
where
    C: Entries,
    F: FnMut(C::Value) -> Fut,
    Fut: Future<Output = Result<U, E>>,
{
    limited(limit).map(collection, worker).await
}

pub async fn filter_limit<C, E, F, Fut>(
    collection: C,
    predicate: F,
    limit: usize,
) -> Result<C::Rebuilt<C::Value>, E>
where
    C: Entries,
    F: FnMut(&C::Value) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    limited(limit).filter(collection, predicate).await
}

/// See [`BatchExecutor::reduce`] for how the accumulator moves between chunks.
pub async fn reduce_limit<C, A, E, F, Fut>(
    collection: C,
    reducer: F,
    init: A,
    limit: usize,
) -> Result<A, E>
where
    C: Entries,
    A: Clone,
    F: FnMut(A, C::Value) -> Fut,
    Fut: Future<Output = Result<A, E>>,
{
    limited(limit).reduce(collection, reducer, init).await
}

pub async fn reduce_right_limit<C, A, E, F, Fut>(
    collection: C,
    reducer: F,
    init: A,
    limit: usize,
) -> Result<A, E>
where
    C: Entries,
    A: Clone,
    F: FnMut(A, C::Value) -> Fut,
    Fut: Future<Output = Result<A, E>>,
{
    limited(limit).reduce_right(collection, reducer, init).await
}

pub async fn for_each_limit<C, E, F, Fut>(collection: C, action: F, limit: usize) -> Result<(), E>
where
    C: Entries,
    F: FnMut(C::Value) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    limited(limit).for_each(collection, action).await
}

pub async fn map_ordered<C, U, E, F, Fut>(collection: C, worker: F) -> Result<C::Rebuilt<U>, E>
where
    C: Entries,
    F: FnMut(C::Value) -> Fut,
    Fut: Future<Output = Result<U, E>>,
{
    ordered().map(collection, worker).await
}

pub async fn filter_ordered<C, E, F, Fut>(collection: C, predicate: F) -> Result<C::Rebuilt<C::Value>, E>
where
    C: Entries,
    F: FnMut(&C::Value) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    ordered().filter(collection, predicate).await
}

/// Left fold: each call receives the previous call's result.
pub async fn reduce_ordered<C, A, E, F, Fut>(collection: C, reducer: F, init: A) -> Result<A, E>
where
    C: Entries,
    A: Clone,
    F: FnMut(A, C::Value) -> Fut,
    Fut: Future<Output = Result<A, E>>,
{
    ordered().reduce(collection, reducer, init).await
}

pub async fn reduce_right_ordered<C, A, E, F, Fut>(collection: C, reducer: F, init: A) -> Result<A, E>
where
    C: Entries,
    A: Clone,
    F: FnMut(A, C::Value) -> Fut,
    Fut: Future<Output = Result<A, E>>,
{
    ordered().reduce_right(collection, reducer, init).await
}

pub async fn for_each_ordered<C, E, F, Fut>(collection: C, action: F) -> Result<(), E>
where
    C: Entries,
    F: FnMut(C::Value) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    ordered().for_each(collection, action).await
}
