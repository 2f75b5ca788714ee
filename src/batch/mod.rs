//! 有界并发批处理模块：按块调度异步任务，保证顺序与快速失败。
//!
//! # Bounded Batch Module
//!
//! Runs an async operation over every entry of a sequence or keyed map while
//! keeping at most a fixed number of calls in flight.
//!
//! ## Overview
//!
//! The collection is cut into chunks. All calls of a chunk are started
//! together, and the next chunk only starts once every one of them has
//! settled. Results come back in the shape of the input: same order for
//! sequences, same keys for maps.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`chunk`] | Split a collection into contiguous bounded groups |
//! | [`Entries`] | Keyed-entry view implemented for `Vec`, slices, `HashMap`, `BTreeMap` |
//! | [`BatchExecutor`] | `map` / `filter` / `reduce` / `reduce_right` / `for_each` over any [`Entries`] |
//! | [`BatchExecutorConfig`] | Strategy and sibling policy, from code, YAML or env |
//! | [`BatchStrategy`] | Chunk sizing (Sequential, Parallel, Concurrent) |
//! | [`SiblingPolicy`] | What happens to the rest of a chunk after a failure |
//! | [`map_limit`] and friends | Free-function shortcuts with an explicit limit |
//!
//! ## Example
//!
//! ```rust
//! use bounded_batch::batch::{filter_limit, map_limit};
//! use std::convert::Infallible;
//!
//! futures::executor::block_on(async {
//!     let doubled = map_limit(vec![1, 2, 3], |x: i32| async move { Ok::<_, Infallible>(x * 2) }, 2)
//!         .await
//!         .unwrap();
//!     assert_eq!(doubled, vec![2, 4, 6]);
//!
//!     let evens = filter_limit(doubled, |x: &i32| {
//!         let keep = x % 4 == 0;
//!         async move { Ok::<_, Infallible>(keep) }
//!     }, 2)
//!     .await
//!     .unwrap();
//!     assert_eq!(evens, vec![4]);
//! });
//! ```
//!
//! ## Failure
//!
//! The first error observed ends the operation and is returned as-is. Later
//! chunks never start. See [`SiblingPolicy`] for the calls still running in
//! the failing chunk.

mod chunk;
mod config;
mod entries;
mod executor;
mod limit;

pub use chunk::{chunk, chunk_count};
pub use config::{
    BatchExecutorConfig, BatchStrategy, SiblingPolicy, CONCURRENCY_ENV, SIBLING_POLICY_ENV,
};
pub use entries::Entries;
pub use executor::BatchExecutor;
pub use limit::{
    filter_limit, filter_ordered, for_each_limit, for_each_ordered, map_limit, map_ordered,
    reduce_limit, reduce_ordered, reduce_right_limit, reduce_right_ordered,
};
