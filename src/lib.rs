//! # bounded-batch
//!
//! 有界并发的异步批处理：对序列与键值映射执行 map / filter / reduce / for_each。
//!
//! Bounded-concurrency async batch processing over sequences and keyed maps.
//!
//! ## Overview
//!
//! Callers hand over a collection and an async worker; the crate runs the
//! worker over every entry with at most `limit` calls in flight, chunk after
//! chunk, and hands back a result shaped like the input.
//!
//! ## Core Properties
//!
//! - **Chunked**: `ceil(len / limit)` chunks, each fully settled before the next starts
//! - **Shape-preserving**: sequences keep their order, maps keep their keys
//! - **Fail-fast**: the first worker error is returned verbatim; nothing partial
//! - **Runtime-agnostic**: built on `futures`, never spawns
//!
//! ## Quick Start
//!
//! ```rust
//! use bounded_batch::{map_limit, reduce_limit};
//! use std::convert::Infallible;
//!
//! futures::executor::block_on(async {
//!     let lens = map_limit(vec!["ab", "cde"], |s| async move { Ok::<_, Infallible>(s.len()) }, 4)
//!         .await
//!         .unwrap();
//!     assert_eq!(lens, vec![2, 3]);
//!
//!     // one call per chunk: a plain left fold
//!     let sum = reduce_limit(lens, |acc: usize, n| async move { Ok::<_, Infallible>(acc + n) }, 0, 1)
//!         .await
//!         .unwrap();
//!     assert_eq!(sum, 5);
//! });
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`batch`] | Chunking, executor, configuration and free-function shortcuts |
//! | [`error`] | The crate's own configuration and parsing errors |

pub mod batch;

pub use batch::{
    chunk, chunk_count, filter_limit, filter_ordered, for_each_limit, for_each_ordered, map_limit,
    map_ordered, reduce_limit, reduce_ordered, reduce_right_limit, reduce_right_ordered,
    BatchExecutor, BatchExecutorConfig, BatchStrategy, Entries, SiblingPolicy,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
