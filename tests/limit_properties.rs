//! Chunking and batch-operation properties over plain sequences.

mod common;

use bounded_batch::{chunk, chunk_count, filter_limit, map_limit, reduce_limit, reduce_ordered};
use common::{init_tracing, WorkerError};
use proptest::prelude::*;
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

proptest! {
    #[test]
    fn prop_chunk_partitions_input(
        items in prop::collection::vec(any::<i32>(), 0..64),
        size in 1usize..10
    ) {
        let groups = chunk(items.clone(), size);

        prop_assert_eq!(groups.len(), (items.len() + size - 1) / size);
        prop_assert_eq!(groups.len(), chunk_count(items.len(), size));
        if let Some((last, full)) = groups.split_last() {
            prop_assert!(full.iter().all(|g| g.len() == size));
            prop_assert!(!last.is_empty() && last.len() <= size);
        }

        let flat: Vec<i32> = groups.into_iter().flatten().collect();
        prop_assert_eq!(flat, items);
    }

    #[test]
    fn prop_map_limit_matches_plain_map(items in prop::collection::vec(-1000i64..1000, 0..40)) {
        let expected: Vec<i64> = items.iter().map(|x| x * 2).collect();
        for k in [1, items.len(), items.len() + 5] {
            let out = tokio_test::block_on(map_limit(
                items.clone(),
                |x: i64| async move { Ok::<_, Infallible>(x * 2) },
                k,
            ))
            .unwrap();
            prop_assert_eq!(&out, &expected);
        }
    }

    #[test]
    fn prop_filter_limit_matches_plain_filter(items in prop::collection::vec(any::<u16>(), 0..40)) {
        let expected: Vec<u16> = items.iter().copied().filter(|x| x % 2 == 0).collect();
        for k in [1, items.len(), items.len() + 5] {
            let out = tokio_test::block_on(filter_limit(
                items.clone(),
                |x: &u16| {
                    let even = x % 2 == 0;
                    async move { Ok::<_, Infallible>(even) }
                },
                k,
            ))
            .unwrap();
            prop_assert_eq!(&out, &expected);
        }
    }

    #[test]
    fn prop_reduce_ordered_is_strict_fold(items in prop::collection::vec(0u32..100, 0..30)) {
        let expected: u32 = items.iter().sum();
        let out = tokio_test::block_on(reduce_ordered(
            items,
            |acc: u32, x: u32| async move { Ok::<_, Infallible>(acc + x) },
            0,
        ))
        .unwrap();
        prop_assert_eq!(out, expected);
    }
}

#[tokio::test]
async fn test_map_limit_fails_fast_on_seventh_item() {
    init_tracing();
    let invoked = Mutex::new(Vec::new());

    let result = map_limit(
        (0..10).collect::<Vec<usize>>(),
        |i: usize| {
            invoked.lock().unwrap().push(i);
            async move {
                if i == 6 {
                    Err(WorkerError(i))
                } else {
                    Ok(i * 2)
                }
            }
        },
        3,
    )
    .await;

    assert_eq!(result, Err(WorkerError(6)));
    // chunks [0-2] [3-5] [6-8] [9]: the last chunk is never dispatched
    let invoked = invoked.into_inner().unwrap();
    assert!(!invoked.contains(&9));
    assert_eq!(invoked, (0..9).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_reduce_limit_uses_chunk_snapshots() {
    init_tracing();
    // [1,2] both see 0 -> last settled is 2; [3,4] both see 2 -> last settled is 6
    let out = reduce_limit(
        vec![1, 2, 3, 4],
        |acc: i32, x: i32| async move { Ok::<_, Infallible>(acc + x) },
        0,
        2,
    )
    .await
    .unwrap();
    assert_eq!(out, 6);
    assert_ne!(out, 10);
}

#[tokio::test]
async fn test_reduce_limit_propagates_reducer_error() {
    let out = reduce_limit(
        vec![1usize, 2, 3],
        |acc: usize, x: usize| async move {
            if x == 3 {
                Err(WorkerError(x))
            } else {
                Ok(acc + x)
            }
        },
        0,
        2,
    )
    .await;
    assert_eq!(out, Err(WorkerError(3)));
}

#[tokio::test]
async fn test_map_limit_empty_never_calls_worker() {
    let calls = AtomicUsize::new(0);
    let out = map_limit(
        Vec::<u8>::new(),
        |x: u8| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<_, Infallible>(x) }
        },
        5,
    )
    .await
    .unwrap();
    assert!(out.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_map_limit_over_borrowed_slice() {
    let names = vec![String::from("ana"), String::from("bruno")];
    let lens = map_limit(
        names.as_slice(),
        |name| async move { Ok::<_, Infallible>(name.len()) },
        1,
    )
    .await
    .unwrap();
    assert_eq!(lens, vec![3, 5]);
    assert_eq!(names.len(), 2);
}

#[tokio::test]
async fn test_filter_limit_error_is_returned_verbatim() {
    let out = filter_limit(
        vec![1usize, 2, 3, 4],
        |x: &usize| {
            let x = *x;
            async move {
                if x == 2 {
                    Err(WorkerError(x))
                } else {
                    Ok(true)
                }
            }
        },
        4,
    )
    .await;
    assert_eq!(out, Err(WorkerError(2)));
}
