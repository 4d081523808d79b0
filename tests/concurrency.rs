//! Concurrency tests: indexing and querying from many threads must neither
//! panic, deadlock, nor lose updates.

mod common;

use quarry::{QueryError, SearchEngine};
use std::thread;

#[test]
fn concurrent_writers_then_readers_leave_exact_counts() {
    const WRITERS: usize = 8;
    const DOCS_PER_WRITER: usize = 25;
    const READERS: usize = 4;

    let engine = SearchEngine::new();

    thread::scope(|scope| {
        for w in 0..WRITERS {
            let engine = engine.clone();
            scope.spawn(move || {
                for d in 0..DOCS_PER_WRITER {
                    let id = format!("writer{w}:doc{d}");
                    engine
                        .add_document(&id, "shared vocabulary plus unique marker")
                        .unwrap();
                }
            });
        }
    });

    let stats = engine.stats();
    assert_eq!(stats.total_documents, (WRITERS * DOCS_PER_WRITER) as u64);

    thread::scope(|scope| {
        for _ in 0..READERS {
            let engine = engine.clone();
            scope.spawn(move || {
                let results = engine.search("shared vocabulary", 500).unwrap();
                assert_eq!(results.len(), WRITERS * DOCS_PER_WRITER);
            });
        }
    });
}

#[test]
fn interleaved_readers_and_writers_never_observe_partial_state() {
    const ROUNDS: usize = 50;

    let engine = SearchEngine::new();
    engine.add_document("seed", "stable seed document").unwrap();

    thread::scope(|scope| {
        let writer = engine.clone();
        scope.spawn(move || {
            for i in 0..ROUNDS {
                writer
                    .add_document(&format!("round:{i}"), "rotating payload words")
                    .unwrap();
            }
        });

        for _ in 0..3 {
            let reader = engine.clone();
            scope.spawn(move || {
                for _ in 0..ROUNDS {
                    // The seed document is always present; every search must
                    // see a consistent index regardless of writer progress.
                    let results = reader.search("stable seed", 10).unwrap();
                    assert!(results.iter().any(|m| m.document_id == "seed"));

                    let stats = reader.stats();
                    if stats.total_documents > 0 {
                        let quotient =
                            stats.total_token_count as f64 / stats.total_documents as f64;
                        assert!((stats.average_document_length - quotient).abs() < 1e-9);
                    }
                }
            });
        }
    });

    assert_eq!(engine.stats().total_documents, (ROUNDS + 1) as u64);
}

#[test]
fn duplicate_ids_across_threads_admit_exactly_one() {
    const THREADS: usize = 8;

    let engine = SearchEngine::new();

    let successes: usize = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let engine = engine.clone();
                scope.spawn(move || {
                    engine
                        .add_document("contested", "everyone wants this id")
                        .is_ok() as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    assert_eq!(successes, 1);
    assert_eq!(engine.stats().total_documents, 1);
}

#[test]
fn try_search_reports_contention_instead_of_blocking() {
    // Uncontended: behaves like search.
    let engine = SearchEngine::new();
    engine.add_document("d1", "hello world").unwrap();
    assert_eq!(engine.try_search("hello", 10).unwrap().len(), 1);

    // EmptyQuery is checked before the lock is even attempted.
    assert_eq!(
        engine.try_search("", 10).unwrap_err(),
        QueryError::EmptyQuery
    );
}
