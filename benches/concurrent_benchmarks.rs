//! Concurrent Cache Benchmarks
//!
//! Measures the single-lock concurrent cache under read-heavy, write-heavy and
//! mixed traffic at different thread counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::thread;
use sync_lru::ConcurrentLruCache;

const CACHE_SIZE: usize = 10_000;
const OPS_PER_THREAD: usize = 1_000;

fn filled_cache() -> Arc<ConcurrentLruCache<usize, usize>> {
    let cache = Arc::new(ConcurrentLruCache::new(CACHE_SIZE).unwrap());
    for i in 0..CACHE_SIZE {
        cache.put(i, i);
    }
    cache
}

/// Benchmark concurrent read operations
fn concurrent_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Reads");
    group.throughput(Throughput::Elements((8 * OPS_PER_THREAD) as u64));

    let cache = filled_cache();
    group.bench_function("LRU", |b| {
        b.iter(|| run_concurrent_reads(Arc::clone(&cache), 8, OPS_PER_THREAD));
    });

    group.finish();
}

/// Benchmark concurrent write operations
fn concurrent_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Writes");
    group.throughput(Throughput::Elements((8 * OPS_PER_THREAD) as u64));

    let cache = filled_cache();
    group.bench_function("LRU", |b| {
        b.iter(|| run_concurrent_writes(Arc::clone(&cache), 8, OPS_PER_THREAD));
    });

    group.finish();
}

/// Benchmark mixed traffic (80% reads, 20% writes) across thread counts
fn concurrent_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Mixed");

    for threads in [1, 2, 4, 8, 16] {
        group.throughput(Throughput::Elements((threads * OPS_PER_THREAD) as u64));
        let cache = filled_cache();
        group.bench_with_input(BenchmarkId::new("LRU", threads), &threads, |b, &threads| {
            b.iter(|| run_concurrent_mixed(Arc::clone(&cache), threads, OPS_PER_THREAD));
        });
    }

    group.finish();
}

fn run_concurrent_reads(
    cache: Arc<ConcurrentLruCache<usize, usize>>,
    num_threads: usize,
    ops_per_thread: usize,
) {
    let mut handles = Vec::with_capacity(num_threads);
    for t in 0..num_threads {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..ops_per_thread {
                let key = (t * ops_per_thread + i) % CACHE_SIZE;
                black_box(cache.get(&key));
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

fn run_concurrent_writes(
    cache: Arc<ConcurrentLruCache<usize, usize>>,
    num_threads: usize,
    ops_per_thread: usize,
) {
    let mut handles = Vec::with_capacity(num_threads);
    for t in 0..num_threads {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..ops_per_thread {
                let key = t * ops_per_thread + i;
                cache.put(key, key);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

fn run_concurrent_mixed(
    cache: Arc<ConcurrentLruCache<usize, usize>>,
    num_threads: usize,
    ops_per_thread: usize,
) {
    let mut handles = Vec::with_capacity(num_threads);
    for t in 0..num_threads {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..ops_per_thread {
                let key = (t * ops_per_thread + i) % (CACHE_SIZE * 2);
                if i % 5 == 0 {
                    // 20% writes
                    cache.put(key, key);
                } else {
                    // 80% reads
                    black_box(cache.get(&key));
                }
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

criterion_group!(benches, concurrent_reads, concurrent_writes, concurrent_mixed);
criterion_main!(benches);
