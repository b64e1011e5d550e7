#[macro_use]
extern crate criterion;
extern crate rand;
extern crate seedbloom;

use criterion::{BenchmarkId, Criterion};
use rand::Rng;
use seedbloom::{AtomicBloomFilter, Filter};

const SAMPLE_SIZE: usize = 500_000;
// Odd sizes keep every fingerprint bit in play.
const NUM_BITS: usize = 5_000_011;
const THREADS: usize = 4;

fn insert_shared(c: &mut Criterion) {
    let mut group = c.benchmark_group("AtomicBloomFilter");
    let group = group.sample_size(10);

    let mut rng = rand::thread_rng();
    let keys: Vec<[u8; 16]> = (0..SAMPLE_SIZE).map(|_| rng.gen()).collect();

    group.bench_with_input(
        BenchmarkId::new("insert_shared", SAMPLE_SIZE),
        &keys,
        |b, keys| {
            b.iter(|| {
                let filter = AtomicBloomFilter::new(NUM_BITS, 7).unwrap();
                std::thread::scope(|s| {
                    for chunk in keys.chunks(SAMPLE_SIZE / THREADS) {
                        let filter = &filter;
                        s.spawn(move || {
                            for key in chunk {
                                filter.insert(key);
                            }
                        });
                    }
                });
                filter
            });
        },
    );
}

fn contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("AtomicBloomFilter");

    let mut rng = rand::thread_rng();
    let filter = AtomicBloomFilter::new(NUM_BITS, 7).unwrap();
    for _ in 0..SAMPLE_SIZE {
        filter.insert(&rng.gen::<[u8; 16]>());
    }

    group.bench_function(BenchmarkId::new("contains", SAMPLE_SIZE), |b| {
        let key: [u8; 16] = rng.gen();
        b.iter(|| filter.contains(&key));
    });
}

criterion_group!(atomic_bloom, insert_shared, contains);
criterion_main!(atomic_bloom);
