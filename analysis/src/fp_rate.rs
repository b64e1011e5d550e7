// Measures the false positive rate of a filter against its estimate.
//
// usage: fp_rate <num_bits> <num_hashes> <num_items>

extern crate rand;
extern crate seedbloom;

use rand::Rng;
use seedbloom::{BloomFilter, Filter};

fn arg(args: &[String], i: usize, name: &str) -> usize {
    args.get(i)
        .unwrap_or_else(|| panic!("Expected {} argument", name))
        .parse()
        .unwrap_or_else(|e| panic!("Invalid {}: {}", name, e))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let num_bits = arg(&args, 1, "num_bits");
    let num_hashes = arg(&args, 2, "num_hashes");
    let num_items = arg(&args, 3, "num_items");

    let mut filter = match BloomFilter::new(num_bits, num_hashes) {
        Ok(filter) => filter,
        Err(e) => panic!("Cannot build filter: {}", e),
    };

    let mut rng = rand::thread_rng();
    let keys: Vec<[u8; 16]> = (0..num_items).map(|_| rng.gen()).collect();
    for key in keys.iter() {
        filter.insert(key);
    }
    tracing::info!(
        bits_set = filter.bits_set(),
        load_factor = filter.load_factor(),
        "inserted keys"
    );

    let false_negatives = keys.iter().filter(|key| !filter.contains(*key)).count();
    assert_eq!(false_negatives, 0, "Filter lost inserted keys");

    let false_positives = (0..num_items)
        .map(|_| rng.gen::<[u8; 16]>())
        .filter(|key| filter.contains(key))
        .count();
    let measured = false_positives as f64 / num_items.max(1) as f64;

    println!("measured\t{:.6}", measured);
    println!("estimated\t{:.6}", filter.estimated_fpp());
}
