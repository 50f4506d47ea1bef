use std::fmt::Write as _;
use std::path::Path;

use num_bigint::BigUint;

/// Base of the subgroup the vulnerable generator draws its primes from.
const GENERATOR: u64 = 65537;

/// `(min_bits, max_bits, primes)`: the primorial of the first `primes` primes
/// is used for moduli whose bit length lies in `min_bits..=max_bits`.
const BUCKETS: [(u64, u64, usize); 4] = [
    (512, 991, 39),
    (992, 1983, 71),
    (1984, 3967, 126),
    (3968, 4096, 225),
];

fn first_primes(count: usize) -> Vec<u64> {
    let mut primes: Vec<u64> = Vec::with_capacity(count);
    let mut candidate = 2u64;
    while primes.len() < count {
        if primes.iter().all(|p| candidate % p != 0) {
            primes.push(candidate);
        }
        candidate += 1;
    }
    primes
}

/// Multiplicative order of `GENERATOR` modulo the prime `p`.
fn generator_order(p: u64) -> u64 {
    let g = GENERATOR % p;
    let mut value = g;
    let mut order = 1;
    while value != 1 {
        value = value * g % p;
        order += 1;
    }
    order
}

fn main() {
    let largest = BUCKETS.iter().map(|b| b.2).max().unwrap_or(0);
    let primes = first_primes(largest);

    let mut out = String::new();
    writeln!(out, "pub(crate) const GENERATOR: u32 = {GENERATOR};").unwrap();

    writeln!(
        out,
        "pub(crate) static SMALL_PRIMES: [SmallPrime; {}] = [",
        primes.len()
    )
    .unwrap();
    for &p in &primes {
        writeln!(
            out,
            "    SmallPrime {{ prime: {p}, order: {} }},",
            generator_order(p)
        )
        .unwrap();
    }
    writeln!(out, "];").unwrap();

    writeln!(
        out,
        "pub(crate) static FINGERPRINTS: [Fingerprint; {}] = [",
        BUCKETS.len()
    )
    .unwrap();
    for &(min_bits, max_bits, count) in &BUCKETS {
        let primorial = primes[..count]
            .iter()
            .fold(BigUint::from(1u32), |acc, &p| acc * p);
        let bytes = primorial
            .to_bytes_be()
            .iter()
            .map(|b| format!("0x{b:02x}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            out,
            "    Fingerprint {{ min_bits: {min_bits}, max_bits: {max_bits}, primes: {count}, primorial: &[{bytes}] }},"
        )
        .unwrap();
    }
    writeln!(out, "];").unwrap();

    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest = Path::new(&out_dir).join("fingerprint_table.rs");
    std::fs::write(&dest, out).expect("failed to write fingerprint table");
    println!("cargo:rerun-if-changed=build.rs");
}
