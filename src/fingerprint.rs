use std::ops::RangeInclusive;

use num_bigint::BigUint;

/// A small prime factor of one of the primorials, together with the
/// multiplicative order of [`GENERATOR`] modulo that prime.
#[derive(Debug)]
pub(crate) struct SmallPrime {
    pub(crate) prime: u32,
    pub(crate) order: u32,
}

/// One entry of the fingerprint table: the primorial used for moduli whose
/// bit length falls in `min_bits..=max_bits`.
#[derive(Debug)]
pub(crate) struct Fingerprint {
    pub(crate) min_bits: u64,
    pub(crate) max_bits: u64,
    /// Number of leading entries of [`SMALL_PRIMES`] whose product is `primorial`.
    pub(crate) primes: usize,
    /// Big-endian bytes of the primorial.
    pub(crate) primorial: &'static [u8],
}

// Generated by build.rs: GENERATOR, SMALL_PRIMES and FINGERPRINTS.
include!(concat!(env!("OUT_DIR"), "/fingerprint_table.rs"));

impl Fingerprint {
    fn covers(&self, bits: u64) -> bool {
        (self.min_bits..=self.max_bits).contains(&bits)
    }

    fn factors(&self) -> &'static [SmallPrime] {
        &SMALL_PRIMES[..self.primes]
    }
}

/// Select the table entry for a modulus of `bits` bits.
pub(crate) fn bucket_for(bits: u64) -> Option<&'static Fingerprint> {
    FINGERPRINTS.iter().find(|f| f.covers(bits))
}

/// Bit-length ranges for which a fingerprint exists.
pub(crate) fn key_sizes() -> impl Iterator<Item = RangeInclusive<u64>> {
    FINGERPRINTS.iter().map(|f| f.min_bits..=f.max_bits)
}

/// `base^exp mod modulus` for word-sized operands.
fn pow_mod(base: u64, mut exp: u64, modulus: u64) -> u64 {
    let mut result = 1 % modulus;
    let mut base = base % modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % modulus;
        }
        base = base * base % modulus;
        exp >>= 1;
    }
    result
}

/// Whether `residue` (already reduced mod `p`) is a power of the generator mod `p`.
///
/// The group of units mod `p` is cyclic, so the subgroup generated by the
/// generator is exactly the set of units whose `order`-th power is one.
fn in_subgroup(residue: u64, p: &SmallPrime) -> bool {
    residue != 0 && pow_mod(residue, u64::from(p.order), u64::from(p.prime)) == 1
}

/// Reduce `value` modulo a small prime.
fn residue(value: &BigUint, prime: u32) -> u64 {
    (value % prime).iter_u64_digits().next().unwrap_or(0)
}

/// Check whether `n` matches the fingerprint of the vulnerable RSA generator.
///
/// Moduli produced by it have the form `k * M + (65537^a mod M)` for both
/// factors, so `n mod M` lies in the subgroup generated by 65537. Membership is
/// tested one prime factor of `M` at a time; any miss clears the modulus.
pub(crate) fn is_weak(n: &BigUint) -> bool {
    let bits = n.bits();
    let Some(fingerprint) = bucket_for(bits) else {
        log::debug!("{bits}-bit modulus is outside every fingerprint bucket");
        return false;
    };
    log::debug!(
        "testing {bits}-bit modulus for powers of {GENERATOR} modulo the primorial of {} primes",
        fingerprint.primes
    );

    let primorial = BigUint::from_bytes_be(fingerprint.primorial);
    let r = n % &primorial;
    fingerprint
        .factors()
        .iter()
        .all(|p| in_subgroup(residue(&r, p.prime), p))
}
