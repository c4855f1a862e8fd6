//! Benchmark utilities.

use ordkey_codec::OwnedCell;
use rand::Rng;

/// Schema used by the composite key benchmarks.
pub const COMPOSITE_SCHEMA: &str = "tenant:uint32,name:string,version:int64,payload:binary";

/// Generate a random lowercase string of the specified length, with an
/// occasional NUL to exercise escaping.
pub fn random_name(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            if rng.gen_ratio(1, 16) {
                '\0'
            } else {
                rng.gen_range(b'a'..=b'z') as char
            }
        })
        .collect()
}

/// Generate random bytes of the specified size.
pub fn random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// Generate tuples matching [`COMPOSITE_SCHEMA`].
pub fn generate_tuples(count: usize, name_len: usize) -> Vec<Vec<OwnedCell>> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            vec![
                OwnedCell::UInt32(rng.gen()),
                OwnedCell::String(random_name(name_len)),
                OwnedCell::Int64(rng.gen()),
                OwnedCell::Binary(random_data(16)),
            ]
        })
        .collect()
}
