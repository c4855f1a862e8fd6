//! Lexicographic successor of an encoded key.
//!
//! The successor of a non-empty `k` is the smallest byte string, no longer
//! than `k`, that compares strictly greater than `k`. It is found by
//! incrementing the rightmost byte below `0xff` and dropping everything
//! after it. The empty string, the smallest key of all, is followed by a
//! single `0x00`:
//!
//! ```text
//! 00 00 00 05  ->  00 00 00 06
//! 00 00 05 ff  ->  00 00 06
//! (empty)      ->  00
//! ff ff        ->  (none)
//! ```
//!
//! Scan planners use it to turn an exclusive lower bound into an inclusive
//! one.

use bytes::BytesMut;

/// Rewrites `buf` into its successor in place.
///
/// Returns `false`, leaving `buf` untouched, when `buf` is non-empty and
/// every byte is `0xff`, so no successor of at most the same length exists.
pub fn advance_to_successor(buf: &mut BytesMut) -> bool {
    if buf.is_empty() {
        buf.extend_from_slice(&[0x00]);
        return true;
    }
    match buf.iter().rposition(|&b| b != u8::MAX) {
        Some(idx) => {
            buf[idx] += 1;
            buf.truncate(idx + 1);
            true
        }
        None => false,
    }
}

/// Returns the successor of `bytes`, or `None` if there is none.
pub fn successor_bytes(bytes: &[u8]) -> Option<Vec<u8>> {
    if bytes.is_empty() {
        return Some(vec![0x00]);
    }
    let idx = bytes.iter().rposition(|&b| b != u8::MAX)?;
    let mut out = bytes[..=idx].to_vec();
    out[idx] += 1;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn advance(bytes: &[u8]) -> Option<Vec<u8>> {
        let mut buf = BytesMut::from(bytes);
        advance_to_successor(&mut buf).then(|| buf.to_vec())
    }

    #[test]
    fn increments_last_byte() {
        assert_eq!(advance(&[0, 0, 0, 5]), Some(vec![0, 0, 0, 6]));
    }

    #[test]
    fn truncates_after_incremented_byte() {
        assert_eq!(advance(&[0, 0, 5, 0xff]), Some(vec![0, 0, 6]));
        assert_eq!(advance(&[0x10, 0xff, 0xff, 0xff]), Some(vec![0x11]));
    }

    #[test]
    fn all_max_has_no_successor() {
        let mut buf = BytesMut::from(&[0xffu8, 0xff][..]);
        assert!(!advance_to_successor(&mut buf));
        assert_eq!(&buf[..], &[0xff, 0xff]);
        assert_eq!(advance(&[0xff]), None);
    }

    #[test]
    fn empty_is_followed_by_zero_byte() {
        assert_eq!(advance(&[]), Some(vec![0x00]));
        assert_eq!(successor_bytes(&[]), Some(vec![0x00]));
    }

    #[test]
    fn slice_and_in_place_agree() {
        let cases: [&[u8]; 5] = [&[1, 2, 3], &[0xfe, 0xff], &[0xff], &[0, 0xff, 0], &[]];
        for bytes in cases {
            assert_eq!(successor_bytes(bytes), advance(bytes));
        }
    }

    // Exhaustive over every string of length <= 2: nothing of that length
    // lies strictly between a key and its successor.
    #[test]
    fn successor_is_least_greater_string_of_bounded_length() {
        let mut universe: Vec<Vec<u8>> = (0..=255u8).map(|a| vec![a]).collect();
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                universe.push(vec![a, b]);
            }
        }

        for key in [vec![0x00, 0x05], vec![0x05, 0xff], vec![0x7f], vec![0xfe, 0xfe]] {
            let succ = successor_bytes(&key).unwrap();
            assert!(succ > key);
            assert!(succ.len() <= key.len());
            let between = universe
                .iter()
                .filter(|k| k.len() <= key.len())
                .find(|k| **k > key && **k < succ);
            assert_eq!(between, None, "key {key:02x?} successor {succ:02x?}");
        }
    }

    proptest! {
        #[test]
        fn successor_is_greater_and_no_longer(key in prop::collection::vec(any::<u8>(), 0..12)) {
            match successor_bytes(&key) {
                Some(succ) => {
                    prop_assert!(succ > key);
                    prop_assert!(succ.len() <= key.len().max(1));
                    prop_assert!(key.starts_with(&succ[..succ.len() - 1]));
                }
                None => {
                    prop_assert!(!key.is_empty());
                    prop_assert!(key.iter().all(|&b| b == 0xff));
                }
            }
        }
    }
}
