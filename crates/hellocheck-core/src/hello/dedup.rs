use std::collections::HashSet;
use std::hash::Hash;

/// Remove repeated values, keeping each value at the position of its first
/// occurrence.
///
/// `[a, b, a, c, b]` becomes `[a, b, c]`. The result is never longer than
/// the input and equals it when the input has no duplicates.
pub fn dedup<T>(values: &[T]) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::with_capacity(values.len());
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        if seen.insert(value) {
            out.push(value.clone());
        }
    }
    out
}

/// Whether `values` contains any value more than once.
pub fn has_duplicates<T>(values: &[T]) -> bool
where
    T: Eq + Hash,
{
    let mut seen = HashSet::with_capacity(values.len());
    !values.iter().all(|v| seen.insert(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{CipherSuite, ProtocolVersion};
    use proptest::prelude::*;

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let input = vec![3, 1, 3, 2, 1, 3];
        assert_eq!(dedup(&input), vec![3, 1, 2]);
    }

    #[test]
    fn test_dedup_empty() {
        let input: Vec<u16> = vec![];
        assert!(dedup(&input).is_empty());
        assert!(!has_duplicates(&input));
    }

    #[test]
    fn test_dedup_cipher_suites() {
        let input = vec![
            CipherSuite::TLS_DHE_RSA_WITH_AES_256_CBC_SHA256,
            CipherSuite::TLS_AES_128_GCM_SHA256,
            CipherSuite::TLS_DHE_RSA_WITH_AES_256_CBC_SHA256,
        ];
        assert_eq!(
            dedup(&input),
            vec![
                CipherSuite::TLS_DHE_RSA_WITH_AES_256_CBC_SHA256,
                CipherSuite::TLS_AES_128_GCM_SHA256,
            ]
        );
    }

    #[test]
    fn test_dedup_protocol_versions() {
        let input = vec![
            ProtocolVersion::TLS13,
            ProtocolVersion::TLS12,
            ProtocolVersion::TLS13,
            ProtocolVersion::TLS13,
        ];
        assert_eq!(dedup(&input), vec![ProtocolVersion::TLS13, ProtocolVersion::TLS12]);
    }

    #[test]
    fn test_dedup_alpn_tokens() {
        let input: Vec<String> = ["http/1.1", "h2c", "http/1.1", "irc", "http/1.1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(dedup(&input), vec!["http/1.1", "h2c", "irc"]);
    }

    #[test]
    fn test_has_duplicates() {
        assert!(has_duplicates(&["a", "b", "a"]));
        assert!(!has_duplicates(&["a", "b", "c"]));
    }

    proptest! {
        #[test]
        fn dedup_is_idempotent(values in proptest::collection::vec(0u8..16, 0..64)) {
            let once = dedup(&values);
            prop_assert_eq!(dedup(&once), once);
        }

        #[test]
        fn dedup_length_bound(values in proptest::collection::vec(0u8..16, 0..64)) {
            let out = dedup(&values);
            prop_assert!(out.len() <= values.len());
            prop_assert_eq!(out.len() == values.len(), !has_duplicates(&values));
            prop_assert!(!has_duplicates(&out));
        }

        #[test]
        fn dedup_preserves_first_occurrence_order(
            values in proptest::collection::vec(0u8..16, 0..64)
        ) {
            let out = dedup(&values);
            let first_positions: Vec<usize> = out
                .iter()
                .map(|v| values.iter().position(|x| x == v).unwrap())
                .collect();
            prop_assert!(first_positions.windows(2).all(|w| w[0] < w[1]));
            // Every distinct input value survives.
            prop_assert!(values.iter().all(|v| out.contains(v)));
        }
    }
}
