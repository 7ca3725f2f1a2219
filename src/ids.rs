//! Short, application-generated primary keys.

use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;

const ALPHABET: &[u8; 64] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_-";
const LEN: usize = 9;

/// Generate a fresh short id.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    (0..LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Whether `id` looks like a short id.
pub fn is_valid(id: &str) -> bool {
    lazy_static! {
        static ref SHORT_ID_RE: Regex = Regex::new(r"^[0-9A-Za-z_-]{7,14}$").unwrap();
    }
    SHORT_ID_RE.is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_valid() {
        for _ in 0..100 {
            let id = generate();
            assert_eq!(id.len(), LEN);
            assert!(is_valid(&id), "{id} should be valid");
        }
    }

    #[test]
    fn generated_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn rejects_foreign_shapes() {
        assert!(!is_valid(""));
        assert!(!is_valid("abc"));
        assert!(!is_valid("has space1"));
        assert!(!is_valid("8f14e45f-ceea-467f-a0e6-5b3b5b2f1a11"));
    }
}
