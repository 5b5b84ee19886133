//! Synthetic transaction ids for successful transfers.

use rand::Rng;

/// Prefix on every generated id.
pub const TRANSACTION_ID_PREFIX: &str = "tr_";

/// Length of the random part.
pub const TRANSACTION_ID_LEN: usize = 16;

/// Characters the random part is drawn from (no I, O, 0 or 1).
const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Generate an id like `tr_01JK5ME5VQ3KQ1N8`.
///
/// Uniqueness is not enforced; collisions are merely unlikely.
pub fn generate_transaction_id() -> String {
    let mut rng = rand::thread_rng();
    let random: String = (0..TRANSACTION_ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{TRANSACTION_ID_PREFIX}{random}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_id_shape() {
        let id = generate_transaction_id();
        assert!(id.starts_with(TRANSACTION_ID_PREFIX));
        assert_eq!(id.len(), TRANSACTION_ID_PREFIX.len() + TRANSACTION_ID_LEN);
    }

    #[test]
    fn test_transaction_id_alphabet() {
        for _ in 0..100 {
            let id = generate_transaction_id();
            let random = &id[TRANSACTION_ID_PREFIX.len()..];
            assert!(random.bytes().all(|b| ALPHABET.contains(&b)), "bad id {id}");
            assert!(!random.contains(['I', 'O', '0', '1']));
        }
    }
}
