use sha2::{Digest, Sha256};

/// True iff `candidate_hash` starts with `target_prefix`.
/// An empty target accepts every hash.
pub fn meets_target(candidate_hash: &str, target_prefix: &str) -> bool {
    candidate_hash.starts_with(target_prefix)
}

/// Lowercase hex SHA-256 of `input`.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash a miner computes for `nonce` against a block identifier:
/// the identifier with the decimal nonce appended.
pub fn candidate_hash(identifier: &str, nonce: u64) -> String {
    sha256_hex(&format!("{identifier}{nonce}"))
}

/// Try `attempts` consecutive nonces starting at `start_nonce`.
/// Returns the first `(nonce, hash)` that meets the target.
pub fn search(
    identifier: &str,
    target_prefix: &str,
    start_nonce: u64,
    attempts: u64,
) -> Option<(u64, String)> {
    let mut nonce = start_nonce;
    for _ in 0..attempts {
        let hash = candidate_hash(identifier, nonce);
        if meets_target(&hash, target_prefix) {
            return Some((nonce, hash));
        }
        nonce = nonce.wrapping_add(1);
    }
    None
}
