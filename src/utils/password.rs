use bcrypt::{hash, verify, BcryptError};

const TIMING_EQUALIZER_PASSWORD: &str = "timing-equalizer";

/// Lower costs are only meant for tests.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

/// bcrypt compares digests in constant time; a malformed stored hash counts
/// as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    verify(password, hash).unwrap_or(false)
}

/// Hash of a throwaway password at the same cost as real accounts. Checked
/// against when the account does not exist so both login failure paths do the
/// same amount of work.
pub fn timing_equalizer(cost: u32) -> Result<String, BcryptError> {
    hash(TIMING_EQUALIZER_PASSWORD, cost)
}

pub fn burn_verification(password: &str, equalizer: &str) {
    let _ = verify(password, equalizer);
}
