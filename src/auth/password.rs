use bcrypt::BcryptError;

/// Matches the work factor the accounts were originally created with.
pub const HASH_COST: u32 = 10;

/// Explicit hash-before-insert; there are no model hooks hiding this.
pub fn hash_password(plain: &str) -> Result<String, BcryptError> {
    bcrypt::hash(plain, HASH_COST)
}

/// Constant-time comparison under the hood; a malformed stored hash
/// counts as a mismatch rather than an error the caller must handle.
pub fn verify_password(plain: &str, hashed: &str) -> bool {
    bcrypt::verify(plain, hashed).unwrap_or(false)
}
