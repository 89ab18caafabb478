use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a rule violation.
///
/// Identity fields:
/// - rule description
/// - subject (element identity)
/// - violation message
pub fn fingerprint_for_violation(rule: &str, subject: &str, message: &str) -> String {
    let canonical = [rule, subject, message].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
