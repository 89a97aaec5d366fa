use sha2::{Digest, Sha256};

/// Computes the SHA-256 digest of a solution's contents.
///
/// Used to tell whether an existing solution file already holds the code about
/// to be written, so unchanged files are left untouched.
///
/// # Arguments
///
/// * `content` - The raw bytes of the file content.
///
/// # Returns
///
/// A hexadecimal string representation of the SHA-256 digest.
pub fn compute_content_digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}
