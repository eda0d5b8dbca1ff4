use md5::{Digest, Md5};

/// Content fingerprint of raw document bytes: hex-encoded MD5.
///
/// Collision resistance is not a security concern here — the digest only
/// deduplicates cache entries — and the 128-bit hex format matches the
/// keys of caches written by earlier deployments, which stay readable.
pub fn fingerprint(bytes: &[u8]) -> String {
    let digest = Md5::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
