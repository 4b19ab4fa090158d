//! Stable bucket assignment for shared dependency bundles.

use md5::{Digest, Md5};

/// Bucket a path is hashed into, in `0..bucket_count`.
///
/// The index is the sum of the MD5 digest bytes of the UTF-8 path, modulo the bucket count,
/// which keeps assignments identical to bundles produced by earlier editor builds. Returns
/// `None` for a bucket count of zero.
pub fn bucket_index(path: &str, bucket_count: u32) -> Option<u32> {
  if bucket_count == 0 {
    return None;
  }
  let digest = Md5::digest(path.as_bytes());
  let sum: u32 = digest.iter().map(|byte| u32::from(*byte)).sum();
  Some(sum % bucket_count)
}

#[cfg(test)]
mod tests {
  use super::bucket_index;

  #[test]
  fn matches_known_digest_sums() {
    // Digest byte sums: 2468, 1948 and 2066.
    assert_eq!(bucket_index("Assets/ResModel/Character/tex/hero_01_d.png", 5), Some(3));
    assert_eq!(bucket_index("Assets/ResScene/forest/grass.png", 5), Some(3));
    assert_eq!(bucket_index("Assets/ResScene/forest/terrain.asset", 5), Some(1));
    assert_eq!(bucket_index("Assets/ResModel/Character/tex/hero_01_d.png", 7), Some(4));
  }

  #[test]
  fn index_is_stable_and_in_range() {
    for count in 1..=16 {
      for path in ["a", "Assets/ResScene/x.png", "", "图/标.asset"] {
        let first = bucket_index(path, count).unwrap();
        assert!(first < count);
        assert_eq!(bucket_index(path, count), Some(first));
      }
    }
  }

  #[test]
  fn zero_buckets_yield_nothing() {
    assert_eq!(bucket_index("Assets/ResScene/x.png", 0), None);
  }
}
