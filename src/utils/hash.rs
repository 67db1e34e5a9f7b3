//! FxHash of raw bytes, for cheap change detection.

use std::hash::Hasher;

use rustc_hash::FxHasher;

#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_ref());
    hasher.finish()
}
