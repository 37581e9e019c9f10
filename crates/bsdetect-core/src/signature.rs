//! Byte signature search.
//!
//! Every content heuristic reduces to "does this byte pattern occur at
//! least N times in the image". [`contains_signature`] is the only place
//! that walks the image byte-by-byte, so bounds handling lives here and
//! nowhere else.

/// A byte pattern plus the number of times it must occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub bytes: &'static [u8],
    pub min_hits: usize,
}

impl Signature {
    /// A signature that must occur at least once.
    pub const fn once(bytes: &'static [u8]) -> Self {
        Self { bytes, min_hits: 1 }
    }

    /// A signature that must occur at least `min_hits` times.
    pub const fn repeated(bytes: &'static [u8], min_hits: usize) -> Self {
        Self { bytes, min_hits }
    }

    /// Returns `true` if this signature occurs often enough in `image`.
    #[inline]
    pub fn is_found_in(&self, image: &[u8]) -> bool {
        contains_signature(image, self.bytes, self.min_hits)
    }
}

/// Returns `true` if any signature in `table` is found in `image`.
pub fn any_found_in(table: &[Signature], image: &[u8]) -> bool {
    table.iter().any(|sig| sig.is_found_in(image))
}

/// Count occurrences of `pattern` in `image`, overlapping matches included,
/// and return `true` once at least `min_hits` have been seen.
///
/// A pattern longer than the image never matches. An empty pattern never
/// matches either, except that `min_hits == 0` is trivially satisfied.
pub fn contains_signature(image: &[u8], pattern: &[u8], min_hits: usize) -> bool {
    if min_hits == 0 {
        return true;
    }
    if pattern.is_empty() || pattern.len() > image.len() {
        return false;
    }

    let mut hits = 0;
    for window in image.windows(pattern.len()) {
        if window == pattern {
            hits += 1;
            if hits >= min_hits {
                return true;
            }
        }
    }
    false
}
