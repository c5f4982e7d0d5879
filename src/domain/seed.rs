//! Stable seeded selection.
//!
//! Fallback recipes must pick the same theme for the same article across runs
//! and across implementations, so the hash here reproduces 32-bit FNV-1a over
//! UTF-16 code units, reduced through a signed 32-bit integer exactly like the
//! stored articles were keyed.

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// FNV-1a over the UTF-16 code units of `key`, returned as the magnitude used
/// for bucket selection.
///
/// A non-empty key is reinterpreted as a signed 32-bit value before taking the
/// absolute value; the empty key keeps the unsigned offset basis.
pub fn fnv1a_utf16(key: &str) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut hashed_any = false;

    for unit in key.encode_utf16() {
        hash ^= u32::from(unit);
        hash = hash.wrapping_mul(FNV_PRIME);
        hashed_any = true;
    }

    if hashed_any {
        i64::from(hash as i32).unsigned_abs()
    } else {
        u64::from(hash)
    }
}

/// Pick one item from `items` keyed by `seed`. Returns `None` for an empty slice.
pub fn seeded_pick<'a, T>(seed: &str, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = fnv1a_utf16(seed) % items.len() as u64;
    items.get(index as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const THEMES: [&str; 3] = ["editorial-bold", "minimal-clean", "tech-neon"];

    #[test]
    fn single_character_matches_reference_hash() {
        let signed = 0xe40c_292c_u32 as i32;
        assert_eq!(fnv1a_utf16("a"), u64::from(signed.unsigned_abs()));
    }

    #[test]
    fn empty_key_keeps_offset_basis() {
        assert_eq!(fnv1a_utf16(""), u64::from(FNV_OFFSET_BASIS));
    }

    #[rstest]
    #[case("", "minimal-clean")]
    #[case("article-1", "minimal-clean")]
    #[case("article-2", "tech-neon")]
    #[case("article-3", "editorial-bold")]
    #[case("c", "tech-neon")]
    #[case("post-42", "editorial-bold")]
    #[case("Über", "tech-neon")]
    fn seeded_pick_is_stable(#[case] seed: &str, #[case] expected: &str) {
        assert_eq!(seeded_pick(seed, &THEMES), Some(&expected));
        assert_eq!(seeded_pick(seed, &THEMES), seeded_pick(seed, &THEMES));
    }

    #[test]
    fn empty_slice_has_no_pick() {
        let empty: [u8; 0] = [];
        assert_eq!(seeded_pick("anything", &empty), None);
    }
}
