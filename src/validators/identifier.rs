/// Length of a hex-encoded document identifier.
pub const OBJECT_ID_LENGTH: usize = 24;

/// True for 24-character lowercase hexadecimal strings.
pub fn is_object_id(value: &str) -> bool {
    value.len() == OBJECT_ID_LENGTH
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_ids() {
        assert!(is_object_id("65f1a2b3c4d5e6f708192a3b"));
        assert!(!is_object_id("65F1A2B3C4D5E6F708192A3B"));
        assert!(!is_object_id("65f1a2b3c4d5e6f708192a3"));
        assert!(!is_object_id("zzf1a2b3c4d5e6f708192a3b"));
        assert!(!is_object_id(""));
    }
}
