//! Fallback video id generation

use rand::Rng;

const BASE36_DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of synthetic video ids used when the share link carries none
pub trait IdGenerator: Send + Sync {
    /// Produce a new non-empty id
    fn generate(&self) -> String;
}

/// `douyin_` + base-36 unix millis + five random base-36 characters
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampIdGenerator;

impl IdGenerator for TimestampIdGenerator {
    fn generate(&self) -> String {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let mut rng = rand::thread_rng();
        let suffix: String = (0..5)
            .map(|_| BASE36_DIGITS[rng.gen_range(0..BASE36_DIGITS.len())] as char)
            .collect();

        format!("douyin_{}{}", to_base36(millis), suffix)
    }
}

/// Format a number in lowercase base 36
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn test_timestamp_generator_shape() {
        let id = TimestampIdGenerator.generate();
        assert!(id.starts_with("douyin_"));
        let token = &id["douyin_".len()..];
        assert!(token.len() > 5);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_timestamp_generator_varies() {
        let a = TimestampIdGenerator.generate();
        let b = TimestampIdGenerator.generate();
        assert_ne!(a, b);
    }
}
