/// Divides `numerator` by `denominator` and returns the quotient in hundredths,
/// rounding half up on the exact value. Returns `None` for a zero denominator.
pub fn ratio_in_hundredths(numerator: u64, denominator: u64) -> Option<u64> {
    if denominator == 0 {
        return None;
    }
    // floor(100n/d + 1/2) == floor((200n + d) / 2d)
    Some((200 * numerator + denominator) / (2 * denominator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_denominator() {
        assert_eq!(ratio_in_hundredths(10, 0), None);
    }

    #[test]
    fn test_exact_quotients() {
        assert_eq!(ratio_in_hundredths(0, 7), Some(0));
        assert_eq!(ratio_in_hundredths(80, 10), Some(800));
        assert_eq!(ratio_in_hundredths(10, 1), Some(1000));
    }

    #[test]
    fn test_rounds_rather_than_truncates() {
        // 67/7 = 9.5714...
        assert_eq!(ratio_in_hundredths(67, 7), Some(957));
        // 2/3 = 0.6666...
        assert_eq!(ratio_in_hundredths(2, 3), Some(67));
        // 1/8 = 0.125, a tie, goes up
        assert_eq!(ratio_in_hundredths(1, 8), Some(13));
        // 69/8 = 8.625
        assert_eq!(ratio_in_hundredths(69, 8), Some(863));
    }
}
