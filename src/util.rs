/// Converts an internal status code into a process exit code.
///
/// Valid exit codes are between 0 and 255. Like bash and its descendents,
/// positive n becomes n % 256 and negative n becomes (256 + n) % 256, so
/// the negative sentinel codes stay distinguishable to a test harness.
pub fn to_exit_code(code: i32) -> i32 {
    if code < 0 {
        (256 + code) % 256
    } else {
        code % 256
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_small_positive_codes_through() {
        assert_eq!(to_exit_code(0), 0);
        assert_eq!(to_exit_code(85), 85);
        assert_eq!(to_exit_code(300), 44);
    }

    #[test]
    fn wraps_negative_sentinels() {
        assert_eq!(to_exit_code(-1), 255);
        assert_eq!(to_exit_code(-2), 254);
        assert_eq!(to_exit_code(-3), 253);
        assert_eq!(to_exit_code(-4), 252);
    }
}
