#[cfg(test)]
mod tests {
    use crate::duration::*;
    use crate::error::Error;

    #[test]
    fn parses_units() {
        assert_eq!("14d".parse::<Duration>().unwrap(), Duration::days(14));
        assert_eq!("336h".parse::<Duration>().unwrap(), Duration::days(14));
        assert_eq!("90m".parse::<Duration>().unwrap(), Duration::minutes(90));
        assert_eq!("60s".parse::<Duration>().unwrap(), Duration::minutes(1));
        // bare numbers are days
        assert_eq!("31".parse::<Duration>().unwrap(), Duration::days(31));
        assert_eq!(" 2 d ".parse::<Duration>().unwrap(), Duration::days(2));
    }

    #[test]
    fn rejects_garbage() {
        for s in ["", "d", "14w", "-1d", "1.5d", "99999999999999999999d"] {
            assert!(matches!(s.parse::<Duration>(), Err(Error::InvalidDuration(_))), "{s} should fail");
        }
    }

    #[test]
    fn whole_days_only() {
        assert_eq!(Duration::hours(48).to_days().unwrap(), 2);
        assert!(matches!(Duration::hours(36).to_days(), Err(Error::FractionalDays(_))));
    }

    #[test]
    fn largest_constructor_inputs_do_not_overflow() {
        assert_eq!(Duration::days(u32::MAX).to_days().unwrap(), u32::MAX);
        assert_eq!(Duration::hours(u32::MAX), Duration::seconds(u32::MAX as u64 * 3600));
        assert_eq!(Duration::minutes(u32::MAX), Duration::seconds(u32::MAX as u64 * 60));
        // more days than a lifecycle rule can hold
        let too_long = Duration::seconds((u32::MAX as u64 + 1) * 86400);
        assert!(matches!(too_long.to_days(), Err(Error::InvalidDuration(_))));
    }

    #[test]
    fn displays_largest_whole_unit() {
        assert_eq!(Duration::days(14).to_string(), "14d");
        assert_eq!(Duration::hours(36).to_string(), "36h");
        assert_eq!(Duration::seconds(90).to_string(), "90s");
        assert_eq!(Duration::seconds(0).to_string(), "0s");
    }
}
