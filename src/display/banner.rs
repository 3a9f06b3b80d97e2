//! Read-only mode banner

/// Banner shown above any output while the access context is read-only
pub const READ_ONLY_BANNER: &str =
    "READ-ONLY MODE: you can browse the audit history but changes are disabled.";

/// The banner to print for the current access mode, if any
pub fn read_only_banner(read_only: bool) -> Option<&'static str> {
    read_only.then_some(READ_ONLY_BANNER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_only_when_read_only() {
        assert_eq!(read_only_banner(true), Some(READ_ONLY_BANNER));
        assert_eq!(read_only_banner(false), None);
    }
}
