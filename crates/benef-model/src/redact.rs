//! Redaction of personal values (identifiers) in log output.

use std::sync::atomic::{AtomicBool, Ordering};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when row-level logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Allows or forbids row-level values in logs. Off by default.
pub fn set_log_data_enabled(enabled: bool) {
    LOG_DATA_ENABLED.store(enabled, Ordering::Release);
}

pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns `value` when row-level logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_redacted_unless_enabled() {
        assert_eq!(redact_value("11122233344"), REDACTED_VALUE);
        set_log_data_enabled(true);
        assert_eq!(redact_value("11122233344"), "11122233344");
        set_log_data_enabled(false);
        assert!(!log_data_enabled());
    }
}
