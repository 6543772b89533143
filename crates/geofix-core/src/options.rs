use serde::{Deserialize, Serialize};

use crate::Locale;

/// Built-in default accuracy threshold, in meters.
pub const DEFAULT_ACCURACY_THRESHOLD_M: f64 = 100.0;
/// Built-in default cache tolerance, in milliseconds.
pub const DEFAULT_MAXIMUM_AGE_MS: u64 = 0;
/// Built-in default timeout, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 8_000;

/// Per-request options.
///
/// Every field is optional. Inside an adapter, an absent field means "use the
/// backend's own native default", so the facade merges caller options with
/// the process-wide defaults before dispatching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Reject fixes whose accuracy (meters) exceeds this value. `None`
    /// accepts any accuracy. Pass `f64::INFINITY` to switch the gate off for
    /// one request when the process default sets a threshold.
    #[serde(default)]
    pub accuracy_threshold: Option<f64>,
    /// How old a cached fix may be, in milliseconds. Only forwarded to
    /// backends that support it.
    #[serde(default)]
    pub maximum_age_ms: Option<u64>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Language for failure messages.
    #[serde(default)]
    pub locale: Option<Locale>,
}

impl RequestOptions {
    /// The built-in process defaults: 100 m threshold, no cache, 8 s timeout.
    #[must_use]
    pub fn builtin_defaults() -> Self {
        Self {
            accuracy_threshold: Some(DEFAULT_ACCURACY_THRESHOLD_M),
            maximum_age_ms: Some(DEFAULT_MAXIMUM_AGE_MS),
            timeout_ms: Some(DEFAULT_TIMEOUT_MS),
            locale: Some(Locale::default()),
        }
    }

    /// Fill every field this request left empty from `defaults`.
    ///
    /// Values set by the caller always win.
    #[must_use]
    pub fn merged_with(self, defaults: &RequestOptions) -> Self {
        Self {
            accuracy_threshold: self.accuracy_threshold.or(defaults.accuracy_threshold),
            maximum_age_ms: self.maximum_age_ms.or(defaults.maximum_age_ms),
            timeout_ms: self.timeout_ms.or(defaults.timeout_ms),
            locale: self.locale.or(defaults.locale),
        }
    }

    /// The effective message locale.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_takes_every_default() {
        let merged = RequestOptions::default().merged_with(&RequestOptions::builtin_defaults());
        assert_eq!(merged, RequestOptions::builtin_defaults());
    }

    #[test]
    fn caller_values_override_defaults() {
        let caller = RequestOptions {
            accuracy_threshold: Some(50.0),
            timeout_ms: Some(3_000),
            ..RequestOptions::default()
        };
        let merged = caller.merged_with(&RequestOptions::builtin_defaults());
        assert_eq!(merged.accuracy_threshold, Some(50.0));
        assert_eq!(merged.timeout_ms, Some(3_000));
        assert_eq!(merged.maximum_age_ms, Some(DEFAULT_MAXIMUM_AGE_MS));
        assert_eq!(merged.locale, Some(Locale::ZhCn));
    }

    #[test]
    fn defaults_without_threshold_leave_gate_open() {
        let defaults = RequestOptions {
            accuracy_threshold: None,
            ..RequestOptions::builtin_defaults()
        };
        let merged = RequestOptions::default().merged_with(&defaults);
        assert_eq!(merged.accuracy_threshold, None);
    }

    #[test]
    fn locale_defaults_to_chinese() {
        assert_eq!(RequestOptions::default().locale(), Locale::ZhCn);
        let en = RequestOptions {
            locale: Some(Locale::En),
            ..RequestOptions::default()
        };
        assert_eq!(en.locale(), Locale::En);
    }
}
