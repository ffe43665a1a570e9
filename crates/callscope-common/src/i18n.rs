//! Lightweight i18n translation registry.
//!
//! Provides a centralized, static translation map keyed by `(locale, message_key)`.
//! Supported locales: `en`, `zh-CN`. No external i18n framework dependency.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Default locale when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Supported locales.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "zh-CN"];

/// Central translation registry.
pub struct Translations {
    map: HashMap<(&'static str, &'static str), &'static str>,
}

impl Translations {
    /// Get a translated string for the given locale and key.
    /// Falls back to `en` if the locale is not found, then to the provided default.
    pub fn get<'a>(&self, locale: &str, key: &str, default: &'a str) -> &'a str {
        // Dereference to extract &'static str (which outlives any 'a)
        // from the &&'static str returned by HashMap::get
        if let Some(&val) = self.map.get(&(locale, key)) {
            return val;
        }
        if locale != "en" {
            if let Some(&val) = self.map.get(&("en", key)) {
                return val;
            }
        }
        default
    }

    /// Get a translated template string for formatting.
    /// Returns `None` if no translation is found for any locale.
    pub fn get_template(&self, locale: &str, key: &str) -> Option<&'static str> {
        self.map
            .get(&(locale, key))
            .or_else(|| {
                if locale != "en" {
                    self.map.get(&("en", key))
                } else {
                    None
                }
            })
            .copied()
    }
}

/// Global translation singleton.
pub static TRANSLATIONS: LazyLock<Translations> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Helper macro to reduce boilerplate
    macro_rules! t {
        ($locale:expr, $key:expr, $val:expr) => {
            map.insert(($locale, $key), $val);
        };
    }

    // ---- Alert messages ----

    // Low score rule: embeds the triggering score on the 10-point scale
    t!("en", "alert.low_score", "Low score: {score}/10");
    t!("zh-CN", "alert.low_score", "评分过低: {score}/10");

    // Risk words rule: fixed phrasing, the literal words are shown in the
    // call detail view instead of the alert message
    t!("en", "alert.risk_words", "Risk words detected in this call");
    t!("zh-CN", "alert.risk_words", "通话中检测到风险词");

    // Long duration rule
    t!(
        "en",
        "alert.long_duration",
        "Long call: {minutes} min (threshold: {threshold} min)"
    );
    t!(
        "zh-CN",
        "alert.long_duration",
        "通话时长过长: {minutes} 分钟（阈值: {threshold} 分钟）"
    );

    // No next step rule
    t!(
        "en",
        "alert.no_next_step",
        "No next step was recorded for this call"
    );
    t!("zh-CN", "alert.no_next_step", "通话未记录下一步行动");

    // ---- Alert type display labels ----
    t!("en", "alert_type.low_score", "Low score");
    t!("zh-CN", "alert_type.low_score", "评分过低");
    t!("en", "alert_type.risk_words", "Risk words");
    t!("zh-CN", "alert_type.risk_words", "风险词");
    t!("en", "alert_type.long_duration", "Long duration");
    t!("zh-CN", "alert_type.long_duration", "超长通话");
    t!("en", "alert_type.no_next_step", "No next step");
    t!("zh-CN", "alert_type.no_next_step", "无下一步行动");

    Translations { map }
});

/// Check if a locale string is supported.
pub fn is_supported_locale(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// Normalize locale: return the locale if supported, otherwise return the default.
pub fn normalize_locale(locale: &str) -> &str {
    if is_supported_locale(locale) {
        locale
    } else {
        DEFAULT_LOCALE
    }
}
