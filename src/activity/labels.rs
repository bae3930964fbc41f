//! Weekday labels for the activity axis

use chrono::{Datelike, Locale, NaiveDate, NaiveTime, TimeZone, Utc};

/// Environment variables consulted for the viewer's locale, highest priority first
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

/// Formats dates as a short weekday label plus day of month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayLabeler {
    locale: Locale,
}

impl DayLabeler {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Labeler for the viewer's locale, taken from the environment
    pub fn from_env() -> Self {
        Self::new(viewer_locale())
    }

    /// Labeler for an explicitly configured locale, else the viewer's
    ///
    /// An unknown locale name is logged and ignored.
    pub fn from_config(name: Option<&str>) -> Self {
        match name {
            Some(name) => match parse_locale(name) {
                Some(locale) => Self::new(locale),
                None => {
                    tracing::warn!(locale = name, "unknown locale, using environment");
                    Self::from_env()
                }
            },
            None => Self::from_env(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Abbreviated weekday (e.g. "Mon") and day of month for `date`
    pub fn label(&self, date: NaiveDate) -> (String, u32) {
        let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        let weekday = midnight.format_localized("%a", self.locale).to_string();
        (weekday, date.day())
    }
}

impl Default for DayLabeler {
    fn default() -> Self {
        Self::new(Locale::POSIX)
    }
}

/// Resolve the viewer's locale from `LC_ALL`, `LC_TIME` and `LANG`
///
/// Falls back to POSIX when none is set or recognized.
pub fn viewer_locale() -> Locale {
    LOCALE_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
        .and_then(|value| parse_locale(&value))
        .unwrap_or(Locale::POSIX)
}

/// Parse names like `en_US.UTF-8`, `de-DE` or `sr_RS@latin` into a locale
pub fn parse_locale(name: &str) -> Option<Locale> {
    let base = name
        .trim()
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('-', "_");

    match base.as_str() {
        "" | "C" | "POSIX" => Some(Locale::POSIX),
        other => Locale::try_from(other).ok(),
    }
}
