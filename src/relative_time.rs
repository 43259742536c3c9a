use strum::AsRefStr;
use thiserror::Error;
use time::OffsetDateTime;

use crate::language::resolve_locale;
use crate::timestamp::{LocalZone, parse_timestamp};

pub const DEFAULT_LOCALE: &str = "en";

#[derive(Debug, Error, PartialEq)]
pub enum FormatterError {
    #[error("Unsupported locale: {0}")]
    UnknownLocale(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// What a timestamp looks like relative to now, before translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum RelativeLabel {
    Unavailable,
    JustNow,
    MinutesAgo(i64),
    HoursAgo(i64),
    DayAgo,
    TwoDaysAgo,
    DaysAgo(i64),
    MonthDay { month: u8, day: u8 },
}

impl RelativeLabel {
    /// Buckets the time elapsed between `instant` and `now`.
    ///
    /// Both instants are cut to whole milliseconds first. Every boundary
    /// truncates, so 23h59m59s is still `HoursAgo(23)`. Instants after `now`
    /// are `Unavailable`.
    pub fn classify(instant: OffsetDateTime, now: OffsetDateTime, zone: &LocalZone) -> Self {
        let elapsed = to_millis(now) - to_millis(instant);
        if elapsed.is_negative() {
            return Self::Unavailable;
        }

        match elapsed.whole_days() {
            0 => match elapsed.whole_hours() {
                0 => match elapsed.whole_minutes() {
                    0 => Self::JustNow,
                    minutes => Self::MinutesAgo(minutes),
                },
                hours => Self::HoursAgo(hours),
            },
            1 => Self::DayAgo,
            2 => Self::TwoDaysAgo,
            days @ 3..7 => Self::DaysAgo(days),
            _ => {
                let local = zone.to_local(instant);
                Self::MonthDay {
                    month: local.month().into(),
                    day: local.day(),
                }
            }
        }
    }

    pub fn kind(&self) -> &str {
        self.as_ref()
    }

    pub fn localize(&self, locale: &str) -> String {
        match *self {
            Self::Unavailable => rust_i18n::t!("unavailable", locale = locale).to_string(),
            Self::JustNow => rust_i18n::t!("just now", locale = locale).to_string(),
            Self::MinutesAgo(minutes) => {
                rust_i18n::t!("minutes ago", locale = locale, count = minutes).to_string()
            }
            Self::HoursAgo(hours) => {
                rust_i18n::t!("hours ago", locale = locale, count = hours).to_string()
            }
            Self::DayAgo => rust_i18n::t!("a day ago", locale = locale).to_string(),
            Self::TwoDaysAgo => rust_i18n::t!("two days ago", locale = locale).to_string(),
            Self::DaysAgo(days) => {
                rust_i18n::t!("days ago", locale = locale, count = days).to_string()
            }
            Self::MonthDay { month, day } => {
                rust_i18n::t!("month_day", locale = locale, month = month, day = day).to_string()
            }
        }
    }
}

fn to_millis(instant: OffsetDateTime) -> OffsetDateTime {
    instant
        .replace_millisecond(instant.millisecond())
        .unwrap_or(instant)
}

/// Turns timestamps into labels such as "5 minutes ago" or "3/14".
///
/// The zone decides which calendar day an old instant falls on and how
/// timestamps without an offset are read.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeTimeFormatter {
    locale: String,
    zone: LocalZone,
}

impl Default for RelativeTimeFormatter {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_owned(),
            zone: LocalZone::utc(),
        }
    }
}

impl RelativeTimeFormatter {
    pub fn new(locale: &str, timezone: &str) -> Result<Self, FormatterError> {
        let locale =
            resolve_locale(locale).ok_or_else(|| FormatterError::UnknownLocale(locale.to_owned()))?;
        let zone = LocalZone::named(timezone)
            .ok_or_else(|| FormatterError::UnknownTimezone(timezone.to_owned()))?;

        Ok(Self {
            locale: locale.to_owned(),
            zone,
        })
    }

    /// Builds a formatter from client-supplied hints, keeping `fallback`'s
    /// settings for anything missing or unrecognised.
    ///
    /// `languages` is best first; the first one with a bundled translation wins.
    pub fn for_request(
        languages: &[String],
        timezone: Option<&str>,
        fallback: &RelativeTimeFormatter,
    ) -> Self {
        let locale = match languages.iter().find_map(|tag| resolve_locale(tag)) {
            Some(locale) => locale,
            None if languages.is_empty() => fallback.locale.as_str(),
            None => {
                tracing::warn!(languages = ?languages, "No supported language, using default");
                fallback.locale.as_str()
            }
        };

        let zone = match timezone.map(str::trim).filter(|tz| !tz.is_empty()) {
            Some(name) => LocalZone::named(name).unwrap_or_else(|| {
                tracing::warn!(timezone = name, "Unknown timezone, using default");
                fallback.zone.clone()
            }),
            None => fallback.zone.clone(),
        };

        Self {
            locale: locale.to_owned(),
            zone,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn zone(&self) -> &LocalZone {
        &self.zone
    }

    pub fn label_at(&self, timestamp: Option<&str>, now: OffsetDateTime) -> RelativeLabel {
        timestamp
            .and_then(|value| parse_timestamp(value, &self.zone))
            .map_or(RelativeLabel::Unavailable, |instant| {
                RelativeLabel::classify(instant, now, &self.zone)
            })
    }

    pub fn format_at(&self, timestamp: Option<&str>, now: OffsetDateTime) -> String {
        self.label_at(timestamp, now).localize(&self.locale)
    }

    pub fn format(&self, timestamp: Option<&str>) -> String {
        self.format_at(timestamp, OffsetDateTime::now_utc())
    }
}

/// Human-friendly label for how long ago `timestamp` was.
///
/// Missing, blank, unparseable and future timestamps all produce the
/// "Unavailable" label.
pub fn format_relative_time(timestamp: Option<&str>) -> String {
    RelativeTimeFormatter::default().format(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use time::{Duration, macros::datetime};
    use tracing_subscriber::fmt::MakeWriter;

    const NOW: OffsetDateTime = datetime!(2024-03-20 12:00:00 UTC);

    fn ago(duration: Duration) -> String {
        (NOW - duration)
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap()
    }

    fn format(input: Option<&str>) -> String {
        RelativeTimeFormatter::default().format_at(input, NOW)
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn subscriber_for(logs: &CapturedLogs) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish()
    }

    #[test]
    fn missing_or_blank_is_unavailable() {
        assert_eq!(format(None), "Unavailable");
        assert_eq!(format(Some("")), "Unavailable");
        assert_eq!(format(Some(" \t\n")), "Unavailable");
    }

    #[test]
    fn unparseable_is_unavailable() {
        assert_eq!(format(Some("not a date")), "Unavailable");
        assert_eq!(format(Some("2024-03-32")), "Unavailable");
    }

    #[test]
    fn future_is_unavailable() {
        assert_eq!(format(Some(&ago(Duration::seconds(-1)))), "Unavailable");
        assert_eq!(format(Some(&ago(Duration::days(-3)))), "Unavailable");
    }

    #[test]
    fn sub_day_labels() {
        assert_eq!(format(Some(&ago(Duration::ZERO))), "just now");
        assert_eq!(format(Some(&ago(Duration::seconds(30)))), "just now");
        assert_eq!(format(Some(&ago(Duration::seconds(59)))), "just now");
        assert_eq!(format(Some(&ago(Duration::minutes(1)))), "1 minutes ago");
        assert_eq!(format(Some(&ago(Duration::minutes(45)))), "45 minutes ago");
        assert_eq!(format(Some(&ago(Duration::minutes(59)))), "59 minutes ago");
        assert_eq!(format(Some(&ago(Duration::hours(5)))), "5 hours ago");
    }

    #[test]
    fn boundaries_truncate() {
        let almost_a_day = Duration::hours(23) + Duration::minutes(59) + Duration::seconds(59);

        assert_eq!(format(Some(&ago(almost_a_day))), "23 hours ago");
        assert_eq!(format(Some(&ago(Duration::hours(24)))), "a day ago");
        assert_eq!(format(Some(&ago(Duration::hours(47)))), "a day ago");
    }

    #[test]
    fn day_labels() {
        assert_eq!(format(Some(&ago(Duration::days(2)))), "two days ago");
        assert_eq!(format(Some(&ago(Duration::days(3)))), "3 days ago");
        assert_eq!(format(Some(&ago(Duration::days(5)))), "5 days ago");
        assert_eq!(
            format(Some(&ago(Duration::days(7) - Duration::seconds(1)))),
            "6 days ago"
        );
    }

    #[test]
    fn a_week_or_more_shows_month_and_day() {
        assert_eq!(format(Some(&ago(Duration::days(7)))), "3/13");
        assert_eq!(format(Some(&ago(Duration::days(10)))), "3/10");
        assert_eq!(format(Some("2023-01-05T00:00:00Z")), "1/5");
    }

    #[test]
    fn month_and_day_follow_the_zone() {
        let shanghai = RelativeTimeFormatter::new("en", "Asia/Shanghai").unwrap();
        let late_evening_utc = Some("2024-03-10T20:00:00Z");

        assert_eq!(format(late_evening_utc), "3/10");
        assert_eq!(shanghai.format_at(late_evening_utc, NOW), "3/11");
    }

    #[test]
    fn classify_reports_kinds() {
        let zone = LocalZone::utc();

        assert_eq!(
            RelativeLabel::classify(NOW - Duration::minutes(3), NOW, &zone),
            RelativeLabel::MinutesAgo(3)
        );
        assert_eq!(
            RelativeLabel::classify(NOW - Duration::days(30), NOW, &zone),
            RelativeLabel::MonthDay { month: 2, day: 19 }
        );
        assert_eq!(RelativeLabel::MinutesAgo(3).kind(), "minutes_ago");
        assert_eq!(RelativeLabel::TwoDaysAgo.kind(), "two_days_ago");
        assert_eq!(
            RelativeLabel::MonthDay { month: 1, day: 1 }.kind(),
            "month_day"
        );
    }

    #[test]
    fn chinese_labels() {
        let zh = RelativeTimeFormatter::new("zh-CN", "Asia/Shanghai").unwrap();

        assert_eq!(zh.format_at(None, NOW), "暂无");
        assert_eq!(zh.format_at(Some(&ago(Duration::seconds(5))), NOW), "刚刚");
        assert_eq!(zh.format_at(Some(&ago(Duration::minutes(45))), NOW), "45分钟前");
        assert_eq!(zh.format_at(Some(&ago(Duration::hours(5))), NOW), "5小时前");
        assert_eq!(zh.format_at(Some(&ago(Duration::days(1))), NOW), "一天前");
        assert_eq!(zh.format_at(Some(&ago(Duration::days(2))), NOW), "两天前");
        assert_eq!(zh.format_at(Some(&ago(Duration::days(4))), NOW), "4天前");
    }

    #[test]
    fn same_instant_same_label() {
        let input = Some("2024-03-18T09:15:00Z");

        assert_eq!(format(input), format(input));
    }

    #[test]
    fn new_rejects_unknown_settings() {
        assert_eq!(
            RelativeTimeFormatter::new("xx", "UTC"),
            Err(FormatterError::UnknownLocale("xx".to_owned()))
        );
        assert_eq!(
            RelativeTimeFormatter::new("en", "Nowhere/Special"),
            Err(FormatterError::UnknownTimezone("Nowhere/Special".to_owned()))
        );
    }

    #[test]
    fn for_request_falls_back() {
        let fallback = RelativeTimeFormatter::new("zh-CN", "Asia/Shanghai").unwrap();

        let formatter = RelativeTimeFormatter::for_request(&tags(&["en-US"]), None, &fallback);
        assert_eq!(formatter.locale(), "en");
        assert_eq!(formatter.zone().name(), "Asia/Shanghai");

        let formatter =
            RelativeTimeFormatter::for_request(&tags(&["ja", "en"]), None, &fallback);
        assert_eq!(formatter.locale(), "en");

        let formatter =
            RelativeTimeFormatter::for_request(&tags(&["ja"]), Some("Bogus/Zone"), &fallback);
        assert_eq!(formatter, fallback);

        let formatter = RelativeTimeFormatter::for_request(&[], Some("Europe/Paris"), &fallback);
        assert_eq!(formatter.locale(), "zh-CN");
        assert_eq!(formatter.zone().name(), "Europe/Paris");
    }

    #[test]
    fn for_request_warns_on_fallback() {
        let fallback = RelativeTimeFormatter::default();
        let logs = CapturedLogs::default();

        tracing::subscriber::with_default(subscriber_for(&logs), || {
            RelativeTimeFormatter::for_request(&tags(&["en"]), Some("UTC"), &fallback);
        });
        assert_eq!(logs.contents(), "");

        tracing::subscriber::with_default(subscriber_for(&logs), || {
            RelativeTimeFormatter::for_request(
                &tags(&["ja", "ko"]),
                Some("Bogus/Zone"),
                &fallback,
            );
        });
        let contents = logs.contents();
        assert!(contents.contains("No supported language, using default"));
        assert!(contents.contains("Unknown timezone, using default"));
    }

    #[test]
    fn sub_millisecond_precision_is_ignored() {
        assert_eq!(format(Some("2024-03-19T12:00:00.0000001Z")), "a day ago");
        assert_eq!(format(Some("2024-03-20T11:59:00.0009Z")), "1 minutes ago");
    }

    #[test]
    fn wall_clock_entry_point() {
        assert_eq!(format_relative_time(None), "Unavailable");
        assert_eq!(format_relative_time(Some("2999-01-01T00:00:00Z")), "Unavailable");
        assert_eq!(format_relative_time(Some("2000-02-03T12:00:00Z")), "2/3");
    }
}
