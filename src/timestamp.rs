use std::fmt;

use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time,
    format_description::{
        BorrowedFormatItem,
        well_known::{Iso8601, Rfc2822, Rfc3339},
    },
    macros::format_description,
};
use time_tz::{ToTimezone, Tz, timezones};

/// Date-times without an offset, read as wall-clock time in the local zone.
const LOCAL_DATE_TIMES: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
    format_description!(
        "[year]/[month padding:none]/[day padding:none] [hour padding:none]:[minute]:[second]"
    ),
    format_description!("[year]/[month padding:none]/[day padding:none] [hour padding:none]:[minute]"),
];

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

const SLASH_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]/[month padding:none]/[day padding:none]");

/// The zone whose wall clock is treated as "local" time.
///
/// `UTC` is handled without a database lookup so the default never fails.
#[derive(Clone)]
pub struct LocalZone {
    name: String,
    tz: Option<&'static Tz>,
}

impl LocalZone {
    pub fn utc() -> Self {
        Self {
            name: "UTC".to_owned(),
            tz: None,
        }
    }

    /// Looks up an IANA zone name such as `Europe/Paris`.
    pub fn named(name: &str) -> Option<Self> {
        let name = name.trim();

        if name.eq_ignore_ascii_case("utc") || name.eq_ignore_ascii_case("etc/utc") {
            return Some(Self::utc());
        }

        timezones::get_by_name(name).map(|tz| Self {
            name: name.to_owned(),
            tz: Some(tz),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Converts an instant to this zone's wall clock.
    pub fn to_local(&self, instant: OffsetDateTime) -> OffsetDateTime {
        match self.tz {
            Some(tz) => instant.to_timezone(tz),
            None => instant.to_offset(time::UtcOffset::UTC),
        }
    }

    /// Pins a wall-clock date-time to this zone.
    ///
    /// The offset is the one in force at the same wall-clock reading in UTC,
    /// which only differs from the exact answer inside a DST transition.
    pub fn assume(&self, datetime: PrimitiveDateTime) -> OffsetDateTime {
        let utc = datetime.assume_utc();

        match self.tz {
            Some(tz) => datetime.assume_offset(utc.to_timezone(tz).offset()),
            None => utc,
        }
    }
}

impl Default for LocalZone {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Debug for LocalZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalZone").field(&self.name).finish()
    }
}

impl PartialEq for LocalZone {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Parses a timestamp the way a browser date parser would accept it.
///
/// Returns `None` for blank input and for anything that is not a valid instant.
pub fn parse_timestamp(input: &str, zone: &LocalZone) -> Option<OffsetDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(instant) = OffsetDateTime::parse(input, &Rfc3339) {
        return Some(instant);
    }

    if let Ok(instant) = OffsetDateTime::parse(input, &Rfc2822) {
        return Some(instant);
    }

    if let Some(datetime) = LOCAL_DATE_TIMES
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(input, *format).ok())
    {
        return Some(zone.assume(datetime));
    }

    // ISO dates without a time are UTC midnight, slash dates are local midnight.
    if let Ok(date) = Date::parse(input, ISO_DATE) {
        return Some(PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc());
    }

    if let Ok(date) = Date::parse(input, SLASH_DATE) {
        return Some(zone.assume(PrimitiveDateTime::new(date, Time::MIDNIGHT)));
    }

    OffsetDateTime::parse(input, &Iso8601::DEFAULT).ok()
}
