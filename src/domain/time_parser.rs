use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

pub const MISSING_TIME_TEXT: &str = "—";
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

// No offset, or a literal `Z` that `%z` will not take: read as UTC.
const UTC_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%d %H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%d %H:%MZ",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Compact `YYYYMMDDTHHMMZ`, then compact with seconds, then a general
/// timestamp parse. Blank or unparseable input yields `None`.
pub fn parse_any_utc(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    parse_compact(input, false)
        .or_else(|| parse_compact(input, true))
        .or_else(|| parse_general(input))
}

pub fn parse_optional_utc(input: Option<&str>) -> Option<DateTime<Utc>> {
    input.and_then(parse_any_utc)
}

fn parse_compact(input: &str, with_seconds: bool) -> Option<DateTime<Utc>> {
    let time_digits = if with_seconds { 6 } else { 4 };
    let bytes = input.as_bytes();
    if bytes.len() != 8 + 1 + time_digits + 1 {
        return None;
    }
    if bytes[8] != b'T' || bytes[bytes.len() - 1] != b'Z' {
        return None;
    }

    let date = &input[..8];
    let time = &input[9..9 + time_digits];
    if !date.bytes().chain(time.bytes()).all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    let number = |digits: &str| digits.parse::<u32>().ok();
    let year = date[..4].parse::<i32>().ok()?;
    let month = number(&date[4..6])?;
    let day = number(&date[6..8])?;
    let hour = number(&time[..2])?;
    let minute = number(&time[2..4])?;
    let second = if with_seconds { number(&time[4..6])? } else { 0 };

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    Some(Utc.from_utc_datetime(&naive))
}

fn parse_general(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(input) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(input, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in UTC_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    #[default]
    SystemLocal,
    Named(Tz),
}

impl DisplayZone {
    pub fn from_name(name: Option<&str>) -> Result<Self, String> {
        let Some(name) = name.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(Self::SystemLocal);
        };
        name.parse::<Tz>()
            .map(Self::Named)
            .map_err(|error| format!("unknown timezone '{name}': {error}"))
    }

    pub fn format(&self, instant: DateTime<Utc>) -> String {
        match self {
            Self::SystemLocal => instant
                .with_timezone(&Local)
                .format(DISPLAY_FORMAT)
                .to_string(),
            Self::Named(zone) => instant.with_timezone(zone).format(DISPLAY_FORMAT).to_string(),
        }
    }

    pub fn format_optional(&self, instant: Option<DateTime<Utc>>) -> String {
        instant
            .map(|value| self.format(value))
            .unwrap_or_else(|| MISSING_TIME_TEXT.to_string())
    }
}

pub fn to_local_display(input: &str, zone: &DisplayZone) -> String {
    zone.format_optional(parse_any_utc(input))
}
