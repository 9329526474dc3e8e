//! Data normalizer: turns parsed model JSON into a well-shaped `ResumeRecord`
//! and applies phone and birth-date formatting.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::info;

use crate::models::ResumeRecord;

static RE_NON_ASCII_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").unwrap());

#[derive(Debug, Clone, Copy)]
enum DateLayout {
    /// Delimited layout handed to chrono.
    Format(&'static str),
    /// `YYYYMMDD` where month and day may each be a single digit.
    Compact,
}

/// Birth-date layouts tried in order. The regex pins the digit count of each
/// component so a two-digit year never matches a four-digit-year layout.
static BIRTH_DATE_LAYOUTS: Lazy<Vec<(Regex, DateLayout)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"^[0-9]{4}/[0-9]{1,2}/[0-9]{1,2}$").unwrap(), DateLayout::Format("%Y/%m/%d")),
        (Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$").unwrap(), DateLayout::Format("%Y-%m-%d")),
        (Regex::new(r"^[0-9]{4}\.[0-9]{1,2}\.[0-9]{1,2}$").unwrap(), DateLayout::Format("%Y.%m.%d")),
        (Regex::new(r"^[0-9]{6,8}$").unwrap(), DateLayout::Compact),
        (Regex::new(r"^[0-9]{2}/[0-9]{1,2}/[0-9]{1,2}$").unwrap(), DateLayout::Format("%y/%m/%d")),
    ]
});

const BIRTH_DATE_OUTPUT: &str = "%Y/%m/%d";

/// Coerces `value` into a `ResumeRecord` without reformatting any field.
///
/// Fails only when `value` is not a JSON object. Arrays are rejected up
/// front: serde would otherwise read them positionally into the struct.
pub fn coerce_record(value: Value) -> Result<ResumeRecord, serde_json::Error> {
    if !value.is_object() {
        return Err(serde::de::Error::custom("resume data must be a JSON object"));
    }
    serde_json::from_value(value)
}

/// Coerces `value` into a `ResumeRecord` and formats phone and birth date.
pub fn normalize_record(value: Value) -> Result<ResumeRecord, serde_json::Error> {
    let mut record = coerce_record(value)?;

    if !record.phone.is_empty() {
        record.phone = format_mobile_number(&record.phone);
    }
    if !record.birth_date.is_empty() {
        if let Some(formatted) = normalize_birth_date(&record.birth_date) {
            record.birth_date = formatted;
        }
    }
    // Only the pipeline decides whether a photo was found.
    record.has_profile_photo = false;

    info!(
        "Resume record normalized: {} populated sections",
        record.populated_section_count()
    );
    Ok(record)
}

/// Rewrites 11-digit numbers starting with `010` as `010-XXXX-XXXX`.
/// Anything else is returned unchanged.
pub fn format_mobile_number(raw: &str) -> String {
    let digits = RE_NON_ASCII_DIGIT.replace_all(raw, "");
    if digits.len() == 11 && digits.starts_with("010") {
        format!("{}-{}-{}", &digits[..3], &digits[3..7], &digits[7..])
    } else {
        raw.to_string()
    }
}

/// Parses `raw` against the known layouts and renders it as `YYYY/MM/DD`.
/// Returns `None` when no layout yields a valid calendar date.
pub fn normalize_birth_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    BIRTH_DATE_LAYOUTS
        .iter()
        .filter(|(shape, _)| shape.is_match(raw))
        .find_map(|(_, layout)| match layout {
            DateLayout::Format(format) => NaiveDate::parse_from_str(raw, format).ok(),
            DateLayout::Compact => parse_compact_date(raw),
        })
        .map(|date| date.format(BIRTH_DATE_OUTPUT).to_string())
}

/// Splits ASCII `YYYYMMDD`, `YYYYMDD`, `YYYYMMD` or `YYYYMD` digits. A
/// two-digit month is preferred; the first split with month 1-12 and day
/// 1-31 decides, and an impossible calendar date then yields `None`.
fn parse_compact_date(raw: &str) -> Option<NaiveDate> {
    let year: i32 = raw.get(..4)?.parse().ok()?;
    let rest = raw.get(4..)?;
    [2usize, 1].iter().find_map(|&month_len| {
        let day_len = rest.len().checked_sub(month_len)?;
        if !(1..=2).contains(&day_len) {
            return None;
        }
        let month: u32 = rest[..month_len].parse().ok()?;
        let day: u32 = rest[month_len..].parse().ok()?;
        ((1..=12).contains(&month) && (1..=31).contains(&day)).then_some((month, day))
    })
    .and_then(|(month, day)| NaiveDate::from_ymd_opt(year, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mobile_number_with_separators_is_reformatted() {
        assert_eq!(format_mobile_number("010 1234 5678"), "010-1234-5678");
        assert_eq!(format_mobile_number("010.1234.5678"), "010-1234-5678");
        assert_eq!(format_mobile_number("01012345678"), "010-1234-5678");
    }

    #[test]
    fn test_other_numbers_pass_through_unchanged() {
        assert_eq!(format_mobile_number("02-123-4567"), "02-123-4567");
        assert_eq!(format_mobile_number("011-123-4567"), "011-123-4567");
        assert_eq!(format_mobile_number("+82 10 1234 5678"), "+82 10 1234 5678");
        assert_eq!(format_mobile_number("call me"), "call me");
    }

    #[test]
    fn test_birth_date_layouts() {
        assert_eq!(normalize_birth_date("1990/01/05").as_deref(), Some("1990/01/05"));
        assert_eq!(normalize_birth_date("1990-1-5").as_deref(), Some("1990/01/05"));
        assert_eq!(normalize_birth_date("1990.12.31").as_deref(), Some("1990/12/31"));
        assert_eq!(normalize_birth_date("19900105").as_deref(), Some("1990/01/05"));
        assert_eq!(normalize_birth_date("95/03/07").as_deref(), Some("1995/03/07"));
    }

    #[test]
    fn test_non_ascii_digits_pass_through_unchanged() {
        assert_eq!(format_mobile_number("010-12３-456"), "010-12３-456");
        assert_eq!(format_mobile_number("０１０-1234-5678"), "０１０-1234-5678");
    }

    #[test]
    fn test_compact_birth_dates_with_single_digit_parts() {
        assert_eq!(normalize_birth_date("1990115").as_deref(), Some("1990/11/05"));
        assert_eq!(normalize_birth_date("199015").as_deref(), Some("1990/01/05"));
        assert_eq!(normalize_birth_date("1990105").as_deref(), Some("1990/10/05"));
        assert_eq!(normalize_birth_date("19901231").as_deref(), Some("1990/12/31"));
    }

    #[test]
    fn test_compact_birth_date_rejects_impossible_values() {
        assert_eq!(normalize_birth_date("19901340"), None);
        assert_eq!(normalize_birth_date("19900230"), None);
        assert_eq!(normalize_birth_date("１９９００１０５"), None);
    }

    #[test]
    fn test_unparseable_birth_date_is_none() {
        assert_eq!(normalize_birth_date("1990년 1월 5일"), None);
        assert_eq!(normalize_birth_date("1990/13/40"), None);
        assert_eq!(normalize_birth_date(""), None);
    }

    #[test]
    fn test_normalize_record_formats_fields() {
        let record = normalize_record(json!({
            "name": "홍길동",
            "phone": "010-9876 5432",
            "birthDate": "1988.07.21",
            "hasProfilePhoto": true
        }))
        .unwrap();
        assert_eq!(record.phone, "010-9876-5432");
        assert_eq!(record.birth_date, "1988/07/21");
        assert!(!record.has_profile_photo);
    }

    #[test]
    fn test_unmatched_birth_date_passes_through() {
        let record = normalize_record(json!({"birthDate": "spring 1990"})).unwrap();
        assert_eq!(record.birth_date, "spring 1990");
    }

    #[test]
    fn test_arrays_and_work_location_are_guaranteed() {
        let record = normalize_record(json!({
            "educations": null,
            "careers": "none",
            "workPreferences": {"selectedJobs": "개발자"}
        }))
        .unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["educations"], json!([]));
        assert_eq!(value["careers"], json!([]));
        assert_eq!(value["workPreferences"]["selectedJobs"], json!([]));
        assert_eq!(
            value["workPreferences"]["workLocation"],
            json!({"regions": [], "address": "", "canWorkRemote": false})
        );
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(normalize_record(json!(["not", "a", "record"])).is_err());
        assert!(normalize_record(json!("text")).is_err());
    }
}
