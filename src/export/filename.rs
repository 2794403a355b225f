//! Report file naming

use chrono::{DateTime, SecondsFormat, Utc};

use super::ExportFormat;

/// `YYYY-MM-DDTHH-MM-SS` in UTC.
///
/// Built from the millisecond ISO-8601 form with `:` and `.` replaced by `-`
/// and cut to 19 characters, so it matches names produced by earlier builds.
pub fn timestamp_component(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
        .chars()
        .map(|c| if c == ':' || c == '.' { '-' } else { c })
        .take(19)
        .collect()
}

/// Lowercased sprint name with every non `[A-Za-z0-9]` replaced by `_`.
///
/// Characters outside the BMP produce two underscores (one per UTF-16 unit).
pub fn sanitize_sprint_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else {
            for _ in 0..c.len_utf16() {
                out.push('_');
            }
        }
    }
    out
}

pub fn report_filename(sprint_name: &str, format: ExportFormat, at: DateTime<Utc>) -> String {
    format!(
        "{}_{}.{}",
        sanitize_sprint_name(sprint_name),
        timestamp_component(at),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_component() {
        let at = Utc.with_ymd_and_hms(2025, 12, 1, 10, 0, 0).unwrap();
        assert_eq!(timestamp_component(at), "2025-12-01T10-00-00");

        let at = Utc.with_ymd_and_hms(2026, 3, 9, 23, 59, 58).unwrap()
            + chrono::Duration::milliseconds(987);
        assert_eq!(timestamp_component(at), "2026-03-09T23-59-58");
    }

    #[test]
    fn test_sanitize_example_sprint() {
        assert_eq!(
            sanitize_sprint_name("Sprint 24.12 - Core Features"),
            "sprint_24_12___core_features"
        );
    }

    #[test]
    fn test_sanitize_only_safe_characters() {
        let names = [
            "Sprint ünïcødé — «quoted»",
            "Q3/Q4: Release!! (final)",
            "스프린트 7",
            "rocket 🚀 launch",
            "tabs\tand\nnewlines",
        ];
        for name in names {
            let sanitized = sanitize_sprint_name(name);
            assert!(
                sanitized
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
                "{name:?} -> {sanitized:?}"
            );
        }
    }

    #[test]
    fn test_sanitize_astral_char_counts_utf16_units() {
        assert_eq!(sanitize_sprint_name("a🚀b"), "a__b");
        assert_eq!(sanitize_sprint_name("é"), "_");
    }

    #[test]
    fn test_report_filename() {
        let at = Utc.with_ymd_and_hms(2025, 12, 1, 10, 0, 0).unwrap();
        assert_eq!(
            report_filename("Sprint 24.12 - Core Features", ExportFormat::Tabular, at),
            "sprint_24_12___core_features_2025-12-01T10-00-00.xlsx"
        );
        assert_eq!(
            report_filename("Sprint 24.12 - Core Features", ExportFormat::Document, at),
            "sprint_24_12___core_features_2025-12-01T10-00-00.pdf"
        );
    }
}
