//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::PostData;

/// Split a markdown file into its YAML front-matter and body
///
/// Returns `None` when the file has no closed `---` block.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start_matches('\u{feff}').trim_start();
    let rest = content.strip_prefix("---")?;
    let rest = rest.trim_start_matches(['\n', '\r']);

    let end_pos = rest.find("\n---")?;
    let yaml = &rest[..end_pos];
    let remaining = &rest[end_pos + 4..];
    let remaining = remaining.trim_start_matches(['\n', '\r']);

    Some((yaml, remaining))
}

/// Parse front-matter and return the post metadata with the remaining body
pub fn parse(content: &str) -> Result<(PostData, &str), String> {
    let (yaml, body) = split(content).ok_or_else(|| "missing front-matter".to_string())?;
    let data: PostData = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;
    Ok((data, body))
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

/// Serde adapter for front-matter dates
pub(crate) mod date_field {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_date_string(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = r#"---
title: Hello World
image: ./cover.jpg
date: 2024-01-15
category: Tech
topPick: true
---

This is the content.
"#;

        let (data, body) = parse(content).unwrap();
        assert_eq!(data.title, "Hello World");
        assert_eq!(data.category, "Tech");
        assert!(data.top_pick);
        assert!(!data.trending);
        assert!(!data.popular);
        assert_eq!(data.slug, None);
        assert_eq!(data.date.format("%Y-%m-%d").to_string(), "2024-01-15");
        assert_eq!(body.trim(), "This is the content.");
    }

    #[test]
    fn test_missing_required_field() {
        let content = "---\ntitle: No Category\nimage: x.png\ndate: 2024-01-01\n---\nbody";
        let err = parse(content).unwrap_err();
        assert!(err.contains("category"));
    }

    #[test]
    fn test_invalid_date() {
        let content = "---\ntitle: T\nimage: x\ndate: someday\ncategory: Tech\n---\n";
        let err = parse(content).unwrap_err();
        assert!(err.contains("invalid date"));
    }

    #[test]
    fn test_missing_frontmatter() {
        assert!(split("Just text").is_none());
        assert!(split("---\ntitle: unterminated").is_none());
        assert_eq!(parse("Just text").unwrap_err(), "missing front-matter");
    }

    #[test]
    fn test_parse_date_formats() {
        let dt = parse_date_string("2024-01-15 10:30:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");

        let dt = parse_date_string("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "08:30");

        let dt = parse_date_string("2024/03/02").unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-03-02");

        assert!(parse_date_string("not a date").is_none());
    }
}
