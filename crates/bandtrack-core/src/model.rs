//! Core data model types for bandtrack.
//!
//! These are the types the rest of the system uses to represent skill
//! categories, recorded test attempts, and the tracked session state.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Valid IELTS band scores, 5.0 through 9.0 in half-band steps.
pub const BAND_SCALE: [f64; 9] = [5.0, 5.5, 6.0, 6.5, 7.0, 7.5, 8.0, 8.5, 9.0];

/// Band at which a skill counts as "at target".
pub const TARGET_BAND: f64 = 7.0;

/// Exam date used when none is stored or the stored one is unreadable.
pub const FALLBACK_TARGET_DATE: (i32, u32, u32) = (2025, 11, 1);

/// Format used for dates in the backing file and in entry ids.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used for times of day.
pub const TIME_FORMAT: &str = "%H:%M";

/// Returns `true` if `score` is one of the half-band steps in [`BAND_SCALE`].
pub fn is_valid_band(score: f64) -> bool {
    BAND_SCALE.iter().any(|b| (b - score).abs() < f64::EPSILON)
}

/// The fallback exam date.
pub fn fallback_target_date() -> NaiveDate {
    let (y, m, d) = FALLBACK_TARGET_DATE;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// One of the four tested skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Listening,
    Reading,
    Writing,
    Speaking,
}

/// Display metadata for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub icon: &'static str,
    pub label: &'static str,
}

const CATEGORY_INFO: [CategoryInfo; 4] = [
    CategoryInfo {
        icon: "🎧",
        label: "Listening",
    },
    CategoryInfo {
        icon: "📖",
        label: "Reading",
    },
    CategoryInfo {
        icon: "✍️",
        label: "Writing",
    },
    CategoryInfo {
        icon: "🗣️",
        label: "Speaking",
    },
];

impl Category {
    /// All categories in their fixed enumeration order.
    pub const ALL: [Category; 4] = [
        Category::Listening,
        Category::Reading,
        Category::Writing,
        Category::Speaking,
    ];

    fn index(self) -> usize {
        match self {
            Category::Listening => 0,
            Category::Reading => 1,
            Category::Writing => 2,
            Category::Speaking => 3,
        }
    }

    /// Icon and label for this category.
    pub fn info(self) -> CategoryInfo {
        CATEGORY_INFO[self.index()]
    }

    /// Lowercase name, as used in the backing file.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Listening => "listening",
            Category::Reading => "reading",
            Category::Writing => "writing",
            Category::Speaking => "speaking",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "listening" => Ok(Category::Listening),
            "reading" => Ok(Category::Reading),
            "writing" => Ok(Category::Writing),
            "speaking" => Ok(Category::Speaking),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// A single recorded test attempt.
///
/// Serialized with a redundant `datetime` field (`"YYYY-MM-DD HH:MM"`) so the
/// backing file stays readable by older tooling that sorted on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "EntryRecord", try_from = "EntryRecord")]
pub struct ScoreEntry {
    /// Unique within its category at creation time.
    pub id: String,
    pub date: NaiveDate,
    /// Time of day, minute precision.
    pub time: NaiveTime,
    pub score: f64,
}

impl ScoreEntry {
    /// Key the category lists are ordered by.
    pub fn sort_key(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.time)
    }

    /// `"YYYY-MM-DD HH:MM"`.
    pub fn datetime(&self) -> String {
        format!(
            "{} {}",
            self.date.format(DATE_FORMAT),
            self.time.format(TIME_FORMAT)
        )
    }
}

/// Wire form of [`ScoreEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryRecord {
    id: String,
    date: NaiveDate,
    time: String,
    score: f64,
    #[serde(default, skip_deserializing)]
    datetime: String,
}

impl From<ScoreEntry> for EntryRecord {
    fn from(entry: ScoreEntry) -> Self {
        let datetime = entry.datetime();
        Self {
            id: entry.id,
            date: entry.date,
            time: entry.time.format(TIME_FORMAT).to_string(),
            score: entry.score,
            datetime,
        }
    }
}

impl TryFrom<EntryRecord> for ScoreEntry {
    type Error = String;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let time = parse_time(&record.time)?;
        Ok(Self {
            id: record.id,
            date: record.date,
            time,
            score: record.score,
        })
    }
}

/// Parse an `HH:MM` time of day. Seconds are accepted and dropped.
pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map(truncate_to_minute)
        .map_err(|e| format!("invalid time '{s}': {e}"))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| format!("invalid date '{s}': {e}"))
}

pub(crate) fn truncate_to_minute(t: NaiveTime) -> NaiveTime {
    use chrono::Timelike;
    t.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}

/// The four per-category score lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    #[serde(default)]
    pub listening: Vec<ScoreEntry>,
    #[serde(default)]
    pub reading: Vec<ScoreEntry>,
    #[serde(default)]
    pub writing: Vec<ScoreEntry>,
    #[serde(default)]
    pub speaking: Vec<ScoreEntry>,
}

impl Scores {
    pub fn get(&self, category: Category) -> &[ScoreEntry] {
        match category {
            Category::Listening => &self.listening,
            Category::Reading => &self.reading,
            Category::Writing => &self.writing,
            Category::Speaking => &self.speaking,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut Vec<ScoreEntry> {
        match category {
            Category::Listening => &mut self.listening,
            Category::Reading => &mut self.reading,
            Category::Writing => &mut self.writing,
            Category::Speaking => &mut self.speaking,
        }
    }

    /// Every score across all categories, in category order.
    pub fn all(&self) -> impl Iterator<Item = &ScoreEntry> {
        Category::ALL.into_iter().flat_map(move |c| self.get(c).iter())
    }

    pub fn total_count(&self) -> usize {
        Category::ALL.iter().map(|&c| self.get(c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }
}

/// All tracked data for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerState {
    pub scores: Scores,
    pub target_date: NaiveDate,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            scores: Scores::default(),
            target_date: fallback_target_date(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_display_and_parse() {
        assert_eq!(Category::Writing.to_string(), "writing");
        assert_eq!("Listening".parse::<Category>().unwrap(), Category::Listening);
        assert_eq!(" speaking ".parse::<Category>().unwrap(), Category::Speaking);
        assert!("grammar".parse::<Category>().is_err());
    }

    #[test]
    fn category_metadata_table() {
        assert_eq!(Category::Listening.info().icon, "🎧");
        assert_eq!(Category::Reading.info().label, "Reading");
        assert_eq!(Category::Speaking.info().label, "Speaking");
    }

    #[test]
    fn band_scale_membership() {
        assert!(is_valid_band(5.0));
        assert!(is_valid_band(6.5));
        assert!(is_valid_band(9.0));
        assert!(!is_valid_band(4.5));
        assert!(!is_valid_band(6.25));
        assert!(!is_valid_band(0.0));
    }

    #[test]
    fn entry_wire_format() {
        let entry = ScoreEntry {
            id: "2025-01-10_09:00_0".into(),
            date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            score: 6.5,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2025-01-10");
        assert_eq!(json["time"], "09:00");
        assert_eq!(json["datetime"], "2025-01-10 09:00");
        assert_eq!(json["score"], 6.5);

        let back: ScoreEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn entry_rejects_bad_time() {
        let json = r#"{"id":"x","date":"2025-01-10","time":"9 o'clock","score":6.0}"#;
        assert!(serde_json::from_str::<ScoreEntry>(json).is_err());
    }

    #[test]
    fn scores_missing_categories_default_empty() {
        let scores: Scores = serde_json::from_str(r#"{"reading": []}"#).unwrap();
        assert!(scores.is_empty());
        assert!(scores.get(Category::Speaking).is_empty());
    }

    #[test]
    fn default_state_uses_fallback_date() {
        let state = TrackerState::default();
        assert_eq!(state.target_date, NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
        assert_eq!(state.scores.total_count(), 0);
    }
}
