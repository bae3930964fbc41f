//! Records exchanged with the SkillStack backend

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// Default practice duration for a new event
pub const DEFAULT_DURATION_MINUTES: i64 = 30;

/// A logged practice event
///
/// Only `date` matters to the activity widget. It is kept as the raw
/// string the backend sent; a value that is missing or not a string
/// deserializes to `None` instead of failing the whole list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    #[serde(default, deserialize_with = "deserialize_string_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub title: String,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
    #[serde(default)]
    pub skill_id: Option<i64>,
}

impl Event {
    /// The event's calendar date, if it carries a well-formed ISO date
    pub fn day(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }
}

/// Payload for `POST /events/`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewEvent {
    pub skill_id: Option<i64>,
    pub title: String,
    pub date: String,
    pub duration_minutes: i64,
    pub notes: String,
}

impl NewEvent {
    pub fn new(
        title: &str,
        date: NaiveDate,
        duration_minutes: Option<i64>,
        notes: Option<String>,
        skill_id: Option<i64>,
    ) -> Result<Self, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        Ok(NewEvent {
            skill_id,
            title: title.trim().to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            duration_minutes: duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES),
            notes: notes.unwrap_or_default(),
        })
    }
}

/// Learning progress of a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Progress {
    #[serde(rename = "started")]
    Started,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl Progress {
    pub const ALL: [Progress; 3] = [Progress::Started, Progress::InProgress, Progress::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Progress::Started => "started",
            Progress::InProgress => "in-progress",
            Progress::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Progress::Started => "Started",
            Progress::InProgress => "In-progress",
            Progress::Completed => "Completed",
        }
    }
}

impl std::str::FromStr for Progress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "started" => Ok(Progress::Started),
            "in-progress" | "in_progress" | "inprogress" => Ok(Progress::InProgress),
            "completed" | "done" => Ok(Progress::Completed),
            other => Err(ValidationError::InvalidProgress(other.to_string())),
        }
    }
}

/// A skill as returned by `GET /skills/`
///
/// `progress` stays a raw string: the backend stores whatever it was sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skill {
    #[serde(deserialize_with = "deserialize_string_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub resource_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub progress: Option<String>,
    #[serde(default)]
    pub hours_spent: Option<f64>,
    #[serde(default)]
    pub difficulty: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
}

impl Skill {
    pub fn progress(&self) -> Option<Progress> {
        self.progress.as_deref().and_then(|p| p.parse().ok())
    }
}

/// Payload for `POST /skills/`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewSkill {
    pub name: String,
    pub resource_type: Option<String>,
    pub platform: Option<String>,
    pub progress: Progress,
    pub hours_spent: f64,
    pub difficulty: i64,
    pub notes: String,
}

impl Default for NewSkill {
    fn default() -> Self {
        NewSkill {
            name: String::new(),
            resource_type: None,
            platform: None,
            progress: Progress::Started,
            hours_spent: 0.0,
            difficulty: 3,
            notes: String::new(),
        }
    }
}

impl NewSkill {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptySkillName);
        }
        validate_difficulty(self.difficulty)?;
        validate_hours(self.hours_spent)?;
        Ok(())
    }
}

/// Payload for `PATCH /skills/{id}`; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SkillPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_spent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SkillPatch {
    pub fn is_empty(&self) -> bool {
        *self == SkillPatch::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptySkillName);
            }
        }
        if let Some(difficulty) = self.difficulty {
            validate_difficulty(difficulty)?;
        }
        if let Some(hours) = self.hours_spent {
            validate_hours(hours)?;
        }
        Ok(())
    }
}

fn validate_difficulty(difficulty: i64) -> Result<(), ValidationError> {
    if (1..=5).contains(&difficulty) {
        Ok(())
    } else {
        Err(ValidationError::InvalidDifficulty(difficulty))
    }
}

fn validate_hours(hours: f64) -> Result<(), ValidationError> {
    if hours >= 0.0 && hours.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::InvalidHours(hours))
    }
}

/// One learning resource suggested by `GET /ai/recommend/`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Recommendation {
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub platform: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub url: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Payload for `POST /ai/summarize/`
#[derive(Debug, Clone, Serialize)]
pub struct SummarizeRequest {
    pub text: String,
    pub max_sentences: u32,
    pub use_openai: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeResponse {
    #[serde(default)]
    pub summary: Option<String>,
}

// IDs may arrive as numbers or strings
fn deserialize_string_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    match value {
        Value::Number(num) => Ok(num.to_string()),
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        _ => Err(serde::de::Error::custom("ID must be a string or number")),
    }
}

// Anything that is not a string becomes None
fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserialize_optional_string(deserializer).map(Option::unwrap_or_default)
}
