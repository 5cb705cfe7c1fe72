use serde_json::Value;

use crate::error::WatchError;

/// The closed set of review states the API is allowed to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl ReviewStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HomeworkRecord {
    pub name: String,
    pub status: ReviewStatus,
}

impl HomeworkRecord {
    /// Validates one raw record out of the `homeworks` list.
    pub fn from_json(raw: &Value) -> Result<Self, WatchError> {
        let name = raw
            .get("homework_name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or(WatchError::MissingField("homework_name"))?;

        let status = raw.get("status").ok_or(WatchError::MissingField("status"))?;
        let status = status
            .as_str()
            .and_then(ReviewStatus::from_code)
            .ok_or_else(|| WatchError::UnknownStatus(json_text(status)))?;

        Ok(Self {
            name: name.to_string(),
            status,
        })
    }

    pub fn status_line(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

fn json_text(value: &Value) -> String {
    match value.as_str() {
        Some(text) => text.to_string(),
        None => value.to_string(),
    }
}
