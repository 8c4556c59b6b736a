//! Verdict mapping and notification text.

use crate::error::BotError;
use crate::types::HomeworkRecord;

/// The review states the API reports for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable verdict sent to the chat.
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Compose the status-change notification for `record`.
pub fn format_status(record: &HomeworkRecord) -> Result<String, BotError> {
    let name = required(&record.homework_name, "homework_name")?;
    let code = required(&record.status, "status")?;
    let status =
        HomeworkStatus::from_code(code).ok_or_else(|| BotError::UnknownStatus(code.to_string()))?;
    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}

/// Text reported to the chat when a cycle fails.
pub fn failure_message(error: &BotError) -> String {
    format!("Сбой в работе программы: {error}")
}

fn required<'a>(field: &'a Option<String>, key: &str) -> Result<&'a str, BotError> {
    match field.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(BotError::Schema(format!("homework record has no {key:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_status_formats_with_its_verdict() {
        for status in [
            HomeworkStatus::Approved,
            HomeworkStatus::Reviewing,
            HomeworkStatus::Rejected,
        ] {
            let record = HomeworkRecord::new("proj1", status.code());
            let message = format_status(&record).unwrap();
            assert!(message.contains("\"proj1\""));
            assert!(message.ends_with(status.verdict()));
            assert!(!message.contains('\n'));
        }
    }

    #[test]
    fn approved_message_is_exact() {
        let message = format_status(&HomeworkRecord::new("hw_api", "approved")).unwrap();
        assert_eq!(
            message,
            "Изменился статус проверки работы \"hw_api\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn unknown_status_is_an_error() {
        let err = format_status(&HomeworkRecord::new("proj1", "lost")).unwrap_err();
        assert_eq!(err, BotError::UnknownStatus("lost".into()));
    }

    #[test]
    fn missing_or_empty_fields_are_schema_errors() {
        let no_name = HomeworkRecord {
            status: Some("approved".into()),
            ..Default::default()
        };
        let no_status = HomeworkRecord {
            homework_name: Some("proj1".into()),
            ..Default::default()
        };
        let empty_name = HomeworkRecord::new("", "approved");

        for record in [no_name, no_status, empty_name] {
            assert!(matches!(format_status(&record), Err(BotError::Schema(_))));
        }
    }

    #[test]
    fn failure_message_includes_cause() {
        let message = failure_message(&BotError::Transport("Connection refused".into()));
        assert!(message.starts_with("Сбой в работе программы: "));
        assert!(message.contains("Connection refused"));
    }
}
