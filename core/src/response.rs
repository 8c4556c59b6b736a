//! Shape checks for the decoded status envelope.
//!
//! The envelope is `{"homeworks": [...], "current_date": <int>}`. The list is
//! ordered newest first, so the latest submission is element zero.

use serde_json::Value;

use crate::error::BotError;
use crate::types::HomeworkRecord;

/// Extract and type-check the `homeworks` list.
pub fn extract_homeworks(envelope: &Value) -> Result<Vec<HomeworkRecord>, BotError> {
    let homeworks = envelope
        .get("homeworks")
        .ok_or_else(|| BotError::Schema("missing homeworks key".to_string()))?;
    let items = homeworks
        .as_array()
        .ok_or_else(|| BotError::Schema("homeworks is not a list".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.is_object() {
                return Err(BotError::Schema(format!("homeworks[{i}] is not an object")));
            }
            serde_json::from_value(item.clone())
                .map_err(|e| BotError::Schema(format!("homeworks[{i}]: {e}")))
        })
        .collect()
}

/// The most recent submission, or `EmptyResult` when there is none.
pub fn extract_latest(envelope: &Value) -> Result<HomeworkRecord, BotError> {
    extract_homeworks(envelope)?
        .into_iter()
        .next()
        .ok_or(BotError::EmptyResult)
}

/// Server-reported timestamp to use as the next `from_date`, if present.
pub fn current_date(envelope: &Value) -> Option<i64> {
    envelope.get("current_date").and_then(Value::as_i64)
}
