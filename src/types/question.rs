use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct QuestionId(pub i32);

/// Validated question payload, used for both creation and in-place updates.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewQuestion {
    pub title: String,
    pub description: String,
    pub category: String,
}
