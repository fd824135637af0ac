use serde::{Deserialize, Serialize};

use crate::types::question::QuestionId;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Answer {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub content: String,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct AnswerId(pub i32);

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewAnswer {
    pub content: String,
}
