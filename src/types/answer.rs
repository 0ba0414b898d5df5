use serde::{Deserialize, Serialize};

use crate::types::question::QuestionId;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Answer {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, Hash, PartialEq)]
pub struct AnswerId(pub i32);

#[derive(Debug, Clone, PartialEq)]
pub struct NewAnswer {
    pub content: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct AnswerBody {
    pub content: Option<String>,
}

pub const MAX_CONTENT_CHARS: usize = 300;
