use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, Hash, PartialEq)]
pub struct QuestionId(pub i32);

/// The three mutable fields, already validated. Used for both insert and
/// full replace.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewQuestion {
    pub title: String,
    pub description: String,
    pub category: String,
}

/// Body of `POST /questions` and `PUT /questions/:id` as the client sent it.
#[derive(Debug, Deserialize, Default)]
pub struct QuestionBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

pub const CATEGORIES: [&str; 9] = [
    "cuisine",
    "history",
    "literature",
    "miscellaneous",
    "movies",
    "music",
    "sports",
    "technology",
    "travelling",
];
