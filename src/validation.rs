//! Input checks that run before any database access.
//!
//! Each function turns a raw request body or query into its validated form,
//! or fails with the client error the request is rejected with.

use handle_errors::Error;

use crate::types::{
    answer::{AnswerBody, NewAnswer, MAX_CONTENT_CHARS},
    question::{NewQuestion, QuestionBody, CATEGORIES},
    search::{SearchFilter, SearchParams},
    vote::{Vote, VoteBody},
};

fn required(value: Option<String>, field: &'static str) -> Result<String, Error> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::MissingField(field)),
    }
}

pub fn validate_question_body(body: QuestionBody) -> Result<NewQuestion, Error> {
    Ok(NewQuestion {
        title: required(body.title, "title")?,
        description: required(body.description, "description")?,
        category: required(body.category, "category")?,
    })
}

/// Empty parameters count as absent. Only `category` is constrained, and
/// only to exact membership in [`CATEGORIES`].
pub fn validate_search_param(params: SearchParams) -> Result<SearchFilter, Error> {
    let title = params.title.filter(|t| !t.is_empty());
    let category = params.category.filter(|c| !c.is_empty());

    if let Some(category) = &category {
        if !CATEGORIES.contains(&category.as_str()) {
            return Err(Error::InvalidCategory);
        }
    }

    Ok(SearchFilter { title, category })
}

pub fn validate_answer_body(body: AnswerBody) -> Result<NewAnswer, Error> {
    let content = required(body.content, "content")?;
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(Error::InvalidLength);
    }
    Ok(NewAnswer { content })
}

pub fn validate_vote(body: VoteBody) -> Result<Vote, Error> {
    match body.vote.as_ref().and_then(|v| v.as_i64()) {
        Some(1) => Ok(Vote::Up),
        Some(-1) => Ok(Vote::Down),
        _ => Err(Error::InvalidVote),
    }
}
