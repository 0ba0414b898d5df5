use std::sync::Arc;

use async_trait::async_trait;
use handle_errors::Error;

use crate::types::{
    answer::{Answer, AnswerId, NewAnswer},
    question::{NewQuestion, Question, QuestionId},
    search::SearchFilter,
    vote::Vote,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type DynStore = Arc<dyn Store>;

/// Data access for the forum.
///
/// Every method is one unit of work: existence checks and the mutation
/// they guard either all take effect or none do. Missing parents surface as
/// [`Error::QuestionNotFound`] / [`Error::AnswerNotFound`]; any other
/// failure is an [`Error::DatabaseQueryError`].
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_questions(&self) -> Result<Vec<Question>, Error>;

    async fn search_questions(&self, filter: &SearchFilter) -> Result<Vec<Question>, Error>;

    async fn get_question(&self, id: QuestionId) -> Result<Question, Error>;

    async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error>;

    async fn update_question(
        &self,
        id: QuestionId,
        question: NewQuestion,
    ) -> Result<Question, Error>;

    /// Removes the question with its answers and every vote on either.
    async fn delete_question(&self, id: QuestionId) -> Result<(), Error>;

    async fn add_question_vote(&self, id: QuestionId, vote: Vote) -> Result<(), Error>;

    async fn get_answers(&self, question_id: QuestionId) -> Result<Vec<Answer>, Error>;

    async fn add_answer(
        &self,
        question_id: QuestionId,
        new_answer: NewAnswer,
    ) -> Result<Answer, Error>;

    /// Fails with [`Error::NoAnswers`] when the question has none to delete.
    /// Returns how many answers were removed.
    async fn delete_answers(&self, question_id: QuestionId) -> Result<u64, Error>;

    async fn add_answer_vote(&self, id: AnswerId, vote: Vote) -> Result<(), Error>;
}
