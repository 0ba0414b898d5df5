use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use handle_errors::Error;
use tokio::sync::RwLock;

use crate::store::Store;
use crate::types::{
    answer::{Answer, AnswerId, NewAnswer},
    question::{NewQuestion, Question, QuestionId},
    search::SearchFilter,
    vote::Vote,
};

#[derive(Debug, Default)]
struct Tables {
    questions: BTreeMap<i32, Question>,
    answers: BTreeMap<i32, Answer>,
    question_votes: Vec<(QuestionId, i32)>,
    answer_votes: Vec<(AnswerId, i32)>,
    next_question_id: i32,
    next_answer_id: i32,
}

/// In-process tables with the same semantics as [`PgStore`](super::PgStore).
///
/// Each operation holds the write lock for its whole duration, which gives
/// the same all-or-nothing behaviour as a database transaction.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// A store whose every call fails as if the pool could not hand out a
    /// connection.
    pub fn unavailable() -> Self {
        MemoryStore {
            unavailable: true,
            ..MemoryStore::default()
        }
    }

    pub async fn question_votes(&self, id: QuestionId) -> Vec<i32> {
        let tables = self.tables.read().await;
        tables
            .question_votes
            .iter()
            .filter(|(question_id, _)| *question_id == id)
            .map(|(_, vote)| *vote)
            .collect()
    }

    pub async fn answer_votes(&self, id: AnswerId) -> Vec<i32> {
        let tables = self.tables.read().await;
        tables
            .answer_votes
            .iter()
            .filter(|(answer_id, _)| *answer_id == id)
            .map(|(_, vote)| *vote)
            .collect()
    }

    fn check(&self) -> Result<(), Error> {
        if self.unavailable {
            Err(Error::DatabaseQueryError(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

impl Tables {
    fn require_question(&self, id: QuestionId) -> Result<(), Error> {
        if self.questions.contains_key(&id.0) {
            Ok(())
        } else {
            Err(Error::QuestionNotFound)
        }
    }

    fn remove_answers_of(&mut self, question_id: QuestionId) -> u64 {
        let removed: Vec<AnswerId> = self
            .answers
            .values()
            .filter(|a| a.question_id == question_id)
            .map(|a| a.id)
            .collect();

        for id in &removed {
            self.answers.remove(&id.0);
        }
        self.answer_votes.retain(|(id, _)| !removed.contains(id));
        removed.len() as u64
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_questions(&self) -> Result<Vec<Question>, Error> {
        self.check()?;
        Ok(self.tables.read().await.questions.values().cloned().collect())
    }

    async fn search_questions(&self, filter: &SearchFilter) -> Result<Vec<Question>, Error> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .values()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Question, Error> {
        self.check()?;
        self.tables
            .read()
            .await
            .questions
            .get(&id.0)
            .cloned()
            .ok_or(Error::QuestionNotFound)
    }

    async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error> {
        self.check()?;
        let mut tables = self.tables.write().await;
        tables.next_question_id += 1;
        let question = Question {
            id: QuestionId(tables.next_question_id),
            title: new_question.title,
            description: new_question.description,
            category: new_question.category,
        };
        tables.questions.insert(question.id.0, question.clone());
        Ok(question)
    }

    async fn update_question(
        &self,
        id: QuestionId,
        question: NewQuestion,
    ) -> Result<Question, Error> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let stored = tables
            .questions
            .get_mut(&id.0)
            .ok_or(Error::QuestionNotFound)?;
        stored.title = question.title;
        stored.description = question.description;
        stored.category = question.category;
        Ok(stored.clone())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), Error> {
        self.check()?;
        let mut tables = self.tables.write().await;
        tables.require_question(id)?;
        tables.remove_answers_of(id);
        tables.question_votes.retain(|(question_id, _)| *question_id != id);
        tables.questions.remove(&id.0);
        Ok(())
    }

    async fn add_question_vote(&self, id: QuestionId, vote: Vote) -> Result<(), Error> {
        self.check()?;
        let mut tables = self.tables.write().await;
        tables.require_question(id)?;
        tables.question_votes.push((id, vote.value()));
        Ok(())
    }

    async fn get_answers(&self, question_id: QuestionId) -> Result<Vec<Answer>, Error> {
        self.check()?;
        let tables = self.tables.read().await;
        tables.require_question(question_id)?;
        Ok(tables
            .answers
            .values()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn add_answer(
        &self,
        question_id: QuestionId,
        new_answer: NewAnswer,
    ) -> Result<Answer, Error> {
        self.check()?;
        let mut tables = self.tables.write().await;
        tables.require_question(question_id)?;
        tables.next_answer_id += 1;
        let answer = Answer {
            id: AnswerId(tables.next_answer_id),
            question_id,
            content: new_answer.content,
        };
        tables.answers.insert(answer.id.0, answer.clone());
        Ok(answer)
    }

    async fn delete_answers(&self, question_id: QuestionId) -> Result<u64, Error> {
        self.check()?;
        let mut tables = self.tables.write().await;
        tables.require_question(question_id)?;
        match tables.remove_answers_of(question_id) {
            0 => Err(Error::NoAnswers),
            deleted => Ok(deleted),
        }
    }

    async fn add_answer_vote(&self, id: AnswerId, vote: Vote) -> Result<(), Error> {
        self.check()?;
        let mut tables = self.tables.write().await;
        if !tables.answers.contains_key(&id.0) {
            return Err(Error::AnswerNotFound);
        }
        tables.answer_votes.push((id, vote.value()));
        Ok(())
    }
}
