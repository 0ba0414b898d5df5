use async_trait::async_trait;
use handle_errors::Error;
use sqlx::{
    postgres::{PgPool, PgPoolOptions, PgRow},
    Postgres, Row, Transaction,
};
use tracing::{event, Level};

use crate::store::Store;
use crate::types::{
    answer::{Answer, AnswerId, NewAnswer},
    question::{NewQuestion, Question, QuestionId},
    search::SearchFilter,
    vote::Vote,
};

/// Expects the tables
/// `questions(id, title, description, category)`,
/// `answers(id, question_id, content)`,
/// `question_votes(id, question_id, vote)` and
/// `answer_votes(id, answer_id, vote)` to exist already.
#[derive(Debug, Clone)]
pub struct PgStore {
    pub connection: PgPool,
}

impl PgStore {
    pub async fn new(db_url: &str, max_connections: u32) -> Result<Self, Error> {
        let db_pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_url)
            .await
            .map_err(db_error)?;

        Ok(PgStore {
            connection: db_pool,
        })
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, Error> {
        self.connection.begin().await.map_err(db_error)
    }
}

fn db_error(e: sqlx::Error) -> Error {
    event!(Level::ERROR, "{:?}", e);
    Error::DatabaseQueryError(e)
}

fn question_from_row(row: PgRow) -> Question {
    Question {
        id: QuestionId(row.get("id")),
        title: row.get("title"),
        description: row.get("description"),
        category: row.get("category"),
    }
}

fn answer_from_row(row: PgRow) -> Answer {
    Answer {
        id: AnswerId(row.get("id")),
        question_id: QuestionId(row.get("question_id")),
        content: row.get("content"),
    }
}

async fn question_exists(
    tx: &mut Transaction<'_, Postgres>,
    id: QuestionId,
) -> Result<bool, Error> {
    sqlx::query("SELECT id FROM questions WHERE id = $1")
        .bind(id.0)
        .fetch_optional(&mut **tx)
        .await
        .map(|row| row.is_some())
        .map_err(db_error)
}

#[async_trait]
impl Store for PgStore {
    async fn get_questions(&self) -> Result<Vec<Question>, Error> {
        sqlx::query("SELECT id, title, description, category FROM questions")
            .map(question_from_row)
            .fetch_all(&self.connection)
            .await
            .map_err(db_error)
    }

    async fn search_questions(&self, filter: &SearchFilter) -> Result<Vec<Question>, Error> {
        let (where_clause, values) = filter.to_sql();
        let sql = format!(
            "SELECT id, title, description, category FROM questions{}",
            where_clause
        );

        let mut query = sqlx::query(&sql);
        for value in &values {
            query = query.bind(value.as_str());
        }

        query
            .map(question_from_row)
            .fetch_all(&self.connection)
            .await
            .map_err(db_error)
    }

    async fn get_question(&self, id: QuestionId) -> Result<Question, Error> {
        sqlx::query("SELECT id, title, description, category FROM questions WHERE id = $1")
            .bind(id.0)
            .map(question_from_row)
            .fetch_optional(&self.connection)
            .await
            .map_err(db_error)?
            .ok_or(Error::QuestionNotFound)
    }

    async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error> {
        sqlx::query(
            "INSERT INTO questions (title, description, category)
             VALUES ($1, $2, $3)
             RETURNING id, title, description, category",
        )
        .bind(new_question.title)
        .bind(new_question.description)
        .bind(new_question.category)
        .map(question_from_row)
        .fetch_one(&self.connection)
        .await
        .map_err(db_error)
    }

    async fn update_question(
        &self,
        id: QuestionId,
        question: NewQuestion,
    ) -> Result<Question, Error> {
        sqlx::query(
            "UPDATE questions
             SET title = $2, description = $3, category = $4
             WHERE id = $1
             RETURNING id, title, description, category",
        )
        .bind(id.0)
        .bind(question.title)
        .bind(question.description)
        .bind(question.category)
        .map(question_from_row)
        .fetch_optional(&self.connection)
        .await
        .map_err(db_error)?
        .ok_or(Error::QuestionNotFound)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), Error> {
        let mut tx = self.begin().await?;

        if !question_exists(&mut tx, id).await? {
            return Err(Error::QuestionNotFound);
        }

        for statement in [
            "DELETE FROM answer_votes WHERE answer_id IN
             (SELECT id FROM answers WHERE question_id = $1)",
            "DELETE FROM answers WHERE question_id = $1",
            "DELETE FROM question_votes WHERE question_id = $1",
            "DELETE FROM questions WHERE id = $1",
        ] {
            sqlx::query(statement)
                .bind(id.0)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)
    }

    async fn add_question_vote(&self, id: QuestionId, vote: Vote) -> Result<(), Error> {
        let mut tx = self.begin().await?;

        if !question_exists(&mut tx, id).await? {
            return Err(Error::QuestionNotFound);
        }

        sqlx::query("INSERT INTO question_votes (question_id, vote) VALUES ($1, $2)")
            .bind(id.0)
            .bind(vote.value())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)
    }

    async fn get_answers(&self, question_id: QuestionId) -> Result<Vec<Answer>, Error> {
        let mut tx = self.begin().await?;

        if !question_exists(&mut tx, question_id).await? {
            return Err(Error::QuestionNotFound);
        }

        let answers = sqlx::query(
            "SELECT id, question_id, content FROM answers WHERE question_id = $1 ORDER BY id",
        )
        .bind(question_id.0)
        .map(answer_from_row)
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(answers)
    }

    async fn add_answer(
        &self,
        question_id: QuestionId,
        new_answer: NewAnswer,
    ) -> Result<Answer, Error> {
        let mut tx = self.begin().await?;

        if !question_exists(&mut tx, question_id).await? {
            return Err(Error::QuestionNotFound);
        }

        let answer = sqlx::query(
            "INSERT INTO answers (question_id, content)
             VALUES ($1, $2)
             RETURNING id, question_id, content",
        )
        .bind(question_id.0)
        .bind(new_answer.content)
        .map(answer_from_row)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(answer)
    }

    async fn delete_answers(&self, question_id: QuestionId) -> Result<u64, Error> {
        let mut tx = self.begin().await?;

        if !question_exists(&mut tx, question_id).await? {
            return Err(Error::QuestionNotFound);
        }

        let has_answers = sqlx::query("SELECT id FROM answers WHERE question_id = $1 LIMIT 1")
            .bind(question_id.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error)?
            .is_some();
        if !has_answers {
            return Err(Error::NoAnswers);
        }

        sqlx::query(
            "DELETE FROM answer_votes WHERE answer_id IN
             (SELECT id FROM answers WHERE question_id = $1)",
        )
        .bind(question_id.0)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        let deleted = sqlx::query("DELETE FROM answers WHERE question_id = $1")
            .bind(question_id.0)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?
            .rows_affected();

        tx.commit().await.map_err(db_error)?;
        Ok(deleted)
    }

    async fn add_answer_vote(&self, id: AnswerId, vote: Vote) -> Result<(), Error> {
        let mut tx = self.begin().await?;

        let exists = sqlx::query("SELECT id FROM answers WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error)?
            .is_some();
        if !exists {
            return Err(Error::AnswerNotFound);
        }

        sqlx::query("INSERT INTO answer_votes (answer_id, vote) VALUES ($1, $2)")
            .bind(id.0)
            .bind(vote.value())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)
    }
}
