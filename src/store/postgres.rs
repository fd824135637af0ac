use async_trait::async_trait;
use handle_errors::Error;
use sqlx::{
    Row,
    postgres::{PgPool, PgPoolOptions, PgRow},
};
use tracing::{Level, event};

use super::QuestionStore;
use crate::types::{
    answer::{Answer, AnswerId, NewAnswer},
    question::{NewQuestion, Question, QuestionId},
    search::{SearchParams, substring_pattern},
    vote::Vote,
};

#[derive(Debug, Clone)]
pub struct Store {
    pub connection: PgPool,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self, sqlx::Error> {
        let db_pool = PgPoolOptions::new().connect(db_url).await?;

        Ok(Store {
            connection: db_pool,
        })
    }
}

fn to_question(row: PgRow) -> Question {
    Question {
        id: QuestionId(row.get("id")),
        title: row.get("title"),
        description: row.get("description"),
        category: row.get("category"),
    }
}

fn to_answer(row: PgRow) -> Answer {
    Answer {
        id: AnswerId(row.get("id")),
        question_id: QuestionId(row.get("question_id")),
        content: row.get("content"),
    }
}

fn query_error(e: sqlx::Error) -> Error {
    event!(Level::ERROR, "{:?}", e);
    Error::DatabaseQueryError(e)
}

#[async_trait]
impl QuestionStore for Store {
    async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error> {
        sqlx::query(
            "INSERT INTO questions (title, description, category)
             VALUES ($1, $2, $3)
             RETURNING id, title, description, category",
        )
        .bind(new_question.title)
        .bind(new_question.description)
        .bind(new_question.category)
        .map(to_question)
        .fetch_one(&self.connection)
        .await
        .map_err(query_error)
    }

    async fn get_questions(&self) -> Result<Vec<Question>, Error> {
        sqlx::query("SELECT id, title, description, category FROM questions ORDER BY id")
            .map(to_question)
            .fetch_all(&self.connection)
            .await
            .map_err(query_error)
    }

    async fn search_questions(&self, params: &SearchParams) -> Result<Vec<Question>, Error> {
        let pattern = params.keywords.as_deref().map(substring_pattern);

        sqlx::query(
            "SELECT id, title, description, category FROM questions
             WHERE ($1::TEXT IS NULL OR category = $1)
               AND ($2::TEXT IS NULL OR title ILIKE $2 OR description ILIKE $2)
             ORDER BY id",
        )
        .bind(params.category.as_deref())
        .bind(pattern)
        .map(to_question)
        .fetch_all(&self.connection)
        .await
        .map_err(query_error)
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, Error> {
        sqlx::query("SELECT id, title, description, category FROM questions WHERE id = $1")
            .bind(id.0)
            .map(to_question)
            .fetch_optional(&self.connection)
            .await
            .map_err(query_error)
    }

    async fn update_question(&self, id: QuestionId, question: NewQuestion) -> Result<u64, Error> {
        match sqlx::query(
            "UPDATE questions SET title = $2, description = $3, category = $4 WHERE id = $1",
        )
        .bind(id.0)
        .bind(question.title)
        .bind(question.description)
        .bind(question.category)
        .execute(&self.connection)
        .await
        {
            Ok(result) => Ok(result.rows_affected()),
            Err(e) => Err(query_error(e)),
        }
    }

    async fn delete_question(&self, id: QuestionId) -> Result<u64, Error> {
        match sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id.0)
            .execute(&self.connection)
            .await
        {
            Ok(result) => Ok(result.rows_affected()),
            Err(e) => Err(query_error(e)),
        }
    }

    async fn add_answer(
        &self,
        question_id: QuestionId,
        new_answer: NewAnswer,
    ) -> Result<Answer, Error> {
        sqlx::query(
            "INSERT INTO answers (question_id, content)
             VALUES ($1, $2)
             RETURNING id, question_id, content",
        )
        .bind(question_id.0)
        .bind(new_answer.content)
        .map(to_answer)
        .fetch_one(&self.connection)
        .await
        .map_err(query_error)
    }

    async fn get_answers(&self, question_id: QuestionId) -> Result<Vec<Answer>, Error> {
        sqlx::query(
            "SELECT id, question_id, content FROM answers WHERE question_id = $1 ORDER BY id",
        )
        .bind(question_id.0)
        .map(to_answer)
        .fetch_all(&self.connection)
        .await
        .map_err(query_error)
    }

    async fn get_answer(&self, id: AnswerId) -> Result<Option<Answer>, Error> {
        sqlx::query("SELECT id, question_id, content FROM answers WHERE id = $1")
            .bind(id.0)
            .map(to_answer)
            .fetch_optional(&self.connection)
            .await
            .map_err(query_error)
    }

    async fn delete_answers(&self, question_id: QuestionId) -> Result<u64, Error> {
        match sqlx::query("DELETE FROM answers WHERE question_id = $1")
            .bind(question_id.0)
            .execute(&self.connection)
            .await
        {
            Ok(result) => Ok(result.rows_affected()),
            Err(e) => Err(query_error(e)),
        }
    }

    async fn set_question_vote(&self, id: QuestionId, vote: Vote) -> Result<(), Error> {
        sqlx::query(
            "INSERT INTO question_votes (question_id, vote) VALUES ($1, $2)
             ON CONFLICT (question_id) DO UPDATE SET vote = EXCLUDED.vote",
        )
        .bind(id.0)
        .bind(vote.value())
        .execute(&self.connection)
        .await
        .map(|_| ())
        .map_err(query_error)
    }

    async fn set_answer_vote(&self, id: AnswerId, vote: Vote) -> Result<(), Error> {
        sqlx::query(
            "INSERT INTO answer_votes (answer_id, vote) VALUES ($1, $2)
             ON CONFLICT (answer_id) DO UPDATE SET vote = EXCLUDED.vote",
        )
        .bind(id.0)
        .bind(vote.value())
        .execute(&self.connection)
        .await
        .map(|_| ())
        .map_err(query_error)
    }
}
