//! Persistence gateway.
//!
//! Handlers only see [`QuestionStore`]. The server wires in the Postgres
//! [`Store`]; tests substitute the in-memory [`MemoryStore`].

use std::sync::Arc;

use async_trait::async_trait;
use handle_errors::Error;

use crate::types::{
    answer::{Answer, AnswerId, NewAnswer},
    question::{NewQuestion, Question, QuestionId},
    search::SearchParams,
    vote::Vote,
};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::Store;

pub type SharedStore = Arc<dyn QuestionStore>;

#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error>;

    /// All questions, ordered by id.
    async fn get_questions(&self) -> Result<Vec<Question>, Error>;

    /// Questions matching every filter that is set.
    async fn search_questions(&self, params: &SearchParams) -> Result<Vec<Question>, Error>;

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, Error>;

    /// Overwrite the fields of a question. Returns the number of rows changed.
    async fn update_question(&self, id: QuestionId, question: NewQuestion) -> Result<u64, Error>;

    /// Remove a question. Its answers and votes go with it.
    async fn delete_question(&self, id: QuestionId) -> Result<u64, Error>;

    async fn add_answer(&self, question_id: QuestionId, new_answer: NewAnswer)
    -> Result<Answer, Error>;

    async fn get_answers(&self, question_id: QuestionId) -> Result<Vec<Answer>, Error>;

    async fn get_answer(&self, id: AnswerId) -> Result<Option<Answer>, Error>;

    async fn delete_answers(&self, question_id: QuestionId) -> Result<u64, Error>;

    /// Record the vote for a question, replacing any earlier one.
    async fn set_question_vote(&self, id: QuestionId, vote: Vote) -> Result<(), Error>;

    /// Record the vote for an answer, replacing any earlier one.
    async fn set_answer_vote(&self, id: AnswerId, vote: Vote) -> Result<(), Error>;
}
