use std::collections::BTreeMap;

use async_trait::async_trait;
use handle_errors::Error;
use tokio::sync::RwLock;

use super::QuestionStore;
use crate::types::{
    answer::{Answer, AnswerId, NewAnswer},
    question::{NewQuestion, Question, QuestionId},
    search::SearchParams,
    vote::Vote,
};

#[derive(Debug, Default)]
struct Tables {
    next_question_id: i32,
    next_answer_id: i32,
    questions: BTreeMap<i32, Question>,
    answers: BTreeMap<i32, Answer>,
    question_votes: BTreeMap<i32, Vote>,
    answer_votes: BTreeMap<i32, Vote>,
}

impl Tables {
    fn remove_answers_of(&mut self, question_id: QuestionId) -> u64 {
        let ids: Vec<i32> = self
            .answers
            .values()
            .filter(|answer| answer.question_id == question_id)
            .map(|answer| answer.id.0)
            .collect();
        for id in &ids {
            self.answers.remove(id);
            self.answer_votes.remove(id);
        }
        ids.len() as u64
    }
}

/// Store backed by in-process maps, with the same behaviour as the Postgres
/// schema: ids count up from 1, answers must point at an existing question
/// and deleting a question cascades to its answers and votes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn question_vote(&self, id: QuestionId) -> Option<Vote> {
        self.tables.read().await.question_votes.get(&id.0).copied()
    }

    pub async fn answer_vote(&self, id: AnswerId) -> Option<Vote> {
        self.tables.read().await.answer_votes.get(&id.0).copied()
    }
}

fn matches(question: &Question, params: &SearchParams) -> bool {
    let category_matches = params
        .category
        .as_ref()
        .is_none_or(|category| question.category == *category);

    let keywords_match = params.keywords.as_ref().is_none_or(|keywords| {
        let needle = keywords.to_lowercase();
        question.title.to_lowercase().contains(&needle)
            || question.description.to_lowercase().contains(&needle)
    });

    category_matches && keywords_match
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error> {
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

    async fn get_questions(&self) -> Result<Vec<Question>, Error> {
        Ok(self.tables.read().await.questions.values().cloned().collect())
    }

    async fn search_questions(&self, params: &SearchParams) -> Result<Vec<Question>, Error> {
        Ok(self
            .tables
            .read()
            .await
            .questions
            .values()
            .filter(|question| matches(question, params))
            .cloned()
            .collect())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, Error> {
        Ok(self.tables.read().await.questions.get(&id.0).cloned())
    }

    async fn update_question(&self, id: QuestionId, question: NewQuestion) -> Result<u64, Error> {
        let mut tables = self.tables.write().await;
        match tables.questions.get_mut(&id.0) {
            Some(stored) => {
                stored.title = question.title;
                stored.description = question.description;
                stored.category = question.category;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_question(&self, id: QuestionId) -> Result<u64, Error> {
        let mut tables = self.tables.write().await;
        if tables.questions.remove(&id.0).is_none() {
            return Ok(0);
        }
        tables.question_votes.remove(&id.0);
        tables.remove_answers_of(id);
        Ok(1)
    }

    async fn add_answer(
        &self,
        question_id: QuestionId,
        new_answer: NewAnswer,
    ) -> Result<Answer, Error> {
        let mut tables = self.tables.write().await;
        if !tables.questions.contains_key(&question_id.0) {
            return Err(Error::QuestionNotFound(question_id.0));
        }
        tables.next_answer_id += 1;
        let answer = Answer {
            id: AnswerId(tables.next_answer_id),
            question_id,
            content: new_answer.content,
        };
        tables.answers.insert(answer.id.0, answer.clone());
        Ok(answer)
    }

    async fn get_answers(&self, question_id: QuestionId) -> Result<Vec<Answer>, Error> {
        Ok(self
            .tables
            .read()
            .await
            .answers
            .values()
            .filter(|answer| answer.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn get_answer(&self, id: AnswerId) -> Result<Option<Answer>, Error> {
        Ok(self.tables.read().await.answers.get(&id.0).cloned())
    }

    async fn delete_answers(&self, question_id: QuestionId) -> Result<u64, Error> {
        Ok(self.tables.write().await.remove_answers_of(question_id))
    }

    async fn set_question_vote(&self, id: QuestionId, vote: Vote) -> Result<(), Error> {
        let mut tables = self.tables.write().await;
        if !tables.questions.contains_key(&id.0) {
            return Err(Error::QuestionNotFound(id.0));
        }
        tables.question_votes.insert(id.0, vote);
        Ok(())
    }

    async fn set_answer_vote(&self, id: AnswerId, vote: Vote) -> Result<(), Error> {
        let mut tables = self.tables.write().await;
        if !tables.answers.contains_key(&id.0) {
            return Err(Error::AnswerNotFound(id.0));
        }
        tables.answer_votes.insert(id.0, vote);
        Ok(())
    }
}
