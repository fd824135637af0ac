//! Runs the SQL of the Postgres store against a real database.
//!
//! Ignored by default. Point `DATABASE_URL` at a scratch database and run
//! `cargo test --test postgres -- --ignored`. Tables are created as
//! temporary tables on a single connection, so nothing outlives the test.

use questions_api::{
    store::{QuestionStore, Store},
    types::{
        answer::NewAnswer,
        question::NewQuestion,
        search::SearchParams,
        vote::Vote,
    },
};
use sqlx::{Row, postgres::PgPoolOptions};

const SCHEMA: [&str; 4] = [
    "CREATE TEMPORARY TABLE questions (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        category TEXT NOT NULL
    )",
    "CREATE TEMPORARY TABLE answers (
        id SERIAL PRIMARY KEY,
        question_id INTEGER NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
        content TEXT NOT NULL
    )",
    "CREATE TEMPORARY TABLE question_votes (
        question_id INTEGER PRIMARY KEY REFERENCES questions(id) ON DELETE CASCADE,
        vote SMALLINT NOT NULL CHECK (vote IN (1, -1))
    )",
    "CREATE TEMPORARY TABLE answer_votes (
        answer_id INTEGER PRIMARY KEY REFERENCES answers(id) ON DELETE CASCADE,
        vote SMALLINT NOT NULL CHECK (vote IN (1, -1))
    )",
];

async fn scratch_store() -> Store {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let connection = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("Postgres is reachable");
    for statement in SCHEMA {
        sqlx::query(statement).execute(&connection).await.unwrap();
    }
    Store { connection }
}

fn question(title: &str, description: &str, category: &str) -> NewQuestion {
    NewQuestion {
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
    }
}

fn search(category: Option<&str>, keywords: Option<&str>) -> SearchParams {
    SearchParams {
        category: category.map(str::to_owned),
        keywords: keywords.map(str::to_owned),
    }
}

#[tokio::test]
#[ignore = "needs a Postgres database in DATABASE_URL"]
async fn search_filters_in_sql() {
    let store = scratch_store().await;
    store
        .add_question(question("What is the capital of France?", "geo", "Geography"))
        .await
        .unwrap();
    store
        .add_question(question("Longest river?", "50% of maps", "Geography"))
        .await
        .unwrap();
    store
        .add_question(question("Capital gains?", "tax", "Finance"))
        .await
        .unwrap();

    assert_eq!(store.search_questions(&search(None, None)).await.unwrap().len(), 3);
    assert_eq!(
        store
            .search_questions(&search(Some("Geography"), None))
            .await
            .unwrap()
            .len(),
        2
    );

    let found = store
        .search_questions(&search(Some("Geography"), Some("CAPITAL")))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "What is the capital of France?");

    let found = store
        .search_questions(&search(None, Some("50%")))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert!(
        store
            .search_questions(&search(None, Some("_")))
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
#[ignore = "needs a Postgres database in DATABASE_URL"]
async fn votes_are_upserted_in_sql() {
    let store = scratch_store().await;
    let q = store
        .add_question(question("Capital?", "geo", "Geography"))
        .await
        .unwrap();
    let answer = store
        .add_answer(q.id, NewAnswer { content: "Paris".to_string() })
        .await
        .unwrap();

    store.set_question_vote(q.id, Vote::Up).await.unwrap();
    store.set_question_vote(q.id, Vote::Down).await.unwrap();
    store.set_answer_vote(answer.id, Vote::Up).await.unwrap();

    let row = sqlx::query("SELECT vote FROM question_votes WHERE question_id = $1")
        .bind(q.id.0)
        .fetch_one(&store.connection)
        .await
        .unwrap();
    assert_eq!(row.get::<i16, _>("vote"), -1);

    let row = sqlx::query("SELECT vote FROM answer_votes WHERE answer_id = $1")
        .bind(answer.id.0)
        .fetch_one(&store.connection)
        .await
        .unwrap();
    assert_eq!(row.get::<i16, _>("vote"), 1);

    assert_eq!(store.delete_answers(q.id).await.unwrap(), 1);
    assert_eq!(store.delete_question(q.id).await.unwrap(), 1);
    assert!(store.get_question(q.id).await.unwrap().is_none());
    assert_eq!(store.delete_question(q.id).await.unwrap(), 0);
}
