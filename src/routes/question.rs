use std::collections::HashMap;

use handle_errors::Error;
use tracing::{Level, event, instrument};
use warp::http::StatusCode;

use crate::store::SharedStore;
use crate::types::question::{NewQuestion, QuestionId};
use crate::types::response::{DataResponse, MessageResponse};
use crate::types::search::extract_search;

#[instrument(skip(store))]
pub async fn add_question(
    store: SharedStore,
    new_question: NewQuestion,
) -> Result<impl warp::Reply, warp::Rejection> {
    let question = store
        .add_question(new_question)
        .await
        .map_err(warp::reject::custom)?;

    event!(Level::INFO, id = question.id.0, "question created");
    let message = format!("Created question id ({}) successfully", question.id.0);
    Ok(warp::reply::with_status(
        warp::reply::json(&MessageResponse::with_data(message, question)),
        StatusCode::CREATED,
    ))
}

#[instrument(skip(store))]
pub async fn get_questions(store: SharedStore) -> Result<impl warp::Reply, warp::Rejection> {
    event!(target: "questions_api", Level::INFO, "querying questions");
    let questions = store.get_questions().await.map_err(warp::reject::custom)?;

    if questions.is_empty() {
        return Err(warp::reject::custom(Error::NoQuestions));
    }
    Ok(warp::reply::json(&DataResponse { data: questions }))
}

#[instrument(skip(store))]
pub async fn search_questions(
    params: HashMap<String, String>,
    store: SharedStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    let search = extract_search(params);
    event!(target: "questions_api", Level::INFO, search = ?search, "searching questions");
    let questions = store
        .search_questions(&search)
        .await
        .map_err(warp::reject::custom)?;

    if questions.is_empty() {
        return Err(warp::reject::custom(Error::NoQuestions));
    }
    Ok(warp::reply::json(&DataResponse { data: questions }))
}

#[instrument(skip(store))]
pub async fn get_question(id: i32, store: SharedStore) -> Result<impl warp::Reply, warp::Rejection> {
    match store
        .get_question(QuestionId(id))
        .await
        .map_err(warp::reject::custom)?
    {
        Some(question) => Ok(warp::reply::json(&DataResponse { data: question })),
        None => Err(warp::reject::custom(Error::QuestionNotFound(id))),
    }
}

/// Overwrites the question without checking that it exists.
#[instrument(skip(store))]
pub async fn update_question(
    id: i32,
    store: SharedStore,
    question: NewQuestion,
) -> Result<impl warp::Reply, warp::Rejection> {
    let changed = store
        .update_question(QuestionId(id), question)
        .await
        .map_err(warp::reject::custom)?;

    event!(Level::INFO, id, changed, "question updated");
    Ok(warp::reply::json(&MessageResponse::new(format!(
        "Updated question id ({}) successfully",
        id
    ))))
}

#[instrument(skip(store))]
pub async fn delete_question(
    id: i32,
    store: SharedStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    let deleted = store
        .delete_question(QuestionId(id))
        .await
        .map_err(warp::reject::custom)?;

    event!(Level::INFO, id, deleted, "question deleted");
    Ok(warp::reply::json(&MessageResponse::new(format!(
        "Deleted question id ({}) successfully",
        id
    ))))
}
