use handle_errors::Error;
use tracing::{Level, event, instrument};
use warp::http::StatusCode;

use crate::store::SharedStore;
use crate::types::answer::NewAnswer;
use crate::types::question::QuestionId;
use crate::types::response::{DataResponse, MessageResponse};

async fn ensure_question(store: &SharedStore, id: i32) -> Result<(), warp::Rejection> {
    match store
        .get_question(QuestionId(id))
        .await
        .map_err(warp::reject::custom)?
    {
        Some(_) => Ok(()),
        None => Err(warp::reject::custom(Error::QuestionNotFound(id))),
    }
}

#[instrument(skip(store))]
pub async fn add_answer(
    question_id: i32,
    store: SharedStore,
    new_answer: NewAnswer,
) -> Result<impl warp::Reply, warp::Rejection> {
    ensure_question(&store, question_id).await?;

    let answer = store
        .add_answer(QuestionId(question_id), new_answer)
        .await
        .map_err(warp::reject::custom)?;

    event!(Level::INFO, question_id, id = answer.id.0, "answer created");
    let message = format!(
        "Created answer id ({}) for question id ({}) successfully",
        answer.id.0, question_id
    );
    Ok(warp::reply::with_status(
        warp::reply::json(&MessageResponse::with_data(message, answer)),
        StatusCode::CREATED,
    ))
}

#[instrument(skip(store))]
pub async fn get_answers(
    question_id: i32,
    store: SharedStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    let answers = store
        .get_answers(QuestionId(question_id))
        .await
        .map_err(warp::reject::custom)?;

    if answers.is_empty() {
        return Err(warp::reject::custom(Error::NoAnswers(question_id)));
    }
    Ok(warp::reply::json(&DataResponse { data: answers }))
}

/// Removes every answer of the question, then the question itself.
#[instrument(skip(store))]
pub async fn delete_answers(
    question_id: i32,
    store: SharedStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    ensure_question(&store, question_id).await?;

    let id = QuestionId(question_id);
    let answers = store.delete_answers(id).await.map_err(warp::reject::custom)?;
    store.delete_question(id).await.map_err(warp::reject::custom)?;

    event!(Level::INFO, question_id, answers, "question and answers deleted");
    Ok(warp::reply::json(&MessageResponse::new(format!(
        "Deleted question id ({}) and its answers successfully",
        question_id
    ))))
}
