use handle_errors::Error;
use tracing::{Level, event, instrument};

use crate::store::SharedStore;
use crate::types::answer::AnswerId;
use crate::types::question::QuestionId;
use crate::types::response::MessageResponse;
use crate::types::vote::Vote;

#[instrument(skip(store))]
pub async fn vote_question(
    id: i32,
    store: SharedStore,
    vote: Vote,
) -> Result<impl warp::Reply, warp::Rejection> {
    if store
        .get_question(QuestionId(id))
        .await
        .map_err(warp::reject::custom)?
        .is_none()
    {
        return Err(warp::reject::custom(Error::QuestionNotFound(id)));
    }

    store
        .set_question_vote(QuestionId(id), vote)
        .await
        .map_err(warp::reject::custom)?;

    event!(Level::INFO, id, vote = vote.value(), "question voted");
    Ok(warp::reply::json(&MessageResponse::new(format!(
        "Voted on question id ({}) successfully",
        id
    ))))
}

#[instrument(skip(store))]
pub async fn vote_answer(
    id: i32,
    store: SharedStore,
    vote: Vote,
) -> Result<impl warp::Reply, warp::Rejection> {
    if store
        .get_answer(AnswerId(id))
        .await
        .map_err(warp::reject::custom)?
        .is_none()
    {
        return Err(warp::reject::custom(Error::AnswerNotFound(id)));
    }

    store
        .set_answer_vote(AnswerId(id), vote)
        .await
        .map_err(warp::reject::custom)?;

    event!(Level::INFO, id, vote = vote.value(), "answer voted");
    Ok(warp::reply::json(&MessageResponse::new(format!(
        "Voted on answer id ({}) successfully",
        id
    ))))
}
