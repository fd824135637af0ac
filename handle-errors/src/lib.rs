use serde::Serialize;
use tracing::{Level, event, instrument};
use warp::{
    Rejection, Reply,
    filters::{body::BodyDeserializeError, cors::CorsForbidden},
    http::StatusCode,
    reject::Reject,
};

/// Message sent to clients for every backend failure. The driver error is
/// only written to the log.
pub const DATABASE_ERROR_MESSAGE: &str =
    "Server could not complete the request because of a database issue";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot parse parameter: {0}")]
    ParseError(#[from] std::num::ParseIntError),
    #[error("{0}")]
    Validation(String),
    #[error("Question with id {0} not found")]
    QuestionNotFound(i32),
    #[error("Answer with id {0} not found")]
    AnswerNotFound(i32),
    #[error("No questions found")]
    NoQuestions,
    #[error("No answers found for question id {0}")]
    NoAnswers(i32),
    #[error("Database query error: {0}")]
    DatabaseQueryError(#[from] sqlx::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::ParseError(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::QuestionNotFound(_)
            | Error::AnswerNotFound(_)
            | Error::NoQuestions
            | Error::NoAnswers(_) => StatusCode::NOT_FOUND,
            Error::DatabaseQueryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Reject for Error {}

#[derive(Serialize)]
struct ErrorMessage {
    message: String,
}

fn error_reply(message: impl Into<String>, status: StatusCode) -> warp::reply::Response {
    warp::reply::with_status(
        warp::reply::json(&ErrorMessage {
            message: message.into(),
        }),
        status,
    )
    .into_response()
}

#[instrument]
pub async fn return_error(r: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(Error::DatabaseQueryError(e)) = r.find() {
        event!(Level::ERROR, "Database query error: {}", e);
        Ok(error_reply(
            DATABASE_ERROR_MESSAGE,
            StatusCode::INTERNAL_SERVER_ERROR,
        ))
    } else if let Some(error) = r.find::<Error>() {
        event!(Level::WARN, "{}", error);
        Ok(error_reply(error.to_string(), error.status_code()))
    } else if let Some(error) = r.find::<BodyDeserializeError>() {
        event!(Level::WARN, "{}", error);
        Ok(error_reply(
            "Request body must be valid JSON",
            StatusCode::BAD_REQUEST,
        ))
    } else if let Some(error) = r.find::<CorsForbidden>() {
        event!(Level::WARN, "CORS forbidden error: {}", error);
        Ok(error_reply(error.to_string(), StatusCode::FORBIDDEN))
    } else {
        event!(Level::WARN, "Requested route was not found");
        Ok(error_reply("Route not found", StatusCode::NOT_FOUND))
    }
}
