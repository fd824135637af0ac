//! Request body validation.
//!
//! Each validator inspects the raw JSON body and either returns the typed
//! payload or an [`Error::Validation`] describing the first violated
//! constraint. The filters at the bottom run them ahead of a handler, so an
//! invalid body never reaches the store.

use handle_errors::Error;
use serde_json::Value;
use warp::{Filter, Rejection};

use crate::types::{answer::NewAnswer, question::NewQuestion, vote::Vote};

pub const MAX_ANSWER_LENGTH: usize = 300;

/// JSON falsiness: missing, `null`, `false`, `0` and `""` do not count as a
/// provided value.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn required_string(body: &Value, field: &str, label: &str) -> Result<String, Error> {
    let value = body.get(field);
    if !is_truthy(value) {
        return Err(Error::Validation(format!("{} is required", label)));
    }
    match value {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(Error::Validation(format!("{} must be a string", label))),
    }
}

pub fn validate_question(body: &Value) -> Result<NewQuestion, Error> {
    let title = required_string(body, "title", "Title")?;
    let description = required_string(body, "description", "Description")?;
    let category = required_string(body, "category", "Category")?;

    Ok(NewQuestion {
        title,
        description,
        category,
    })
}

/// Any truthy `content` is accepted. Non-string values are stored as their
/// JSON text. Length is measured in UTF-16 code units.
pub fn validate_answer(body: &Value) -> Result<NewAnswer, Error> {
    let value = body.get("content");
    if !is_truthy(value) {
        return Err(Error::Validation("Content is required".to_string()));
    }
    let content = value
        .map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_default();

    if content.encode_utf16().count() > MAX_ANSWER_LENGTH {
        return Err(Error::Validation(format!(
            "Content must not exceed {} characters",
            MAX_ANSWER_LENGTH
        )));
    }

    Ok(NewAnswer { content })
}

pub fn validate_vote(body: &Value) -> Result<Vote, Error> {
    match body.get("vote").and_then(Value::as_f64) {
        Some(v) if v == 1.0 => Ok(Vote::Up),
        Some(v) if v == -1.0 => Ok(Vote::Down),
        _ => Err(Error::Validation("Invalid vote value".to_string())),
    }
}

pub fn question_body() -> impl Filter<Extract = (NewQuestion,), Error = Rejection> + Clone {
    warp::body::json().and_then(|body: Value| async move {
        validate_question(&body).map_err(warp::reject::custom)
    })
}

pub fn answer_body() -> impl Filter<Extract = (NewAnswer,), Error = Rejection> + Clone {
    warp::body::json().and_then(|body: Value| async move {
        validate_answer(&body).map_err(warp::reject::custom)
    })
}

pub fn vote_body() -> impl Filter<Extract = (Vote,), Error = Rejection> + Clone {
    warp::body::json().and_then(|body: Value| async move {
        validate_vote(&body).map_err(warp::reject::custom)
    })
}

#[cfg(test)]
mod validation_tests {
    use super::*;
    use serde_json::json;

    fn message(result: Result<impl std::fmt::Debug, Error>) -> String {
        match result {
            Err(Error::Validation(message)) => message,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn valid_question_passes() {
        let question = validate_question(&json!({
            "title": "What is the capital of France?",
            "description": "geo question",
            "category": "Geography",
        }))
        .unwrap();
        assert_eq!(question.title, "What is the capital of France?");
        assert_eq!(question.description, "geo question");
        assert_eq!(question.category, "Geography");
    }

    #[test]
    fn question_fields_are_checked_in_order() {
        assert_eq!(message(validate_question(&json!({}))), "Title is required");
        assert_eq!(
            message(validate_question(&json!({ "title": "t" }))),
            "Description is required"
        );
        assert_eq!(
            message(validate_question(&json!({ "title": "t", "description": "d" }))),
            "Category is required"
        );
    }

    #[test]
    fn question_fields_must_be_strings() {
        assert_eq!(
            message(validate_question(&json!({ "title": 42 }))),
            "Title must be a string"
        );
        assert_eq!(
            message(validate_question(
                &json!({ "title": "t", "description": "d", "category": ["a"] })
            )),
            "Category must be a string"
        );
    }

    #[test]
    fn falsy_values_count_as_missing() {
        for falsy in [json!(null), json!(""), json!(0), json!(false)] {
            assert_eq!(
                message(validate_question(&json!({ "title": falsy }))),
                "Title is required"
            );
        }
    }

    #[test]
    fn answer_content_is_required() {
        assert_eq!(message(validate_answer(&json!({}))), "Content is required");
        assert_eq!(
            message(validate_answer(&json!({ "content": "" }))),
            "Content is required"
        );
    }

    #[test]
    fn answer_content_length_is_limited() {
        let at_limit = "a".repeat(MAX_ANSWER_LENGTH);
        assert!(validate_answer(&json!({ "content": at_limit })).is_ok());

        let too_long = "a".repeat(MAX_ANSWER_LENGTH + 1);
        assert_eq!(
            message(validate_answer(&json!({ "content": too_long }))),
            "Content must not exceed 300 characters"
        );
    }

    #[test]
    fn answer_length_counts_utf16_units() {
        let accented = "é".repeat(MAX_ANSWER_LENGTH);
        assert!(validate_answer(&json!({ "content": accented })).is_ok());

        // Each emoji is a surrogate pair: 151 of them are 302 units.
        let emoji = "😀".repeat(151);
        assert_eq!(
            message(validate_answer(&json!({ "content": emoji }))),
            "Content must not exceed 300 characters"
        );
        assert!(validate_answer(&json!({ "content": "😀".repeat(150) })).is_ok());
    }

    #[test]
    fn non_string_answer_content_is_stored_as_text() {
        let answer = validate_answer(&json!({ "content": 12345 })).unwrap();
        assert_eq!(answer.content, "12345");

        let answer = validate_answer(&json!({ "content": true })).unwrap();
        assert_eq!(answer.content, "true");

        assert_eq!(
            message(validate_answer(&json!({ "content": 0 }))),
            "Content is required"
        );
    }

    #[test]
    fn only_plus_or_minus_one_are_votes() {
        assert_eq!(validate_vote(&json!({ "vote": 1 })).unwrap(), Vote::Up);
        assert_eq!(validate_vote(&json!({ "vote": -1 })).unwrap(), Vote::Down);
        assert_eq!(validate_vote(&json!({ "vote": 1.0 })).unwrap(), Vote::Up);

        for invalid in [json!(0), json!(2), json!(5), json!("yes"), json!("1"), json!(null)] {
            assert_eq!(
                message(validate_vote(&json!({ "vote": invalid }))),
                "Invalid vote value"
            );
        }
        assert_eq!(message(validate_vote(&json!({}))), "Invalid vote value");
    }
}
