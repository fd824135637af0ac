#![warn(clippy::all)]
pub use handle_errors;
use tracing::Span;
use tracing_subscriber::fmt::format::FmtSpan;
use warp::{Filter, Reply, http::Method, trace::Info};

pub mod config;
mod routes;
pub mod store;
pub mod types;
pub mod validation;
use routes::answer::{add_answer, delete_answers, get_answers};
use routes::question::{
    add_question, delete_question, get_question, get_questions, search_questions, update_question,
};
use routes::vote::{vote_answer, vote_question};
use store::{SharedStore, Store};
use validation::{answer_body, question_body, vote_body};

pub const HEALTH_MESSAGE: &str = "Server API is working 🚀";

/// Request headers browsers may ask for in a preflight.
const CORS_HEADERS: [&str; 9] = [
    "accept",
    "accept-language",
    "authorization",
    "cache-control",
    "content-language",
    "content-type",
    "origin",
    "x-request-id",
    "x-requested-with",
];

fn request_span(
    route: &'static str,
) -> warp::trace::Trace<impl Fn(Info<'_>) -> Span + Clone + Send> {
    warp::trace(move |info: Info<'_>| {
        tracing::info_span!(
            "request",
            route,
            method = %info.method(),
            path = %info.path(),
            id = %uuid::Uuid::new_v4(),
        )
    })
}

pub async fn build_routes(store: SharedStore) -> impl Filter<Extract = impl Reply> + Clone {
    let store_filter = warp::any().map(move || store.clone());

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(CORS_HEADERS)
        .allow_methods(&[
            Method::PUT,
            Method::DELETE,
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::HEAD,
        ]);

    let health = warp::get()
        .and(warp::path("test"))
        .and(warp::path::end())
        .map(|| warp::reply::json(&HEALTH_MESSAGE))
        .with(request_span("health"));

    let get_questions = warp::get()
        .and(warp::path("questions"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(get_questions)
        .with(request_span("get_questions"));

    let search_questions = warp::get()
        .and(warp::path("questions"))
        .and(warp::path("search"))
        .and(warp::path::end())
        .and(warp::query())
        .and(store_filter.clone())
        .and_then(search_questions)
        .with(request_span("search_questions"));

    let get_question = warp::get()
        .and(warp::path("questions"))
        .and(warp::path::param::<i32>())
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(get_question)
        .with(request_span("get_question"));

    let add_question = warp::post()
        .and(warp::path("questions"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(question_body())
        .and_then(add_question)
        .with(request_span("add_question"));

    let update_question = warp::put()
        .and(warp::path("questions"))
        .and(warp::path::param::<i32>())
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(question_body())
        .and_then(update_question)
        .with(request_span("update_question"));

    let delete_question = warp::delete()
        .and(warp::path("questions"))
        .and(warp::path::param::<i32>())
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(delete_question)
        .with(request_span("delete_question"));

    let add_answer = warp::post()
        .and(warp::path("questions"))
        .and(warp::path::param::<i32>())
        .and(warp::path("answers"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(answer_body())
        .and_then(add_answer)
        .with(request_span("add_answer"));

    let get_answers = warp::get()
        .and(warp::path("questions"))
        .and(warp::path::param::<i32>())
        .and(warp::path("answers"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(get_answers)
        .with(request_span("get_answers"));

    let delete_answers = warp::delete()
        .and(warp::path("questions"))
        .and(warp::path::param::<i32>())
        .and(warp::path("answers"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(delete_answers)
        .with(request_span("delete_answers"));

    let vote_question = warp::put()
        .and(warp::path("questions"))
        .and(warp::path::param::<i32>())
        .and(warp::path("vote"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(vote_body())
        .and_then(vote_question)
        .with(request_span("vote_question"));

    let vote_answer = warp::put()
        .and(warp::path("questions"))
        .and(warp::path("answers"))
        .and(warp::path::param::<i32>())
        .and(warp::path("vote"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(vote_body())
        .and_then(vote_answer)
        .with(request_span("vote_answer"));

    health
        .or(get_questions)
        .or(search_questions)
        .or(get_question)
        .or(add_question)
        .or(update_question)
        .or(delete_question)
        .or(add_answer)
        .or(get_answers)
        .or(delete_answers)
        .or(vote_question)
        .or(vote_answer)
        .with(cors)
        .with(warp::trace::request())
        .recover(handle_errors::return_error)
}

pub async fn setup_store(config: &config::Config) -> Result<Store, handle_errors::Error> {
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        format!(
            "handle_errors={},questions_api={},warp={}",
            config.log_level, config.log_level, config.log_level
        )
    });

    tracing_subscriber::fmt()
        // Use the filter we built above to determine which traces to record.
        .with_env_filter(log_filter)
        // Record an event when each span closes, which times every route.
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let store = Store::new(&config.database_url())
        .await
        .map_err(handle_errors::Error::DatabaseQueryError)?;

    Ok(store)
}

pub async fn run(config: config::Config, store: SharedStore) {
    let routes = build_routes(store).await;
    tracing::info!("listening on port {}", config.port);
    warp::serve(routes).run(([0, 0, 0, 0], config.port)).await;
}
