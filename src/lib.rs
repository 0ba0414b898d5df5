#![warn(clippy::all)]

use std::sync::Arc;

use handle_errors::return_error;
use tracing_subscriber::fmt::format::FmtSpan;
use warp::{http::Method, Filter, Reply};

pub mod config;
pub mod routes;
pub mod store;
pub mod types;
pub mod validation;

use crate::config::Config;
use crate::store::{DynStore, PgStore};

pub fn init_tracing(log_level: &str) {
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        format!(
            "handle_errors={},q_and_a_forum={},warp={}",
            log_level, log_level, log_level
        )
    });

    tracing_subscriber::fmt()
        .with_env_filter(log_filter)
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

pub async fn setup_store(config: &Config) -> Result<DynStore, handle_errors::Error> {
    let store = PgStore::new(&config.database_url(), config.max_connections).await?;
    Ok(Arc::new(store))
}

pub fn build_routes(store: DynStore) -> impl Filter<Extract = impl Reply> + Clone {
    let store_filter = warp::any().map(move || store.clone());

    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(&[Method::PUT, Method::DELETE, Method::GET, Method::POST]);

    let health = warp::get()
        .and(warp::path("test"))
        .and(warp::path::end())
        .and_then(routes::health);

    let get_questions = warp::get()
        .and(warp::path("questions"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(routes::question::get_questions);

    let search_questions = warp::get()
        .and(warp::path("questions"))
        .and(warp::path("search"))
        .and(warp::path::end())
        .and(warp::query())
        .and(store_filter.clone())
        .and_then(routes::question::search_questions);

    let get_question = warp::get()
        .and(warp::path("questions"))
        .and(warp::path::param::<i32>())
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(routes::question::get_question);

    let add_question = warp::post()
        .and(warp::path("questions"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(routes::question::add_question);

    let update_question = warp::put()
        .and(warp::path("questions"))
        .and(warp::path::param::<i32>())
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(routes::question::update_question);

    let delete_question = warp::delete()
        .and(warp::path("questions"))
        .and(warp::path::param::<i32>())
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(routes::question::delete_question);

    let vote_on_question = warp::post()
        .and(warp::path("questions").or(warp::path("question")).unify())
        .and(warp::path::param::<i32>())
        .and(warp::path("vote"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(routes::vote::vote_on_question);

    let get_answers = warp::get()
        .and(warp::path("questions"))
        .and(warp::path::param::<i32>())
        .and(warp::path("answers"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(routes::answer::get_answers);

    let add_answer = warp::post()
        .and(warp::path("questions"))
        .and(warp::path::param::<i32>())
        .and(warp::path("answers"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(routes::answer::add_answer);

    let delete_answers = warp::delete()
        .and(warp::path("questions"))
        .and(warp::path::param::<i32>())
        .and(warp::path("answers"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(routes::answer::delete_answers);

    let vote_on_answer = warp::post()
        .and(warp::path("answers").or(warp::path("answer")).unify())
        .and(warp::path::param::<i32>())
        .and(warp::path("vote"))
        .and(warp::path::end())
        .and(store_filter)
        .and(warp::body::json())
        .and_then(routes::vote::vote_on_answer);

    health
        .or(get_questions)
        .or(search_questions)
        .or(get_question)
        .or(add_question)
        .or(update_question)
        .or(delete_question)
        .or(vote_on_question)
        .or(get_answers)
        .or(add_answer)
        .or(delete_answers)
        .or(vote_on_answer)
        .with(cors)
        .with(warp::trace(|info| {
            tracing::info_span!(
                "request",
                method = %info.method(),
                path = %info.path(),
                id = %uuid::Uuid::new_v4()
            )
        }))
        .recover(return_error)
}

pub async fn run(config: Config) -> Result<(), handle_errors::Error> {
    init_tracing(&config.log_level);

    let store = setup_store(&config).await?;
    let routes = build_routes(store);

    tracing::info!(
        port = config.port,
        "Q&A service build ID {}",
        env!("CARGO_PKG_VERSION")
    );
    warp::serve(routes).run(([0, 0, 0, 0], config.port)).await;

    Ok(())
}
