use handle_errors::unable_to;
use tracing::{event, instrument, Level};
use warp::http::StatusCode;

use crate::routes::{with_data, with_message};
use crate::store::DynStore;
use crate::types::{
    question::{QuestionBody, QuestionId},
    search::SearchParams,
};
use crate::validation::{validate_question_body, validate_search_param};

#[instrument(skip(store))]
pub async fn get_questions(store: DynStore) -> Result<impl warp::Reply, warp::Rejection> {
    event!(target: "q_and_a_forum", Level::INFO, "querying questions");
    let questions = store
        .get_questions()
        .await
        .map_err(unable_to("fetch questions"))?;

    Ok(with_data(questions, StatusCode::OK))
}

/// Zero matches is an empty list, not an error.
#[instrument(skip(store))]
pub async fn search_questions(
    params: SearchParams,
    store: DynStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    let filter = validate_search_param(params).map_err(warp::reject::custom)?;
    let questions = store
        .search_questions(&filter)
        .await
        .map_err(unable_to("fetch questions"))?;

    event!(
        target: "q_and_a_forum",
        Level::INFO,
        matches = questions.len(),
        "searched questions"
    );
    Ok(with_data(questions, StatusCode::OK))
}

#[instrument(skip(store))]
pub async fn get_question(id: i32, store: DynStore) -> Result<impl warp::Reply, warp::Rejection> {
    let question = store
        .get_question(QuestionId(id))
        .await
        .map_err(unable_to("fetch question"))?;

    Ok(with_data(question, StatusCode::OK))
}

#[instrument(skip(store))]
pub async fn add_question(
    store: DynStore,
    body: QuestionBody,
) -> Result<impl warp::Reply, warp::Rejection> {
    let new_question = validate_question_body(body).map_err(warp::reject::custom)?;
    let question = store
        .add_question(new_question)
        .await
        .map_err(unable_to("create question"))?;

    event!(target: "q_and_a_forum", Level::INFO, id = question.id.0, "question created");
    Ok(with_data(question, StatusCode::CREATED))
}

#[instrument(skip(store))]
pub async fn update_question(
    id: i32,
    store: DynStore,
    body: QuestionBody,
) -> Result<impl warp::Reply, warp::Rejection> {
    let question = validate_question_body(body).map_err(warp::reject::custom)?;
    let question = store
        .update_question(QuestionId(id), question)
        .await
        .map_err(unable_to("update question"))?;

    Ok(with_data(question, StatusCode::OK))
}

#[instrument(skip(store))]
pub async fn delete_question(id: i32, store: DynStore) -> Result<impl warp::Reply, warp::Rejection> {
    store
        .delete_question(QuestionId(id))
        .await
        .map_err(unable_to("delete question"))?;

    event!(target: "q_and_a_forum", Level::INFO, id, "question deleted");
    Ok(with_message(
        "Deleted question and answers successfully.",
        StatusCode::OK,
    ))
}
