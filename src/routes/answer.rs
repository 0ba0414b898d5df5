use handle_errors::unable_to;
use tracing::{event, instrument, Level};
use warp::http::StatusCode;

use crate::routes::{with_data, with_message};
use crate::store::DynStore;
use crate::types::{answer::AnswerBody, question::QuestionId};
use crate::validation::validate_answer_body;

#[instrument(skip(store))]
pub async fn get_answers(
    question_id: i32,
    store: DynStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    let answers = store
        .get_answers(QuestionId(question_id))
        .await
        .map_err(unable_to("fetch answers"))?;

    Ok(with_data(answers, StatusCode::OK))
}

#[instrument(skip(store))]
pub async fn add_answer(
    question_id: i32,
    store: DynStore,
    body: AnswerBody,
) -> Result<impl warp::Reply, warp::Rejection> {
    let new_answer = validate_answer_body(body).map_err(warp::reject::custom)?;
    let answer = store
        .add_answer(QuestionId(question_id), new_answer)
        .await
        .map_err(unable_to("create answer"))?;

    Ok(with_data(answer, StatusCode::CREATED))
}

#[instrument(skip(store))]
pub async fn delete_answers(
    question_id: i32,
    store: DynStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    let deleted = store
        .delete_answers(QuestionId(question_id))
        .await
        .map_err(unable_to("delete answers"))?;

    event!(target: "q_and_a_forum", Level::INFO, question_id, deleted, "answers deleted");
    Ok(with_message(
        "All answers for the question have been deleted successfully.",
        StatusCode::OK,
    ))
}
