use handle_errors::unable_to;
use tracing::{event, instrument, Level};
use warp::http::StatusCode;

use crate::routes::with_message;
use crate::store::DynStore;
use crate::types::{answer::AnswerId, question::QuestionId, vote::VoteBody};
use crate::validation::validate_vote;

#[instrument(skip(store))]
pub async fn vote_on_question(
    id: i32,
    store: DynStore,
    body: VoteBody,
) -> Result<impl warp::Reply, warp::Rejection> {
    let vote = validate_vote(body).map_err(warp::reject::custom)?;
    store
        .add_question_vote(QuestionId(id), vote)
        .await
        .map_err(unable_to("vote on question"))?;

    event!(target: "q_and_a_forum", Level::INFO, id, vote = vote.value(), "question vote recorded");
    Ok(with_message(
        "Vote on the question has been recorded successfully.",
        StatusCode::CREATED,
    ))
}

#[instrument(skip(store))]
pub async fn vote_on_answer(
    id: i32,
    store: DynStore,
    body: VoteBody,
) -> Result<impl warp::Reply, warp::Rejection> {
    let vote = validate_vote(body).map_err(warp::reject::custom)?;
    store
        .add_answer_vote(AnswerId(id), vote)
        .await
        .map_err(unable_to("vote on answer"))?;

    event!(target: "q_and_a_forum", Level::INFO, id, vote = vote.value(), "answer vote recorded");
    Ok(with_message(
        "Vote on the answer has been recorded successfully.",
        StatusCode::CREATED,
    ))
}
