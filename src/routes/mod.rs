use serde::Serialize;
use warp::{http::StatusCode, reply};

pub mod answer;
pub mod question;
pub mod vote;

#[derive(Serialize)]
struct Data<T> {
    data: T,
}

#[derive(Serialize)]
struct Message {
    message: &'static str,
}

/// `{"data": ...}` envelope for successful payloads.
pub fn with_data<T: Serialize>(data: T, status: StatusCode) -> reply::WithStatus<reply::Json> {
    reply::with_status(reply::json(&Data { data }), status)
}

/// `{"message": ...}` envelope for successes that carry no payload.
pub fn with_message(message: &'static str, status: StatusCode) -> reply::WithStatus<reply::Json> {
    reply::with_status(reply::json(&Message { message }), status)
}

pub async fn health() -> Result<impl warp::Reply, warp::Rejection> {
    Ok(reply::json(&"Server API is working 🚀"))
}
