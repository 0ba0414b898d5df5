use serde::Serialize;
use tracing::{event, instrument, Level};
use warp::{
    filters::{body::BodyDeserializeError, cors::CorsForbidden},
    http::StatusCode,
    reject::{InvalidQuery, Reject},
    Rejection, Reply,
};

#[derive(Debug)]
pub enum Error {
    ParseError(std::num::ParseIntError),
    MissingField(&'static str),
    InvalidLength,
    InvalidCategory,
    InvalidVote,
    QuestionNotFound,
    AnswerNotFound,
    NoAnswers,
    DatabaseQueryError(sqlx::Error),
    ServiceFault(&'static str),
}

#[derive(Debug, Serialize)]
struct ErrorMessage {
    message: String,
}

fn with_message(
    message: impl Into<String>,
    status: StatusCode,
) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&ErrorMessage {
            message: message.into(),
        }),
        status,
    )
}

#[instrument]
pub async fn return_error(r: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(error) = r.find::<Error>() {
        let status = error.status();
        if status.is_server_error() {
            event!(Level::ERROR, "{:?}", error);
        } else {
            event!(Level::WARN, "{}", error);
        }
        Ok(with_message(error.to_string(), status))
    } else if let Some(error) = r.find::<CorsForbidden>() {
        Ok(with_message(error.to_string(), StatusCode::FORBIDDEN))
    } else if let Some(error) = r.find::<BodyDeserializeError>() {
        event!(Level::WARN, "{}", error);
        Ok(with_message(error.to_string(), StatusCode::BAD_REQUEST))
    } else if let Some(error) = r.find::<InvalidQuery>() {
        Ok(with_message(error.to_string(), StatusCode::BAD_REQUEST))
    } else {
        Ok(with_message("Route not found", StatusCode::NOT_FOUND))
    }
}

/// Turns a failed store call into the rejection a handler answers with.
///
/// Data-access faults become a [`Error::ServiceFault`] carrying `action`, so
/// the client only ever sees the generic message; the cause was already
/// logged by the store. Not-found errors pass through unchanged.
pub fn unable_to(action: &'static str) -> impl Fn(Error) -> Rejection {
    move |error| match error {
        Error::DatabaseQueryError(_) => warp::reject::custom(Error::ServiceFault(action)),
        other => warp::reject::custom(other),
    }
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::ParseError(_)
            | Error::MissingField(_)
            | Error::InvalidLength
            | Error::InvalidCategory
            | Error::InvalidVote => StatusCode::BAD_REQUEST,
            Error::QuestionNotFound | Error::AnswerNotFound | Error::NoAnswers => {
                StatusCode::NOT_FOUND
            }
            Error::DatabaseQueryError(_) | Error::ServiceFault(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::ParseError(err) => {
                write!(f, "Cannot parse parameter: {}", err)
            }
            Error::MissingField(field) => write!(f, "{} is required.", field),
            Error::InvalidLength => write!(
                f,
                "content must be filled and no more than 300 characters."
            ),
            Error::InvalidCategory => write!(f, "Invalid category."),
            Error::InvalidVote => write!(f, "Invalid vote value."),
            Error::QuestionNotFound => write!(f, "Question not found."),
            Error::AnswerNotFound => write!(f, "Answer not found."),
            Error::NoAnswers => write!(f, "There is no answer for this question."),
            // Never shown to clients: handlers convert it with `unable_to`.
            Error::DatabaseQueryError(_) => write!(f, "Unable to complete the request."),
            Error::ServiceFault(action) => write!(f, "Unable to {}.", action),
        }
    }
}

impl Reject for Error {}
