mod code;

pub use code::*;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, Responder, get};
use serde::Serialize;

use crate::error::JudgeError;

#[derive(Serialize)]
struct ErrorResponseWithMessage {
    reason: &'static str,
    code: u32,
    message: String,
}

/// Rejects bodies whose `code`, `language` or `questionId` is missing or not a string
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = JudgeError::InvalidRequestShape(err.to_string()).to_string();
    let response = HttpResponse::BadRequest().json(ErrorResponseWithMessage {
        reason: "ERR_INVALID_ARGUMENT",
        code: 1,
        message,
    });
    InternalError::from_response(err, response).into()
}

pub(crate) fn error_response(err: &JudgeError) -> HttpResponse {
    if err.is_client_error() {
        log::info!("Rejected request: {err}");
    } else {
        log::error!("Request failed: {err}");
    }

    let message = err.to_string();
    match err {
        JudgeError::InvalidRequestShape(_)
        | JudgeError::UnsupportedProblem { .. }
        | JudgeError::MalformedTestCase { .. } => {
            HttpResponse::BadRequest().json(ErrorResponseWithMessage {
                reason: "ERR_INVALID_ARGUMENT",
                code: 1,
                message,
            })
        }
        JudgeError::ProblemNotFound(_) => HttpResponse::NotFound().json(ErrorResponseWithMessage {
            reason: "ERR_NOT_FOUND",
            code: 3,
            message,
        }),
        JudgeError::UnsupportedLanguage(_) | JudgeError::GatewayUnavailable(_) => {
            HttpResponse::BadGateway().json(ErrorResponseWithMessage {
                reason: "ERR_EXTERNAL",
                code: 5,
                message,
            })
        }
    }
}

#[get("/health")]
pub async fn health() -> impl Responder {
    "OK"
}
