use actix_web::{HttpResponse, Responder, post, web};
use serde::Deserialize;
use serde_json::Value;

use super::error_response;
use crate::judge::Judge;

/// Body shared by the run and submit endpoints.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CodeRequest {
    pub code: String,
    pub language: String,
    pub question_id: String,
    /// JSON text of extra tests; any other JSON type is ignored
    #[serde(default)]
    pub custom_tests: Option<Value>,
}

impl CodeRequest {
    pub fn custom_tests(&self) -> Option<&str> {
        let raw = self.custom_tests.as_ref()?;
        let text = raw.as_str();
        if text.is_none() && !raw.is_null() {
            log::debug!("Ignoring customTests for {}: not a string", self.question_id);
        }
        text
    }
}

#[post("/api/code/run")]
pub async fn run_code_handler(judge: web::Data<Judge>, body: web::Json<CodeRequest>) -> impl Responder {
    let request = body.into_inner();
    match judge
        .run(
            &request.question_id,
            &request.language,
            &request.code,
            request.custom_tests(),
        )
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => error_response(&e),
    }
}

#[post("/api/code/submit")]
pub async fn submit_code_handler(
    judge: web::Data<Judge>,
    body: web::Json<CodeRequest>,
) -> impl Responder {
    let request = body.into_inner();
    match judge
        .submit(
            &request.question_id,
            &request.language,
            &request.code,
            request.custom_tests(),
        )
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => error_response(&e),
    }
}
