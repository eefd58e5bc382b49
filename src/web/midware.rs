use std::sync::Arc;

use axum::{
    http::{Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::web::{log, Error, REQUEST_ID_HEADER};

pub async fn response_mapper(req_method: Method, uri: Uri, resp: Response) -> Response {
    let req_id = resp
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|id| id.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let web_error = resp.extensions().get::<Arc<Error>>().map(Arc::as_ref);
    let client_status_and_error = web_error.map(Error::status_code_and_client_error);

    let err_resp = client_status_and_error
        .as_ref()
        .map(|(status, client_error)| {
            let client_error_body = json!({
                "error": {
                    "message": client_error.to_string(),
                    "req_id": req_id,
                }
            });

            (*status, Json(client_error_body)).into_response()
        });

    log::log_request(
        &req_id,
        req_method,
        uri,
        resp.status(),
        web_error,
        client_status_and_error,
    )
    .await;

    err_resp.unwrap_or(resp)
}
