use crate::directory::UserDirectory;
use axum::extract::State;
use axum::Json;
use cardroom_core::api::login;
use std::sync::Arc;

/// This should be the same for both missing accounts and incorrect
/// passwords so as not to give additional information about what accounts
/// exist to someone probing the system.
static BAD_LOGIN_MESSAGE: &str = "Invalid credentials";

/// Decide whether a credentials pair may sign in. Both verdicts ride in a
/// `200`; a rejection is data for the client to show, not an HTTP error.
#[tracing::instrument(skip(directory, req))]
pub async fn handler(
    State(directory): State<Arc<UserDirectory>>,
    Json(req): Json<login::Req>,
) -> Json<login::Resp> {
    if directory.check(&req.username, &req.password) {
        tracing::info!("accepted a login");

        Json(login::Resp {
            success: true,
            message: None,
        })
    } else {
        tracing::info!("rejected a login");

        Json(login::Resp {
            success: false,
            message: Some(BAD_LOGIN_MESSAGE.to_string()),
        })
    }
}
