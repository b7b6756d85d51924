use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_sessions::Session;

use super::session::LOGIN_INFO_KEY;
use super::LOGIN_PATH;
use crate::accounts::LoginInfo;
use crate::link::concat_link;

struct RegistryState {
    front_url: String,
    providers: Vec<String>,
}

/// `GET /auth` and `GET /providers`.
pub(crate) fn router(front_url: String, providers: Vec<String>) -> Router {
    Router::new()
        .route("/auth", get(login_info))
        .route("/providers", get(list_providers))
        .with_state(Arc::new(RegistryState {
            front_url,
            providers,
        }))
}

/// The login stored by a provider callback, or a redirect to the login page.
async fn login_info(State(state): State<Arc<RegistryState>>, session: Session) -> Response {
    match session.get::<LoginInfo>(LOGIN_INFO_KEY).await {
        Ok(Some(info)) => Json(info).into_response(),
        Ok(None) => login_redirect(&state),
        Err(e) => {
            tracing::warn!("Failed to read login info from session: {}", e);
            login_redirect(&state)
        }
    }
}

fn login_redirect(state: &RegistryState) -> Response {
    Redirect::to(&concat_link(&state.front_url, LOGIN_PATH)).into_response()
}

async fn list_providers(State(state): State<Arc<RegistryState>>) -> Json<Vec<String>> {
    Json(state.providers.clone())
}
