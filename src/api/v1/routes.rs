/*
 * Responsibility
 * - v1 URL layout
 * - which gate guards which group (route_layer, so unmatched paths stay 404)
 *
 *   public: POST /users/login, POST /admin/login
 *   user:   GET  /me
 *   admin:  GET  /admin/me
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{admin, users};
use crate::middleware::auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/users/login", post(users::login))
        .route("/admin/login", post(admin::login));

    let user = auth::user::apply(Router::new().route("/me", get(users::me)), state.clone());

    let admin = auth::admin::apply(Router::new().route("/admin/me", get(admin::me)), state);

    public.merge(user).merge(admin)
}
