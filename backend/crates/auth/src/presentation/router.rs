//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use platform::mailer::Mailer;

use crate::application::config::AuthConfig;
use crate::domain::repository::{EnrollmentPort, SessionRepository, UserRepository};
use crate::infra::postgres::PgAuthStore;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_auth};

/// Create the auth router with the PostgreSQL store
pub fn auth_router<E, M>(store: PgAuthStore, enrollment: E, mailer: M, config: AuthConfig) -> Router
where
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    auth_router_generic(store, enrollment, mailer, config)
}

/// Create the auth router for any repository implementation
pub fn auth_router_generic<R, E, M>(
    repo: R,
    enrollment: E,
    mailer: M,
    config: AuthConfig,
) -> Router
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let state = AuthAppState {
        repo: Arc::new(repo),
        enrollment: Arc::new(enrollment),
        mailer: Arc::new(mailer),
        config: config.clone(),
    };
    let mw_state = AuthMiddlewareState { config };

    let public = Router::new()
        .route("/signup", post(handlers::sign_up::<R, E, M>))
        .route("/verify-otp", post(handlers::verify_otp::<R, E, M>))
        .route("/resend-otp", post(handlers::resend_otp::<R, E, M>))
        .route("/login", post(handlers::login::<R, E, M>))
        .route("/login/refresh", post(handlers::refresh::<R, E, M>))
        .route(
            "/password-reset-otp",
            post(handlers::password_reset_request::<R, E, M>),
        )
        .route(
            "/password-reset-confirm",
            post(handlers::password_reset_confirm::<R, E, M>),
        );

    let protected = Router::new()
        .route(
            "/student/dashboard",
            get(handlers::student_dashboard::<R, E, M>),
        )
        .route(
            "/profile",
            get(handlers::profile_get::<R, E, M>).patch(handlers::profile_update::<R, E, M>),
        )
        .route("/admin/students", get(handlers::students_list::<R, E, M>))
        .route(
            "/admin/students/{id}",
            get(handlers::student_get::<R, E, M>)
                .patch(handlers::student_update::<R, E, M>)
                .delete(handlers::student_delete::<R, E, M>),
        )
        .route_layer(from_fn_with_state(mw_state, require_auth));

    public.merge(protected).with_state(state)
}
