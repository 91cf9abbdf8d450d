//! Academy Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};
use std::sync::Arc;

use auth::middleware::{AuthMiddlewareState, require_auth};

use crate::application::config::AcademyConfig;
use crate::domain::repository::{
    BranchRepository, CourseRequestRepository, StudyMaterialRepository,
};
use crate::infra::material_store::FsMaterialStore;
use crate::infra::postgres::PgAcademyStore;
use crate::presentation::handlers::{self, AcademyAppState};

/// Create the academy router with the PostgreSQL store
pub fn academy_router(
    store: PgAcademyStore,
    config: AcademyConfig,
    auth_state: AuthMiddlewareState,
) -> Router {
    academy_router_generic(store, config, auth_state)
}

/// Create the academy router for any repository implementation
pub fn academy_router_generic<R>(
    repo: R,
    config: AcademyConfig,
    auth_state: AuthMiddlewareState,
) -> Router
where
    R: BranchRepository
        + CourseRequestRepository
        + StudyMaterialRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let state = AcademyAppState {
        repo: Arc::new(repo),
        store: Arc::new(FsMaterialStore::new(config.materials_dir)),
    };

    // The file endpoint stays open so external PDF viewers can fetch by
    // URL; everything else behind it is token-gated
    let public = Router::new()
        .route("/branches", get(handlers::branches_list::<R>))
        .route("/materials/{id}/file", get(handlers::material_file::<R>));

    let protected = Router::new()
        .route("/courserequest", get(handlers::my_requests::<R>))
        .route("/admin/dashboard", get(handlers::admin_dashboard::<R>))
        .route(
            "/courserequests/{id}/update",
            patch(handlers::review_request::<R>),
        )
        .route("/materials", get(handlers::materials_list::<R>))
        .route("/materials/upload", post(handlers::material_upload::<R>))
        .route_layer(from_fn_with_state(auth_state, require_auth));

    public.merge(protected).with_state(state)
}
