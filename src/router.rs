use axum::{
    Json, Router,
    http::StatusCode,
    routing::get,
};

use crate::db::{CredentialStorage, SqlitePool, WebsiteStorage};
use crate::handlers::credentials::{
    add_handler, delete_handler, details_handler, list_handler, update_handler,
};
use crate::middleware::{SitekeepService, with_method_override};
use crate::types::envelope::ApiEnvelope;
use crate::types::resource::Resource;

/// Application state: the pool handle every storage is built from.
#[derive(Clone)]
pub struct SitekeepState {
    pool: SqlitePool,
}

impl SitekeepState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn for_resource(&self, resource: Resource) -> ResourceState {
        ResourceState {
            websites: WebsiteStorage::new(self.pool.clone()),
            credentials: CredentialStorage::new(self.pool.clone(), resource),
        }
    }
}

/// State of one `/api/{resource}` route group.
#[derive(Clone)]
pub struct ResourceState {
    pub websites: WebsiteStorage,
    pub credentials: CredentialStorage,
}

impl ResourceState {
    pub fn resource(&self) -> Resource {
        self.credentials.resource()
    }
}

pub fn sitekeep_router(state: SitekeepState) -> Router {
    let api = Resource::ALL
        .into_iter()
        .fold(Router::new(), |api, resource| {
            api.nest(
                &format!("/{}", resource.slug()),
                resource_router(state.for_resource(resource)),
            )
        });

    Router::new().nest("/api", api).fallback(not_found)
}

/// Full service as served: the router behind the method-override rewrite.
pub fn sitekeep_service(state: SitekeepState) -> SitekeepService {
    with_method_override(sitekeep_router(state))
}

fn resource_router(state: ResourceState) -> Router {
    Router::new()
        .route("/{website_id}", get(list_handler).post(add_handler))
        .route(
            "/{website_id}/{id}",
            get(details_handler)
                .put(update_handler)
                .patch(update_handler)
                .delete(delete_handler),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

async fn not_found() -> (StatusCode, Json<ApiEnvelope>) {
    (StatusCode::NOT_FOUND, Json(ApiEnvelope::failure("Not found")))
}

async fn method_not_allowed() -> (StatusCode, Json<ApiEnvelope>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiEnvelope::failure("Method not allowed")),
    )
}
