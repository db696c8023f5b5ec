//! HTTP surface for the properties service.
//!
//! Every request gets its own [`PropertiesService`] and therefore its own unit
//! of work. JSON bodies use camelCase field names.
use crate::entities::{property, property_trace};
use crate::errors::PropertiesError;
use crate::service::{PropertiesService, PropertyListing};
use crate::settings::Settings;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use futures::TryStreamExt;
use sea_orm::prelude::{Decimal, Uuid};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub db: DatabaseConnection,
}

impl AppState {
    fn service(&self) -> PropertiesService {
        PropertiesService::scoped(&self.db, self.settings.database.page_size)
    }
}

impl IntoResponse for PropertiesError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match &self {
            PropertiesError::Service { .. } if status == StatusCode::NOT_FOUND => "not_found",
            PropertiesError::Service { .. } => "service_error",
            PropertiesError::BadRequest(_) => "bad_request",
            _ => "internal_error",
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        (
            status,
            Json(json!({"error": error, "message": self.to_string()})),
        )
            .into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/owners", post(add_owner))
        .route("/api/properties", get(list_properties).post(add_property))
        .route(
            "/api/properties/{property_id}/image",
            get(get_property_image).put(update_property_image),
        )
        .route(
            "/api/properties/{property_id}/price",
            put(update_property_price),
        )
        .route(
            "/api/properties/{property_id}/traces",
            get(list_property_traces).post(add_property_trace),
        )
        .layer(cors())
        .with_state(state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
}

pub async fn serve(settings: Settings, db: DatabaseConnection) -> Result<(), PropertiesError> {
    let addr = settings.listen_addr();
    let state = AppState {
        settings: Arc::new(settings),
        db,
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Properties API listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewOwner {
    name: String,
}

async fn add_owner(
    State(state): State<AppState>,
    Json(body): Json<NewOwner>,
) -> Result<impl IntoResponse, PropertiesError> {
    let owner = state.service().add_owner(body.name).await?;
    Ok((StatusCode::CREATED, Json(owner)))
}

async fn add_property(
    State(state): State<AppState>,
    Json(property): Json<property::Model>,
) -> Result<impl IntoResponse, PropertiesError> {
    let added = state.service().add_property(property).await?;
    Ok((StatusCode::CREATED, Json(added)))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    text: Option<String>,
}

async fn list_properties(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<PropertyListing>>, PropertiesError> {
    let service = state.service();
    let listings: Vec<PropertyListing> = match q.text.as_deref() {
        Some(text) => service.get_properties_matching(text).try_collect().await?,
        None => service.get_properties().try_collect().await?,
    };
    Ok(Json(listings))
}

async fn update_property_image(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<StatusCode, PropertiesError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PropertiesError::BadRequest(e.body_text()))?
    {
        // Plain form fields carry no file name; skip them.
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| PropertiesError::BadRequest(e.body_text()))?;
        upload = Some((file_name, bytes.to_vec()));
        break;
    }

    let (file_name, bytes) = upload.ok_or_else(|| {
        PropertiesError::BadRequest("multipart body must contain a file".to_string())
    })?;
    state
        .service()
        .update_property_image(property_id, bytes, file_name)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn get_property_image(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
) -> Result<Response, PropertiesError> {
    let image = state
        .service()
        .find_property_image(property_id)
        .await?
        .ok_or_else(|| {
            PropertiesError::not_found("Image not found for related property identifier")
        })?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        image.file_name.replace('"', "")
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        image.file,
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
struct PriceUpdate {
    price: Decimal,
}

async fn update_property_price(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
    Json(body): Json<PriceUpdate>,
) -> Result<Json<property::Model>, PropertiesError> {
    let updated = state
        .service()
        .update_property_price(property_id, body.price)
        .await?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
struct NewTrace {
    name: String,
    value: Decimal,
    tax: Decimal,
}

async fn add_property_trace(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
    Json(body): Json<NewTrace>,
) -> Result<impl IntoResponse, PropertiesError> {
    let added = state
        .service()
        .add_property_trace(property_trace::Model {
            id: Uuid::nil(),
            property_id,
            name: body.name,
            value: body.value.into(),
            tax: body.tax.into(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(added)))
}

async fn list_property_traces(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<Vec<property_trace::Model>>, PropertiesError> {
    let service = state.service();
    let traces: Vec<property_trace::Model> = service
        .get_traces_by_property(property_id)
        .try_collect()
        .await?;
    Ok(Json(traces))
}
