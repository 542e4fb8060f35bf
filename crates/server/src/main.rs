// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use sibon_api::{
    AdminKeyResponse, ApiError, AuditLogQuery, AuditLogResponse, AvailabilityDayInfo, BookingInfo,
    ConfiguredResponse, CreateBookingRequest, HolidaysResponse, ListBookingsQuery,
    ListBookingsResponse, MonthAvailabilityResponse, PreparedAdminKey, QuoteRequest, QuoteResponse,
    RemoveBookingResponse, RotateAdminKeyRequest, ServiceConfig, SetAdminKeyRequest,
    SetDateAvailabilityRequest, SetMaxCapacityRequest, SetSeasonRangeRequest,
    SetSeasonRangeResponse, SettingsResponse, UpdateBookingRequest, UpdateStatusRequest,
    VerifyAdminKeyRequest, VerifyAdminKeyResponse,
};
use sibon_audit::Cause;
use sibon_domain::LodgeTimezone;
use sibon_persistence::Persistence;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Header carrying the admin key on admin-gated requests.
const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Header a client may use to correlate a request with its audit event.
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Sibon Server - HTTP server for the Sibon lodge booking system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// bcrypt cost used when hashing a new admin key
    #[arg(long, default_value_t = bcrypt::DEFAULT_COST)]
    admin_key_hash_cost: u32,

    /// IANA time zone of the lodge, used to decide which dates are past
    #[arg(long, default_value = "Africa/Johannesburg")]
    timezone: String,
}

/// Application state shared across handlers.
///
/// The persistence layer is wrapped in a Mutex so that each request runs
/// its store transaction alone. It is only locked from the blocking thread
/// pool, see [`AppState::with_persistence`].
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// Key policy, hash cost, time zone and rates.
    config: ServiceConfig,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { rule, .. } => {
                warn!(rule = %rule, error = %err, "Request rejected by rule");
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::InvalidInput { field, .. } => {
                warn!(field = %field, error = %err, "Invalid request");
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { resource_type, .. } => {
                info!(resource_type = %resource_type, "Resource not found");
                StatusCode::NOT_FOUND
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Returns the admin key sent with the request, if any.
fn admin_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(String::from)
}

/// Builds the audit cause of a request.
///
/// The client's request id is used when supplied; otherwise one is
/// generated.
fn request_cause(headers: &HeaderMap, description: &str) -> Cause {
    let id: String = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map_or_else(
            || format!("req-{}", REQUEST_COUNTER.fetch_add(1, Ordering::SeqCst) + 1),
            String::from,
        );
    Cause::new(id, String::from(description))
}

/// Runs synchronous work off the async workers.
///
/// # Errors
///
/// Returns an internal error if the blocking task panics or is cancelled.
async fn run_blocking<T, F>(work: F) -> Result<T, HttpError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal {
            message: format!("blocking task failed: {e}"),
        })?
        .map_err(HttpError::from)
}

impl AppState {
    /// Runs `work` against the persistence layer on the blocking thread pool.
    ///
    /// Store access and bcrypt verification are synchronous; the lock is
    /// held only for the duration of `work`.
    async fn with_persistence<T, F>(&self, work: F) -> Result<T, HttpError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Persistence, &ServiceConfig) -> Result<T, ApiError> + Send + 'static,
    {
        let persistence: Arc<Mutex<Persistence>> = Arc::clone(&self.persistence);
        let config: ServiceConfig = self.config;
        run_blocking(move || {
            let mut guard = persistence.blocking_lock();
            work(&mut guard, &config)
        })
        .await
    }
}

/// Handler for GET `/admin/configured`.
async fn handle_is_configured(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ConfiguredResponse>, HttpError> {
    let response: ConfiguredResponse = app_state
        .with_persistence(|persistence, _| sibon_api::is_configured(persistence))
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/admin/key`.
///
/// Sets the first admin key. Open to any caller until a key exists. The
/// key is hashed before the persistence lock is taken.
async fn handle_set_admin_key(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<SetAdminKeyRequest>,
) -> Result<Json<AdminKeyResponse>, HttpError> {
    info!("Handling set_admin_key request");

    let cause: Cause = request_cause(&headers, "Set admin key");
    let config: ServiceConfig = app_state.config;
    let prepared: PreparedAdminKey =
        run_blocking(move || sibon_api::prepare_admin_key(&req, &config)).await?;
    let response: AdminKeyResponse = app_state
        .with_persistence(move |persistence, _| {
            sibon_api::store_admin_key(persistence, prepared, cause, OffsetDateTime::now_utc())
        })
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/admin/key/rotate`.
///
/// The new key is hashed before the persistence lock is taken.
async fn handle_rotate_admin_key(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<RotateAdminKeyRequest>,
) -> Result<Json<AdminKeyResponse>, HttpError> {
    info!("Handling rotate_admin_key request");

    let cause: Cause = request_cause(&headers, "Rotate admin key");
    let config: ServiceConfig = app_state.config;
    let (current_key, prepared): (String, PreparedAdminKey) = run_blocking(move || {
        let prepared: PreparedAdminKey = sibon_api::prepare_rotated_admin_key(&req, &config)?;
        Ok((req.current_key, prepared))
    })
    .await?;
    let response: AdminKeyResponse = app_state
        .with_persistence(move |persistence, _| {
            sibon_api::store_rotated_admin_key(
                persistence,
                &current_key,
                prepared,
                cause,
                OffsetDateTime::now_utc(),
            )
        })
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/admin/verify`.
async fn handle_verify_admin_key(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<VerifyAdminKeyRequest>,
) -> Result<Json<VerifyAdminKeyResponse>, HttpError> {
    let response: VerifyAdminKeyResponse = app_state
        .with_persistence(move |persistence, _| {
            sibon_api::verify_admin_key_request(persistence, &req)
        })
        .await?;
    Ok(Json(response))
}

/// Handler for GET `/settings`.
async fn handle_get_settings(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<SettingsResponse>, HttpError> {
    let response: SettingsResponse = app_state
        .with_persistence(|persistence, _| sibon_api::get_settings(persistence))
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/settings/max_capacity`.
async fn handle_set_max_capacity(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<SetMaxCapacityRequest>,
) -> Result<Json<SettingsResponse>, HttpError> {
    info!(
        max_capacity = req.max_capacity,
        "Handling set_max_capacity request"
    );

    let cause: Cause = request_cause(&headers, "Set max capacity");
    let key: Option<String> = admin_key(&headers);
    let response: SettingsResponse = app_state
        .with_persistence(move |persistence, _| {
            sibon_api::set_max_capacity(
                persistence,
                key.as_deref(),
                &req,
                cause,
                OffsetDateTime::now_utc(),
            )
        })
        .await?;
    Ok(Json(response))
}

/// Handler for GET `/availability/{year}/{month}`.
async fn handle_get_month_availability(
    AxumState(app_state): AxumState<AppState>,
    Path((year, month)): Path<(i32, u8)>,
) -> Result<Json<MonthAvailabilityResponse>, HttpError> {
    let response: MonthAvailabilityResponse = app_state
        .with_persistence(move |persistence, config| {
            sibon_api::get_month_availability(
                persistence,
                year,
                month,
                config,
                OffsetDateTime::now_utc(),
            )
        })
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/availability/date`.
async fn handle_set_date_availability(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<SetDateAvailabilityRequest>,
) -> Result<Json<AvailabilityDayInfo>, HttpError> {
    info!(date = %req.date, "Handling set_date_availability request");

    let cause: Cause = request_cause(&headers, "Set date availability");
    let key: Option<String> = admin_key(&headers);
    let response: AvailabilityDayInfo = app_state
        .with_persistence(move |persistence, _| {
            sibon_api::set_date_availability(
                persistence,
                key.as_deref(),
                &req,
                cause,
                OffsetDateTime::now_utc(),
            )
        })
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/availability/season_range`.
async fn handle_set_season_range(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<SetSeasonRangeRequest>,
) -> Result<Json<SetSeasonRangeResponse>, HttpError> {
    info!(
        start = %req.start,
        end = %req.end,
        season = %req.season_type,
        "Handling set_season_range request"
    );

    let cause: Cause = request_cause(&headers, "Set season for range");
    let key: Option<String> = admin_key(&headers);
    let response: SetSeasonRangeResponse = app_state
        .with_persistence(move |persistence, _| {
            sibon_api::set_season_for_range(
                persistence,
                key.as_deref(),
                &req,
                cause,
                OffsetDateTime::now_utc(),
            )
        })
        .await?;
    Ok(Json(response))
}

/// Handler for GET `/bookings`.
async fn handle_list_bookings(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<ListBookingsResponse>, HttpError> {
    let response: ListBookingsResponse = app_state
        .with_persistence(move |persistence, config| {
            sibon_api::list_bookings(persistence, &query, config)
        })
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/bookings`.
///
/// Submits a booking request on behalf of a bungalow.
async fn handle_create_booking(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<BookingInfo>, HttpError> {
    info!(
        bungalow_number = %req.bungalow_number,
        check_in = %req.check_in,
        check_out = %req.check_out,
        "Handling create_booking request"
    );

    let cause: Cause = request_cause(&headers, "Booking request");
    let response: BookingInfo = app_state
        .with_persistence(move |persistence, _| {
            sibon_api::create_booking(persistence, &req, cause, OffsetDateTime::now_utc())
        })
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}`.
async fn handle_update_booking(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<UpdateBookingRequest>,
) -> Result<Json<BookingInfo>, HttpError> {
    info!(booking_id, "Handling update_booking request");

    let cause: Cause = request_cause(&headers, "Edit booking");
    let key: Option<String> = admin_key(&headers);
    let response: BookingInfo = app_state
        .with_persistence(move |persistence, _| {
            sibon_api::update_booking(
                persistence,
                key.as_deref(),
                booking_id,
                &req,
                cause,
                OffsetDateTime::now_utc(),
            )
        })
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/status`.
async fn handle_update_status(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<BookingInfo>, HttpError> {
    info!(booking_id, status = %req.status, "Handling update_status request");

    let cause: Cause = request_cause(&headers, "Update booking status");
    let key: Option<String> = admin_key(&headers);
    let response: BookingInfo = app_state
        .with_persistence(move |persistence, _| {
            sibon_api::update_status(
                persistence,
                key.as_deref(),
                booking_id,
                &req,
                cause,
                OffsetDateTime::now_utc(),
            )
        })
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/complete_stay`.
async fn handle_complete_stay(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<BookingInfo>, HttpError> {
    info!(booking_id, "Handling complete_stay request");

    let cause: Cause = request_cause(&headers, "Complete stay");
    let key: Option<String> = admin_key(&headers);
    let response: BookingInfo = app_state
        .with_persistence(move |persistence, _| {
            sibon_api::complete_stay(
                persistence,
                key.as_deref(),
                booking_id,
                cause,
                OffsetDateTime::now_utc(),
            )
        })
        .await?;
    Ok(Json(response))
}

/// Handler for DELETE `/bookings/{id}`.
async fn handle_remove_booking(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<RemoveBookingResponse>, HttpError> {
    info!(booking_id, "Handling remove_booking request");

    let cause: Cause = request_cause(&headers, "Remove booking");
    let key: Option<String> = admin_key(&headers);
    let response: RemoveBookingResponse = app_state
        .with_persistence(move |persistence, _| {
            sibon_api::remove_booking(
                persistence,
                key.as_deref(),
                booking_id,
                cause,
                OffsetDateTime::now_utc(),
            )
        })
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/quote`.
async fn handle_quote(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, HttpError> {
    let response: QuoteResponse = app_state
        .with_persistence(move |persistence, config| sibon_api::quote(persistence, &req, config))
        .await?;
    Ok(Json(response))
}

/// Handler for GET `/holidays/{year}`.
async fn handle_get_holidays(Path(year): Path<i32>) -> Result<Json<HolidaysResponse>, HttpError> {
    Ok(Json(sibon_api::get_holidays(year)?))
}

/// Handler for GET `/audit`.
async fn handle_get_audit_log(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<AuditLogQuery>,
) -> Result<Json<AuditLogResponse>, HttpError> {
    let key: Option<String> = admin_key(&headers);
    let response: AuditLogResponse = app_state
        .with_persistence(move |persistence, _| {
            sibon_api::get_audit_log(persistence, key.as_deref(), &query)
        })
        .await?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/admin/configured", get(handle_is_configured))
        .route("/admin/key", post(handle_set_admin_key))
        .route("/admin/key/rotate", post(handle_rotate_admin_key))
        .route("/admin/verify", post(handle_verify_admin_key))
        .route("/settings", get(handle_get_settings))
        .route("/settings/max_capacity", post(handle_set_max_capacity))
        .route(
            "/availability/{year}/{month}",
            get(handle_get_month_availability),
        )
        .route("/availability/date", post(handle_set_date_availability))
        .route("/availability/season_range", post(handle_set_season_range))
        .route(
            "/bookings",
            get(handle_list_bookings).post(handle_create_booking),
        )
        .route(
            "/bookings/{id}",
            post(handle_update_booking).delete(handle_remove_booking),
        )
        .route("/bookings/{id}/status", post(handle_update_status))
        .route("/bookings/{id}/complete_stay", post(handle_complete_stay))
        .route("/quote", post(handle_quote))
        .route("/holidays/{year}", get(handle_get_holidays))
        .route("/audit", get(handle_get_audit_log))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Sibon Server");

    let timezone: LodgeTimezone = LodgeTimezone::parse(&args.timezone)?;
    let config: ServiceConfig = ServiceConfig::new(args.admin_key_hash_cost, timezone);
    info!(timezone = timezone.name(), "Lodge time zone configured");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
