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
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use skyfare::{CityIndex, DEFAULT_LOCAL_LANGUAGE};
use skyfare_api::{
    ApiError, CaptureScanRequest, CaptureScanResponse, CatalogReloadResponse, CitySearchRequest,
    CitySearchResponse, CityTitleResponse, ClientConfig, DEFAULT_CITIES_URL,
    DEFAULT_DIRECTIONS_URL, DEFAULT_MONTHLY_URL, DEFAULT_REQUEST_CURRENCY, DeleteScanResponse,
    EnvToken, FareClient, FetchError, FlightListingResponse, FlightSearchRequest,
    PopularDirectionsRequest, PopularDirectionsResponse, ReqwestTransport, ResolveCityRequest,
    ResolveCityResponse, ScanFlightResponse, ScanHistoryResponse, StaticToken, TokenChain,
    TokenFile, capture_scan, city_title, delete_scan, list_scans, parse_scan_id,
    popular_directions, refresh_catalog, reload_catalog, resolve_city, scan_flight,
    search_cities, search_flights,
};
use skyfare_persistence::Persistence;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use uuid::Uuid;

/// SkyFare Server - HTTP server for fare search and ticket scans
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "SKYFARE_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "SKYFARE_PORT", default_value_t = 3000)]
    port: u16,

    /// API token for the fare provider. Takes precedence over the token file
    /// and the environment.
    #[arg(long)]
    token: Option<String>,

    /// TOML file holding `TRAVELPAYOUTS_TOKEN`
    #[arg(long)]
    token_file: Option<PathBuf>,

    /// Currency requested when a search does not name one
    #[arg(long, default_value = DEFAULT_REQUEST_CURRENCY)]
    currency: String,

    /// Translation key used for local-script city names
    #[arg(long, default_value = DEFAULT_LOCAL_LANGUAGE)]
    local_language: String,

    /// City catalog endpoint
    #[arg(long, default_value = DEFAULT_CITIES_URL)]
    cities_url: String,

    /// Monthly prices endpoint
    #[arg(long, default_value = DEFAULT_MONTHLY_URL)]
    monthly_url: String,

    /// Popular directions endpoint
    #[arg(long, default_value = DEFAULT_DIRECTIONS_URL)]
    directions_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = 20)]
    timeout_secs: u64,

    /// Do not fetch the city catalog at startup
    #[arg(long)]
    skip_catalog: bool,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The published city catalog.
    index: Arc<CityIndex>,
    /// Client for the fare provider.
    client: Arc<FareClient>,
    /// The scan store, behind a Mutex because the connection is not `Sync`.
    persistence: Arc<Mutex<Persistence>>,
}

/// Query string for GET `/cities/search`.
#[derive(Debug, Clone, Deserialize)]
struct CitySearchQuery {
    /// The free-text query.
    q: String,
    /// Maximum number of results.
    limit: Option<usize>,
}

/// Query string for GET `/cities/resolve`.
#[derive(Debug, Clone, Deserialize)]
struct ResolveCityQuery {
    /// Free text or a code.
    q: String,
}

/// Query string for GET `/flights`.
#[derive(Debug, Clone, Deserialize)]
struct FlightSearchQuery {
    origin: String,
    destination: String,
    currency: Option<String>,
    /// Departure date, `YYYY-MM-DD`.
    date: Option<String>,
    /// Search session; a newer search in the same session supersedes this one.
    session: Option<String>,
}

/// Query string for GET `/flights/popular`.
#[derive(Debug, Clone, Deserialize)]
struct PopularDirectionsQuery {
    origin: String,
    currency: Option<String>,
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
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Superseded { .. } => StatusCode::CONFLICT,
            ApiError::Upstream(FetchError::NoToken | FetchError::BadUrl(_))
            | ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        if status.is_server_error() {
            error!(error = %err, status = status.as_u16(), "Request failed");
        }

        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for GET `/cities/search` endpoint.
async fn handle_search_cities(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CitySearchQuery>,
) -> Json<CitySearchResponse> {
    info!(q = %query.q, "Handling search_cities request");

    let request: CitySearchRequest = CitySearchRequest {
        q: query.q,
        limit: query.limit,
    };
    Json(search_cities(&app_state.index, &request))
}

/// Handler for GET `/cities/resolve` endpoint.
async fn handle_resolve_city(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ResolveCityQuery>,
) -> Result<Json<ResolveCityResponse>, HttpError> {
    info!(q = %query.q, "Handling resolve_city request");

    let request: ResolveCityRequest = ResolveCityRequest { q: query.q };
    Ok(Json(resolve_city(&app_state.index, &request)?))
}

/// Handler for GET `/cities/{code}/title` endpoint.
async fn handle_city_title(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
) -> Json<CityTitleResponse> {
    Json(city_title(&app_state.index, &code))
}

/// Handler for POST `/catalog/reload` endpoint.
///
/// Refetches the catalog. On failure the current catalog stays published.
async fn handle_reload_catalog(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<CatalogReloadResponse>, HttpError> {
    info!("Handling reload_catalog request");

    let response: CatalogReloadResponse =
        reload_catalog(&app_state.client, &app_state.index).await?;
    Ok(Json(response))
}

/// Handler for GET `/flights` endpoint.
async fn handle_search_flights(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<FlightSearchQuery>,
) -> Result<Json<FlightListingResponse>, HttpError> {
    info!(
        origin = %query.origin,
        destination = %query.destination,
        session = ?query.session,
        "Handling search_flights request"
    );

    let request: FlightSearchRequest = FlightSearchRequest {
        origin: query.origin,
        destination: query.destination,
        currency: query.currency,
        date: query.date,
        session: query.session,
    };
    let response: FlightListingResponse =
        search_flights(&app_state.client, &app_state.index, &request).await?;
    Ok(Json(response))
}

/// Handler for GET `/flights/popular` endpoint.
async fn handle_popular_directions(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<PopularDirectionsQuery>,
) -> Result<Json<PopularDirectionsResponse>, HttpError> {
    info!(origin = %query.origin, "Handling popular_directions request");

    let request: PopularDirectionsRequest = PopularDirectionsRequest {
        origin: query.origin,
        currency: query.currency,
    };
    let response: PopularDirectionsResponse =
        popular_directions(&app_state.client, &app_state.index, &request).await?;
    Ok(Json(response))
}

/// Handler for POST `/scans` endpoint.
async fn handle_capture_scan(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<CaptureScanRequest>,
) -> Result<Json<CaptureScanResponse>, HttpError> {
    info!(len = request.raw_text.len(), "Handling capture_scan request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CaptureScanResponse =
        capture_scan(&mut persistence, &request, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/scans` endpoint.
async fn handle_list_scans(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ScanHistoryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ScanHistoryResponse = list_scans(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/scans/{id}/flight` endpoint.
async fn handle_scan_flight(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ScanFlightResponse>, HttpError> {
    let scan_id: Uuid = parse_scan_id(&id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ScanFlightResponse =
        scan_flight(&mut persistence, scan_id, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/scans/{id}` endpoint.
async fn handle_delete_scan(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteScanResponse>, HttpError> {
    let scan_id: Uuid = parse_scan_id(&id)?;
    info!(id = %scan_id, "Handling delete_scan request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteScanResponse = delete_scan(&mut persistence, scan_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/cities/search", get(handle_search_cities))
        .route("/cities/resolve", get(handle_resolve_city))
        .route("/cities/{code}/title", get(handle_city_title))
        .route("/catalog/reload", post(handle_reload_catalog))
        .route("/flights", get(handle_search_flights))
        .route("/flights/popular", get(handle_popular_directions))
        .route("/scans", post(handle_capture_scan).get(handle_list_scans))
        .route("/scans/{id}/flight", get(handle_scan_flight))
        .route("/scans/{id}", delete(handle_delete_scan))
        .with_state(app_state)
}

/// Builds the fare client configuration from the command line.
fn client_config(args: &Args) -> ClientConfig {
    ClientConfig {
        monthly_url: args.monthly_url.clone(),
        directions_url: args.directions_url.clone(),
        cities_url: args.cities_url.clone(),
        default_currency: args.currency.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
    }
}

/// Builds the token chain: command line, then token file, then environment.
fn build_token_chain(args: &Args) -> TokenChain {
    let mut chain: TokenChain = TokenChain::new();
    if let Some(token) = &args.token {
        chain = chain.with(StaticToken::new(token));
    }
    if let Some(path) = &args.token_file {
        chain = chain.with(TokenFile::new(path));
    }
    chain.with(EnvToken::default())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing SkyFare Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let config: ClientConfig = client_config(&args);
    let transport: ReqwestTransport = ReqwestTransport::new(config.timeout)?;
    let client: FareClient = FareClient::new(
        Arc::new(transport),
        Arc::new(build_token_chain(&args)),
        config,
    );

    let app_state: AppState = AppState {
        index: Arc::new(CityIndex::new(&args.local_language)),
        client: Arc::new(client),
        persistence: Arc::new(Mutex::new(persistence)),
    };

    if args.skip_catalog {
        info!("Skipping city catalog fetch");
    } else {
        let client: Arc<FareClient> = Arc::clone(&app_state.client);
        let index: Arc<CityIndex> = Arc::clone(&app_state.index);
        tokio::spawn(async move {
            if let Err(e) = refresh_catalog(&client, &index).await {
                warn!(error = %e, "Initial city catalog fetch failed; searches fall back to codes");
            }
        });
    }

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
