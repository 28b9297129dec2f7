use crate::repos::{FetchError, RepoRecord, RepoSource, OWNER};
use crate::telemetry::{self, log_event, LogLevel};
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use futures_util::StreamExt;
use serde_json::json;
use std::{
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tokio::{
    sync::{Mutex, RwLock},
    time::Instant,
};
use tower_http::services::{ServeDir, ServeFile};
use url::Url;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 6_000;
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 3_000;
const DEFAULT_RESPONSE_MAX_BYTES: usize = 512 * 1024;

const CACHE_TTL_SECONDS_BOUNDS: (u64, u64) = (1, 86_400);
const REQUEST_TIMEOUT_MS_BOUNDS: (u64, u64) = (100, 120_000);
const CONNECT_TIMEOUT_MS_BOUNDS: (u64, u64) = (100, 30_000);
const RESPONSE_MAX_BYTES_BOUNDS: (usize, usize) = (1_024, 10 * 1024 * 1024);
const USER_AGENT: &str = "dinonuwg-portfolio/0.1";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const REQUEST_ID_HEADER: &str = "x-request-id";
const CACHE_STATUS_HEADER: &str = "x-cache";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Debug)]
struct ServerConfig {
    port: u16,
    owner: String,
    api_base: Url,
    cache_ttl: Duration,
    request_timeout: Duration,
    connect_timeout: Duration,
    response_max_bytes: usize,
    dist_dir: PathBuf,
    log_level: LogLevel,
}

impl ServerConfig {
    fn from_env() -> Result<Self, url::ParseError> {
        let port = env_value("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let owner = env_value("REPOS_OWNER").unwrap_or_else(|| OWNER.to_string());
        let api_base = match env_value("REPOS_API_BASE").and_then(|value| parse_http_url(&value)) {
            Some(url) => url,
            None => Url::parse(DEFAULT_API_BASE)?,
        };
        let cache_ttl_seconds = bounded_u64(
            env_value("REPOS_CACHE_TTL_SECONDS").as_deref(),
            DEFAULT_CACHE_TTL_SECONDS,
            CACHE_TTL_SECONDS_BOUNDS,
        );
        let request_timeout_ms = timeout_ms_with_legacy_seconds(
            env_value("REPOS_REQUEST_TIMEOUT_MS").as_deref(),
            env_value("REPOS_REQUEST_TIMEOUT_SECONDS").as_deref(),
            DEFAULT_REQUEST_TIMEOUT_MS,
            REQUEST_TIMEOUT_MS_BOUNDS,
        );
        let connect_timeout_ms = bounded_u64(
            env_value("REPOS_CONNECT_TIMEOUT_MS").as_deref(),
            DEFAULT_CONNECT_TIMEOUT_MS,
            CONNECT_TIMEOUT_MS_BOUNDS,
        );
        let response_max_bytes = bounded_usize(
            env_value("REPOS_RESPONSE_MAX_BYTES").as_deref(),
            DEFAULT_RESPONSE_MAX_BYTES,
            RESPONSE_MAX_BYTES_BOUNDS,
        );
        let dist_dir = env_value("DIST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR));
        let log_level = telemetry::level_from_setting(env_value("LOG_LEVEL").as_deref());

        Ok(Self {
            port,
            owner,
            api_base,
            cache_ttl: Duration::from_secs(cache_ttl_seconds),
            request_timeout: Duration::from_millis(request_timeout_ms),
            connect_timeout: Duration::from_millis(connect_timeout_ms),
            response_max_bytes,
            dist_dir,
            log_level,
        })
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn bounded_u64(raw: Option<&str>, default: u64, bounds: (u64, u64)) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn bounded_usize(raw: Option<&str>, default: usize, bounds: (usize, usize)) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn timeout_ms_with_legacy_seconds(
    milliseconds: Option<&str>,
    seconds: Option<&str>,
    default_ms: u64,
    bounds: (u64, u64),
) -> u64 {
    if let Some(value) = milliseconds
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
    {
        return value;
    }

    seconds
        .and_then(|value| value.trim().parse::<u64>().ok())
        .and_then(|value| value.checked_mul(1_000))
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default_ms)
}

fn parse_http_url(value: &str) -> Option<Url> {
    let parsed = Url::parse(value).ok()?;

    if parsed.scheme() == "http" || parsed.scheme() == "https" {
        Some(parsed)
    } else {
        None
    }
}

/// `{base}/users/{owner}/repos`, keeping any path prefix on the base.
fn listing_url(api_base: &Url, owner: &str) -> Option<Url> {
    let mut url = api_base.clone();
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .extend(["users", owner, "repos"]);
    Some(url)
}

struct UpstreamRepoSource {
    client: reqwest::Client,
    api_base: Url,
    response_max_bytes: usize,
}

impl UpstreamRepoSource {
    fn new(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            response_max_bytes: config.response_max_bytes,
        })
    }
}

impl RepoSource for UpstreamRepoSource {
    async fn list_repos(&self, owner: &str) -> Result<Vec<RepoRecord>, FetchError> {
        let url = listing_url(&self.api_base, owner).ok_or(FetchError::Network)?;
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .send()
            .await
            .map_err(|_| FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = read_limited_body(response, self.response_max_bytes).await?;
        decode_listing(&body)
    }
}

async fn read_limited_body(
    response: reqwest::Response,
    max_response_bytes: usize,
) -> Result<Vec<u8>, FetchError> {
    let mut stream = response.bytes_stream();
    let mut body: Vec<u8> = Vec::with_capacity(8192);

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|_| FetchError::Network)?;

        if body.len() + chunk.len() > max_response_bytes {
            return Err(FetchError::TooLarge);
        }

        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

fn decode_listing(body: &[u8]) -> Result<Vec<RepoRecord>, FetchError> {
    serde_json::from_slice(body).map_err(|_| FetchError::Decode)
}

#[derive(Clone)]
struct CachedListing {
    expires_at: Instant,
    records: Vec<RepoRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CacheDecision {
    Fresh,
    Stale,
    Missing,
}

fn decide_cache_action(now: Instant, entry: Option<&CachedListing>) -> CacheDecision {
    match entry {
        Some(entry) if entry.expires_at > now => CacheDecision::Fresh,
        Some(_) => CacheDecision::Stale,
        None => CacheDecision::Missing,
    }
}

/// Outcome of serving the listing through [`ListingCache::load`].
#[derive(Debug, PartialEq)]
enum ListingLoad {
    Hit(Vec<RepoRecord>),
    Miss(Vec<RepoRecord>),
    Stale {
        records: Vec<RepoRecord>,
        error: FetchError,
    },
    Failed(FetchError),
}

/// TTL cache in front of the upstream listing. Refills are single-flight:
/// requests that find the entry expired queue on `refill` and re-check the
/// entry once they hold it.
struct ListingCache {
    entry: RwLock<Option<CachedListing>>,
    refill: Mutex<()>,
    ttl: Duration,
}

impl ListingCache {
    fn new(ttl: Duration) -> Self {
        Self {
            entry: RwLock::new(None),
            refill: Mutex::new(()),
            ttl,
        }
    }

    async fn snapshot(&self) -> (CacheDecision, Option<CachedListing>) {
        let cached = self.entry.read().await.clone();
        (decide_cache_action(Instant::now(), cached.as_ref()), cached)
    }

    async fn load<S: RepoSource>(&self, source: &S, owner: &str) -> ListingLoad {
        if let (CacheDecision::Fresh, Some(entry)) = self.snapshot().await {
            return ListingLoad::Hit(entry.records);
        }

        let _refill = self.refill.lock().await;
        let (decision, cached) = self.snapshot().await;
        if let (CacheDecision::Fresh, Some(entry)) = (decision, cached.as_ref()) {
            return ListingLoad::Hit(entry.records.clone());
        }

        match source.list_repos(owner).await {
            Ok(records) => {
                *self.entry.write().await = Some(CachedListing {
                    expires_at: Instant::now() + self.ttl,
                    records: records.clone(),
                });
                ListingLoad::Miss(records)
            }
            Err(error) => match cached {
                Some(entry) => ListingLoad::Stale {
                    records: entry.records,
                    error,
                },
                None => ListingLoad::Failed(error),
            },
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    listing: Arc<ListingCache>,
    upstream: Arc<UpstreamRepoSource>,
    config: Arc<ServerConfig>,
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    telemetry::set_min_level(config.log_level);

    let bind_address = format!("0.0.0.0:{}", config.port);
    let upstream = UpstreamRepoSource::new(&config)?;
    let static_service = ServeDir::new(&config.dist_dir)
        .not_found_service(ServeFile::new(config.dist_dir.join("index.html")));
    let port = config.port;

    let state = AppState {
        listing: Arc::new(ListingCache::new(config.cache_ttl)),
        upstream: Arc::new(upstream),
        config: Arc::new(config),
    };

    let app = Router::new()
        .route("/api/repos", get(get_repos))
        .fallback_service(static_service)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log_event(
        LogLevel::Info,
        "server_listening",
        json!({ "url": format!("http://127.0.0.1:{port}") }),
    );
    axum::serve(listener, app).await?;
    Ok(())
}

async fn get_repos(State(state): State<AppState>, headers: HeaderMap) -> axum::response::Response {
    let request_started_at = Instant::now();
    let request_id = resolve_request_id(&headers);
    let owner = state.config.owner.as_str();

    log_event(
        LogLevel::Info,
        "repos_request_start",
        json!({ "request_id": request_id.as_str(), "owner": owner }),
    );

    let (cache_status, outcome) = match state.listing.load(state.upstream.as_ref(), owner).await {
        ListingLoad::Hit(records) => ("hit", Ok(records)),
        ListingLoad::Miss(records) => ("miss", Ok(records)),
        ListingLoad::Stale { records, error } => {
            log_upstream_failure(&request_id, &error, true, request_started_at);
            ("stale", Ok(records))
        }
        ListingLoad::Failed(error) => {
            log_upstream_failure(&request_id, &error, false, request_started_at);
            ("error", Err(error))
        }
    };

    match outcome {
        Ok(records) => {
            log_event(
                LogLevel::Info,
                "repos_request_complete",
                json!({
                    "request_id": request_id.as_str(),
                    "cache": cache_status,
                    "records": records.len(),
                    "duration_ms": request_started_at.elapsed().as_millis(),
                }),
            );
            listing_response(records, cache_status, &request_id)
        }
        Err(error) => {
            let mut headers = HeaderMap::new();
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
            response_with_request_id(
                StatusCode::BAD_GATEWAY,
                headers,
                Json(json!({ "error": error.to_string() })),
                &request_id,
            )
        }
    }
}

fn log_upstream_failure(request_id: &str, error: &FetchError, serving_stale: bool, started_at: Instant) {
    log_event(
        LogLevel::Warn,
        "repos_upstream_failed",
        json!({
            "request_id": request_id,
            "error_class": error.as_str(),
            "status_code": error.status_code(),
            "serving_stale": serving_stale,
            "duration_ms": started_at.elapsed().as_millis(),
        }),
    );
}

fn listing_response(
    records: Vec<RepoRecord>,
    cache_status: &'static str,
    request_id: &str,
) -> axum::response::Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("public, max-age=60"));
    headers.insert(CACHE_STATUS_HEADER, HeaderValue::from_static(cache_status));
    response_with_request_id(StatusCode::OK, headers, Json(records), request_id)
}

fn response_with_request_id(
    status: StatusCode,
    mut headers: HeaderMap,
    payload: impl IntoResponse,
    request_id: &str,
) -> axum::response::Response {
    if let Ok(request_id_header) = HeaderValue::from_str(request_id) {
        headers.insert(REQUEST_ID_HEADER, request_id_header);
    }
    (status, headers, payload).into_response()
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(generate_request_id)
}
