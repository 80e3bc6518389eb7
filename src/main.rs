use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use provider_locator::config::{Settings, StorageBackend};
use provider_locator::routes::{self, providers::AppState};
use provider_locator::services::{CacheManager, CachedProviderStore, MemoryProviderStore, PostgresProviderStore, ProviderStore};
use provider_locator::ProviderSearcher;
use std::sync::Arc;
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "Invalid request body".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(settings: Option<&Settings>) {
    let level = settings
        .map(|s| s.logging.level.clone())
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .unwrap_or_else(|| "info".to_string());
    let format = settings
        .map(|s| s.logging.format.clone())
        .unwrap_or_else(|| "compact".to_string());

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

async fn build_store(settings: &Settings) -> std::io::Result<Arc<dyn ProviderStore>> {
    let cache = if settings.cache.enabled {
        let ttl = settings.cache.ttl_secs.unwrap_or(60);
        let l1_size = settings.cache.l1_cache_size.unwrap_or(16);

        let manager = match &settings.cache.redis_url {
            Some(url) => match CacheManager::new(url, l1_size, ttl).await {
                Ok(manager) => {
                    info!("Cache manager initialized with Redis (L1: {} entries, TTL: {}s)", l1_size, ttl);
                    manager
                }
                Err(e) => {
                    warn!("Failed to connect to Redis ({}), using in-process cache only", e);
                    CacheManager::in_memory(l1_size, ttl)
                }
            },
            None => {
                info!("Cache manager initialized (L1: {} entries, TTL: {}s)", l1_size, ttl);
                CacheManager::in_memory(l1_size, ttl)
            }
        };
        tracing::debug!("Cache stats: {:?}", manager.stats());
        Some(Arc::new(manager))
    } else {
        None
    };

    match settings.storage.backend {
        StorageBackend::Memory => {
            let store = if settings.storage.seed_sample_data {
                MemoryProviderStore::with_sample_data()
            } else {
                MemoryProviderStore::new()
            };
            info!("In-memory provider store initialized ({} providers)", store.len().await);

            let store: Arc<dyn ProviderStore> = match cache {
                Some(cache) => Arc::new(CachedProviderStore::new(store, cache)),
                None => Arc::new(store),
            };
            Ok(store)
        }
        StorageBackend::Postgres => {
            let database = settings.database.as_ref().ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "storage.backend = \"postgres\" requires a [database] section",
                )
            })?;

            let store = PostgresProviderStore::from_settings(
                &database.url,
                database.max_connections,
                database.min_connections,
                database.acquire_timeout_secs,
                database.idle_timeout_secs,
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;

            if settings.storage.seed_sample_data {
                store.seed_if_empty().await.map_err(|e| {
                    error!("Failed to seed providers: {}", e);
                    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
                })?;
            }

            info!("PostgreSQL provider store initialized");

            let store: Arc<dyn ProviderStore> = match cache {
                Some(cache) => Arc::new(CachedProviderStore::new(store, cache)),
                None => Arc::new(store),
            };
            Ok(store)
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(None);
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(Some(&settings));

    info!("Starting provider locator service...");
    info!("Configuration loaded successfully (backend: {:?})", settings.storage.backend);

    let store = build_store(&settings).await?;

    let searcher = ProviderSearcher::new(settings.scoring_weights(), settings.search_radii());

    info!(
        "Searcher initialized with radii {:?} and weights {:?}",
        searcher.radii(),
        searcher.weights()
    );

    let app_state = AppState { store, searcher };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
