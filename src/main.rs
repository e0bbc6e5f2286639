use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use culture_bite::config::Settings;
use culture_bite::core::{Recommender, SessionStore};
use culture_bite::routes::{self, AppState};
use culture_bite::services::{CacheManager, Catalog, MealDbClient, RecipeCache};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
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
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(settings: &Settings) {
    // LOG_LEVEL and LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn io_error(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| io_error(format!("Configuration error: {}", e)))?;

    init_logging(&settings);

    info!("Starting CultureBite recommendation service...");

    // Redis is optional; without it the service runs on the in-process cache
    let cache = match settings.cache.redis_url.as_deref() {
        Some(url) => match CacheManager::new(Some(url), settings.cache.l1_cache_size, settings.cache.ttl()).await {
            Ok(c) => {
                info!("Cache manager initialized with Redis (L1: {} entries)", settings.cache.l1_cache_size);
                c
            }
            Err(e) => {
                warn!("Failed to connect to Redis ({}), using in-process cache only", e);
                CacheManager::in_memory(settings.cache.l1_cache_size)
            }
        },
        None => {
            info!("Cache manager initialized (L1: {} entries)", settings.cache.l1_cache_size);
            CacheManager::in_memory(settings.cache.l1_cache_size)
        }
    };
    let cache = Arc::new(cache);

    let mealdb = MealDbClient::new(
        settings.mealdb.base_url.clone(),
        settings.mealdb.timeout(),
        cache.clone() as Arc<dyn RecipeCache>,
        settings.cache.ttl(),
    )
    .map_err(|e| {
        error!("Failed to build TheMealDB client: {}", e);
        io_error(e.to_string())
    })?;

    info!("TheMealDB client initialized ({})", settings.mealdb.base_url);

    let catalog = Catalog::load(settings.catalog.path.as_deref()).map_err(|e| {
        error!("Failed to load catalog: {}", e);
        io_error(e.to_string())
    })?;

    info!(
        "Catalog loaded: {} recipes, {} neighborhoods",
        catalog.recipes().len(),
        catalog.neighborhoods().len()
    );

    let weights = settings.scoring_weights();
    let recommender = Recommender::new(Arc::new(catalog), Arc::new(mealdb), weights);

    info!("Recommender initialized with weights: {:?}", weights);

    let sessions = SessionStore::new(settings.sessions.max_profiles, settings.sessions.idle());

    info!(
        "Session store holds up to {} profiles (idle expiry {}s)",
        settings.sessions.max_profiles, settings.sessions.idle_secs
    );

    let app_state = AppState::new(Arc::new(recommender), cache, sessions);

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
