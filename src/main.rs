use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use tracing::{error, info};
use unistay_backend::application::auth_service::AuthService;
use unistay_backend::data::sqlite::SqliteUserRepository;
use unistay_backend::infrastructure::config::Config;
use unistay_backend::infrastructure::database::{connect, init_db};
use unistay_backend::infrastructure::logging::init_logging;
use unistay_backend::presentation::app::{ALLOWED_ORIGINS, configure, cors};
use unistay_backend::presentation::handlers::AppState;
use unistay_backend::presentation::middleware::RequestTracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env().inspect_err(|e| error!(error = %e, "Invalid configuration"))?;
    info!(database_url = %config.database_url, "Configuration loaded");

    // Storage must be ready before the server accepts traffic
    let pool = connect(&config.database_url).await?;
    init_db(&pool).await.inspect_err(|e| {
        error!(error = %e, "Database initialization failed");
    })?;

    let auth_service = AuthService::new(Arc::new(SqliteUserRepository::new(pool)));
    let state = web::Data::new(AppState {
        auth_service: Arc::new(auth_service),
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(RequestTracing)
            .wrap(cors())
            .configure(configure)
    });

    let bind_addr = config.bind_addr();
    let server = server.bind(&bind_addr)?;
    info!(
        address = %bind_addr,
        origins = ?ALLOWED_ORIGINS,
        routes = %"GET /, POST /auth/signup, GET /auth/users/{id}",
        "Starting HTTP server"
    );
    server.run().await?;
    Ok(())
}
