use std::sync::Arc;

use clap::Parser;
use poem::{Route, Server, listener::TcpListener};
use poem_openapi::OpenApiService;

use nodue_backend::AppData;
use nodue_backend::api::{AuthApi, DirectoryApi, HealthApi, NodueApi};
use nodue_backend::cli::{self, Cli, Commands};
use nodue_backend::config::{
    BootstrapSettings, DatabaseConnections, EnvironmentProvider, LoggingConfig, SystemEnvironment,
    init_logging,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let env_provider: Arc<dyn EnvironmentProvider + Send + Sync> = Arc::new(SystemEnvironment);

    // Step 1: Logging
    let logging_config = LoggingConfig::from_env_provider(env_provider.as_ref());
    init_logging(&logging_config)?;

    // Step 2: Bootstrap settings
    let settings = BootstrapSettings::from_env_provider(env_provider.clone())?;

    let command = cli.command.unwrap_or(Commands::Serve);
    if command == Commands::Migrate {
        return cli::migrate::run_migrations(&settings).await;
    }

    // Step 3: Database
    let connections = DatabaseConnections::init(&settings).await?;
    connections.migrate().await?;

    // Step 4: Application data (stores and providers created once)
    let app_data = Arc::new(AppData::init(connections, env_provider.as_ref(), &settings)?);

    if command != Commands::Serve {
        return cli::execute_command(command, &app_data).await;
    }

    // Step 5: Drop sessions that expired while the server was down
    let purged = app_data
        .providers
        .authentication_provider
        .purge_expired_sessions()
        .await?;
    if purged > 0 {
        tracing::info!("Purged {} expired sessions", purged);
    }

    // Step 6: Routes
    let server_url = format!("http://localhost:{}/api", settings.server_port());
    let api_service = OpenApiService::new(
        (
            HealthApi::new(app_data.clone()),
            AuthApi::new(app_data.clone()),
            NodueApi::new(app_data.clone()),
            DirectoryApi::new(app_data.clone()),
        ),
        "No-Due Clearance API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url);

    let ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui);

    let address = settings.server_address();
    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger", settings.server_port());

    Server::new(TcpListener::bind(address)).run(app).await?;

    Ok(())
}
