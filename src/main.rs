use std::sync::Arc;

use actix_web::{App, HttpServer, middleware::Logger, web};
use clap::Parser;
use tracing::info;

mod api;
mod cli;
mod config;
mod db;
mod logging;
mod shutdown;

use crate::api::{
    auth::TokenKeys,
    health::health_config,
    job::{JobService, handlers::job_config},
    validation,
};
use crate::cli::{Cli, Command};
use crate::db::PgJobStore;
use crate::shutdown::ShutdownCoordinator;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from environment
    let config::Config {
        database_url,
        secret_key,
        host,
        port,
        max_payload_size,
        max_db_connections,
        log_dir,
    } = config::Config::from_env()?;

    logging::init(&log_dir)?;

    let pool = db::connection::get_connection(&database_url, max_db_connections).await?;
    info!("Database connection pool established (max {} connections)", max_db_connections);

    db::migrations::run_migrations(&pool).await?;

    if cli.command() == Command::Migrate {
        pool.close().await;
        return Ok(());
    }

    info!("Starting job-board application");
    info!("  - Max payload size: {} bytes", max_payload_size);

    let job_service = web::Data::new(JobService::new(Arc::new(PgJobStore::new(pool.clone()))));
    let token_keys = web::Data::new(TokenKeys::new(&secret_key));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(job_service.clone())
            .app_data(token_keys.clone())
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .app_data(validation::json_config().limit(max_payload_size))
            .configure(health_config)
            .configure(job_config)
    })
    .bind((host.as_str(), port))?
    .run();

    info!("Server running at http://{}:{}", host, port);

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, pool)
        .wait_for_shutdown()
        .await?;
    Ok(())
}
