// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wazeefa job portal server binary.

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use sqlx::sqlite::SqlitePool;
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wazeefa_server::jobs::{PostingExpiryJob, SessionSweepJob};
use wazeefa_server::{create_app_state, create_router};
use wazeefa_server_config::{JobsConfig, LogFormat, LoggingConfig};
use wazeefa_server_db::{PostingRepository, SessionRepository};
use wazeefa_server_jobs::JobScheduler;

/// Wazeefa server - HTTP server for the wazeefa job portal.
#[derive(Parser, Debug)]
#[command(name = "wazeefa-server", about = "Wazeefa job portal server", version)]
struct Args {
	/// Subcommands for wazeefa-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
}

fn init_tracing(logging: &LoggingConfig) {
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| logging.level.clone().into());
	let registry = tracing_subscriber::registry().with(filter);
	match logging.format {
		LogFormat::Json => registry
			.with(tracing_subscriber::fmt::layer().json())
			.init(),
		LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
	}
}

/// Both sweeps share one scheduler; intervals come from configuration.
fn register_jobs(scheduler: &mut JobScheduler, pool: &SqlitePool, jobs: &JobsConfig) {
	let sessions = SessionRepository::new(pool.clone());
	let postings = PostingRepository::new(pool.clone());

	scheduler.add_periodic(
		Arc::new(SessionSweepJob::new(sessions)),
		Duration::from_secs(jobs.session_sweep_interval_secs),
	);
	scheduler.add_periodic(
		Arc::new(PostingExpiryJob::new(postings)),
		Duration::from_secs(jobs.posting_expiry_interval_secs),
	);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", wazeefa_server::version::format_version_info());
		return Ok(());
	}

	dotenvy::dotenv().ok();

	let config = wazeefa_server_config::load()?;
	init_tracing(&config.logging);

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		"starting wazeefa-server"
	);

	let pool =
		wazeefa_server_db::create_pool(&config.database.url, config.database.max_connections)
			.await?;
	wazeefa_server_db::run_migrations(&pool).await?;

	let mut state = create_app_state(pool.clone(), &config).await;

	let mut scheduler = JobScheduler::new();
	register_jobs(&mut scheduler, &pool, &config.jobs);
	let scheduler = Arc::new(scheduler);
	state.job_scheduler = Some(scheduler.clone());
	scheduler.start().await;

	let app = create_router(state).layer(TraceLayer::new_for_http()).layer(
		CorsLayer::new()
			.allow_origin(Any)
			.allow_methods(Any)
			.allow_headers(Any),
	);

	let addr = config.socket_addr();
	let listener = tokio::net::TcpListener::bind(&addr).await?;
	tracing::info!(%addr, "accepting connections");

	tokio::select! {
		served = axum::serve(listener, app) => {
			if let Err(e) = served {
				tracing::error!(error = %e, "server exited with an error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("shutdown signal received, stopping the scheduler");
			scheduler.shutdown().await;
		}
	}

	tracing::info!("server stopped");
	Ok(())
}
