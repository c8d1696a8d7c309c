use actix_web::{web, App, HttpServer};
use sequence_backend::config::app::Config;
use sequence_backend::infra::state::build_state;
use sequence_backend::middleware::cors::cors_middleware;
use sequence_backend::middleware::request_trace::RequestTrace;
use sequence_backend::middleware::structured_logger::StructuredLogger;
use sequence_backend::middleware::trace_span::TraceSpan;
use sequence_backend::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state().with_config(config.clone()).build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        store = %app_state.store_kind(),
        deck_source = ?config.deck_source,
        "Starting Sequence backend"
    );

    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
