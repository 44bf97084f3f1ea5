//! ZIP to utility lookup service entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use utility_lookup::api::handlers::summarize_table;
use utility_lookup::api::{assemble, create_router, AppState};
use utility_lookup::config::Config;
use utility_lookup::geocode::ZippopotamClient;
use utility_lookup::lookup::{Resolver, UtilityTable};
use utility_lookup::metrics;
use utility_lookup::utils::shutdown_signal;
use utility_lookup::ServiceError;

/// ZIP code to electric/gas utility lookup service.
#[derive(Parser, Debug)]
#[command(name = "utility-lookup")]
#[command(about = "Best-guess electric/gas utility provider for a US ZIP code")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Resolve one ZIP code and print the response.
    Lookup {
        /// 5-digit US ZIP code.
        zip: String,
    },

    /// Check configuration validity.
    CheckConfig,

    /// List covered states and their city keys.
    States,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration first so VERBOSE and RUST_LOG shape the log filter.
    // Errors are reported once logging is up.
    let loaded = Config::load();
    let directives = loaded
        .as_ref()
        .map(|config| config.log_filter(args.verbose))
        .unwrap_or_else(|_| Config::default().log_filter(args.verbose));

    // Initialize logging
    let (filter, bad_filter) = match EnvFilter::try_new(&directives) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new("info"), Some(e)),
    };

    if args.json_logs {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    if let Some(e) = bad_filter {
        warn!(directives = %directives, error = %e, "Invalid log filter, using info");
    }

    match args.command {
        Some(Command::Serve { port }) => cmd_serve(loaded, port.or(args.port)).await,
        Some(Command::Lookup { zip }) => cmd_lookup(loaded, &zip).await,
        Some(Command::CheckConfig) => cmd_check_config(loaded),
        Some(Command::States) => cmd_states(),
        None => cmd_serve(loaded, args.port).await,
    }
}

/// Validate the loaded configuration.
fn load_config(loaded: Result<Config, envy::Error>) -> Result<Config, ServiceError> {
    let config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        ServiceError::InvalidConfig(e)
    })?;

    Ok(config)
}

/// Run the HTTP server.
async fn cmd_serve(
    loaded: Result<Config, envy::Error>,
    port_override: Option<u16>,
) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let mut config = load_config(loaded)?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
        config.validate().map_err(ServiceError::InvalidConfig)?;
    }

    if config.metrics_enabled {
        metrics::install_exporter(config.metrics_addr())?;
        info!("Metrics exporter listening on {}", config.metrics_addr());
    }
    metrics::init_metrics();

    let table = UtilityTable::builtin();
    info!(states = table.len(), "Utility table loaded");

    let geocoder = ZippopotamClient::new(&config)?;
    info!(
        base_url = %geocoder.base_url(),
        timeout_ms = config.geocode_timeout_ms,
        "Geocoder configured"
    );

    let app_state = AppState::new(Resolver::with_table(geocoder.into(), table));
    let router = create_router(app_state.clone());

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    app_state.set_ready(true);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    app_state.set_ready(false);
    info!("Server shut down gracefully");
    Ok(())
}

/// Resolve one ZIP and print the JSON response.
async fn cmd_lookup(loaded: Result<Config, envy::Error>, zip: &str) -> anyhow::Result<()> {
    let config = load_config(loaded)?;
    let resolver = Resolver::new(ZippopotamClient::new(&config)?);

    match resolver.lookup(Some(zip)).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&assemble(result))?);
            Ok(())
        }
        Err(e) => {
            warn!(zip = %zip, error = %e, "Lookup failed");
            Err(anyhow::anyhow!("{}", e.public_message()))
        }
    }
}

/// Check configuration validity.
fn cmd_check_config(loaded: Result<Config, envy::Error>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("UTILITY LOOKUP - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let config = match loaded {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate configuration
    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    // Build geocoder
    print!("Building geocode client... ");
    match ZippopotamClient::new(&config) {
        Ok(client) => {
            println!("OK");
            println!("  Geocoder URL: {}", client.base_url());
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Geocode client invalid"));
        }
    }

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}", config.listen_addr());
    println!("  Geocode Timeout: {}ms", config.geocode_timeout_ms);
    println!("  Connect Timeout: {}ms", config.geocode_connect_timeout_ms);
    println!("  Log Filter: {}", config.log_filter(false));
    if config.metrics_enabled {
        println!("  Metrics: {}", config.metrics_addr());
    } else {
        println!("  Metrics: Disabled");
    }
    println!("  States Covered: {}", UtilityTable::builtin().len());
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print covered states and their city keys in matching order.
fn cmd_states() -> anyhow::Result<()> {
    for summary in summarize_table(UtilityTable::builtin()) {
        let default = if summary.has_default { " +default" } else { "" };
        println!(
            "{}{} (fallbacks: {}): {}",
            summary.state,
            default,
            summary.fallbacks,
            summary.cities.join(", ")
        );
    }

    Ok(())
}
