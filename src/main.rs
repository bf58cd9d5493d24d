mod cli;

use hls_edge::{
    config::{self, Config},
    device::{DdrClient, DeviceResolver},
    rewrite, server,
};
use hls_edge_common::DeviceProfile;
use hls_edge_manifest::{decide_with, PrimaryOrder, SelectionPolicy};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    origin: Option<String>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // CLI flags win over the config file
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if origin.is_some() {
        config.origin.url = origin;
    }
    config::validate_config(&config)?;

    tracing::info!("Starting hls-edge");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "hls_edge=trace,hls_edge_manifest=trace,tower_http=debug".to_string()
        } else {
            "hls_edge=debug,hls_edge_manifest=debug,tower_http=info".to_string()
        }
    });

    // Logs go to stderr so `rewrite` output can be piped
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port, origin } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, origin, cli.config.as_deref()))
        }
        Commands::Rewrite {
            file,
            width,
            height,
            desktop,
            os,
            os_version,
            release_year,
            order,
            cap,
        } => {
            let mut profile = if desktop {
                DeviceProfile {
                    display_width: width,
                    display_height: height,
                    ..DeviceProfile::desktop()
                }
            } else {
                DeviceProfile::new(width, height)
            };
            if let Some(os) = os {
                profile = profile.with_os(os, os_version);
            }
            if let Some(year) = release_year {
                profile = profile.with_release_year(year);
            }
            rewrite_file(&file, &profile, order, cap, cli.config.as_deref())
        }
        Commands::Resolve { user_agent, json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(resolve_user_agent(&user_agent, json, cli.config.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("hls-edge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn rewrite_file(
    file: &Path,
    profile: &DeviceProfile,
    order: Option<PrimaryOrder>,
    cap: Option<u32>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read playlist: {:?}", file))?;

    let line_ending = config.rewrite.line_ending;
    let rewritten = match order {
        Some(order) => {
            let policy = explicit_policy(&config, profile, order, cap);
            rewrite::rewrite_with_policy(&text, policy, line_ending)
        }
        None => rewrite::rewrite_playlist(&text, profile, &config.decision, line_ending),
    }
    .with_context(|| format!("Failed to rewrite {:?}", file))?;

    tracing::info!(
        device = %profile,
        order = %rewritten.policy.primary_order,
        capped = rewritten.policy.cap_enabled,
        cap_dimension = rewritten.policy.cap_dimension,
        variants_in = rewritten.variants_in,
        variants_out = rewritten.variants_out,
        "Rewrote playlist"
    );

    print!("{}", rewritten.body);
    Ok(())
}

fn explicit_policy(
    config: &Config,
    profile: &DeviceProfile,
    order: PrimaryOrder,
    cap: Option<u32>,
) -> SelectionPolicy {
    match cap {
        Some(dimension) => SelectionPolicy::capped(order, dimension),
        None if profile.is_desktop => SelectionPolicy::new(order, config.decision.desktop_dimension),
        None => SelectionPolicy::new(order, profile.target_dimension()),
    }
}

async fn resolve_user_agent(user_agent: &str, json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let client = DdrClient::from_config(&config.ddr);

    let profile = client
        .resolve(user_agent)
        .await
        .with_context(|| format!("Failed to resolve user agent via {}", client.url()))?;
    let policy = decide_with(&profile, 0, &config.decision);

    if json {
        let output = serde_json::json!({
            "profile": profile,
            "policy": policy,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Device: {}", profile);
        println!("Order: {}", policy.primary_order);
        println!("Cap enabled: {}", policy.cap_enabled);
        println!("Cap dimension: {}", policy.cap_dimension);
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_summary(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            println!("Default config:");
            print_summary(&Config::default());
        }
    }

    Ok(())
}

fn print_summary(config: &Config) {
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!(
        "  Origin: {}",
        config.origin.url.as_deref().unwrap_or("(not set)")
    );
    println!("  Device service: {}", config.ddr.url);
    println!("  Rewritten paths: {}", config.rewrite.path_suffixes.join(", "));
    println!("  Line ending: {:?}", config.rewrite.line_ending);
    println!(
        "  Legacy below: iOS {}, Android {}, released {}",
        config.decision.ios_legacy_below,
        config.decision.android_legacy_below,
        config.decision.legacy_release_year_below
    );
    println!("  Desktop dimension: {}", config.decision.desktop_dimension);
}
