use anyhow::Result;
use clap::Parser;
use tracing::info;

mod animation;
mod catalog;
mod color;
mod config;
mod display;
mod geo;
mod ipc;
mod route;
mod view;
mod viewport;

use catalog::Catalog;
use config::Config;

#[derive(Parser, Debug)]
#[command(name = "skyfare")]
#[command(author, version, about = "Terminal flight-fare map with animated routes")]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Fly to this destination code on startup
    #[arg(short, long)]
    destination: Option<String>,

    /// Straight segments per route arc
    #[arg(short, long)]
    segments: Option<u32>,

    /// Milliseconds between animation steps
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Color scheme: skyline, sunset, ocean, aurora, ember, monochrome
    #[arg(long)]
    colors: Option<String>,

    /// Write a commented default config to the XDG path and exit
    #[arg(long)]
    init_config: bool,

    /// Send a command to a running instance: "select <CODE>", list, status, ping
    #[arg(long)]
    send: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skyfare=info".parse()?),
        )
        .init();

    let args = Args::parse();

    // Client mode: talk to a running instance and exit
    if let Some(line) = &args.send {
        let reply = ipc::send_command(line).await?;
        println!("{}", reply);
        return Ok(());
    }

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    // Load or create config
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    apply_args(&mut config, &args)?;

    let catalog = if config.catalog.locations.is_empty() {
        Catalog::default()
    } else {
        Catalog::new(config.catalog.locations.clone())?
    };

    info!(
        "Starting skyfare: {} locations, origin {}",
        catalog.len(),
        catalog.origin().code
    );

    display::terminal::run(config, catalog, args.destination.clone()).await?;

    Ok(())
}

fn apply_args(config: &mut Config, args: &Args) -> Result<()> {
    if let Some(segments) = args.segments {
        config.animation.segments = segments;
    }
    if let Some(tick_ms) = args.tick_ms {
        config.animation.tick_ms = tick_ms;
    }
    if let Some(colors) = &args.colors {
        config.display.color_scheme = colors.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    }
    Ok(())
}
