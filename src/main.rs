#[macro_use]
extern crate tracing;

use std::path::PathBuf;
use std::sync::Arc;

use structopt::StructOpt;
use tokio::runtime::Builder;
use tokio::signal;

use chromasaver::screensaver::StateUpdate;

#[derive(Debug, StructOpt)]
struct Opts {
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u32,
    #[structopt(short, long = "config")]
    config_path: Option<PathBuf>,
    #[structopt(long)]
    dump_config: bool,
}

async fn run(opts: Opts) -> color_eyre::eyre::Result<()> {
    // Load configuration
    let config = if let Some(config_path) = opts.config_path.as_deref() {
        chromasaver::models::Config::load_file(config_path).await?
    } else {
        chromasaver::models::Config::default()
    };

    // Dump configuration if this was asked
    if opts.dump_config {
        print!("{}", config.to_string()?);
        return Ok(());
    }

    // Create the lookup client and the controller
    let lookup = Arc::new(chromasaver::lookup::TheColorApi::new(&config.lookup)?);
    let (screensaver, handle) = chromasaver::screensaver::Screensaver::new(&config, lookup);

    // Log displayed colors as they change
    tokio::spawn({
        let mut updates = handle.subscribe();

        async move {
            while let Ok(update) = updates.recv().await {
                match update {
                    StateUpdate::ColorChanged { sample, at } => {
                        info!(
                            name = %sample.name.value,
                            hex = %sample.hex.value,
                            at = %at.to_rfc3339(),
                            "color changed",
                        );
                    }
                    StateUpdate::PlaybackChanged { playing } => {
                        info!(playing = %playing, "playback changed");
                    }
                }
            }
        }
    });

    // Run the controller
    tokio::spawn(screensaver.run());

    // Start the JSON server
    let _json_server = if config.json_server.enable {
        Some(
            chromasaver::servers::bind(
                "JSON",
                config.json_server.clone(),
                handle.clone(),
                chromasaver::servers::json::handle_client,
            )
            .await?,
        )
    } else {
        None
    };

    signal::ctrl_c().await?;

    handle.stop().await.ok();

    Ok(())
}

fn install_tracing(opts: &Opts) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let fmt_layer = fmt::layer();

    let filter_layer = EnvFilter::try_from_env("CHROMASAVER_LOG").unwrap_or_else(|_| {
        EnvFilter::new(match opts.verbose {
            0 => "chromasaver=warn,chromasaverd=warn",
            1 => "chromasaver=info,chromasaverd=info",
            2 => "chromasaver=debug,chromasaverd=debug",
            _ => "chromasaver=trace,chromasaverd=trace",
        })
    });

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .try_init()
}

#[paw::main]
fn main(opts: Opts) -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;
    install_tracing(&opts)?;

    // Create tokio runtime
    let thd_count = match num_cpus::get() {
        1 => 2,
        other => other.min(4),
    };

    let rt = Builder::new_multi_thread()
        .worker_threads(thd_count)
        .enable_all()
        .build()?;
    rt.block_on(run(opts))
}
