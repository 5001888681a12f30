use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rastersketch::{
    default_config_path, editor_config, init_logging, parse_script, run_session, service_config,
    Config, EditorState, HttpRasterService, Theme,
};

#[derive(Parser, Debug)]
#[command(name = "rastersketch")]
#[command(author, version = rastersketch::LONG_VERSION, about, long_about = None)]
struct Args {
    /// Configuration file (.toml or .json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the rasterization service
    #[arg(long)]
    service_url: Option<String>,

    /// JSON session script to replay
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write the rendered scene to this PNG file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Use light theme
    #[arg(long, conflicts_with = "dark")]
    light: bool,

    /// Use dark theme
    #[arg(long, conflicts_with = "light")]
    dark: bool,
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => match default_config_path() {
            Ok(path) => Config::load_or_default(&path)?,
            Err(e) => {
                tracing::warn!("{}; using default settings", e);
                Config::default()
            }
        },
    };

    if let Some(url) = &args.service_url {
        config.service.base_url = url.clone();
    }
    if args.light {
        config.ui.theme = Theme::Light;
    } else if args.dark {
        config.ui.theme = Theme::Dark;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    let args = Args::parse();

    let config = load_config(&args)?;
    tracing::info!(
        "RasterSketch {} using service at {}",
        rastersketch::VERSION,
        config.service.base_url
    );

    let service = HttpRasterService::new(service_config(&config))?;
    let mut state = EditorState::with_config(editor_config(&config));

    if let Some(path) = &args.script {
        let script = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        let steps = parse_script(&script)
            .with_context(|| format!("parsing script {}", path.display()))?;

        let report = run_session(
            &mut state,
            &service,
            &steps,
            config.workflow.transform_batch_policy,
            config.workflow.clip_algorithm,
        )
        .await;
        for failure in &report.failures {
            tracing::error!("step {} ({}): {}", failure.index, failure.op, failure.message);
        }
    }

    if let Some(path) = &args.output {
        state
            .render(config.ui.theme)
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
    }

    Ok(())
}
