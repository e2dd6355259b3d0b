use std::path::Path;

use anyhow::Context;
use bingo_ingest::Thumbnailer;
use bingo_server::{BingoServer, ServerConfig};
use colored::Colorize;

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Config(args) => cmd_config(args),
        Command::Thumbnail(args) => cmd_thumbnail(args),
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = apply_overrides(load_config(args.config.as_deref())?, &args);
    config.validate().context("invalid configuration")?;
    println!(
        "{} Picture Bingo on {} (pictures under {})",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        config.blob_base_url().cyan(),
    );
    BingoServer::new(config).serve().await?;
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    print!("{}", config.to_toml()?);
    Ok(())
}

fn cmd_thumbnail(args: ThumbnailArgs) -> anyhow::Result<()> {
    let thumbnail = render_thumbnail(&args)?;
    println!(
        "{} {} -> {} ({}x{}, {} bytes)",
        "✓".green().bold(),
        args.input.display(),
        args.output.display().to_string().bold(),
        thumbnail.width,
        thumbnail.height,
        thumbnail.data.len(),
    );
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(ServerConfig::default()),
    }
}

/// Command-line flags take precedence over the configuration file.
fn apply_overrides(mut config: ServerConfig, args: &ServeArgs) -> ServerConfig {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(url) = &args.public_base_url {
        config.public_base_url = Some(url.clone());
    }
    if let Some(n) = args.max_upload_bytes {
        config.max_upload_bytes = n;
    }
    if let Some(n) = args.thumbnail_max_dim {
        config.thumbnail_max_dim = n;
    }
    if let Some(n) = args.max_attempts {
        config.update.max_attempts = n;
    }
    config
}

fn render_thumbnail(args: &ThumbnailArgs) -> anyhow::Result<bingo_ingest::Thumbnail> {
    let upload = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let thumbnailer = Thumbnailer::new(args.max_dim.unwrap_or(Thumbnailer::DEFAULT_MAX_DIM));
    let thumbnail = thumbnailer.thumbnail(&upload)?;
    std::fs::write(&args.output, &thumbnail.data)
        .with_context(|| format!("writing {}", args.output.display()))?;
    Ok(thumbnail)
}
