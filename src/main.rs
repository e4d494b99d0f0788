use std::{env, io::Write, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use github::{GithubClientImpl, DEFAULT_API_URL};
use termcolor::{ColorChoice, StandardStream};

use crate::{app::AppState, render::TagFilter};

mod app;
mod docs;
mod format;
mod github;
mod render;
mod theme;

/// Show the release tags of a GitHub repository.
#[derive(Parser, Debug)]
#[clap(version)]
struct Args {
    /// User or organization owning the repository
    #[clap(long, default_value = "mojohaus")]
    owner: String,

    /// Name of the repository
    #[clap(long, default_value = "jaxb2-maven-plugin")]
    repo: String,

    /// Only show tags whose label contains this text (case insensitive)
    #[clap(long, short)]
    filter: Option<String>,

    /// Color theme: pale, mint or pink
    #[clap(long, default_value = theme::DEFAULT_THEME)]
    theme: String,

    /// Base url of the GitHub REST API
    #[clap(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Print the tags as JSON
    #[clap(long)]
    json: bool,

    /// Don't color the output, even on a terminal
    #[clap(long)]
    no_color: bool,

    /// Make logging more verbose.
    /// You can also specify the log level via the RUST_LOG env variable.
    #[clap(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if env::var("RUST_LOG").is_err() {
        let level = match args.verbose {
            true => "debug",
            false => "info",
        };
        env::set_var("RUST_LOG", format!("{}={}", env!("CARGO_PKG_NAME"), level));
    }
    env_logger::init();

    log::info!(
        "Starting {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    );
    log::debug!("With arguments {:?}", args);

    if let Err(error) = run(args).await {
        log::error!("{:?}", error);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let client = GithubClientImpl::new(&args.api_url).context("Failed to create github client")?;
    let mut app = AppState::new(Arc::new(client));

    if !app.themes.set_theme(&args.theme) {
        let names: Vec<_> = app.themes.themes().iter().map(|t| t.name.as_str()).collect();
        log::warn!(
            "Unknown theme {} (available: {}), keeping {}",
            args.theme,
            names.join(", "),
            app.themes.active().name,
        );
    }
    app.filter = TagFilter::new(args.filter.as_deref());

    let mut handle = app.open(&args.owner, &args.repo);
    let state = handle
        .settled()
        .await
        .context(format!("Failed to load tags of {}/{}", args.owner, args.repo))?;
    if !state.completed() {
        return Err(anyhow!(
            "Failed to load tags of {}/{}: {}",
            args.owner,
            args.repo,
            state.failure().unwrap_or("fetch did not complete"),
        ));
    }

    if !app.docs.has_tags() {
        log::info!("{}/{} has no tags", args.owner, args.repo);
    }

    let stdout = StandardStream::stdout(color_choice(
        args.no_color || args.json,
        atty::is(atty::Stream::Stdout),
    ));
    let mut stdout = stdout.lock();
    app.render(&mut stdout, args.json)
        .context("Failed to render tags")?;
    stdout.flush().context("Failed to flush stdout")?;

    Ok(())
}

fn color_choice(no_color: bool, is_tty: bool) -> ColorChoice {
    match no_color || !is_tty {
        true => ColorChoice::Never,
        false => ColorChoice::Auto,
    }
}
