use anyhow::Context;
use clap::{Parser, Subcommand};
use folio::{
    content::FsLoader,
    output::{generate_site, serve, snapshot_site, HtmlPresenter},
    preferences::{load_theme, toggle_theme, FileStorage, Theme},
    Action, MemoryHistory, Router, SiteConfig,
};
use std::{collections::HashMap, path::PathBuf, time::Instant};
use tokio::runtime::{Builder, Runtime};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[arg(long, default_value = "folio.toml")]
    config: PathBuf,
    /// Log at info level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a URL fragment the way a cold page load does and print the page.
    Render {
        /// e.g. `#blog/my-post`.
        #[arg(default_value = "")]
        fragment: String,
        /// Actions to dispatch afterwards, written as `data-action` bindings (`page:2`).
        #[arg(long = "then")]
        actions: Vec<String>,
    },
    /// Serve the site root and a rendered document for every location.
    Serve,
    /// Print the stored theme.
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SiteConfig::load(&cli.config)?;

    match cli.command {
        Commands::Render { fragment, actions } => {
            let actions = actions
                .iter()
                .map(|binding| {
                    Action::from_binding(binding)
                        .with_context(|| format!("unknown action {binding:?}"))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            print!("{}", render(&config, &fragment, actions)?);
        }
        Commands::Serve => {
            let generated = build_site(&config)?;
            serve(&config, &generated)
                .with_context(|| format!("couldn't serve on {}", config.address))?;
        }
        Commands::Theme { toggle } => {
            let mut storage = FileStorage::open(&config.preferences)?;
            let theme = if toggle {
                toggle_theme(&mut storage)?
            } else {
                load_theme(&storage)
            };
            println!("{}", theme.name());
        }
    }

    Ok(())
}

fn stored_theme(config: &SiteConfig) -> Theme {
    match FileStorage::open(&config.preferences) {
        Ok(storage) => load_theme(&storage),
        Err(e) => {
            warn!(error = %e, "ignoring preferences");
            Theme::default()
        }
    }
}

// Rendering drives its own executor, so routers run on a runtime that is
// dropped before anything renders.
fn runtime() -> anyhow::Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")
}

/// One document per reachable location.
fn build_site(config: &SiteConfig) -> anyhow::Result<HashMap<String, Vec<u8>>> {
    let start = Instant::now();

    let runtime = runtime()?;
    let snapshots = runtime.block_on(async {
        let mut router = Router::new(
            config,
            FsLoader::new(&config.root),
            MemoryHistory::default(),
            HtmlPresenter::new(),
        );
        router.start().await;
        snapshot_site(&mut router, config).await
    });
    drop(runtime);

    let generated = generate_site(config, stored_theme(config), &snapshots);
    info!(
        documents = generated.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "built site"
    );
    Ok(generated)
}

fn render(config: &SiteConfig, fragment: &str, actions: Vec<Action>) -> anyhow::Result<String> {
    let start = Instant::now();
    let theme = stored_theme(config);

    let runtime = runtime()?;
    let presenter = runtime.block_on(async {
        let mut router = Router::new(
            config,
            FsLoader::new(&config.root),
            MemoryHistory::new(fragment),
            HtmlPresenter::new(),
        );
        router.start().await;
        for action in actions {
            router.dispatch(action).await;
        }
        router.into_presenter()
    });
    drop(runtime);

    let document = presenter.render_document(config, theme);
    info!(
        fragment,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "rendered page"
    );
    Ok(document)
}
