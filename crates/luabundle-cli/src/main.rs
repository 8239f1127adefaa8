use anyhow::Context;
use clap::Parser;
use luabundle_core::config::CONFIG_FILE_NAME;
use luabundle_core::{ArtifactOutcome, BundleConfig, Bundler, CliOverrides, Container};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// luabundle - bundle a Lua module tree into self-contained scripts
#[derive(Parser, Debug, Clone)]
#[command(name = "luabundle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a luabundle.yaml (or .json) configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory that module, example and pass-through paths are relative to
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Output directory for artifacts, relative to the root
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Module returned by the artifact entry point
    #[arg(long, value_name = "NAME")]
    entry: Option<String>,

    /// Write a default luabundle.yaml into the root and exit
    #[arg(long)]
    init: bool,

    /// Rebuild whenever a module, the example or the pass-through source changes
    #[arg(short, long)]
    watch: bool,
}

fn main() -> anyhow::Result<()> {
    // Set RUST_LOG=debug to see per-module rewrite details
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    if cli.init {
        return init_project(&cli.root);
    }

    let config = load_config(&cli)?;
    debug!("Resolved configuration: {:?}", config);

    if cli.watch {
        watch_mode(&cli.root, config)
    } else {
        build(&cli.root, config)
    }
}

/// Write the default configuration file
fn init_project(root: &Path) -> anyhow::Result<()> {
    let path = root.join(CONFIG_FILE_NAME);
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    BundleConfig::init_file(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

/// Load the configuration file (explicit or discovered) and apply CLI overrides
fn load_config(cli: &Cli) -> anyhow::Result<BundleConfig> {
    let mut config = if let Some(ref path) = cli.config {
        BundleConfig::from_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?
    } else {
        let default_path = cli.root.join(CONFIG_FILE_NAME);
        if default_path.exists() {
            BundleConfig::from_file(&default_path)
                .with_context(|| format!("Failed to load {}", default_path.display()))?
        } else {
            BundleConfig::default()
        }
    };

    config.merge_overrides(CliOverrides {
        entry_module: cli.entry.clone(),
        out_dir: cli.out_dir.clone(),
    });
    Ok(config)
}

fn build(root: &Path, config: BundleConfig) -> anyhow::Result<()> {
    info!(
        "Bundling {} declared module(s) from {:?}",
        config.modules.len(),
        root
    );

    let container = Container::new(config);
    let report = Bundler::new(&container, root)
        .build()
        .context("Bundle build failed")?;

    for outcome in &report.artifacts {
        match outcome {
            ArtifactOutcome::Written { path, .. } => println!("Built {}", path.display()),
            ArtifactOutcome::Skipped { kind, reason } => {
                println!("Skipped {} artifact ({})", kind, reason)
            }
        }
    }
    Ok(())
}

/// Absolute paths of every build input, resolved against the canonical root
fn watched_inputs(root: &Path, config: &BundleConfig) -> Vec<PathBuf> {
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    config
        .modules
        .values()
        .chain([&config.example.path, &config.passthrough.path])
        .map(|input| root.join(strip_cur_dir(input)))
        .collect()
}

fn strip_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .skip_while(|component| matches!(component, Component::CurDir))
        .collect()
}

/// Whether a path reported by the watcher is one of the build inputs.
/// Artifacts are written under the root too, so they must not match.
fn is_watched_input(changed: &Path, inputs: &[PathBuf]) -> bool {
    let changed = strip_cur_dir(changed);
    inputs
        .iter()
        .any(|input| changed.ends_with(strip_cur_dir(input)))
}

/// Watch mode - rebuild everything when an input changes
fn watch_mode(root: &Path, config: BundleConfig) -> anyhow::Result<()> {
    use notify::{
        event::{EventKind, ModifyKind},
        Event, RecursiveMode, Watcher,
    };
    use std::sync::mpsc::channel;
    use std::time::{Duration, Instant};

    let inputs = watched_inputs(root, &config);

    println!("Watching for changes... (Press Ctrl+C to stop)");

    println!("\nInitial build:");
    if let Err(e) = build(root, config.clone()) {
        eprintln!("Error: {:#}", e);
    }

    let (tx, rx) = channel();
    let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;
    watcher.watch(root, RecursiveMode::Recursive)?;

    let mut last_build = Instant::now();
    let debounce_duration = Duration::from_millis(100);

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                let is_change = matches!(
                    event.kind,
                    EventKind::Modify(ModifyKind::Data(_)) | EventKind::Create(_)
                );
                let touches_input = event
                    .paths
                    .iter()
                    .any(|changed| is_watched_input(changed, &inputs));

                if is_change && touches_input {
                    let now = Instant::now();
                    if now.duration_since(last_build) >= debounce_duration {
                        println!("\n\nSource changed, rebuilding...");
                        if let Err(e) = build(root, config.clone()) {
                            eprintln!("Error: {:#}", e);
                        }
                        last_build = now;
                    }
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => continue,
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                return Err(anyhow::anyhow!("File watcher disconnected"));
            }
        }
    }
}
