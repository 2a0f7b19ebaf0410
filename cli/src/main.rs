// route-tabs: CLI companion for inspecting and exercising persisted tabs

mod script;
mod table;

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use route_tabs::{FileStore, KeyValueStore, Shell};
use route_tabs_plugin::codec::load_tabs;
use route_tabs_plugin::config::DEFAULT_STORAGE_KEY;
use route_tabs_plugin::{TabsConfig, TabsPlugin};
use tracing_subscriber::EnvFilter;

use crate::script::{parse_script, run_script};
use crate::table::render_table;

#[derive(Parser, Debug)]
#[command(name = "route-tabs", version, about = "Inspect and replay persisted route tabs")]
struct Cli {
    /// Directory holding the persisted records (default: <data dir>/route-tabs)
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    /// Record key
    #[arg(long, global = true, default_value = DEFAULT_STORAGE_KEY)]
    key: String,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the persisted tabs
    List {
        /// Print the decoded record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete the persisted record
    Clear,
    /// Drive a shell through a JSON script of navigations, then shut it down
    Replay {
        /// Script file: [{"navigate": {...}}, {"close": 1}, {"activate": 0}]
        script: PathBuf,
        /// Persist tabs across the replay (restore first, write on shutdown).
        /// Without it, shutdown deletes the stored record under --key
        #[arg(long)]
        persist: bool,
        /// Name of the layout route tabs must live under
        #[arg(long, default_value = route_tabs_plugin::config::DEFAULT_ROOT_ROUTE)]
        root: String,
    },
}

// ============================================================================
// Setup
// ============================================================================

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn open_store(dir: Option<PathBuf>) -> Result<FileStore> {
    match dir {
        Some(dir) => Ok(FileStore::new(dir)),
        None => FileStore::default_location().context("no --store-dir given"),
    }
}

fn use_color(no_color: bool) -> bool {
    !no_color && std::env::var_os("NO_COLOR").is_none()
}

// ============================================================================
// Subcommands
// ============================================================================

fn list_output(store: &FileStore, key: &str, json: bool, color: bool) -> Result<String> {
    // Surface store errors here; load_tabs alone would hide them
    store
        .get(key)
        .with_context(|| format!("failed to read '{}' in {}", key, store.dir().display()))?;
    let tabs = load_tabs(store, key);

    if json {
        Ok(format!("{}\n", serde_json::to_string_pretty(&tabs)?))
    } else {
        Ok(render_table(&tabs, None, color))
    }
}

fn do_list(store: &FileStore, key: &str, json: bool, color: bool) -> Result<()> {
    print!("{}", list_output(store, key, json, color)?);
    Ok(())
}

fn do_clear(store: &FileStore, key: &str) -> Result<()> {
    store
        .remove(key)
        .with_context(|| format!("failed to clear '{}' in {}", key, store.dir().display()))?;
    eprintln!("route-tabs: cleared '{}' ({})", key, store.dir().display());
    Ok(())
}

fn do_replay(
    store: FileStore,
    key: String,
    script: PathBuf,
    persist: bool,
    root: String,
    color: bool,
) -> Result<()> {
    let data = fs::read_to_string(&script)
        .with_context(|| format!("failed to read {}", script.display()))?;
    let steps = parse_script(&data).with_context(|| format!("failed to parse {}", script.display()))?;

    let mut settings = BTreeMap::new();
    settings.insert("tabs_persist".to_string(), persist.to_string());
    settings.insert("root_route".to_string(), root);
    settings.insert("storage_key".to_string(), key);
    let config = TabsConfig::from_btreemap(&settings);

    let mut plugin = TabsPlugin::new(config, Rc::new(store));
    let mut shell = Shell::new();
    shell.use_plugin(&mut plugin);

    for line in run_script(&mut shell, steps) {
        println!("{}", line);
    }
    println!();
    print!(
        "{}",
        render_table(shell.visited().routes(), shell.visited().active_index(), color)
    );
    shell.shutdown();
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let color = use_color(cli.no_color);
    let store = open_store(cli.store_dir)?;
    log::debug!("route-tabs: store at {}", store.dir().display());
    match cli.command {
        Command::List { json } => do_list(&store, &cli.key, json, color),
        Command::Clear => do_clear(&store, &cli.key),
        Command::Replay {
            script,
            persist,
            root,
        } => do_replay(store, cli.key, script, persist, root, color),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("route-tabs: {:#}", e);
        process::exit(1);
    }
}
