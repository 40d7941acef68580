use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use newsdeck::config::Config;
use newsdeck::render;
use newsdeck::session::{RenderError, Session};

/// Default config location (~/.config/newsdeck/config.toml).
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("newsdeck")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(name = "newsdeck", about = "Render ranked news digests from JSON article feeds")]
struct Args {
    /// Config file (defaults to ~/.config/newsdeck/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output directory for rendered pages
    #[arg(long, value_name = "DIR", default_value = "site")]
    out: PathBuf,

    /// Render only this tab (default: all configured tabs)
    #[arg(long, value_name = "ID")]
    tab: Option<String>,

    /// Print search results for the given query instead of writing pages
    /// (requires --tab)
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let mut session = Session::new(config).context("Failed to create session")?;

    // Search mode: render the tab, run the query, print the fragment
    if let Some(query) = &args.search {
        let tab = args
            .tab
            .as_deref()
            .context("--search requires --tab")?
            .to_string();
        session
            .render_tab(&tab)
            .await
            .with_context(|| format!("Failed to render tab '{tab}'"))?;
        let markup = session.search_tab(&tab, query)?;
        print!("{markup}");
        return Ok(());
    }

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create output directory {}", args.out.display()))?;

    let tabs: Vec<(String, String)> = session
        .config()
        .tabs
        .iter()
        .filter(|t| args.tab.as_deref().is_none_or(|wanted| t.id == wanted))
        .map(|t| (t.id.clone(), t.label.clone()))
        .collect();
    if tabs.is_empty() {
        anyhow::bail!(
            "No matching tabs to render (requested: {:?})",
            args.tab.as_deref().unwrap_or("all")
        );
    }

    let mut failures = 0usize;
    for (tab_id, label) in &tabs {
        let fragment = match session.render_tab(tab_id).await {
            Ok(markup) => markup,
            Err(RenderError::Fetch(e)) => {
                // A dead feed gets a retry page, not a blank one
                tracing::warn!(tab = %tab_id, error = %e, "feed fetch failed");
                failures += 1;
                render::fetch_error_markup(tab_id, &e.to_string())
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to render tab '{tab_id}'")),
        };

        let page = render::page_shell(&format!("Newsdeck — {label}"), &fragment);
        let path = args.out.join(format!("{tab_id}.html"));
        std::fs::write(&path, page)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Written: {}", path.display());
    }

    if failures > 0 {
        eprintln!("Warning: {failures} of {} tabs failed to fetch", tabs.len());
    }
    Ok(())
}
