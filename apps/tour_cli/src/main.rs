use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use page::{MemoryPage, Page, Viewport};
use shared::{Flow, Key};
use tokio::runtime::Runtime;
use tour_core::{
    lint_flow, load_config_with_flow, render_slide, AutoFlowLoader, FlowLoader, TourConfig,
    TourController, TourEvent, TourHost, SLIDE_KEY,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tour", about = "Inspect and rehearse guided-tour flow files")]
struct Cli {
    /// TOML file with tour settings (flowUrl, cssPrefix, buttonHtml, ...).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report authoring problems in a flow file.
    Validate { flow: Option<String> },
    /// Print the markup of one slide, or of every slide.
    Render {
        flow: Option<String>,
        /// 1-based slide number.
        #[arg(long)]
        slide: Option<usize>,
        /// Print the view tree as JSON instead of HTML.
        #[arg(long)]
        json: bool,
    },
    /// Play a flow on an empty in-memory page, driven by key presses.
    Walk {
        flow: Option<String>,
        /// Comma-separated keys: right, left, esc or DOM key names.
        #[arg(long, default_value = "right,right,right")]
        keys: String,
        #[arg(long, default_value = "1280x720")]
        viewport: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    match cli.command {
        Command::Validate { flow } => {
            let config = load_config_with_flow(cli.config.as_deref(), flow.as_deref())?;
            let flow = fetch_flow(&runtime, &config)?;
            let issues = lint_flow(&flow);
            for issue in &issues {
                println!("{:?}: {issue}", issue.kind());
            }
            if !issues.is_empty() {
                bail!("{} issue(s) found in {}", issues.len(), config.flow_url);
            }
            println!("{}: {} slide(s), no issues", config.flow_url, flow.len());
        }
        Command::Render { flow, slide, json } => {
            let config = load_config_with_flow(cli.config.as_deref(), flow.as_deref())?;
            let flow = fetch_flow(&runtime, &config)?;
            let indices: Vec<usize> = match slide {
                Some(number) if number >= 1 && number <= flow.len() => vec![number - 1],
                Some(number) => bail!("slide {number} is out of range (flow has {} slides)", flow.len()),
                None => (0..flow.len()).collect(),
            };
            for index in indices {
                let view = render_slide(&flow.slides()[index], index, flow.len(), &config);
                if json {
                    println!("{}", serde_json::to_string_pretty(&view)?);
                } else {
                    println!("{}", view.to_html());
                }
            }
        }
        Command::Walk {
            flow,
            keys,
            viewport,
        } => {
            let mut config = load_config_with_flow(cli.config.as_deref(), flow.as_deref())?;
            config.key_events = true;
            let keys = parse_keys(&keys);
            let viewport = parse_viewport(&viewport)?;
            walk(&runtime, config, keys, viewport)?;
        }
    }

    Ok(())
}

fn fetch_flow(runtime: &Runtime, config: &TourConfig) -> Result<Flow> {
    let loader = AutoFlowLoader::new();
    runtime
        .block_on(loader.fetch(&config.flow_url))
        .with_context(|| format!("failed to load flow from {}", config.flow_url))
}

fn parse_keys(raw: &str) -> Vec<Key> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(|key| match key.to_ascii_lowercase().as_str() {
            "right" | "next" => Key::ArrowRight,
            "left" | "prev" | "back" => Key::ArrowLeft,
            "esc" | "escape" | "stop" => Key::Escape,
            _ => Key::from_dom_key(key),
        })
        .collect()
}

fn parse_viewport(raw: &str) -> Result<Viewport> {
    let (width, height) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("viewport must look like WIDTHxHEIGHT, got '{raw}'"))?;
    let width: f64 = width.trim().parse().context("invalid viewport width")?;
    let height: f64 = height.trim().parse().context("invalid viewport height")?;
    Ok(Viewport::new(width, height))
}

fn walk(runtime: &Runtime, config: TourConfig, keys: Vec<Key>, viewport: Viewport) -> Result<()> {
    let mut host = TourHost::new(
        TourController::new(config),
        MemoryPage::new(viewport),
        Arc::new(AutoFlowLoader::new()),
        runtime.handle().clone(),
    );
    host.load(|controller, page, outcome| match outcome {
        Ok(_) => {
            if let Err(err) = controller.start(page) {
                tracing::warn!(error = %err, "walk: tour did not start");
            }
        }
        Err(err) => tracing::error!(error = %err, "walk: flow unavailable"),
    });
    if !host.pump_until_loaded(Duration::from_secs(30)) {
        bail!("timed out loading flow");
    }
    if host.controller().flow().is_none() {
        bail!("no flow loaded from {}", host.controller().flow_url());
    }

    describe(&host);
    let events = host.sender();
    for key in keys {
        println!("key {key:?}");
        events
            .send(TourEvent::Key(key))
            .context("event queue closed")?;
        host.pump();
        describe(&host);
        if !host.controller().is_active() {
            break;
        }
    }

    host.shutdown();
    Ok(())
}

fn describe(host: &TourHost<MemoryPage>) {
    let controller = host.controller();
    let (Some(index), Some(slide)) = (controller.active_index(), controller.active_slide()) else {
        println!("  idle");
        return;
    };
    let total = controller.flow().map(Flow::len).unwrap_or(0);
    println!(
        "  slide {}/{} '{}' ({})",
        index + 1,
        total,
        slide.title,
        slide.style.as_str()
    );

    let Some(element) = controller.mounted().and_then(|m| m.element(SLIDE_KEY)) else {
        return;
    };
    let page = host.page();
    if let Some(top) = page.style(element, "top") {
        let horizontal = page
            .style(element, "left")
            .map(|left| format!("left={left}"))
            .or_else(|| page.style(element, "right").map(|right| format!("right={right}")))
            .unwrap_or_default();
        let position = page.style(element, "position").unwrap_or_default();
        println!("  placed {position} top={top} {horizontal}");
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
