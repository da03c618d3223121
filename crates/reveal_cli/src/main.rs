//! Reveal CLI
//!
//! Mount a portfolio page headlessly, print its resolved entrance schedule,
//! or simulate scrolling through it frame by frame.

use anyhow::Result;
use clap::{Parser, Subcommand};
use reveal_core::ElementId;
use reveal_site::{Reveal, Route, Site};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::RevealConfig;

#[derive(Parser)]
#[command(name = "reveal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Plan and simulate portfolio entrance animations", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory containing reveal.toml
    #[arg(short, long, global = true, default_value = ".")]
    config: PathBuf,

    /// Ignore reveal.toml and use the small, linear testing preset
    #[arg(long, global = true)]
    testing: bool,

    /// Override the simulation frame rate
    #[arg(long, global = true)]
    fps: Option<u32>,

    /// Override the default step duration in milliseconds
    #[arg(long, global = true)]
    duration: Option<f32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the site's pages and what each one mounts
    Pages,

    /// Print the resolved timelines of a page
    Plan {
        /// Route path or name (/, resume, projects, contact)
        route: String,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Scroll through a page and report which gates fire
    Simulate {
        /// Route path or name
        route: String,

        /// Scroll positions to visit, in order
        #[arg(short, long, value_delimiter = ',')]
        scroll: Vec<f32>,

        /// Frames to run at each scroll position
        #[arg(short, long, default_value = "30")]
        frames: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = if cli.testing {
        RevealConfig::testing()
    } else {
        RevealConfig::load_from_dir(&cli.config)?
    };
    if let Some(fps) = cli.fps {
        config = config.with_frame_rate(fps);
    }
    if let Some(duration) = cli.duration {
        config = config.with_duration(duration);
    }
    config.validate()?;

    match cli.command {
        Commands::Pages => cmd_pages(&config),
        Commands::Plan { route, json } => cmd_plan(&config, &route, json),
        Commands::Simulate {
            route,
            scroll,
            frames,
        } => cmd_simulate(&config, &route, &scroll, frames),
    }
}

fn build_site(config: &RevealConfig) -> Result<Site> {
    Ok(Site::new(config.viewport()).with_defaults(config.timeline_defaults()?))
}

fn cmd_pages(config: &RevealConfig) -> Result<()> {
    let mut site = build_site(config)?;

    println!("{:<12} {:<10} {:>9} {:>6}", "PATH", "PAGE", "TIMELINES", "GATES");
    for route in Route::ALL {
        site.navigate(route);
        println!(
            "{:<12} {:<10} {:>9} {:>6}",
            route.path(),
            route.title(),
            site.scheduler().timeline_count(),
            site.scheduler().gate_count()
        );
    }
    site.unmount();
    Ok(())
}

#[derive(Serialize)]
struct PlannedStep {
    index: usize,
    label: Option<String>,
    start_ms: f32,
    end_ms: f32,
    duration_ms: f32,
    stagger_ms: f32,
    members: Vec<String>,
    skipped: usize,
}

#[derive(Serialize)]
struct PlannedTimeline {
    view: &'static str,
    label: &'static str,
    /// Viewport fraction the trigger must cross; absent for immediate playback
    threshold: Option<f32>,
    gated_from_step: Option<usize>,
    duration_ms: f32,
    steps: Vec<PlannedStep>,
    issues: Vec<String>,
}

fn element_name(site: &Site, element: ElementId) -> String {
    match site.surface().get(element) {
        Some(e) => e.label.clone().unwrap_or_else(|| e.role.to_string()),
        None => "<detached>".to_string(),
    }
}

fn plan_reveal(site: &Site, view: &'static str, reveal: &Reveal) -> Option<PlannedTimeline> {
    let timeline = reveal.timeline.timeline()?;
    let steps = timeline
        .steps()
        .iter()
        .map(|step| PlannedStep {
            index: step.index,
            label: step.label.clone(),
            start_ms: step.start_ms,
            end_ms: step.end_ms,
            duration_ms: step.duration_ms,
            stagger_ms: step.stagger_ms,
            members: step.members.iter().map(|e| element_name(site, *e)).collect(),
            skipped: step.skipped.len(),
        })
        .collect();

    Some(PlannedTimeline {
        view,
        label: reveal.label,
        threshold: reveal.threshold,
        gated_from_step: reveal.is_gated().then_some(reveal.from_step),
        duration_ms: timeline.duration_ms(),
        steps,
        issues: timeline.issues().iter().map(|i| i.to_string()).collect(),
    })
}

fn cmd_plan(config: &RevealConfig, route: &str, json: bool) -> Result<()> {
    let route: Route = route.parse()?;
    let mut site = build_site(config)?;
    site.navigate(route);

    let plan: Vec<PlannedTimeline> = site
        .reveals()
        .into_iter()
        .flat_map(|(view, reveals)| reveals.iter().map(move |r| (view, r)))
        .filter_map(|(view, reveal)| plan_reveal(&site, view, reveal))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("{} ({})", route.title(), route.path());
    for timeline in &plan {
        let trigger = match (timeline.threshold, timeline.gated_from_step) {
            (Some(t), Some(from)) => format!("on scroll past {:.0}% from step {}", t * 100.0, from),
            _ => "on mount".to_string(),
        };
        println!(
            "\n{} / {}  [{:.0}ms, {}]",
            timeline.view, timeline.label, timeline.duration_ms, trigger
        );
        for step in &timeline.steps {
            println!(
                "  #{:<2} {:>6.0} -> {:>6.0}ms  {}{}",
                step.index,
                step.start_ms,
                step.end_ms,
                step.label.as_deref().unwrap_or("-"),
                if step.stagger_ms > 0.0 {
                    format!(" (x{}, stagger {:.0}ms)", step.members.len(), step.stagger_ms)
                } else {
                    String::new()
                }
            );
        }
        for issue in &timeline.issues {
            println!("  ! {}", issue);
        }
    }
    Ok(())
}

fn cmd_simulate(config: &RevealConfig, route: &str, scroll: &[f32], frames: usize) -> Result<()> {
    let route: Route = route.parse()?;
    if frames == 0 {
        anyhow::bail!("--frames must be at least 1");
    }

    let mut site = build_site(config)?;
    let dt = config.frame_ms();
    site.navigate(route);
    info!(
        "Simulating {} at {}x{} ({:.1}ms frames)",
        route,
        config.viewport.width,
        config.viewport.height,
        dt
    );

    let gated: Vec<(&'static str, Reveal)> = site
        .reveals()
        .into_iter()
        .flat_map(|(view, reveals)| {
            reveals
                .iter()
                .filter(|r| r.is_gated())
                .map(move |r| (view, r.clone()))
        })
        .collect();

    let before = site.surface().mutation_count();
    site.settle(dt, frames);
    report_fired(&site, &gated, 0.0);

    for &y in scroll {
        site.scroll_to(y);
        site.settle(dt, frames);
        report_fired(&site, &gated, site.viewport().scroll_y);
    }

    let remaining = site.settle(dt, 10_000);
    let pending = gated
        .iter()
        .filter(|(_, r)| r.gate.as_ref().is_some_and(|g| g.activations() == 0))
        .count();
    println!(
        "settled after {} more frames; {} surface writes; {} gate(s) never fired",
        remaining,
        site.surface().mutation_count() - before,
        pending
    );
    Ok(())
}

fn report_fired(site: &Site, gated: &[(&'static str, Reveal)], scroll_y: f32) {
    let fired: Vec<String> = gated
        .iter()
        .filter_map(|(view, reveal)| {
            let count = reveal.gate.as_ref()?.activations();
            (count > 0).then(|| format!("{}/{} (x{})", view, reveal.label, count))
        })
        .collect();
    println!(
        "scroll {:>6.0}: {}, fired: {}",
        scroll_y,
        if site.scheduler().has_active_animations() {
            "animating"
        } else {
            "idle"
        },
        if fired.is_empty() {
            "-".to_string()
        } else {
            fired.join(", ")
        }
    );
}
