//! gamecheck: Command-line tool for headless verification of a canvas
//! web game
//!
//! Provides commands for running the gameplay smoke scenario, the
//! scaling check, and a quick probe of the game page, against a locally
//! running dev server.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use gamecheck_core::driver::GameBrowser;
use gamecheck_core::model::ScenarioReport;
use gamecheck_core::scenario::{all_scenarios, GameplayScenario, ScalingScenario, Scenario};
use gamecheck_core::{VerifyConfig, VerifyError};

#[derive(Parser)]
#[command(name = "gamecheck")]
#[command(about = "Headless browser verification for a canvas web game")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CommonOpts {
    /// Game server URL
    #[arg(long, default_value = gamecheck_core::config::DEFAULT_GAME_URL)]
    url: String,
    /// Directory screenshots are written to
    #[arg(long, default_value = gamecheck_core::config::DEFAULT_OUTPUT_DIR)]
    out_dir: PathBuf,
    /// CSS selector for the game's render surface
    #[arg(long, default_value = gamecheck_core::config::DEFAULT_CANVAS_SELECTOR)]
    selector: String,
    /// Explicit Chromium/Chrome executable path
    #[arg(long)]
    chrome: Option<PathBuf>,
    /// Run with a visible browser window
    #[arg(long)]
    no_headless: bool,
    /// Disable the Chromium sandbox (required in most containers)
    #[arg(long)]
    no_sandbox: bool,
    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gameplay smoke scenario (menu, level, action screenshots)
    Gameplay {
        #[command(flatten)]
        common: CommonOpts,
    },
    /// Verify FIT scaling and centering of the canvas for a viewport
    Scaling {
        #[command(flatten)]
        common: CommonOpts,
        /// Viewport width
        #[arg(long, default_value_t = 1000)]
        width: u32,
        /// Viewport height
        #[arg(long, default_value_t = 800)]
        height: u32,
        /// Pixel tolerance for style comparisons
        #[arg(long, default_value_t = 1.0)]
        tolerance: f64,
    },
    /// Run all verification scenarios in sequence
    Check {
        #[command(flatten)]
        common: CommonOpts,
        /// Viewport width for the scaling scenario
        #[arg(long, default_value_t = 1000)]
        width: u32,
        /// Viewport height for the scaling scenario
        #[arg(long, default_value_t = 800)]
        height: u32,
    },
    /// Navigate to the game and report canvas presence and resolution
    Probe {
        #[command(flatten)]
        common: CommonOpts,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gamecheck_cli=info".parse()?)
                .add_directive("gamecheck_core=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Gameplay { common } => {
            let config = build_config(&common, None, None);
            let report = run_scenario(&GameplayScenario, &config).await?;
            emit_report(&report, common.json)?;
            ensure_passed(&[report])
        }
        Commands::Scaling {
            common,
            width,
            height,
            tolerance,
        } => {
            let config = build_config(&common, Some((width, height)), Some(tolerance));
            let report = run_scenario(&ScalingScenario, &config).await?;
            emit_report(&report, common.json)?;
            ensure_passed(&[report])
        }
        Commands::Check {
            common,
            width,
            height,
        } => {
            let config = build_config(&common, Some((width, height)), None);
            let mut reports = Vec::new();
            for scenario in all_scenarios() {
                reports.push(run_scenario(scenario.as_ref(), &config).await?);
            }
            for report in &reports {
                emit_report(report, common.json)?;
            }
            ensure_passed(&reports)
        }
        Commands::Probe { common } => probe(&common).await,
    }
}

fn build_config(
    common: &CommonOpts,
    viewport: Option<(u32, u32)>,
    tolerance: Option<f64>,
) -> VerifyConfig {
    let mut config = VerifyConfig::default()
        .with_url(common.url.clone())
        .with_output_dir(common.out_dir.clone());
    config.canvas_selector = common.selector.clone();
    config.headless = !common.no_headless;
    config.no_sandbox = common.no_sandbox;
    config.chrome_executable = common.chrome.clone();
    if let Some((width, height)) = viewport {
        config = config.with_viewport(width, height);
    }
    if let Some(tolerance) = tolerance {
        config = config.with_tolerance(tolerance);
    }
    config
}

async fn run_scenario(scenario: &dyn Scenario, config: &VerifyConfig) -> Result<ScenarioReport> {
    println!("Running {} scenario...", scenario.name());
    let browser = GameBrowser::launch(config).await.map_err(with_hint)?;

    let result = async {
        let session = browser.new_session(config).await?;
        scenario.run(&session).await
    }
    .await;

    // Close the browser even when the scenario failed
    let close_result = browser.close().await;
    let report = result.map_err(with_hint)?;
    close_result.map_err(with_hint)?;
    Ok(report)
}

fn emit_report(report: &ScenarioReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for artifact in &report.artifacts {
        println!(
            "  {} -> {} ({}x{})",
            artifact.label,
            artifact.path.display(),
            artifact.width,
            artifact.height
        );
    }
    if let Some(scaling) = &report.scaling {
        println!("  Viewport: {}", scaling.viewport);
        println!("  Canvas Style Width: {}", scaling.observed.width);
        println!("  Canvas Style Height: {}", scaling.observed.height);
        println!("  Margin Top: {}", scaling.observed.margin_top);
        println!("  Margin Left: {}", scaling.observed.margin_left);
        for mismatch in &scaling.mismatches {
            println!("  ✗ {mismatch}");
        }
    }
    if report.passed {
        println!("✓ {} passed in {}ms", report.scenario, report.duration_ms);
    } else {
        println!("✗ {} FAILED in {}ms", report.scenario, report.duration_ms);
    }
    Ok(())
}

fn ensure_passed(reports: &[ScenarioReport]) -> Result<()> {
    let failed: Vec<_> = reports
        .iter()
        .filter(|r| !r.passed)
        .map(|r| r.scenario.as_str())
        .collect();
    if failed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("verification failed: {}", failed.join(", "))
    }
}

async fn probe(common: &CommonOpts) -> Result<()> {
    let config = build_config(common, None, None);
    let browser = GameBrowser::launch(&config).await.map_err(with_hint)?;

    let result = async {
        let session = browser.new_session(&config).await?;
        session.goto_game().await?;
        session.wait_for_canvas().await?;
        let size = session.canvas_backing_size().await?;
        let style = session.canvas_style().await?;
        Ok::<_, VerifyError>((size, style))
    }
    .await;

    let close_result = browser.close().await;
    let (size, style) = result.map_err(with_hint)?;
    close_result.map_err(with_hint)?;

    if common.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "url": config.url,
                "canvas": { "width": size.width, "height": size.height },
                "style": style,
            }))?
        );
    } else {
        println!("Game reachable at {}", config.url);
        println!("  Canvas resolution: {}x{}", size.width, size.height);
        println!("  Style width: {}", style.width);
        println!("  Style height: {}", style.height);
        println!("✓ probe succeeded");
    }
    Ok(())
}

/// Attaches the library's remediation hint to the error shown to users.
fn with_hint(error: VerifyError) -> anyhow::Error {
    let hint = error.remediation_hint();
    anyhow::anyhow!("{error}\n  hint: {hint}")
}
