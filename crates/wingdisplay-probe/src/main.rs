//! wingdisplay probe
//!
//! Resolves a display profile from configuration against a simulated host
//! and prints what the adapter would present to an application: profile,
//! size, rotation, brightness and where a few normalized points land.
//!
//! ```text
//! wingdisplay-probe [--host builtin|titano|feather] [--config PATH] [--json]
//! ```

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use wingdisplay_config::DisplaySettings;
use wingdisplay_hal::mock::{MockGroup, MockPlatform};
use wingdisplay_hal::{DisplayAdapter, Platform};

/// Normalized positions reported by the probe
const SAMPLE_POINTS: [(f64, f64); 5] = [(0.0, 0.0), (0.25, 0.25), (0.5, 0.5), (0.75, 0.75), (1.0, 1.0)];

#[derive(Debug, Default, PartialEq)]
struct Args {
    host: Option<String>,
    config: Option<PathBuf>,
    json: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--host" => parsed.host = Some(args.next().context("--host needs a value")?),
            "--config" => {
                parsed.config = Some(args.next().context("--config needs a path")?.into())
            }
            "--json" => parsed.json = true,
            other => bail!("unknown argument: {other}"),
        }
    }

    Ok(parsed)
}

fn host_platform(host: Option<&str>) -> Result<MockPlatform> {
    Ok(match host {
        None => MockPlatform::from_env(),
        Some("builtin") | Some("pyportal") => MockPlatform::builtin(320, 240),
        Some("titano") => MockPlatform::builtin(480, 320),
        Some("feather") => MockPlatform::feather(),
        Some(other) => bail!("unknown host: {other}"),
    })
}

#[derive(Debug, Serialize)]
struct PointReport {
    factor: (f64, f64),
    pixel: (i32, i32),
}

#[derive(Debug, Serialize)]
struct Report {
    profile: &'static str,
    description: &'static str,
    display_chip: &'static str,
    touch_chip: Option<&'static str>,
    width: u32,
    height: u32,
    rotation: u32,
    brightness: f32,
    points: Vec<PointReport>,
}

fn build_report(display: &DisplayAdapter<MockGroup>) -> Report {
    let spec = display.profile().spec();

    Report {
        profile: spec.key,
        description: spec.description,
        display_chip: spec.display.name(),
        touch_chip: display.touch().map(|_| spec.touch.name()),
        width: display.width(),
        height: display.height(),
        rotation: display.rotation().degrees(),
        brightness: display.brightness(),
        points: SAMPLE_POINTS
            .iter()
            .map(|&(wf, hf)| PointReport {
                factor: (wf, hf),
                pixel: display.screen_to_rect(wf, hf),
            })
            .collect(),
    }
}

fn print_report(report: &Report) {
    println!("Profile:    {} ({})", report.profile, report.description);
    println!("Display:    {}", report.display_chip);
    println!("Touch:      {}", report.touch_chip.unwrap_or("none"));
    println!("Size:       {}x{}", report.width, report.height);
    println!("Rotation:   {}°", report.rotation);
    println!("Brightness: {:.2}", report.brightness);
    for point in &report.points {
        println!(
            "  ({:.2}, {:.2}) -> ({}, {})",
            point.factor.0, point.factor.1, point.pixel.0, point.pixel.1
        );
    }
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let args = parse_args(std::env::args().skip(1))?;
    let settings = DisplaySettings::load_layered(args.config.as_deref())
        .context("Failed to load display settings")?;

    let mut platform = host_platform(args.host.as_deref())?;
    info!(
        "Probing '{}' on host {:?}",
        settings.name,
        platform.capabilities()
    );

    let display = DisplayAdapter::new(&mut platform, &settings.to_options())
        .context("Failed to bring up display")?;
    let report = build_report(&display);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}
