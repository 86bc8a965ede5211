use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use horary_aspects::aspects::{AspectCalculator, AspectObservation, LunarAspectObservation};
use horary_aspects::config::load_orb_policy;
use horary_aspects::ephemeris::{Body, SwissEphemerisAdapter};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "horary_now", about = "Aspects and lunar condition for a horary chart")]
struct Cli {
    /// UTC datetime (YYYY-MM-DDThh:mm:ssZ), defaults to now
    #[arg(long)]
    time: Option<DateTime<Utc>>,
    /// Orb policy TOML file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Swiss Ephemeris data directory
    #[arg(long)]
    ephe_path: Option<PathBuf>,
    /// Comma-separated bodies to include (default: all); the Moon is always added
    #[arg(long, value_delimiter = ',')]
    bodies: Vec<String>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct ChartAspects {
    jd_ut: f64,
    aspects: Vec<AspectObservation>,
    moon_last_aspect: Option<LunarAspectObservation>,
    moon_next_aspect: Option<LunarAspectObservation>,
    void_of_course: bool,
}

fn parse_bodies(ids: &[String]) -> anyhow::Result<Vec<Body>> {
    if ids.is_empty() {
        return Ok(Body::ALL.to_vec());
    }
    let mut bodies = vec![Body::Moon];
    for id in ids {
        let body = Body::from_id(id.trim()).ok_or_else(|| anyhow::anyhow!("Unknown body: {id}"))?;
        if !bodies.contains(&body) {
            bodies.push(body);
        }
    }
    Ok(bodies)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = load_orb_policy(cli.config.as_deref())?;
    let adapter = SwissEphemerisAdapter::new(cli.ephe_path)?;
    let when = cli.time.unwrap_or_else(Utc::now);

    let bodies = parse_bodies(&cli.bodies)?;
    let snapshot = adapter
        .snapshot(when, &bodies)
        .with_context(|| format!("Failed to compute positions for {}", when))?;

    // Fall back to the snapshot speed if a fresh lookup fails
    let snapshot_moon_speed = snapshot.get(Body::Moon).map(|p| p.speed).unwrap_or(0.0);
    let moon_speed = |jd: f64| {
        adapter.moon_speed(jd).unwrap_or_else(|e| {
            log::warn!("Moon speed lookup failed: {}", e);
            snapshot_moon_speed
        })
    };

    let calculator = AspectCalculator::new(&config).with_calendar(&adapter);
    let (moon_last_aspect, moon_next_aspect) = calculator.moon_aspects(&snapshot, &moon_speed)?;
    let output = ChartAspects {
        jd_ut: snapshot.jd_ut,
        aspects: calculator.compute_aspects(&snapshot),
        moon_last_aspect,
        moon_next_aspect,
        void_of_course: calculator.is_void_of_course(&snapshot, &moon_speed)?,
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);
    Ok(())
}
