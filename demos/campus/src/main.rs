//! campus — loads a street map and runs every query against it.
//!
//! ```text
//! campus [map-file] [--config config.json]
//! ```
//!
//! Without a map file the bundled 9-intersection campus map is used.  The
//! config file is JSON (`MapConfig`); omit it for unseeded default traffic.
//! `cargo run -p campus -- --config demos/campus/config.json` runs the bundled
//! map with seeded traffic.
//! Set `RUST_LOG=debug` to see construction statistics.

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use rn_core::MapConfig;
use rn_graph::{Intersection, MapReader, PathInfo, RoadMap, load_map_file};

// ── Constants ─────────────────────────────────────────────────────────────────

const BUILTIN_MAP: &str = include_str!("../maps/campus.txt");

const FROM: Intersection = Intersection::at(0, 0);
const TO:   Intersection = Intersection::at(80, 80);

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Split the command line into an optional map path and config path.
fn parse_args(args: &[String]) -> Result<(Option<&str>, Option<&str>)> {
    let mut map = None;
    let mut config = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                config = Some(path.as_str());
            }
            path if map.is_none() => map = Some(path),
            other => anyhow::bail!("unexpected argument {other:?}"),
        }
    }
    Ok((map, config))
}

fn load_config(path: Option<&str>) -> Result<MapConfig> {
    let Some(path) = path else {
        return Ok(MapConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
    let config: MapConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing config {path}"))?;
    Ok(config)
}

fn print_path(label: &str, path: &[Intersection], info: PathInfo) {
    let route: Vec<String> = path.iter().map(ToString::to_string).collect();
    println!("{label}");
    println!("  route    {}", if route.is_empty() { "(none)".into() } else { route.join(" → ") });
    println!("  hops     {}", path.len().saturating_sub(1));
    println!("  length   {:.2}", info.total_length);
    println!("  traffic  {:.2}", info.total_traffic);
    println!("  factor   {:.3}", info.average_traffic_factor);
    println!();
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (map_path, config_path) = parse_args(&args)?;
    let config = load_config(config_path)?;

    let t0 = Instant::now();
    let map = match map_path {
        Some(path) => {
            let data = load_map_file(Path::new(path)).with_context(|| format!("loading map {path}"))?;
            RoadMap::load(data, &config)?
        }
        None => RoadMap::load(MapReader::new(Cursor::new(BUILTIN_MAP)), &config)?,
    };
    info!("map ready in {:.3} ms", t0.elapsed().as_secs_f64() * 1e3);

    let net = map.network();
    println!("=== campus — street map queries ===");
    println!(
        "Intersections: {}  |  Blocks: {}  |  Directed edges: {}",
        net.intersection_count(),
        net.segment_count(),
        net.edge_count()
    );
    println!();

    let corner = |i: Intersection| map.intersection_at(i.coordinate.x, i.coordinate.y);
    let (from, to) = match (corner(FROM), corner(TO)) {
        (Some(from), Some(to)) => (from, to),
        _ => {
            // Custom maps may not contain the demo corners; fall back to the
            // first and last intersections.
            let all = net.intersections();
            anyhow::ensure!(!all.is_empty(), "map has no intersections");
            (all[0], all[all.len() - 1])
        }
    };
    if (from, to) != (FROM, TO) {
        info!("using {from} → {to} instead of the default corners");
    }

    let reach = map.reachable_intersections(from)?;
    println!("Reachable from {from}: {} intersections", reach.len());
    println!();

    let fewest = map.minimize_intersections(from, to)?;
    let info = map.path_information(fewest.as_slice())?;
    print_path("Fewest intersections", fewest.as_slice(), info);

    let fastest = map.fastest_path(from, to)?;
    let info = map.path_information(fastest.as_slice())?;
    print_path("Least traffic", fastest.as_slice(), info);

    Ok(())
}
