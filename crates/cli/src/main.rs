use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use geo::Point;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;
use zonefold::api::{
    bisector_line, find_containing_feature, parse_lon_lat, play_area_region, relative_heading,
    Executor, FoldRequest, GeoJson, Inline, Worker,
};
use zonefold::geojson::Feature;
use zonefold::ops::fold_trace;
use zonefold::{EngineCfg, Region};

mod provenance;
mod trace;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "zonefold")]
#[command(about = "Fold hide-and-seek clues into the hider's possible area")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Args, Clone, Debug)]
struct EngineArgs {
    /// Run the fold on a background worker thread
    #[arg(long)]
    threaded: bool,
    /// Wall-clock budget for each grid classification; over budget keeps the region
    #[arg(long)]
    grid_budget_ms: Option<u64>,
    /// Vertex count of circle approximations
    #[arg(long, default_value_t = EngineCfg::default().circle_steps)]
    circle_steps: usize,
}

impl EngineArgs {
    fn cfg(&self) -> EngineCfg {
        let mut cfg = EngineCfg {
            circle_steps: self.circle_steps,
            ..EngineCfg::default()
        };
        cfg.grid.budget = self.grid_budget_ms.map(Duration::from_millis);
        cfg
    }

    fn params(&self) -> serde_json::Value {
        json!({
            "threaded": self.threaded,
            "grid_budget_ms": self.grid_budget_ms,
            "circle_steps": self.circle_steps,
        })
    }
}

#[derive(Subcommand)]
enum Action {
    /// Fold a request and write the resulting region as a GeoJSON feature
    Fold {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Write a per-clue CSV of how the region shrinks
    Trace {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Print the perpendicular bisector of two points, clipped around the area
    Bisector {
        #[arg(long, value_parser = parse_lon_lat)]
        a: Point<f64>,
        #[arg(long, value_parser = parse_lon_lat)]
        b: Point<f64>,
        /// Play area GeoJSON; defaults to the whole world
        #[arg(long)]
        area: Option<PathBuf>,
    },
    /// Print the first feature containing a point, or null
    Locate {
        #[arg(long, value_parser = parse_lon_lat)]
        point: Point<f64>,
        #[arg(long)]
        geojson: PathBuf,
    },
    /// Print the compass heading of one point as seen from another
    Heading {
        #[arg(long, value_parser = parse_lon_lat)]
        from: Point<f64>,
        #[arg(long, value_parser = parse_lon_lat)]
        to: Point<f64>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Fold { input, out, engine } => fold(&input, &out, &engine),
        Action::Trace { input, out, engine } => trace_steps(&input, &out, &engine),
        Action::Bisector { a, b, area } => bisector(a, b, area.as_deref()),
        Action::Locate { point, geojson } => locate(point, &geojson),
        Action::Heading { from, to } => heading(from, to),
        Action::Report => report(),
    }
}

fn read_request(input: &Path) -> Result<FoldRequest> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    text.parse::<FoldRequest>()
        .with_context(|| format!("parsing request {}", input.display()))
}

fn read_geojson(path: &Path) -> Result<GeoJson> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    text.parse::<GeoJson>()
        .with_context(|| format!("parsing GeoJSON {}", path.display()))
}

fn ensure_parent(out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn fold(input: &Path, out: &Path, engine: &EngineArgs) -> Result<()> {
    let request = read_request(input)?;
    let cfg = engine.cfg();
    tracing::info!(
        input = %input.display(),
        operations = request.operations.len(),
        facts = request.facts.len(),
        threaded = engine.threaded,
        "fold"
    );
    let pending = if engine.threaded {
        Worker { cfg }.run(request)
    } else {
        Inline { cfg }.run(request)
    };
    let started = Instant::now();
    while !pending.is_finished() {
        std::thread::sleep(POLL_INTERVAL);
        tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "fold running");
    }
    let region = pending.wait();
    tracing::info!(
        polygons = region.polygon_count(),
        area_deg2 = region.area_deg2(),
        "folded"
    );

    ensure_parent(out)?;
    let feature = GeoJson::Feature(Feature::from_geometry(GeoJson::from(&region)));
    std::fs::write(out, serde_json::to_vec_pretty(&feature)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let mut params = engine.params();
    params["input"] = json!(input.to_string_lossy());
    let payload = provenance::Payload::new(params).with_region(&region);
    provenance::write_sidecar(out, payload)?;
    Ok(())
}

fn trace_steps(input: &Path, out: &Path, engine: &EngineArgs) -> Result<()> {
    let request = read_request(input)?;
    let operations = request.resolved_operations();
    tracing::info!(input = %input.display(), operations = operations.len(), "trace");
    let steps = fold_trace(request.play_area.as_ref(), &operations, &engine.cfg());

    ensure_parent(out)?;
    let mut df = trace::trace_frame(&operations, &steps)?;
    trace::write_csv(&mut df, out)?;

    let mut params = engine.params();
    params["input"] = json!(input.to_string_lossy());
    let last = steps
        .last()
        .cloned()
        .unwrap_or_else(|| play_area_region(request.play_area.as_ref()));
    provenance::write_sidecar(out, provenance::Payload::new(params).with_region(&last))?;
    Ok(())
}

fn bisector(a: Point<f64>, b: Point<f64>, area: Option<&Path>) -> Result<()> {
    let region = match area {
        Some(path) => play_area_region(Some(&read_geojson(path)?)),
        None => Region::world(),
    };
    let line = bisector_line(&region, [a, b], &EngineCfg::default());
    if line.is_none() {
        tracing::warn!("points coincide; no bisector");
    }
    let doc = line.map(GeoJson::from);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn locate(point: Point<f64>, geojson: &Path) -> Result<()> {
    let collection = read_geojson(geojson)?;
    let found = find_containing_feature(point, &collection);
    println!("{}", serde_json::to_string_pretty(&found)?);
    Ok(())
}

fn heading(from: Point<f64>, to: Point<f64>) -> Result<()> {
    println!("{}", serde_json::to_string(&relative_heading(from, to))?);
    Ok(())
}

fn report() -> Result<()> {
    let cfg = EngineCfg::default();
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "engine_version": zonefold::VERSION,
        "params": {
            "circle_steps": cfg.circle_steps,
            "bbox_pad_deg": cfg.bbox_pad_deg,
            "grid_size_limits": cfg.grid.size_limits,
            "grid_fallback_size": cfg.grid.fallback_size,
        },
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
