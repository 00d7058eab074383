use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dash_engine::config::DialConfig;
use dash_engine::data::{read_airports_from_file, read_telemetry_script};
use dash_engine::render::frame::DashFrame;
use dash_engine::render::session::{DashSession, DrawingSurface};
use dash_engine::spatial::directory::{AirportDirectory, InMemoryDirectory};
use dash_engine::telemetry::{Quantity, Sample, TelemetryFrame, Unit};
use dash_engine::Airport;
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

static SAMPLE_AIRPORTS: Lazy<Vec<Airport>> = Lazy::new(|| {
    // A handful of Dutch fields; replace with a real airport list via --airports.
    let apt = |icao: &str, lat: f64, lon: f64, runways: &[f64]| Airport {
        icao: icao.into(),
        lat,
        lon,
        runway_lengths_m: runways.to_vec(),
    };
    vec![
        apt("EHAM", 52.3086, 4.7639, &[3800.0, 3500.0, 3453.0, 3400.0, 3300.0, 2014.0]),
        apt("EHRD", 51.9569, 4.4372, &[2200.0]),
        apt("EHLE", 52.4603, 5.5272, &[2700.0]),
        apt("EHTX", 53.1153, 4.8339, &[1180.0, 810.0]),
        apt("EHHV", 52.1911, 5.1472, &[2400.0]),
    ]
});

static SAMPLE_SCRIPT: Lazy<Vec<TelemetryFrame>> = Lazy::new(|| {
    // climbing right turn out of Amsterdam
    (0..60)
        .map(|i| {
            let t = f64::from(i) / 60.0;
            [
                (Quantity::IndicatedAirspeed, Sample::new(180.0 + 120.0 * t, Unit::Knots)),
                (Quantity::MachNumber, Sample::new(0.3 + 0.2 * t, Unit::Mach)),
                (Quantity::Heading, Sample::new((40.0 + 10.0 * t).to_radians(), Unit::Radians)),
                (Quantity::TrueAltitude, Sample::new(3000.0 + 4000.0 * t, Unit::Feet)),
                (Quantity::WindDirection, Sample::new(4.7, Unit::Radians)),
                (Quantity::WindVelocity, Sample::new(14.0, Unit::Knots)),
                (Quantity::Latitude, Sample::new(52.31 + 0.1 * t, Unit::Degrees)),
                (Quantity::Longitude, Sample::new(4.76 + 0.1 * t, Unit::Degrees)),
            ]
            .into_iter()
            .collect::<TelemetryFrame>()
        })
        .collect()
});

/// Replays telemetry through a dashboard session and prints every frame as a
/// JSON line.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Dial settings (JSON); defaults show altitude, wind and nearest airport
    #[arg(long)]
    config: Option<PathBuf>,
    /// Airport list (JSON array)
    #[arg(long)]
    airports: Option<PathBuf>,
    /// Recorded telemetry frames (JSON array), replayed in a loop
    #[arg(long)]
    telemetry: Option<PathBuf>,
    /// Number of redraw ticks to run
    #[arg(long, default_value_t = 90)]
    ticks: u64,
    /// Redraw rate
    #[arg(long, default_value_t = 30.0)]
    hz: f64,
}

#[derive(Serialize)]
struct FrameLine<'a> {
    tick: u64,
    frame: &'a DashFrame,
}

struct JsonLinesSurface<W: Write> {
    out: W,
    written: u64,
}

impl<W: Write> DrawingSurface for JsonLinesSurface<W> {
    fn draw(&mut self, frame: &DashFrame) {
        let line = FrameLine {
            tick: self.written,
            frame,
        };
        let result = serde_json::to_writer(&mut self.out, &line)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        match result {
            Ok(()) => self.written += 1,
            Err(err) => warn!("failed to write frame: {err}"),
        }
    }
}

/// Redraw period for `hz`. Rejects rates that are not finite and positive or
/// too high for a non-zero tick.
fn redraw_period(hz: f64) -> Result<Duration> {
    anyhow::ensure!(hz.is_finite() && hz > 0.0, "--hz must be a positive number, got {hz}");
    let period = Duration::try_from_secs_f64(1.0 / hz)?;
    anyhow::ensure!(!period.is_zero(), "--hz {hz} is too high");
    Ok(period)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let period = redraw_period(args.hz)?;

    let config = match &args.config {
        Some(path) => DialConfig::from_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => DialConfig {
            show_altitude: true,
            show_wind: true,
            show_nearest: true,
            ..DialConfig::default()
        },
    };
    let airports = match &args.airports {
        Some(path) => read_airports_from_file(path)
            .with_context(|| format!("failed to read airports {}", path.display()))?,
        None => SAMPLE_AIRPORTS.clone(),
    };
    let script = match &args.telemetry {
        Some(path) => read_telemetry_script(path)
            .with_context(|| format!("failed to read telemetry {}", path.display()))?,
        None => SAMPLE_SCRIPT.clone(),
    };

    let directory = Arc::new(InMemoryDirectory::new(airports));
    info!(
        "{} airports, {} telemetry frames, {} ticks at {} Hz",
        directory.len(),
        script.len(),
        args.ticks,
        args.hz
    );

    let mut session = DashSession::new(config);
    session.toggle();
    session.set_icon_loaded(true);
    let mut surface = JsonLinesSurface {
        out: BufWriter::new(std::io::stdout()),
        written: 0,
    };

    let (tx, mut rx) = mpsc::channel::<(u64, Vec<Airport>)>(1);
    let mut redraw = interval(period);
    redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut gate = interval(Duration::from_secs(1));
    let mut tick: u64 = 0;

    loop {
        let telemetry = &script[(tick % script.len() as u64) as usize];
        tokio::select! {
            _ = redraw.tick() => {
                if tick >= args.ticks {
                    break;
                }
                session.render_tick(telemetry, Some(&mut surface));
                tick += 1;
            }
            _ = gate.tick() => {
                if let Some(request) = session.poll_nearest(std::time::Instant::now(), telemetry) {
                    let directory = Arc::clone(&directory);
                    let tx = tx.clone();
                    tokio::task::spawn_blocking(move || {
                        let found = directory.find_airports_near(request.origin, request.radius_m, request.limit);
                        // the receiver is gone once the driver has stopped
                        let _ = tx.blocking_send((request.id, found));
                    });
                }
            }
            Some((id, found)) = rx.recv() => {
                session.complete_nearest(id, &found);
            }
        }
    }

    if let Some(request) = session.cancel_nearest() {
        info!("cancelled nearest lookup {}", request.id);
    }
    surface.out.flush().context("failed to flush frames")?;
    info!(
        "drew {} frames, nearest airport {}",
        session.frames_drawn(),
        session.nearest().display()
    );
    Ok(())
}
