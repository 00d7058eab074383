use std::time::Instant;

use log::{debug, info, warn};

use crate::config::DialConfig;
use crate::nearest::tracker::{LookupRequest, NearestTracker};
use crate::render::frame::{build_frame, DashFrame, FrameContext, ServerRegion};
use crate::telemetry::{read_canonical, FlightSnapshot, Quantity, TelemetrySource};
use crate::{Airport, GeoPoint};

/// Whatever actually strokes and fills the dial.
pub trait DrawingSurface {
    /// False while the canvas is not attached yet.
    fn is_ready(&self) -> bool {
        true
    }

    fn draw(&mut self, frame: &DashFrame);
}

/// State of one instrument instance. Nothing here is global, so several
/// dials can run side by side.
#[derive(Debug)]
pub struct DashSession {
    config: DialConfig,
    active: bool,
    icon_loaded: bool,
    canvas_size_px: u32,
    server: Option<ServerRegion>,
    nearest: NearestTracker,
    frames_drawn: u64,
}

impl DashSession {
    pub fn new(config: DialConfig) -> Self {
        DashSession {
            canvas_size_px: config.canvas_size_px,
            config,
            active: false,
            icon_loaded: false,
            server: None,
            nearest: NearestTracker::default(),
            frames_drawn: 0,
        }
    }

    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    /// Replaces the settings. A new canvas size takes effect on the next tick.
    pub fn set_config(&mut self, config: DialConfig) {
        self.config = config;
    }

    /// Flips the widget on or off, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        info!("dashboard {}", if self.active { "shown" } else { "hidden" });
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_icon_loaded(&mut self, loaded: bool) {
        self.icon_loaded = loaded;
    }

    pub fn set_server(&mut self, server: Option<ServerRegion>) {
        self.server = server;
    }

    pub fn canvas_size_px(&self) -> u32 {
        self.canvas_size_px
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn nearest(&self) -> &NearestTracker {
        &self.nearest
    }

    /// Redraw entry point. Skips the tick when hidden, when no surface is
    /// ready, or when telemetry cannot be read; never fails.
    pub fn render_tick(&mut self, source: &dyn TelemetrySource, surface: Option<&mut dyn DrawingSurface>) {
        if !self.active {
            return;
        }
        let Some(surface) = surface.filter(|s| s.is_ready()) else {
            debug!("no drawing surface ready, skipping tick");
            return;
        };
        let snapshot = match FlightSnapshot::sample(source, &self.config) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("skipping tick: {err}");
                return;
            }
        };

        if self.canvas_size_px != self.config.canvas_size_px {
            info!(
                "resizing canvas {} -> {} px",
                self.canvas_size_px, self.config.canvas_size_px
            );
            self.canvas_size_px = self.config.canvas_size_px;
        }

        let frame = build_frame(
            &snapshot,
            &self.config,
            FrameContext {
                canvas_size_px: self.canvas_size_px,
                server: self.server,
                nearest: self.nearest.display(),
                icon_loaded: self.icon_loaded,
            },
        );
        surface.draw(&frame);
        self.frames_drawn += 1;
    }

    /// Called from the slow timer. Returns a lookup to run against the
    /// airport directory when one is due.
    pub fn poll_nearest(&mut self, now: Instant, source: &dyn TelemetrySource) -> Option<LookupRequest> {
        if !self.config.show_nearest {
            return None;
        }
        let origin = match (
            read_canonical(source, Quantity::Latitude),
            read_canonical(source, Quantity::Longitude),
        ) {
            (Ok(lat), Ok(lon)) => GeoPoint::new(lat, lon),
            (Err(err), _) | (_, Err(err)) => {
                debug!("no position for nearest lookup: {err}");
                return None;
            }
        };
        self.nearest.poll(now, origin)
    }

    pub fn complete_nearest(&mut self, id: u64, airports: &[Airport]) -> bool {
        self.nearest
            .complete(id, airports, self.config.nearest_min_runway_m)
    }

    pub fn cancel_nearest(&mut self) -> Option<LookupRequest> {
        self.nearest.cancel()
    }
}
