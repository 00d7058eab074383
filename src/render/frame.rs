use serde::{Deserialize, Serialize};

use crate::config::DialConfig;
use crate::geometry::compass::{heading_text, rose_labels, rose_rotation_deg, RoseLabel};
use crate::geometry::layout::DialLayout;
use crate::geometry::to_fixed;
use crate::geometry::slots::{assign_slots, compute_data_slot, DataSlot, SlotGeometry};
use crate::geometry::speed::{
    major_tick_angles, minor_tick_angles, place_tick_labels, select_speed_scale, speed_to_arc_angle,
    TickLabel, TAPE_START_DEG,
};
use crate::telemetry::{FlightSnapshot, Wind};

/// Multiplayer server region the simulator is connected to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ServerRegion {
    WestEurope,
    NorthEurope,
    EastUs,
    WestUs,
    SoutheastAsia,
    Unknown,
}

impl From<String> for ServerRegion {
    fn from(id: String) -> Self {
        ServerRegion::from_id(&id)
    }
}

impl ServerRegion {
    /// Maps the host's server id, e.g. "WestEurope".
    pub fn from_id(id: &str) -> Self {
        match id {
            "WestEurope" => ServerRegion::WestEurope,
            "NorthEurope" => ServerRegion::NorthEurope,
            "EastUs" => ServerRegion::EastUs,
            "WestUs" => ServerRegion::WestUs,
            "SoutheastAsia" => ServerRegion::SoutheastAsia,
            _ => ServerRegion::Unknown,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            ServerRegion::WestEurope => "W EU",
            ServerRegion::NorthEurope => "N EU",
            ServerRegion::EastUs => "E USA",
            ServerRegion::WestUs => "W USA",
            ServerRegion::SoutheastAsia => "SE A",
            ServerRegion::Unknown => "-",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tape {
    pub background_start_deg: f64,
    pub background_end_deg: f64,
    pub fill_start_deg: f64,
    /// The fill runs counter-clockwise from `fill_start_deg` to here.
    pub fill_end_deg: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Readout {
    pub text: String,
    pub unit: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Compass {
    pub heading_text: String,
    pub rotation_deg: f64,
    pub labels: Vec<RoseLabel>,
    pub show_icon: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Server,
    Wind,
    Nearest,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Badge {
    pub kind: BadgeKind,
    pub slot: DataSlot,
    pub geometry: SlotGeometry,
    pub title: String,
    pub value: String,
    pub highlighted: bool,
}

/// Everything a drawing surface needs for one redraw.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashFrame {
    pub layout: DialLayout,
    pub tape: Tape,
    pub readout: Readout,
    pub major_ticks_deg: Vec<f64>,
    pub minor_ticks_deg: Vec<f64>,
    pub tick_labels: Vec<TickLabel>,
    pub altitude_ft: Option<String>,
    pub compass: Compass,
    pub badges: Vec<Badge>,
}

/// Inputs beyond the telemetry snapshot.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
    pub canvas_size_px: u32,
    pub server: Option<ServerRegion>,
    pub nearest: &'a str,
    pub icon_loaded: bool,
}

pub fn build_frame(snapshot: &FlightSnapshot, config: &DialConfig, ctx: FrameContext<'_>) -> DashFrame {
    let reading = &snapshot.reading;
    let layout = DialLayout::new(ctx.canvas_size_px, config.show_altitude);
    let scale = select_speed_scale(reading, config);
    let shown = scale.displayed_speed(reading);

    DashFrame {
        layout,
        tape: Tape {
            background_start_deg: layout.background_start_deg,
            background_end_deg: layout.background_end_deg,
            fill_start_deg: TAPE_START_DEG,
            fill_end_deg: speed_to_arc_angle(shown, &scale),
        },
        readout: Readout {
            text: scale.format_readout(shown),
            unit: scale.unit.label(),
        },
        major_ticks_deg: major_tick_angles(),
        minor_ticks_deg: minor_tick_angles(),
        tick_labels: place_tick_labels(&scale),
        altitude_ft: config
            .show_altitude
            .then(|| to_fixed(reading.altitude_ft, 0)),
        compass: Compass {
            heading_text: heading_text(reading.heading_deg),
            rotation_deg: rose_rotation_deg(reading.heading_deg),
            labels: rose_labels(),
            show_icon: ctx.icon_loaded,
        },
        badges: build_badges(snapshot.wind, config, &ctx),
    }
}

fn build_badges(wind: Wind, config: &DialConfig, ctx: &FrameContext<'_>) -> Vec<Badge> {
    let mut shown: Vec<(BadgeKind, String, String)> = Vec::with_capacity(3);
    if config.show_server {
        if let Some(server) = ctx.server {
            shown.push((BadgeKind::Server, "Server".into(), server.short_name().into()));
        }
    }
    if config.show_wind {
        shown.push((
            BadgeKind::Wind,
            format!("{} deg", to_fixed(wind.direction_deg, 0)),
            format!("@{} kt", to_fixed(wind.velocity_kt, 0)),
        ));
    }
    if config.show_nearest {
        shown.push((BadgeKind::Nearest, "Nearest".into(), ctx.nearest.to_string()));
    }

    assign_slots(shown)
        .into_iter()
        .map(|(slot, (kind, title, value))| Badge {
            kind,
            slot,
            geometry: compute_data_slot(slot),
            title,
            value,
            highlighted: config.enable_highlights,
        })
        .collect()
}
