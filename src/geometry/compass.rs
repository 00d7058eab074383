use serde::Serialize;

use crate::geometry::to_fixed;

const DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
const DIAGONALS: [f64; 4] = [45.0, 135.0, 225.0, 315.0];
const DIAGONAL_NUDGE_DEG: f64 = 0.2;

/// Nudges exact intercardinal headings off the label boundary.
pub fn compass_label_offset(heading_deg: f64) -> f64 {
    if DIAGONALS.contains(&heading_deg) {
        heading_deg + DIAGONAL_NUDGE_DEG
    } else {
        heading_deg
    }
}

/// Rotation applied to the rose so the current heading points up.
pub fn rose_rotation_deg(heading_deg: f64) -> f64 {
    360.0 - compass_label_offset(heading_deg)
}

/// Three-digit heading readout, e.g. "005" or "270".
pub fn heading_text(heading_deg: f64) -> String {
    format!("{:0>3}", to_fixed(heading_deg, 0))
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoseLabel {
    pub text: &'static str,
    /// Angle in the rose's own frame, clockwise from north.
    pub angle_deg: f64,
    pub large: bool,
}

/// Cardinal and intercardinal labels every 45 degrees; cardinals are drawn large.
pub fn rose_labels() -> Vec<RoseLabel> {
    DIRECTIONS
        .iter()
        .enumerate()
        .map(|(i, &text)| RoseLabel {
            text,
            angle_deg: 45.0 * i as f64,
            large: text.len() == 1,
        })
        .collect()
}
