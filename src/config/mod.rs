use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::{read_json_file, DataError};

pub const MIN_CANVAS_SIZE_PX: u32 = 300;
pub const DEFAULT_TOGGLE_SPEED_KT: f64 = 237.0;
pub const DEFAULT_MACH_SWAP: f64 = 0.79;

/// Dial settings. Owned by the settings store; the engine only reads it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialConfig {
    pub canvas_size_px: u32,
    /// Indicated airspeed above which the tape switches from 250 to 500 kt.
    pub toggle_speed_kt: f64,
    pub mach_enabled: bool,
    pub mach_swap_threshold: f64,
    pub show_altitude: bool,
    /// Read indicated instead of true altitude.
    pub indicated_altitude: bool,
    pub show_server: bool,
    pub show_wind: bool,
    pub show_nearest: bool,
    pub enable_highlights: bool,
    /// Airports need a runway strictly longer than this to count as nearest.
    pub nearest_min_runway_m: f64,
}

impl Default for DialConfig {
    fn default() -> Self {
        DialConfig {
            canvas_size_px: MIN_CANVAS_SIZE_PX,
            toggle_speed_kt: DEFAULT_TOGGLE_SPEED_KT,
            mach_enabled: false,
            mach_swap_threshold: DEFAULT_MACH_SWAP,
            show_altitude: false,
            indicated_altitude: false,
            show_server: false,
            show_wind: false,
            show_nearest: false,
            enable_highlights: false,
            nearest_min_runway_m: 0.0,
        }
    }
}

impl DialConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let config: DialConfig = read_json_file(path)?;
        Ok(config.sanitized())
    }

    /// Clamps numeric fields into their valid ranges. Non-finite values fall
    /// back to the defaults.
    pub fn sanitized(mut self) -> Self {
        self.canvas_size_px = self.canvas_size_px.max(MIN_CANVAS_SIZE_PX);
        self.toggle_speed_kt = non_negative(self.toggle_speed_kt, DEFAULT_TOGGLE_SPEED_KT);
        self.mach_swap_threshold = non_negative(self.mach_swap_threshold, DEFAULT_MACH_SWAP);
        self.nearest_min_runway_m = non_negative(self.nearest_min_runway_m, 0.0);
        self
    }

    pub fn set_canvas_size(&mut self, text: &str) {
        let size = ensure_numeric_setting(text, f64::from(MIN_CANVAS_SIZE_PX));
        // float to int casts saturate; sizes are whole pixels
        self.canvas_size_px = (size as u32).max(MIN_CANVAS_SIZE_PX);
    }

    pub fn set_toggle_speed(&mut self, text: &str) {
        self.toggle_speed_kt = ensure_numeric_setting(text, DEFAULT_TOGGLE_SPEED_KT).max(0.0);
    }

    pub fn set_mach_swap_speed(&mut self, text: &str) {
        self.mach_swap_threshold = ensure_numeric_setting(text, DEFAULT_MACH_SWAP).max(0.0);
    }

    pub fn set_nearest_min_runway(&mut self, text: &str) {
        self.nearest_min_runway_m = ensure_numeric_setting(text, 0.0).max(0.0);
    }
}

fn non_negative(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        default
    }
}

/// Parses a numeric setting typed as free text. Everything except digits and
/// '.' is stripped first; empty or unparsable input yields `default`.
pub fn ensure_numeric_setting(text: &str, default: f64) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return default;
    }
    match cleaned.parse::<f64>() {
        Ok(value) => value,
        Err(err) => {
            debug!("setting {text:?} is not numeric ({err}), using {default}");
            default
        }
    }
}
