use serde::Serialize;

use crate::config::DialConfig;
use crate::geometry::to_fixed;
use crate::telemetry::InstrumentReading;

/// Angle of the zero-speed end of the tape. The tape runs clockwise from here
/// to `-TAPE_START_DEG`.
pub const TAPE_START_DEG: f64 = 60.0;
pub const TAPE_SPAN_DEG: f64 = 120.0;

const MAJOR_TICK_STEP_DEG: f64 = 24.0;
const MINOR_TICK_STEP_DEG: f64 = 4.8;
const TICK_LABEL_COUNT: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    Knots,
    Mach,
}

impl SpeedUnit {
    pub fn label(self) -> &'static str {
        match self {
            SpeedUnit::Knots => "kt",
            SpeedUnit::Mach => "Mach",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpeedScale {
    pub max_value: f64,
    pub unit: SpeedUnit,
    pub decimals: usize,
    pub tick_labels: Vec<String>,
}

impl SpeedScale {
    fn new(unit: SpeedUnit, max_value: f64, decimals: usize) -> Self {
        let tick_labels = (0..TICK_LABEL_COUNT)
            .map(|i| {
                let value = max_value * i as f64 / (TICK_LABEL_COUNT - 1) as f64;
                format_tick_label(unit, value, i == 0)
            })
            .collect();
        SpeedScale {
            max_value,
            unit,
            decimals,
            tick_labels,
        }
    }

    /// The value shown in the center readout, in this scale's unit.
    pub fn displayed_speed(&self, reading: &InstrumentReading) -> f64 {
        match self.unit {
            SpeedUnit::Knots => reading.indicated_speed_kt,
            SpeedUnit::Mach => reading.mach,
        }
    }

    /// Formats the readout with the scale's decimals. Three-decimal Mach
    /// numbers drop the leading zero (".750").
    pub fn format_readout(&self, value: f64) -> String {
        let text = to_fixed(value, self.decimals);
        if self.decimals == 3 {
            if let Some(rest) = text.strip_prefix("0.") {
                return format!(".{rest}");
            }
        }
        text
    }
}

fn format_tick_label(unit: SpeedUnit, value: f64, is_zero: bool) -> String {
    match unit {
        _ if is_zero => "0".to_string(),
        SpeedUnit::Knots => to_fixed(value, 0),
        SpeedUnit::Mach => to_fixed(value, 2),
    }
}

/// Picks unit, range and readout precision for the current reading.
pub fn select_speed_scale(reading: &InstrumentReading, config: &DialConfig) -> SpeedScale {
    if config.mach_enabled && reading.mach >= config.mach_swap_threshold {
        let max_value = if reading.mach > 2.9 {
            5.0
        } else if reading.mach > 1.9 {
            3.0
        } else if reading.mach > 0.9 {
            2.0
        } else {
            1.0
        };
        let decimals = if reading.mach >= 1.0 { 2 } else { 3 };
        SpeedScale::new(SpeedUnit::Mach, max_value, decimals)
    } else if reading.indicated_speed_kt > config.toggle_speed_kt {
        SpeedScale::new(SpeedUnit::Knots, 500.0, 0)
    } else {
        SpeedScale::new(SpeedUnit::Knots, 250.0, 0)
    }
}

/// End angle of the filled tape: +60 at zero, -60 at (and beyond) full scale.
pub fn speed_to_arc_angle(speed: f64, scale: &SpeedScale) -> f64 {
    let clamped = speed.min(scale.max_value);
    let fraction = clamped / scale.max_value;
    TAPE_START_DEG - TAPE_SPAN_DEG * fraction
}

/// Angles of the long ticks, one per tick label, from +60 down to -60.
pub fn major_tick_angles() -> Vec<f64> {
    tick_angles(MAJOR_TICK_STEP_DEG)
}

pub fn minor_tick_angles() -> Vec<f64> {
    tick_angles(MINOR_TICK_STEP_DEG)
}

fn tick_angles(step: f64) -> Vec<f64> {
    let count = (TAPE_SPAN_DEG / step).round() as usize;
    (0..=count).map(|i| TAPE_START_DEG - step * i as f64).collect()
}

/// A tick label with its angle on the dial. The two end labels are pushed
/// off the arc so they do not collide with the tape caps; `nudge` is in
/// 300 px canvas units.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TickLabel {
    pub text: String,
    pub angle_deg: f64,
    pub nudge: (f64, f64),
}

pub fn place_tick_labels(scale: &SpeedScale) -> Vec<TickLabel> {
    let last = scale.tick_labels.len().saturating_sub(1);
    scale
        .tick_labels
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            let nudge = if idx == 0 {
                (3.0, -8.0)
            } else if idx == last {
                (27.0, 10.0)
            } else {
                (0.0, 0.0)
            };
            TickLabel {
                text: text.clone(),
                angle_deg: TAPE_START_DEG - MAJOR_TICK_STEP_DEG * idx as f64,
                nudge,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn reading(indicated_speed_kt: f64, mach: f64) -> InstrumentReading {
        InstrumentReading {
            indicated_speed_kt,
            mach,
            heading_deg: 0.0,
            altitude_ft: 0.0,
        }
    }

    fn mach_config() -> DialConfig {
        DialConfig {
            mach_enabled: true,
            mach_swap_threshold: 0.79,
            ..DialConfig::default()
        }
    }

    #[test]
    fn knots_scale_switches_above_toggle_speed() {
        let config = DialConfig::default();
        let low = select_speed_scale(&reading(237.0, 0.0), &config);
        assert_eq!(low.max_value, 250.0);
        assert_eq!(low.tick_labels, ["0", "50", "100", "150", "200", "250"]);

        let high = select_speed_scale(&reading(237.5, 0.0), &config);
        assert_eq!(high.max_value, 500.0);
        assert_eq!(high.unit.label(), "kt");
        assert_eq!(high.decimals, 0);
    }

    #[test]
    fn mach_scale_is_a_step_function() {
        let config = mach_config();
        let max = |m: f64| select_speed_scale(&reading(300.0, m), &config).max_value;
        assert_eq!(max(0.85), 1.0);
        assert_eq!(max(0.95), 2.0);
        assert_eq!(max(1.95), 3.0);
        assert_eq!(max(2.95), 5.0);
    }

    #[test]
    fn mach_below_threshold_stays_in_knots() {
        let scale = select_speed_scale(&reading(300.0, 0.78), &mach_config());
        assert_eq!(scale.unit, SpeedUnit::Knots);
        assert_eq!(scale.max_value, 500.0);

        let disabled = DialConfig {
            mach_enabled: false,
            ..mach_config()
        };
        let scale = select_speed_scale(&reading(300.0, 1.5), &disabled);
        assert_eq!(scale.unit, SpeedUnit::Knots);
    }

    #[test]
    fn mach_labels_and_decimals() {
        let config = mach_config();
        let subsonic = select_speed_scale(&reading(300.0, 0.85), &config);
        assert_eq!(subsonic.unit.label(), "Mach");
        assert_eq!(subsonic.decimals, 3);
        assert_eq!(subsonic.tick_labels, ["0", "0.20", "0.40", "0.60", "0.80", "1.00"]);

        let supersonic = select_speed_scale(&reading(300.0, 2.95), &config);
        assert_eq!(supersonic.decimals, 2);
        assert_eq!(supersonic.tick_labels, ["0", "1.00", "2.00", "3.00", "4.00", "5.00"]);
    }

    #[test]
    fn tick_labels_span_the_scale_in_five_steps() {
        let config = mach_config();
        for (kt, m) in [(100.0, 0.0), (400.0, 0.0), (300.0, 0.85), (300.0, 0.95), (300.0, 1.95)] {
            let scale = select_speed_scale(&reading(kt, m), &config);
            assert_eq!(scale.tick_labels.len(), 6);
            for (i, label) in scale.tick_labels.iter().enumerate() {
                let value: f64 = label.parse().expect("numeric label");
                assert_approx_eq!(value, scale.max_value * i as f64 / 5.0, 1e-9);
            }
        }
    }

    #[test]
    fn readout_drops_leading_zero_for_three_decimals() {
        let config = mach_config();
        let scale = select_speed_scale(&reading(300.0, 0.75), &DialConfig {
            mach_swap_threshold: 0.5,
            ..config
        });
        assert_eq!(scale.format_readout(0.75), ".750");

        let knots = select_speed_scale(&reading(123.4, 0.0), &DialConfig::default());
        assert_eq!(knots.format_readout(123.4), "123");

        let fast = select_speed_scale(&reading(300.0, 1.234), &mach_config());
        assert_eq!(fast.format_readout(1.234), "1.23");
    }

    #[test]
    fn readout_rounds_half_up() {
        let knots = select_speed_scale(&reading(260.5, 0.0), &DialConfig::default());
        assert_eq!(knots.format_readout(260.5), "261");
        assert_eq!(knots.format_readout(259.5), "260");

        let fast = select_speed_scale(&reading(300.0, 1.125), &mach_config());
        assert_eq!(fast.format_readout(1.125), "1.13");
    }

    #[test]
    fn arc_angle_is_bounded_monotone_and_clamped() {
        let scale = select_speed_scale(&reading(100.0, 0.0), &DialConfig::default());
        assert_eq!(speed_to_arc_angle(0.0, &scale), 60.0);
        assert_eq!(speed_to_arc_angle(250.0, &scale), -60.0);
        assert_eq!(speed_to_arc_angle(400.0, &scale), -60.0);

        let mut previous = f64::INFINITY;
        for kt in 0..=250 {
            let angle = speed_to_arc_angle(kt as f64, &scale);
            assert!((-60.0..=60.0).contains(&angle));
            assert!(angle < previous);
            previous = angle;
        }
    }

    #[test]
    fn tick_geometry() {
        let major = major_tick_angles();
        assert_eq!(major.len(), 6);
        assert_approx_eq!(major[0], 60.0);
        assert_approx_eq!(major[5], -60.0);

        let minor = minor_tick_angles();
        assert_eq!(minor.len(), 26);
        assert_approx_eq!(minor[25], -60.0, 1e-9);

        let scale = select_speed_scale(&reading(100.0, 0.0), &DialConfig::default());
        let labels = place_tick_labels(&scale);
        assert_eq!(labels[0].nudge, (3.0, -8.0));
        assert_eq!(labels[5].nudge, (27.0, 10.0));
        assert_eq!(labels[2].angle_deg, 12.0);
    }
}
