//! Typed access to simulator telemetry.
//!
//! Every channel is a {quantity, unit} pair. Samples are checked and
//! converted once here so the geometry code only ever sees knots, degrees and
//! feet.

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DialConfig;
use crate::GeoPoint;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    IndicatedAirspeed,
    MachNumber,
    Heading,
    TrueAltitude,
    IndicatedAltitude,
    WindDirection,
    WindVelocity,
    Latitude,
    Longitude,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Knots,
    Mach,
    Degrees,
    Radians,
    Feet,
    Meters,
}

impl Quantity {
    /// Simulator variable this quantity is read from.
    pub fn simvar(self) -> &'static str {
        match self {
            Quantity::IndicatedAirspeed => "A:AIRSPEED INDICATED",
            Quantity::MachNumber => "A:AIRSPEED MACH",
            Quantity::Heading => "A:PLANE HEADING DEGREES GYRO",
            Quantity::TrueAltitude => "A:PLANE ALTITUDE",
            Quantity::IndicatedAltitude => "A:INDICATED ALTITUDE",
            Quantity::WindDirection => "A:AMBIENT WIND DIRECTION",
            Quantity::WindVelocity => "A:AMBIENT WIND VELOCITY",
            Quantity::Latitude => "A:PLANE LATITUDE",
            Quantity::Longitude => "A:PLANE LONGITUDE",
        }
    }

    /// Unit the engine works in for this quantity.
    pub fn canonical_unit(self) -> Unit {
        match self {
            Quantity::IndicatedAirspeed | Quantity::WindVelocity => Unit::Knots,
            Quantity::MachNumber => Unit::Mach,
            Quantity::Heading
            | Quantity::WindDirection
            | Quantity::Latitude
            | Quantity::Longitude => Unit::Degrees,
            Quantity::TrueAltitude | Quantity::IndicatedAltitude => Unit::Feet,
        }
    }
}

const FEET_PER_METER: f64 = 3.280_84;

/// A raw value tagged with the unit the source delivered it in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub value: f64,
    pub unit: Unit,
}

impl Sample {
    pub const fn new(value: f64, unit: Unit) -> Self {
        Sample { value, unit }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TelemetryError {
    #[error("no sample for {0:?}")]
    Missing(Quantity),
    #[error("{quantity:?} delivered in {unit:?}, which cannot be converted to {expected:?}")]
    UnitMismatch {
        quantity: Quantity,
        unit: Unit,
        expected: Unit,
    },
    #[error("{0:?} is not a finite number")]
    NonFinite(Quantity),
}

pub trait TelemetrySource {
    fn sample(&self, quantity: Quantity) -> Option<Sample>;
}

/// One recorded set of samples, as replayed by the driver binary.
pub type TelemetryFrame = HashMap<Quantity, Sample>;

impl TelemetrySource for TelemetryFrame {
    fn sample(&self, quantity: Quantity) -> Option<Sample> {
        self.get(&quantity).copied()
    }
}

/// Reads `quantity` from `source` in its canonical unit.
pub fn read_canonical(source: &dyn TelemetrySource, quantity: Quantity) -> Result<f64, TelemetryError> {
    let sample = source
        .sample(quantity)
        .ok_or(TelemetryError::Missing(quantity))?;
    if !sample.value.is_finite() {
        return Err(TelemetryError::NonFinite(quantity));
    }
    let expected = quantity.canonical_unit();
    match (sample.unit, expected) {
        (unit, expected) if unit == expected => Ok(sample.value),
        (Unit::Radians, Unit::Degrees) => Ok(sample.value.to_degrees()),
        (Unit::Meters, Unit::Feet) => Ok(sample.value * FEET_PER_METER),
        (unit, expected) => Err(TelemetryError::UnitMismatch {
            quantity,
            unit,
            expected,
        }),
    }
}

/// Like [`read_canonical`], for channels that only feed optional badges: a
/// missing or unusable sample reads as zero and is logged at debug level.
pub fn read_optional(source: &dyn TelemetrySource, quantity: Quantity) -> f64 {
    read_canonical(source, quantity).unwrap_or_else(|err| {
        debug!("{} unavailable, using 0: {err}", quantity.simvar());
        0.0
    })
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct InstrumentReading {
    pub indicated_speed_kt: f64,
    pub mach: f64,
    /// Heading in degrees, normalized to [0, 360).
    pub heading_deg: f64,
    pub altitude_ft: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Wind {
    pub direction_deg: f64,
    pub velocity_kt: f64,
}

/// Everything one redraw needs from the simulator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct FlightSnapshot {
    pub reading: InstrumentReading,
    pub wind: Wind,
    pub position: GeoPoint,
}

impl FlightSnapshot {
    pub fn sample(source: &dyn TelemetrySource, config: &DialConfig) -> Result<Self, TelemetryError> {
        let altitude = if config.indicated_altitude {
            Quantity::IndicatedAltitude
        } else {
            Quantity::TrueAltitude
        };
        let reading = InstrumentReading {
            indicated_speed_kt: read_canonical(source, Quantity::IndicatedAirspeed)?,
            mach: read_canonical(source, Quantity::MachNumber)?,
            heading_deg: read_canonical(source, Quantity::Heading)?.rem_euclid(360.0),
            altitude_ft: read_canonical(source, altitude)?,
        };
        let wind = Wind {
            direction_deg: read_optional(source, Quantity::WindDirection),
            velocity_kt: read_optional(source, Quantity::WindVelocity),
        };
        let position = GeoPoint::new(
            read_optional(source, Quantity::Latitude),
            read_optional(source, Quantity::Longitude),
        );
        Ok(FlightSnapshot {
            reading,
            wind,
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn frame(entries: &[(Quantity, f64, Unit)]) -> TelemetryFrame {
        entries
            .iter()
            .map(|&(q, v, u)| (q, Sample::new(v, u)))
            .collect()
    }

    fn cruise() -> TelemetryFrame {
        frame(&[
            (Quantity::IndicatedAirspeed, 260.0, Unit::Knots),
            (Quantity::MachNumber, 0.45, Unit::Mach),
            (Quantity::Heading, -std::f64::consts::FRAC_PI_2, Unit::Radians),
            (Quantity::TrueAltitude, 5000.0, Unit::Feet),
            (Quantity::IndicatedAltitude, 1000.0, Unit::Meters),
            (Quantity::WindDirection, std::f64::consts::PI, Unit::Radians),
            (Quantity::WindVelocity, 12.0, Unit::Knots),
            (Quantity::Latitude, 52.3, Unit::Degrees),
            (Quantity::Longitude, 4.76, Unit::Degrees),
        ])
    }

    #[test]
    fn converts_to_canonical_units() {
        let source = cruise();
        let snapshot = FlightSnapshot::sample(&source, &DialConfig::default()).expect("snapshot");
        assert_approx_eq!(snapshot.reading.heading_deg, 270.0, 1e-9);
        assert_eq!(snapshot.reading.altitude_ft, 5000.0);
        assert_approx_eq!(snapshot.wind.direction_deg, 180.0, 1e-9);
        assert_eq!(snapshot.position, GeoPoint::new(52.3, 4.76));

        let indicated = DialConfig {
            indicated_altitude: true,
            ..DialConfig::default()
        };
        let snapshot = FlightSnapshot::sample(&source, &indicated).expect("snapshot");
        assert_approx_eq!(snapshot.reading.altitude_ft, 3280.84, 1e-6);
    }

    #[test]
    fn rejects_incompatible_units() {
        let source = frame(&[(Quantity::Heading, 90.0, Unit::Feet)]);
        assert_eq!(
            read_canonical(&source, Quantity::Heading),
            Err(TelemetryError::UnitMismatch {
                quantity: Quantity::Heading,
                unit: Unit::Feet,
                expected: Unit::Degrees,
            })
        );
    }

    #[test]
    fn rejects_missing_and_non_finite() {
        let mut source = cruise();
        source.remove(&Quantity::MachNumber);
        assert_eq!(
            FlightSnapshot::sample(&source, &DialConfig::default()),
            Err(TelemetryError::Missing(Quantity::MachNumber))
        );

        source.insert(Quantity::MachNumber, Sample::new(f64::NAN, Unit::Mach));
        assert_eq!(
            read_canonical(&source, Quantity::MachNumber),
            Err(TelemetryError::NonFinite(Quantity::MachNumber))
        );
    }

    #[test]
    fn badge_channels_are_optional() {
        let mut source = cruise();
        source.remove(&Quantity::WindVelocity);
        source.remove(&Quantity::Latitude);
        let snapshot = FlightSnapshot::sample(&source, &DialConfig::default()).expect("snapshot");
        assert_eq!(snapshot.wind.velocity_kt, 0.0);
        assert_eq!(snapshot.position.lat_deg, 0.0);
    }

    #[test]
    fn unusable_badge_channels_read_as_zero() {
        let mut source = cruise();
        source.insert(Quantity::WindDirection, Sample::new(180.0, Unit::Knots));
        source.insert(Quantity::Longitude, Sample::new(f64::INFINITY, Unit::Degrees));
        assert_eq!(read_optional(&source, Quantity::WindDirection), 0.0);

        let snapshot = FlightSnapshot::sample(&source, &DialConfig::default()).expect("snapshot");
        assert_eq!(snapshot.wind.direction_deg, 0.0);
        assert_eq!(snapshot.wind.velocity_kt, 12.0);
        assert_eq!(snapshot.position, GeoPoint::new(52.3, 0.0));
    }

    #[test]
    fn simvar_names() {
        assert_eq!(Quantity::MachNumber.simvar(), "A:AIRSPEED MACH");
        assert_eq!(Quantity::Heading.canonical_unit(), Unit::Degrees);
    }
}
