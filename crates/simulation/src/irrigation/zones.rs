use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sim_rng::SimRng;
use crate::{SimulationSet, TickCounter};

/// Moisture simulation cadence: every 30 ticks (3 s at 10 Hz).
pub const MOISTURE_TICK_INTERVAL: u64 = 30;

/// Ceiling an actively irrigated zone climbs toward.
pub const MOISTURE_ACTIVE_CEIL: f32 = 95.0;

/// Floor an unwatered zone dries out toward.
pub const MOISTURE_DECAY_FLOOR: f32 = 40.0;

/// Largest moisture gain per moisture tick while irrigating.
const MOISTURE_RISE_MAX: f32 = 2.0;

/// Largest moisture loss per moisture tick while drying.
const MOISTURE_DECAY_MAX: f32 = 0.5;

/// Above this a resting zone reads as well-watered.
const MOISTURE_GOOD_THRESHOLD: f32 = 75.0;

/// Below this a resting zone needs attention.
const MOISTURE_WARNING_THRESHOLD: f32 = 60.0;

/// Operational status of an irrigation zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ZoneStatus {
    /// Valves open, moisture rising.
    Active,
    /// Valves closed, moisture in the comfortable band.
    #[default]
    Idle,
    /// Valves closed, moisture running low.
    Warning,
    /// Faulted or emergency-stopped. Frozen until cleared.
    Critical,
    /// Valves closed, moisture plentiful.
    Good,
}

impl ZoneStatus {
    /// Human-readable name for display.
    pub fn label(self) -> &'static str {
        match self {
            ZoneStatus::Active => "Active",
            ZoneStatus::Idle => "Idle",
            ZoneStatus::Warning => "Warning",
            ZoneStatus::Critical => "Critical",
            ZoneStatus::Good => "Good",
        }
    }

    /// Critical zones refuse toggles and are skipped by start/stop.
    pub fn is_critical(self) -> bool {
        matches!(self, ZoneStatus::Critical)
    }

    /// Whether the zone is currently drawing water.
    pub fn is_watering(self) -> bool {
        matches!(self, ZoneStatus::Active)
    }
}

/// A named irrigation area with live sensor readings.
///
/// Zones are spawned once at startup from the fixture set and never
/// persisted; all mutation happens through the tick systems and the
/// command executor.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationZone {
    pub zone_id: u32,
    pub name: String,
    /// Soil moisture percentage (0-100).
    pub moisture: f32,
    pub status: ZoneStatus,
    /// Irrigated area in hectares.
    pub area_ha: f32,
    /// Local air temperature reading (Celsius).
    pub temperature: f32,
    /// Local wind speed reading (km/h).
    pub wind_kmh: f32,
    /// Stable microclimate offsets relative to farm-wide weather, fixed at
    /// seed time (the greenhouse runs warm and sheltered, the west garden
    /// windy). Applied by the weather sync system.
    pub temp_bias: f32,
    pub wind_bias: f32,
}

/// Classify a resting (non-active, non-critical) zone from its moisture.
pub fn classify_moisture(moisture: f32) -> ZoneStatus {
    if moisture > MOISTURE_GOOD_THRESHOLD {
        ZoneStatus::Good
    } else if moisture < MOISTURE_WARNING_THRESHOLD {
        ZoneStatus::Warning
    } else {
        ZoneStatus::Idle
    }
}

/// Advance one zone by one moisture tick.
///
/// Pure transition function: `(status, moisture, roll)` → `(status, moisture)`,
/// where `roll` is a uniform sample in `[0, 1)` scaling the bounded step.
///
/// - `Active`: moisture rises by up to [`MOISTURE_RISE_MAX`], capped at
///   [`MOISTURE_ACTIVE_CEIL`]; status is left alone.
/// - `Critical`: frozen entirely.
/// - otherwise: moisture decays by up to [`MOISTURE_DECAY_MAX`], floored at
///   [`MOISTURE_DECAY_FLOOR`], then the zone is reclassified.
pub fn step_zone(status: ZoneStatus, moisture: f32, roll: f32) -> (ZoneStatus, f32) {
    match status {
        ZoneStatus::Active => {
            let risen = (moisture + roll * MOISTURE_RISE_MAX).min(MOISTURE_ACTIVE_CEIL);
            // A zone already above the ceiling (e.g. after heavy rain data)
            // is not dragged down by the cap.
            (status, risen.max(moisture))
        }
        ZoneStatus::Critical => (status, moisture),
        _ => {
            let dried = if moisture > MOISTURE_DECAY_FLOOR {
                (moisture - roll * MOISTURE_DECAY_MAX).max(MOISTURE_DECAY_FLOOR)
            } else {
                moisture
            };
            (classify_moisture(dried), dried)
        }
    }
}

/// System: random-walk every zone's moisture on the 3-second cadence.
pub fn update_zone_moisture(
    tick: Res<TickCounter>,
    mut rng: ResMut<SimRng>,
    mut zones: Query<&mut IrrigationZone>,
) {
    if !tick.0.is_multiple_of(MOISTURE_TICK_INTERVAL) {
        return;
    }
    for mut zone in &mut zones {
        let roll = rng.0.gen::<f32>();
        let (status, moisture) = step_zone(zone.status, zone.moisture, roll);
        zone.status = status;
        zone.moisture = moisture;
    }
}

pub struct ZonesPlugin;

impl Plugin for ZonesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            update_zone_moisture.in_set(SimulationSet::Simulation),
        );
    }
}
