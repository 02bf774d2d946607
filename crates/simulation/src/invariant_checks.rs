//! Runtime invariant guards for the core simulation resources.
//!
//! These systems run every slow-tick cycle (~100 ticks) and validate that
//! core values haven't become corrupted (NaN, infinity, or out-of-range).
//! On violation, a warning is logged and the value is clamped or reset to
//! a safe default.

use bevy::prelude::*;

use crate::crops::Crop;
use crate::equipment::Equipment;
use crate::irrigation::tank::WaterTank;
use crate::irrigation::zones::{IrrigationZone, MOISTURE_DECAY_FLOOR};
use crate::{SimulationSet, SlowTickTimer};

/// Tracks the number of invariant violations detected during the last
/// validation pass. Used by integration tests.
#[derive(Resource, Default, Debug)]
pub struct FarmInvariantViolations {
    pub zone_moisture: u32,
    pub tank: u32,
    pub crop_health: u32,
    pub equipment_metric: u32,
}

/// Validate that every zone's moisture is finite and within [0, 100].
pub fn validate_zones(
    slow_tick: Res<SlowTickTimer>,
    mut zones: Query<&mut IrrigationZone>,
    mut violations: ResMut<FarmInvariantViolations>,
) {
    if !slow_tick.should_run() {
        return;
    }
    violations.zone_moisture = 0;

    for mut zone in &mut zones {
        if !zone.moisture.is_finite() {
            warn!(
                "Invariant violation: zone {} moisture is {}. Resetting to floor.",
                zone.name, zone.moisture
            );
            zone.moisture = MOISTURE_DECAY_FLOOR;
            violations.zone_moisture += 1;
        } else if !(0.0..=100.0).contains(&zone.moisture) {
            warn!(
                "Invariant violation: zone {} moisture {} out of [0,100]. Clamping.",
                zone.name, zone.moisture
            );
            zone.moisture = zone.moisture.clamp(0.0, 100.0);
            violations.zone_moisture += 1;
        }
    }
}

/// Validate that tank usage is finite and within [0, capacity].
pub fn validate_tank(
    slow_tick: Res<SlowTickTimer>,
    mut tank: ResMut<WaterTank>,
    mut violations: ResMut<FarmInvariantViolations>,
) {
    if !slow_tick.should_run() {
        return;
    }
    violations.tank = 0;

    if !tank.used_l.is_finite() {
        warn!(
            "Invariant violation: tank used_l is {}. Resetting to 0.",
            tank.used_l
        );
        tank.used_l = 0.0;
        violations.tank += 1;
    } else if tank.used_l < 0.0 || tank.used_l > tank.capacity_l {
        warn!(
            "Invariant violation: tank used_l {} out of [0,{}]. Clamping.",
            tank.used_l, tank.capacity_l
        );
        tank.used_l = tank.used_l.clamp(0.0, tank.capacity_l);
        violations.tank += 1;
    }
}

/// Validate crop health and equipment metrics are finite and within [0, 100].
pub fn validate_fleet(
    slow_tick: Res<SlowTickTimer>,
    mut crops: Query<&mut Crop>,
    mut units: Query<&mut Equipment>,
    mut violations: ResMut<FarmInvariantViolations>,
) {
    if !slow_tick.should_run() {
        return;
    }
    violations.crop_health = 0;
    violations.equipment_metric = 0;

    for mut crop in &mut crops {
        if !crop.health.is_finite() || !(0.0..=100.0).contains(&crop.health) {
            warn!(
                "Invariant violation: crop {} health {}. Clamping.",
                crop.name, crop.health
            );
            crop.health = if crop.health.is_finite() {
                crop.health.clamp(0.0, 100.0)
            } else {
                0.0
            };
            violations.crop_health += 1;
        }
    }

    for mut unit in &mut units {
        if !unit.metric_value.is_finite() || !(0.0..=100.0).contains(&unit.metric_value) {
            warn!(
                "Invariant violation: equipment {} metric {}. Clamping.",
                unit.name, unit.metric_value
            );
            unit.metric_value = if unit.metric_value.is_finite() {
                unit.metric_value.clamp(0.0, 100.0)
            } else {
                0.0
            };
            violations.equipment_metric += 1;
        }
    }
}

pub struct InvariantChecksPlugin;

impl Plugin for InvariantChecksPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FarmInvariantViolations>().add_systems(
            FixedUpdate,
            (validate_zones, validate_tank, validate_fleet).in_set(SimulationSet::PostSim),
        );
    }
}
