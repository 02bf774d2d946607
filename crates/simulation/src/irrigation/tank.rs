use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::irrigation::zones::IrrigationZone;
use crate::notifications::{NotificationEvent, NotificationPriority};
use crate::{SimulationSet, TickCounter};

/// Water usage cadence: every 10 ticks (1 s at 10 Hz).
pub const WATER_TICK_INTERVAL: u64 = 10;

/// Shared tank capacity in liters.
pub const TANK_CAPACITY_L: f32 = 5000.0;

/// Liters drawn per usage tick per actively watering zone.
pub const FLOW_PER_ZONE_L: f32 = 5.0;

/// The finite water supply shared across all zones.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct WaterTank {
    /// Total tank capacity in liters (constant for a given farm).
    pub capacity_l: f32,
    /// Liters drawn since the tank was last filled.
    pub used_l: f32,
}

impl Default for WaterTank {
    fn default() -> Self {
        Self {
            capacity_l: TANK_CAPACITY_L,
            used_l: 0.0,
        }
    }
}

impl WaterTank {
    /// Liters still available.
    pub fn remaining_l(&self) -> f32 {
        (self.capacity_l - self.used_l).max(0.0)
    }

    /// Remaining fill fraction (0.0 to 1.0). Returns 0.0 if no capacity.
    pub fn fill_pct(&self) -> f32 {
        if self.capacity_l > 0.0 {
            self.remaining_l() / self.capacity_l
        } else {
            0.0
        }
    }

    /// Whether the tank has nothing left to give.
    pub fn is_empty(&self) -> bool {
        self.remaining_l() <= 0.0
    }
}

/// Master on/off state of the irrigation system.
#[derive(Resource, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IrrigationSystem {
    pub running: bool,
}

/// System: draw water for every active zone on the 1-second cadence.
///
/// When the tank runs dry the system is forced to a stop: `running` flips
/// false, watering zones fall back to idle, and an emergency notification
/// is raised for the operator.
pub fn update_water_usage(
    tick: Res<TickCounter>,
    mut tank: ResMut<WaterTank>,
    mut system: ResMut<IrrigationSystem>,
    mut zones: Query<&mut IrrigationZone>,
    mut notify: EventWriter<NotificationEvent>,
) {
    if !tick.0.is_multiple_of(WATER_TICK_INTERVAL) || !system.running {
        return;
    }

    let active = zones.iter().filter(|z| z.status.is_watering()).count();
    if active == 0 {
        return;
    }

    tank.used_l = (tank.used_l + FLOW_PER_ZONE_L * active as f32).min(tank.capacity_l);

    if tank.is_empty() {
        system.running = false;
        for mut zone in &mut zones {
            if zone.status.is_watering() {
                zone.status = crate::irrigation::zones::ZoneStatus::Idle;
            }
        }
        warn!("Water tank exhausted after {} L; irrigation halted", tank.used_l);
        notify.send(NotificationEvent {
            text: "Water tank exhausted. Irrigation system stopped.".to_string(),
            priority: NotificationPriority::Emergency,
        });
    }
}

pub struct TankPlugin;

impl Plugin for TankPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WaterTank>()
            .init_resource::<IrrigationSystem>()
            .add_systems(
                FixedUpdate,
                update_water_usage.in_set(SimulationSet::Simulation),
            );
    }
}
