//! Farm equipment monitoring: fuel/battery drain while working, idle
//! recharge for battery units, and maintenance flagging with recovery.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::notifications::{NotificationEvent, NotificationPriority};
use crate::sim_rng::SimRng;
use crate::{SimulationSet, SlowTickTimer};

/// At or below this metric level a unit is pulled in for maintenance.
const MAINTENANCE_THRESHOLD: f32 = 15.0;

/// A unit under maintenance returns to service at this metric level.
const SERVICEABLE_THRESHOLD: f32 = 60.0;

/// Idle battery recharge per slow tick.
const IDLE_RECHARGE: f32 = 1.0;

/// Refuel/recharge rate per slow tick while under maintenance.
const SERVICE_RATE: f32 = 2.0;

/// Largest metric drain per slow tick while working.
const DRAIN_MAX: f32 = 2.0;

/// Smallest metric drain per slow tick while working.
const DRAIN_MIN: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentKind {
    Tractor,
    Harvester,
    Pump,
    Sprayer,
    Drone,
    Sensor,
}

impl EquipmentKind {
    pub fn label(self) -> &'static str {
        match self {
            EquipmentKind::Tractor => "Tractor",
            EquipmentKind::Harvester => "Harvester",
            EquipmentKind::Pump => "Pump",
            EquipmentKind::Sprayer => "Sprayer",
            EquipmentKind::Drone => "Drone",
            EquipmentKind::Sensor => "Sensor",
        }
    }
}

/// What the unit's level metric measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricKind {
    Fuel,
    Battery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EquipmentStatus {
    Active,
    #[default]
    Idle,
    Maintenance,
}

impl EquipmentStatus {
    pub fn label(self) -> &'static str {
        match self {
            EquipmentStatus::Active => "Active",
            EquipmentStatus::Idle => "Idle",
            EquipmentStatus::Maintenance => "Maintenance",
        }
    }
}

/// A monitored piece of farm equipment.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub equipment_id: u32,
    pub name: String,
    pub kind: EquipmentKind,
    pub status: EquipmentStatus,
    pub metric_kind: MetricKind,
    /// Fuel or charge level (0-100).
    pub metric_value: f32,
    /// Operating efficiency (0-100).
    pub efficiency: f32,
}

/// One monitoring step for a unit.
///
/// Pure transition: `(status, metric_kind, value, drain)` → `(status, value)`.
/// Working units burn their metric and drop into maintenance when it runs
/// out; idle battery units trickle-charge; units under maintenance are
/// serviced back up and released once serviceable.
pub fn step_equipment(
    status: EquipmentStatus,
    metric_kind: MetricKind,
    value: f32,
    drain: f32,
) -> (EquipmentStatus, f32) {
    match status {
        EquipmentStatus::Active => {
            let drained = (value - drain).max(0.0);
            if drained <= MAINTENANCE_THRESHOLD {
                (EquipmentStatus::Maintenance, drained)
            } else {
                (EquipmentStatus::Active, drained)
            }
        }
        EquipmentStatus::Idle => match metric_kind {
            MetricKind::Battery => (EquipmentStatus::Idle, (value + IDLE_RECHARGE).min(100.0)),
            MetricKind::Fuel => {
                if value <= MAINTENANCE_THRESHOLD {
                    (EquipmentStatus::Maintenance, value)
                } else {
                    (EquipmentStatus::Idle, value)
                }
            }
        },
        EquipmentStatus::Maintenance => {
            let serviced = (value + SERVICE_RATE).min(100.0);
            if serviced >= SERVICEABLE_THRESHOLD {
                (EquipmentStatus::Idle, serviced)
            } else {
                (EquipmentStatus::Maintenance, serviced)
            }
        }
    }
}

/// System: advance every unit on the slow tick and notify on status changes.
pub fn update_equipment(
    timer: Res<SlowTickTimer>,
    mut rng: ResMut<SimRng>,
    mut units: Query<&mut Equipment>,
    mut notify: EventWriter<NotificationEvent>,
) {
    if !timer.should_run() {
        return;
    }
    for mut unit in &mut units {
        let drain = rng.0.gen_range(DRAIN_MIN..DRAIN_MAX);
        let (status, value) = step_equipment(unit.status, unit.metric_kind, unit.metric_value, drain);

        if status != unit.status {
            match status {
                EquipmentStatus::Maintenance => {
                    notify.send(NotificationEvent {
                        text: format!(
                            "{} pulled in for maintenance ({} at {:.0}%).",
                            unit.name,
                            match unit.metric_kind {
                                MetricKind::Fuel => "fuel",
                                MetricKind::Battery => "battery",
                            },
                            value
                        ),
                        priority: NotificationPriority::Warning,
                    });
                }
                EquipmentStatus::Idle => {
                    notify.send(NotificationEvent {
                        text: format!("{} serviced and back in the fleet.", unit.name),
                        priority: NotificationPriority::Positive,
                    });
                }
                EquipmentStatus::Active => {}
            }
        }

        unit.status = status;
        unit.metric_value = value;
        if unit.status == EquipmentStatus::Active {
            unit.efficiency = (unit.efficiency + rng.0.gen_range(-0.5..0.5)).clamp(0.0, 100.0);
        }
    }
}

pub struct EquipmentPlugin;

impl Plugin for EquipmentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            update_equipment.in_set(SimulationSet::Simulation),
        );
    }
}
