use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::irrigation::tank::{IrrigationSystem, WaterTank};
use crate::irrigation::zones::{IrrigationZone, ZoneStatus};
use crate::notifications::{NotificationEvent, NotificationPriority};
use crate::SimulationSet;

/// Operator command against the irrigation system.
///
/// Commands are queued as events and applied by [`apply_farm_commands`] at
/// the start of the next tick, so every system downstream of `PreSim` sees
/// a consistent zone/system state.
#[derive(Event, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FarmCommand {
    /// Start watering: all non-critical zones go active. Refused when the
    /// tank is empty.
    StartSystem,
    /// Stop watering: all non-critical zones go idle.
    StopSystem,
    /// Halt everything immediately: every zone is forced critical.
    EmergencyStop,
    /// Flip a single zone between active and idle. Critical zones refuse.
    ToggleZone { zone_id: u32 },
}

/// System: drain queued [`FarmCommand`]s and apply them.
pub fn apply_farm_commands(
    mut commands: EventReader<FarmCommand>,
    mut system: ResMut<IrrigationSystem>,
    tank: Res<WaterTank>,
    mut zones: Query<&mut IrrigationZone>,
    mut notify: EventWriter<NotificationEvent>,
) {
    for command in commands.read() {
        match command {
            FarmCommand::StartSystem => {
                if tank.is_empty() {
                    notify.send(NotificationEvent {
                        text: "Cannot start irrigation: water tank is empty.".to_string(),
                        priority: NotificationPriority::Warning,
                    });
                    continue;
                }
                system.running = true;
                for mut zone in &mut zones {
                    if !zone.status.is_critical() {
                        zone.status = ZoneStatus::Active;
                    }
                }
                info!("irrigation system started");
                notify.send(NotificationEvent {
                    text: "Irrigation system started. All zones activated.".to_string(),
                    priority: NotificationPriority::Info,
                });
            }
            FarmCommand::StopSystem => {
                system.running = false;
                for mut zone in &mut zones {
                    if !zone.status.is_critical() {
                        zone.status = ZoneStatus::Idle;
                    }
                }
                info!("irrigation system stopped");
                notify.send(NotificationEvent {
                    text: "Irrigation system stopped. All zones paused.".to_string(),
                    priority: NotificationPriority::Info,
                });
            }
            FarmCommand::EmergencyStop => {
                system.running = false;
                for mut zone in &mut zones {
                    zone.status = ZoneStatus::Critical;
                }
                warn!("emergency stop activated");
                notify.send(NotificationEvent {
                    text: "Emergency stop activated. All irrigation halted immediately."
                        .to_string(),
                    priority: NotificationPriority::Emergency,
                });
            }
            FarmCommand::ToggleZone { zone_id } => {
                let Some(mut zone) = zones.iter_mut().find(|z| z.zone_id == *zone_id) else {
                    notify.send(NotificationEvent {
                        text: format!("No irrigation zone with id {}.", zone_id),
                        priority: NotificationPriority::Warning,
                    });
                    continue;
                };
                if zone.status.is_critical() {
                    notify.send(NotificationEvent {
                        text: format!(
                            "Zone {} is in a critical state and cannot be toggled.",
                            zone.name
                        ),
                        priority: NotificationPriority::Warning,
                    });
                    continue;
                }
                let activated = zone.status != ZoneStatus::Active;
                zone.status = if activated {
                    ZoneStatus::Active
                } else {
                    ZoneStatus::Idle
                };
                notify.send(NotificationEvent {
                    text: format!(
                        "Zone {} {}.",
                        zone.name,
                        if activated { "activated" } else { "paused" }
                    ),
                    priority: NotificationPriority::Info,
                });
            }
        }
    }
}

pub struct FarmCommandsPlugin;

impl Plugin for FarmCommandsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FarmCommand>().add_systems(
            FixedUpdate,
            apply_farm_commands.in_set(SimulationSet::PreSim),
        );
    }
}
