//! Irrigation zone control: moisture simulation, the shared water tank,
//! and the operator command surface.
//!
//! Zones are entities carrying an [`IrrigationZone`] component; the tank and
//! master switch are resources. Two cadences drive the subsystem off the
//! global tick counter: a 3-second moisture walk and a 1-second water draw.

pub mod commands;
pub mod tank;
pub mod zones;

pub use commands::{apply_farm_commands, FarmCommand};
pub use tank::{IrrigationSystem, WaterTank, FLOW_PER_ZONE_L, TANK_CAPACITY_L};
pub use zones::{
    classify_moisture, step_zone, IrrigationZone, ZoneStatus, MOISTURE_ACTIVE_CEIL,
    MOISTURE_DECAY_FLOOR,
};

use bevy::prelude::*;

/// Registers the zone, tank, and command subsystems.
pub struct IrrigationPlugin;

impl Plugin for IrrigationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            zones::ZonesPlugin,
            tank::TankPlugin,
            commands::FarmCommandsPlugin,
        ));
    }
}
