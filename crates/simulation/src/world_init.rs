// =============================================================================
// Farm seeding: fixture zones, crops, and equipment spawned at startup.
// =============================================================================

use bevy::prelude::*;

use crate::crops::{Crop, CropStage};
use crate::equipment::{Equipment, EquipmentKind, EquipmentStatus, MetricKind};
use crate::irrigation::zones::{IrrigationZone, ZoneStatus};

/// Marker resource that, when present, causes `seed_farm` to skip the
/// fixture spawn. Used by the test harness to start with an empty farm.
#[derive(Resource)]
pub struct SkipWorldInit;

/// Reference weather the fixture sensor readings were taken against; the
/// per-zone biases are the fixture values minus these.
const BASELINE_TEMP: f32 = 24.0;
const BASELINE_WIND: f32 = 5.0;

/// `(id, name, moisture, area_ha, temperature, wind_kmh)`
const ZONE_FIXTURES: [(u32, &str, f32, f32, f32, f32); 6] = [
    (1, "North Field", 68.0, 2.5, 24.0, 5.0),
    (2, "South Field", 72.0, 3.0, 25.0, 7.0),
    (3, "East Orchard", 65.0, 1.5, 23.0, 4.0),
    (4, "West Garden", 80.0, 0.8, 26.0, 8.0),
    (5, "Central Plot", 58.0, 4.2, 24.0, 6.0),
    (6, "Greenhouse", 75.0, 0.5, 28.0, 2.0),
];

/// `(id, name, stage, planted_day, harvest_day, health, area_ha)`
///
/// Wheat spends 126 days in the ground, tomatoes 81, rice 182.
const CROP_FIXTURES: [(u32, &str, CropStage, u32, u32, f32, f32); 6] = [
    (1, "Wheat", CropStage::Vegetative, 1, 127, 85.0, 5.0),
    (2, "Corn", CropStage::Flowering, 27, 183, 92.0, 8.0),
    (3, "Rice", CropStage::Seedling, 47, 229, 78.0, 6.0),
    (4, "Soybean", CropStage::PodFormation, 45, 163, 88.0, 4.0),
    (5, "Tomatoes", CropStage::Fruiting, 16, 97, 95.0, 2.0),
    (6, "Potatoes", CropStage::TuberInitiation, 32, 148, 82.0, 3.0),
];

/// `(id, name, kind, status, metric_kind, metric_value, efficiency)`
#[allow(clippy::type_complexity)]
const EQUIPMENT_FIXTURES: [(
    u32,
    &str,
    EquipmentKind,
    EquipmentStatus,
    MetricKind,
    f32,
    f32,
); 6] = [
    (1, "Tractor A", EquipmentKind::Tractor, EquipmentStatus::Active, MetricKind::Fuel, 85.0, 92.0),
    (2, "Harvester B", EquipmentKind::Harvester, EquipmentStatus::Maintenance, MetricKind::Fuel, 45.0, 78.0),
    (3, "Irrigation Pump", EquipmentKind::Pump, EquipmentStatus::Idle, MetricKind::Battery, 100.0, 95.0),
    (4, "Sprayer C", EquipmentKind::Sprayer, EquipmentStatus::Idle, MetricKind::Fuel, 30.0, 85.0),
    (5, "Drone Scanner", EquipmentKind::Drone, EquipmentStatus::Active, MetricKind::Battery, 75.0, 88.0),
    (6, "Soil Sensor Array", EquipmentKind::Sensor, EquipmentStatus::Idle, MetricKind::Battery, 90.0, 96.0),
];

pub fn seed_farm(mut commands: Commands, skip: Option<Res<SkipWorldInit>>) {
    if skip.is_some() {
        return;
    }

    for (zone_id, name, moisture, area_ha, temp, wind) in ZONE_FIXTURES {
        commands.spawn(IrrigationZone {
            zone_id,
            name: name.to_string(),
            moisture,
            status: ZoneStatus::Idle,
            area_ha,
            temperature: temp,
            wind_kmh: wind,
            temp_bias: temp - BASELINE_TEMP,
            wind_bias: wind - BASELINE_WIND,
        });
    }

    for (crop_id, name, stage, planted_day, harvest_day, health, area_ha) in CROP_FIXTURES {
        commands.spawn(Crop {
            crop_id,
            name: name.to_string(),
            stage,
            planted_day,
            harvest_day,
            health,
            area_ha,
            low_health_flagged: false,
        });
    }

    for (equipment_id, name, kind, status, metric_kind, metric_value, efficiency) in
        EQUIPMENT_FIXTURES
    {
        commands.spawn(Equipment {
            equipment_id,
            name: name.to_string(),
            kind,
            status,
            metric_kind,
            metric_value,
            efficiency,
        });
    }

    info!(
        "farm seeded: {} zones, {} crops, {} equipment units",
        ZONE_FIXTURES.len(),
        CROP_FIXTURES.len(),
        EQUIPMENT_FIXTURES.len()
    );
}
