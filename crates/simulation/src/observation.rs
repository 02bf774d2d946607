//! Compact, typed, serializable snapshot of the farm state.
//!
//! `FarmObservation` captures the whole farm into a single struct on demand
//! so a headless runner (or a test) can inspect and print it without
//! reaching into the ECS. Built from `&mut World`; no per-frame systems.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::crops::Crop;
use crate::equipment::Equipment;
use crate::farm_clock::FarmClock;
use crate::irrigation::tank::{IrrigationSystem, WaterTank};
use crate::irrigation::zones::IrrigationZone;
use crate::notifications::NotificationLog;
use crate::weather::Weather;
use crate::weather_alerts::ActiveWeatherAlert;
use crate::TickCounter;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneSnapshot {
    pub zone_id: u32,
    pub name: String,
    pub moisture: f32,
    pub status: String,
    pub area_ha: f32,
    pub temperature: f32,
    pub wind_kmh: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropSnapshot {
    pub crop_id: u32,
    pub name: String,
    pub stage: String,
    pub health: f32,
    pub days_to_harvest: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentSnapshot {
    pub equipment_id: u32,
    pub name: String,
    pub status: String,
    pub metric_value: f32,
    pub efficiency: f32,
}

/// A point-in-time snapshot of the entire farm state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FarmObservation {
    pub tick: u64,
    pub day: u32,
    pub hour: f32,

    pub system_running: bool,
    pub tank_capacity_l: f32,
    pub tank_used_l: f32,
    pub tank_remaining_l: f32,

    pub temperature: f32,
    pub wind_kmh: f32,
    pub condition: String,
    pub season: String,
    pub weather_alert: Option<String>,

    pub zones: Vec<ZoneSnapshot>,
    pub crops: Vec<CropSnapshot>,
    pub equipment: Vec<EquipmentSnapshot>,

    /// Active (undismissed) notification texts, newest last.
    pub notifications: Vec<String>,
}

impl FarmObservation {
    /// Capture the current farm state from the world.
    pub fn capture(world: &mut World) -> Self {
        let tick = world.resource::<TickCounter>().0;
        let clock = world.resource::<FarmClock>().clone();
        let system = *world.resource::<IrrigationSystem>();
        let tank = world.resource::<WaterTank>().clone();
        let weather = world.resource::<Weather>().clone();
        let alert = world
            .resource::<ActiveWeatherAlert>()
            .current
            .map(|a| format!("{} ({})", a.title, a.level.label()));
        let notifications = world
            .resource::<NotificationLog>()
            .active
            .iter()
            .filter(|n| !n.dismissed)
            .map(|n| format!("[{}] {}", n.priority.label(), n.text))
            .collect();

        let mut zones: Vec<ZoneSnapshot> = world
            .query::<&IrrigationZone>()
            .iter(world)
            .map(|z| ZoneSnapshot {
                zone_id: z.zone_id,
                name: z.name.clone(),
                moisture: z.moisture,
                status: z.status.label().to_string(),
                area_ha: z.area_ha,
                temperature: z.temperature,
                wind_kmh: z.wind_kmh,
            })
            .collect();
        zones.sort_by_key(|z| z.zone_id);

        let mut crops: Vec<CropSnapshot> = world
            .query::<&Crop>()
            .iter(world)
            .map(|c| CropSnapshot {
                crop_id: c.crop_id,
                name: c.name.clone(),
                stage: c.stage.label().to_string(),
                health: c.health,
                days_to_harvest: c.days_to_harvest(&clock),
            })
            .collect();
        crops.sort_by_key(|c| c.crop_id);

        let mut equipment: Vec<EquipmentSnapshot> = world
            .query::<&Equipment>()
            .iter(world)
            .map(|e| EquipmentSnapshot {
                equipment_id: e.equipment_id,
                name: e.name.clone(),
                status: e.status.label().to_string(),
                metric_value: e.metric_value,
                efficiency: e.efficiency,
            })
            .collect();
        equipment.sort_by_key(|e| e.equipment_id);

        Self {
            tick,
            day: clock.day,
            hour: clock.hour,
            system_running: system.running,
            tank_capacity_l: tank.capacity_l,
            tank_used_l: tank.used_l,
            tank_remaining_l: tank.remaining_l(),
            temperature: weather.temperature,
            wind_kmh: weather.wind_kmh,
            condition: weather.condition.name().to_string(),
            season: weather.season.name().to_string(),
            weather_alert: alert,
            zones,
            crops,
            equipment,
            notifications,
        }
    }

    /// Render the observation as a fixed-width status board.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "== Day {} {:02}:{:02} | tick {} | {} {} | {:.0}°C wind {:.0} km/h ==\n",
            self.day,
            self.hour as u32,
            ((self.hour - (self.hour as u32) as f32) * 60.0) as u32,
            self.tick,
            self.season,
            self.condition,
            self.temperature,
            self.wind_kmh,
        ));
        out.push_str(&format!(
            "system: {} | tank {:.0}/{:.0} L remaining\n",
            if self.system_running { "RUNNING" } else { "STOPPED" },
            self.tank_remaining_l,
            self.tank_capacity_l,
        ));
        if let Some(alert) = &self.weather_alert {
            out.push_str(&format!("weather alert: {}\n", alert));
        }

        out.push_str("zones:\n");
        for z in &self.zones {
            out.push_str(&format!(
                "  {:>2} {:<18} {:>5.1}% {:<8} {:>4.1} ha {:>4.0}°C {:>4.0} km/h\n",
                z.zone_id, z.name, z.moisture, z.status, z.area_ha, z.temperature, z.wind_kmh,
            ));
        }

        out.push_str("crops:\n");
        for c in &self.crops {
            out.push_str(&format!(
                "  {:>2} {:<12} {:<16} {:>5.1}% health, harvest in {} days\n",
                c.crop_id, c.name, c.stage, c.health, c.days_to_harvest,
            ));
        }

        out.push_str("equipment:\n");
        for e in &self.equipment {
            out.push_str(&format!(
                "  {:>2} {:<18} {:<12} {:>5.1}% level {:>5.1}% efficiency\n",
                e.equipment_id, e.name, e.status, e.metric_value, e.efficiency,
            ));
        }

        if !self.notifications.is_empty() {
            out.push_str("notifications:\n");
            for n in &self.notifications {
                out.push_str(&format!("  {}\n", n));
            }
        }
        out
    }
}
