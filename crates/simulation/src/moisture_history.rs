//! Rolling window of daily per-zone moisture readings.
//!
//! One sample is recorded per farm day (on the day boundary); the window
//! keeps the trailing week for trend observation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::farm_clock::FarmClock;
use crate::irrigation::zones::IrrigationZone;
use crate::SimulationSet;

/// Trailing window size in days.
pub const HISTORY_WINDOW: usize = 7;

/// One day's moisture readings across all zones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySample {
    pub day: u32,
    /// `(zone_id, moisture)` pairs in zone order.
    pub readings: Vec<(u32, f32)>,
}

/// Rolling per-zone moisture history.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoistureHistory {
    pub samples: Vec<DailySample>,
    /// Last farm day a sample was recorded for.
    pub last_record_day: u32,
}

impl MoistureHistory {
    /// Record a sample for `day`, trimming to the trailing window.
    pub fn record(&mut self, day: u32, readings: Vec<(u32, f32)>) {
        self.samples.push(DailySample { day, readings });
        while self.samples.len() > HISTORY_WINDOW {
            self.samples.remove(0);
        }
        self.last_record_day = day;
    }

    /// Moisture series for a single zone, oldest first.
    pub fn series(&self, zone_id: u32) -> Vec<f32> {
        self.samples
            .iter()
            .filter_map(|s| {
                s.readings
                    .iter()
                    .find(|(id, _)| *id == zone_id)
                    .map(|(_, m)| *m)
            })
            .collect()
    }

    pub fn latest(&self) -> Option<&DailySample> {
        self.samples.last()
    }
}

/// System: snapshot every zone's moisture when the farm day rolls over.
pub fn record_moisture_history(
    clock: Res<FarmClock>,
    zones: Query<&IrrigationZone>,
    mut history: ResMut<MoistureHistory>,
) {
    if clock.day <= history.last_record_day {
        return;
    }
    let readings: Vec<(u32, f32)> = zones.iter().map(|z| (z.zone_id, z.moisture)).collect();
    if readings.is_empty() {
        return;
    }
    history.record(clock.day, readings);
}

pub struct MoistureHistoryPlugin;

impl Plugin for MoistureHistoryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MoistureHistory>().add_systems(
            FixedUpdate,
            record_moisture_history.in_set(SimulationSet::PostSim),
        );
    }
}
