//! Crop tracking: growth stage, harvest countdown, and a health walk
//! modulated by weather stress and farm-wide soil moisture.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::farm_clock::FarmClock;
use crate::irrigation::zones::IrrigationZone;
use crate::notifications::{NotificationEvent, NotificationPriority};
use crate::sim_rng::SimRng;
use crate::weather_alerts::ActiveWeatherAlert;
use crate::{SimulationSet, SlowTickTimer};

/// Below this a crop is flagged unhealthy.
const LOW_HEALTH_THRESHOLD: f32 = 50.0;

/// A flagged crop must climb back above this before the flag clears.
const RECOVERED_THRESHOLD: f32 = 55.0;

/// Average zone moisture at or above this counts as well-watered.
const WELL_WATERED_MOISTURE: f32 = 60.0;

/// Health penalty per slow tick under a severe weather alert.
const WEATHER_STRESS_PENALTY: f32 = 0.5;

/// Health nudge per slow tick from soil moisture (up if watered, down if dry).
const MOISTURE_NUDGE: f32 = 0.25;

/// Growth stage of a crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropStage {
    Seedling,
    Vegetative,
    Flowering,
    Fruiting,
    PodFormation,
    TuberInitiation,
}

impl CropStage {
    pub fn label(self) -> &'static str {
        match self {
            CropStage::Seedling => "Seedling",
            CropStage::Vegetative => "Vegetative",
            CropStage::Flowering => "Flowering",
            CropStage::Fruiting => "Fruiting",
            CropStage::PodFormation => "Pod Formation",
            CropStage::TuberInitiation => "Tuber Initiation",
        }
    }
}

/// A planted crop tracked from planting to harvest.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Crop {
    pub crop_id: u32,
    pub name: String,
    pub stage: CropStage,
    /// Farm day the crop went into the ground.
    pub planted_day: u32,
    /// Farm day the crop is expected to come out.
    pub harvest_day: u32,
    /// Health percentage (0-100).
    pub health: f32,
    /// Planted area in hectares.
    pub area_ha: f32,
    /// Whether a low-health warning is currently outstanding.
    pub low_health_flagged: bool,
}

impl Crop {
    /// Days until the expected harvest, never negative.
    pub fn days_to_harvest(&self, clock: &FarmClock) -> u32 {
        self.harvest_day.saturating_sub(clock.day)
    }
}

/// One health-walk step for a crop.
///
/// `roll` is a uniform sample in `[-1, 1]`; weather stress pulls down,
/// soil moisture nudges either way. Result is clamped to [0, 100].
pub fn step_health(health: f32, roll: f32, stressed: bool, well_watered: bool) -> f32 {
    let mut drift = roll;
    if stressed {
        drift -= WEATHER_STRESS_PENALTY;
    }
    drift += if well_watered {
        MOISTURE_NUDGE
    } else {
        -MOISTURE_NUDGE
    };
    (health + drift).clamp(0.0, 100.0)
}

/// System: walk each crop's health on the slow tick and flag crops that
/// drop below the health threshold (one warning per episode).
pub fn update_crop_health(
    timer: Res<SlowTickTimer>,
    mut rng: ResMut<SimRng>,
    alert: Res<ActiveWeatherAlert>,
    zones: Query<&IrrigationZone>,
    mut crops: Query<&mut Crop>,
    mut notify: EventWriter<NotificationEvent>,
) {
    if !timer.should_run() {
        return;
    }

    let zone_count = zones.iter().count();
    let well_watered = if zone_count == 0 {
        true
    } else {
        let total: f32 = zones.iter().map(|z| z.moisture).sum();
        total / zone_count as f32 >= WELL_WATERED_MOISTURE
    };
    let stressed = alert
        .current
        .is_some_and(|a| a.level.stresses_crops());

    for mut crop in &mut crops {
        let roll = rng.0.gen_range(-1.0..1.0);
        crop.health = step_health(crop.health, roll, stressed, well_watered);

        if crop.health < LOW_HEALTH_THRESHOLD && !crop.low_health_flagged {
            crop.low_health_flagged = true;
            notify.send(NotificationEvent {
                text: format!(
                    "Crop {} health dropped to {:.0}%.",
                    crop.name, crop.health
                ),
                priority: NotificationPriority::Warning,
            });
        } else if crop.health > RECOVERED_THRESHOLD && crop.low_health_flagged {
            crop.low_health_flagged = false;
            notify.send(NotificationEvent {
                text: format!("Crop {} recovered to {:.0}% health.", crop.name, crop.health),
                priority: NotificationPriority::Positive,
            });
        }
    }
}

pub struct CropsPlugin;

impl Plugin for CropsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            update_crop_health.in_set(SimulationSet::Simulation),
        );
    }
}
