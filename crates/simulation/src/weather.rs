//! Farm-wide weather: a bounded random walk over atmospheric state, with
//! the observable condition derived as a pure function.
//!
//! Per-zone sensor readings (temperature, wind) follow the farm-wide values
//! with a fixed microclimate bias per zone.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::farm_clock::FarmClock;
use crate::irrigation::zones::IrrigationZone;
use crate::sim_rng::SimRng;
use crate::{SimulationSet, SlowTickTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn from_day(day: u32) -> Season {
        // 360-day year: 90 days per season
        let day_of_year = ((day.saturating_sub(1)) % 360) + 1;
        match day_of_year {
            1..=90 => Season::Spring,
            91..=180 => Season::Summer,
            181..=270 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }

    /// Seasonal min/max temperature range: (T_min, T_max) in Celsius.
    fn temperature_range(self) -> (f32, f32) {
        match self {
            Season::Spring => (12.0, 26.0),
            Season::Summer => (20.0, 38.0),
            Season::Autumn => (10.0, 24.0),
            Season::Winter => (2.0, 16.0),
        }
    }
}

/// Observable weather condition derived from atmospheric state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Overcast,
    Rain,
    Storm,
}

impl WeatherCondition {
    /// Derive condition from atmospheric state.
    pub fn from_atmosphere(cloud_cover: f32, precipitation: f32, wind_kmh: f32) -> Self {
        if precipitation > 0.7 && wind_kmh > 30.0 {
            WeatherCondition::Storm
        } else if precipitation > 0.3 {
            WeatherCondition::Rain
        } else if cloud_cover > 0.7 {
            WeatherCondition::Overcast
        } else if cloud_cover > 0.3 {
            WeatherCondition::PartlyCloudy
        } else {
            WeatherCondition::Sunny
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::PartlyCloudy => "Partly cloudy",
            WeatherCondition::Overcast => "Overcast",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Storm => "Storm",
        }
    }
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Weather {
    /// Air temperature in Celsius.
    pub temperature: f32,
    /// Wind speed in km/h.
    pub wind_kmh: f32,
    /// Cloud cover fraction (0.0 to 1.0).
    pub cloud_cover: f32,
    /// Precipitation intensity (0.0 to 1.0).
    pub precipitation: f32,
    pub condition: WeatherCondition,
    pub season: Season,
    /// Last farm day the weather walk ran.
    pub last_update_day: u32,
}

impl Default for Weather {
    fn default() -> Self {
        Self {
            temperature: 24.0,
            wind_kmh: 5.0,
            cloud_cover: 0.2,
            precipitation: 0.0,
            condition: WeatherCondition::Sunny,
            season: Season::Spring,
            last_update_day: 0,
        }
    }
}

/// Advance the weather walk one step.
///
/// Temperature is nudged toward the seasonal midpoint and bounded a little
/// outside the seasonal range; wind, cloud cover, and precipitation random
/// walk inside their physical bounds; the condition is re-derived.
pub fn advance_weather(weather: &mut Weather, season: Season, rng: &mut impl Rng) {
    let (lo, hi) = season.temperature_range();
    let mid = (lo + hi) / 2.0;

    weather.season = season;
    weather.temperature = (weather.temperature
        + rng.gen_range(-1.5..1.5)
        + (mid - weather.temperature) * 0.05)
        .clamp(lo - 5.0, hi + 5.0);
    weather.wind_kmh = (weather.wind_kmh + rng.gen_range(-3.0..3.0)).clamp(0.0, 60.0);
    weather.cloud_cover = (weather.cloud_cover + rng.gen_range(-0.15..0.15)).clamp(0.0, 1.0);
    weather.precipitation = if weather.cloud_cover > 0.6 {
        (weather.precipitation + rng.gen_range(0.0..0.25)).min(1.0)
    } else {
        (weather.precipitation - rng.gen_range(0.0..0.2)).max(0.0)
    };
    weather.condition = WeatherCondition::from_atmosphere(
        weather.cloud_cover,
        weather.precipitation,
        weather.wind_kmh,
    );
}

/// System: run the weather walk on the slow tick.
pub fn update_weather(
    timer: Res<SlowTickTimer>,
    clock: Res<FarmClock>,
    mut rng: ResMut<SimRng>,
    mut weather: ResMut<Weather>,
) {
    if !timer.should_run() {
        return;
    }
    let season = Season::from_day(clock.day);
    advance_weather(&mut weather, season, &mut rng.0);
    weather.last_update_day = clock.day;
}

/// System: refresh each zone's local temperature/wind readings from the
/// farm-wide weather plus the zone's fixed microclimate bias.
pub fn sync_zone_weather(
    timer: Res<SlowTickTimer>,
    weather: Res<Weather>,
    mut zones: Query<&mut IrrigationZone>,
) {
    if !timer.should_run() {
        return;
    }
    for mut zone in &mut zones {
        zone.temperature = weather.temperature + zone.temp_bias;
        zone.wind_kmh = (weather.wind_kmh + zone.wind_bias).max(0.0);
    }
}

pub struct WeatherPlugin;

impl Plugin for WeatherPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Weather>().add_systems(
            FixedUpdate,
            (update_weather, sync_zone_weather)
                .chain()
                .in_set(SimulationSet::Simulation),
        );
    }
}
