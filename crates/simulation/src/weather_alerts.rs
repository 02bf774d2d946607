//! Climate alerts derived from current weather conditions.
//!
//! `alert_for` grades the weather into an alert level; the system tracks
//! transitions and notifies the operator when an alert starts, escalates,
//! or clears. Crop health reads the active alert as a stress signal.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::notifications::{NotificationEvent, NotificationPriority};
use crate::weather::{Weather, WeatherCondition};
use crate::{SimulationSet, SlowTickTimer};

/// Alert severity, least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeatherAlertLevel {
    Minor,
    Moderate,
    Severe,
    Extreme,
}

impl WeatherAlertLevel {
    pub fn label(self) -> &'static str {
        match self {
            WeatherAlertLevel::Minor => "Minor",
            WeatherAlertLevel::Moderate => "Moderate",
            WeatherAlertLevel::Severe => "Severe",
            WeatherAlertLevel::Extreme => "Extreme",
        }
    }

    /// Notification priority for an alert at this level.
    fn priority(self) -> NotificationPriority {
        match self {
            WeatherAlertLevel::Minor => NotificationPriority::Info,
            WeatherAlertLevel::Moderate | WeatherAlertLevel::Severe => {
                NotificationPriority::Warning
            }
            WeatherAlertLevel::Extreme => NotificationPriority::Emergency,
        }
    }

    /// An alert at this level stresses crops.
    pub fn stresses_crops(self) -> bool {
        self >= WeatherAlertLevel::Severe
    }
}

/// A graded weather alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherAlert {
    pub level: WeatherAlertLevel,
    pub title: &'static str,
}

/// The alert currently in force, if any.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveWeatherAlert {
    pub current: Option<WeatherAlert>,
}

/// Grade the current weather into an alert.
///
/// Storms and temperature extremes dominate; wind alone only reaches
/// Moderate. Ordinary rain is not an alert.
pub fn alert_for(
    condition: WeatherCondition,
    temperature: f32,
    wind_kmh: f32,
) -> Option<WeatherAlert> {
    if condition == WeatherCondition::Storm {
        let level = if wind_kmh > 50.0 || temperature > 38.0 {
            WeatherAlertLevel::Extreme
        } else {
            WeatherAlertLevel::Severe
        };
        return Some(WeatherAlert {
            level,
            title: "Storm warning",
        });
    }
    if temperature > 40.0 {
        return Some(WeatherAlert {
            level: WeatherAlertLevel::Extreme,
            title: "Extreme heat",
        });
    }
    if temperature > 35.0 {
        return Some(WeatherAlert {
            level: WeatherAlertLevel::Severe,
            title: "Heat wave",
        });
    }
    if temperature < -5.0 {
        return Some(WeatherAlert {
            level: WeatherAlertLevel::Severe,
            title: "Hard freeze",
        });
    }
    if temperature < 0.0 {
        return Some(WeatherAlert {
            level: WeatherAlertLevel::Moderate,
            title: "Frost advisory",
        });
    }
    if wind_kmh > 45.0 {
        return Some(WeatherAlert {
            level: WeatherAlertLevel::Moderate,
            title: "High winds",
        });
    }
    if temperature > 32.0 {
        return Some(WeatherAlert {
            level: WeatherAlertLevel::Minor,
            title: "Heat advisory",
        });
    }
    None
}

/// System: re-grade the weather each slow tick and notify on transitions.
pub fn update_weather_alerts(
    timer: Res<SlowTickTimer>,
    weather: Res<Weather>,
    mut active: ResMut<ActiveWeatherAlert>,
    mut notify: EventWriter<NotificationEvent>,
) {
    if !timer.should_run() {
        return;
    }
    let graded = alert_for(weather.condition, weather.temperature, weather.wind_kmh);
    if graded == active.current {
        return;
    }

    match (active.current, graded) {
        (_, Some(alert)) => {
            notify.send(NotificationEvent {
                text: format!(
                    "Weather alert ({}): {}. {} at {:.0}°C, wind {:.0} km/h.",
                    alert.level.label(),
                    alert.title,
                    weather.condition.name(),
                    weather.temperature,
                    weather.wind_kmh,
                ),
                priority: alert.level.priority(),
            });
        }
        (Some(previous), None) => {
            notify.send(NotificationEvent {
                text: format!("Weather alert cleared: {}.", previous.title),
                priority: NotificationPriority::Positive,
            });
        }
        (None, None) => {}
    }
    active.current = graded;
}

pub struct WeatherAlertsPlugin;

impl Plugin for WeatherAlertsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveWeatherAlert>().add_systems(
            FixedUpdate,
            update_weather_alerts.in_set(SimulationSet::PostSim),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calm_weather_no_alert() {
        assert_eq!(alert_for(WeatherCondition::Sunny, 24.0, 5.0), None);
        assert_eq!(alert_for(WeatherCondition::Rain, 18.0, 10.0), None);
    }

    #[test]
    fn test_storm_severity() {
        let severe = alert_for(WeatherCondition::Storm, 20.0, 35.0).unwrap();
        assert_eq!(severe.level, WeatherAlertLevel::Severe);

        let extreme = alert_for(WeatherCondition::Storm, 20.0, 55.0).unwrap();
        assert_eq!(extreme.level, WeatherAlertLevel::Extreme);
    }

    #[test]
    fn test_heat_grading() {
        assert_eq!(alert_for(WeatherCondition::Sunny, 33.0, 5.0).unwrap().level, WeatherAlertLevel::Minor);
        assert_eq!(alert_for(WeatherCondition::Sunny, 36.0, 5.0).unwrap().level, WeatherAlertLevel::Severe);
        assert_eq!(alert_for(WeatherCondition::Sunny, 41.0, 5.0).unwrap().level, WeatherAlertLevel::Extreme);
    }

    #[test]
    fn test_cold_grading() {
        assert_eq!(alert_for(WeatherCondition::Overcast, -2.0, 5.0).unwrap().level, WeatherAlertLevel::Moderate);
        assert_eq!(alert_for(WeatherCondition::Overcast, -8.0, 5.0).unwrap().level, WeatherAlertLevel::Severe);
    }

    #[test]
    fn test_wind_grading() {
        assert_eq!(alert_for(WeatherCondition::PartlyCloudy, 20.0, 50.0).unwrap().level, WeatherAlertLevel::Moderate);
    }

    #[test]
    fn test_stresses_crops() {
        assert!(!WeatherAlertLevel::Minor.stresses_crops());
        assert!(!WeatherAlertLevel::Moderate.stresses_crops());
        assert!(WeatherAlertLevel::Severe.stresses_crops());
        assert!(WeatherAlertLevel::Extreme.stresses_crops());
    }

    #[test]
    fn test_level_ordering() {
        assert!(WeatherAlertLevel::Minor < WeatherAlertLevel::Moderate);
        assert!(WeatherAlertLevel::Moderate < WeatherAlertLevel::Severe);
        assert!(WeatherAlertLevel::Severe < WeatherAlertLevel::Extreme);
    }
}
