use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::SimulationSet;

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct FarmClock {
    pub day: u32,
    pub hour: f32,
    pub speed: f32,
    pub paused: bool,
}

impl Default for FarmClock {
    fn default() -> Self {
        Self {
            day: 1,
            hour: 6.0, // start at 6 AM
            speed: 1.0,
            paused: false,
        }
    }
}

impl FarmClock {
    /// Minutes per sim tick at 1x speed
    const MINUTES_PER_TICK: f32 = 1.0;

    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        // Speed is handled by scaling the FixedUpdate timestep (sync_fixed_timestep),
        // so each tick always advances by the same amount of farm time.
        self.hour += Self::MINUTES_PER_TICK / 60.0;
        if self.hour >= 24.0 {
            self.hour -= 24.0;
            self.day += 1;
        }
    }

    pub fn hour_of_day(&self) -> u32 {
        self.hour as u32
    }

    pub fn formatted(&self) -> String {
        let h = self.hour as u32;
        let m = ((self.hour - h as f32) * 60.0) as u32;
        format!("Day {} {:02}:{:02}", self.day, h, m)
    }
}

pub fn tick_farm_clock(mut clock: ResMut<FarmClock>) {
    clock.tick();
}

/// Scales the FixedUpdate timestep based on FarmClock speed.
/// Base rate is 10 Hz (100 ms). At 2x speed it becomes 50 ms, at 4x -> 25 ms, etc.
pub fn sync_fixed_timestep(clock: Res<FarmClock>, mut time: ResMut<Time<Fixed>>) {
    let base_hz = std::time::Duration::from_millis(100); // 10 Hz
    let effective = if clock.paused || clock.speed <= 0.0 {
        // When paused, keep the timestep but tick_farm_clock won't advance
        base_hz
    } else {
        base_hz.div_f32(clock.speed.clamp(0.25, 16.0))
    };
    time.set_timestep(effective);
}

pub struct FarmClockPlugin;

impl Plugin for FarmClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FarmClock>()
            .add_systems(
                FixedUpdate,
                tick_farm_clock.in_set(SimulationSet::PreSim),
            )
            .add_systems(Update, sync_fixed_timestep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_wraps_at_24h() {
        let mut clock = FarmClock {
            day: 1,
            hour: 23.9,
            speed: 1.0,
            paused: false,
        };
        // Tick enough to pass midnight
        for _ in 0..20 {
            clock.tick();
        }
        assert_eq!(clock.day, 2);
        assert!(clock.hour < 24.0);
        assert!(clock.hour >= 0.0);
    }

    #[test]
    fn test_clock_paused() {
        let mut clock = FarmClock {
            paused: true,
            ..Default::default()
        };
        let hour_before = clock.hour;
        clock.tick();
        assert_eq!(clock.hour, hour_before);
    }

    #[test]
    fn test_formatted() {
        let clock = FarmClock {
            day: 3,
            hour: 14.5,
            ..Default::default()
        };
        assert_eq!(clock.formatted(), "Day 3 14:30");
    }
}
