use bevy::prelude::*;

pub mod crops;
pub mod equipment;
pub mod farm_clock;
pub mod invariant_checks;
pub mod irrigation;
pub mod moisture_history;
pub mod notifications;
pub mod observation;
pub mod sim_rng;
pub mod simulation_sets;
pub mod weather;
pub mod weather_alerts;
pub mod world_init;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use simulation_sets::SimulationSet;

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Global tick counter incremented each FixedUpdate, used for throttling
/// simulation systems (moisture every 30 ticks, water usage every 10).
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

/// Shared throttle timer for farm-wide simulation systems that don't need to
/// run every tick. These systems (weather, crops, equipment, invariant
/// guards) only run every N ticks.
#[derive(Resource, Default)]
pub struct SlowTickTimer {
    pub counter: u32,
}

impl SlowTickTimer {
    pub const INTERVAL: u32 = 100; // run slow systems every 100 ticks (~10 seconds at 10Hz)

    pub fn tick(&mut self) {
        self.counter += 1;
    }

    pub fn should_run(&self) -> bool {
        self.counter.is_multiple_of(Self::INTERVAL)
    }
}

pub fn tick_counters(mut timer: ResMut<SlowTickTimer>, mut tick: ResMut<TickCounter>) {
    timer.tick();
    tick.0 = tick.0.wrapping_add(1);
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // The simulation advances at 10 Hz; the clock speed scales this via
        // farm_clock::sync_fixed_timestep.
        app.insert_resource(Time::<Fixed>::from_hz(10.0));

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::PreSim,
                SimulationSet::Simulation,
                SimulationSet::PostSim,
            )
                .chain(),
        );

        // Core resources and systems that don't belong to any feature
        app.init_resource::<TickCounter>()
            .init_resource::<SlowTickTimer>()
            .add_systems(Startup, world_init::seed_farm)
            .add_systems(FixedUpdate, tick_counters.in_set(SimulationSet::PreSim));

        // Core simulation chain
        app.add_plugins((
            sim_rng::SimRngPlugin,
            farm_clock::FarmClockPlugin,
            irrigation::IrrigationPlugin,
        ));

        // Weather and environment
        app.add_plugins((weather::WeatherPlugin, weather_alerts::WeatherAlertsPlugin));

        // Crops and equipment
        app.add_plugins((crops::CropsPlugin, equipment::EquipmentPlugin));

        // Reporting and guards
        app.add_plugins((
            moisture_history::MoistureHistoryPlugin,
            notifications::NotificationsPlugin,
            invariant_checks::InvariantChecksPlugin,
        ));
    }
}

#[cfg(test)]
mod tick_tests {
    use super::*;

    #[test]
    fn test_slow_tick_fires_on_interval() {
        let mut timer = SlowTickTimer::default();
        let mut fired = 0;
        for _ in 0..(SlowTickTimer::INTERVAL * 3) {
            timer.tick();
            if timer.should_run() {
                fired += 1;
            }
        }
        assert_eq!(fired, 3);
    }

    #[test]
    fn test_tick_counter_wraps() {
        let mut tick = TickCounter(u64::MAX);
        tick.0 = tick.0.wrapping_add(1);
        assert_eq!(tick.0, 0);
    }
}
