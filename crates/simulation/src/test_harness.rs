//! # TestFarm — headless integration test harness
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `SimulationPlugin`
//! for running integration tests without a window or renderer.

use bevy::app::App;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::crops::Crop;
use crate::equipment::Equipment;
use crate::farm_clock::FarmClock;
use crate::irrigation::commands::FarmCommand;
use crate::irrigation::tank::{IrrigationSystem, WaterTank};
use crate::irrigation::zones::{IrrigationZone, ZoneStatus};
use crate::sim_rng::SimRng;
use crate::weather::Weather;
use crate::world_init::SkipWorldInit;
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Use builder methods to set up farm state, then call `tick()` to advance
/// the simulation and query/assert on the resulting ECS state.
pub struct TestFarm {
    app: App,
}

impl TestFarm {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a farm seeded with the full fixture set (6 zones, 6 crops,
    /// 6 equipment units).
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Create an **empty** farm: no zones, crops, or equipment spawned.
    pub fn empty() -> Self {
        Self::build(true)
    }

    fn build(skip_init: bool) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        if skip_init {
            // Insert the marker BEFORE SimulationPlugin so seed_farm skips.
            app.insert_resource(SkipWorldInit);
        }
        app.add_plugins(SimulationPlugin);

        // Wall-clock time must not leak into the tick stream: time is advanced
        // manually by a fixed duration per `update()`, so only the explicit
        // advances in `tick()` drive the fixed schedule, keeping equal-seed
        // runs byte-for-byte identical. The initial Startup update advances by
        // zero so no simulation tick fires before the builder mutations below.
        app.insert_resource(TimeUpdateStrategy::ManualDuration(
            std::time::Duration::ZERO,
        ));

        // Run one update so Startup systems execute.
        app.update();

        Self { app }
    }

    // -----------------------------------------------------------------------
    // World Setup (builder pattern — consumes and returns Self)
    // -----------------------------------------------------------------------

    /// Replace the simulation RNG with one seeded from `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.app
            .world_mut()
            .insert_resource(SimRng::from_seed_u64(seed));
        self
    }

    /// Set the liters already drawn from the tank.
    pub fn with_tank_used(mut self, used_l: f32) -> Self {
        if let Some(mut tank) = self.app.world_mut().get_resource_mut::<WaterTank>() {
            tank.used_l = used_l;
        }
        self
    }

    /// Set the farm-wide weather temperature and wind.
    pub fn with_weather(mut self, temperature: f32, wind_kmh: f32) -> Self {
        if let Some(mut weather) = self.app.world_mut().get_resource_mut::<Weather>() {
            weather.temperature = temperature;
            weather.wind_kmh = wind_kmh;
        }
        self
    }

    /// Set a single zone's status.
    pub fn with_zone_status(mut self, zone_id: u32, status: ZoneStatus) -> Self {
        self.set_zone_status(zone_id, status);
        self
    }

    /// Set a single zone's moisture.
    pub fn with_zone_moisture(mut self, zone_id: u32, moisture: f32) -> Self {
        let world = self.app.world_mut();
        let mut query = world.query::<&mut IrrigationZone>();
        for mut zone in query.iter_mut(world) {
            if zone.zone_id == zone_id {
                zone.moisture = moisture;
            }
        }
        self
    }

    /// Non-consuming variant of `with_zone_status` for mid-test mutation.
    pub fn set_zone_status(&mut self, zone_id: u32, status: ZoneStatus) {
        let world = self.app.world_mut();
        let mut query = world.query::<&mut IrrigationZone>();
        for mut zone in query.iter_mut(world) {
            if zone.zone_id == zone_id {
                zone.status = status;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Queue an operator command; it is applied on the next tick.
    pub fn send(&mut self, command: FarmCommand) {
        let _ = self.app.world_mut().send_event(command);
    }

    /// Run N fixed-update ticks.
    ///
    /// The simulation runs at 10 Hz (100ms per tick). Each call advances
    /// virtual time by 100ms and calls `app.update()`, which triggers the
    /// `FixedUpdate` schedule exactly once.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            // Advance by exactly the live fixed timestep so each update
            // contributes precisely one period to the accumulator. Advancing by
            // a hard-coded 100ms would fall a hair short of the timestep that
            // `sync_fixed_timestep` computes (its `div_f32` rounds 100ms up to
            // ~100.000001ms), leaving the fixed schedule permanently one tick
            // behind. Matching the timestep keeps the ratio at exactly 1:1.
            let dt = self.app.world().resource::<Time<Fixed>>().timestep();
            self.app
                .world_mut()
                .insert_resource(TimeUpdateStrategy::ManualDuration(dt));
            self.app.update();
        }
    }

    /// Run until the SlowTickTimer fires at least once (~100 ticks).
    pub fn tick_slow_cycle(&mut self) {
        self.tick(crate::SlowTickTimer::INTERVAL);
    }

    // -----------------------------------------------------------------------
    // Queries (note: Bevy's World::query() requires &mut World)
    // -----------------------------------------------------------------------

    /// Access the ECS world mutably (needed for queries in Bevy).
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    /// Get a reference to any resource.
    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    /// Get the water tank.
    pub fn tank(&self) -> &WaterTank {
        self.resource::<WaterTank>()
    }

    /// Whether the irrigation system is running.
    pub fn running(&self) -> bool {
        self.resource::<IrrigationSystem>().running
    }

    /// Get the farm clock.
    pub fn clock(&self) -> &FarmClock {
        self.resource::<FarmClock>()
    }

    /// All zones, cloned and sorted by id.
    pub fn zones(&mut self) -> Vec<IrrigationZone> {
        let world = self.app.world_mut();
        let mut zones: Vec<IrrigationZone> = world
            .query::<&IrrigationZone>()
            .iter(world)
            .cloned()
            .collect();
        zones.sort_by_key(|z| z.zone_id);
        zones
    }

    /// A single zone by id. Panics if absent (test bug).
    pub fn zone(&mut self, zone_id: u32) -> IrrigationZone {
        self.zones()
            .into_iter()
            .find(|z| z.zone_id == zone_id)
            .unwrap_or_else(|| panic!("no zone with id {}", zone_id))
    }

    /// All crops, cloned and sorted by id.
    pub fn crops(&mut self) -> Vec<Crop> {
        let world = self.app.world_mut();
        let mut crops: Vec<Crop> = world.query::<&Crop>().iter(world).cloned().collect();
        crops.sort_by_key(|c| c.crop_id);
        crops
    }

    /// All equipment units, cloned and sorted by id.
    pub fn equipment(&mut self) -> Vec<Equipment> {
        let world = self.app.world_mut();
        let mut units: Vec<Equipment> = world.query::<&Equipment>().iter(world).cloned().collect();
        units.sort_by_key(|e| e.equipment_id);
        units
    }
}

impl Default for TestFarm {
    fn default() -> Self {
        Self::new()
    }
}
