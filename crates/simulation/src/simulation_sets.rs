//! Deterministic simulation ordering via `SystemSet` phases.
//!
//! These sets establish a contract for system execution order within the
//! `FixedUpdate` schedule. Plugins place their systems into the appropriate
//! set so that inter-plugin ordering is explicit and testable rather than
//! relying on implicit timing assumptions.
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – Tick counters, the farm clock, and command execution.
//!   Commands queued by the operator (start/stop/toggle) are applied here so
//!   the rest of the tick sees a consistent zone/system state.
//! * **Simulation** – The core state machines: moisture walks, tank usage,
//!   weather, crop health, equipment metrics.
//! * **PostSim** – Aggregation and reporting: moisture history, weather
//!   alerts, notifications, invariant guards. These read simulation state
//!   and never feed back into the same tick.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Configured as a chain: `PreSim` → `Simulation` → `PostSim`.
/// Individual plugins use `.in_set(SimulationSet::X)` when registering their
/// systems, which gives them automatic ordering relative to other phases
/// while retaining the ability to add fine-grained `.after()` / `.before()`
/// constraints within the same phase.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Pre-simulation setup: tick counters, farm clock, command execution.
    PreSim,
    /// Core simulation: moisture, tank, weather, crops, equipment.
    Simulation,
    /// Post-simulation aggregation: history, alerts, notifications, guards.
    PostSim,
}
