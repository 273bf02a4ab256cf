//! Scheduling Core.
//!
//! This module contains the issue/retire machinery. It provides:
//! 1. **Resources:** The named resource table with values and busy-until reservations.
//! 2. **Hazards:** The resolver trait and the implicit and explicit readiness policies.
//! 3. **Scheduler:** The cycle-stepping engine producing [`CycleEvent`]s.

/// Per-cycle events.
pub mod event;

/// Readiness policies and hazard classification.
pub mod hazards;

/// Resource table.
pub mod resources;

/// Issue/retire engine.
pub mod scheduler;

pub use event::CycleEvent;
pub use hazards::{ExplicitDependencies, HazardKind, HazardMode, HazardResolver, ImplicitHazards, SchedulerState};
pub use resources::{Resource, ResourceTable};
pub use scheduler::{IssueOrder, Scheduler, SchedulerOptions};
