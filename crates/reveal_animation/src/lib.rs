//! Reveal Animation System
//!
//! Entrance-animation orchestration for views that mount and unmount.
//!
//! # Features
//!
//! - **Steps**: property transitions with duration, easing and stagger
//! - **Typed Offsets**: steps placed relative to named anchors instead of strings
//! - **Timeline Composer**: deterministic absolute schedules with overlap clamping
//!   and same-property conflict sequencing
//! - **Scheduler**: frame-driven playback and queued scroll/resize dispatch
//! - **Scroll Gates**: hold a timeline segment until its trigger crosses a
//!   viewport threshold, once or on every crossing
//! - **Lifecycle Scopes**: every timeline and gate belongs to a scope whose
//!   close cancels and detaches all of them, including nested scopes
//! - **Presets**: the common entrance motions

pub mod easing;
pub mod gate;
pub mod playback;
pub mod presets;
pub mod scheduler;
pub mod scope;
pub mod step;
pub mod timeline;

pub use easing::Easing;
pub use gate::{GatePolicy, ScrollGate, Segment};
pub use playback::{PlayState, TimelineRun};
pub use presets::EntrancePreset;
pub use scheduler::{AnimationScheduler, GateId, SchedulerHandle, ScopeId, TimelineId};
pub use scope::{GateHandle, Scope, TimelineHandle};
pub use step::{Anchor, AnimationStep, Offset, StaggerDirection};
pub use timeline::{ResolvedStep, Timeline, TimelineComposer, TimelineDefaults, Track};
