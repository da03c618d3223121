//! Reveal Core
//!
//! Host-facing primitives for the Reveal entrance-animation engine:
//!
//! - **Elements**: versioned handles into the host's render tree
//! - **Properties**: typed visual transform properties and property sets
//! - **Render Surface**: the boundary the engine writes property mutations to
//! - **Target Registry**: per-mount arena of animatable targets
//! - **Initial State**: synchronous pre-paint application of start states
//! - **Viewport**: scroll offset and viewport size consumed by scroll gates
//!
//! # Example
//!
//! ```rust
//! use reveal_core::{apply_initial, Property, RenderSurface, Role, SceneSurface, TargetRegistry, VisualState};
//!
//! let mut surface = SceneSurface::new();
//! let card = surface.append(Role::Card, 200.0);
//!
//! let mut targets = TargetRegistry::new();
//! targets.reset();
//! targets.register(Some(card), Role::Card);
//!
//! let start = VisualState::new().x(-200.0).opacity(0.0);
//! apply_initial(&mut surface, &targets.all(), &start);
//! assert_eq!(surface.property(card, Property::X), Some(-200.0));
//! ```

pub mod element;
pub mod initial;
pub mod issue;
pub mod property;
pub mod registry;
pub mod surface;
pub mod viewport;

pub use element::{AnimatableTarget, Bounds, ElementId, Role};
pub use initial::apply_initial;
pub use issue::AnimationIssue;
pub use property::{Property, VisualState};
pub use registry::{TargetGroup, TargetRegistry};
pub use surface::{RenderSurface, SceneElement, SceneSurface};
pub use viewport::{ScrollEvent, Viewport};
