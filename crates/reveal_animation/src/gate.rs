//! Scroll gates
//!
//! A gate holds a timeline segment until its trigger element's top edge
//! crosses a line at `threshold` of the viewport height while scrolling down.
//! Layout changes alone never fire a gate: the crossing must coincide with a
//! downward scroll. A gate that has not fired yet also fires on any downward
//! scroll while its trigger is past the line, so content a resize or an
//! upward scroll moved past the line is not held forever.

use crate::scheduler::TimelineId;
use reveal_core::{ElementId, RenderSurface, Viewport};
use serde::{Deserialize, Serialize};

/// What happens after a gate has fired
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePolicy {
    /// Fire on the first crossing, then never again
    #[default]
    Once,
    /// Fire on every downward crossing, replaying the segment from its start state
    Replay,
}

/// The part of a timeline a gate controls: everything from `from_step` on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub timeline: TimelineId,
    pub from_step: usize,
}

impl Segment {
    pub fn whole(timeline: TimelineId) -> Self {
        Self {
            timeline,
            from_step: 0,
        }
    }

    pub fn from_step(timeline: TimelineId, from_step: usize) -> Self {
        Self {
            timeline,
            from_step,
        }
    }
}

/// A viewport-crossing condition bound to a timeline segment
#[derive(Clone, Debug)]
pub struct ScrollGate {
    trigger: ElementId,
    threshold: f32,
    policy: GatePolicy,
    segment: Segment,
    /// Absolute time the segment starts at
    segment_start_ms: f32,
    /// Whether the trigger was past the line at the last evaluation
    past: bool,
    last_scroll_y: f32,
    activations: u32,
    spent: bool,
}

impl ScrollGate {
    /// Create a gate, recording the trigger's current side of the line
    pub fn new(
        trigger: ElementId,
        threshold: f32,
        policy: GatePolicy,
        segment: Segment,
        segment_start_ms: f32,
        viewport: &Viewport,
        surface: &dyn RenderSurface,
    ) -> Self {
        let threshold = threshold.clamp(0.0, 1.0);
        let past = surface
            .bounds(trigger)
            .is_some_and(|b| viewport.is_past(b.y, threshold));
        Self {
            trigger,
            threshold,
            policy,
            segment,
            segment_start_ms,
            past,
            last_scroll_y: viewport.scroll_y,
            activations: 0,
            spent: false,
        }
    }

    pub fn trigger(&self) -> ElementId {
        self.trigger
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn policy(&self) -> GatePolicy {
        self.policy
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn segment_start_ms(&self) -> f32 {
        self.segment_start_ms
    }

    pub fn activations(&self) -> u32 {
        self.activations
    }

    /// A `Once` gate that has fired
    pub fn is_spent(&self) -> bool {
        self.spent
    }

    /// Whether the trigger was past the line at the last evaluation
    pub fn is_past(&self) -> bool {
        self.past
    }

    /// Same trigger, threshold and policy
    pub fn same_condition(&self, other: &ScrollGate) -> bool {
        self.trigger == other.trigger
            && self.threshold == other.threshold
            && self.policy == other.policy
    }

    /// Evaluate against the current viewport; returns `true` if the gate fires
    pub fn evaluate(&mut self, viewport: &Viewport, surface: &dyn RenderSurface) -> bool {
        if self.spent {
            return false;
        }
        let Some(bounds) = surface.bounds(self.trigger) else {
            return false;
        };

        let scrolled_down = viewport.scroll_y > self.last_scroll_y;
        self.last_scroll_y = viewport.scroll_y;

        let now_past = viewport.is_past(bounds.y, self.threshold);
        let crossed = !self.past || self.activations == 0;
        let fired = now_past && crossed && scrolled_down;
        self.past = now_past;

        if fired {
            self.activations += 1;
            if self.policy == GatePolicy::Once {
                self.spent = true;
            }
            tracing::debug!(
                "ScrollGate: fired at scroll {} (threshold {}, activation {})",
                viewport.scroll_y,
                self.threshold,
                self.activations
            );
        }
        fired
    }
}
