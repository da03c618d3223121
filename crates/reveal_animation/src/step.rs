//! Animation steps and typed offsets
//!
//! A step describes one transition applied to a group of targets. Where it
//! starts is an [`Offset`]: a signed delta from a named [`Anchor`], resolved
//! to an absolute time by the composer.
//!
//! ```rust
//! use reveal_animation::{AnimationStep, Offset};
//! use reveal_core::{Role, SceneSurface, TargetGroup, VisualState};
//!
//! let mut surface = SceneSurface::new();
//! let image = surface.append(Role::Image, 300.0);
//!
//! // Start 500ms before the previous step ends
//! let step = AnimationStep::to(TargetGroup::single(image, Role::Image), VisualState::new().scale(1.0))
//!     .duration(800.0)
//!     .offset(Offset::overlap(500.0));
//! assert_eq!(step.offset, Offset::overlap(500.0));
//! ```

use crate::easing::Easing;
use reveal_core::{Property, TargetGroup, VisualState};
use serde::{Deserialize, Serialize};

/// Reference point an offset is measured from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Time zero of the timeline
    Origin,
    /// Start of the previous step
    PreviousStart,
    /// End of the previous step, including its stagger
    #[default]
    PreviousEnd,
    /// Latest end of any step composed so far
    TimelineEnd,
}

/// Signed delay relative to an anchor
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub anchor: Anchor,
    pub delta_ms: f32,
}

impl Offset {
    pub const fn new(anchor: Anchor, delta_ms: f32) -> Self {
        Self { anchor, delta_ms }
    }

    /// Start when the previous step ends
    pub const fn after_previous() -> Self {
        Self::new(Anchor::PreviousEnd, 0.0)
    }

    /// Start `ms` before the previous step ends
    pub fn overlap(ms: f32) -> Self {
        Self::new(Anchor::PreviousEnd, -ms)
    }

    /// Start `ms` after the previous step ends
    pub fn gap(ms: f32) -> Self {
        Self::new(Anchor::PreviousEnd, ms)
    }

    /// Start at an absolute time
    pub fn at(ms: f32) -> Self {
        Self::new(Anchor::Origin, ms)
    }

    /// Start `delta_ms` after the previous step starts
    pub fn with_previous(delta_ms: f32) -> Self {
        Self::new(Anchor::PreviousStart, delta_ms)
    }

    /// Start `delta_ms` after everything composed so far has ended
    pub fn after_all(delta_ms: f32) -> Self {
        Self::new(Anchor::TimelineEnd, delta_ms)
    }

    /// Push the resolved start later by `ms`
    pub fn delayed(mut self, ms: f32) -> Self {
        self.delta_ms += ms;
        self
    }
}

/// Order in which group members are staggered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerDirection {
    /// First registered member starts first
    #[default]
    Forward,
    /// Last registered member starts first
    Reverse,
}

/// One transition over a group of targets
#[derive(Clone, Debug)]
pub struct AnimationStep {
    pub targets: TargetGroup,
    /// Start values; when absent they are read from the surface on first activation
    pub from: Option<VisualState>,
    /// End values; when absent the current values are captured when the timeline is primed
    pub to: Option<VisualState>,
    /// Per-member duration; falls back to the timeline default
    pub duration_ms: Option<f32>,
    /// Falls back to the timeline default
    pub easing: Option<Easing>,
    pub stagger_ms: f32,
    pub stagger_direction: StaggerDirection,
    pub offset: Offset,
    /// Wait after the offset resolves; a gate holding this step releases before it
    pub delay_ms: f32,
    pub label: Option<String>,
}

impl AnimationStep {
    fn with_endpoints(
        targets: impl Into<TargetGroup>,
        from: Option<VisualState>,
        to: Option<VisualState>,
    ) -> Self {
        Self {
            targets: targets.into(),
            from,
            to,
            duration_ms: None,
            easing: None,
            stagger_ms: 0.0,
            stagger_direction: StaggerDirection::Forward,
            offset: Offset::after_previous(),
            delay_ms: 0.0,
            label: None,
        }
    }

    /// Animate from the current values to `to`
    pub fn to(targets: impl Into<TargetGroup>, to: VisualState) -> Self {
        Self::with_endpoints(targets, None, Some(to))
    }

    /// Animate from `from` back to the current values
    pub fn from(targets: impl Into<TargetGroup>, from: VisualState) -> Self {
        Self::with_endpoints(targets, Some(from), None)
    }

    /// Animate between two explicit states
    pub fn from_to(targets: impl Into<TargetGroup>, from: VisualState, to: VisualState) -> Self {
        Self::with_endpoints(targets, Some(from), Some(to))
    }

    pub fn duration(mut self, ms: f32) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn stagger(mut self, ms: f32) -> Self {
        self.stagger_ms = ms;
        self
    }

    pub fn stagger_reverse(mut self) -> Self {
        self.stagger_direction = StaggerDirection::Reverse;
        self
    }

    pub fn offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    /// Shorthand for `offset(Offset::overlap(ms))`
    pub fn overlap(self, ms: f32) -> Self {
        self.offset(Offset::overlap(ms))
    }

    /// Shorthand for `offset(Offset::at(ms))`
    pub fn at(self, ms: f32) -> Self {
        self.offset(Offset::at(ms))
    }

    /// Delay the step relative to wherever its offset resolves
    ///
    /// Unlike [`Offset::delayed`], the delay is not part of the anchor: a gate
    /// holding this step parks before the delay, which only runs once the
    /// gate fires.
    pub fn delay(mut self, ms: f32) -> Self {
        self.delay_ms += ms.max(0.0);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Properties touched by this step, `to` order first
    pub fn properties(&self) -> Vec<Property> {
        let mut props: Vec<Property> = Vec::new();
        for state in [&self.to, &self.from].into_iter().flatten() {
            for p in state.properties() {
                if !props.contains(&p) {
                    props.push(p);
                }
            }
        }
        props
    }

    /// Start delay of the member at `index` in a group of `total`
    pub fn stagger_delay(&self, index: usize, total: usize) -> f32 {
        let effective = match self.stagger_direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
        };
        self.stagger_ms.max(0.0) * effective as f32
    }

    /// Span from the first member's start to the last member's end
    pub fn span(&self, duration_ms: f32, members: usize) -> f32 {
        if members == 0 {
            return 0.0;
        }
        duration_ms + self.stagger_ms.max(0.0) * (members - 1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reveal_core::{Role, SceneSurface};

    fn group(n: usize) -> TargetGroup {
        let mut surface = SceneSurface::new();
        let members = (0..n)
            .map(|_| reveal_core::AnimatableTarget::new(surface.append(Role::Icon, 10.0), Role::Icon))
            .collect();
        TargetGroup::new(members)
    }

    #[test]
    fn test_offset_helpers() {
        assert_eq!(Offset::overlap(500.0).delta_ms, -500.0);
        assert_eq!(Offset::gap(100.0).anchor, Anchor::PreviousEnd);
        assert_eq!(Offset::at(300.0).anchor, Anchor::Origin);
        assert_eq!(Offset::after_previous().delayed(300.0).delta_ms, 300.0);
    }

    #[test]
    fn test_span() {
        let step = AnimationStep::to(group(4), VisualState::new().opacity(1.0)).stagger(200.0);
        assert_eq!(step.span(800.0, 4), 1400.0);
        assert_eq!(step.span(800.0, 0), 0.0);
        assert_eq!(step.span(800.0, 1), 800.0);
    }

    #[test]
    fn test_stagger_direction() {
        let forward = AnimationStep::to(group(3), VisualState::new()).stagger(100.0);
        assert_eq!(forward.stagger_delay(0, 3), 0.0);
        assert_eq!(forward.stagger_delay(2, 3), 200.0);

        let reverse = forward.clone().stagger_reverse();
        assert_eq!(reverse.stagger_delay(0, 3), 200.0);
        assert_eq!(reverse.stagger_delay(2, 3), 0.0);
    }

    #[test]
    fn test_properties_union() {
        let step = AnimationStep::from_to(
            group(1),
            VisualState::new().y(20.0).opacity(0.0),
            VisualState::new().opacity(1.0).x(0.0),
        );
        assert_eq!(
            step.properties(),
            vec![Property::Opacity, Property::X, Property::Y]
        );
    }
}
