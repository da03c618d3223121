//! Entrance presets
//!
//! Named start states for the motions used across the site. A preset gives
//! the start state applied before first paint, the rest state it animates to,
//! and the curve that suits it.
//!
//! ```rust
//! use reveal_animation::EntrancePreset;
//! use reveal_core::Property;
//!
//! let slide = EntrancePreset::SlideInLeft { distance: 200.0 };
//! assert_eq!(slide.initial().get(Property::X), Some(-200.0));
//! assert_eq!(slide.rest().get(Property::X), Some(0.0));
//! assert_eq!(slide.rest().get(Property::Opacity), Some(1.0));
//! ```

use crate::easing::Easing;
use crate::step::AnimationStep;
use reveal_core::{TargetGroup, VisualState};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrancePreset {
    /// Opacity only
    Fade,
    /// Enter from the left
    SlideInLeft { distance: f32 },
    /// Enter from the right
    SlideInRight { distance: f32 },
    /// Rise into place from below
    FadeUp { distance: f32 },
    /// Drop into place from above
    FadeDown { distance: f32 },
    /// Grow from nothing with overshoot
    PopIn,
    /// Grow from `from` times the rest size
    ScaleIn { from: f32 },
    /// Swing up from lying flat, pushed back in depth
    TiltIn,
    /// Slightly shrunk and tilted back
    ZoomTilt,
    /// Grow horizontally with overshoot
    GrowX,
}

impl EntrancePreset {
    /// The state applied before first paint
    pub fn initial(&self) -> VisualState {
        let hidden = VisualState::new().opacity(0.0);
        match *self {
            EntrancePreset::Fade => hidden,
            EntrancePreset::SlideInLeft { distance } => hidden.x(-distance),
            EntrancePreset::SlideInRight { distance } => hidden.x(distance),
            EntrancePreset::FadeUp { distance } => hidden.y(distance),
            EntrancePreset::FadeDown { distance } => hidden.y(-distance),
            EntrancePreset::PopIn => hidden.scale(0.0),
            EntrancePreset::ScaleIn { from } => hidden.scale(from),
            EntrancePreset::TiltIn => hidden.rotation_x(90.0).z(-200.0).y(50.0),
            EntrancePreset::ZoomTilt => hidden.scale(0.8).rotation_x(15.0),
            EntrancePreset::GrowX => hidden.scale_x(0.0),
        }
    }

    /// The state the entrance settles on
    pub fn rest(&self) -> VisualState {
        self.initial().rest()
    }

    pub fn easing(&self) -> Easing {
        match self {
            EntrancePreset::PopIn | EntrancePreset::GrowX => Easing::BackOut(1.7),
            _ => Easing::ENTRANCE,
        }
    }

    /// Animate from whatever is on screen to the rest state
    ///
    /// Pair with [`reveal_core::apply_initial`] so the start state is already
    /// painted when the step begins.
    pub fn enter(&self, targets: impl Into<TargetGroup>) -> AnimationStep {
        AnimationStep::to(targets, self.rest()).ease(self.easing())
    }

    /// Animate between the preset's own start and rest states
    pub fn reveal(&self, targets: impl Into<TargetGroup>) -> AnimationStep {
        AnimationStep::from_to(targets, self.initial(), self.rest()).ease(self.easing())
    }

    /// Animate back to the start state
    pub fn exit(&self, targets: impl Into<TargetGroup>) -> AnimationStep {
        AnimationStep::to(targets, self.initial()).ease(Easing::PowerIn(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reveal_core::Property;

    #[test]
    fn test_rest_matches_initial_properties() {
        let tilt = EntrancePreset::TiltIn;
        let rest = tilt.rest();
        for property in tilt.initial().properties() {
            assert_eq!(rest.get(property), Some(property.rest_value()));
        }
        assert_eq!(rest.len(), 4);
    }

    #[test]
    fn test_pop_in_overshoots() {
        assert_eq!(EntrancePreset::PopIn.easing(), Easing::BackOut(1.7));
        assert_eq!(EntrancePreset::PopIn.rest().get(Property::Scale), Some(1.0));
        assert!(Easing::BackOut(1.7).apply(0.7) > 1.0);
    }

    #[test]
    fn test_exit_targets_initial_state() {
        let preset = EntrancePreset::FadeDown { distance: 20.0 };
        let step = preset.exit(TargetGroup::default());
        assert_eq!(step.to, Some(preset.initial()));
        assert!(step.from.is_none());
    }

    #[test]
    fn test_reveal_has_both_endpoints() {
        let preset = EntrancePreset::GrowX;
        let step = preset.reveal(TargetGroup::default());
        assert_eq!(step.from.as_ref().and_then(|s| s.get(Property::ScaleX)), Some(0.0));
        assert_eq!(step.to.as_ref().and_then(|s| s.get(Property::ScaleX)), Some(1.0));
    }
}
