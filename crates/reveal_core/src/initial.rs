//! Initial-state application
//!
//! Start states must be written synchronously during mount, before the host
//! paints the frame, otherwise the final state flashes on screen and then
//! jumps to the animated start.

use crate::element::AnimatableTarget;
use crate::property::VisualState;
use crate::surface::RenderSurface;

/// Snap every target to `state` immediately
///
/// Returns the number of targets that were written. Targets whose element is
/// no longer attached are skipped.
pub fn apply_initial<S>(surface: &mut S, targets: &[AnimatableTarget], state: &VisualState) -> usize
where
    S: RenderSurface + ?Sized,
{
    let mut applied = 0;
    for target in targets {
        if !surface.is_attached(target.element) {
            tracing::trace!("apply_initial: skipping detached {} target", target.role);
            continue;
        }
        for (property, value) in state.iter() {
            surface.set_property(target.element, property, value);
        }
        applied += 1;
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Role;
    use crate::property::Property;
    use crate::surface::SceneSurface;

    #[test]
    fn test_applies_exact_state() {
        let mut surface = SceneSurface::new();
        let panel = surface.append(Role::Panel, 100.0);
        let image = surface.append(Role::Image, 100.0);
        let targets = [
            AnimatableTarget::new(panel, Role::Panel),
            AnimatableTarget::new(image, Role::Image),
        ];

        let state = VisualState::new().x(-200.0).opacity(0.0);
        assert_eq!(apply_initial(&mut surface, &targets, &state), 2);

        for t in &targets {
            assert_eq!(surface.property(t.element, Property::X), Some(-200.0));
            assert_eq!(surface.property(t.element, Property::Opacity), Some(0.0));
        }
    }

    #[test]
    fn test_skips_detached() {
        let mut surface = SceneSurface::new();
        let gone = surface.append(Role::Card, 100.0);
        surface.remove(gone);

        let state = VisualState::new().opacity(0.0);
        let applied = apply_initial(&mut surface, &[AnimatableTarget::new(gone, Role::Card)], &state);

        assert_eq!(applied, 0);
        assert_eq!(surface.mutation_count(), 0);
    }
}
