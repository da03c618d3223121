//! Timeline composition
//!
//! The composer turns an ordered list of [`AnimationStep`]s into a
//! [`Timeline`]: every step gets an absolute start and end, and every
//! (member, property) pair becomes a [`Track`] with its own window.
//!
//! Resolution rules:
//!
//! - A step starts at its anchor plus its delta. Anchors refer to the steps
//!   composed before it, so composition order is evaluation order.
//! - A start that resolves before zero is clamped to zero.
//! - Member `i` of a staggered group starts `i * stagger` after the step start,
//!   so a group of `G` spans `duration + stagger * (G - 1)`.
//! - An empty group is a zero-length step; later offsets measure against it.
//! - Unregistered members are dropped from the step.
//! - If a member would animate a property some earlier track is still
//!   animating on the same element, the whole step is pushed back until the
//!   earlier track ends.
//!
//! ```rust
//! use reveal_animation::{AnimationStep, TimelineComposer};
//! use reveal_core::{Role, SceneSurface, TargetRegistry, VisualState};
//!
//! let mut surface = SceneSurface::new();
//! let panel = surface.append(Role::Panel, 400.0);
//! let image = surface.append(Role::Image, 300.0);
//!
//! let mut targets = TargetRegistry::new();
//! targets.register(Some(panel), Role::Panel);
//! targets.register(Some(image), Role::Image);
//!
//! let timeline = TimelineComposer::new(&targets).build(vec![
//!     AnimationStep::to(targets.group(Role::Panel), VisualState::new().x(0.0)).duration(1000.0),
//!     AnimationStep::to(targets.group(Role::Image), VisualState::new().scale(1.0))
//!         .duration(800.0)
//!         .overlap(500.0),
//! ]);
//!
//! assert_eq!(timeline.start_of(1), Some(500.0));
//! assert_eq!(timeline.duration_ms(), 1300.0);
//! ```

use crate::easing::Easing;
use crate::step::{Anchor, AnimationStep};
use reveal_core::{AnimationIssue, ElementId, Property, TargetRegistry};
use serde::Serialize;

/// Values used when a step leaves duration or easing unspecified
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineDefaults {
    pub duration_ms: f32,
    pub easing: Easing,
}

impl Default for TimelineDefaults {
    fn default() -> Self {
        Self {
            duration_ms: 500.0,
            easing: Easing::ENTRANCE,
        }
    }
}

/// One property of one element animated over a fixed window
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Track {
    /// Index of the step this track came from
    pub step: usize,
    #[serde(skip)]
    pub element: ElementId,
    pub property: Property,
    pub from: Option<f32>,
    pub to: Option<f32>,
    pub start_ms: f32,
    pub duration_ms: f32,
    pub easing: Easing,
}

impl Track {
    pub fn end_ms(&self) -> f32 {
        self.start_ms + self.duration_ms
    }

    fn overlaps(&self, start: f32, end: f32) -> bool {
        start < self.end_ms() && self.start_ms < end
    }
}

/// A step after offset resolution
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedStep {
    pub index: usize,
    pub label: Option<String>,
    /// Where the offset resolved, before the step's delay
    pub anchor_ms: f32,
    pub start_ms: f32,
    pub end_ms: f32,
    /// Per-member duration
    pub duration_ms: f32,
    pub stagger_ms: f32,
    #[serde(skip)]
    pub members: Vec<ElementId>,
    #[serde(skip)]
    pub skipped: Vec<ElementId>,
}

impl ResolvedStep {
    pub fn span_ms(&self) -> f32 {
        self.end_ms - self.start_ms
    }
}

/// A fully resolved, immutable animation schedule
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    steps: Vec<ResolvedStep>,
    tracks: Vec<Track>,
    duration_ms: f32,
    issues: Vec<AnimationIssue>,
}

impl Timeline {
    pub fn steps(&self) -> &[ResolvedStep] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&ResolvedStep> {
        self.steps.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Absolute start of a step
    pub fn start_of(&self, index: usize) -> Option<f32> {
        self.steps.get(index).map(|s| s.start_ms)
    }

    /// Where a step's offset resolved, before its delay
    ///
    /// Gates hold here so a delayed step waits out its delay after release.
    pub fn anchor_of(&self, index: usize) -> Option<f32> {
        self.steps.get(index).map(|s| s.anchor_ms)
    }

    /// Absolute end of a step, including stagger
    pub fn end_of(&self, index: usize) -> Option<f32> {
        self.steps.get(index).map(|s| s.end_ms)
    }

    /// Latest end of any step
    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// Issues encountered while composing
    pub fn issues(&self) -> &[AnimationIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Elements animated by this timeline, in first-touched order
    pub fn elements(&self) -> Vec<ElementId> {
        let mut out: Vec<ElementId> = Vec::new();
        for track in &self.tracks {
            if !out.contains(&track.element) {
                out.push(track.element);
            }
        }
        out
    }
}

/// Builds [`Timeline`]s against one mount's registered targets
pub struct TimelineComposer<'a> {
    registry: Option<&'a TargetRegistry>,
    defaults: TimelineDefaults,
}

impl<'a> TimelineComposer<'a> {
    /// Compose against a registry; members it does not contain are dropped
    pub fn new(registry: &'a TargetRegistry) -> Self {
        Self {
            registry: Some(registry),
            defaults: TimelineDefaults::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: TimelineDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> TimelineDefaults {
        self.defaults
    }

    /// Resolve the steps into a timeline
    pub fn build<I>(&self, steps: I) -> Timeline
    where
        I: IntoIterator<Item = AnimationStep>,
    {
        let mut timeline = Timeline::default();
        let mut prev_start = 0.0f32;
        let mut prev_end = 0.0f32;
        let mut timeline_end = 0.0f32;

        for (index, step) in steps.into_iter().enumerate() {
            let (members, skipped) = self.partition_members(index, &step, &mut timeline.issues);

            let anchor = match step.offset.anchor {
                Anchor::Origin => 0.0,
                Anchor::PreviousStart => prev_start,
                Anchor::PreviousEnd => prev_end,
                Anchor::TimelineEnd => timeline_end,
            };
            let resolved = anchor + step.offset.delta_ms;
            let anchor_ms = if resolved < 0.0 {
                let issue = AnimationIssue::InvalidOffset {
                    step: index,
                    resolved_ms: resolved,
                };
                issue.log();
                timeline.issues.push(issue);
                0.0
            } else {
                resolved
            };
            let mut start = anchor_ms + step.delay_ms.max(0.0);

            let duration = step
                .duration_ms
                .unwrap_or(self.defaults.duration_ms)
                .max(0.0);
            let easing = step.easing.unwrap_or(self.defaults.easing);
            let properties = step.properties();

            start = sequence_conflicts(
                index,
                start,
                duration,
                &step,
                &members,
                &properties,
                &timeline.tracks,
                &mut timeline.issues,
            );

            let total = members.len();
            for (i, element) in members.iter().enumerate() {
                let member_start = start + step.stagger_delay(i, total);
                for property in &properties {
                    timeline.tracks.push(Track {
                        step: index,
                        element: *element,
                        property: *property,
                        from: step.from.as_ref().and_then(|s| s.get(*property)),
                        to: step.to.as_ref().and_then(|s| s.get(*property)),
                        start_ms: member_start,
                        duration_ms: duration,
                        easing,
                    });
                }
            }

            let end = start + step.span(duration, total);
            tracing::trace!(
                "TimelineComposer: step {} ({} members) resolved to {}..{}ms",
                index,
                total,
                start,
                end
            );

            timeline.steps.push(ResolvedStep {
                index,
                label: step.label.clone(),
                anchor_ms,
                start_ms: start,
                end_ms: end,
                duration_ms: duration,
                stagger_ms: step.stagger_ms.max(0.0),
                members,
                skipped,
            });

            prev_start = start;
            prev_end = end;
            timeline_end = timeline_end.max(end);
        }

        timeline.duration_ms = timeline_end;
        timeline
    }

    fn partition_members(
        &self,
        index: usize,
        step: &AnimationStep,
        issues: &mut Vec<AnimationIssue>,
    ) -> (Vec<ElementId>, Vec<ElementId>) {
        let mut members: Vec<ElementId> = Vec::with_capacity(step.targets.len());
        let mut skipped = Vec::new();
        for target in step.targets.members() {
            let element = target.element;
            if members.contains(&element) {
                continue;
            }
            let registered = self.registry.map_or(true, |r| r.contains(element));
            if registered {
                members.push(element);
            } else {
                let issue = AnimationIssue::TargetNotReady {
                    step: index,
                    element,
                };
                issue.log();
                issues.push(issue);
                skipped.push(element);
            }
        }
        (members, skipped)
    }
}

impl Default for TimelineComposer<'static> {
    /// A composer that accepts every member without registry validation
    fn default() -> Self {
        Self {
            registry: None,
            defaults: TimelineDefaults::default(),
        }
    }
}

/// Push `start` later until no member overlaps an earlier track on the same property
#[allow(clippy::too_many_arguments)]
fn sequence_conflicts(
    index: usize,
    mut start: f32,
    duration: f32,
    step: &AnimationStep,
    members: &[ElementId],
    properties: &[Property],
    tracks: &[Track],
    issues: &mut Vec<AnimationIssue>,
) -> f32 {
    let total = members.len();
    // Every pass moves `start` to some track's end, so this is bounded by the track count
    for _ in 0..=tracks.len() {
        let mut shift = 0.0f32;
        let mut culprit = None;
        for (i, element) in members.iter().enumerate() {
            let member_start = start + step.stagger_delay(i, total);
            let member_end = member_start + duration;
            for track in tracks {
                if track.element != *element || !properties.contains(&track.property) {
                    continue;
                }
                if track.overlaps(member_start, member_end) {
                    let needed = track.end_ms() - member_start;
                    if needed > shift {
                        shift = needed;
                        culprit = Some((*element, track.property));
                    }
                }
            }
        }

        let Some((element, property)) = culprit else {
            break;
        };
        let issue = AnimationIssue::PropertyConflict {
            step: index,
            element,
            property,
            delay_ms: shift,
        };
        issue.log();
        issues.push(issue);
        start += shift;
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Offset;
    use reveal_core::{AnimatableTarget, Role, SceneSurface, TargetGroup, VisualState};

    struct Fixture {
        surface: SceneSurface,
        registry: TargetRegistry,
        ids: Vec<ElementId>,
    }

    fn fixture(n: usize) -> Fixture {
        let mut surface = SceneSurface::new();
        let mut registry = TargetRegistry::new();
        let ids: Vec<_> = (0..n).map(|_| surface.append(Role::Card, 100.0)).collect();
        registry.register_all(ids.iter().copied(), Role::Card);
        Fixture {
            surface,
            registry,
            ids,
        }
    }

    fn single(id: ElementId) -> TargetGroup {
        TargetGroup::single(id, Role::Card)
    }

    fn fade(id: ElementId, duration: f32) -> AnimationStep {
        AnimationStep::to(single(id), VisualState::new().opacity(1.0)).duration(duration)
    }

    #[test]
    fn test_sequential_starts_are_prefix_sums() {
        let f = fixture(4);
        let durations = [300.0, 500.0, 200.0, 700.0];
        let steps = f
            .ids
            .iter()
            .zip(durations)
            .map(|(id, d)| fade(*id, d));

        let timeline = TimelineComposer::new(&f.registry).build(steps);

        let mut expected = 0.0;
        for (i, d) in durations.iter().enumerate() {
            assert_eq!(timeline.start_of(i), Some(expected));
            expected += d;
        }
        assert_eq!(timeline.duration_ms(), 1700.0);
        assert!(timeline.issues().is_empty());
    }

    #[test]
    fn test_overlap_from_previous_end() {
        let f = fixture(3);
        let timeline = TimelineComposer::new(&f.registry).build(vec![
            fade(f.ids[0], 1000.0),
            fade(f.ids[1], 800.0).overlap(500.0),
            fade(f.ids[2], 1000.0).overlap(700.0),
        ]);

        assert_eq!(timeline.start_of(0), Some(0.0));
        assert_eq!(timeline.start_of(1), Some(500.0));
        assert_eq!(timeline.start_of(2), Some(600.0));
        assert_eq!(timeline.duration_ms(), 1600.0);
    }

    #[test]
    fn test_excess_overlap_clamps_to_zero() {
        let f = fixture(2);
        let timeline = TimelineComposer::new(&f.registry).build(vec![
            fade(f.ids[0], 300.0),
            fade(f.ids[1], 500.0).overlap(1000.0),
        ]);

        assert_eq!(timeline.start_of(1), Some(0.0));
        assert!(matches!(
            timeline.issues()[0],
            AnimationIssue::InvalidOffset { step: 1, .. }
        ));
    }

    #[test]
    fn test_stagger_span() {
        let f = fixture(4);
        let group = f.registry.group(Role::Card);
        let timeline = TimelineComposer::new(&f.registry).build(vec![AnimationStep::to(
            group,
            VisualState::new().y(0.0).opacity(1.0),
        )
        .duration(800.0)
        .stagger(200.0)]);

        let step = timeline.step(0).unwrap();
        assert_eq!(step.span_ms(), 1400.0);
        let last_icon_end = timeline
            .tracks()
            .iter()
            .filter(|t| t.element == f.ids[3])
            .map(Track::end_ms)
            .fold(0.0f32, f32::max);
        assert_eq!(last_icon_end, 1400.0);
    }

    #[test]
    fn test_empty_group_is_zero_length() {
        let f = fixture(2);
        let timeline = TimelineComposer::new(&f.registry).build(vec![
            fade(f.ids[0], 400.0),
            AnimationStep::to(TargetGroup::default(), VisualState::new().opacity(1.0))
                .duration(900.0)
                .stagger(100.0),
            fade(f.ids[1], 400.0).overlap(100.0),
        ]);

        assert_eq!(timeline.start_of(1), Some(400.0));
        assert_eq!(timeline.end_of(1), Some(400.0));
        assert_eq!(timeline.start_of(2), Some(300.0));
        assert!(timeline.issues().is_empty());
    }

    #[test]
    fn test_unregistered_target_is_skipped() {
        let mut f = fixture(1);
        let stray = f.surface.append(Role::Card, 10.0);

        let group = TargetGroup::new(vec![
            AnimatableTarget::new(f.ids[0], Role::Card),
            AnimatableTarget::new(stray, Role::Card),
        ]);
        let timeline = TimelineComposer::new(&f.registry).build(vec![AnimationStep::to(
            group,
            VisualState::new().opacity(1.0),
        )
        .duration(500.0)]);

        let step = timeline.step(0).unwrap();
        assert_eq!(step.members, vec![f.ids[0]]);
        assert_eq!(step.skipped, vec![stray]);
        assert!(matches!(
            timeline.issues()[0],
            AnimationIssue::TargetNotReady { step: 0, .. }
        ));
    }

    #[test]
    fn test_anchors() {
        let f = fixture(4);
        let timeline = TimelineComposer::new(&f.registry).build(vec![
            fade(f.ids[0], 1000.0),
            fade(f.ids[1], 200.0).offset(Offset::with_previous(100.0)),
            fade(f.ids[2], 200.0).offset(Offset::after_all(50.0)),
            fade(f.ids[3], 200.0).at(20.0),
        ]);

        assert_eq!(timeline.start_of(1), Some(100.0));
        assert_eq!(timeline.start_of(2), Some(1050.0));
        assert_eq!(timeline.start_of(3), Some(20.0));
    }

    #[test]
    fn test_delay_shifts_start() {
        let f = fixture(1);
        let timeline =
            TimelineComposer::new(&f.registry).build(vec![fade(f.ids[0], 800.0).delay(300.0)]);
        assert_eq!(timeline.start_of(0), Some(300.0));
        assert_eq!(timeline.anchor_of(0), Some(0.0));
        assert_eq!(timeline.duration_ms(), 1100.0);
    }

    #[test]
    fn test_delay_follows_overlap_anchor() {
        let f = fixture(2);
        let timeline = TimelineComposer::new(&f.registry).build(vec![
            fade(f.ids[0], 1000.0),
            fade(f.ids[1], 500.0).overlap(400.0).delay(100.0),
        ]);
        assert_eq!(timeline.anchor_of(1), Some(600.0));
        assert_eq!(timeline.start_of(1), Some(700.0));
        assert!(timeline.issues().is_empty());
    }

    #[test]
    fn test_same_property_conflict_is_sequenced() {
        let f = fixture(1);
        let timeline = TimelineComposer::new(&f.registry).build(vec![
            fade(f.ids[0], 1000.0),
            AnimationStep::to(single(f.ids[0]), VisualState::new().opacity(0.5))
                .duration(300.0)
                .at(200.0),
        ]);

        assert_eq!(timeline.start_of(1), Some(1000.0));
        assert!(matches!(
            timeline.issues()[0],
            AnimationIssue::PropertyConflict { step: 1, delay_ms, .. } if delay_ms == 800.0
        ));
    }

    #[test]
    fn test_disjoint_properties_may_overlap() {
        let f = fixture(1);
        let timeline = TimelineComposer::new(&f.registry).build(vec![
            AnimationStep::to(single(f.ids[0]), VisualState::new().x(0.0)).duration(1000.0),
            AnimationStep::to(single(f.ids[0]), VisualState::new().opacity(1.0))
                .duration(300.0)
                .at(200.0),
        ]);

        assert_eq!(timeline.start_of(1), Some(200.0));
        assert!(timeline.issues().is_empty());
    }

    #[test]
    fn test_deterministic() {
        let f = fixture(3);
        let build = || {
            TimelineComposer::new(&f.registry).build(vec![
                AnimationStep::to(f.registry.group(Role::Card), VisualState::new().y(0.0))
                    .duration(700.0)
                    .stagger(100.0),
                fade(f.ids[1], 300.0).overlap(250.0),
            ])
        };
        let a = build();
        let b = build();
        assert_eq!(a.steps(), b.steps());
        assert_eq!(a.tracks(), b.tracks());
    }
}
