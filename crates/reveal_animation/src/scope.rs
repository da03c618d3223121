//! Lifecycle scopes
//!
//! A [`Scope`] ties every timeline and gate a mount creates to that mount's
//! lifetime. Closing it (explicitly or by dropping it) cancels the timelines,
//! detaches the gates, closes child scopes and forgets the registered
//! targets. Handles that outlive their scope turn into no-ops.

use crate::gate::{GatePolicy, Segment};
use crate::playback::PlayState;
use crate::scheduler::{GateId, SchedulerHandle, ScopeId, TimelineId};
use crate::timeline::Timeline;
use reveal_core::{AnimationIssue, ElementId, RenderSurface, TargetRegistry};

/// Owner of everything one mount animates
pub struct Scope {
    handle: SchedulerHandle,
    id: Option<ScopeId>,
    targets: TargetRegistry,
}

impl Scope {
    pub(crate) fn from_parts(handle: SchedulerHandle, id: Option<ScopeId>) -> Self {
        Self {
            handle,
            id,
            targets: TargetRegistry::new(),
        }
    }

    pub fn id(&self) -> Option<ScopeId> {
        self.id
    }

    /// Whether the scope (and every ancestor) is still open
    pub fn is_open(&self) -> bool {
        self.id.is_some_and(|id| self.handle.is_scope_open(id))
    }

    /// Open a scope that closes together with this one
    pub fn open_child(&self, label: impl Into<String>) -> Scope {
        let id = match self.id {
            Some(parent) => self.handle.create_scope(label.into(), Some(parent)),
            None => {
                AnimationIssue::UseAfterClose.log();
                None
            }
        };
        Scope::from_parts(self.handle.clone(), id)
    }

    pub fn targets(&self) -> &TargetRegistry {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> &mut TargetRegistry {
        &mut self.targets
    }

    /// Register a timeline without starting it
    ///
    /// The timeline is primed immediately so explicit start states are on
    /// screen before the first frame.
    pub fn track(&self, timeline: Timeline, surface: &mut dyn RenderSurface) -> TimelineHandle {
        let id = match self.id {
            Some(scope) => self.handle.register_timeline(scope, timeline, surface),
            None => {
                AnimationIssue::UseAfterClose.log();
                None
            }
        };
        TimelineHandle {
            handle: self.handle.clone(),
            id,
        }
    }

    /// Register a timeline and start it
    pub fn play(&self, timeline: Timeline, surface: &mut dyn RenderSurface) -> TimelineHandle {
        let handle = self.track(timeline, surface);
        handle.play();
        handle
    }

    /// Hold `timeline` from step `from_step` on until `trigger` crosses `threshold`
    ///
    /// The part of the timeline before `from_step` plays right away.
    pub fn gate(
        &self,
        timeline: &TimelineHandle,
        from_step: usize,
        trigger: ElementId,
        threshold: f32,
        policy: GatePolicy,
        surface: &dyn RenderSurface,
    ) -> GateHandle {
        let id = match (self.id, timeline.id) {
            (Some(scope), Some(tl)) => self.handle.attach_gate(
                scope,
                Segment::from_step(tl, from_step),
                trigger,
                threshold,
                policy,
                surface,
            ),
            _ => {
                AnimationIssue::UseAfterClose.log();
                None
            }
        };
        GateHandle {
            handle: self.handle.clone(),
            id,
        }
    }

    /// Whether `trigger` is already past `threshold` of the viewport
    pub fn is_visible(&self, trigger: ElementId, threshold: f32, surface: &dyn RenderSurface) -> bool {
        self.handle.is_past_threshold(trigger, threshold, surface)
    }

    /// Cancel everything this scope owns
    ///
    /// Idempotent. Nothing registered through this scope touches the surface
    /// afterwards, including scroll events already queued.
    pub fn close(&mut self) {
        if let Some(id) = self.id.take() {
            self.handle.close_scope(id);
        }
        self.targets.reset();
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.close();
    }
}

/// Handle to a timeline registered through a [`Scope`]
#[derive(Clone)]
pub struct TimelineHandle {
    handle: SchedulerHandle,
    id: Option<TimelineId>,
}

impl TimelineHandle {
    pub fn id(&self) -> Option<TimelineId> {
        self.id
    }

    /// Whether the timeline is still registered
    pub fn is_alive(&self) -> bool {
        self.id.is_some_and(|id| self.handle.is_timeline_alive(id))
    }

    fn with<R>(&self, f: impl FnOnce(&mut crate::playback::TimelineRun) -> R) -> Option<R> {
        let result = self.id.and_then(|id| self.handle.with_timeline(id, f));
        if result.is_none() {
            AnimationIssue::UseAfterClose.log();
        }
        result
    }

    pub fn play(&self) {
        self.with(|t| t.play());
    }

    pub fn pause(&self) {
        self.with(|t| t.pause());
    }

    pub fn resume(&self) {
        self.with(|t| t.resume());
    }

    /// Rewind to the start and play again
    pub fn restart(&self, surface: &mut dyn RenderSurface) {
        self.with(|t| t.restart(surface));
    }

    /// Jump to `time_ms` and render that frame
    pub fn seek(&self, time_ms: f32, surface: &mut dyn RenderSurface) {
        self.with(|t| t.seek(time_ms, surface));
    }

    /// Advance this timeline alone, outside the scheduler tick
    pub fn advance(&self, dt_ms: f32, surface: &mut dyn RenderSurface) -> bool {
        self.with(|t| t.advance(dt_ms, surface)).unwrap_or(false)
    }

    pub fn state(&self) -> Option<PlayState> {
        self.with(|t| t.state())
    }

    pub fn is_playing(&self) -> bool {
        self.state() == Some(PlayState::Playing)
    }

    /// Playing but parked at an unfired gate
    pub fn is_waiting(&self) -> bool {
        self.with(|t| t.is_waiting()).unwrap_or(false)
    }

    pub fn progress(&self) -> f32 {
        self.with(|t| t.progress()).unwrap_or(0.0)
    }

    pub fn time_ms(&self) -> f32 {
        self.with(|t| t.time_ms()).unwrap_or(0.0)
    }

    pub fn duration_ms(&self) -> f32 {
        self.with(|t| t.timeline().duration_ms()).unwrap_or(0.0)
    }

    /// Absolute start of a step
    pub fn start_of(&self, step: usize) -> Option<f32> {
        self.with(|t| t.timeline().start_of(step)).flatten()
    }

    /// A copy of the composed timeline
    pub fn timeline(&self) -> Option<Timeline> {
        self.with(|t| t.timeline().clone())
    }
}

/// Handle to a scroll gate attached through a [`Scope`]
#[derive(Clone)]
pub struct GateHandle {
    handle: SchedulerHandle,
    id: Option<GateId>,
}

impl GateHandle {
    pub fn id(&self) -> Option<GateId> {
        self.id
    }

    pub fn is_attached(&self) -> bool {
        self.id
            .is_some_and(|id| self.handle.with_gate(id, |_| ()).is_some())
    }

    /// Stop watching; a segment the gate still held never plays
    pub fn detach(&self) {
        if let Some(id) = self.id {
            self.handle.detach_gate(id);
        }
    }

    /// Evaluate against the current viewport immediately
    pub fn evaluate(&self, surface: &mut dyn RenderSurface) -> bool {
        self.id
            .is_some_and(|id| self.handle.evaluate_gate(id, surface))
    }

    pub fn activations(&self) -> u32 {
        self.id
            .and_then(|id| self.handle.with_gate(id, |g| g.activations()))
            .unwrap_or(0)
    }

    pub fn is_spent(&self) -> bool {
        self.id
            .and_then(|id| self.handle.with_gate(id, |g| g.is_spent()))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::AnimationScheduler;
    use crate::step::AnimationStep;
    use crate::timeline::TimelineComposer;
    use reveal_core::{Property, Role, SceneSurface, TargetGroup, Viewport, VisualState};

    fn fade_in(element: ElementId, role: Role) -> AnimationStep {
        AnimationStep::from_to(
            TargetGroup::single(element, role),
            VisualState::new().opacity(0.0),
            VisualState::new().opacity(1.0),
        )
        .duration(400.0)
    }

    #[test]
    fn test_close_stops_all_mutation() {
        let scheduler = AnimationScheduler::new(Viewport::new(1280.0, 800.0));
        let mut surface = SceneSurface::new();
        let heading = surface.append(Role::Heading, 100.0);
        surface.append(Role::Page, 900.0);
        let card = surface.append(Role::Card, 300.0);

        let mut scope = scheduler.handle().open_scope("page");
        let intro = scope.play(
            TimelineComposer::default().build(vec![fade_in(heading, Role::Heading)]),
            &mut surface,
        );
        let cards = scope.track(
            TimelineComposer::default().build(vec![fade_in(card, Role::Card)]),
            &mut surface,
        );
        let gate = scope.gate(&cards, 0, card, 0.9, GatePolicy::Once, &surface);
        assert!(gate.is_attached());

        scheduler.tick_with(100.0, &mut surface);
        scheduler.push_scroll(600.0);
        scope.close();

        let before = surface.mutation_count();
        for _ in 0..10 {
            scheduler.tick_with(100.0, &mut surface);
        }
        intro.play();
        intro.seek(300.0, &mut surface);
        assert!(!gate.evaluate(&mut surface));
        cards.restart(&mut surface);

        assert_eq!(surface.mutation_count(), before);
        assert!(!gate.is_attached());
        assert_eq!(gate.activations(), 0);
        assert!(!intro.is_alive());
        assert!(!scope.is_open());
        assert!(scope.targets().is_empty());
    }

    #[test]
    fn test_closing_parent_closes_child() {
        let scheduler = AnimationScheduler::default();
        let mut surface = SceneSurface::new();
        let item = surface.append(Role::Item, 40.0);

        let mut page = scheduler.handle().open_scope("navbar");
        let menu = page.open_child("menu");
        let open = menu.play(
            TimelineComposer::default().build(vec![fade_in(item, Role::Item)]),
            &mut surface,
        );
        assert!(menu.is_open());
        assert_eq!(scheduler.scope_count(), 2);

        page.close();
        assert!(!menu.is_open());
        assert!(!open.is_alive());
        assert_eq!(scheduler.scope_count(), 0);
        assert_eq!(scheduler.timeline_count(), 0);
    }

    #[test]
    fn test_drop_closes_scope() {
        let scheduler = AnimationScheduler::default();
        let mut surface = SceneSurface::new();
        let item = surface.append(Role::Item, 40.0);

        let handle = {
            let scope = scheduler.handle().open_scope("transient");
            scope.play(
                TimelineComposer::default().build(vec![fade_in(item, Role::Item)]),
                &mut surface,
            )
        };
        assert!(!handle.is_alive());
        assert_eq!(scheduler.scope_count(), 0);
    }

    #[test]
    fn test_use_after_close_is_noop() {
        let scheduler = AnimationScheduler::default();
        let mut surface = SceneSurface::new();
        let item = surface.append(Role::Item, 40.0);

        let mut scope = scheduler.handle().open_scope("page");
        scope.close();
        scope.close();

        let late = scope.play(
            TimelineComposer::default().build(vec![fade_in(item, Role::Item)]),
            &mut surface,
        );
        assert!(late.id().is_none());
        assert_eq!(late.state(), None);
        assert_eq!(surface.property(item, Property::Opacity), Some(1.0));
        assert_eq!(scheduler.timeline_count(), 0);
    }

    #[test]
    fn test_gate_releases_only_its_segment() {
        let scheduler = AnimationScheduler::new(Viewport::new(1280.0, 800.0));
        let mut surface = SceneSurface::new();
        let heading = surface.append(Role::Heading, 200.0);
        surface.append(Role::Page, 800.0);
        let card = surface.append(Role::Card, 300.0);

        let scope = scheduler.handle().open_scope("page");
        let timeline = scope.track(
            TimelineComposer::default()
                .build(vec![fade_in(heading, Role::Heading), fade_in(card, Role::Card)]),
            &mut surface,
        );
        let gate = scope.gate(&timeline, 1, card, 0.9, GatePolicy::Once, &surface);

        scheduler.tick_with(1000.0, &mut surface);
        assert_eq!(surface.property(heading, Property::Opacity), Some(1.0));
        assert_eq!(surface.property(card, Property::Opacity), Some(0.0));
        assert!(timeline.is_waiting());

        scheduler.push_scroll(400.0);
        scheduler.tick_with(400.0, &mut surface);
        assert_eq!(surface.property(card, Property::Opacity), Some(1.0));
        assert_eq!(gate.activations(), 1);
        assert!(gate.is_spent());
    }

    #[test]
    fn test_replay_restores_segment_start() {
        let scheduler = AnimationScheduler::new(Viewport::new(1280.0, 800.0));
        let mut surface = SceneSurface::new();
        surface.append(Role::Page, 1000.0);
        let card = surface.append(Role::Card, 300.0);

        let scope = scheduler.handle().open_scope("page");
        let timeline = scope.track(
            TimelineComposer::default().build(vec![fade_in(card, Role::Card)]),
            &mut surface,
        );
        let gate = scope.gate(&timeline, 0, card, 0.9, GatePolicy::Replay, &surface);

        scheduler.push_scroll(400.0);
        scheduler.tick_with(400.0, &mut surface);
        assert_eq!(surface.property(card, Property::Opacity), Some(1.0));

        scheduler.push_scroll(0.0);
        scheduler.push_scroll(400.0);
        scheduler.flush_events(&mut surface);
        assert_eq!(surface.property(card, Property::Opacity), Some(0.0));
        assert_eq!(gate.activations(), 2);

        scheduler.tick_with(400.0, &mut surface);
        assert_eq!(surface.property(card, Property::Opacity), Some(1.0));
    }
}
