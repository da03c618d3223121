//! Animation scheduler
//!
//! Owns every live timeline, scroll gate and lifecycle scope, and drives them
//! from the host's frame callback. Scroll and resize events are queued as
//! they arrive and drained at the start of the next tick, so a gate detached
//! in between never sees them.
//!
//! Components hold a [`SchedulerHandle`], a weak reference that turns every
//! operation into a no-op once the scheduler is gone.

use crate::gate::{GatePolicy, ScrollGate, Segment};
use crate::playback::{PlayState, TimelineRun};
use crate::scope::Scope;
use crate::timeline::Timeline;
use parking_lot::Mutex;
use reveal_core::{AnimationIssue, ElementId, RenderSurface, ScrollEvent, Viewport};
use slotmap::{new_key_type, SlotMap};
use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use std::time::Instant;

new_key_type! {
    /// Handle to a registered timeline
    pub struct TimelineId;
    /// Handle to an attached scroll gate
    pub struct GateId;
    /// Handle to an open lifecycle scope
    pub struct ScopeId;
}

/// Bookkeeping for one open scope
#[derive(Debug, Default)]
struct ScopeRecord {
    label: String,
    parent: Option<ScopeId>,
    children: Vec<ScopeId>,
    timelines: Vec<TimelineId>,
    gates: Vec<GateId>,
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    timelines: SlotMap<TimelineId, TimelineRun>,
    gates: SlotMap<GateId, ScrollGate>,
    scopes: SlotMap<ScopeId, ScopeRecord>,
    events: VecDeque<ScrollEvent>,
    viewport: Viewport,
    last_frame: Instant,
}

impl SchedulerInner {
    fn drain_events(&mut self, surface: &mut dyn RenderSurface) -> Vec<GateId> {
        let mut fired = Vec::new();
        while let Some(event) = self.events.pop_front() {
            self.viewport.apply(event);
            let viewport = self.viewport;
            let hits: Vec<GateId> = self
                .gates
                .iter_mut()
                .filter_map(|(id, gate)| gate.evaluate(&viewport, &*surface).then_some(id))
                .collect();
            for id in hits {
                self.activate(id, surface);
                fired.push(id);
            }
        }
        fired
    }

    /// Play the segment bound to a gate that just fired
    fn activate(&mut self, gate_id: GateId, surface: &mut dyn RenderSurface) {
        let Some(gate) = self.gates.get(gate_id) else {
            return;
        };
        let segment = gate.segment();
        let start = gate.segment_start_ms();
        let replay = gate.policy() == GatePolicy::Replay && gate.activations() > 1;

        let Some(run) = self.timelines.get_mut(segment.timeline) else {
            return;
        };
        if replay && run.time_ms() > start {
            run.rewind_to(start, surface);
        }
        run.release(gate_id);
        run.play();
    }

    fn advance_all(&mut self, dt_ms: f32, surface: &mut dyn RenderSurface) -> bool {
        let mut active = false;
        for (_, run) in self.timelines.iter_mut() {
            if run.advance(dt_ms, surface) && !run.is_waiting() {
                active = true;
            }
        }
        active
    }

    fn close_scope(&mut self, id: ScopeId) {
        let Some(record) = self.scopes.remove(id) else {
            return;
        };
        for child in &record.children {
            self.close_scope(*child);
        }
        for gate in &record.gates {
            self.gates.remove(*gate);
        }
        for timeline in &record.timelines {
            self.timelines.remove(*timeline);
        }
        if let Some(parent) = record.parent.and_then(|p| self.scopes.get_mut(p)) {
            parent.children.retain(|c| *c != id);
        }
        tracing::debug!(
            "Scope '{}' closed: cancelled {} timelines, detached {} gates",
            record.label,
            record.timelines.len(),
            record.gates.len()
        );
    }
}

/// The scheduler that ticks every active timeline and evaluates scroll gates
///
/// Typically owned by the navigation host; views receive a [`SchedulerHandle`].
///
/// ```rust
/// use reveal_animation::{AnimationScheduler, AnimationStep, TimelineComposer};
/// use reveal_core::{Property, RenderSurface, Role, SceneSurface, VisualState, Viewport};
///
/// let scheduler = AnimationScheduler::new(Viewport::new(1280.0, 800.0));
/// let mut surface = SceneSurface::new();
/// let heading = surface.append(Role::Heading, 80.0);
///
/// let mut scope = scheduler.handle().open_scope("page");
/// scope.targets_mut().register(Some(heading), Role::Heading);
/// let timeline = TimelineComposer::new(scope.targets()).build(vec![
///     AnimationStep::from(scope.targets().group(Role::Heading), VisualState::new().opacity(0.0))
///         .duration(800.0),
/// ]);
/// let handle = scope.play(timeline, &mut surface);
///
/// scheduler.tick_with(800.0, &mut surface);
/// assert_eq!(surface.property(heading, Property::Opacity), Some(1.0));
///
/// scope.close();
/// assert!(!handle.is_alive());
/// ```
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                timelines: SlotMap::with_key(),
                gates: SlotMap::with_key(),
                scopes: SlotMap::with_key(),
                events: VecDeque::new(),
                viewport,
                last_frame: Instant::now(),
            })),
        }
    }

    /// Get a handle to this scheduler for passing to views
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.inner.lock().viewport
    }

    /// Replace the viewport outright, discarding queued events
    ///
    /// Gates are not evaluated against the jump. Hosts use this on navigation,
    /// before mounting the next page.
    pub fn set_viewport(&self, viewport: Viewport) {
        let mut inner = self.inner.lock();
        inner.events.clear();
        inner.viewport = viewport;
    }

    /// Queue a scroll or resize event for the next tick
    pub fn push_event(&self, event: ScrollEvent) {
        self.inner.lock().events.push_back(event);
    }

    /// Queue a scroll to `scroll_y`
    pub fn push_scroll(&self, scroll_y: f32) {
        self.push_event(ScrollEvent::Scroll { scroll_y });
    }

    /// Drain queued events without advancing time
    ///
    /// Returns the gates that fired, in evaluation order.
    pub fn flush_events(&self, surface: &mut dyn RenderSurface) -> Vec<GateId> {
        self.inner.lock().drain_events(surface)
    }

    /// Tick using wall-clock time since the previous tick
    ///
    /// Returns true if any timeline is still animating.
    pub fn tick(&self, surface: &mut dyn RenderSurface) -> bool {
        let dt_ms = {
            let mut inner = self.inner.lock();
            let now = Instant::now();
            let dt = (now - inner.last_frame).as_secs_f32() * 1000.0;
            inner.last_frame = now;
            dt
        };
        self.tick_with(dt_ms, surface)
    }

    /// Tick with an explicit frame delta
    ///
    /// Queued events are drained first, then every playing timeline advances.
    pub fn tick_with(&self, dt_ms: f32, surface: &mut dyn RenderSurface) -> bool {
        let mut inner = self.inner.lock();
        inner.drain_events(surface);
        inner.advance_all(dt_ms, surface)
    }

    /// Whether any timeline is animating (gate-parked timelines don't count)
    pub fn has_active_animations(&self) -> bool {
        self.inner
            .lock()
            .timelines
            .iter()
            .any(|(_, t)| t.is_playing() && !t.is_waiting())
    }

    pub fn timeline_count(&self) -> usize {
        self.inner.lock().timelines.len()
    }

    pub fn gate_count(&self) -> usize {
        self.inner.lock().gates.len()
    }

    pub fn scope_count(&self) -> usize {
        self.inner.lock().scopes.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

/// A weak handle to the animation scheduler
///
/// It won't keep the scheduler alive; once the scheduler drops, every call
/// returns `None`/`false` or does nothing.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Open a top-level lifecycle scope
    pub fn open_scope(&self, label: impl Into<String>) -> Scope {
        let id = self.create_scope(label.into(), None);
        Scope::from_parts(self.clone(), id)
    }

    // =========================================================================
    // Scope Operations
    // =========================================================================

    pub(crate) fn create_scope(&self, label: String, parent: Option<ScopeId>) -> Option<ScopeId> {
        let inner = self.inner.upgrade()?;
        let mut guard = inner.lock();
        if let Some(parent) = parent {
            if !guard.scopes.contains_key(parent) {
                AnimationIssue::UseAfterClose.log();
                return None;
            }
        }
        tracing::debug!("Scope '{}' opened", label);
        let id = guard.scopes.insert(ScopeRecord {
            label,
            parent,
            ..ScopeRecord::default()
        });
        if let Some(parent) = parent.and_then(|p| guard.scopes.get_mut(p)) {
            parent.children.push(id);
        }
        Some(id)
    }

    pub fn is_scope_open(&self, id: ScopeId) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| inner.lock().scopes.contains_key(id))
    }

    /// Close a scope and everything it (and its children) tracked
    pub fn close_scope(&self, id: ScopeId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().close_scope(id);
        }
    }

    // =========================================================================
    // Timeline Operations
    // =========================================================================

    /// Register a timeline under a scope and prime it against the surface
    pub fn register_timeline(
        &self,
        scope: ScopeId,
        timeline: Timeline,
        surface: &mut dyn RenderSurface,
    ) -> Option<TimelineId> {
        let inner = self.inner.upgrade()?;
        let mut guard = inner.lock();
        if !guard.scopes.contains_key(scope) {
            AnimationIssue::UseAfterClose.log();
            return None;
        }
        let mut run = TimelineRun::new(timeline);
        run.prime(surface);
        let id = guard.timelines.insert(run);
        if let Some(record) = guard.scopes.get_mut(scope) {
            record.timelines.push(id);
        }
        Some(id)
    }

    /// Access a live timeline
    pub fn with_timeline<F, R>(&self, id: TimelineId, f: F) -> Option<R>
    where
        F: FnOnce(&mut TimelineRun) -> R,
    {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().timelines.get_mut(id).map(f))
    }

    pub fn timeline_state(&self, id: TimelineId) -> Option<PlayState> {
        self.with_timeline(id, |t| t.state())
    }

    pub fn is_timeline_alive(&self, id: TimelineId) -> bool {
        self.with_timeline(id, |_| ()).is_some()
    }

    // =========================================================================
    // Gate Operations
    // =========================================================================

    /// Attach a scroll gate holding `segment` until `trigger` crosses `threshold`
    pub fn attach_gate(
        &self,
        scope: ScopeId,
        segment: Segment,
        trigger: ElementId,
        threshold: f32,
        policy: GatePolicy,
        surface: &dyn RenderSurface,
    ) -> Option<GateId> {
        let inner = self.inner.upgrade()?;
        let mut guard = inner.lock();
        if !guard.scopes.contains_key(scope) {
            AnimationIssue::UseAfterClose.log();
            return None;
        }
        let timeline = guard.timelines.get(segment.timeline)?.timeline();
        let start = match timeline.anchor_of(segment.from_step) {
            Some(anchor) => anchor,
            None => {
                tracing::warn!(
                    "ScrollGate: step {} is past the end of a {}-step timeline; holding at its end",
                    segment.from_step,
                    timeline.step_count()
                );
                timeline.duration_ms()
            }
        };

        let gate = ScrollGate::new(
            trigger,
            threshold,
            policy,
            segment,
            start,
            &guard.viewport,
            surface,
        );
        if guard.gates.iter().any(|(_, g)| g.same_condition(&gate)) {
            AnimationIssue::DuplicateGateTrigger {
                trigger,
                threshold: gate.threshold(),
            }
            .log();
        }

        let id = guard.gates.insert(gate);
        if let Some(run) = guard.timelines.get_mut(segment.timeline) {
            run.hold(id, start);
            run.play();
        }
        if let Some(record) = guard.scopes.get_mut(scope) {
            record.gates.push(id);
        }
        Some(id)
    }

    /// Detach a gate
    ///
    /// A segment still held by the gate never plays: its timeline finishes
    /// at the hold instead of waiting there.
    pub fn detach_gate(&self, id: GateId) {
        if let Some(inner) = self.inner.upgrade() {
            let mut guard = inner.lock();
            let Some(gate) = guard.gates.remove(id) else {
                return;
            };
            if let Some(run) = guard.timelines.get_mut(gate.segment().timeline) {
                run.cut_at_hold(id);
            }
            for (_, record) in guard.scopes.iter_mut() {
                record.gates.retain(|g| *g != id);
            }
        }
    }

    /// Evaluate one gate against the current viewport, activating it if it fires
    pub fn evaluate_gate(&self, id: GateId, surface: &mut dyn RenderSurface) -> bool {
        let Some(inner) = self.inner.upgrade() else {
            return false;
        };
        let mut guard = inner.lock();
        let viewport = guard.viewport;
        let fired = guard
            .gates
            .get_mut(id)
            .is_some_and(|gate| gate.evaluate(&viewport, &*surface));
        if fired {
            guard.activate(id, surface);
        }
        fired
    }

    pub fn with_gate<F, R>(&self, id: GateId, f: F) -> Option<R>
    where
        F: FnOnce(&ScrollGate) -> R,
    {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().gates.get(id).map(f))
    }

    /// Whether `trigger` is already past `threshold` of the current viewport
    ///
    /// Hosts use this at mount to play above-the-fold segments directly
    /// instead of gating them.
    pub fn is_past_threshold(
        &self,
        trigger: ElementId,
        threshold: f32,
        surface: &dyn RenderSurface,
    ) -> bool {
        let Some(inner) = self.inner.upgrade() else {
            return false;
        };
        let viewport = inner.lock().viewport;
        surface
            .bounds(trigger)
            .is_some_and(|b| viewport.is_past(b.y, threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::AnimationStep;
    use crate::timeline::TimelineComposer;
    use reveal_core::{Property, Role, SceneSurface, VisualState};

    fn page() -> (SceneSurface, ElementId, ElementId) {
        let mut surface = SceneSurface::new();
        let hero = surface.append(Role::Heading, 1000.0);
        let card = surface.append(Role::Card, 300.0);
        (surface, hero, card)
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let scheduler = AnimationScheduler::default();
            scheduler.handle()
        };

        assert!(!handle.is_alive());
        let scope = handle.open_scope("orphan");
        assert!(!scope.is_open());
    }

    #[test]
    fn test_scheduler_counts() {
        let scheduler = AnimationScheduler::default();
        let (mut surface, _hero, card) = page();
        let mut scope = scheduler.handle().open_scope("page");
        scope.targets_mut().register(Some(card), Role::Card);

        let timeline = TimelineComposer::new(scope.targets()).build(vec![AnimationStep::to(
            scope.targets().group(Role::Card),
            VisualState::new().opacity(1.0),
        )]);
        let tl = scope.track(timeline, &mut surface);
        scope.gate(&tl, 0, card, 0.9, GatePolicy::Once, &surface);

        assert_eq!(scheduler.scope_count(), 1);
        assert_eq!(scheduler.timeline_count(), 1);
        assert_eq!(scheduler.gate_count(), 1);

        scope.close();
        assert_eq!(scheduler.scope_count(), 0);
        assert_eq!(scheduler.timeline_count(), 0);
        assert_eq!(scheduler.gate_count(), 0);
    }

    #[test]
    fn test_queued_scroll_activates_gate_on_tick() {
        let scheduler = AnimationScheduler::new(Viewport::new(1280.0, 800.0));
        let (mut surface, _hero, card) = page();
        let scope = scheduler.handle().open_scope("page");

        let timeline = TimelineComposer::default().build(vec![AnimationStep::from_to(
            reveal_core::TargetGroup::single(card, Role::Card),
            VisualState::new().opacity(0.0),
            VisualState::new().opacity(1.0),
        )
        .duration(100.0)]);
        let tl = scope.track(timeline, &mut surface);
        scope.gate(&tl, 0, card, 0.9, GatePolicy::Once, &surface);

        scheduler.tick_with(16.0, &mut surface);
        assert!(!scheduler.has_active_animations());
        assert_eq!(surface.property(card, Property::Opacity), Some(0.0));

        scheduler.push_scroll(400.0);
        scheduler.tick_with(16.0, &mut surface);
        assert!(scheduler.has_active_animations());

        scheduler.tick_with(100.0, &mut surface);
        assert_eq!(surface.property(card, Property::Opacity), Some(1.0));
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_detach_drops_queued_events() {
        let scheduler = AnimationScheduler::new(Viewport::new(1280.0, 800.0));
        let (mut surface, _hero, card) = page();
        let scope = scheduler.handle().open_scope("page");

        let timeline = TimelineComposer::default().build(vec![AnimationStep::from_to(
            reveal_core::TargetGroup::single(card, Role::Card),
            VisualState::new().opacity(0.0),
            VisualState::new().opacity(1.0),
        )]);
        let tl = scope.track(timeline, &mut surface);
        let gate = scope.gate(&tl, 0, card, 0.9, GatePolicy::Once, &surface);

        scheduler.push_scroll(400.0);
        gate.detach();
        let fired = scheduler.flush_events(&mut surface);

        assert!(fired.is_empty());
        assert_eq!(scheduler.gate_count(), 0);
    }

    #[test]
    fn test_detach_ends_parked_timeline() {
        let scheduler = AnimationScheduler::new(Viewport::new(1280.0, 800.0));
        let (mut surface, _hero, card) = page();
        let scope = scheduler.handle().open_scope("page");

        let timeline = TimelineComposer::default().build(vec![AnimationStep::from_to(
            reveal_core::TargetGroup::single(card, Role::Card),
            VisualState::new().opacity(0.0),
            VisualState::new().opacity(1.0),
        )]);
        let tl = scope.track(timeline, &mut surface);
        let gate = scope.gate(&tl, 0, card, 0.9, GatePolicy::Once, &surface);
        scheduler.tick_with(16.0, &mut surface);
        assert!(tl.is_waiting());

        gate.detach();
        assert_eq!(tl.state(), Some(PlayState::Finished));
        assert!(!scheduler.has_active_animations());

        let before = surface.mutation_count();
        scheduler.push_scroll(400.0);
        scheduler.tick_with(16.0, &mut surface);
        assert_eq!(surface.mutation_count(), before);
        assert_eq!(surface.property(card, Property::Opacity), Some(0.0));
    }

    #[test]
    fn test_gate_past_last_step_holds_at_end() {
        let scheduler = AnimationScheduler::new(Viewport::new(1280.0, 800.0));
        let (mut surface, _hero, card) = page();
        let scope = scheduler.handle().open_scope("page");

        let timeline = TimelineComposer::default().build(vec![AnimationStep::from_to(
            reveal_core::TargetGroup::single(card, Role::Card),
            VisualState::new().opacity(0.0),
            VisualState::new().opacity(1.0),
        )
        .duration(100.0)]);
        let tl = scope.track(timeline, &mut surface);
        scope.gate(&tl, 5, card, 0.9, GatePolicy::Once, &surface);

        scheduler.tick_with(100.0, &mut surface);
        assert_eq!(surface.property(card, Property::Opacity), Some(1.0));
        assert_eq!(tl.state(), Some(PlayState::Finished));
    }

    #[test]
    fn test_gated_delay_runs_after_release() {
        let scheduler = AnimationScheduler::new(Viewport::new(1280.0, 800.0));
        let (mut surface, _hero, card) = page();
        let scope = scheduler.handle().open_scope("page");

        let timeline = TimelineComposer::default().build(vec![AnimationStep::from_to(
            reveal_core::TargetGroup::single(card, Role::Card),
            VisualState::new().opacity(0.0),
            VisualState::new().opacity(1.0),
        )
        .duration(100.0)
        .delay(500.0)]);
        let tl = scope.track(timeline, &mut surface);
        scope.gate(&tl, 0, card, 0.9, GatePolicy::Once, &surface);

        // Time spent waiting for the gate does not count toward the delay
        for _ in 0..10 {
            scheduler.tick_with(100.0, &mut surface);
        }
        assert_eq!(tl.time_ms(), 0.0);

        scheduler.push_scroll(400.0);
        scheduler.tick_with(0.0, &mut surface);
        scheduler.tick_with(400.0, &mut surface);
        assert_eq!(surface.property(card, Property::Opacity), Some(0.0));

        scheduler.tick_with(200.0, &mut surface);
        assert_eq!(surface.property(card, Property::Opacity), Some(1.0));
    }

    #[test]
    fn test_past_threshold_query() {
        let scheduler = AnimationScheduler::new(Viewport::new(1280.0, 800.0));
        let (surface, hero, card) = page();
        let handle = scheduler.handle();

        assert!(handle.is_past_threshold(hero, 0.9, &surface));
        assert!(!handle.is_past_threshold(card, 0.9, &surface));
    }
}
