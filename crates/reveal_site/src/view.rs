//! Views and the stage they choreograph on
//!
//! A view mounts in two passes. [`View::render`] builds its elements and
//! registers the ones that animate; [`View::animate`] then snaps them to their
//! start states and declares timelines against the registered targets. Both
//! passes run inside one lifecycle scope, opened by [`mount`].

use reveal_animation::{
    AnimationStep, EntrancePreset, GateHandle, GatePolicy, SchedulerHandle, Scope, Timeline,
    TimelineComposer, TimelineDefaults, TimelineHandle,
};
use reveal_core::{apply_initial, ElementId, Role, SceneSurface, TargetGroup, TargetRegistry, VisualState};

/// A mountable part of the site
pub trait View {
    /// Short name used for the view's scope and in logs
    fn name(&self) -> &'static str;

    /// Build elements and register animatable targets
    fn render(&mut self, surface: &mut SceneSurface, targets: &mut TargetRegistry);

    /// Apply start states and declare this mount's timelines
    fn animate(&mut self, stage: &mut Stage<'_>);
}

impl<V: View + ?Sized> View for Box<V> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn render(&mut self, surface: &mut SceneSurface, targets: &mut TargetRegistry) {
        (**self).render(surface, targets)
    }

    fn animate(&mut self, stage: &mut Stage<'_>) {
        (**self).animate(stage)
    }
}

/// One timeline a view declared, and the gate holding it if any
#[derive(Clone)]
pub struct Reveal {
    pub label: &'static str,
    pub timeline: TimelineHandle,
    pub gate: Option<GateHandle>,
    /// Trigger threshold; `None` when the timeline played on mount
    pub threshold: Option<f32>,
    /// First step held by the gate
    pub from_step: usize,
}

impl Reveal {
    pub fn is_gated(&self) -> bool {
        self.gate.is_some()
    }
}

/// What a view declares its animations against
pub struct Stage<'a> {
    scope: &'a Scope,
    surface: &'a mut SceneSurface,
    defaults: TimelineDefaults,
    reveals: Vec<Reveal>,
}

impl<'a> Stage<'a> {
    pub fn new(scope: &'a Scope, surface: &'a mut SceneSurface, defaults: TimelineDefaults) -> Self {
        Self {
            scope,
            surface,
            defaults,
            reveals: Vec::new(),
        }
    }

    pub fn scope(&self) -> &Scope {
        self.scope
    }

    pub fn targets(&self) -> &TargetRegistry {
        self.scope.targets()
    }

    pub fn group(&self, role: Role) -> TargetGroup {
        self.scope.targets().group(role)
    }

    /// Registered targets among `elements`, in the order given
    pub fn select(&self, elements: &[ElementId]) -> TargetGroup {
        let targets = self.scope.targets();
        TargetGroup::new(
            elements
                .iter()
                .filter_map(|e| {
                    targets
                        .role_of(*e)
                        .map(|role| reveal_core::AnimatableTarget::new(*e, role))
                })
                .collect(),
        )
    }

    pub fn surface(&self) -> &SceneSurface {
        self.surface
    }

    /// Snap `group` to `state` before first paint
    pub fn set_initial(&mut self, group: &TargetGroup, state: &VisualState) -> usize {
        apply_initial(&mut *self.surface, group.members(), state)
    }

    /// Snap `group` to a preset's start state
    pub fn set_preset(&mut self, group: &TargetGroup, preset: EntrancePreset) -> usize {
        self.set_initial(group, &preset.initial())
    }

    pub fn compose(&self, steps: Vec<AnimationStep>) -> Timeline {
        TimelineComposer::new(self.scope.targets())
            .with_defaults(self.defaults)
            .build(steps)
    }

    /// Compose and play right away
    pub fn play(&mut self, label: &'static str, steps: Vec<AnimationStep>) -> TimelineHandle {
        self.reveal_from(label, steps, 0, None, 0.0)
    }

    /// Compose and hold the whole timeline until `trigger` crosses `threshold`
    pub fn play_when_visible(
        &mut self,
        label: &'static str,
        steps: Vec<AnimationStep>,
        trigger: Option<ElementId>,
        threshold: f32,
    ) -> TimelineHandle {
        self.reveal_from(label, steps, 0, trigger, threshold)
    }

    /// Compose, play the steps before `from_step`, and hold the rest until
    /// `trigger` crosses `threshold`
    ///
    /// A trigger that is already past the threshold at mount does not gate
    /// anything: the whole timeline plays. A missing trigger behaves the same.
    pub fn reveal_from(
        &mut self,
        label: &'static str,
        steps: Vec<AnimationStep>,
        from_step: usize,
        trigger: Option<ElementId>,
        threshold: f32,
    ) -> TimelineHandle {
        let timeline = self.compose(steps);
        let handle = self.scope.track(timeline, &mut *self.surface);

        let gate = match trigger {
            Some(trigger) if !self.scope.is_visible(trigger, threshold, &*self.surface) => {
                Some(self.scope.gate(
                    &handle,
                    from_step,
                    trigger,
                    threshold,
                    GatePolicy::Once,
                    &*self.surface,
                ))
            }
            _ => {
                handle.play();
                None
            }
        };
        tracing::debug!(
            "Stage: '{}' {} ({}ms)",
            label,
            if gate.is_some() { "gated" } else { "playing" },
            handle.duration_ms()
        );

        self.reveals.push(Reveal {
            label,
            timeline: handle.clone(),
            threshold: gate.as_ref().map(|_| threshold),
            gate,
            from_step,
        });
        handle
    }

    pub fn finish(self) -> Vec<Reveal> {
        self.reveals
    }
}

/// A view together with the scope that owns its animations
pub struct MountedView<V> {
    pub view: V,
    pub scope: Scope,
    pub reveals: Vec<Reveal>,
}

impl<V: View> MountedView<V> {
    pub fn name(&self) -> &'static str {
        self.view.name()
    }

    /// Close the scope; the view's elements stay on the surface
    pub fn unmount(mut self) {
        self.scope.close();
        tracing::debug!("Unmounted view '{}'", self.view.name());
    }
}

/// Mount a view: open its scope, render, register, and declare timelines
pub fn mount<V: View>(
    mut view: V,
    scheduler: &SchedulerHandle,
    surface: &mut SceneSurface,
    defaults: TimelineDefaults,
) -> MountedView<V> {
    let mut scope = scheduler.open_scope(view.name());
    scope.targets_mut().reset();
    view.render(surface, scope.targets_mut());

    let reveals = {
        let mut stage = Stage::new(&scope, surface, defaults);
        view.animate(&mut stage);
        stage.finish()
    };
    tracing::debug!(
        "Mounted view '{}' with {} targets and {} timelines",
        view.name(),
        scope.targets().len(),
        reveals.len()
    );

    MountedView {
        view,
        scope,
        reveals,
    }
}
