//! Timeline playback
//!
//! A [`TimelineRun`] is one playing instance of a composed [`Timeline`]. It
//! owns the playhead, the values captured from the surface, and any holds
//! placed by scroll gates. All property writes happen in [`TimelineRun::render`].

use crate::scheduler::GateId;
use crate::timeline::Timeline;
use reveal_core::{ElementId, Property, RenderSurface};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Playback state of a timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    /// Composed and primed, not started
    Idle,
    Playing,
    Paused,
    Finished,
}

#[derive(Clone, Copy, Debug, Default)]
struct TrackState {
    from: Option<f32>,
    to: Option<f32>,
    started: bool,
    done: bool,
}

/// A point the playhead may not pass until the owning gate releases it
#[derive(Clone, Copy, Debug)]
struct Hold {
    gate: GateId,
    at_ms: f32,
    released: bool,
}

/// A playing instance of a timeline
pub struct TimelineRun {
    timeline: Timeline,
    tracks: Vec<TrackState>,
    time_ms: f32,
    state: PlayState,
    primed: bool,
    holds: SmallVec<[Hold; 1]>,
    /// Set when a detached gate cut the run short
    cutoff_ms: Option<f32>,
}

impl TimelineRun {
    pub fn new(timeline: Timeline) -> Self {
        let tracks = timeline
            .tracks()
            .iter()
            .map(|t| TrackState {
                from: t.from,
                to: t.to,
                started: false,
                done: false,
            })
            .collect();
        Self {
            timeline,
            tracks,
            time_ms: 0.0,
            state: PlayState::Idle,
            primed: false,
            holds: SmallVec::new(),
            cutoff_ms: None,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn time_ms(&self) -> f32 {
        self.time_ms
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Playing but parked at a gate hold
    pub fn is_waiting(&self) -> bool {
        self.is_playing() && self.active_hold().is_some_and(|h| self.time_ms >= h)
    }

    /// Overall progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        let duration = self.timeline.duration_ms();
        if duration <= 0.0 {
            return if self.state == PlayState::Finished { 1.0 } else { 0.0 };
        }
        (self.time_ms / duration).clamp(0.0, 1.0)
    }

    /// Capture missing end values and render start states before first paint
    ///
    /// Steps declared with only a `from` state take the element's current
    /// values as their destination. Explicit `from` states are written
    /// immediately, once per (element, property), so the first paint already
    /// shows the start of the motion.
    pub fn prime(&mut self, surface: &mut dyn RenderSurface) {
        if self.primed {
            return;
        }
        self.primed = true;

        for (track, state) in self.timeline.tracks().iter().zip(self.tracks.iter_mut()) {
            if state.to.is_none() {
                state.to = surface.property(track.element, track.property);
            }
        }

        let mut seen: FxHashSet<(ElementId, Property)> = FxHashSet::default();
        for (track, state) in self.timeline.tracks().iter().zip(self.tracks.iter()) {
            if !seen.insert((track.element, track.property)) {
                continue;
            }
            if let Some(from) = state.from {
                surface.set_property(track.element, track.property, from);
            }
        }
    }

    pub fn play(&mut self) {
        match self.state {
            PlayState::Idle | PlayState::Paused => self.state = PlayState::Playing,
            PlayState::Playing | PlayState::Finished => {}
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlayState::Playing {
            self.state = PlayState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == PlayState::Paused {
            self.state = PlayState::Playing;
        }
    }

    /// Hold the playhead at `at_ms` until `gate` releases it
    pub fn hold(&mut self, gate: GateId, at_ms: f32) {
        self.holds.push(Hold {
            gate,
            at_ms: at_ms.max(0.0),
            released: false,
        });
    }

    /// Release a gate's hold. Returns the hold position if one existed.
    pub fn release(&mut self, gate: GateId) -> Option<f32> {
        let hold = self.holds.iter_mut().find(|h| h.gate == gate)?;
        hold.released = true;
        Some(hold.at_ms)
    }

    /// Re-arm a gate's hold (replayed segments park again after a rewind)
    pub fn rearm(&mut self, gate: GateId) {
        if let Some(hold) = self.holds.iter_mut().find(|h| h.gate == gate) {
            hold.released = false;
        }
    }

    /// Forget a gate entirely
    pub fn drop_hold(&mut self, gate: GateId) {
        self.holds.retain(|h| h.gate != gate);
    }

    /// Drop a gate's hold and end the run where it was held
    ///
    /// Steps before the hold finish normally; the held segment never plays.
    /// A hold the gate already released is just forgotten.
    pub fn cut_at_hold(&mut self, gate: GateId) {
        let Some(index) = self.holds.iter().position(|h| h.gate == gate) else {
            return;
        };
        let hold = self.holds.remove(index);
        if hold.released {
            return;
        }
        let cutoff = self.cutoff_ms.map_or(hold.at_ms, |c| c.min(hold.at_ms));
        self.cutoff_ms = Some(cutoff);
        if self.state == PlayState::Playing && self.time_ms >= cutoff {
            self.state = PlayState::Finished;
        }
    }

    /// Where playback ends: the timeline's duration unless a cutoff is set
    fn end_ms(&self) -> f32 {
        let duration = self.timeline.duration_ms();
        self.cutoff_ms.map_or(duration, |c| c.min(duration))
    }

    fn active_hold(&self) -> Option<f32> {
        self.holds
            .iter()
            .filter(|h| !h.released)
            .map(|h| h.at_ms)
            .reduce(f32::min)
    }

    /// Move the playhead forward and render
    ///
    /// Returns `true` while the timeline still has work to do.
    pub fn advance(&mut self, dt_ms: f32, surface: &mut dyn RenderSurface) -> bool {
        if self.state != PlayState::Playing {
            return false;
        }
        if !self.primed {
            self.prime(surface);
        }

        let duration = self.end_ms();
        let previous = self.time_ms;
        let mut next = self.time_ms + dt_ms.max(0.0);
        if let Some(hold) = self.active_hold() {
            if self.time_ms <= hold {
                next = next.min(hold);
            }
        }
        self.time_ms = next.min(duration);
        // A playhead parked at a hold has nothing new to paint
        if self.time_ms > previous || !self.is_waiting() {
            self.render(surface);
        }

        let held = self.active_hold().is_some_and(|h| h >= self.time_ms && h < duration);
        if self.time_ms >= duration && !held {
            self.state = PlayState::Finished;
            tracing::trace!("TimelineRun: finished at {}ms", self.time_ms);
            return false;
        }
        true
    }

    /// Write the value of every track that has started and not yet completed
    pub fn render(&mut self, surface: &mut dyn RenderSurface) {
        let time = self.time_ms;
        for (track, state) in self.timeline.tracks().iter().zip(self.tracks.iter_mut()) {
            if state.done || time < track.start_ms {
                continue;
            }
            if !state.started {
                state.started = true;
                if state.from.is_none() {
                    state.from = surface.property(track.element, track.property);
                }
            }
            let (Some(from), Some(to)) = (state.from, state.to) else {
                // Element detached before its values could be read
                state.done = true;
                continue;
            };

            let linear = if track.duration_ms <= 0.0 {
                1.0
            } else {
                ((time - track.start_ms) / track.duration_ms).clamp(0.0, 1.0)
            };
            let eased = track.easing.apply(linear);
            let value = from + (to - from) * eased;

            if !surface.set_property(track.element, track.property, value) {
                state.done = true;
                continue;
            }
            if linear >= 1.0 {
                state.done = true;
            }
        }
    }

    /// Move the playhead back to `time_ms`, restoring start values of every
    /// track at or after it
    pub fn rewind_to(&mut self, time_ms: f32, surface: &mut dyn RenderSurface) {
        let time_ms = time_ms.clamp(0.0, self.timeline.duration_ms());
        let mut seen: FxHashSet<(ElementId, Property)> = FxHashSet::default();
        for (track, state) in self.timeline.tracks().iter().zip(self.tracks.iter_mut()) {
            if track.start_ms < time_ms {
                continue;
            }
            state.done = false;
            state.started = false;
            if let Some(from) = state.from {
                if seen.insert((track.element, track.property)) {
                    surface.set_property(track.element, track.property, from);
                }
            }
            // Captured start values are re-read on the next activation
            if track.from.is_none() {
                state.from = None;
            }
        }
        self.time_ms = time_ms;
        if self.state == PlayState::Finished {
            self.state = PlayState::Paused;
        }
    }

    /// Jump to an absolute time and render it
    pub fn seek(&mut self, time_ms: f32, surface: &mut dyn RenderSurface) {
        if time_ms < self.time_ms {
            self.rewind_to(time_ms, surface);
        } else {
            self.time_ms = time_ms.min(self.timeline.duration_ms());
        }
        self.render(surface);
    }

    /// Rewind to zero and play
    pub fn restart(&mut self, surface: &mut dyn RenderSurface) {
        self.rewind_to(0.0, surface);
        self.state = PlayState::Playing;
    }
}
