//! Navigation host
//!
//! Owns the scheduler and the render surface, and mounts a navbar, page body
//! and footer for the current route. Navigating closes every scope of the
//! previous page before anything of the next one is built.

use crate::form::ContactForm;
use crate::route::Route;
use crate::view::{mount, MountedView, Reveal, View};
use crate::views::{page_for, FooterView, MenuState, NavbarView};
use reveal_animation::{AnimationScheduler, TimelineDefaults};
use reveal_core::{SceneSurface, ScrollEvent, Viewport};

pub struct Site {
    scheduler: AnimationScheduler,
    surface: SceneSurface,
    defaults: TimelineDefaults,
    route: Option<Route>,
    navbar: Option<MountedView<NavbarView>>,
    page: Option<MountedView<Box<dyn View>>>,
    footer: Option<MountedView<FooterView>>,
    form: ContactForm,
}

impl Site {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            scheduler: AnimationScheduler::new(viewport),
            surface: SceneSurface::with_width(viewport.width),
            defaults: TimelineDefaults::default(),
            route: None,
            navbar: None,
            page: None,
            footer: None,
            form: ContactForm::new(),
        }
    }

    pub fn with_defaults(mut self, defaults: TimelineDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn route(&self) -> Option<Route> {
        self.route
    }

    pub fn surface(&self) -> &SceneSurface {
        &self.surface
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn viewport(&self) -> Viewport {
        self.scheduler.viewport()
    }

    pub fn navbar(&self) -> Option<&NavbarView> {
        self.navbar.as_ref().map(|m| &m.view)
    }

    pub fn footer(&self) -> Option<&FooterView> {
        self.footer.as_ref().map(|m| &m.view)
    }

    /// Timelines declared by the page body
    pub fn page_reveals(&self) -> &[Reveal] {
        self.page.as_ref().map_or(&[], |m| m.reveals.as_slice())
    }

    /// Every mounted view's name and timelines, top to bottom
    pub fn reveals(&self) -> Vec<(&'static str, &[Reveal])> {
        let mut out = Vec::new();
        if let Some(m) = &self.navbar {
            out.push((m.name(), m.reveals.as_slice()));
        }
        if let Some(m) = &self.page {
            out.push((m.name(), m.reveals.as_slice()));
        }
        if let Some(m) = &self.footer {
            out.push((m.name(), m.reveals.as_slice()));
        }
        out
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    /// Unmount the current page and mount `route` at the top of the document
    pub fn navigate(&mut self, route: Route) {
        self.unmount();

        let viewport = Viewport {
            scroll_y: 0.0,
            ..self.scheduler.viewport()
        };
        self.scheduler.set_viewport(viewport);

        let handle = self.scheduler.handle();
        self.navbar = Some(mount(
            NavbarView::new(route, viewport.height),
            &handle,
            &mut self.surface,
            self.defaults,
        ));
        self.page = Some(mount(
            page_for(route),
            &handle,
            &mut self.surface,
            self.defaults,
        ));
        self.footer = Some(mount(
            FooterView::new(),
            &handle,
            &mut self.surface,
            self.defaults,
        ));
        self.route = Some(route);

        tracing::info!(
            "Navigated to {} ({} timelines, {} gates)",
            route,
            self.scheduler.timeline_count(),
            self.scheduler.gate_count()
        );
    }

    /// Close every scope and clear the surface
    pub fn unmount(&mut self) {
        if let Some(footer) = self.footer.take() {
            footer.unmount();
        }
        if let Some(page) = self.page.take() {
            page.unmount();
        }
        if let Some(navbar) = self.navbar.take() {
            navbar.unmount();
        }
        self.surface.clear();
        self.route = None;
    }

    /// Queue a scroll to `scroll_y`; gates see it on the next frame
    pub fn scroll_to(&mut self, scroll_y: f32) {
        let max = (self.surface.document_height() - self.viewport().height).max(0.0);
        self.scheduler.push_scroll(scroll_y.clamp(0.0, max));
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.scheduler
            .push_event(ScrollEvent::Resize { width, height });
    }

    /// Advance one frame. Returns true while anything is still animating.
    pub fn frame(&mut self, dt_ms: f32) -> bool {
        let active = self.scheduler.tick_with(dt_ms, &mut self.surface);
        if let Some(navbar) = self.navbar.as_mut() {
            navbar.view.settle(&mut self.surface);
        }
        active
    }

    /// Run frames of `dt_ms` until nothing animates or `max_frames` is reached
    ///
    /// Returns the number of frames run.
    pub fn settle(&mut self, dt_ms: f32, max_frames: usize) -> usize {
        for frame in 0..max_frames {
            if !self.frame(dt_ms) {
                return frame + 1;
            }
        }
        max_frames
    }

    pub fn toggle_menu(&mut self) -> MenuState {
        match self.navbar.as_mut() {
            Some(navbar) => {
                navbar.view.toggle_menu(&navbar.scope, &mut self.surface);
                navbar.view.menu_state()
            }
            None => MenuState::Closed,
        }
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}
