//! Navigation bar
//!
//! Fixed to the top of the viewport; drops in on mount. The mobile menu is a
//! full-screen overlay that mounts and unmounts on toggle, each time under
//! its own child scope of the navbar's scope.

use crate::route::Route;
use crate::view::{Stage, View};
use reveal_animation::{EntrancePreset, Scope, TimelineComposer, TimelineHandle};
use reveal_core::{Bounds, ElementId, Role, SceneSurface, TargetGroup, TargetRegistry};

pub const NAVBAR_HEIGHT: f32 = 80.0;
const MENU_ITEM_HEIGHT: f32 = 64.0;

const ENTER: EntrancePreset = EntrancePreset::FadeDown { distance: 50.0 };
const MENU: EntrancePreset = EntrancePreset::FadeDown { distance: 20.0 };

/// Where the mobile menu is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
    /// Playing the exit motion; removed once it finishes
    Closing,
}

struct MenuOverlay {
    scope: Scope,
    element: ElementId,
    motion: TimelineHandle,
    closing: bool,
}

pub struct NavbarView {
    active: Route,
    viewport_height: f32,
    bar: Option<ElementId>,
    menu: Option<MenuOverlay>,
}

impl NavbarView {
    pub fn new(active: Route, viewport_height: f32) -> Self {
        Self {
            active,
            viewport_height,
            bar: None,
            menu: None,
        }
    }

    pub fn active(&self) -> Route {
        self.active
    }

    pub fn bar(&self) -> Option<ElementId> {
        self.bar
    }

    pub fn menu_state(&self) -> MenuState {
        match &self.menu {
            None => MenuState::Closed,
            Some(m) if m.closing => MenuState::Closing,
            Some(_) => MenuState::Open,
        }
    }

    pub fn menu_element(&self) -> Option<ElementId> {
        self.menu.as_ref().map(|m| m.element)
    }

    /// Open the menu if it is closed or closing, otherwise start closing it
    pub fn toggle_menu(&mut self, parent: &Scope, surface: &mut SceneSurface) {
        match self.menu_state() {
            MenuState::Open => self.close_menu(parent, surface),
            MenuState::Closed | MenuState::Closing => self.open_menu(parent, surface),
        }
    }

    pub fn open_menu(&mut self, parent: &Scope, surface: &mut SceneSurface) {
        if self.menu_state() == MenuState::Open {
            return;
        }
        self.discard_menu(surface);

        let mut scope = parent.open_child("mobile-menu");
        let element = surface.append_fixed(
            Role::Menu,
            Bounds::new(0.0, 0.0, surface.width(), self.viewport_height),
        );
        surface.set_label(element, "mobile menu");
        for route in Route::ALL {
            if let Some(item) = surface.append_child(element, Role::Item, MENU_ITEM_HEIGHT) {
                surface.set_label(item, route.title());
            }
        }

        scope.targets_mut().reset();
        scope.targets_mut().register(Some(element), Role::Menu);
        let timeline = TimelineComposer::new(scope.targets())
            .build(vec![MENU.reveal(scope.targets().group(Role::Menu)).duration(600.0)]);
        let motion = scope.play(timeline, surface);

        tracing::debug!("Navbar: mobile menu opened");
        self.menu = Some(MenuOverlay {
            scope,
            element,
            motion,
            closing: false,
        });
    }

    pub fn close_menu(&mut self, parent: &Scope, surface: &mut SceneSurface) {
        let Some(menu) = self.menu.as_mut() else {
            return;
        };
        if menu.closing {
            return;
        }
        // The opening motion freezes where it is; the exit starts from there
        menu.scope.close();
        let mut scope = parent.open_child("mobile-menu-exit");
        scope.targets_mut().register(Some(menu.element), Role::Menu);
        let timeline = TimelineComposer::new(scope.targets()).build(vec![MENU
            .exit(TargetGroup::single(menu.element, Role::Menu))
            .duration(500.0)]);
        menu.motion = scope.play(timeline, surface);
        menu.scope = scope;
        menu.closing = true;
        tracing::debug!("Navbar: mobile menu closing");
    }

    /// Unmount the menu once its exit motion has finished
    ///
    /// Returns `true` if the overlay was removed.
    pub fn settle(&mut self, surface: &mut SceneSurface) -> bool {
        let finished = self
            .menu
            .as_ref()
            .is_some_and(|m| m.closing && !m.motion.is_playing());
        if finished {
            self.discard_menu(surface);
        }
        finished
    }

    fn discard_menu(&mut self, surface: &mut SceneSurface) {
        if let Some(mut menu) = self.menu.take() {
            menu.scope.close();
            surface.remove(menu.element);
        }
    }
}

impl View for NavbarView {
    fn name(&self) -> &'static str {
        "navbar"
    }

    fn render(&mut self, surface: &mut SceneSurface, targets: &mut TargetRegistry) {
        self.menu = None;
        let bar = surface.append_fixed(
            Role::Navbar,
            Bounds::new(0.0, 0.0, surface.width(), NAVBAR_HEIGHT),
        );
        surface.set_label(bar, format!("navbar ({})", self.active.title()));
        self.bar = Some(bar);
        targets.register(self.bar, Role::Navbar);
    }

    fn animate(&mut self, stage: &mut Stage<'_>) {
        let bar = stage.group(Role::Navbar);
        stage.play(
            "navbar",
            vec![ENTER.reveal(bar).duration(1000.0).label("navbar drop-in")],
        );
    }
}
