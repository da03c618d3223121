//! Landing page
//!
//! Profile panel slides in from the left, the portrait pops in before the
//! panel settles, the intro text slides in from the right, then the call to
//! action buttons and social icons ripple in.

use crate::content::{PROFILE, SOCIAL_LINKS};
use crate::view::{Stage, View};
use reveal_animation::{Easing, EntrancePreset};
use reveal_core::{ElementId, Role, SceneSurface, TargetRegistry};

const PANEL: EntrancePreset = EntrancePreset::SlideInLeft { distance: 200.0 };
const PORTRAIT: EntrancePreset = EntrancePreset::PopIn;
const INTRO: EntrancePreset = EntrancePreset::SlideInRight { distance: 200.0 };
const BUTTONS: EntrancePreset = EntrancePreset::FadeUp { distance: 10.0 };
const SOCIAL: EntrancePreset = EntrancePreset::FadeUp { distance: 20.0 };

#[derive(Default)]
pub struct AboutView {
    panel: Option<ElementId>,
    portrait: Option<ElementId>,
    intro: Option<ElementId>,
    buttons: Vec<ElementId>,
    socials: Vec<ElementId>,
}

impl AboutView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self) -> Option<ElementId> {
        self.panel
    }

    pub fn portrait(&self) -> Option<ElementId> {
        self.portrait
    }

    pub fn intro(&self) -> Option<ElementId> {
        self.intro
    }

    pub fn socials(&self) -> &[ElementId] {
        &self.socials
    }
}

impl View for AboutView {
    fn name(&self) -> &'static str {
        "about"
    }

    fn render(&mut self, surface: &mut SceneSurface, targets: &mut TargetRegistry) {
        let panel = surface.append(Role::Panel, 40.0);
        surface.set_label(panel, "profile card");
        self.portrait = surface.append_child(panel, Role::Image, 240.0);
        if let Some(name) = surface.append_child(panel, Role::Heading, 80.0) {
            surface.set_label(name, PROFILE.name);
        }
        if let Some(headline) = surface.append_child(panel, Role::Text, 40.0) {
            surface.set_label(headline, PROFILE.headline);
        }
        let icon_row = surface.append_child(panel, Role::Panel, 60.0);
        self.socials = icon_row
            .map(|row| {
                SOCIAL_LINKS
                    .iter()
                    .filter_map(|link| {
                        let icon = surface.append_child(row, Role::Icon, 0.0)?;
                        surface.set_label(icon, link.network);
                        Some(icon)
                    })
                    .collect()
            })
            .unwrap_or_default();
        self.panel = Some(panel);

        let intro = surface.append(Role::Text, 120.0);
        surface.set_label(intro, PROFILE.greeting);
        let actions = surface.append_child(intro, Role::Panel, 0.0);
        self.buttons = actions
            .map(|row| {
                ["RESUME", "PROJECTS"]
                    .into_iter()
                    .filter_map(|label| {
                        let button = surface.append_child(row, Role::Button, 40.0)?;
                        surface.set_label(button, label);
                        Some(button)
                    })
                    .collect()
            })
            .unwrap_or_default();
        for paragraph in [PROFILE.about, PROFILE.objective] {
            if let Some(p) = surface.append_child(intro, Role::Text, 60.0) {
                surface.set_label(p, paragraph);
            }
        }
        self.intro = Some(intro);

        targets.register(self.panel, Role::Panel);
        targets.register(self.portrait, Role::Image);
        targets.register(self.intro, Role::Text);
        targets.register_all(self.buttons.iter().copied(), Role::Button);
        targets.register_all(self.socials.iter().copied(), Role::Icon);
    }

    fn animate(&mut self, stage: &mut Stage<'_>) {
        let panel = stage.group(Role::Panel);
        let portrait = stage.group(Role::Image);
        let intro = stage.group(Role::Text);
        let buttons = stage.group(Role::Button);
        let socials = stage.group(Role::Icon);

        stage.set_preset(&panel, PANEL);
        stage.set_preset(&portrait, PORTRAIT);
        stage.set_preset(&intro, INTRO);
        stage.set_preset(&buttons, BUTTONS);
        stage.set_preset(&socials, SOCIAL);

        stage.play(
            "about",
            vec![
                PANEL.enter(panel).duration(1000.0).label("profile card"),
                PORTRAIT
                    .enter(portrait)
                    .duration(800.0)
                    .overlap(500.0)
                    .label("portrait"),
                INTRO.enter(intro).duration(1000.0).overlap(700.0).label("intro"),
                BUTTONS
                    .enter(buttons)
                    .duration(500.0)
                    .stagger(100.0)
                    .ease(Easing::PowerOut(2))
                    .overlap(500.0)
                    .label("buttons"),
                SOCIAL
                    .enter(socials)
                    .duration(800.0)
                    .stagger(200.0)
                    .ease(Easing::BackOut(1.7))
                    .overlap(400.0)
                    .label("social icons"),
            ],
        );
    }
}
