//! Contact page
//!
//! The title drops in on mount. The form zooms up out of a slight tilt once it
//! scrolls into view, with its field groups popping in before it settles; the
//! send button follows on a deeper threshold after a pause.

use crate::view::{Stage, View};
use reveal_animation::{AnimationStep, Easing, EntrancePreset};
use reveal_core::{ElementId, Role, SceneSurface, TargetRegistry, VisualState};

const TITLE: EntrancePreset = EntrancePreset::FadeDown { distance: 50.0 };
const FORM: EntrancePreset = EntrancePreset::ZoomTilt;
const FIELD: EntrancePreset = EntrancePreset::ScaleIn { from: 0.5 };

pub const FORM_THRESHOLD: f32 = 0.9;
pub const BUTTON_THRESHOLD: f32 = 0.7;
pub const BUTTON_DELAY_MS: f32 = 2000.0;

/// Field groups in display order; the two name fields share a row
pub const FIELD_GROUPS: [&str; 4] = ["name", "email", "subject", "message"];

#[derive(Default)]
pub struct ContactView {
    title: Option<ElementId>,
    form: Option<ElementId>,
    fields: Vec<ElementId>,
    send: Option<ElementId>,
}

impl ContactView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> Option<ElementId> {
        self.form
    }

    pub fn fields(&self) -> &[ElementId] {
        &self.fields
    }

    pub fn send_button(&self) -> Option<ElementId> {
        self.send
    }
}

impl View for ContactView {
    fn name(&self) -> &'static str {
        "contact"
    }

    fn render(&mut self, surface: &mut SceneSurface, targets: &mut TargetRegistry) {
        let title = surface.append(Role::Heading, 760.0);
        surface.set_label(title, "Contact");
        self.title = Some(title);

        let form = surface.append(Role::Form, 70.0);
        surface.set_label(form, "contact form");
        self.fields = FIELD_GROUPS
            .iter()
            .filter_map(|name| {
                let height = if *name == "message" { 160.0 } else { 80.0 };
                let field = surface.append_child(form, Role::Field, height)?;
                surface.set_label(field, *name);
                Some(field)
            })
            .collect();
        self.send = surface.append_child(form, Role::Button, 50.0);
        if let Some(send) = self.send {
            surface.set_label(send, "Send");
        }
        self.form = Some(form);

        targets.register(self.title, Role::Heading);
        targets.register(self.form, Role::Form);
        targets.register_all(self.fields.iter().copied(), Role::Field);
        targets.register(self.send, Role::Button);
    }

    fn animate(&mut self, stage: &mut Stage<'_>) {
        let title = stage.group(Role::Heading);
        stage.set_preset(&title, TITLE);
        stage.play(
            "title",
            vec![TITLE.enter(title).duration(800.0).delay(300.0)],
        );

        let form = stage.group(Role::Form);
        let fields = stage.group(Role::Field);
        stage.set_preset(&form, FORM);
        stage.set_preset(&fields, FIELD);
        stage.play_when_visible(
            "form",
            vec![
                FORM.enter(form).duration(1200.0).label("form"),
                FIELD
                    .enter(fields)
                    .duration(700.0)
                    .stagger(100.0)
                    .ease(Easing::BackOut(1.2))
                    .overlap(500.0)
                    .label("fields"),
            ],
            self.form,
            FORM_THRESHOLD,
        );

        let send = stage.group(Role::Button);
        stage.play_when_visible(
            "send button",
            vec![AnimationStep::from(send, VisualState::new().y(20.0).opacity(0.0))
                .duration(500.0)
                .ease(Easing::PowerOut(2))
                .delay(BUTTON_DELAY_MS)],
            self.form,
            BUTTON_THRESHOLD,
        );
    }
}
