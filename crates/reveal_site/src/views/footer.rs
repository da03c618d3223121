//! Site footer
//!
//! The footer rises as a whole while its text blocks and icons ripple in, all
//! starting together on mount.

use crate::content::{FOOTER_BLOCKS, SOCIAL_LINKS};
use crate::view::{Stage, View};
use reveal_animation::{AnimationStep, Easing, Offset};
use reveal_core::{ElementId, Role, SceneSurface, TargetRegistry, VisualState};

#[derive(Default)]
pub struct FooterView {
    footer: Option<ElementId>,
    blocks: Vec<ElementId>,
    icons: Vec<ElementId>,
}

impl FooterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn footer(&self) -> Option<ElementId> {
        self.footer
    }
}

impl View for FooterView {
    fn name(&self) -> &'static str {
        "footer"
    }

    fn render(&mut self, surface: &mut SceneSurface, targets: &mut TargetRegistry) {
        let footer = surface.append(Role::Footer, 40.0);
        self.blocks = FOOTER_BLOCKS
            .iter()
            .filter_map(|block| {
                let text = surface.append_child(footer, Role::Text, 120.0)?;
                surface.set_label(text, *block);
                Some(text)
            })
            .collect();
        let icon_row = surface.append_child(footer, Role::Panel, 48.0);
        self.icons = icon_row
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
        self.footer = Some(footer);

        targets.register(self.footer, Role::Footer);
        targets.register_all(self.blocks.iter().copied(), Role::Text);
        targets.register_all(self.icons.iter().copied(), Role::Icon);
    }

    fn animate(&mut self, stage: &mut Stage<'_>) {
        let footer = stage.group(Role::Footer);
        let blocks = stage.group(Role::Text);
        let icons = stage.group(Role::Icon);

        stage.play(
            "footer",
            vec![
                AnimationStep::from(footer, VisualState::new().y(50.0).opacity(0.0))
                    .duration(1200.0),
                AnimationStep::from(blocks, VisualState::new().y(30.0).opacity(0.0))
                    .duration(1000.0)
                    .stagger(200.0)
                    .offset(Offset::with_previous(0.0)),
                AnimationStep::from(icons, VisualState::new().scale(0.5).opacity(0.0))
                    .duration(800.0)
                    .stagger(200.0)
                    .ease(Easing::BackOut(1.7))
                    .offset(Offset::at(0.0)),
            ],
        );
    }
}
