//! Projects page
//!
//! Heading and intro text rise together on mount; each project card tilts up
//! out of the page as it scrolls into view.

use crate::content::PROJECTS;
use crate::view::{Stage, View};
use reveal_animation::EntrancePreset;
use reveal_core::{ElementId, Role, SceneSurface, TargetRegistry};

const HEADING: EntrancePreset = EntrancePreset::FadeUp { distance: 30.0 };
const CARD: EntrancePreset = EntrancePreset::TiltIn;

pub const CARD_HEIGHT: f32 = 420.0;
pub const CARD_THRESHOLD: f32 = 0.9;

#[derive(Default)]
pub struct ProjectsView {
    heading: Vec<ElementId>,
    cards: Vec<ElementId>,
}

impl ProjectsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[ElementId] {
        &self.cards
    }
}

impl View for ProjectsView {
    fn name(&self) -> &'static str {
        "projects"
    }

    fn render(&mut self, surface: &mut SceneSurface, targets: &mut TargetRegistry) {
        let title = surface.append(Role::Heading, 160.0);
        surface.set_label(title, "Projects");
        let info = surface.append(Role::Text, 80.0);
        surface.set_label(info, "A selection of things I have built");
        self.heading = vec![title, info];

        self.cards = PROJECTS
            .iter()
            .map(|project| {
                let card = surface.append(Role::Card, CARD_HEIGHT);
                surface.set_label(card, project.title);
                card
            })
            .collect();

        for element in &self.heading {
            targets.register(Some(*element), Role::Heading);
        }
        targets.register_all(self.cards.iter().copied(), Role::Card);
    }

    fn animate(&mut self, stage: &mut Stage<'_>) {
        let heading = stage.group(Role::Heading);
        stage.set_preset(&heading, HEADING);
        stage.play(
            "heading",
            vec![HEADING
                .enter(heading)
                .duration(1000.0)
                .stagger(100.0)
                .delay(300.0)],
        );

        for card in &self.cards {
            let group = stage.select(&[*card]);
            stage.set_preset(&group, CARD);
            stage.play_when_visible(
                "project card",
                vec![CARD.enter(group).duration(1200.0)],
                Some(*card),
                CARD_THRESHOLD,
            );
        }
    }
}
