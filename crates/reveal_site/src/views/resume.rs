//! Resume page
//!
//! The title drops in on mount. Everything below it reveals as it scrolls
//! into view: section headers rise, record cards slide in from alternating
//! sides, and the skills box rises before its items grow out from the left.

use crate::content::{skill_items, EDUCATION, EXPERIENCE};
use crate::view::{Stage, View};
use reveal_animation::EntrancePreset;
use reveal_core::{ElementId, Role, SceneSurface, TargetGroup, TargetRegistry};

const TITLE: EntrancePreset = EntrancePreset::FadeDown { distance: 50.0 };
const HEADER: EntrancePreset = EntrancePreset::FadeUp { distance: 30.0 };
const SKILLS_BOX: EntrancePreset = EntrancePreset::FadeUp { distance: 50.0 };
const SKILL: EntrancePreset = EntrancePreset::GrowX;

const HEADER_THRESHOLD: f32 = 0.85;
const CARD_THRESHOLD: f32 = 0.9;
const SKILLS_THRESHOLD: f32 = 0.8;
const SKILL_ITEMS_THRESHOLD: f32 = 0.6;

const CARD_HEIGHT: f32 = 350.0;

/// Even cards enter from the left, odd ones from the right
fn card_preset(index: usize) -> EntrancePreset {
    if index % 2 == 0 {
        EntrancePreset::SlideInLeft { distance: 200.0 }
    } else {
        EntrancePreset::SlideInRight { distance: 200.0 }
    }
}

#[derive(Default)]
pub struct ResumeView {
    title: Option<ElementId>,
    experience_header: Option<ElementId>,
    experience_header_items: Vec<ElementId>,
    experience: Vec<ElementId>,
    education_header: Option<ElementId>,
    education: Vec<ElementId>,
    skills: Option<ElementId>,
    skill_items: Vec<ElementId>,
}

impl ResumeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn experience_cards(&self) -> &[ElementId] {
        &self.experience
    }

    pub fn education_cards(&self) -> &[ElementId] {
        &self.education
    }

    pub fn skills_box(&self) -> Option<ElementId> {
        self.skills
    }

    pub fn skill_items(&self) -> &[ElementId] {
        &self.skill_items
    }

    fn reveal_cards(stage: &mut Stage<'_>, label: &'static str, cards: &[ElementId]) {
        for (i, card) in cards.iter().enumerate() {
            let preset = card_preset(i);
            let group = stage.select(&[*card]);
            stage.set_preset(&group, preset);
            stage.play_when_visible(
                label,
                vec![preset.enter(group).duration(1200.0)],
                Some(*card),
                CARD_THRESHOLD,
            );
        }
    }
}

impl View for ResumeView {
    fn name(&self) -> &'static str {
        "resume"
    }

    fn render(&mut self, surface: &mut SceneSurface, targets: &mut TargetRegistry) {
        let title = surface.append(Role::Heading, 360.0);
        surface.set_label(title, "Resume");
        self.title = Some(title);

        let header = surface.append(Role::Panel, 0.0);
        surface.set_label(header, "experience header");
        self.experience_header_items = [(Role::Heading, "Experience"), (Role::Button, "DOWNLOAD CV")]
            .into_iter()
            .filter_map(|(role, label)| {
                let item = surface.append_child(header, role, 60.0)?;
                surface.set_label(item, label);
                Some(item)
            })
            .collect();
        self.experience_header = Some(header);

        self.experience = EXPERIENCE
            .iter()
            .map(|record| {
                let card = surface.append(Role::Card, CARD_HEIGHT);
                surface.set_label(card, record.title);
                card
            })
            .collect();

        let education_header = surface.append(Role::Heading, 120.0);
        surface.set_label(education_header, "Education");
        self.education_header = Some(education_header);

        self.education = EDUCATION
            .iter()
            .map(|record| {
                let card = surface.append(Role::Card, CARD_HEIGHT);
                surface.set_label(card, record.institution);
                card
            })
            .collect();

        let skills = surface.append(Role::Panel, 80.0);
        surface.set_label(skills, "skills");
        self.skill_items = skill_items()
            .filter_map(|skill| {
                let item = surface.append_child(skills, Role::Item, 32.0)?;
                surface.set_label(item, skill);
                Some(item)
            })
            .collect();
        self.skills = Some(skills);

        targets.register(self.title, Role::Heading);
        for item in &self.experience_header_items {
            targets.register(Some(*item), Role::Text);
        }
        targets.register_all(self.experience.iter().copied(), Role::Card);
        targets.register(self.education_header, Role::Heading);
        targets.register_all(self.education.iter().copied(), Role::Card);
        targets.register(self.skills, Role::Panel);
        targets.register_all(self.skill_items.iter().copied(), Role::Item);
    }

    fn animate(&mut self, stage: &mut Stage<'_>) {
        let title = stage.select(self.title.as_slice());
        stage.set_preset(&title, TITLE);
        stage.play(
            "title",
            vec![TITLE.enter(title).duration(800.0).delay(300.0)],
        );

        let header_items = stage.select(&self.experience_header_items);
        stage.set_preset(&header_items, HEADER);
        stage.play_when_visible(
            "experience header",
            vec![HEADER.enter(header_items).duration(1000.0)],
            self.experience_header,
            HEADER_THRESHOLD,
        );
        Self::reveal_cards(stage, "experience card", &self.experience);

        let education_header = stage.select(self.education_header.as_slice());
        stage.set_preset(&education_header, HEADER);
        stage.play_when_visible(
            "education header",
            vec![HEADER.enter(education_header).duration(1000.0)],
            self.education_header,
            HEADER_THRESHOLD,
        );
        Self::reveal_cards(stage, "education card", &self.education);

        let skills = stage.group(Role::Panel);
        stage.set_preset(&skills, SKILLS_BOX);
        stage.play_when_visible(
            "skills box",
            vec![SKILLS_BOX.enter(skills).duration(1000.0)],
            self.skills,
            SKILLS_THRESHOLD,
        );

        let items: TargetGroup = stage.group(Role::Item);
        stage.set_preset(&items, SKILL);
        stage.play_when_visible(
            "skill items",
            vec![SKILL.enter(items).duration(800.0).stagger(80.0)],
            self.skills,
            SKILL_ITEMS_THRESHOLD,
        );
    }
}
