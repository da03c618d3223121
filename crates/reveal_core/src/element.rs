//! Element handles and animatable targets

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use std::fmt;

new_key_type! {
    /// Handle to an element in the host's render tree
    ///
    /// Handles are versioned: once the element is removed, the handle no
    /// longer resolves, even if the slot is reused by a later element.
    pub struct ElementId;
}

/// Role tag describing what an animatable element is on the page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Page-level container (not usually animated itself)
    Page,
    /// Fixed navigation bar
    Navbar,
    /// Toggled mobile navigation overlay
    Menu,
    /// Section or page heading
    Heading,
    /// Paragraph or text block
    Text,
    /// Profile panel or similar large card
    Panel,
    /// Image
    Image,
    /// Content card (project box, resume entry)
    Card,
    /// Social or decorative icon
    Icon,
    /// Call-to-action button
    Button,
    /// Form field group
    Field,
    /// Form container
    Form,
    /// List item (skills)
    Item,
    /// Footer block
    Footer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Page => "page",
            Role::Navbar => "navbar",
            Role::Menu => "menu",
            Role::Heading => "heading",
            Role::Text => "text",
            Role::Panel => "panel",
            Role::Image => "image",
            Role::Card => "card",
            Role::Icon => "icon",
            Role::Button => "button",
            Role::Field => "field",
            Role::Form => "form",
            Role::Item => "item",
            Role::Footer => "footer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An element eligible for entrance animation
///
/// Identity is the element handle; the role is descriptive only.
#[derive(Clone, Copy, Debug)]
pub struct AnimatableTarget {
    pub element: ElementId,
    pub role: Role,
}

impl AnimatableTarget {
    pub fn new(element: ElementId, role: Role) -> Self {
        Self { element, role }
    }
}

impl PartialEq for AnimatableTarget {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

impl Eq for AnimatableTarget {}

/// Document-space layout bounds of an element
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// X position (document space)
    pub x: f32,
    /// Y position of the top edge (document space)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Y position of the bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}
