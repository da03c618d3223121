//! Render surface boundary
//!
//! The engine never owns elements. It reads layout and property values from,
//! and writes property mutations to, a [`RenderSurface`] supplied by the host.
//! [`SceneSurface`] is an in-memory retained tree used by headless hosts and
//! tests: elements are stacked vertically in document order.

use crate::element::{Bounds, ElementId, Role};
use crate::property::{Property, VisualState};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

/// Outbound interface from the engine to the host's rendering layer
pub trait RenderSurface {
    /// Whether the handle still refers to a live element
    fn is_attached(&self, element: ElementId) -> bool;

    /// Current value of a property, or `None` if the element is gone
    fn property(&self, element: ElementId, property: Property) -> Option<f32>;

    /// Write a property value. Returns `false` if the element is gone.
    fn set_property(&mut self, element: ElementId, property: Property, value: f32) -> bool;

    /// Document-space layout bounds, or `None` if the element is gone
    fn bounds(&self, element: ElementId) -> Option<Bounds>;

    /// Snapshot the given properties of an element
    fn snapshot(&self, element: ElementId, properties: &[Property]) -> Option<VisualState> {
        if !self.is_attached(element) {
            return None;
        }
        Some(
            properties
                .iter()
                .filter_map(|p| self.property(element, *p).map(|v| (*p, v)))
                .collect(),
        )
    }
}

/// An element held by a [`SceneSurface`]
#[derive(Clone, Debug)]
pub struct SceneElement {
    pub role: Role,
    pub label: Option<String>,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    pub bounds: Bounds,
    properties: FxHashMap<Property, f32>,
}

impl SceneElement {
    fn new(role: Role, parent: Option<ElementId>, bounds: Bounds) -> Self {
        Self {
            role,
            label: None,
            parent,
            children: Vec::new(),
            bounds,
            properties: FxHashMap::default(),
        }
    }

    pub fn property(&self, property: Property) -> f32 {
        self.properties
            .get(&property)
            .copied()
            .unwrap_or_else(|| property.rest_value())
    }
}

/// In-memory render tree with a simple vertical stacking layout
pub struct SceneSurface {
    elements: SlotMap<ElementId, SceneElement>,
    roots: Vec<ElementId>,
    width: f32,
    /// Bottom of the lowest element, where the next root is placed
    cursor: f32,
    mutations: u64,
}

impl SceneSurface {
    pub fn new() -> Self {
        Self::with_width(1280.0)
    }

    pub fn with_width(width: f32) -> Self {
        Self {
            elements: SlotMap::with_key(),
            roots: Vec::new(),
            width,
            cursor: 0.0,
            mutations: 0,
        }
    }

    /// Append a top-level element below everything laid out so far
    pub fn append(&mut self, role: Role, height: f32) -> ElementId {
        let bounds = Bounds::new(0.0, self.cursor, self.width, height);
        let id = self.elements.insert(SceneElement::new(role, None, bounds));
        self.roots.push(id);
        self.cursor = self.cursor.max(bounds.bottom());
        id
    }

    /// Append a top-level element at a fixed position outside the document flow
    ///
    /// Used for fixed chrome such as the navigation bar.
    pub fn append_fixed(&mut self, role: Role, bounds: Bounds) -> ElementId {
        let id = self.elements.insert(SceneElement::new(role, None, bounds));
        self.roots.push(id);
        id
    }

    /// Append a child stacked below the parent's existing children
    ///
    /// The parent grows to contain it. Returns `None` if the parent is gone.
    pub fn append_child(&mut self, parent: ElementId, role: Role, height: f32) -> Option<ElementId> {
        let (parent_bounds, content_bottom) = {
            let p = self.elements.get(parent)?;
            let bottom = p
                .children
                .last()
                .and_then(|c| self.elements.get(*c))
                .map(|c| c.bounds.bottom())
                .unwrap_or(p.bounds.y);
            (p.bounds, bottom)
        };

        let bounds = Bounds::new(parent_bounds.x, content_bottom, parent_bounds.width, height);
        let id = self
            .elements
            .insert(SceneElement::new(role, Some(parent), bounds));

        let mut grow_from = Some(parent);
        while let Some(current) = grow_from {
            let Some(el) = self.elements.get_mut(current) else {
                break;
            };
            if current == parent {
                el.children.push(id);
            }
            if bounds.bottom() > el.bounds.bottom() {
                el.bounds.height = bounds.bottom() - el.bounds.y;
            }
            grow_from = el.parent;
        }
        self.cursor = self.cursor.max(bounds.bottom());
        Some(id)
    }

    /// Attach a descriptive label (used in schedule output)
    pub fn set_label(&mut self, element: ElementId, label: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(element) {
            el.label = Some(label.into());
        }
    }

    pub fn label(&self, element: ElementId) -> Option<&str> {
        self.elements.get(element).and_then(|e| e.label.as_deref())
    }

    /// Remove an element and its subtree
    pub fn remove(&mut self, element: ElementId) {
        let Some(el) = self.elements.remove(element) else {
            return;
        };
        if let Some(parent) = el.parent.and_then(|p| self.elements.get_mut(p)) {
            parent.children.retain(|c| *c != element);
        }
        self.roots.retain(|r| *r != element);
        for child in el.children {
            self.remove(child);
        }
    }

    /// Remove every element and reset the layout cursor
    pub fn clear(&mut self) {
        self.elements.clear();
        self.roots.clear();
        self.cursor = 0.0;
    }

    pub fn get(&self, element: ElementId) -> Option<&SceneElement> {
        self.elements.get(element)
    }

    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.elements
            .get(element)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Total document height
    pub fn document_height(&self) -> f32 {
        self.cursor
    }

    /// Number of property writes accepted since creation
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }
}

impl Default for SceneSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for SceneSurface {
    fn is_attached(&self, element: ElementId) -> bool {
        self.elements.contains_key(element)
    }

    fn property(&self, element: ElementId, property: Property) -> Option<f32> {
        self.elements.get(element).map(|e| e.property(property))
    }

    fn set_property(&mut self, element: ElementId, property: Property, value: f32) -> bool {
        match self.elements.get_mut(element) {
            Some(el) => {
                el.properties.insert(property, value);
                self.mutations += 1;
                true
            }
            None => false,
        }
    }

    fn bounds(&self, element: ElementId) -> Option<Bounds> {
        self.elements.get(element).map(|e| e.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_stacking() {
        let mut surface = SceneSurface::new();
        let a = surface.append(Role::Heading, 100.0);
        let b = surface.append(Role::Card, 300.0);

        assert_eq!(surface.bounds(a).map(|b| b.y), Some(0.0));
        assert_eq!(surface.bounds(b).map(|b| b.y), Some(100.0));
        assert_eq!(surface.document_height(), 400.0);
    }

    #[test]
    fn test_children_grow_parent() {
        let mut surface = SceneSurface::new();
        let section = surface.append(Role::Page, 0.0);
        let first = surface.append_child(section, Role::Card, 150.0).unwrap();
        let second = surface.append_child(section, Role::Card, 150.0).unwrap();

        assert_eq!(surface.bounds(first).unwrap().y, 0.0);
        assert_eq!(surface.bounds(second).unwrap().y, 150.0);
        assert_eq!(surface.bounds(section).unwrap().height, 300.0);
        assert_eq!(surface.children(section), &[first, second]);
    }

    #[test]
    fn test_removed_handle_is_inert() {
        let mut surface = SceneSurface::new();
        let section = surface.append(Role::Page, 0.0);
        let child = surface.append_child(section, Role::Card, 50.0).unwrap();

        surface.remove(section);
        assert!(!surface.is_attached(child));
        assert!(!surface.set_property(child, Property::Opacity, 0.0));
        assert_eq!(surface.mutation_count(), 0);

        // A new element in the reused slot does not resolve through the old handle
        let fresh = surface.append(Role::Card, 10.0);
        assert_ne!(fresh, child);
        assert_eq!(surface.property(child, Property::Opacity), None);
    }

    #[test]
    fn test_untouched_properties_rest() {
        let mut surface = SceneSurface::new();
        let el = surface.append(Role::Image, 10.0);

        assert_eq!(surface.property(el, Property::Scale), Some(1.0));
        assert_eq!(surface.property(el, Property::X), Some(0.0));
    }
}
