//! Target registry
//!
//! A per-mount arena of animatable targets. The host resets it at the start of
//! every mount (including re-mounts after navigation) and registers elements
//! as they render. Registration is idempotent and order-preserving: the first
//! time a handle is seen fixes its position, which later drives stagger order.
//!
//! ```rust
//! use reveal_core::{Role, SceneSurface, TargetRegistry};
//!
//! let mut surface = SceneSurface::new();
//! let a = surface.append(Role::Icon, 10.0);
//! let b = surface.append(Role::Icon, 10.0);
//!
//! let mut targets = TargetRegistry::new();
//! targets.reset();
//! targets.register(Some(a), Role::Icon);
//! targets.register(None, Role::Icon); // not rendered yet
//! targets.register(Some(b), Role::Icon);
//! targets.register(Some(a), Role::Icon); // duplicate
//!
//! assert_eq!(targets.group(Role::Icon).elements(), vec![a, b]);
//! ```

use crate::element::{AnimatableTarget, ElementId, Role};
use indexmap::IndexMap;

/// Ordered, de-duplicated collection of the targets registered for one mount
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: IndexMap<ElementId, Role>,
    generation: u64,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard every held handle
    ///
    /// Must run before each registration pass so handles from a previous
    /// mount never reach a new timeline.
    pub fn reset(&mut self) {
        if !self.targets.is_empty() {
            tracing::trace!(
                "TargetRegistry: discarding {} targets from generation {}",
                self.targets.len(),
                self.generation
            );
        }
        self.targets.clear();
        self.generation += 1;
    }

    /// Register an element; absent elements are ignored, duplicates are no-ops
    pub fn register(&mut self, element: Option<ElementId>, role: Role) {
        let Some(element) = element else {
            return;
        };
        self.targets.entry(element).or_insert(role);
    }

    pub fn register_target(&mut self, target: Option<AnimatableTarget>) {
        if let Some(target) = target {
            self.register(Some(target.element), target.role);
        }
    }

    /// Register several elements in order
    pub fn register_all<I>(&mut self, elements: I, role: Role)
    where
        I: IntoIterator<Item = ElementId>,
    {
        for element in elements {
            self.register(Some(element), role);
        }
    }

    /// Every registered target in first-seen order
    pub fn all(&self) -> Vec<AnimatableTarget> {
        self.targets
            .iter()
            .map(|(element, role)| AnimatableTarget::new(*element, *role))
            .collect()
    }

    /// Registered targets sharing a role, in first-seen order
    pub fn group(&self, role: Role) -> TargetGroup {
        TargetGroup::new(
            self.targets
                .iter()
                .filter(|(_, r)| **r == role)
                .map(|(element, role)| AnimatableTarget::new(*element, *role))
                .collect(),
        )
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.targets.contains_key(&element)
    }

    pub fn role_of(&self, element: ElementId) -> Option<Role> {
        self.targets.get(&element).copied()
    }

    /// Index of an element in first-seen order
    pub fn position(&self, element: ElementId) -> Option<usize> {
        self.targets.get_index_of(&element)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of times the registry has been reset
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Ordered targets sharing one animation treatment
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetGroup {
    members: Vec<AnimatableTarget>,
}

impl TargetGroup {
    pub fn new(members: Vec<AnimatableTarget>) -> Self {
        Self { members }
    }

    pub fn single(element: ElementId, role: Role) -> Self {
        Self::new(vec![AnimatableTarget::new(element, role)])
    }

    pub fn members(&self) -> &[AnimatableTarget] {
        &self.members
    }

    pub fn elements(&self) -> Vec<ElementId> {
        self.members.iter().map(|t| t.element).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Concatenate two groups, keeping the first occurrence of each handle
    pub fn chain(mut self, other: TargetGroup) -> Self {
        for target in other.members {
            if !self.members.contains(&target) {
                self.members.push(target);
            }
        }
        self
    }
}

impl From<AnimatableTarget> for TargetGroup {
    fn from(target: AnimatableTarget) -> Self {
        Self::new(vec![target])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SceneSurface;

    fn elements(n: usize) -> (SceneSurface, Vec<ElementId>) {
        let mut surface = SceneSurface::new();
        let ids = (0..n).map(|_| surface.append(Role::Card, 10.0)).collect();
        (surface, ids)
    }

    #[test]
    fn test_first_seen_order_without_duplicates() {
        let (_surface, ids) = elements(3);
        let mut registry = TargetRegistry::new();

        registry.reset();
        registry.register(Some(ids[2]), Role::Card);
        registry.register(Some(ids[0]), Role::Card);
        registry.register(None, Role::Card);
        registry.register(Some(ids[2]), Role::Card);
        registry.register(Some(ids[1]), Role::Card);
        registry.register(Some(ids[0]), Role::Card);

        let order: Vec<_> = registry.all().iter().map(|t| t.element).collect();
        assert_eq!(order, vec![ids[2], ids[0], ids[1]]);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (_surface, ids) = elements(2);
        let mut registry = TargetRegistry::new();
        registry.register_all(ids.iter().copied(), Role::Card);

        registry.reset();
        assert!(registry.all().is_empty());
        registry.reset();
        assert!(registry.all().is_empty());
        assert_eq!(registry.generation(), 2);
    }

    #[test]
    fn test_duplicate_keeps_first_role() {
        let (_surface, ids) = elements(1);
        let mut registry = TargetRegistry::new();

        registry.register(Some(ids[0]), Role::Icon);
        registry.register(Some(ids[0]), Role::Card);

        assert_eq!(registry.role_of(ids[0]), Some(Role::Icon));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_groups_by_role() {
        let mut surface = SceneSurface::new();
        let heading = surface.append(Role::Heading, 10.0);
        let a = surface.append(Role::Icon, 10.0);
        let b = surface.append(Role::Icon, 10.0);

        let mut registry = TargetRegistry::new();
        registry.register(Some(a), Role::Icon);
        registry.register(Some(heading), Role::Heading);
        registry.register(Some(b), Role::Icon);

        assert_eq!(registry.group(Role::Icon).elements(), vec![a, b]);
        assert_eq!(registry.group(Role::Heading).len(), 1);
        assert!(registry.group(Role::Field).is_empty());
    }
}
