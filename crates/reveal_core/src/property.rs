//! Visual properties
//!
//! The engine only ever mutates these transform-like properties on a target.
//! A [`VisualState`] is a small ordered set of property/value pairs used for
//! start states, end states and initial-state snapshots.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// A visual property the engine can animate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Horizontal translation (px)
    X,
    /// Vertical translation (px)
    Y,
    /// Depth translation (px)
    Z,
    Opacity,
    /// Uniform scale
    Scale,
    ScaleX,
    ScaleY,
    /// 2D rotation (degrees)
    Rotation,
    /// Rotation around the X axis (degrees)
    RotationX,
    /// Rotation around the Y axis (degrees)
    RotationY,
}

impl Property {
    pub const ALL: [Property; 10] = [
        Property::X,
        Property::Y,
        Property::Z,
        Property::Opacity,
        Property::Scale,
        Property::ScaleX,
        Property::ScaleY,
        Property::Rotation,
        Property::RotationX,
        Property::RotationY,
    ];

    /// Value of this property on an element nothing has touched yet
    pub fn rest_value(&self) -> f32 {
        match self {
            Property::Opacity | Property::Scale | Property::ScaleX | Property::ScaleY => 1.0,
            _ => 0.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Property::X => "x",
            Property::Y => "y",
            Property::Z => "z",
            Property::Opacity => "opacity",
            Property::Scale => "scale",
            Property::ScaleX => "scale_x",
            Property::ScaleY => "scale_y",
            Property::Rotation => "rotation",
            Property::RotationX => "rotation_x",
            Property::RotationY => "rotation_y",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered set of property values
///
/// Setting a property that is already present replaces its value in place,
/// so insertion order is stable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    values: SmallVec<[(Property, f32); 4]>,
}

impl VisualState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property value (builder style)
    pub fn with(mut self, property: Property, value: f32) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: Property, value: f32) {
        if let Some(slot) = self.values.iter_mut().find(|(p, _)| *p == property) {
            slot.1 = value;
        } else {
            self.values.push((property, value));
        }
    }

    pub fn get(&self, property: Property) -> Option<f32> {
        self.values
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, property: Property) -> bool {
        self.get(property).is_some()
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.values.iter().map(|(p, _)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f32)> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge another state into this one; values in `other` win
    pub fn merge(&mut self, other: &VisualState) {
        for (property, value) in other.iter() {
            self.set(property, value);
        }
    }

    pub fn x(self, value: f32) -> Self {
        self.with(Property::X, value)
    }

    pub fn y(self, value: f32) -> Self {
        self.with(Property::Y, value)
    }

    pub fn z(self, value: f32) -> Self {
        self.with(Property::Z, value)
    }

    pub fn opacity(self, value: f32) -> Self {
        self.with(Property::Opacity, value)
    }

    pub fn scale(self, value: f32) -> Self {
        self.with(Property::Scale, value)
    }

    pub fn scale_x(self, value: f32) -> Self {
        self.with(Property::ScaleX, value)
    }

    pub fn rotation(self, value: f32) -> Self {
        self.with(Property::Rotation, value)
    }

    pub fn rotation_x(self, value: f32) -> Self {
        self.with(Property::RotationX, value)
    }

    /// The resting state (identity transform, fully opaque) for the same properties
    pub fn rest(&self) -> VisualState {
        let mut rest = VisualState::new();
        for property in self.properties() {
            rest.set(property, property.rest_value());
        }
        rest
    }
}

impl FromIterator<(Property, f32)> for VisualState {
    fn from_iter<I: IntoIterator<Item = (Property, f32)>>(iter: I) -> Self {
        let mut state = VisualState::new();
        for (property, value) in iter {
            state.set(property, value);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut state = VisualState::new().x(-200.0).opacity(0.0);
        state.set(Property::X, 10.0);

        let props: Vec<_> = state.properties().collect();
        assert_eq!(props, vec![Property::X, Property::Opacity]);
        assert_eq!(state.get(Property::X), Some(10.0));
    }

    #[test]
    fn test_rest_state() {
        let start = VisualState::new().scale(0.0).opacity(0.0).y(20.0);
        let rest = start.rest();

        assert_eq!(rest.get(Property::Scale), Some(1.0));
        assert_eq!(rest.get(Property::Opacity), Some(1.0));
        assert_eq!(rest.get(Property::Y), Some(0.0));
    }

    #[test]
    fn test_merge() {
        let mut base = VisualState::new().x(1.0).y(2.0);
        base.merge(&VisualState::new().y(5.0).opacity(0.5));

        assert_eq!(base.get(Property::Y), Some(5.0));
        assert_eq!(base.get(Property::Opacity), Some(0.5));
        assert_eq!(base.len(), 3);
    }
}
