//! Easing curves
//!
//! Power curves follow the usual naming where `Power(1)` is quadratic, so
//! `PowerOut(3)` is a quartic ease-out.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    PowerIn(u8),
    PowerOut(u8),
    PowerInOut(u8),
    /// Ease-out that overshoots the target by `overshoot` before settling
    BackOut(f32),
}

impl Easing {
    /// The default entrance curve
    pub const ENTRANCE: Easing = Easing::PowerOut(3);

    /// Map linear progress (0..1) to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::PowerIn(n) => t.powi(i32::from(n) + 1),
            Easing::PowerOut(n) => 1.0 - (1.0 - t).powi(i32::from(n) + 1),
            Easing::PowerInOut(n) => {
                let exp = i32::from(n) + 1;
                if t < 0.5 {
                    (2.0 * t).powi(exp) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
                }
            }
            Easing::BackOut(s) => {
                let u = t - 1.0;
                u * u * ((s + 1.0) * u + s) + 1.0
            }
        }
    }

    /// Parse the `name.direction(param)` notation used in config files
    ///
    /// Accepts `linear`, `powerN.in|out|inOut` and `back.out(s)`.
    pub fn parse(name: &str) -> Option<Easing> {
        let name = name.trim();
        if name == "linear" || name == "none" {
            return Some(Easing::Linear);
        }
        let (family, direction) = name.split_once('.')?;
        if let Some(n) = family.strip_prefix("power") {
            let n: u8 = n.parse().ok()?;
            return match direction {
                "in" => Some(Easing::PowerIn(n)),
                "out" => Some(Easing::PowerOut(n)),
                "inOut" => Some(Easing::PowerInOut(n)),
                _ => None,
            };
        }
        if family == "back" {
            let overshoot = match direction.strip_prefix("out") {
                Some("") => 1.70158,
                Some(rest) => rest
                    .strip_prefix('(')
                    .and_then(|r| r.strip_suffix(')'))
                    .and_then(|r| r.parse().ok())?,
                None => return None,
            };
            return Some(Easing::BackOut(overshoot));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::PowerIn(2),
            Easing::PowerOut(3),
            Easing::PowerInOut(1),
            Easing::BackOut(1.7),
        ] {
            assert!((easing.apply(0.0) - 0.0).abs() < 0.001, "{:?}", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?}", easing);
        }
    }

    #[test]
    fn test_shapes() {
        assert!(Easing::PowerOut(3).apply(0.5) > 0.5);
        assert!(Easing::PowerIn(3).apply(0.5) < 0.5);
        assert!((Easing::PowerInOut(2).apply(0.5) - 0.5).abs() < 0.001);

        // Back-out overshoots before settling
        let peak = (1..100)
            .map(|i| Easing::BackOut(1.7).apply(i as f32 / 100.0))
            .fold(0.0f32, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Easing::parse("power3.out"), Some(Easing::PowerOut(3)));
        assert_eq!(Easing::parse("power2.in"), Some(Easing::PowerIn(2)));
        assert_eq!(Easing::parse("back.out(1.2)"), Some(Easing::BackOut(1.2)));
        assert_eq!(Easing::parse("linear"), Some(Easing::Linear));
        assert_eq!(Easing::parse("elastic.out"), None);
        assert_eq!(Easing::parse("power.out"), None);
    }
}
