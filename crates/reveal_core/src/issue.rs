//! Engine issue taxonomy
//!
//! None of these is ever fatal: the engine logs the issue, records it where
//! the host can inspect it, and carries on with a skipped or adjusted flourish.

use crate::element::ElementId;
use crate::property::Property;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationIssue {
    /// A step references an element that was never registered for this mount
    #[error("step {step} targets an element that is not registered: {element:?}")]
    TargetNotReady { step: usize, element: ElementId },

    /// A relative offset resolved before the timeline origin and was clamped to 0
    #[error("step {step} offset resolved to {resolved_ms}ms, clamped to 0")]
    InvalidOffset { step: usize, resolved_ms: f32 },

    /// Two gates share trigger, threshold and policy (allowed, evaluated independently)
    #[error("duplicate scroll gate on {trigger:?} at threshold {threshold}")]
    DuplicateGateTrigger { trigger: ElementId, threshold: f32 },

    /// An operation reached a timeline or gate whose scope already closed
    #[error("operation on a closed scope ignored")]
    UseAfterClose,

    /// Two tracks would animate the same property of the same element at once
    #[error("step {step} delayed by {delay_ms}ms: {property} of {element:?} is already animating")]
    PropertyConflict {
        step: usize,
        element: ElementId,
        property: Property,
        delay_ms: f32,
    },
}

impl AnimationIssue {
    /// Emit the issue through `tracing` at the level its kind warrants
    pub fn log(&self) {
        match self {
            AnimationIssue::DuplicateGateTrigger { .. } | AnimationIssue::UseAfterClose => {
                tracing::debug!("{}", self)
            }
            _ => tracing::warn!("{}", self),
        }
    }
}
