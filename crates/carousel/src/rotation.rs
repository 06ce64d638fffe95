use crate::layout::{RingTransform, slot_angle};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

/// Stepping to the next card turns the ring backwards. Dragging left pulls the
/// next card into view, and the ring follows the pointer, so "next" must
/// decrease θ.
pub const NEXT_SIGN: f64 = -1.0;
pub const PREVIOUS_SIGN: f64 = 1.0;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[strum(to_string = "next", serialize = "n", serialize = "forward")]
    Next,
    #[strum(to_string = "previous", serialize = "prev", serialize = "p", serialize = "back")]
    Previous,
}

impl Direction {
    pub fn sign(&self) -> f64 {
        match self {
            Self::Next => NEXT_SIGN,
            Self::Previous => PREVIOUS_SIGN,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::Next => Self::Previous,
            Self::Previous => Self::Next,
        }
    }
}

/// The single rotation angle of the ring and the front card derived from it.
///
/// θ is never wrapped: it keeps accumulating across interactions.
#[derive(Debug, Clone, PartialEq)]
pub struct Rotation {
    theta: f64,
    count: usize,
    current: usize,
}

impl Rotation {
    pub fn new(count: usize) -> Self {
        Self {
            theta: 0.0,
            count,
            current: 0,
        }
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn step_angle(&self) -> Option<f64> {
        slot_angle(self.count)
    }

    pub fn transform(&self) -> RingTransform {
        RingTransform { theta: self.theta }
    }

    /// Turns the ring by one slot. Returns `false` on an empty ring.
    pub fn step(&mut self, direction: Direction) -> bool {
        let Some(step) = self.step_angle() else {
            return false;
        };
        self.theta += direction.sign() * step;
        self.settle();
        log::debug!(
            "stepped {}: ring {} (card {})",
            direction,
            self.transform(),
            self.current
        );
        true
    }

    /// Assigns θ without settling the front card. Used for live drag previews,
    /// which are transient until a step or snap lands.
    pub fn set_angle(&mut self, theta: f64) {
        self.theta = theta;
    }

    /// Rounds θ to the closest slot boundary and settles the front card.
    pub fn snap_to_nearest(&mut self) -> bool {
        let Some(step) = self.step_angle() else {
            return false;
        };
        self.theta = (self.theta / step).round() * step;
        self.settle();
        true
    }

    /// Re-derives the front card from θ, e.g. after a relayout.
    pub fn settle(&mut self) {
        self.current = self.index_for(self.theta);
    }

    /// Front card for `theta`: the number of whole slots turned, ignoring
    /// the turn's sense, wrapped into `[0, count)`.
    pub fn index_for(&self, theta: f64) -> usize {
        let Some(step) = self.step_angle() else {
            return 0;
        };
        let slots = (theta.abs() / step).round() as usize;
        slots % self.count
    }
}
