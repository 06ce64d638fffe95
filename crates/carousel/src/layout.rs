use crate::FULL_TURN;
use crate::card::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NARROW_BREAKPOINT: f64 = 768.0;
pub const NARROW_RADIUS: f64 = 250.0;
pub const WIDE_RADIUS: f64 = 400.0;
pub const PERSPECTIVE: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Static placement of one card: rotate about the vertical axis by `angle`
/// degrees, then push outward along the rotated depth axis by `radius`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardTransform {
    pub angle: f64,
    pub radius: f64,
}

impl fmt::Display for CardTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rotateY({}deg) translateZ({}px)", self.angle, self.radius)
    }
}

/// Rotation applied to the whole ring.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RingTransform {
    pub theta: f64,
}

impl fmt::Display for RingTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rotateY({}deg)", self.theta)
    }
}

/// Angular distance between neighbouring slots, `None` for an empty ring.
pub fn slot_angle(count: usize) -> Option<f64> {
    (count > 0).then(|| FULL_TURN / count as f64)
}

/// Places every card on its slot. Overwrites previous transforms, so calling it
/// again after a radius change never accumulates.
pub fn arrange(cards: &mut [Card], radius: f64) {
    let Some(step) = slot_angle(cards.len()) else {
        return;
    };

    for (i, card) in cards.iter_mut().enumerate() {
        card.transform = CardTransform {
            angle: step * i as f64,
            radius,
        };
        log::trace!("slot {}: {}", card.slot, card.transform);
    }
}

/// Picks the ring radius from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RadiusRule {
    pub breakpoint: f64,
    pub narrow: f64,
    pub wide: f64,
}

impl Default for RadiusRule {
    fn default() -> Self {
        Self {
            breakpoint: NARROW_BREAKPOINT,
            narrow: NARROW_RADIUS,
            wide: WIDE_RADIUS,
        }
    }
}

impl RadiusRule {
    pub fn radius_for(&self, viewport_width: f64) -> f64 {
        if viewport_width <= self.breakpoint {
            self.narrow
        } else {
            self.wide
        }
    }
}

/// Where a card lands on screen once the ring is rotated by `theta`.
///
/// Depth is measured from the front slot, so the card facing the viewer sits
/// at `depth == 0` with `scale == 1` and every other card recedes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Horizontal offset from the ring centre, already perspective-scaled.
    pub offset_x: f64,
    pub depth: f64,
    pub scale: f64,
    /// Apparent width factor of the card face, `|cos|` of its world angle.
    pub foreshortening: f64,
    pub facing: bool,
}

impl Projection {
    pub fn of(transform: &CardTransform, ring: &RingTransform, perspective: f64) -> Self {
        let phi = (ring.theta + transform.angle).to_radians();
        let r = transform.radius;

        let x = r * phi.sin();
        let depth = r * phi.cos() - r;
        let scale = if perspective > 0.0 {
            perspective / (perspective - depth)
        } else {
            1.0
        };

        Self {
            offset_x: x * scale,
            depth,
            scale,
            foreshortening: phi.cos().abs(),
            facing: phi.cos() >= 0.0,
        }
    }
}
