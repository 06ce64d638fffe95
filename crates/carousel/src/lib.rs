//! Core of a rotating 3D card ring: slot layout, rotation, flipping and
//! gesture interpretation. Nothing here touches a toolkit; hosts feed
//! [`Input`]s into a [`Carousel`] and repaint according to the returned
//! [`Response`].

pub mod card;
pub mod gesture;
pub mod input;
pub mod layout;
pub mod macros;
pub mod rotation;
pub mod widget;

pub use card::{Card, SlotIndex};
pub use gesture::{DragOutcome, GestureConfig, GestureState};
pub use input::{Action, Input, Key, Response};
pub use layout::{CardTransform, Point, Projection, RadiusRule, RingTransform};
pub use rotation::{Direction, Rotation};
pub use widget::{Carousel, Settings};

/// Degrees in a full turn of the ring.
pub const FULL_TURN: f64 = 360.0;
