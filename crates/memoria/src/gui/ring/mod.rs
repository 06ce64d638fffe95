pub mod model;
pub mod view;

pub use model::{CardFace, CardGeometry, Deck};
pub use view::draw;

pub const REFERENCE_WIDTH: f64 = 1280.0; // viewport assumed until the first allocation
pub const REFERENCE_HEIGHT: f64 = 800.0;
pub const IMAGE_SIZE: i32 = 512;
pub const CORNER_RADIUS: f64 = 14.0;
pub const CARD_PADDING: f64 = 16.0;
pub const TITLE_SIZE: f64 = 20.0;
pub const BODY_SIZE: f64 = 14.0;
pub const LINE_SPACING: f64 = 1.4;
pub const OUTLINE_WIDTH: f64 = 3.0;
pub const AWAY_ALPHA: f64 = 0.35; // cards turned away from the viewer
pub const MIN_VISIBLE_WIDTH: f64 = 1.0; // edge-on cards are skipped
