use crate::card::SlotIndex;
use crate::gesture::GestureConfig;
use crate::layout::Point;
use crate::rotation::Direction;
use strum::EnumString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Enter,
    #[strum(serialize = " ", to_string = "Space")]
    Space,
    #[strum(disabled)]
    Other,
}

impl Key {
    /// Accepts DOM-style key names (`"ArrowLeft"`, `"Enter"`, `" "`), anything
    /// else becomes `Other`.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(Self::Other)
    }

    /// Arrow keys mirror swipes: left arrow does what a leftward swipe does.
    pub fn action(&self, gesture: &GestureConfig) -> Action {
        match self {
            Self::ArrowLeft => Action::Step(gesture.swipe_left),
            Self::ArrowRight => Action::Step(gesture.swipe_right()),
            Self::Enter | Self::Space => Action::FlipCurrent,
            Self::Other => Action::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Step(Direction),
    FlipCurrent,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    Key(Key),
    CardClick(SlotIndex),
    Navigate(Direction),
    Resize(f64),
}

/// What the host has to repaint after handling an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    pub redraw: bool,
    pub relayout: bool,
    /// The gesture wants the host to suppress its default handling
    /// (text selection, scrolling) while the drag lasts.
    pub capture: bool,
}

impl Response {
    pub fn new(redraw: bool, relayout: bool) -> Self {
        Self {
            redraw,
            relayout,
            capture: false,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn redraw() -> Self {
        Self::new(true, false)
    }

    pub fn captured(mut self) -> Self {
        self.capture = true;
        self
    }
}
