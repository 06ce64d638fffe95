use crate::layout::Point;
use crate::rotation::Direction;
use serde::{Deserialize, Serialize};

pub const DRAG_SENSITIVITY: f64 = 0.5; // degrees per pixel
pub const SWIPE_THRESHOLD: f64 = 20.0; // pixels, exclusive

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GestureConfig {
    pub sensitivity: f64,
    pub threshold: f64,
    /// What a leftward swipe does. A rightward swipe does the opposite, and the
    /// arrow keys follow the same mapping.
    pub swipe_left: Direction,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            sensitivity: DRAG_SENSITIVITY,
            threshold: SWIPE_THRESHOLD,
            swipe_left: Direction::Next,
        }
    }
}

impl GestureConfig {
    pub fn swipe_right(&self) -> Direction {
        self.swipe_left.opposite()
    }

    /// Step committed by a finished drag, or `None` when the pointer did not
    /// travel past the threshold.
    pub fn commit_for(&self, delta_x: f64) -> Option<Direction> {
        if delta_x.abs() <= self.threshold {
            None
        } else if delta_x < 0.0 {
            Some(self.swipe_left)
        } else {
            Some(self.swipe_right())
        }
    }

    /// Angle shown while dragging. The ring follows the pointer in the same
    /// sense a committed leftward swipe would turn it.
    pub fn preview_angle(&self, base_theta: f64, delta_x: f64) -> f64 {
        base_theta - self.swipe_left.sign() * delta_x * self.sensitivity
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub start: Point,
    pub base_theta: f64,
}

impl DragSession {
    pub fn delta_x(&self, at: Point) -> f64 {
        at.x - self.start.x
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    Preview(f64),
    Commit { base_theta: f64, direction: Direction },
    Snap { base_theta: f64 },
    Ignored,
}

impl GestureState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn begin(&mut self, at: Point, theta: f64) {
        *self = Self::Dragging(DragSession {
            start: at,
            base_theta: theta,
        });
    }

    pub fn motion(&self, at: Point, config: &GestureConfig) -> DragOutcome {
        match self {
            Self::Idle => DragOutcome::Ignored,
            Self::Dragging(session) => {
                DragOutcome::Preview(config.preview_angle(session.base_theta, session.delta_x(at)))
            }
        }
    }

    pub fn end(&mut self, at: Point, config: &GestureConfig) -> DragOutcome {
        let Self::Dragging(session) = std::mem::take(self) else {
            return DragOutcome::Ignored;
        };

        match config.commit_for(session.delta_x(at)) {
            Some(direction) => DragOutcome::Commit {
                base_theta: session.base_theta,
                direction,
            },
            None => DragOutcome::Snap {
                base_theta: session.base_theta,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dragging_from(x: f64, theta: f64) -> GestureState {
        let mut state = GestureState::Idle;
        state.begin(Point::new(x, 10.0), theta);
        state
    }

    #[test]
    fn motion_while_idle_is_ignored() {
        let state = GestureState::Idle;
        assert_eq!(
            state.motion(Point::new(50.0, 0.0), &GestureConfig::default()),
            DragOutcome::Ignored
        );
    }

    #[test]
    fn preview_is_relative_to_drag_start() {
        let config = GestureConfig::default();
        let state = dragging_from(100.0, -60.0);

        assert_eq!(
            state.motion(Point::new(140.0, 0.0), &config),
            DragOutcome::Preview(-40.0)
        );
        // a later move is measured from the start again, not accumulated
        assert_eq!(
            state.motion(Point::new(60.0, 0.0), &config),
            DragOutcome::Preview(-80.0)
        );
    }

    #[test]
    fn threshold_is_exclusive() {
        let config = GestureConfig::default();

        let mut state = dragging_from(100.0, 0.0);
        assert_eq!(
            state.end(Point::new(79.0, 0.0), &config),
            DragOutcome::Commit {
                base_theta: 0.0,
                direction: Direction::Next
            }
        );

        let mut state = dragging_from(100.0, 0.0);
        assert_eq!(
            state.end(Point::new(80.0, 0.0), &config),
            DragOutcome::Snap { base_theta: 0.0 }
        );

        let mut state = dragging_from(100.0, 0.0);
        assert_eq!(
            state.end(Point::new(121.0, 0.0), &config),
            DragOutcome::Commit {
                base_theta: 0.0,
                direction: Direction::Previous
            }
        );

        let mut state = dragging_from(100.0, 0.0);
        assert_eq!(
            state.end(Point::new(120.0, 0.0), &config),
            DragOutcome::Snap { base_theta: 0.0 }
        );
    }

    #[test]
    fn end_returns_to_idle() {
        let config = GestureConfig::default();
        let mut state = dragging_from(0.0, 0.0);
        state.end(Point::new(0.0, 0.0), &config);
        assert!(!state.is_dragging());
        assert_eq!(
            state.end(Point::new(0.0, 0.0), &config),
            DragOutcome::Ignored
        );
    }

    #[test]
    fn swipe_left_defaults_to_next() {
        let config = GestureConfig::default();
        assert_eq!(config.swipe_left, Direction::Next);
        assert_eq!(config.swipe_right(), Direction::Previous);
        assert_eq!(config.commit_for(-30.0), Some(Direction::Next));
        assert_eq!(config.commit_for(30.0), Some(Direction::Previous));
        assert_eq!(config.commit_for(0.0), None);
    }

    #[test]
    fn inverted_convention_flips_preview_too() {
        let config = GestureConfig {
            swipe_left: Direction::Previous,
            ..GestureConfig::default()
        };
        assert_eq!(config.commit_for(-30.0), Some(Direction::Previous));
        assert_eq!(config.preview_angle(0.0, -40.0), 20.0);
    }

    #[test]
    fn config_deserializes() {
        let config: GestureConfig =
            serde_json::from_str(r#"{ "threshold": 35.0, "swipe_left": "previous" }"#).unwrap();
        assert_eq!(config.threshold, 35.0);
        assert_eq!(config.sensitivity, DRAG_SENSITIVITY);
        assert_eq!(config.swipe_left, Direction::Previous);
    }
}
