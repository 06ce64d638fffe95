use crate::card::{Card, SlotIndex};
use crate::gesture::{DragOutcome, GestureConfig, GestureState};
use crate::input::{Action, Input, Response};
use crate::layout::{self, RadiusRule, RingTransform};
use crate::rotation::{Direction, Rotation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub ring: RadiusRule,
    pub gesture: GestureConfig,
}

/// State of one carousel instance. The card count is fixed for its lifetime;
/// hosts build a new instance when the deck size changes.
#[derive(Debug, Clone)]
pub struct Carousel {
    cards: Vec<Card>,
    rotation: Rotation,
    settings: Settings,
    radius: f64,
    gesture: GestureState,
}

impl Carousel {
    pub fn new(count: usize, settings: Settings, viewport_width: f64) -> Self {
        let mut carousel = Self {
            cards: Card::deck(count),
            rotation: Rotation::new(count),
            settings,
            radius: settings.ring.radius_for(viewport_width),
            gesture: GestureState::Idle,
        };
        carousel.arrange();
        carousel
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, slot: SlotIndex) -> Option<&Card> {
        self.cards.get(slot.get())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn theta(&self) -> f64 {
        self.rotation.theta()
    }

    pub fn current_index(&self) -> usize {
        self.rotation.current_index()
    }

    pub fn current_slot(&self) -> SlotIndex {
        SlotIndex::new(self.current_index())
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn ring_transform(&self) -> RingTransform {
        self.rotation.transform()
    }

    pub fn arrange(&mut self) {
        layout::arrange(&mut self.cards, self.radius);
    }

    pub fn step(&mut self, direction: Direction) -> Response {
        if self.rotation.step(direction) {
            Response::redraw()
        } else {
            Response::none()
        }
    }

    pub fn set_angle(&mut self, theta: f64) -> Response {
        if self.is_empty() {
            return Response::none();
        }
        self.rotation.set_angle(theta);
        Response::redraw()
    }

    pub fn snap_to_nearest(&mut self) -> Response {
        if self.rotation.snap_to_nearest() {
            Response::redraw()
        } else {
            Response::none()
        }
    }

    /// Flips `slot` if it is the card facing the viewer. Returns whether
    /// anything changed.
    pub fn toggle_flip(&mut self, slot: SlotIndex) -> bool {
        if slot.get() != self.current_index() {
            return false;
        }
        match self.cards.get_mut(slot.get()) {
            Some(card) => {
                card.toggle();
                true
            }
            None => false,
        }
    }

    pub fn flip_current(&mut self) -> bool {
        self.toggle_flip(self.current_slot())
    }

    /// Recomputes the radius for a new viewport width and lays the ring out
    /// again. θ, the front card and every flip survive.
    pub fn resize(&mut self, viewport_width: f64) -> Response {
        self.radius = self.settings.ring.radius_for(viewport_width);
        self.arrange();
        if !self.is_dragging() {
            self.rotation.settle();
        }
        Response::new(true, true)
    }

    /// Swaps in new settings (e.g. after a config reload) and relayouts.
    pub fn apply_settings(&mut self, settings: Settings, viewport_width: f64) -> Response {
        self.settings = settings;
        self.resize(viewport_width)
    }

    pub fn handle(&mut self, input: Input) -> Response {
        match input {
            Input::PointerDown(at) => {
                self.gesture.begin(at, self.theta());
                Response::none().captured()
            }
            Input::PointerMove(at) => match self.gesture.motion(at, &self.settings.gesture) {
                DragOutcome::Preview(theta) => self.set_angle(theta).captured(),
                _ => Response::none(),
            },
            Input::PointerUp(at) => match self.gesture.end(at, &self.settings.gesture) {
                DragOutcome::Commit {
                    base_theta,
                    direction,
                } => {
                    self.rotation.set_angle(base_theta);
                    self.step(direction)
                }
                DragOutcome::Snap { base_theta } => {
                    self.rotation.set_angle(base_theta);
                    self.snap_to_nearest()
                }
                DragOutcome::Preview(_) | DragOutcome::Ignored => Response::none(),
            },
            Input::Key(key) => match key.action(&self.settings.gesture) {
                Action::Step(direction) => self.step(direction),
                Action::FlipCurrent => Response::new(self.flip_current(), false),
                Action::None => Response::none(),
            },
            Input::CardClick(slot) => {
                if self.is_dragging() {
                    return Response::none();
                }
                Response::new(self.toggle_flip(slot), false)
            }
            Input::Navigate(direction) => self.step(direction),
            Input::Resize(width) => self.resize(width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::layout::Point;

    const WIDE: f64 = 1280.0;
    const NARROW: f64 = 600.0;

    fn carousel(count: usize) -> Carousel {
        Carousel::new(count, Settings::default(), WIDE)
    }

    fn swipe(carousel: &mut Carousel, from: f64, to: f64) -> Response {
        carousel.handle(Input::PointerDown(Point::new(from, 100.0)));
        carousel.handle(Input::PointerMove(Point::new((from + to) / 2.0, 100.0)));
        carousel.handle(Input::PointerUp(Point::new(to, 100.0)))
    }

    #[test]
    fn starts_arranged_on_wide_radius() {
        let c = carousel(6);
        assert_eq!(c.radius(), 400.0);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.theta(), 0.0);
        assert_eq!(c.cards()[3].transform.angle, 180.0);
    }

    #[test]
    fn swipe_left_matches_arrow_left() {
        let mut swiped = carousel(6);
        swipe(&mut swiped, 300.0, 250.0);

        let mut keyed = carousel(6);
        keyed.handle(Input::Key(Key::ArrowLeft));

        assert_eq!(swiped.theta(), -60.0);
        assert_eq!(swiped.theta(), keyed.theta());
        assert_eq!(swiped.current_index(), 1);
        assert_eq!(swiped.current_index(), keyed.current_index());
    }

    #[test]
    fn swipe_right_matches_arrow_right() {
        let mut swiped = carousel(6);
        swipe(&mut swiped, 250.0, 300.0);

        let mut keyed = carousel(6);
        keyed.handle(Input::Key(Key::ArrowRight));

        assert_eq!(swiped.theta(), 60.0);
        assert_eq!(swiped.theta(), keyed.theta());
        assert_eq!(swiped.current_index(), keyed.current_index());
    }

    #[test]
    fn drag_commit_boundary() {
        let mut c = carousel(6);
        swipe(&mut c, 100.0, 79.0);
        assert_eq!(c.current_index(), 1);

        let mut c = carousel(6);
        swipe(&mut c, 100.0, 80.0);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.theta(), 0.0);
    }

    #[test]
    fn short_drag_snaps_back_to_starting_card() {
        let mut c = carousel(6);
        c.step(Direction::Next);
        c.handle(Input::PointerDown(Point::new(200.0, 0.0)));
        c.handle(Input::PointerMove(Point::new(215.0, 0.0)));
        assert_eq!(c.theta(), -52.5);
        c.handle(Input::PointerUp(Point::new(212.0, 0.0)));
        assert_eq!(c.theta(), -60.0);
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn long_preview_does_not_compound_commit() {
        let mut c = carousel(6);
        c.handle(Input::PointerDown(Point::new(500.0, 0.0)));
        c.handle(Input::PointerMove(Point::new(200.0, 0.0)));
        assert_eq!(c.theta(), -150.0);
        c.handle(Input::PointerUp(Point::new(200.0, 0.0)));
        assert_eq!(c.theta(), -60.0);
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn stray_moves_are_ignored() {
        let mut c = carousel(6);
        let response = c.handle(Input::PointerMove(Point::new(900.0, 0.0)));
        assert_eq!(response, Response::none());
        assert_eq!(c.theta(), 0.0);
        assert_eq!(c.handle(Input::PointerUp(Point::new(0.0, 0.0))), Response::none());
    }

    #[test]
    fn drag_captures_default_handling() {
        let mut c = carousel(6);
        assert!(c.handle(Input::PointerDown(Point::new(0.0, 0.0))).capture);
        assert!(c.handle(Input::PointerMove(Point::new(5.0, 0.0))).capture);
        assert!(!c.handle(Input::PointerUp(Point::new(5.0, 0.0))).capture);
    }

    #[test]
    fn only_front_card_flips() {
        let mut c = carousel(6);
        assert!(!c.toggle_flip(SlotIndex::new(2)));
        assert!(!c.cards()[2].flipped);

        assert!(c.toggle_flip(SlotIndex::new(0)));
        assert!(c.cards()[0].flipped);
        assert!(c.toggle_flip(SlotIndex::new(0)));
        assert!(!c.cards()[0].flipped);
    }

    #[test]
    fn flip_is_per_card() {
        let mut c = carousel(4);
        c.toggle_flip(SlotIndex::new(0));
        c.step(Direction::Next);
        c.handle(Input::Key(Key::Enter));

        assert!(c.cards()[0].flipped);
        assert!(c.cards()[1].flipped);
        assert!(!c.cards()[2].flipped);
        assert_eq!(c.theta(), -90.0);

        c.handle(Input::Key(Key::Space));
        assert!(!c.cards()[1].flipped);
        assert!(c.cards()[0].flipped);
    }

    #[test]
    fn click_during_drag_is_ignored() {
        let mut c = carousel(6);
        c.handle(Input::PointerDown(Point::new(0.0, 0.0)));
        c.handle(Input::CardClick(SlotIndex::new(0)));
        assert!(!c.cards()[0].flipped);

        c.handle(Input::PointerUp(Point::new(0.0, 0.0)));
        c.handle(Input::CardClick(SlotIndex::new(0)));
        assert!(c.cards()[0].flipped);
    }

    #[test]
    fn resize_rearranges_but_keeps_state() {
        let mut c = carousel(6);
        c.step(Direction::Next);
        c.step(Direction::Next);
        c.flip_current();

        let response = c.handle(Input::Resize(NARROW));
        assert!(response.relayout);
        assert_eq!(c.radius(), 250.0);
        assert!(c.cards().iter().all(|card| card.transform.radius == 250.0));
        assert_eq!(c.cards()[4].transform.angle, 240.0);
        assert_eq!(c.current_index(), 2);
        assert!(c.cards()[2].flipped);
        assert_eq!(c.cards().iter().filter(|card| card.flipped).count(), 1);
    }

    #[test]
    fn flip_after_turning_backwards_targets_whole_slot_count() {
        let mut c = carousel(6);
        c.handle(Input::Key(Key::ArrowRight));
        assert_eq!(c.theta(), 60.0);
        assert_eq!(c.current_index(), 1);

        c.handle(Input::Key(Key::Enter));
        let flipped: Vec<usize> = c
            .cards()
            .iter()
            .filter(|card| card.flipped)
            .map(|card| card.slot.get())
            .collect();
        assert_eq!(flipped, vec![1]);
    }

    #[test]
    fn navigate_buttons_step() {
        let mut c = carousel(5);
        c.handle(Input::Navigate(Direction::Next));
        c.handle(Input::Navigate(Direction::Next));
        c.handle(Input::Navigate(Direction::Previous));
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn empty_carousel_degrades_to_noops() {
        let mut c = carousel(0);
        assert!(c.is_empty());
        for input in [
            Input::Navigate(Direction::Next),
            Input::Key(Key::ArrowLeft),
            Input::Key(Key::Enter),
            Input::CardClick(SlotIndex::new(0)),
        ] {
            assert!(!c.handle(input).redraw);
        }
        swipe(&mut c, 0.0, -100.0);
        assert_eq!(c.theta(), 0.0);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn inverted_convention_applies_everywhere() {
        let settings = Settings {
            gesture: GestureConfig {
                swipe_left: Direction::Previous,
                ..GestureConfig::default()
            },
            ..Settings::default()
        };
        let mut c = Carousel::new(6, settings, WIDE);
        swipe(&mut c, 300.0, 200.0);
        assert_eq!(c.theta(), 60.0);
        assert_eq!(c.current_index(), 1);
        c.handle(Input::Key(Key::ArrowRight));
        assert_eq!(c.current_index(), 0);
    }
}
