use super::{IMAGE_SIZE, MIN_VISIBLE_WIDTH, REFERENCE_HEIGHT, REFERENCE_WIDTH};
use crate::config::{CardConfig, CardText, CardTitle, Config, ViewConfig};
use anyhow::Context;
use carousel::{Card, Carousel, Input, Point, Projection, Response, RingTransform, SlotIndex};
use gdk_pixbuf::Pixbuf;
use std::path::Path;

#[derive(Clone)]
pub struct CardFace {
    pub title: CardTitle,
    pub front: CardText,
    pub back: CardText,
    pub image: Option<Pixbuf>,
}

impl CardFace {
    pub fn from_config(cfg: &CardConfig) -> Self {
        let image = cfg
            .image
            .as_deref()
            .and_then(|path| match Self::load_image(path) {
                Ok(pixbuf) => Some(pixbuf),
                Err(e) => {
                    log::warn!("{:#}", e);
                    None
                }
            });

        Self {
            title: cfg.title.clone(),
            front: cfg.front.clone(),
            back: cfg.back.clone(),
            image,
        }
    }

    fn load_image(path: &Path) -> anyhow::Result<Pixbuf> {
        Pixbuf::from_file_at_scale(path, IMAGE_SIZE, IMAGE_SIZE, true)
            .with_context(|| format!("Failed to load card image {}", path.display()))
    }
}

/// Screen-space box of one card for the current ring angle.
#[derive(Debug, Clone, PartialEq)]
pub struct CardGeometry {
    pub slot: SlotIndex,
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub facing: bool,
}

impl CardGeometry {
    pub fn calculate(card: &Card, ring: &RingTransform, center: Point, view: &ViewConfig) -> Self {
        let projection = Projection::of(&card.transform, ring, view.perspective);

        Self {
            slot: card.slot,
            center: Point::new(center.x + projection.offset_x, center.y),
            width: view.card_width * projection.scale * projection.foreshortening,
            height: view.card_height * projection.scale,
            depth: projection.depth,
            facing: projection.facing,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.width >= MIN_VISIBLE_WIDTH
    }

    pub fn contains(&self, point: Point) -> bool {
        (point.x - self.center.x).abs() <= self.width / 2.0
            && (point.y - self.center.y).abs() <= self.height / 2.0
    }
}

/// Card content paired with the carousel that positions it.
pub struct Deck {
    pub faces: Vec<CardFace>,
    pub carousel: Carousel,
    pub view: ViewConfig,
    viewport: (f64, f64),
}

impl Deck {
    pub fn new(config: &Config) -> Self {
        let faces: Vec<CardFace> = config.cards.iter().map(CardFace::from_config).collect();
        let carousel = Carousel::new(faces.len(), config.settings(), REFERENCE_WIDTH);

        Self {
            faces,
            carousel,
            view: config.view,
            viewport: (REFERENCE_WIDTH, REFERENCE_HEIGHT),
        }
    }

    /// Picks up edited content. A deck of the same size keeps its rotation and
    /// flips; a resized deck starts over with a fresh carousel.
    pub fn reload(&mut self, config: &Config) {
        let faces: Vec<CardFace> = config.cards.iter().map(CardFace::from_config).collect();
        let width = self.viewport.0;

        if faces.len() == self.carousel.len() {
            self.carousel.apply_settings(config.settings(), width);
        } else {
            log::info!(
                "Deck size changed from {} to {} cards, rebuilding ring",
                self.carousel.len(),
                faces.len()
            );
            self.carousel = Carousel::new(faces.len(), config.settings(), width);
        }

        self.faces = faces;
        self.view = config.view;
    }

    pub fn center(&self) -> Point {
        Point::new(self.viewport.0 / 2.0, self.viewport.1 / 2.0)
    }

    pub fn face(&self, slot: SlotIndex) -> Option<&CardFace> {
        self.faces.get(slot.get())
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) -> Response {
        self.viewport = (width, height);
        self.carousel.handle(Input::Resize(width))
    }

    pub fn handle(&mut self, input: Input) -> Response {
        self.carousel.handle(input)
    }

    /// Flips the card under `point`, if it is the front card.
    pub fn click(&mut self, point: Point) -> Response {
        match self.card_at(point) {
            Some(slot) => self.carousel.handle(Input::CardClick(slot)),
            None => Response::none(),
        }
    }

    /// Geometry of every card, ordered back to front for painting.
    pub fn geometries(&self) -> Vec<CardGeometry> {
        let ring = self.carousel.ring_transform();
        let center = self.center();

        let mut geometries: Vec<CardGeometry> = self
            .carousel
            .cards()
            .iter()
            .map(|card| CardGeometry::calculate(card, &ring, center, &self.view))
            .collect();
        geometries.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        geometries
    }

    /// Front-most card under `point`.
    pub fn card_at(&self, point: Point) -> Option<SlotIndex> {
        self.geometries()
            .into_iter()
            .rev()
            .filter(CardGeometry::is_visible)
            .find(|g| g.contains(point))
            .map(|g| g.slot)
    }

    pub fn status(&self) -> String {
        if self.carousel.is_empty() {
            "No cards".to_string()
        } else {
            format!("{} / {}", self.carousel.current_index() + 1, self.carousel.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use carousel::Direction;

    fn deck() -> Deck {
        let mut deck = Deck::new(&config::builtin().unwrap());
        deck.set_viewport(1280.0, 800.0);
        deck
    }

    #[test]
    fn front_card_is_painted_last() {
        let deck = deck();
        let geometries = deck.geometries();
        assert_eq!(geometries.len(), 6);
        assert_eq!(geometries.last().map(|g| g.slot), Some(SlotIndex::new(0)));
        assert_eq!(geometries.first().map(|g| g.slot), Some(SlotIndex::new(3)));
        assert!(geometries.windows(2).all(|w| w[0].depth <= w[1].depth));
    }

    #[test]
    fn click_hits_front_most_card() {
        let mut deck = deck();
        let center = deck.center();
        assert_eq!(deck.card_at(center), Some(SlotIndex::new(0)));

        let response = deck.click(center);
        assert!(response.redraw);
        assert!(deck.carousel.cards()[0].flipped);
    }

    #[test]
    fn click_outside_cards_does_nothing() {
        let mut deck = deck();
        assert_eq!(deck.card_at(Point::new(5.0, 5.0)), None);
        assert_eq!(deck.click(Point::new(5.0, 5.0)), Response::none());
    }

    #[test]
    fn side_card_click_is_noop() {
        let mut deck = deck();
        let side = deck
            .geometries()
            .into_iter()
            .find(|g| g.slot == SlotIndex::new(1))
            .map(|g| g.center)
            .unwrap();

        assert_eq!(deck.card_at(side), Some(SlotIndex::new(1)));
        deck.click(side);
        assert!(deck.carousel.cards().iter().all(|c| !c.flipped));
    }

    #[test]
    fn stepping_brings_next_card_to_centre() {
        let mut deck = deck();
        deck.handle(Input::Navigate(Direction::Next));
        assert_eq!(deck.card_at(deck.center()), Some(SlotIndex::new(1)));
        assert_eq!(deck.status(), "2 / 6");
    }

    #[test]
    fn narrow_viewport_shrinks_ring() {
        let mut deck = deck();
        deck.handle(Input::Navigate(Direction::Previous));
        let response = deck.set_viewport(700.0, 900.0);
        assert!(response.relayout);
        assert_eq!(deck.carousel.radius(), 250.0);
        assert_eq!(deck.carousel.current_index(), 1);
        assert_eq!(deck.center(), Point::new(350.0, 450.0));
    }

    #[test]
    fn reload_same_size_keeps_rotation() {
        let mut deck = deck();
        deck.handle(Input::Navigate(Direction::Next));
        deck.carousel.flip_current();

        let mut config = config::builtin().unwrap();
        config.cards[1].title = CardTitle::new("Renamed");
        deck.reload(&config);

        assert_eq!(deck.carousel.current_index(), 1);
        assert!(deck.carousel.cards()[1].flipped);
        assert_eq!(deck.faces[1].title, CardTitle::new("Renamed"));
    }

    #[test]
    fn reload_new_size_rebuilds_ring() {
        let mut deck = deck();
        deck.handle(Input::Navigate(Direction::Next));

        let mut config = config::builtin().unwrap();
        config.cards.truncate(3);
        deck.reload(&config);

        assert_eq!(deck.carousel.len(), 3);
        assert_eq!(deck.carousel.theta(), 0.0);
        assert_eq!(deck.carousel.cards()[2].transform.angle, 240.0);
    }

    #[test]
    fn empty_deck() {
        let deck = Deck::new(&Config::default());
        assert_eq!(deck.status(), "No cards");
        assert_eq!(deck.card_at(deck.center()), None);
    }
}
