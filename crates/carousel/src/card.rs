use crate::layout::CardTransform;
use derive_more::{Deref, Display, From, Into};

/// Fixed position of a card in the ring, assigned once at arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Display, Deref, From, Into)]
pub struct SlotIndex(usize);

crate::impl_index_newtype!(SlotIndex);

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub slot: SlotIndex,
    pub flipped: bool,
    pub transform: CardTransform,
}

impl Card {
    pub fn new(slot: SlotIndex) -> Self {
        Self {
            slot,
            flipped: false,
            transform: CardTransform::default(),
        }
    }

    pub fn deck(count: usize) -> Vec<Self> {
        (0..count).map(|i| Self::new(SlotIndex::new(i))).collect()
    }

    /// Turns the card over. Callers go through `Carousel::toggle_flip`, which
    /// only lets the front card respond.
    pub fn toggle(&mut self) {
        self.flipped = !self.flipped;
    }
}
