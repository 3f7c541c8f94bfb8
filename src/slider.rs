use crate::catalog::Track;
use log::debug;

pub const ITEMS_PER_VIEW: usize = 6;
/// Columns between neighbouring cards
pub const GAP: usize = 2;

/// Page position over a track of cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    index: usize,
    items_per_view: usize,
    gap: usize,
}

impl Default for Slider {
    fn default() -> Self {
        Slider::new(ITEMS_PER_VIEW, GAP)
    }
}

impl Slider {
    pub fn new(items_per_view: usize, gap: usize) -> Self {
        Slider {
            index: 0,
            items_per_view,
            gap,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn items_per_view(&self) -> usize {
        self.items_per_view
    }

    pub fn gap(&self) -> usize {
        self.gap
    }

    /// Highest index for a track of `len` cards.
    pub fn max_index(&self, len: usize) -> usize {
        len.saturating_sub(self.items_per_view)
    }

    /// Moves one card forward if not already showing the last page.
    pub fn next(&mut self, track: &mut Track) {
        if self.index < self.max_index(track.cards.len()) {
            self.index += 1;
            self.update_position(track);
            debug!("slider advanced to {}", self.index);
        }
    }

    /// Moves one card back if not already at the start.
    pub fn prev(&mut self, track: &mut Track) {
        if self.index > 0 {
            self.index -= 1;
            self.update_position(track);
            debug!("slider moved back to {}", self.index);
        }
    }

    /// Returns to the first card.
    pub fn reset(&mut self, track: &mut Track) {
        self.index = 0;
        self.update_position(track);
    }

    /// Translates the track so the card at `index` is first in view.
    ///
    /// The card width is measured from the first card of the track.
    pub fn update_position(&self, track: &mut Track) {
        let step = track.first_card_width() + self.gap;
        track.translate_x = -((self.index * step) as i64);
    }
}
