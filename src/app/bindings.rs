use ratatui::layout::{Position, Rect};

/// Something the user can click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    SearchInput,
    ThemeButton,
    /// A result card, outside its watchlist button.
    Card(usize),
    CardAdd(usize),
    WatchlistRemove(usize),
    ClearWatchlist,
    ModalClose,
    ModalAdd,
    ModalBody,
    /// Anywhere outside the modal while it is open.
    ModalBackdrop,
}

#[derive(Debug, Clone, Copy)]
pub struct CardRegion {
    pub index: usize,
    pub card: Rect,
    pub add_button: Rect,
}

#[derive(Debug, Clone, Copy)]
pub struct ModalRegion {
    pub body: Rect,
    pub close_button: Rect,
    pub add_button: Option<Rect>,
}

/// Screen regions recorded by the last draw.
///
/// The UI fills this in while rendering; input handling only ever asks it
/// what sits under a mouse position.
#[derive(Debug, Clone, Default)]
pub struct ViewBindings {
    pub search_input: Rect,
    pub theme_button: Rect,
    pub cards: Vec<CardRegion>,
    pub watchlist_remove: Vec<(usize, Rect)>,
    pub clear_button: Rect,
    pub modal: Option<ModalRegion>,
}

impl ViewBindings {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<ClickTarget> {
        let pos = Position::new(column, row);

        // An open modal swallows every click.
        if let Some(modal) = &self.modal {
            if modal.close_button.contains(pos) {
                return Some(ClickTarget::ModalClose);
            }
            if modal.add_button.is_some_and(|button| button.contains(pos)) {
                return Some(ClickTarget::ModalAdd);
            }
            if modal.body.contains(pos) {
                return Some(ClickTarget::ModalBody);
            }
            return Some(ClickTarget::ModalBackdrop);
        }

        if self.search_input.contains(pos) {
            return Some(ClickTarget::SearchInput);
        }
        if self.theme_button.contains(pos) {
            return Some(ClickTarget::ThemeButton);
        }
        for card in &self.cards {
            if card.add_button.contains(pos) {
                return Some(ClickTarget::CardAdd(card.index));
            }
            if card.card.contains(pos) {
                return Some(ClickTarget::Card(card.index));
            }
        }
        for (index, button) in &self.watchlist_remove {
            if button.contains(pos) {
                return Some(ClickTarget::WatchlistRemove(*index));
            }
        }
        if self.clear_button.contains(pos) {
            return Some(ClickTarget::ClearWatchlist);
        }
        None
    }
}
