//! In-memory view of the session: profile, cards, and the single active modal.

use std::collections::HashSet;

use shared::domain::{Card, CardId, Profile, UserId};
use tracing::warn;

use crate::error::InvariantViolation;

/// The one modal (or full-size card view) currently shown. `Viewing` carries the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ModalState {
    #[default]
    None,
    EditProfile,
    EditAvatar,
    AddPlace,
    ConfirmDelete(CardId),
    Viewing(CardId),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::EditProfile => "edit_profile",
            Self::EditAvatar => "edit_avatar",
            Self::AddPlace => "add_place",
            Self::ConfirmDelete(_) => "confirm_delete",
            Self::Viewing(_) => "viewing",
        }
    }

    fn card_id(&self) -> Option<&CardId> {
        match self {
            Self::ConfirmDelete(id) | Self::Viewing(id) => Some(id),
            _ => None,
        }
    }
}

/// Read-only projection handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub initialized: bool,
    pub profile: Option<Profile>,
    pub cards: Vec<Card>,
    pub modal: ModalState,
    pub selection: Option<Card>,
}

#[derive(Debug, Default)]
pub struct ViewState {
    initialized: bool,
    profile: Option<Profile>,
    cards: Vec<Card>,
    modal: ModalState,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(
        &mut self,
        profile: Profile,
        cards: Vec<Card>,
    ) -> Result<(), InvariantViolation> {
        if self.initialized {
            return Err(InvariantViolation::AlreadyInitialized);
        }

        let mut seen = HashSet::with_capacity(cards.len());
        let mut unique = Vec::with_capacity(cards.len());
        for card in cards {
            if seen.insert(card.id.clone()) {
                unique.push(card);
            } else {
                warn!(card_id = %card.id, "view: dropping duplicate card from initial fetch");
            }
        }

        self.profile = Some(profile);
        self.cards = unique;
        self.initialized = true;
        Ok(())
    }

    pub fn replace_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    /// Replaces the card matching `card_id`. Absent means a delete won the race.
    pub fn replace_card(&mut self, card_id: &CardId, card: Card) -> Result<(), InvariantViolation> {
        if &card.id != card_id && self.position(&card.id).is_some() {
            return Err(InvariantViolation::DuplicateCard(card.id));
        }
        let index = self
            .position(card_id)
            .ok_or_else(|| InvariantViolation::UnknownCard(card_id.clone()))?;
        self.cards[index] = card;
        Ok(())
    }

    pub fn prepend_card(&mut self, card: Card) -> Result<(), InvariantViolation> {
        if self.position(&card.id).is_some() {
            return Err(InvariantViolation::DuplicateCard(card.id));
        }
        self.cards.insert(0, card);
        Ok(())
    }

    /// Removes the card and closes any modal that was showing it.
    pub fn remove_card(&mut self, card_id: &CardId) -> Result<Card, InvariantViolation> {
        let index = self
            .position(card_id)
            .ok_or_else(|| InvariantViolation::UnknownCard(card_id.clone()))?;
        if self.modal.card_id() == Some(card_id) {
            self.modal = ModalState::None;
        }
        Ok(self.cards.remove(index))
    }

    pub fn set_modal(&mut self, state: ModalState) -> Result<(), InvariantViolation> {
        if !state.is_open() {
            self.clear_modal();
            return Ok(());
        }
        if self.modal.is_open() {
            return Err(InvariantViolation::ModalAlreadyOpen {
                active: self.modal.clone(),
                requested: state,
            });
        }
        if let Some(card_id) = state.card_id() {
            if self.position(card_id).is_none() {
                return Err(InvariantViolation::UnknownCard(card_id.clone()));
            }
        }
        self.modal = state;
        Ok(())
    }

    /// Closes whatever is open; the selection goes with it.
    pub fn clear_modal(&mut self) -> ModalState {
        std::mem::take(&mut self.modal)
    }

    pub fn set_selection(&mut self, card_id: &CardId) -> Result<(), InvariantViolation> {
        self.set_modal(ModalState::Viewing(card_id.clone()))
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn current_user_id(&self) -> Option<&UserId> {
        self.profile.as_ref().map(|profile| &profile.id)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, card_id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == card_id)
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn selection(&self) -> Option<&Card> {
        match &self.modal {
            ModalState::Viewing(card_id) => self.card(card_id),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            initialized: self.initialized,
            profile: self.profile.clone(),
            cards: self.cards.clone(),
            modal: self.modal.clone(),
            selection: self.selection().cloned(),
        }
    }

    fn position(&self, card_id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| &card.id == card_id)
    }
}

#[cfg(test)]
#[path = "tests/view_state_tests.rs"]
mod tests;
