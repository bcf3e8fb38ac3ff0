use std::fmt::Write;

use client_core::{ModalState, ViewSnapshot};

/// Plain-text rendering of the current view.
pub fn render(snapshot: &ViewSnapshot) -> String {
    let mut out = String::new();
    if !snapshot.initialized {
        out.push_str("(not loaded)\n");
        return out;
    }

    let viewer = snapshot.profile.as_ref().map(|profile| &profile.id);
    if let Some(profile) = &snapshot.profile {
        let _ = writeln!(out, "{} - {}", profile.display_name, profile.bio);
        let _ = writeln!(out, "avatar: {}", profile.avatar_url);
    }

    let _ = writeln!(out, "{} card(s)", snapshot.cards.len());
    for card in &snapshot.cards {
        let liked = viewer.is_some_and(|viewer| card.is_liked_by(viewer));
        let owned = viewer.is_some_and(|viewer| card.is_owned_by(viewer));
        let _ = writeln!(
            out,
            "  [{}] {} {}{} {}",
            card.id,
            card.caption,
            if liked { '♥' } else { '♡' },
            card.like_count(),
            if owned { "(yours)" } else { "" },
        );
    }

    match &snapshot.modal {
        ModalState::None => {}
        ModalState::Viewing(_) => {
            if let Some(card) = &snapshot.selection {
                let _ = writeln!(out, "viewing: {} <{}>", card.caption, card.image_url);
            }
        }
        ModalState::ConfirmDelete(card_id) => {
            let _ = writeln!(out, "modal: delete {card_id}? ('confirm' or 'close')");
        }
        other => {
            let _ = writeln!(out, "modal: {}", other.name());
        }
    }
    out
}
