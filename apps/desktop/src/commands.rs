//! Line-oriented command syntax for the terminal front end.

use client_core::Intent;
use shared::domain::CardId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
commands:
  open edit-profile | edit-avatar | add-place
  view <card-id>               open the full-size viewer
  ask-delete <card-id>         open the delete confirmation
  close
  edit-profile <name> | <bio>
  avatar <url>
  add <caption> | <url>
  like <card-id>               toggle your like
  delete <card-id>
  confirm                      confirm the pending delete
  show
  quit";

pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head {
        "open" => Command::Intent(match rest {
            "edit-profile" => Intent::OpenEditProfile,
            "edit-avatar" => Intent::OpenEditAvatar,
            "add-place" => Intent::OpenAddPlace,
            _ => return Err(ParseError::Usage("open edit-profile|edit-avatar|add-place")),
        }),
        "view" => Command::Intent(Intent::View(card_id(rest, "view <card-id>")?)),
        "ask-delete" => Command::Intent(Intent::OpenConfirmDelete(card_id(
            rest,
            "ask-delete <card-id>",
        )?)),
        "close" => Command::Intent(Intent::Close),
        "edit-profile" => {
            let (name, bio) = pair(rest, "edit-profile <name> | <bio>")?;
            Command::Intent(Intent::SubmitEditProfile { name, bio })
        }
        "avatar" => {
            if rest.is_empty() {
                return Err(ParseError::Usage("avatar <url>"));
            }
            Command::Intent(Intent::SubmitAvatar {
                url: rest.to_string(),
            })
        }
        "add" => {
            let (caption, url) = pair(rest, "add <caption> | <url>")?;
            Command::Intent(Intent::SubmitAddCard { caption, url })
        }
        "like" => Command::Intent(Intent::Like(card_id(rest, "like <card-id>")?)),
        "delete" => Command::Intent(Intent::Delete(card_id(rest, "delete <card-id>")?)),
        "confirm" => Command::Intent(Intent::ConfirmDelete),
        "show" => Command::Show,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn card_id(raw: &str, usage: &'static str) -> Result<CardId, ParseError> {
    if raw.is_empty() || raw.contains(char::is_whitespace) {
        return Err(ParseError::Usage(usage));
    }
    Ok(CardId::new(raw))
}

fn pair(raw: &str, usage: &'static str) -> Result<(String, String), ParseError> {
    let (left, right) = raw.split_once('|').ok_or(ParseError::Usage(usage))?;
    Ok((left.trim().to_string(), right.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(line: &str) -> Intent {
        match parse(line) {
            Ok(Some(Command::Intent(intent))) => intent,
            other => panic!("expected intent for '{line}', got {other:?}"),
        }
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn parses_modal_commands() {
        assert_eq!(intent("open add-place"), Intent::OpenAddPlace);
        assert_eq!(intent("open   edit-avatar"), Intent::OpenEditAvatar);
        assert_eq!(intent("view c1"), Intent::View(CardId::new("c1")));
        assert_eq!(
            intent("ask-delete c1"),
            Intent::OpenConfirmDelete(CardId::new("c1"))
        );
        assert_eq!(intent("close"), Intent::Close);
        assert_eq!(intent("confirm"), Intent::ConfirmDelete);
    }

    #[test]
    fn parses_submissions() {
        assert_eq!(
            intent("edit-profile Jacques Cousteau | Sailor, researcher"),
            Intent::SubmitEditProfile {
                name: "Jacques Cousteau".to_string(),
                bio: "Sailor, researcher".to_string(),
            }
        );
        assert_eq!(
            intent("add Elbrus | https://example.com/elbrus.jpg"),
            Intent::SubmitAddCard {
                caption: "Elbrus".to_string(),
                url: "https://example.com/elbrus.jpg".to_string(),
            }
        );
        assert_eq!(
            intent("avatar https://example.com/me.png"),
            Intent::SubmitAvatar {
                url: "https://example.com/me.png".to_string()
            }
        );
        assert_eq!(intent("like c2"), Intent::Like(CardId::new("c2")));
        assert_eq!(intent("delete c2"), Intent::Delete(CardId::new("c2")));
    }

    #[test]
    fn local_commands() {
        assert_eq!(parse("show"), Ok(Some(Command::Show)));
        assert_eq!(parse("help"), Ok(Some(Command::Help)));
        assert_eq!(parse("exit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            parse("dance"),
            Err(ParseError::Unknown("dance".to_string()))
        );
        assert!(matches!(parse("open gallery"), Err(ParseError::Usage(_))));
        assert!(matches!(parse("like"), Err(ParseError::Usage(_))));
        assert!(matches!(parse("like a b"), Err(ParseError::Usage(_))));
        assert!(matches!(parse("add no separator"), Err(ParseError::Usage(_))));
        assert!(matches!(parse("avatar"), Err(ParseError::Usage(_))));
    }
}
