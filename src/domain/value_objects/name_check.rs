//! File name validation
//!
//! Shared by rename, move and create: a name is accepted only if it is
//! non-empty, not reserved, free of separators and illegal characters, and
//! does not collide with a sibling in the target directory.

use std::fmt;

const ILLEGAL_CHARACTERS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Why a proposed name was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameIssue {
    Empty,
    Reserved,
    IllegalCharacter(char),
    Collision,
}

impl fmt::Display for NameIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameIssue::Empty => write!(f, "name is empty"),
            NameIssue::Reserved => write!(f, "name is reserved"),
            NameIssue::IllegalCharacter(c) if c.is_control() => {
                write!(f, "name contains a control character")
            }
            NameIssue::IllegalCharacter(c) => {
                write!(f, "name contains illegal character '{}'", c)
            }
            NameIssue::Collision => {
                write!(f, "file or folder with this name already exists")
            }
        }
    }
}

/// Validate `new_name` for an entry in a directory holding `siblings`.
///
/// `old_name` is the entry's current name when renaming; it never counts as
/// a collision with itself.
pub fn check_file_name<'a>(
    siblings: impl IntoIterator<Item = &'a str>,
    old_name: Option<&str>,
    new_name: &str,
) -> Result<(), NameIssue> {
    if new_name.trim().is_empty() {
        return Err(NameIssue::Empty);
    }
    if new_name == "." || new_name == ".." {
        return Err(NameIssue::Reserved);
    }
    if let Some(c) = new_name
        .chars()
        .find(|c| ILLEGAL_CHARACTERS.contains(c) || c.is_control())
    {
        return Err(NameIssue::IllegalCharacter(c));
    }
    let collides = siblings
        .into_iter()
        .any(|sibling| sibling == new_name && Some(sibling) != old_name);
    if collides {
        return Err(NameIssue::Collision);
    }
    Ok(())
}
