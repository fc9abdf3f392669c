//! Text form of user edits on a working set.
//!
//! The command line has no pointer to drag with, so each gesture becomes a
//! small command that addresses pages by their one-based source page number:
//!
//! - `move:<page>:<position>`: move a page to a one-based position
//! - `delete:<page>`: remove a page (Organize)
//! - `toggle:<page>`: flip inclusion of a page (Split)
//! - `all` / `none`: include or exclude every page (Split)

use std::fmt;
use std::str::FromStr;

use super::{Organize, Split, WorkingSet};
use crate::error::{PdfPagesError, Result};

/// One user edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Move the entry for `page` to one-based `position`.
    Move {
        /// One-based source page number.
        page: usize,
        /// One-based target position.
        position: usize,
    },
    /// Remove the entry for `page`.
    Delete {
        /// One-based source page number.
        page: usize,
    },
    /// Flip inclusion of the entry for `page`.
    Toggle {
        /// One-based source page number.
        page: usize,
    },
    /// Include every entry.
    SelectAll,
    /// Exclude every entry.
    SelectNone,
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move { page, position } => write!(f, "move:{page}:{position}"),
            Self::Delete { page } => write!(f, "delete:{page}"),
            Self::Toggle { page } => write!(f, "toggle:{page}"),
            Self::SelectAll => write!(f, "all"),
            Self::SelectNone => write!(f, "none"),
        }
    }
}

impl FromStr for Edit {
    type Err = PdfPagesError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| PdfPagesError::InvalidEdit {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.trim().split(':').map(str::trim).collect();
        let number = |text: &str| -> Result<usize> {
            let value: usize = text
                .parse()
                .map_err(|_| invalid(&format!("'{text}' is not a number")))?;
            if value == 0 {
                return Err(invalid("page numbers and positions start at 1"));
            }
            Ok(value)
        };

        match parts.as_slice() {
            [command] if command.eq_ignore_ascii_case("all") => Ok(Self::SelectAll),
            [command] if command.eq_ignore_ascii_case("none") => Ok(Self::SelectNone),
            [command, page, position] if command.eq_ignore_ascii_case("move") => Ok(Self::Move {
                page: number(*page)?,
                position: number(*position)?,
            }),
            [command, page] if command.eq_ignore_ascii_case("delete") => Ok(Self::Delete {
                page: number(*page)?,
            }),
            [command, page] if command.eq_ignore_ascii_case("toggle") => Ok(Self::Toggle {
                page: number(*page)?,
            }),
            _ => Err(invalid(
                "expected move:<page>:<position>, delete:<page>, toggle:<page>, all or none",
            )),
        }
    }
}

impl Edit {
    /// Whether the Split workflow accepts this edit.
    pub fn applies_to_split(&self) -> bool {
        !matches!(self, Self::Delete { .. })
    }

    /// Whether the Organize workflow accepts this edit.
    pub fn applies_to_organize(&self) -> bool {
        matches!(self, Self::Move { .. } | Self::Delete { .. })
    }
}

fn apply_move<M, T>(set: &mut WorkingSet<M, T>, page: usize, position: usize) -> bool {
    match set.entry_for_page(page).map(|entry| entry.id()) {
        Some(id) => set.reorder(id, position - 1),
        None => {
            tracing::warn!(page, "move skipped: page not in working set");
            false
        }
    }
}

impl<T> WorkingSet<Split, T> {
    /// Apply one edit. Edits addressing absent pages are logged and skipped.
    pub fn apply(&mut self, edit: Edit) -> Result<()> {
        match edit {
            Edit::Move { page, position } => {
                apply_move(self, page, position);
            }
            Edit::Toggle { page } => match self.entry_for_page(page).map(|entry| entry.id()) {
                Some(id) => {
                    self.toggle_included(id)?;
                }
                None => tracing::warn!(page, "toggle skipped: page not in working set"),
            },
            Edit::SelectAll => self.set_all_included(true),
            Edit::SelectNone => self.set_all_included(false),
            Edit::Delete { .. } => {
                return Err(PdfPagesError::InvalidEdit {
                    input: edit.to_string(),
                    reason: "pages cannot be deleted when splitting; use toggle".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Include exactly the given one-based page numbers.
    pub fn select_pages(&mut self, pages: &[u32]) {
        self.set_all_included(false);
        for &page in pages {
            match self.entry_for_page(page as usize).map(|entry| entry.id()) {
                Some(id) => {
                    // The id was just looked up, toggling cannot miss.
                    let _ = self.toggle_included(id);
                }
                None => tracing::warn!(page, "page not in working set"),
            }
        }
    }
}

impl<T> WorkingSet<Organize, T> {
    /// Apply one edit. Edits addressing absent pages are logged and skipped.
    pub fn apply(&mut self, edit: Edit) -> Result<()> {
        match edit {
            Edit::Move { page, position } => {
                apply_move(self, page, position);
            }
            Edit::Delete { page } => match self.entry_for_page(page).map(|entry| entry.id()) {
                Some(id) => {
                    self.delete(id);
                }
                None => tracing::warn!(page, "delete skipped: page not in working set"),
            },
            Edit::Toggle { .. } | Edit::SelectAll | Edit::SelectNone => {
                return Err(PdfPagesError::InvalidEdit {
                    input: edit.to_string(),
                    reason: "organize keeps every remaining page; use delete".to_string(),
                });
            }
        }
        Ok(())
    }
}
