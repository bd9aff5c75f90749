//! # Modal Coordinator
//!
//! A LIFO stack of overlay dialogs. Exactly one dialog is *active* at any
//! time — the top of the stack — and only the active dialog can be closed,
//! so callers unwind top-down. The focus owner recorded when a dialog
//! opens travels with its stack entry and is handed back on close, which
//! is what makes restoration reliable across nested dialogs.

use crate::error::{PlazaError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub id: String,
    pub title: String,
    pub body: String,
}

impl Dialog {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug)]
struct Entry {
    dialog: Dialog,
    opener: Option<String>,
}

/// Result of closing a dialog: the dialog itself plus the focus owner to
/// restore, captured when it was opened.
#[derive(Debug, PartialEq, Eq)]
pub struct Closed {
    pub dialog: Dialog,
    pub restore_focus: Option<String>,
}

#[derive(Debug, Default)]
pub struct ModalCoordinator {
    stack: Vec<Entry>,
}

impl ModalCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a dialog; it becomes the active one. `opener` names whatever
    /// held focus before opening and is returned by the matching close.
    pub fn open(&mut self, dialog: Dialog, opener: Option<String>) -> &Dialog {
        self.stack.push(Entry { dialog, opener });
        // Just pushed, so the stack cannot be empty.
        &self.stack[self.stack.len() - 1].dialog
    }

    /// The top of the stack — the only dialog receiving input.
    pub fn active(&self) -> Option<&Dialog> {
        self.stack.last().map(|entry| &entry.dialog)
    }

    /// Pop the active dialog. The previous stack top becomes active again;
    /// with an empty stack this is a quiet no-op returning `None`.
    pub fn close_active(&mut self) -> Option<Closed> {
        self.stack.pop().map(|entry| Closed {
            dialog: entry.dialog,
            restore_focus: entry.opener,
        })
    }

    /// Close a dialog by id. Only the active (top) dialog may be closed;
    /// anything else is a caller bug surfaced as an error.
    pub fn close(&mut self, id: &str) -> Result<Closed> {
        let top_matches = matches!(self.stack.last(), Some(top) if top.dialog.id == id);
        if top_matches {
            if let Some(entry) = self.stack.pop() {
                return Ok(Closed {
                    dialog: entry.dialog,
                    restore_focus: entry.opener,
                });
            }
        }
        if self.stack.iter().any(|e| e.dialog.id == id) {
            Err(PlazaError::Api(format!(
                "dialog \"{}\" is not on top; close top-down",
                id
            )))
        } else {
            Err(PlazaError::Api(format!("no dialog \"{}\" is open", id)))
        }
    }

    /// Unwind the whole stack, top-down.
    pub fn close_all(&mut self) -> usize {
        let mut closed = 0;
        while self.close_active().is_some() {
            closed += 1;
        }
        closed
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.stack.iter().any(|entry| entry.dialog.id == id)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
