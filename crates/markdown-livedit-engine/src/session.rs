//! # Editor Session
//!
//! The glue between keyboard input and re-rendering for one editable element.
//!
//! A host forwards every keydown to [`EditorSession::handle_keydown`]. Keys
//! that change text ask for a render; after the host has applied the key to
//! the element it calls [`EditorSession::render`], which reads the element's
//! visible text as markdown, renders it, and swaps it in with the caret kept
//! in place.
//!
//! A render lock covers hosts that render asynchronously: while a render is
//! in flight, text-changing keys are answered with [`KeyDecision::Block`] so
//! the host can suppress them instead of editing stale content.

use crate::dom::{Attribute, Dom, NodeId};
use crate::render::{RenderOptions, render_markdown};
use crate::selection::{DocumentSelection, FocusService, FocusTracker, SelectionService};
use crate::updater::{ContentUpdater, UpdateError, UpdateReport};

/// Appended to a base id to form the editable element's id.
pub const DEFAULT_ID_SUFFIX: &str = "-input";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Editor update failed: {0}")]
    Update(#[from] UpdateError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// A printable character (or grapheme) as produced by the keyboard.
    Character(String),
    Enter,
    Delete,
    Backspace,
    /// Any other named key: arrows, Tab, Escape, function keys...
    Named(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// Part of an IME composition.
    pub composing: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            composing: false,
        }
    }

    pub fn character(c: &str) -> Self {
        Self::new(Key::Character(c.to_string()))
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn composing(mut self) -> Self {
        self.composing = true;
        self
    }
}

/// How the host should treat a keydown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDecision {
    /// Let the key through; no render needed.
    Ignore,
    /// Let the key through, then render.
    Render,
    /// A render is in flight: prevent the key's default action.
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(UpdateReport),
    /// Another render held the lock.
    Skipped,
}

/// Derive the editable element's id from a base id.
pub fn editor_id(base_id: &str, suffix: &str) -> String {
    format!("{base_id}{suffix}")
}

pub struct EditorSession<S = DocumentSelection, F = FocusTracker> {
    editor_id: String,
    updater: ContentUpdater<S, F>,
    options: RenderOptions,
    locked: bool,
}

impl<S: SelectionService, F: FocusService> EditorSession<S, F> {
    /// Session for the element `"{base_id}-input"`.
    pub fn new(base_id: &str, updater: ContentUpdater<S, F>) -> Self {
        Self::with_suffix(base_id, DEFAULT_ID_SUFFIX, updater)
    }

    pub fn with_suffix(base_id: &str, suffix: &str, updater: ContentUpdater<S, F>) -> Self {
        Self {
            editor_id: editor_id(base_id, suffix),
            updater,
            options: RenderOptions::default(),
            locked: false,
        }
    }

    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn editor_id(&self) -> &str {
        &self.editor_id
    }

    pub fn updater(&self) -> &ContentUpdater<S, F> {
        &self.updater
    }

    pub fn updater_mut(&mut self) -> &mut ContentUpdater<S, F> {
        &mut self.updater
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Create the editable element under `parent`.
    pub fn mount(&self, dom: &mut Dom, parent: NodeId) -> NodeId {
        let element = dom.create_element_with_attrs(
            "article",
            vec![
                Attribute::new("id", self.editor_id.as_str()),
                Attribute::new("contenteditable", "plaintext-only"),
            ],
        );
        dom.append_child(parent, element);
        element
    }

    pub fn handle_keydown(&self, event: &KeyEvent) -> KeyDecision {
        if event.composing || event.modifiers.meta {
            return KeyDecision::Ignore;
        }
        if !matches!(
            event.key,
            Key::Character(_) | Key::Enter | Key::Delete | Key::Backspace
        ) {
            return KeyDecision::Ignore;
        }
        if self.locked {
            log::debug!("render in flight, blocking {:?}", event.key);
            return KeyDecision::Block;
        }
        KeyDecision::Render
    }

    /// Take the render lock. Returns `false` if it is already held.
    pub fn begin_render(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.locked = true;
        true
    }

    /// Re-render the editor from its current visible text and release the
    /// lock, whether or not the update succeeded.
    pub fn complete_render(&mut self, dom: &mut Dom) -> Result<UpdateReport, SessionError> {
        let result = self.rerender(dom);
        self.locked = false;
        result
    }

    /// [`begin_render`](Self::begin_render) followed by
    /// [`complete_render`](Self::complete_render).
    pub fn render(&mut self, dom: &mut Dom) -> Result<RenderOutcome, SessionError> {
        if !self.begin_render() {
            return Ok(RenderOutcome::Skipped);
        }
        self.complete_render(dom).map(RenderOutcome::Rendered)
    }

    fn rerender(&mut self, dom: &mut Dom) -> Result<UpdateReport, SessionError> {
        let source = dom
            .get_element_by_id(&self.editor_id)
            .map(|editor| dom.text_content(editor))
            .ok_or_else(|| UpdateError::NotFound(self.editor_id.clone()))?;
        let html = render_markdown(&source, &self.options);
        Ok(self.updater.update(dom, &self.editor_id, &html)?)
    }
}
