//! Host-supplied collaborators shared by every view.

use std::fmt;
use std::rc::Rc;

use loadout_seeker::PropertyId;

/// Translates a string key into display text.
pub type TranslateFn = Rc<dyn Fn(&str) -> String>;

/// Explicit context handed to engines at construction.
///
/// Cloning is cheap; clones share the same callbacks.
#[derive(Clone, Default)]
pub struct ViewContext {
    translate: Option<TranslateFn>,
}

impl ViewContext {
    /// A context that displays keys verbatim.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the translation callback.
    pub fn with_translator<F>(mut self, translate: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        self.translate = Some(Rc::new(translate));
        self
    }

    /// Resolves a key through the translator, or returns it unchanged.
    pub fn translate(&self, key: &str) -> String {
        match &self.translate {
            Some(translate) => translate(key),
            None => key.to_string(),
        }
    }

    /// Display label of a property.
    pub fn property_label(&self, property: PropertyId) -> String {
        self.translate(&property.label_key())
    }
}

impl fmt::Debug for ViewContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewContext")
            .field("translate", &self.translate.is_some())
            .finish()
    }
}
