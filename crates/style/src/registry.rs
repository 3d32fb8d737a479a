use crate::builtin::BuiltinStyle;
use crate::style::Style;
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

/// An ordered registry of named styles with insert-if-absent semantics:
/// the first definition of a name wins and later duplicates are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleRegistry {
    styles: IndexMap<String, Arc<Style>>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with every `BuiltinStyle`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for builtin in BuiltinStyle::ALL {
            registry.register(builtin.default_style());
        }
        registry
    }

    /// Registers `style` unless a style with the same name exists.
    /// Returns `true` when the style was inserted.
    pub fn register(&mut self, style: Style) -> bool {
        if self.styles.contains_key(&style.name) {
            log::debug!("Style '{}' already registered; keeping the first definition", style.name);
            return false;
        }
        self.styles.insert(style.name.clone(), Arc::new(style));
        true
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Style>> {
        self.styles.get(name)
    }

    /// Looks up a style, logging unresolved references.
    pub fn resolve(&self, name: &str) -> Option<&Arc<Style>> {
        let style = self.styles.get(name);
        if style.is_none() {
            log::warn!("Unresolved style reference '{}'", name);
        }
        style
    }

    pub fn builtin(&self, builtin: BuiltinStyle) -> Option<&Arc<Style>> {
        self.styles.get(builtin.name())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Style>> {
        self.styles.values()
    }
}
