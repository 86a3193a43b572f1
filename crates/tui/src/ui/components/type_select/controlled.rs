//! Controlled/uncontrolled value slot.
//!
//! A slot reads the caller's value when one is supplied and its own copy
//! otherwise. Writes go through [`ControlledValue::set`], which calls the
//! caller's change callback when one is registered and updates the internal
//! copy only when none is. The two paths never both run for the same write.

use std::fmt;

/// Change notification handed the proposed new value.
pub type ChangeCallback<T> = Box<dyn FnMut(&T)>;

pub struct ControlledValue<T> {
    internal: T,
    external: Option<T>,
    on_change: Option<ChangeCallback<T>>,
}

impl<T> ControlledValue<T> {
    pub fn new(initial: T, external: Option<T>, on_change: Option<ChangeCallback<T>>) -> Self {
        Self {
            internal: initial,
            external,
            on_change,
        }
    }

    /// The effective value: the caller's when supplied, else the internal copy.
    pub fn get(&self) -> &T {
        self.external.as_ref().unwrap_or(&self.internal)
    }

    /// Routes a write to the change callback, or to the internal copy when no
    /// callback is registered.
    pub fn set(&mut self, value: T) {
        match self.on_change.as_mut() {
            Some(on_change) => on_change(&value),
            None => self.internal = value,
        }
    }

    /// Feeds the caller's current value back in (`None` hands reads back to
    /// the internal copy).
    pub fn set_external(&mut self, value: Option<T>) {
        self.external = value;
    }

    /// Both a value and a callback are supplied.
    pub fn is_controlled(&self) -> bool {
        self.external.is_some() && self.on_change.is_some()
    }

    #[cfg(test)]
    pub fn internal(&self) -> &T {
        &self.internal
    }
}

impl<T: fmt::Debug> fmt::Debug for ControlledValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlledValue")
            .field("internal", &self.internal)
            .field("external", &self.external)
            .field("has_on_change", &self.on_change.is_some())
            .finish()
    }
}
