//! Slot for an entity that only exists once an asynchronous load completes

/// Either nothing yet, or the loaded value
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Deferred<T> {
    /// The load has not completed (or failed, or the entity was removed)
    #[default]
    Unloaded,
    /// The load completed
    Loaded(T),
}

impl<T> Deferred<T> {
    /// Check if the value is present
    pub fn is_loaded(&self) -> bool {
        matches!(self, Deferred::Loaded(_))
    }

    /// Borrow the value if loaded
    pub fn get(&self) -> Option<&T> {
        match self {
            Deferred::Loaded(value) => Some(value),
            Deferred::Unloaded => None,
        }
    }

    /// Mutably borrow the value if loaded
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Deferred::Loaded(value) => Some(value),
            Deferred::Unloaded => None,
        }
    }

    /// Install a value, returning the previous one
    pub fn install(&mut self, value: T) -> Option<T> {
        match std::mem::replace(self, Deferred::Loaded(value)) {
            Deferred::Loaded(old) => Some(old),
            Deferred::Unloaded => None,
        }
    }

    /// Take the value out, leaving the slot unloaded
    pub fn take(&mut self) -> Option<T> {
        match std::mem::take(self) {
            Deferred::Loaded(value) => Some(value),
            Deferred::Unloaded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unloaded() {
        let slot: Deferred<u32> = Deferred::default();
        assert!(!slot.is_loaded());
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn test_install_and_take() {
        let mut slot = Deferred::Unloaded;
        assert_eq!(slot.install(3), None);
        assert!(slot.is_loaded());
        assert_eq!(slot.install(4), Some(3));
        assert_eq!(slot.take(), Some(4));
        assert!(!slot.is_loaded());
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_get_mut() {
        let mut slot = Deferred::Loaded(1);
        if let Some(v) = slot.get_mut() {
            *v += 1;
        }
        assert_eq!(slot, Deferred::Loaded(2));
    }
}
