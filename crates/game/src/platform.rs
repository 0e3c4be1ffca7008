//! Host platform services.

/// Platform services the simulation needs from its host.
pub trait Platform {
    /// Lock (hide and confine) or release the cursor.
    fn set_cursor_locked(&mut self, locked: bool);

    /// Whether the cursor is currently locked.
    fn cursor_locked(&self) -> bool;
}

/// Platform with no window; remembers the requested cursor state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessPlatform {
    locked: bool,
}

impl Platform for HeadlessPlatform {
    fn set_cursor_locked(&mut self, locked: bool) {
        if self.locked != locked {
            log::debug!("cursor {}", if locked { "locked" } else { "released" });
        }
        self.locked = locked;
    }

    fn cursor_locked(&self) -> bool {
        self.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_cursor_lock() {
        let mut platform = HeadlessPlatform::default();
        assert!(!platform.cursor_locked());

        platform.set_cursor_locked(true);
        assert!(platform.cursor_locked());

        platform.set_cursor_locked(false);
        assert!(!platform.cursor_locked());
    }
}
