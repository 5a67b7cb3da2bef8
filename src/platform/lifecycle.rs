//! Runtime ownership across start, restart and stop
//!
//! The browser shell keeps exactly one live runtime (frame loop plus
//! listeners). Installing a new one tears the old one down first, so a
//! restart never leaves a second loop or a duplicate listener behind.

/// Something holding page resources that must be released explicitly
pub trait Stoppable {
    fn stop(&mut self);
}

/// Holds at most one running instance
#[derive(Debug)]
pub struct RuntimeSlot<T: Stoppable> {
    current: Option<T>,
    generation: u32,
}

impl<T: Stoppable> RuntimeSlot<T> {
    pub const fn new() -> Self {
        Self {
            current: None,
            generation: 0,
        }
    }

    /// Stop whatever is running, then take ownership of `runtime`.
    /// Returns the new generation number.
    pub fn install(&mut self, runtime: T) -> u32 {
        if let Some(mut old) = self.current.take() {
            old.stop();
            log::info!("Replaced runtime generation {}", self.generation);
        }
        self.current = Some(runtime);
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Stop and drop the running instance; false if nothing was running
    pub fn shutdown(&mut self) -> bool {
        match self.current.take() {
            Some(mut runtime) => {
                runtime.stop();
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// Number of installs so far
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl<T: Stoppable> Default for RuntimeSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts how often it was stopped
    struct FakeRuntime {
        stops: Rc<Cell<u32>>,
    }

    impl FakeRuntime {
        fn new() -> (Self, Rc<Cell<u32>>) {
            let stops = Rc::new(Cell::new(0));
            (
                Self {
                    stops: stops.clone(),
                },
                stops,
            )
        }
    }

    impl Stoppable for FakeRuntime {
        fn stop(&mut self) {
            self.stops.set(self.stops.get() + 1);
        }
    }

    #[test]
    fn test_restart_stops_previous_runtime_once() {
        let mut slot = RuntimeSlot::new();
        let (first, first_stops) = FakeRuntime::new();
        let (second, second_stops) = FakeRuntime::new();

        assert_eq!(slot.install(first), 1);
        assert_eq!(first_stops.get(), 0);

        assert_eq!(slot.install(second), 2);
        assert_eq!(first_stops.get(), 1);
        assert_eq!(second_stops.get(), 0);
        assert!(slot.is_running());
    }

    #[test]
    fn test_shutdown_then_restart() {
        let mut slot = RuntimeSlot::new();
        let (first, first_stops) = FakeRuntime::new();
        slot.install(first);

        assert!(slot.shutdown());
        assert_eq!(first_stops.get(), 1);
        assert!(!slot.is_running());
        // Already stopped
        assert!(!slot.shutdown());
        assert_eq!(first_stops.get(), 1);

        let (second, second_stops) = FakeRuntime::new();
        assert_eq!(slot.install(second), 2);
        assert!(slot.is_running());
        assert_eq!(first_stops.get(), 1);
        assert_eq!(second_stops.get(), 0);
    }

    #[test]
    fn test_empty_slot() {
        let mut slot: RuntimeSlot<FakeRuntime> = RuntimeSlot::default();
        assert!(!slot.is_running());
        assert_eq!(slot.generation(), 0);
        assert!(!slot.shutdown());
    }
}
