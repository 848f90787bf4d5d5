//! Events - Instance-owned listener registries
//!
//! UI, audio, camera and wheel collaborators subscribe to the signals a
//! subsystem owns instead of polling it. Each registry belongs to one
//! subsystem instance, so there is no global event state to unsubscribe
//! from on teardown.

/// A list of callbacks fired with a copyable payload.
pub struct Signal<T: Copy> {
    listeners: Vec<Box<dyn FnMut(T)>>,
}

impl<T: Copy> Signal<T> {
    pub fn new() -> Self {
        Self { listeners: Vec::new() }
    }

    /// Registers a listener. Listeners stay connected for the life of
    /// the owning subsystem.
    pub fn connect(&mut self, listener: impl FnMut(T) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Invokes every listener with `value`.
    pub fn emit(&mut self, value: T) {
        for listener in &mut self.listeners {
            listener(value);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T: Copy> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
