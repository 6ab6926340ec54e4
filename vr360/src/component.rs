use tracing::{debug, trace};

use crate::time::Time;

/// Lifecycle of a scene component, driven by [`ComponentHost`].
///
/// `initialize` runs once before the first tick, `on_parameters_changed`
/// after any live edit of the component's settings, and `shutdown` once at
/// teardown. None of them may fail: a component that cannot do its work this
/// cycle simply does nothing and tries again later.
pub trait Component {
    fn name(&self) -> &str;

    fn initialize(&mut self) {}

    fn tick(&mut self, _time: &Time) {}

    fn on_parameters_changed(&mut self) {}

    fn shutdown(&mut self) {}
}

#[derive(Default)]
pub struct ComponentHost {
    components: Vec<Box<dyn Component>>,
    time: Time,
    initialized: bool,
}

impl ComponentHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component. Components added after `initialize_all` are
    /// initialized immediately.
    pub fn add(&mut self, mut component: Box<dyn Component>) {
        if self.initialized {
            component.initialize();
        }
        self.components.push(component);
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn initialize_all(&mut self) {
        if self.initialized {
            return;
        }
        for component in &mut self.components {
            debug!("initializing component {}", component.name());
            component.initialize();
        }
        self.initialized = true;
    }

    pub fn tick_all(&mut self, delta: std::time::Duration) {
        self.time.advance(delta);
        trace!(frame = self.time.frame, "tick");
        for component in &mut self.components {
            component.tick(&self.time);
        }
    }

    /// Forward a live parameter edit to every component named `name`.
    /// Returns how many components were notified.
    pub fn notify_parameters_changed(&mut self, name: &str) -> usize {
        let mut notified = 0;
        for component in self.components.iter_mut().filter(|c| c.name() == name) {
            component.on_parameters_changed();
            notified += 1;
        }
        notified
    }

    /// Shut down in reverse registration order.
    pub fn shutdown_all(&mut self) {
        if !self.initialized {
            return;
        }
        for component in self.components.iter_mut().rev() {
            debug!("shutting down component {}", component.name());
            component.shutdown();
        }
        self.initialized = false;
    }
}
