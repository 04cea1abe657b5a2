use crate::dashboard::Views;
use crate::frame::Revision;

/// Receives every freshly computed set of views.
pub trait ViewObserver: Send {
    fn on_views(&mut self, views: &Views);
}

/// Fan-out of recomputed views to registered observers, in registration
/// order.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Box<dyn ViewObserver>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn ViewObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn emit(&mut self, views: &Views) {
        for observer in &mut self.observers {
            observer.on_views(views);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Keeps only the newest views offered to it (last write wins).
#[derive(Debug, Default)]
pub struct LatestViews {
    latest: Option<Views>,
}

impl LatestViews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `views` unless something newer was already accepted.
    pub fn offer(&mut self, views: Views) -> bool {
        if self.revision().is_some_and(|r| views.revision < r) {
            return false;
        }
        self.latest = Some(views);
        true
    }

    pub fn revision(&self) -> Option<Revision> {
        self.latest.as_ref().map(|v| v.revision)
    }

    pub fn get(&self) -> Option<&Views> {
        self.latest.as_ref()
    }
}

impl ViewObserver for LatestViews {
    fn on_views(&mut self, views: &Views) {
        self.offer(views.clone());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{EventBus, LatestViews, ViewObserver};
    use crate::controls::ControlState;
    use crate::dashboard::Views;
    use crate::frame::Revision;
    use crate::test_support::sample_dashboard;

    struct Recorder(Arc<Mutex<Vec<Revision>>>);

    impl ViewObserver for Recorder {
        fn on_views(&mut self, views: &Views) {
            self.0.lock().unwrap().push(views.revision);
        }
    }

    #[test]
    fn emits_to_every_observer() {
        let dashboard = sample_dashboard();
        let state = ControlState::initial(dashboard.control_spec());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let mut bus = EventBus::new();
        bus.subscribe(Box::new(Recorder(seen.clone())));
        bus.subscribe(Box::new(Recorder(seen.clone())));
        assert_eq!(bus.len(), 2);

        bus.emit(&dashboard.render(&state, Revision(1)));
        assert_eq!(*seen.lock().unwrap(), vec![Revision(1), Revision(1)]);
    }

    #[test]
    fn latest_views_discards_stale_revisions() {
        let dashboard = sample_dashboard();
        let state = ControlState::initial(dashboard.control_spec());
        let mut latest = LatestViews::new();

        assert!(latest.offer(dashboard.render(&state, Revision(2))));
        assert!(!latest.offer(dashboard.render(&state, Revision(1))));
        assert_eq!(latest.revision(), Some(Revision(2)));
        assert!(latest.offer(dashboard.render(&state, Revision(3))));
        assert_eq!(latest.get().map(|v| v.revision), Some(Revision(3)));
    }
}
