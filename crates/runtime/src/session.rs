use tracing::{debug, warn};

use crate::controls::{ControlError, ControlEvent, ControlSpec, ControlState};
use crate::dashboard::{Dashboard, Views};
use crate::event_bus::{EventBus, ViewObserver};
use crate::frame::Revision;

/// One user's reactive view of a [`Dashboard`].
///
/// Control events are applied one at a time; each accepted event bumps the
/// revision and synchronously recomputes all views, which are then pushed to
/// the observers.
#[derive(Debug)]
pub struct Session {
    dashboard: Dashboard,
    state: ControlState,
    revision: Revision,
    bus: EventBus,
}

impl Session {
    pub fn new(dashboard: Dashboard) -> Self {
        let state = ControlState::initial(dashboard.control_spec());
        Self {
            dashboard,
            state,
            revision: Revision::INITIAL,
            bus: EventBus::new(),
        }
    }

    pub fn control_spec(&self) -> &ControlSpec {
        self.dashboard.control_spec()
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Views computed for an older revision must be discarded.
    pub fn is_current(&self, revision: Revision) -> bool {
        revision == self.revision
    }

    pub fn subscribe(&mut self, observer: Box<dyn ViewObserver>) {
        self.bus.subscribe(observer);
    }

    /// Views for the current state without changing it.
    pub fn refresh(&mut self) -> Views {
        let views = self.dashboard.render(&self.state, self.revision);
        self.bus.emit(&views);
        views
    }

    pub fn dispatch(&mut self, event: ControlEvent) -> Result<Views, ControlError> {
        let next = self
            .state
            .apply(self.dashboard.control_spec(), &event)
            .inspect_err(|e| warn!("rejected control event {event:?}: {e}"))?;
        self.state = next;
        self.revision = self.revision.next();
        debug!(revision = self.revision.0, ?event, "control event applied");
        let views = self.refresh();
        // Out-of-range pages settle on the last page actually shown.
        self.state.page = views.controls.page;
        Ok(views)
    }
}
