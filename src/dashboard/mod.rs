use log::warn;

use crate::config::AppConfig;
use crate::controls::{self, Gesture};
use crate::panel::Panel;
use crate::protocol::{self, ClientCommand, ProtocolError, ServerUpdate};
use crate::renderer::{PanelGeometry, RenderScheduler};
use crate::selector::ProfileSelector;
use crate::store::SensorStateStore;

/// Ties the engine together: apply one inbound message, recompute the
/// secondary options when profiles or the active profile moved, then sweep
/// the dirty sensors onto the panel.
///
/// The whole pipeline runs synchronously per frame, so the panel never shows
/// a partially applied message.
pub struct Dashboard {
    store: SensorStateStore,
    selector: ProfileSelector,
    scheduler: RenderScheduler,
}

impl Dashboard {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: SensorStateStore::new(),
            selector: ProfileSelector::new(),
            scheduler: RenderScheduler::new(PanelGeometry::from_config(&config.panel)),
        }
    }

    pub fn store(&self) -> &SensorStateStore {
        &self.store
    }

    pub fn selector(&self) -> &ProfileSelector {
        &self.selector
    }

    /// Decodes and processes one transport frame. A malformed frame is an
    /// error for the caller to log; prior state is untouched.
    pub fn handle_frame(&mut self, frame: &str, panel: &mut dyn Panel) -> Result<(), ProtocolError> {
        let update = protocol::decode_update(frame)?;
        self.handle_update(update, panel);
        Ok(())
    }

    pub fn handle_update(&mut self, update: ServerUpdate, panel: &mut dyn Panel) {
        let summary = self.store.apply(update);

        if summary.needs_recompute() {
            self.selector.recompute(
                self.store.profiles(),
                self.store.selection().active.as_deref(),
            );
        }

        // Sweep to completion before the next frame can be processed. A
        // failed draw is logged and skipped; cleanliness tracks instruction
        // production, not surface success.
        let mut swept = Vec::new();
        for instruction in self.scheduler.sweep(self.store.sensors()) {
            if let Err(e) = panel.draw(&instruction) {
                warn!("Draw failed for sensor {}: {e:#}", instruction.index());
            }
            swept.push(instruction.index());
        }
        for index in swept {
            self.store.mark_clean(index);
        }
    }

    /// Maps an operator gesture to its outbound command. Nothing is applied
    /// locally; the confirming state message is the single source of truth.
    pub fn command_for(&self, gesture: Gesture) -> ClientCommand {
        controls::command_for(gesture, self.scheduler.geometry())
    }
}
