use log::{debug, warn};

use crate::models::{Profile, Selection, Sensor};
use crate::protocol::{ProfileSpec, ProtocolError, ServerUpdate};

/// What one `apply` call did to the mirror. Lets the caller decide whether
/// the secondary-profile options need recomputing, and lets tests observe
/// rejected entries without scraping logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub sensors_replaced: bool,
    pub profiles_replaced: bool,
    pub active_changed: bool,
    pub secondary_changed: bool,
    /// Sensors newly marked dirty by this message.
    pub dirtied: usize,
    /// `values`/`thresholds` entries dropped for referencing a dead index.
    pub dropped_entries: usize,
}

impl ApplySummary {
    /// Secondary options depend only on the profile list and the active
    /// profile.
    pub fn needs_recompute(&self) -> bool {
        self.profiles_replaced || self.active_changed
    }
}

/// Canonical in-memory mirror of sensor, profile and selection state,
/// reconstructed from the server's partial update messages.
///
/// The store is the single owner of this state. Selector and scheduler read
/// it to derive outputs; the only mutation they trigger comes back through
/// `mark_clean` after a draw instruction has been consumed.
#[derive(Debug, Default)]
pub struct SensorStateStore {
    sensors: Vec<Sensor>,
    profiles: Vec<Profile>,
    selection: Selection,
}

impl SensorStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Applies one inbound message. Fields are applied in wire order:
    /// sensors, values, thresholds, profiles, activeProfile,
    /// secondaryProfile.
    ///
    /// An index entry referencing a sensor that does not exist is a protocol
    /// violation: the entry is logged and dropped, the rest of the message
    /// still applies.
    pub fn apply(&mut self, update: ServerUpdate) -> ApplySummary {
        let mut summary = ApplySummary::default();

        if let Some(specs) = update.sensors {
            // Full replace. Previous sensors are discarded wholesale, never
            // re-indexed.
            debug!("Replacing sensor list ({} sensors)", specs.len());
            self.sensors = specs
                .into_iter()
                .map(|spec| Sensor::new(spec.label, spec.group))
                .collect();
            summary.sensors_replaced = true;
            summary.dirtied += self.sensors.len();
        }

        if let Some(values) = update.values {
            for (index, spec) in values {
                let Some(sensor) = self.sensors.get_mut(index) else {
                    warn!(
                        "Dropping value entry: {}",
                        ProtocolError::UnknownSensor { index }
                    );
                    summary.dropped_entries += 1;
                    continue;
                };
                let reading = spec.normalized();
                if reading != sensor.reading {
                    sensor.reading = reading;
                    if !sensor.dirty {
                        sensor.dirty = true;
                        summary.dirtied += 1;
                    }
                }
            }
        }

        if let Some(thresholds) = update.thresholds {
            for (index, threshold) in thresholds {
                let Some(sensor) = self.sensors.get_mut(index) else {
                    warn!(
                        "Dropping threshold entry: {}",
                        ProtocolError::UnknownSensor { index }
                    );
                    summary.dropped_entries += 1;
                    continue;
                };
                if threshold != sensor.threshold {
                    sensor.threshold = threshold;
                    if !sensor.dirty {
                        sensor.dirty = true;
                        summary.dirtied += 1;
                    }
                }
            }
        }

        if let Some(specs) = update.profiles {
            debug!("Replacing profile list ({} profiles)", specs.len());
            self.profiles = specs.into_iter().map(ProfileSpec::into_profile).collect();
            summary.profiles_replaced = true;
        }

        if let Some(name) = update.active_profile {
            self.selection.active = Some(name);
            summary.active_changed = true;
            // The server clears its secondary on a profile switch but
            // broadcasts only the new active profile; mirror the reset
            // unless this message carries a secondaryProfile key of its own.
            if update.secondary_profile.is_none() && self.selection.secondary.take().is_some() {
                summary.secondary_changed = true;
            }
        }

        if let Some(secondary) = update.secondary_profile {
            // Present-with-null means explicitly cleared; an absent key never
            // reaches this branch.
            self.selection.secondary = secondary;
            summary.secondary_changed = true;
        }

        summary
    }

    /// Clears one sensor's dirty flag once its draw instruction has been
    /// consumed. The scheduler never mutates the store itself.
    pub fn mark_clean(&mut self, index: usize) {
        if let Some(sensor) = self.sensors.get_mut(index) {
            sensor.dirty = false;
        }
    }
}
