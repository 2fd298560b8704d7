/// One min/max reading pair. Single-value deployments carry the same number
/// in both fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reading {
    pub min: u16,
    pub max: u16,
}

impl Reading {
    pub fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    pub fn single(value: u16) -> Self {
        Self {
            min: value,
            max: value,
        }
    }
}

/// A monitored numeric source with an operator-settable trigger threshold.
///
/// Sensors are identified by their position in the store's list; a `sensors`
/// message replaces the whole list and the positions with it.
#[derive(Debug, Clone)]
pub struct Sensor {
    pub label: String,
    /// Visual-layout group. The compatibility relation between profiles
    /// lives on `Profile`, not here.
    pub group: u32,
    pub reading: Reading,
    /// Negative means the sensor is hidden and must not be drawn.
    pub threshold: i32,
    /// Set whenever label/reading/threshold changed since the last sweep,
    /// or the sensor was just (re)created.
    pub dirty: bool,
}

impl Sensor {
    /// A freshly received sensor: zeroed readings, dirty so it gets a first
    /// paint.
    pub fn new(label: String, group: u32) -> Self {
        Self {
            label,
            group,
            reading: Reading::default(),
            threshold: 0,
            dirty: true,
        }
    }

    pub fn hidden(&self) -> bool {
        self.threshold < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sensor_starts_dirty_and_zeroed() {
        let sensor = Sensor::new("Heel L".to_string(), 2);
        assert!(sensor.dirty);
        assert_eq!(sensor.reading, Reading::default());
        assert_eq!(sensor.threshold, 0);
        assert!(!sensor.hidden());
    }

    #[test]
    fn test_negative_threshold_hides() {
        let mut sensor = Sensor::new("Toe R".to_string(), 0);
        sensor.threshold = -1;
        assert!(sensor.hidden());
    }

    #[test]
    fn test_reading_single_doubles_value() {
        assert_eq!(Reading::single(7), Reading::new(7, 7));
    }
}
