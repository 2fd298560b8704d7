use crate::config::PanelConfig;

/// Maps between sensor readings and panel pixels for one fixed-size sensor
/// column. The drawing surface has its origin at the top, so the click map
/// inverts the vertical axis.
#[derive(Debug, Clone, Copy)]
pub struct PanelGeometry {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Fixed reading scale; readings and thresholds live in [0, sensor_max].
    pub sensor_max: u16,
}

impl PanelGeometry {
    pub fn new(canvas_width: u32, canvas_height: u32, sensor_max: u16) -> Self {
        Self {
            canvas_width,
            canvas_height,
            sensor_max,
        }
    }

    pub fn from_config(config: &PanelConfig) -> Self {
        Self::new(config.canvas_width, config.canvas_height, config.sensor_max)
    }

    /// Bar or marker height in pixels, measured from the bottom edge.
    pub fn value_to_height(&self, value: i32) -> u32 {
        let value = value.clamp(0, self.sensor_max as i32);
        (value as f64 * self.canvas_height as f64 / self.sensor_max as f64).round() as u32
    }

    /// Inverse map for the click-to-set-threshold gesture: a y offset from
    /// the top of the bar area to a threshold value, clamped to
    /// [0, sensor_max].
    pub fn threshold_from_y(&self, y: f64) -> i32 {
        let threshold =
            self.sensor_max as f64 - y * self.sensor_max as f64 / self.canvas_height as f64;
        (threshold.round() as i32).clamp(0, self.sensor_max as i32)
    }

    /// Horizontal anchor for the threshold label, 3/4 across the column.
    pub fn threshold_label_x(&self) -> u32 {
        (self.canvas_width as f64 * 0.75) as u32
    }

    /// Horizontal anchor for the reading label, 1/4 across the column.
    pub fn reading_label_x(&self) -> u32 {
        (self.canvas_width as f64 * 0.25) as u32
    }
}

/// Labels sit this many pixels above their reference line.
pub const LABEL_OFFSET: u32 = 5;

/// Threshold marker line thickness in pixels.
pub const MARKER_THICKNESS: u32 = 2;
