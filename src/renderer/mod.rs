pub mod colours;
pub mod geometry;

use std::iter::Enumerate;
use std::slice::Iter;

use crate::models::{Reading, Sensor};
pub use colours::{Colour, Colours};
pub use geometry::PanelGeometry;

/// What the surface must do for one stale sensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawInstruction {
    /// Threshold is negative: the sensor's element disappears entirely.
    Hide { index: usize },
    Bar {
        index: usize,
        label: String,
        /// Solid bar height in pixels from the bottom (the min reading).
        min_height: u32,
        /// Top of the min..max band, pixels from the bottom.
        max_height: u32,
        fill: Colour,
        span: Colour,
        /// Marker line position, pixels from the bottom.
        threshold_height: u32,
        marker: Colour,
        /// Raw values for the numeric labels next to their lines.
        threshold: i32,
        reading: Reading,
    },
}

impl DrawInstruction {
    pub fn index(&self) -> usize {
        match self {
            DrawInstruction::Hide { index } => *index,
            DrawInstruction::Bar { index, .. } => *index,
        }
    }
}

/// Computes draw instructions for dirty sensors. Pure derivation: the
/// scheduler never mutates the store and never touches the network; the
/// caller clears dirty flags after consuming each instruction.
#[derive(Debug)]
pub struct RenderScheduler {
    geometry: PanelGeometry,
    colours: Colours,
}

impl RenderScheduler {
    pub fn new(geometry: PanelGeometry) -> Self {
        Self {
            geometry,
            colours: Colours::default(),
        }
    }

    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    /// One instruction per currently-dirty sensor, in index order. The
    /// iterator is finite and consumed once; request a fresh sweep after the
    /// next state mutation.
    pub fn sweep<'a>(&'a self, sensors: &'a [Sensor]) -> Sweep<'a> {
        Sweep {
            scheduler: self,
            sensors: sensors.iter().enumerate(),
        }
    }

    fn instruction_for(&self, index: usize, sensor: &Sensor) -> DrawInstruction {
        if sensor.hidden() {
            return DrawInstruction::Hide { index };
        }

        let reading = sensor.reading;
        let threshold = sensor.threshold;

        // Three-tier fill: fully triggered, partially triggered, idle.
        let fill = if reading.min as i32 >= threshold {
            self.colours.triggered
        } else if reading.max as i32 >= threshold {
            self.colours.partial
        } else {
            self.colours.idle
        };

        DrawInstruction::Bar {
            index,
            label: sensor.label.clone(),
            min_height: self.geometry.value_to_height(reading.min as i32),
            max_height: self.geometry.value_to_height(reading.max as i32),
            fill,
            span: self.colours.span,
            threshold_height: self.geometry.value_to_height(threshold),
            marker: self.colours.marker,
            threshold,
            reading,
        }
    }
}

pub struct Sweep<'a> {
    scheduler: &'a RenderScheduler,
    sensors: Enumerate<Iter<'a, Sensor>>,
}

impl Iterator for Sweep<'_> {
    type Item = DrawInstruction;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, sensor) in self.sensors.by_ref() {
            if sensor.dirty {
                return Some(self.scheduler.instruction_for(index, sensor));
            }
        }
        None
    }
}
