use anyhow::Result;
use log::debug;

use crate::renderer::DrawInstruction;

/// The drawing boundary. The engine computes draw instructions; a panel
/// realises them on whatever surface it owns. Pixel primitives live behind
/// this trait, outside the crate.
pub trait Panel: Send {
    fn draw(&mut self, instruction: &DrawInstruction) -> Result<()>;
}

/// Headless panel that logs each instruction. The default surface for the
/// binary; embedding UIs supply their own `Panel`.
#[derive(Debug, Default)]
pub struct TracePanel;

impl Panel for TracePanel {
    fn draw(&mut self, instruction: &DrawInstruction) -> Result<()> {
        match instruction {
            DrawInstruction::Hide { index } => {
                debug!("sensor {index}: hidden");
            }
            DrawInstruction::Bar {
                index,
                label,
                min_height,
                max_height,
                fill,
                threshold_height,
                threshold,
                reading,
                ..
            } => {
                debug!(
                    "sensor {index} ({label}): bar {min_height}..{max_height}px {} \
                     threshold {threshold} ({reading_min}/{reading_max}) marker at {threshold_height}px",
                    fill.hex(),
                    reading_min = reading.min,
                    reading_max = reading.max,
                );
            }
        }
        Ok(())
    }
}
