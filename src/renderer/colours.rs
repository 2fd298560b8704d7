/// RGBA colour carried by draw instructions. The surface decides how to
/// realise it; this crate never touches pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb` form, for trace output.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone)]
pub struct Colours {
    pub triggered: Colour,
    pub partial: Colour,
    pub idle: Colour,
    pub span: Colour,
    pub marker: Colour,
    pub label: Colour,
}

impl Default for Colours {
    fn default() -> Self {
        Self {
            triggered: Colour::rgb(0x22, 0xbb, 0x66), // Green - min over threshold
            partial: Colour::rgb(0xbb, 0xbb, 0x55),   // Yellow - only max over threshold
            idle: Colour::rgb(0x44, 0x77, 0xee),      // Blue - below threshold
            span: Colour::rgb(0xcc, 0x99, 0x88),      // Dusty rose - min..max band
            marker: Colour::rgba(0, 0, 0, 128),       // Translucent black - threshold line
            label: Colour::rgb(0, 0, 0),              // Black - numeric labels
        }
    }
}
