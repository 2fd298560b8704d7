pub(crate) mod profile;
pub(crate) mod sensor;

pub use profile::Profile;
pub use sensor::{Reading, Sensor};

/// Confirmed profile selection. Set only from inbound state messages, never
/// optimistically when the operator requests a change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub active: Option<String>,
    pub secondary: Option<String>,
}
