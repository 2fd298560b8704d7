use crate::protocol::ClientCommand;
use crate::renderer::PanelGeometry;
use crate::selector::SecondaryChoice;

/// An operator action on one of the dashboard controls. Gestures become
/// fire-and-forget commands; the store only changes when the server confirms.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    PickProfile(String),
    PickSecondary(SecondaryChoice),
    /// The +/- buttons next to a sensor.
    NudgeThreshold { id: usize, delta: i32 },
    /// A click on the sensor bar at `y` pixels from the top of the bar area.
    SetFromBar { id: usize, y: f64 },
}

pub fn command_for(gesture: Gesture, geometry: &PanelGeometry) -> ClientCommand {
    match gesture {
        Gesture::PickProfile(name) => ClientCommand::SetActiveProfile(name),
        Gesture::PickSecondary(SecondaryChoice::None) => ClientCommand::SetSecondaryProfile(None),
        Gesture::PickSecondary(SecondaryChoice::Profile(name)) => {
            ClientCommand::SetSecondaryProfile(Some(name))
        }
        Gesture::NudgeThreshold { id, delta } => ClientCommand::ChangeThreshold { id, delta },
        Gesture::SetFromBar { id, y } => ClientCommand::SetThreshold {
            id,
            threshold: geometry.threshold_from_y(y),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> PanelGeometry {
        PanelGeometry::new(96, 640, 1024)
    }

    #[test]
    fn test_click_top_edge_requests_sensor_max() {
        let command = command_for(Gesture::SetFromBar { id: 3, y: 0.0 }, &geometry());
        assert_eq!(
            command,
            ClientCommand::SetThreshold {
                id: 3,
                threshold: 1024,
            }
        );
    }

    #[test]
    fn test_click_bottom_edge_requests_zero() {
        let command = command_for(Gesture::SetFromBar { id: 3, y: 640.0 }, &geometry());
        assert_eq!(
            command,
            ClientCommand::SetThreshold {
                id: 3,
                threshold: 0,
            }
        );
    }

    #[test]
    fn test_nudge_maps_to_change_threshold() {
        let command = command_for(Gesture::NudgeThreshold { id: 1, delta: -1 }, &geometry());
        assert_eq!(command, ClientCommand::ChangeThreshold { id: 1, delta: -1 });
    }

    #[test]
    fn test_secondary_none_clears_explicitly() {
        let command = command_for(Gesture::PickSecondary(SecondaryChoice::None), &geometry());
        assert_eq!(command, ClientCommand::SetSecondaryProfile(None));
    }

    #[test]
    fn test_profile_picks() {
        let command = command_for(Gesture::PickProfile("Front".to_string()), &geometry());
        assert_eq!(command, ClientCommand::SetActiveProfile("Front".to_string()));

        let command = command_for(
            Gesture::PickSecondary(SecondaryChoice::Profile("Rear".to_string())),
            &geometry(),
        );
        assert_eq!(
            command,
            ClientCommand::SetSecondaryProfile(Some("Rear".to_string()))
        );
    }
}
