//! Command message wire format.
//!
//! The robot firmware consumes one JSON text message per motion
//! command, with Portuguese field names it was built against:
//!
//! ```text
//! {"angulo":45,"velocidade":50}
//! ```
//!
//! Field names and their order are part of the wire contract — the
//! struct below must keep `angulo` declared before `velocidade`.
//! Messages are fire-and-forget: no sequence numbers, no
//! acknowledgements.

use serde::{Deserialize, Serialize};

use crate::error::GestoError;
use crate::gesture::MotionIntent;

/// One motion command as it travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMessage {
    /// Direction of travel in degrees.
    pub angulo: u16,
    /// Drive speed, `0..=100`.
    pub velocidade: u8,
}

impl CommandMessage {
    /// Serialize to the exact JSON text the firmware expects.
    pub fn to_json(&self) -> Result<String, GestoError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<MotionIntent> for CommandMessage {
    fn from(intent: MotionIntent) -> Self {
        Self {
            angulo: intent.angle,
            velocidade: intent.speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_is_exact() {
        let msg = CommandMessage::from(MotionIntent::FORWARD);
        assert_eq!(msg.to_json().unwrap(), r#"{"angulo":0,"velocidade":50}"#);

        let msg = CommandMessage::from(MotionIntent::TURN_THUMB_SIDE);
        assert_eq!(msg.to_json().unwrap(), r#"{"angulo":45,"velocidade":50}"#);
    }

    #[test]
    fn intent_fields_carry_over() {
        let msg = CommandMessage::from(MotionIntent::TURN_PINKY_SIDE);
        assert_eq!(msg.angulo, 135);
        assert_eq!(msg.velocidade, 50);
    }

    #[test]
    fn parses_firmware_style_body() {
        let msg: CommandMessage = serde_json::from_str(r#"{"angulo":135,"velocidade":50}"#).unwrap();
        assert_eq!(msg, CommandMessage::from(MotionIntent::TURN_PINKY_SIDE));
    }
}
