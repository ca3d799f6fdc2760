// AK60 command encoding
// Maps a (position, speed, kp, kd, torque) setpoint onto the 8-byte CAN payload.

use serde::{Deserialize, Serialize};

use super::field::{pack, FieldSpec};
use super::rlink::{CanPayload, Result, PAYLOAD_LEN};

pub const POSITION: FieldSpec = FieldSpec::new(16, -95.5, 95.5);
pub const SPEED: FieldSpec = FieldSpec::new(12, -45.0, 45.0);
pub const KP: FieldSpec = FieldSpec::new(12, 0.0, 500.0);
pub const KD: FieldSpec = FieldSpec::new(12, 0.0, 5.0);
// Unverified against the datasheet, may be -9..9
pub const TORQUE: FieldSpec = FieldSpec::new(12, -18.0, 18.0);

/// Payload field layout, in wire order
pub const FIELD_LAYOUT: [(&str, FieldSpec); 5] = [
    ("position", POSITION),
    ("speed", SPEED),
    ("kp", KP),
    ("kd", KD),
    ("torque", TORQUE),
];

const _: () = {
    let mut total = 0;
    let mut i = 0;
    while i < FIELD_LAYOUT.len() {
        total += FIELD_LAYOUT[i].1.bits();
        i += 1;
    }
    assert!(total as usize == PAYLOAD_LEN * 8, "field layout must fill the payload");
};

/// Default gains used by the single-quantity setters
pub const DEFAULT_POSITION_KP: f64 = 2.0;
pub const DEFAULT_POSITION_KD: f64 = 0.2;
pub const DEFAULT_SPEED_KD: f64 = 0.5;
pub const DEFAULT_TORQUE_KD: f64 = 0.2;

/// Full setpoint for one motor
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ak60Command {
    pub position: f64,
    pub speed: f64,
    pub kp: f64,
    pub kd: f64,
    pub torque: f64,
}

impl Ak60Command {
    pub fn new(position: f64, speed: f64, kp: f64, kd: f64, torque: f64) -> Self {
        Self {
            position,
            speed,
            kp,
            kd,
            torque,
        }
    }

    /// Position hold with stiffness `kp` and damping `kd`
    pub fn position(position: f64, kp: f64, kd: f64) -> Self {
        Self {
            position,
            kp,
            kd,
            ..Self::default()
        }
    }

    /// Velocity control, damping only
    pub fn speed(speed: f64, kd: f64) -> Self {
        Self {
            speed,
            kd,
            ..Self::default()
        }
    }

    /// Feed-forward torque with damping
    pub fn torque(torque: f64, kd: f64) -> Self {
        Self {
            torque,
            kd,
            ..Self::default()
        }
    }

    /// Values in the same order as `FIELD_LAYOUT`
    pub fn values(&self) -> [f64; 5] {
        [self.position, self.speed, self.kp, self.kd, self.torque]
    }

    /// Quantized `(code, bits)` for every field, in wire order
    pub fn fields(&self) -> [(u32, u32); 5] {
        let values = self.values();
        std::array::from_fn(|i| {
            let spec = FIELD_LAYOUT[i].1;
            (spec.quantize(values[i]), spec.bits())
        })
    }

    /// Encode into the 8-byte CAN payload
    pub fn payload(&self) -> Result<CanPayload> {
        let bytes = pack(&self.fields())?;
        let mut payload = [0u8; PAYLOAD_LEN];
        payload.copy_from_slice(&bytes);
        Ok(payload)
    }
}

/// Quantize and pack one setpoint
pub fn build_payload(
    position: f64,
    speed: f64,
    kp: f64,
    kd: f64,
    torque: f64,
) -> Result<CanPayload> {
    Ak60Command::new(position, speed, kp, kd, torque).payload()
}
