// Motor control module for AK60 actuators on an RLINK serial adapter
//
// Provides:
// - Fixed-width field quantization and bit packing
// - AK60 command payload layout
// - RLINK framing and checksum
// - Blocking motor session API

pub mod command;
pub mod field;
pub mod rlink;
pub mod session;

pub use command::{build_payload, Ak60Command, FIELD_LAYOUT};
pub use field::{pack, FieldSpec};
pub use rlink::{build_frame, checksum, RlinkError};
pub use session::MotorSession;
