// Serial settings, motor address, demo timing
use std::time::Duration;

// RLINK adapter default serial speed
pub const DEFAULT_BAUDRATE: u32 = 921_600;

// Read timeout for replies; a missing reply surfaces as a timeout error
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

// Motor CAN address
pub const DEFAULT_MOTOR_ADDRESS: u8 = 1;

// Demo sequence pauses
pub const DEMO_SHORT_PAUSE: Duration = Duration::from_secs(1);
pub const DEMO_LONG_PAUSE: Duration = Duration::from_secs(3);

// Demo setpoints
pub const DEMO_POSITION: f64 = 10.0; // swings between -10 and +10
pub const DEMO_SPEED: f64 = -2.0;
