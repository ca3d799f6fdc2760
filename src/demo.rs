// Demo command sequence: start, zero, swing between two positions, spin, stop

use std::io::{Read, Write};
use std::thread::sleep;
use std::time::Duration;
use tracing::info;

use crate::config::{DEMO_LONG_PAUSE, DEMO_POSITION, DEMO_SHORT_PAUSE, DEMO_SPEED};
use crate::motor::rlink::Result;
use crate::motor::MotorSession;

/// One step of a scripted command sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DemoStep {
    Start,
    Stop,
    Reset,
    Position(f64),
    Speed(f64),
    Torque(f64),
    Pause(Duration),
}

/// The sequence the binary runs
pub fn demo_sequence() -> Vec<DemoStep> {
    use DemoStep::*;

    let mut steps = vec![Start, Pause(DEMO_SHORT_PAUSE), Reset, Pause(DEMO_SHORT_PAUSE)];
    for _ in 0..2 {
        steps.extend([
            Position(-DEMO_POSITION),
            Pause(DEMO_SHORT_PAUSE),
            Position(DEMO_POSITION),
            Pause(DEMO_SHORT_PAUSE),
        ]);
    }
    steps.extend([
        Speed(DEMO_SPEED),
        Pause(DEMO_LONG_PAUSE),
        Speed(DEMO_SPEED),
        Pause(DEMO_LONG_PAUSE),
        Stop,
    ]);
    steps
}

/// Run `steps` in order, stopping at the first transport error.
///
/// Setpoints use the default gains. Pauses are skipped when `pause` is false.
pub fn run_steps<T: Read + Write>(
    session: &mut MotorSession<T>,
    steps: &[DemoStep],
    pause: bool,
) -> Result<()> {
    for (i, step) in steps.iter().enumerate() {
        info!("Step {}/{}: {:?}", i + 1, steps.len(), step);
        match *step {
            DemoStep::Start => session.start()?,
            DemoStep::Stop => session.stop()?,
            DemoStep::Reset => session.reset()?,
            DemoStep::Position(p) => session.set_position_default(p)?,
            DemoStep::Speed(s) => session.set_speed_default(s)?,
            DemoStep::Torque(t) => session.set_torque_default(t)?,
            DemoStep::Pause(d) => {
                if pause {
                    sleep(d);
                }
            }
        }
    }
    Ok(())
}
