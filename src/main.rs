use std::time::Duration;

use ak60_rlink::config::{DEFAULT_BAUDRATE, DEFAULT_MOTOR_ADDRESS, DEFAULT_TIMEOUT_MS};
use ak60_rlink::demo::{demo_sequence, run_steps};
use ak60_rlink::motor::MotorSession;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Run the AK60 demo sequence over an RLINK serial adapter
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Serial port of the RLINK adapter, e.g. /dev/ttyUSB0
    port: String,

    /// CAN address of the motor
    #[arg(long, default_value_t = DEFAULT_MOTOR_ADDRESS)]
    motor_id: u8,

    /// Serial baud rate of the RLINK adapter
    #[arg(long, default_value_t = DEFAULT_BAUDRATE)]
    baud: u32,

    /// Reply timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,
}

fn main() {
    // Setup logging (set RUST_LOG=info or debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let result = MotorSession::connect(
        &args.port,
        args.motor_id,
        args.baud,
        Duration::from_millis(args.timeout_ms),
    )
    .and_then(|mut session| run_steps(&mut session, &demo_sequence(), true));

    if let Err(e) = result {
        eprintln!("Motor error: {}", e);
        std::process::exit(1);
    }
}
