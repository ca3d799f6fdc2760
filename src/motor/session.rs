// Motor session for an AK60 behind an RLINK adapter
//
// Owns the serial transport for one motor address. Every command writes one
// frame and blocks until the fixed-size reply has been read.

use serialport::SerialPort;
use std::io::{self, Read, Write};
use std::time::Duration;
use tracing::{debug, info};

use super::command::{
    Ak60Command, DEFAULT_POSITION_KD, DEFAULT_POSITION_KP, DEFAULT_SPEED_KD, DEFAULT_TORQUE_KD,
};
use super::rlink::{
    command_frame, hex, CanPayload, Result, RlinkError, PAYLOAD_RESET, PAYLOAD_START,
    PAYLOAD_STOP, REPLY_LEN, STARTUP_MESSAGE, STARTUP_REPLY_LEN,
};
use crate::config::{DEFAULT_BAUDRATE, DEFAULT_MOTOR_ADDRESS, DEFAULT_TIMEOUT_MS};

/// Connection to a single motor
pub struct MotorSession<T: Read + Write = Box<dyn SerialPort>> {
    transport: T,
    address: u8,
}

impl MotorSession<Box<dyn SerialPort>> {
    /// Open `port_name` with default settings and talk to motor 1
    pub fn open(port_name: &str) -> Result<Self> {
        Self::connect(
            port_name,
            DEFAULT_MOTOR_ADDRESS,
            DEFAULT_BAUDRATE,
            Duration::from_millis(DEFAULT_TIMEOUT_MS),
        )
    }

    /// Open the serial port and perform the RLINK handshake
    pub fn connect(port_name: &str, address: u8, baudrate: u32, timeout: Duration) -> Result<Self> {
        info!("Opening RLINK adapter on {} at {} baud", port_name, baudrate);
        let port = serialport::new(port_name, baudrate).timeout(timeout).open()?;
        Self::with_transport(port, address)
    }
}

impl<T: Read + Write> MotorSession<T> {
    /// Perform the handshake on an already open transport
    pub fn with_transport(mut transport: T, address: u8) -> Result<Self> {
        debug!("Handshake -> {}", hex(&STARTUP_MESSAGE));
        write_frame(&mut transport, &STARTUP_MESSAGE)?;
        // Reply content is not checked
        let reply = read_reply(&mut transport, address, STARTUP_REPLY_LEN)?;
        debug!("Handshake <- {}", hex(&reply));

        info!("Connected to motor {}", address);
        Ok(Self { transport, address })
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Frame a payload, send it and wait for the reply
    pub fn send_payload(&mut self, payload: &CanPayload) -> Result<()> {
        let frame = command_frame(payload, self.address);
        debug!("Motor {} -> {}", self.address, hex(&frame));
        write_frame(&mut self.transport, &frame)?;

        let reply = read_reply(&mut self.transport, self.address, REPLY_LEN)?;
        debug!("Motor {} <- {}", self.address, hex(&reply));
        Ok(())
    }

    /// Send a full setpoint
    pub fn send(&mut self, command: &Ak60Command) -> Result<()> {
        debug!("Motor {} command: {:?}", self.address, command);
        let payload = command.payload()?;
        self.send_payload(&payload)
    }

    /// Enter motor control mode
    pub fn start(&mut self) -> Result<()> {
        info!("Starting motor {}", self.address);
        self.send_payload(&PAYLOAD_START)
    }

    /// Exit motor control mode
    pub fn stop(&mut self) -> Result<()> {
        info!("Stopping motor {}", self.address);
        self.send_payload(&PAYLOAD_STOP)
    }

    /// Set the current position as zero
    pub fn reset(&mut self) -> Result<()> {
        info!("Zeroing motor {}", self.address);
        self.send_payload(&PAYLOAD_RESET)
    }

    pub fn set_position(&mut self, position: f64, kp: f64, kd: f64) -> Result<()> {
        self.send(&Ak60Command::position(position, kp, kd))
    }

    pub fn set_speed(&mut self, speed: f64, kd: f64) -> Result<()> {
        self.send(&Ak60Command::speed(speed, kd))
    }

    pub fn set_torque(&mut self, torque: f64, kd: f64) -> Result<()> {
        self.send(&Ak60Command::torque(torque, kd))
    }

    /// `set_position` with kp = 2, kd = 0.2
    pub fn set_position_default(&mut self, position: f64) -> Result<()> {
        self.set_position(position, DEFAULT_POSITION_KP, DEFAULT_POSITION_KD)
    }

    /// `set_speed` with kd = 0.5
    pub fn set_speed_default(&mut self, speed: f64) -> Result<()> {
        self.set_speed(speed, DEFAULT_SPEED_KD)
    }

    /// `set_torque` with kd = 0.2
    pub fn set_torque_default(&mut self, torque: f64) -> Result<()> {
        self.set_torque(torque, DEFAULT_TORQUE_KD)
    }
}

fn write_frame<T: Write>(transport: &mut T, bytes: &[u8]) -> Result<()> {
    transport.write_all(bytes)?;
    transport.flush()?;
    Ok(())
}

/// Read exactly `len` bytes; a timeout is reported against `address`
fn read_reply<T: Read>(transport: &mut T, address: u8, len: usize) -> Result<Vec<u8>> {
    let mut reply = vec![0u8; len];
    transport.read_exact(&mut reply).map_err(|e| {
        if e.kind() == io::ErrorKind::TimedOut {
            RlinkError::Timeout { address }
        } else {
            RlinkError::Io(e)
        }
    })?;
    Ok(reply)
}

impl<T: Read + Write> Drop for MotorSession<T> {
    fn drop(&mut self) {
        // The transport closes when it is dropped along with the session
        info!("Disconnecting from motor {}", self.address);
    }
}
