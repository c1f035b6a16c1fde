//! ## Core
//! Hardware plumbing for the rock-paper-scissors console: pins, tone output, buttons and the buzzer.
//! Pins are [embedded-hal](https://docs.rs/embedded-hal/1) objects handed out by a [`Board`].
//! ### Modules
//! - Board (pin source trait, plus the simulated and Raspberry Pi backends)
//! - Button (rising-edge detection with debounce)
//! - Buzzer (tone sequences over a duty-cycle output)
//!
//! ### Example
//! #### Blink an LED on the simulated board
//! ```
//! use rps_core::{Board, OutputPin, PinState, SimulatedBoard};
//!
//! let mut board = SimulatedBoard::new();
//! let mut led = board.output(5, PinState::Low).unwrap();
//! led.set_high().unwrap();
//! assert_eq!(board.level(5), Some(PinState::High));
//!
//! drop(led);
//! assert!(!board.is_configured(5));
//! ```
mod board;
mod button;
mod buzzer;
mod error;
mod rpi;
mod sim;

pub use board::{Board, Checked, InputHandle, OutputHandle, Pull, Tone, ToneHandle};
pub use button::{Button, DEFAULT_BOUNCE};
pub use buzzer::{melody, Buzzer, TONE_STEP};
pub use embedded_hal::digital::{InputPin, OutputPin, PinState};
pub use embedded_hal::pwm::SetDutyCycle;
pub use error::Error;
pub use rpi::RaspberryPi;
pub use sim::{PwmEvent, PwmLog, SimulatedBoard, SimulatedPwm};
