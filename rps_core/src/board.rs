use embedded_hal::digital::{self, InputPin, OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;
use std::fmt;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pull {
    Off,
    Down,
    Up,
}

/// A duty-cycle output whose frequency can be changed, i.e. something a
/// buzzer can sing on
pub trait Tone: SetDutyCycle {
    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error>;
}

pub type OutputHandle = Box<dyn OutputPin<Error = Error> + Send>;
pub type InputHandle = Box<dyn InputPin<Error = Error> + Send>;
pub type ToneHandle = Box<dyn Tone<Error = Error> + Send>;

/// Hands out pins by BCM number. A pin stays claimed for as long as its
/// handle lives and is released when the handle is dropped.
pub trait Board {
    fn output(&mut self, pin: u8, initial: PinState) -> Result<OutputHandle, Error>;
    fn input(&mut self, pin: u8, pull: Pull) -> Result<InputHandle, Error>;
    fn tone(&mut self, pin: u8) -> Result<ToneHandle, Error>;
}

/// Wraps a pin from another HAL so its errors come out as [`Error`]
#[derive(Debug)]
pub struct Checked<P>(pub P);

fn pin_error<E: fmt::Debug>(err: E) -> Error {
    Error::Pin(format!("{:?}", err))
}

impl<P> digital::ErrorType for Checked<P> {
    type Error = Error;
}

impl<P: OutputPin> OutputPin for Checked<P> {
    fn set_low(&mut self) -> Result<(), Error> {
        OutputPin::set_low(&mut self.0).map_err(pin_error)
    }

    fn set_high(&mut self) -> Result<(), Error> {
        OutputPin::set_high(&mut self.0).map_err(pin_error)
    }
}

impl<P: InputPin> InputPin for Checked<P> {
    fn is_high(&mut self) -> Result<bool, Error> {
        InputPin::is_high(&mut self.0).map_err(pin_error)
    }

    fn is_low(&mut self) -> Result<bool, Error> {
        InputPin::is_low(&mut self.0).map_err(pin_error)
    }
}
