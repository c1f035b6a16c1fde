use embedded_hal::{digital, pwm};

#[derive(Debug)]
pub enum Error {
    Board(rppal::gpio::Error),

    PinNotConfigured(u8),
    PinBusy(u8),
    InvalidPin(u8),
    Pin(String),
    InvalidValue(String),

    #[doc(hidden)]
    __Nonexhaustive,
}

impl From<rppal::gpio::Error> for Error {
    fn from(err: rppal::gpio::Error) -> Error {
        Error::Board(err)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(fmt, "{:?}", self)
    }
}

impl std::error::Error for Error {}

impl digital::Error for Error {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

impl pwm::Error for Error {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}
