use embedded_hal::digital::PinState;
use embedded_hal::pwm::{self, SetDutyCycle};
use log::debug;
use rppal::gpio::{Gpio, OutputPin};

use crate::board::{Board, Checked, InputHandle, OutputHandle, Pull, Tone, ToneHandle};
use crate::Error;

const SOFT_MAX_DUTY: u16 = 1000;

/// The 40-pin header of a Raspberry Pi, through `/dev/gpiomem`.
///
/// Pins are numbered BCM. rppal puts every pin back the way it found it
/// when its handle is dropped.
pub struct RaspberryPi {
    gpio: Gpio,
}

impl RaspberryPi {
    pub fn open() -> Result<Self, Error> {
        let gpio = Gpio::new()?;
        debug!("Opened GPIO header");
        Ok(Self { gpio })
    }
}

impl Board for RaspberryPi {
    fn output(&mut self, pin: u8, initial: PinState) -> Result<OutputHandle, Error> {
        let pin = self.gpio.get(pin)?;
        let pin = match initial {
            PinState::Low => pin.into_output_low(),
            PinState::High => pin.into_output_high(),
        };
        Ok(Box::new(Checked(pin)))
    }

    fn input(&mut self, pin: u8, pull: Pull) -> Result<InputHandle, Error> {
        let pin = self.gpio.get(pin)?;
        let pin = match pull {
            Pull::Off => pin.into_input(),
            Pull::Down => pin.into_input_pulldown(),
            Pull::Up => pin.into_input_pullup(),
        };
        Ok(Box::new(Checked(pin)))
    }

    fn tone(&mut self, pin: u8) -> Result<ToneHandle, Error> {
        let pin = self.gpio.get(pin)?.into_output_low();
        Ok(Box::new(SoftTone {
            pin,
            hz: 0.0,
            duty: 0,
        }))
    }
}

/// Square wave on a plain output pin, timed by rppal's software PWM thread
struct SoftTone {
    pin: OutputPin,
    hz: f64,
    duty: u16,
}

impl SoftTone {
    fn apply(&mut self) -> Result<(), Error> {
        if self.duty == 0 || self.hz == 0.0 {
            self.pin.clear_pwm()?;
            self.pin.set_low();
            return Ok(());
        }

        let fraction = f64::from(self.duty) / f64::from(SOFT_MAX_DUTY);
        self.pin.set_pwm_frequency(self.hz, fraction)?;
        Ok(())
    }
}

impl pwm::ErrorType for SoftTone {
    type Error = Error;
}

impl SetDutyCycle for SoftTone {
    fn max_duty_cycle(&self) -> u16 {
        SOFT_MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Error> {
        if duty > SOFT_MAX_DUTY {
            return Err(Error::InvalidValue(format!(
                "duty cycle {}/{}",
                duty, SOFT_MAX_DUTY
            )));
        }
        self.duty = duty;
        self.apply()
    }
}

impl Tone for SoftTone {
    fn set_frequency(&mut self, hz: u32) -> Result<(), Error> {
        if hz == 0 {
            return Err(Error::InvalidValue("frequency must be non-zero".to_owned()));
        }
        self.hz = f64::from(hz);
        if self.duty > 0 {
            self.apply()?;
        }
        Ok(())
    }
}
