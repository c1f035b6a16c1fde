use embedded_hal::digital::{self, InputPin, OutputPin, PinState};
use embedded_hal::pwm::{self, SetDutyCycle};
use log::trace;
use parking_lot::Mutex;
use std::sync::Arc;
use vec_map::VecMap;

use crate::board::{Board, InputHandle, OutputHandle, Pull, Tone, ToneHandle};
use crate::Error;

const PIN_COUNT: u8 = 28;
const MAX_DUTY: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Output(PinState),
    Input(PinState),
    Tone,
}

type Pins = Arc<Mutex<VecMap<Mode>>>;

/// In-memory board. Clones share the same pins, so a test (or an input
/// simulator) can keep a handle while the game owns the pins it claimed.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBoard {
    pins: Pins,
    pwm: PwmLog,
}

impl SimulatedBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drives an input pin as if the outside world changed it
    pub fn set_input(&self, pin: u8, state: PinState) -> Result<(), Error> {
        let mut pins = self.pins.lock();
        match pins.get_mut(pin as usize) {
            Some(Mode::Input(current)) => {
                *current = state;
                Ok(())
            }
            _ => Err(Error::PinNotConfigured(pin)),
        }
    }

    /// Current level of an output pin, `None` if it isn't one
    pub fn level(&self, pin: u8) -> Option<PinState> {
        match self.pins.lock().get(pin as usize) {
            Some(Mode::Output(state)) => Some(*state),
            _ => None,
        }
    }

    pub fn is_configured(&self, pin: u8) -> bool {
        self.pins.lock().contains_key(pin as usize)
    }

    /// Everything the tone pins of this board were told to do
    pub fn pwm_log(&self) -> PwmLog {
        self.pwm.clone()
    }

    fn claim(&self, pin: u8, mode: Mode) -> Result<Claim, Error> {
        if pin >= PIN_COUNT {
            return Err(Error::InvalidPin(pin));
        }

        let mut pins = self.pins.lock();
        if pins.contains_key(pin as usize) {
            return Err(Error::PinBusy(pin));
        }
        trace!("GPIO {} claimed as {:?}", pin, mode);
        pins.insert(pin as usize, mode);
        Ok(Claim {
            pin,
            pins: self.pins.clone(),
        })
    }
}

impl Board for SimulatedBoard {
    fn output(&mut self, pin: u8, initial: PinState) -> Result<OutputHandle, Error> {
        let claim = self.claim(pin, Mode::Output(initial))?;
        Ok(Box::new(SimulatedOutput { claim }))
    }

    fn input(&mut self, pin: u8, pull: Pull) -> Result<InputHandle, Error> {
        let resting = PinState::from(pull == Pull::Up);
        let claim = self.claim(pin, Mode::Input(resting))?;
        Ok(Box::new(SimulatedInput { claim }))
    }

    fn tone(&mut self, pin: u8) -> Result<ToneHandle, Error> {
        let claim = self.claim(pin, Mode::Tone)?;
        Ok(Box::new(SimulatedPwm {
            log: self.pwm.clone(),
            duty: 0,
            claim: Some(claim),
        }))
    }
}

/// Holds a pin of a [`SimulatedBoard`] and gives it back on drop
#[derive(Debug)]
struct Claim {
    pin: u8,
    pins: Pins,
}

impl Claim {
    fn read(&self) -> Result<PinState, Error> {
        match self.pins.lock().get(self.pin as usize) {
            Some(Mode::Input(state)) | Some(Mode::Output(state)) => Ok(*state),
            _ => Err(Error::PinNotConfigured(self.pin)),
        }
    }

    fn write(&self, state: PinState) -> Result<(), Error> {
        match self.pins.lock().get_mut(self.pin as usize) {
            Some(Mode::Output(current)) => {
                trace!("GPIO {} <= {:?}", self.pin, state);
                *current = state;
                Ok(())
            }
            _ => Err(Error::PinNotConfigured(self.pin)),
        }
    }
}

impl Drop for Claim {
    fn drop(&mut self) {
        trace!("GPIO {} released", self.pin);
        self.pins.lock().remove(self.pin as usize);
    }
}

#[derive(Debug)]
struct SimulatedOutput {
    claim: Claim,
}

impl digital::ErrorType for SimulatedOutput {
    type Error = Error;
}

impl OutputPin for SimulatedOutput {
    fn set_low(&mut self) -> Result<(), Error> {
        self.claim.write(PinState::Low)
    }

    fn set_high(&mut self) -> Result<(), Error> {
        self.claim.write(PinState::High)
    }
}

#[derive(Debug)]
struct SimulatedInput {
    claim: Claim,
}

impl digital::ErrorType for SimulatedInput {
    type Error = Error;
}

impl InputPin for SimulatedInput {
    fn is_high(&mut self) -> Result<bool, Error> {
        Ok(self.claim.read()? == PinState::High)
    }

    fn is_low(&mut self) -> Result<bool, Error> {
        Ok(self.claim.read()? == PinState::Low)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PwmEvent {
    Frequency(u32),
    Duty(u16),
}

/// Shared record of what a simulated tone pin was told to do
#[derive(Debug, Clone, Default)]
pub struct PwmLog {
    events: Arc<Mutex<Vec<PwmEvent>>>,
}

impl PwmLog {
    pub fn events(&self) -> Vec<PwmEvent> {
        self.events.lock().clone()
    }

    /// Frequencies that were actually sounded, in order
    pub fn played(&self) -> Vec<u32> {
        let mut freq = None;
        let mut played = Vec::new();
        for event in self.events.lock().iter() {
            match event {
                PwmEvent::Frequency(hz) => freq = Some(*hz),
                PwmEvent::Duty(0) => {}
                PwmEvent::Duty(_) => played.extend(freq),
            }
        }
        played
    }

    fn push(&self, event: PwmEvent) {
        self.events.lock().push(event);
    }
}

/// Tone output that only records what it was told to do. Duty runs 0..=100.
#[derive(Debug, Default)]
pub struct SimulatedPwm {
    log: PwmLog,
    duty: u16,
    claim: Option<Claim>,
}

impl SimulatedPwm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> PwmLog {
        self.log.clone()
    }

    pub fn duty(&self) -> u16 {
        self.duty
    }
}

impl pwm::ErrorType for SimulatedPwm {
    type Error = Error;
}

impl SetDutyCycle for SimulatedPwm {
    fn max_duty_cycle(&self) -> u16 {
        MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Error> {
        if duty > MAX_DUTY {
            return Err(Error::InvalidValue(format!("duty cycle {}/{}", duty, MAX_DUTY)));
        }
        self.duty = duty;
        self.log.push(PwmEvent::Duty(duty));
        Ok(())
    }
}

impl Tone for SimulatedPwm {
    fn set_frequency(&mut self, hz: u32) -> Result<(), Error> {
        if hz == 0 {
            return Err(Error::InvalidValue("frequency must be non-zero".to_owned()));
        }
        self.log.push(PwmEvent::Frequency(hz));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outputs() {
        let mut board = SimulatedBoard::new();
        let view = board.clone();
        let mut led = board.output(5, PinState::Low).unwrap();
        assert_eq!(view.level(5), Some(PinState::Low));

        led.set_high().unwrap();
        assert_eq!(view.level(5), Some(PinState::High));

        assert!(matches!(board.output(5, PinState::Low), Err(Error::PinBusy(5))));
        assert!(matches!(board.output(40, PinState::Low), Err(Error::InvalidPin(40))));
    }

    #[test]
    fn inputs_rest_at_pull() {
        let mut board = SimulatedBoard::new();
        let mut down = board.input(17, Pull::Down).unwrap();
        let mut up = board.input(27, Pull::Up).unwrap();
        assert!(down.is_low().unwrap());
        assert!(up.is_high().unwrap());

        board.set_input(17, PinState::High).unwrap();
        assert!(down.is_high().unwrap());
        assert!(board.set_input(5, PinState::High).is_err());
    }

    #[test]
    fn dropping_handle_releases_pin() {
        let mut board = SimulatedBoard::new();
        let led = board.output(13, PinState::High).unwrap();
        let buzzer = board.tone(18).unwrap();
        assert!(board.is_configured(13));
        assert!(board.is_configured(18));

        drop(led);
        drop(buzzer);
        assert!(!board.is_configured(13));
        assert!(!board.is_configured(18));
        assert!(board.output(13, PinState::Low).is_ok());
    }

    #[test]
    fn pwm_records() {
        let mut pwm = SimulatedPwm::new();
        let log = pwm.log();
        pwm.set_frequency(440).unwrap();
        pwm.set_duty_cycle_percent(50).unwrap();
        pwm.set_duty_cycle_fully_off().unwrap();

        assert_eq!(
            log.events(),
            vec![PwmEvent::Frequency(440), PwmEvent::Duty(50), PwmEvent::Duty(0)]
        );
        assert_eq!(log.played(), vec![440]);
        assert!(pwm.set_duty_cycle(101).is_err());
        assert!(pwm.set_frequency(0).is_err());
    }
}
