use std::time::{Duration, Instant};

use embedded_hal::digital::InputPin;

/// Window in which further presses of the same button are ignored
pub const DEFAULT_BOUNCE: Duration = Duration::from_millis(400);

/// Turns sampled pin levels into discrete presses.
///
/// A press is a Low -> High transition (pull-down wiring). After a press,
/// any further rising edge inside the bounce window is swallowed.
#[derive(Debug)]
pub struct Button {
    pin: u8,
    bounce: Duration,
    last_high: bool,
    last_press: Option<Instant>,
}

impl Button {
    pub fn new(pin: u8, bounce: Duration) -> Self {
        Self {
            pin,
            bounce,
            last_high: false,
            last_press: None,
        }
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Feeds one sample, returns whether it completes a press
    pub fn update(&mut self, high: bool, now: Instant) -> bool {
        let rising = !self.last_high && high;
        self.last_high = high;
        if !rising {
            return false;
        }

        if let Some(last) = self.last_press {
            if now.saturating_duration_since(last) < self.bounce {
                return false;
            }
        }
        self.last_press = Some(now);
        true
    }

    /// Samples `pin` once
    pub fn poll<P>(&mut self, pin: &mut P, now: Instant) -> Result<bool, P::Error>
    where
        P: InputPin + ?Sized,
    {
        let high = pin.is_high()?;
        Ok(self.update(high, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, PinState, Pull, SimulatedBoard};

    fn ms(start: Instant, offset: u64) -> Instant {
        start + Duration::from_millis(offset)
    }

    #[test]
    fn single_press() {
        let start = Instant::now();
        let mut button = Button::new(17, DEFAULT_BOUNCE);
        assert!(!button.update(false, start));
        assert!(button.update(true, ms(start, 10)));
        // Held down: no new edge
        assert!(!button.update(true, ms(start, 20)));
        assert!(!button.update(false, ms(start, 500)));
    }

    #[test]
    fn bounce_is_swallowed() {
        let start = Instant::now();
        let mut button = Button::new(17, DEFAULT_BOUNCE);
        assert!(button.update(true, start));
        assert!(!button.update(false, ms(start, 5)));
        assert!(!button.update(true, ms(start, 12)));
        assert!(!button.update(false, ms(start, 300)));
        assert!(!button.update(true, ms(start, 399)));
        assert!(!button.update(false, ms(start, 420)));
        assert!(button.update(true, ms(start, 450)));
    }

    #[test]
    fn polls_board() {
        let start = Instant::now();
        let mut board = SimulatedBoard::new();
        let mut pin = board.input(22, Pull::Down).unwrap();

        let mut button = Button::new(22, DEFAULT_BOUNCE);
        assert!(!button.poll(&mut *pin, start).unwrap());
        board.set_input(22, PinState::High).unwrap();
        assert!(button.poll(&mut *pin, ms(start, 10)).unwrap());
        assert!(!button.poll(&mut *pin, ms(start, 20)).unwrap());
    }
}
