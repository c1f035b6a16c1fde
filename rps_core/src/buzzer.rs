use embedded_hal::pwm::SetDutyCycle;
use std::thread;
use std::time::Duration;

use crate::board::Tone;

/// How long each tone of a melody is held
pub const TONE_STEP: Duration = Duration::from_millis(200);
const DUTY_PERCENT: u8 = 50;

/// Tone sequences in Hz
pub mod melody {
    pub const WIN: &[u32] = &[261, 329, 391, 523];
    pub const LOSS: &[u32] = &[523, 391, 329, 261];
    pub const DRAW: &[u32] = &[261, 523];
}

pub struct Buzzer<P: Tone + ?Sized> {
    step: Duration,
    pwm: Box<P>,
}

impl<P: Tone + ?Sized> Buzzer<P> {
    pub fn new(pwm: Box<P>) -> Self {
        Self::with_step(pwm, TONE_STEP)
    }

    pub fn with_step(pwm: Box<P>, step: Duration) -> Self {
        Self { step, pwm }
    }

    /// Plays `tones` back to back, blocking until the last one ends
    pub fn play(&mut self, tones: &[u32]) -> Result<(), P::Error> {
        let result = self.sound(tones);
        // Never leave the buzzer screaming, even if a tone failed
        let stopped = self.stop();
        result.and(stopped)
    }

    pub fn stop(&mut self) -> Result<(), P::Error> {
        self.pwm.set_duty_cycle_fully_off()
    }

    fn sound(&mut self, tones: &[u32]) -> Result<(), P::Error> {
        for hz in tones.iter() {
            self.pwm.set_frequency(*hz)?;
            self.pwm.set_duty_cycle_percent(DUTY_PERCENT)?;
            thread::sleep(self.step);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{PwmEvent, PwmLog, SimulatedPwm};

    fn buzzer() -> (Buzzer<SimulatedPwm>, PwmLog) {
        let pwm = SimulatedPwm::new();
        let log = pwm.log();
        (Buzzer::with_step(Box::new(pwm), Duration::from_millis(1)), log)
    }

    #[test]
    fn plays_in_order_then_stops() {
        let (mut buzzer, log) = buzzer();
        buzzer.play(melody::WIN).unwrap();

        assert_eq!(log.played(), melody::WIN.to_vec());
        assert_eq!(log.events().last(), Some(&PwmEvent::Duty(0)));
        assert!(log
            .events()
            .iter()
            .all(|e| !matches!(e, PwmEvent::Duty(d) if *d != 0 && *d != 50)));
    }

    #[test]
    fn loss_mirrors_win() {
        let mut reversed = melody::WIN.to_vec();
        reversed.reverse();
        assert_eq!(melody::LOSS.to_vec(), reversed);
    }

    #[test]
    fn stops_after_bad_tone() {
        let (mut buzzer, log) = buzzer();
        assert!(buzzer.play(&[261, 0, 523]).is_err());

        assert_eq!(log.played(), vec![261]);
        assert_eq!(log.events().last(), Some(&PwmEvent::Duty(0)));
    }
}
