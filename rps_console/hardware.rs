use log::{debug, warn};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

use rps_cli::CliConfig;
use rps_core::{
    melody, Board, Button, Buzzer, Error, InputHandle, OutputHandle, OutputPin, PinState, Pull,
    RaspberryPi, SimulatedBoard, Tone,
};
use rps_game::{Outcome, Symbol};

use crate::constants::*;

type SharedBuzzer = Arc<Mutex<Buzzer<dyn Tone<Error = Error> + Send>>>;

pub fn melody_for(outcome: Outcome) -> &'static [u32] {
    match outcome {
        Outcome::Win => melody::WIN,
        Outcome::Loss => melody::LOSS,
        Outcome::Draw => melody::DRAW,
    }
}

/// LEDs, buttons and buzzer of the board. Owns every pin it claimed, so
/// dropping it (or calling `cleanup`) hands them back.
pub struct Hardware {
    leds: Vec<(Symbol, OutputHandle)>,
    buttons: Vec<(Button, InputHandle)>,
    buzzer: Option<SharedBuzzer>,
    playing: Arc<AtomicBool>,
}

impl Hardware {
    pub fn open(config: &CliConfig) -> Result<Self, Error> {
        let mut board: Box<dyn Board> = if config.hardware {
            Box::new(RaspberryPi::open()?)
        } else {
            Box::new(SimulatedBoard::new())
        };

        Self::new(&mut *board, !config.mute, config.debounce)
    }

    pub fn new(board: &mut dyn Board, buzzer: bool, bounce: Duration) -> Result<Self, Error> {
        // On an early return the handles claimed so far drop and release their pins
        let mut leds = Vec::new();
        for symbol in Symbol::ALL.iter() {
            leds.push((*symbol, board.output(led_pin(*symbol), PinState::Low)?));
        }

        let mut buttons = Vec::new();
        for pin in [BUTTON_SCISSORS, BUTTON_ROCK, BUTTON_PAPER].iter() {
            buttons.push((Button::new(*pin, bounce), board.input(*pin, Pull::Down)?));
        }

        let buzzer: Option<SharedBuzzer> = if buzzer {
            Some(Arc::new(Mutex::new(Buzzer::new(board.tone(BUZZER)?))))
        } else {
            None
        };

        Ok(Self {
            leds,
            buttons,
            buzzer,
            playing: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Turns every LED off. A failing LED doesn't stop the others; the
    /// first error is returned.
    pub fn reset_leds(&mut self) -> Result<(), Error> {
        let mut result = Ok(());
        for (_, led) in self.leds.iter_mut() {
            result = result.and(led.set_low());
        }
        result
    }

    /// Lights the LED of `symbol` and only that one
    pub fn show_choice(&mut self, symbol: Symbol) -> Result<(), Error> {
        self.reset_leds()?;
        match self.leds.iter_mut().find(|(s, _)| *s == symbol) {
            Some((_, led)) => led.set_high(),
            None => Err(Error::PinNotConfigured(led_pin(symbol))),
        }
    }

    /// Pins whose button completed a press since the last poll
    pub fn pressed(&mut self, now: Instant) -> Result<Vec<u8>, Error> {
        let mut pressed = Vec::new();
        for (button, pin) in self.buttons.iter_mut() {
            if button.poll(&mut **pin, now)? {
                debug!("Button on GPIO {} pressed", button.pin());
                pressed.push(button.pin());
            }
        }
        Ok(pressed)
    }

    /// Plays the outcome's melody on a blocking worker. While one is
    /// playing, further melodies are dropped rather than queued.
    pub fn play(&self, outcome: Outcome) -> Option<JoinHandle<()>> {
        let buzzer = self.buzzer.clone()?;
        if self.playing.swap(true, Ordering::SeqCst) {
            debug!("Buzzer busy, skipping the {:?} melody", outcome);
            return None;
        }

        let playing = self.playing.clone();
        let tones = melody_for(outcome);
        Some(tokio::task::spawn_blocking(move || {
            if let Err(e) = buzzer.lock().play(tones) {
                warn!("Buzzer failed: {}", e);
            }
            playing.store(false, Ordering::SeqCst);
        }))
    }

    /// LEDs off, buzzer silent, every pin released. Keeps going past
    /// failures and reports the first one.
    pub fn cleanup(&mut self) -> Result<(), Error> {
        let mut result = self.reset_leds();
        if let Some(buzzer) = self.buzzer.take() {
            // Waits out a melody in flight
            result = result.and(buzzer.lock().stop());
        }
        self.leds.clear();
        self.buttons.clear();
        result
    }
}
