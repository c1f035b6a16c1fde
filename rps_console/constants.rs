//! BCM | Function         | Notes
//! ----+------------------+------------------------------
//!   5 | LED Scissors     | Output, starts low
//!   6 | LED Rock         | Output, starts low
//!  13 | LED Paper        | Output, starts low
//!  17 | Button Scissors  | Input, pull-down, rising edge
//!  27 | Button Rock      | Input, pull-down, rising edge
//!  22 | Button Paper     | Input, pull-down, rising edge
//!  18 | Buzzer           | Output, software PWM
use rps_game::Symbol;
use std::time::Duration;

// ----- LEDs -----
pub const LED_SCISSORS: u8 = 5;
pub const LED_ROCK: u8 = 6;
pub const LED_PAPER: u8 = 13;

// ----- Buttons -----
pub const BUTTON_SCISSORS: u8 = 17;
pub const BUTTON_ROCK: u8 = 27;
pub const BUTTON_PAPER: u8 = 22;

// ----- Buzzer -----
pub const BUZZER: u8 = 18;

pub const BUTTON_POLL_INTERVAL: Duration = Duration::from_millis(10);

pub fn led_pin(symbol: Symbol) -> u8 {
    match symbol {
        Symbol::Scissors => LED_SCISSORS,
        Symbol::Rock => LED_ROCK,
        Symbol::Paper => LED_PAPER,
    }
}
