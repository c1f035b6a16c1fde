use log::{error, info, warn};
use std::io::{self, BufRead, ErrorKind, Write};
use std::thread;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use vec_map::VecMap;

use rps_cli::CliConfig;
use rps_game::{GameSession, Round, Symbol};

mod constants;
mod display;
mod error;
mod hardware;
mod input;
mod log_init;
use constants::*;
use display::Display;
use error::ConsoleError;
use hardware::Hardware;
use input::Command;

type ChoiceHandler<W> = fn(&mut GameConsole<W>) -> Result<Round, ConsoleError>;

#[derive(Debug, PartialEq)]
enum ConsoleEvent {
    Line(String),
    InputClosed,
    Shutdown,
}

pub struct GameConsole<W: Write> {
    session: GameSession,
    hardware: Hardware,
    display: Display<W>,
    button_handlers: VecMap<ChoiceHandler<W>>,
    physical_buttons: bool,
    running: bool,
}

impl<W: Write> GameConsole<W> {
    fn new(config: &CliConfig, hardware: Hardware, display: Display<W>) -> Self {
        let session = match config.seed {
            Some(seed) => GameSession::seeded(seed),
            None => GameSession::new(),
        };

        Self {
            session,
            hardware,
            display,
            button_handlers: VecMap::new(),
            physical_buttons: config.hardware,
            running: true,
        }
    }

    fn register_button_handlers(&mut self) {
        macro_rules! register {
            ($pin:expr, $symbol:expr) => {{
                self.button_handlers
                    .insert($pin as usize, |c| c.make_choice($symbol));
            }};
        }

        register!(BUTTON_SCISSORS, Symbol::Scissors);
        register!(BUTTON_ROCK, Symbol::Rock);
        register!(BUTTON_PAPER, Symbol::Paper);
    }

    async fn start(&mut self, mut events: UnboundedReceiver<ConsoleEvent>) {
        if let Err(e) = self.display.render_idle() {
            error!("Could not draw the board: {}", e);
        }

        let mut ticker = tokio::time::interval(BUTTON_POLL_INTERVAL);
        // Core loop: every session call happens here, one at a time
        while self.running {
            tokio::select! {
                event = events.recv() => match event {
                    Some(ConsoleEvent::Line(line)) => self.handle_line(&line),
                    Some(ConsoleEvent::InputClosed) => self.handle_input_closed(),
                    Some(ConsoleEvent::Shutdown) | None => self.quit(),
                },
                _ = ticker.tick() => self.poll_buttons(),
            }
        }
    }

    fn handle_line(&mut self, line: &str) {
        if let Err(e) = self.dispatch(line) {
            error!("Input '{}' ==> {}", line.trim(), e);
        }
    }

    fn dispatch(&mut self, line: &str) -> Result<(), ConsoleError> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(()),
            Err(e) => {
                self.display
                    .error(&format!("{} (type 'help' for commands)", e))?;
                return Err(e.into());
            }
        };

        match command {
            Command::Choose(symbol) => {
                self.make_choice(symbol)?;
            }
            Command::Restart => self.reset_game()?,
            Command::Help => self.display.help()?,
            Command::Quit => self.quit(),
        }
        Ok(())
    }

    fn handle_input_closed(&mut self) {
        if !self.physical_buttons {
            info!("Input closed and no buttons attached, quitting");
            self.quit();
        } else {
            info!("Input closed, buttons only from here on");
        }
    }

    fn poll_buttons(&mut self) {
        let pressed = match self.hardware.pressed(Instant::now()) {
            Ok(pressed) => pressed,
            Err(e) => {
                error!("Reading buttons failed: {}", e);
                return;
            }
        };

        for pin in pressed {
            let handler = match self.button_handlers.get(pin as usize) {
                Some(handler) => *handler,
                None => continue,
            };
            if let Err(e) = handler(self) {
                error!("Button on GPIO {} ==> {}", pin, e);
            }
        }
    }

    pub fn make_choice(&mut self, symbol: Symbol) -> Result<Round, ConsoleError> {
        // A dead LED must not cost the player the round
        if let Err(e) = self.hardware.show_choice(symbol) {
            warn!("Could not light LED for {}: {}", symbol, e);
        }

        let round = self.session.submit_choice(symbol);
        info!(
            "{} vs {} => {:?} | W{} L{} D{} | {:.1}%",
            round.user,
            round.opponent,
            round.outcome,
            round.score.wins,
            round.score.losses,
            round.score.draws,
            round.score.win_rate()
        );

        self.hardware.play(round.outcome);
        self.display.render_round(&round)?;
        Ok(round)
    }

    pub fn reset_game(&mut self) -> Result<(), ConsoleError> {
        if let Err(e) = self.hardware.reset_leds() {
            warn!("Could not reset LEDs: {}", e);
        }
        self.session.reset();
        info!("Game restarted");
        self.display.render_idle()?;
        Ok(())
    }

    pub fn quit(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        if let Err(e) = self.hardware.cleanup() {
            error!("GPIO cleanup failed: {}", e);
        }
        info!("Bye!");
    }
}

/// Sends every line of `reader` as an event, then `InputClosed`.
/// A line that isn't valid UTF-8 is skipped; only end of input or a
/// read error ends the stream.
fn forward_lines<R: BufRead>(mut reader: R, events: &UnboundedSender<ConsoleEvent>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("Reading input failed: {}", e);
                break;
            }
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim_end_matches(&['\r', '\n'][..]),
            Err(e) => {
                warn!("Skipping input line: {}", e);
                continue;
            }
        };
        if events.send(ConsoleEvent::Line(line.to_owned())).is_err() {
            return;
        }
    }
    let _ = events.send(ConsoleEvent::InputClosed);
}

/// Forwards keyboard lines from a plain thread; blocking stdin
/// inside the runtime would hold up shutdown.
fn spawn_input_reader(events: UnboundedSender<ConsoleEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        forward_lines(stdin.lock(), &events);
    });
}

#[tokio::main]
async fn main() {
    let config = CliConfig::new();
    log_init::init(config.verbose);
    info!("Starting Rock Paper Scissors...");
    config.log();

    let hardware = Hardware::open(&config).unwrap_or_else(|e| {
        eprintln!("Error opening GPIO: {}", e);
        std::process::exit(2);
    });

    let (event_s, event_r) = mpsc::unbounded_channel();
    let shutdown = event_s.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = shutdown.send(ConsoleEvent::Shutdown);
    }) {
        warn!("Could not install the Ctrl-C handler: {}", e);
    }
    spawn_input_reader(event_s);

    let mut console = GameConsole::new(&config, hardware, Display::new(io::stdout()));
    console.register_button_handlers();
    console.start(event_r).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rps_core::{PinState, SimulatedBoard};
    use std::io::Cursor;
    use std::time::Duration;

    fn console(seed: u64) -> (GameConsole<Vec<u8>>, SimulatedBoard) {
        let config = CliConfig {
            seed: Some(seed),
            mute: true,
            ..CliConfig::default()
        };
        let board = SimulatedBoard::new();
        let hardware = Hardware::new(&mut board.clone(), !config.mute, config.debounce).unwrap();
        let mut console = GameConsole::new(&config, hardware, Display::new(Vec::new()));
        console.register_button_handlers();
        (console, board)
    }

    fn screen(console: &GameConsole<Vec<u8>>) -> String {
        String::from_utf8(console.display.get_ref().clone()).unwrap()
    }

    #[test]
    fn choice_lights_led_and_scores() {
        let (mut console, board) = console(5);
        let round = console.make_choice(Symbol::Paper).unwrap();

        assert_eq!(round.user, Symbol::Paper);
        assert_eq!(round.score.total(), 1);
        assert_eq!(board.level(LED_PAPER), Some(PinState::High));
        assert_eq!(board.level(LED_ROCK), Some(PinState::Low));
        assert_eq!(board.level(LED_SCISSORS), Some(PinState::Low));
        assert!(screen(&console).contains("User: Paper"));
        assert!(screen(&console).contains(&format!("CPU: {}", round.opponent)));
    }

    #[test]
    fn restart_clears_board() {
        let (mut console, board) = console(5);
        console.handle_line("rock");
        console.handle_line("s");
        console.handle_line("restart");

        assert_eq!(console.session.score().total(), 0);
        assert_eq!(console.session.last_user(), None);
        assert_eq!(board.level(LED_ROCK), Some(PinState::Low));
        assert_eq!(board.level(LED_SCISSORS), Some(PinState::Low));
        assert!(screen(&console).ends_with("Win rate: 0.0%\x1b[0m\n"));
    }

    #[test]
    fn bad_input_changes_nothing() {
        let (mut console, _board) = console(5);
        console.handle_line("lizard");

        assert_eq!(console.session.score().total(), 0);
        assert!(screen(&console).contains("'lizard' is not rock, paper or scissors"));
    }

    #[test]
    fn button_press_plays_bound_symbol() {
        let (mut console, board) = console(8);
        board.set_input(BUTTON_ROCK, PinState::High).unwrap();
        console.poll_buttons();
        // Still held: no second round
        console.poll_buttons();

        assert_eq!(console.session.score().total(), 1);
        assert_eq!(console.session.last_user(), Some(Symbol::Rock));
        assert_eq!(board.level(LED_ROCK), Some(PinState::High));
    }

    #[test]
    fn quit_cleans_up_once() {
        let (mut console, board) = console(1);
        console.make_choice(Symbol::Scissors).unwrap();
        console.handle_line("quit");

        assert!(!console.running);
        assert!(!board.is_configured(LED_SCISSORS));
        console.quit();
        assert!(!console.running);
    }

    #[tokio::test]
    async fn loop_stops_on_shutdown() {
        let (mut console, board) = console(2);
        let (event_s, event_r) = mpsc::unbounded_channel();
        event_s.send(ConsoleEvent::Line("p".to_owned())).unwrap();
        event_s.send(ConsoleEvent::Shutdown).unwrap();

        tokio::time::timeout(Duration::from_secs(5), console.start(event_r))
            .await
            .unwrap();

        assert_eq!(console.session.score().total(), 1);
        assert!(!board.is_configured(LED_PAPER));
    }

    #[test]
    fn bad_bytes_skip_one_line() {
        let (event_s, mut event_r) = mpsc::unbounded_channel();
        forward_lines(Cursor::new(&b"r\n\xff\np\r\nquit"[..]), &event_s);

        let mut received = Vec::new();
        while let Ok(event) = event_r.try_recv() {
            received.push(event);
        }
        assert_eq!(
            received,
            vec![
                ConsoleEvent::Line("r".to_owned()),
                ConsoleEvent::Line("p".to_owned()),
                ConsoleEvent::Line("quit".to_owned()),
                ConsoleEvent::InputClosed,
            ]
        );
    }
}
