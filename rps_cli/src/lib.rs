use clap::{App, Arg, ArgMatches};
use log::info;
use std::default;
use std::ffi::OsString;
use std::time::Duration;

const DEBOUNCE_MS: u64 = 400;

#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub hardware: bool,
    pub mute: bool,
    pub seed: Option<u64>,
    pub debounce: Duration,
    pub verbose: bool,
}

fn is_number(val: String) -> Result<(), String> {
    val.parse::<u64>()
        .map(|_| ())
        .map_err(|_| format!("'{}' is not a non-negative integer", val))
}

impl CliConfig {
    pub fn new() -> Self {
        Self::from_matches(&Self::app().get_matches())
    }

    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self::from_matches(&Self::app().get_matches_from_safe(args)?))
    }

    fn app() -> App<'static, 'static> {
        let version = env!("CARGO_PKG_VERSION");

        App::new("Rock Paper Scissors")
            .version(version)
            .about("Rock-paper-scissors against the computer, with GPIO buttons, LEDs and a buzzer")
            .arg(
                Arg::with_name("GPIO")
                    .short("g")
                    .long("gpio")
                    .help("If specified, drive the Raspberry Pi GPIO header instead of the simulated board"),
            )
            .arg(
                Arg::with_name("MUTE")
                    .short("m")
                    .long("mute")
                    .help("If specified, the buzzer stays silent"),
            )
            .arg(
                Arg::with_name("SEED")
                    .long("seed")
                    .takes_value(true)
                    .validator(is_number)
                    .help("Seed for the computer's choices, for reproducible games"),
            )
            .arg(
                Arg::with_name("DEBOUNCE")
                    .long("debounce")
                    .takes_value(true)
                    .validator(is_number)
                    .help("Button debounce window in milliseconds [default: 400]"),
            )
            .arg(
                Arg::with_name("VERBOSE")
                    .short("v")
                    .long("verbose")
                    .help("If specified, debug output is logged"),
            )
    }

    fn from_matches(args: &ArgMatches) -> Self {
        // Validators already rejected anything that doesn't parse
        let number = |name: &str| args.value_of(name).and_then(|v| v.parse::<u64>().ok());

        Self {
            hardware: args.is_present("GPIO"),
            mute: args.is_present("MUTE"),
            seed: number("SEED"),
            debounce: Duration::from_millis(number("DEBOUNCE").unwrap_or(DEBOUNCE_MS)),
            verbose: args.is_present("VERBOSE"),
        }
    }

    pub fn log(&self) {
        info!("[Config]");

        let mut default = false;
        if self == &CliConfig::default() {
            default = true;
        }

        info!("Default: {}", default);
        info!(
            "| GPIO: {}",
            if self.hardware { "raspberry pi" } else { "simulated" }
        );
        info!("| MUTE: {}", self.mute);
        match self.seed {
            Some(seed) => info!("| SEED: {}", seed),
            None => info!("| SEED: entropy"),
        }
        info!("| DEBOUNCE: {}ms", self.debounce.as_millis());
        info!("| VERBOSE: {}", self.verbose);
    }
}

impl default::Default for CliConfig {
    fn default() -> Self {
        Self {
            hardware: false,
            mute: false,
            seed: None,
            debounce: Duration::from_millis(DEBOUNCE_MS),
            verbose: false,
        }
    }
}
