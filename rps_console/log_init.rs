use simplelog::*;

pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Stdout belongs to the game display
    if let Err(e) = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )]) {
        eprintln!("Logger could not be initialised: {}", e);
    }
}
