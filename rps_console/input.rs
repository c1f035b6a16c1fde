use rps_game::{GameError, Symbol};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Command {
    Choose(Symbol),
    Restart,
    Quit,
    Help,
}

impl Command {
    /// Parses one line of keyboard input. Blank lines are not commands.
    pub fn parse(line: &str) -> Result<Option<Command>, GameError> {
        let word = line.trim().to_lowercase();
        let command = match word.as_str() {
            "" => return Ok(None),
            "reset" | "restart" => Command::Restart,
            "quit" | "exit" | "q" => Command::Quit,
            "help" | "h" | "?" => Command::Help,
            _ => Command::Choose(word.parse()?),
        };
        Ok(Some(command))
    }
}
