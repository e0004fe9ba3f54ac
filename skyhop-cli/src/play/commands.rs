/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fly to the numbered option (1-based).
    Fly(usize),
    Map,
    Quests,
    Refresh,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if let Ok(index) = trimmed.parse::<usize>() {
            return Self::Fly(index);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "m" | "map" => Self::Map,
            "quests" | "quest" | "questlog" => Self::Quests,
            "r" | "i" | "refresh" => Self::Refresh,
            "q" | "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(trimmed.to_string()),
        }
    }
}

/// Help lines shown under the option list.
pub const COMMAND_HELP: [(&str, &str); 5] = [
    ("1-N", "fly to that destination"),
    ("m", "show the map"),
    ("quests", "show the quest log"),
    ("r", "refresh the screen"),
    ("q", "quit the game"),
];
