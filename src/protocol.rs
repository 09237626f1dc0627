//! Line-oriented text protocol for driving a game from another program.
//!
//! The framing follows GTP: each request is an optional numeric id, a
//! command, and its arguments. Each response is `=id message` on success or
//! `?id error` on failure, followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <n>` - start over on an `n`x`n` board
//! - `clear_board` - start over on the current size
//! - `play <action>` - apply an action for the side to move (`D4`, `N@D4`, `D4-E5`)
//! - `genmove` - let the agent choose and play for the side to move
//! - `showboard`, `score`
//! - `seed <u64>` - make the agent's choices reproducible
//! - `snapshot` - the current position as JSON

use std::io::{self, BufRead, Write};

use log::{debug, warn};

use crate::action::Action;
use crate::agent::Agent;
use crate::constants::{BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::game::Game;

const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "score",
    "seed",
    "showboard",
    "snapshot",
    "version",
];

/// Protocol session: one game and the agent that answers `genmove`.
pub struct Engine {
    game: Game,
    agent: Agent,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Engine {
    /// Create an engine on the default board. With a seed, `genmove`
    /// answers are reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let game = Game::new(BOARD_SIZE);
        let agent = match seed {
            Some(seed) => Agent::with_seed(game.turn(), seed),
            None => Agent::new(game.turn()),
        };
        Self { game, agent }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Serve requests from `input` until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = parse_id(line);
            let mut parts = command_line.split_whitespace();
            let Some(command) = parts.next() else {
                continue;
            };
            let command = command.to_lowercase();
            let args: Vec<&str> = parts.collect();

            let (success, message) = self.execute(&command, &args);
            if !success {
                debug!("{command} failed: {message}");
            }
            let prefix = if success { '=' } else { '?' };
            let id = id.map(|i| i.to_string()).unwrap_or_default();
            write!(output, "{prefix}{id} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Execute one command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "boardsize" => match args.first().map(|a| a.parse::<usize>()) {
                None => (false, "missing argument".to_string()),
                Some(Ok(size)) if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) => {
                    self.reset(size);
                    (true, String::new())
                }
                Some(Ok(size)) => (
                    false,
                    format!(
                        "unacceptable size {size}, expected {MIN_BOARD_SIZE} to {MAX_BOARD_SIZE}"
                    ),
                ),
                Some(Err(_)) => (false, "invalid size".to_string()),
            },

            "clear_board" => {
                self.reset(self.game.board().size());
                (true, String::new())
            }

            "play" => {
                let Some(text) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let action: Action = match text.parse() {
                    Ok(a) => a,
                    Err(e) => return (false, e.to_string()),
                };
                match self.game.apply(action) {
                    Ok(applied) => {
                        let note = self.win_note(applied.win_line.is_some());
                        (true, note.unwrap_or_default())
                    }
                    Err(e) => (false, format!("illegal action: {e}")),
                }
            }

            "genmove" => self.genmove(),

            "showboard" => (true, format!("\n{}", self.game.board())),

            "score" => {
                let score = self.game.score();
                (true, format!("black {} white {}", score.black, score.white))
            }

            "seed" => match args.first().map(|a| a.parse::<u64>()) {
                Some(Ok(seed)) => {
                    self.agent.reseed(seed);
                    (true, String::new())
                }
                Some(Err(_)) => (false, "invalid seed".to_string()),
                None => (false, "missing argument".to_string()),
            },

            "snapshot" => match serde_json::to_string(&self.game.snapshot()) {
                Ok(json) => (true, json),
                Err(e) => (false, e.to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn reset(&mut self, size: usize) {
        self.game = Game::new(size);
        self.agent.clear_history();
    }

    fn genmove(&mut self) -> (bool, String) {
        if self.game.is_over() {
            return (false, "game is over".to_string());
        }
        self.agent.set_side(self.game.turn());
        let Some(action) = self.agent.choose_action(&self.game.snapshot()) else {
            return (true, "none".to_string());
        };
        match self.game.apply(action) {
            Ok(applied) => match self.win_note(applied.win_line.is_some()) {
                Some(note) => (true, format!("{action} {note}")),
                None => (true, action.to_string()),
            },
            Err(e) => {
                warn!("agent chose an illegal action {action}: {e}");
                (false, format!("illegal action: {e}"))
            }
        }
    }

    fn win_note(&self, won: bool) -> Option<String> {
        self.game.winner().filter(|_| won).map(|side| format!("{side} wins"))
    }
}

/// Split an optional numeric id off the start of a request line.
fn parse_id(line: &str) -> (Option<u32>, &str) {
    let trimmed = line.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if end == 0 {
        return (None, trimmed);
    }
    match trimmed[..end].parse::<u32>() {
        Ok(id) => (Some(id), trimmed[end..].trim()),
        Err(_) => (None, trimmed),
    }
}
