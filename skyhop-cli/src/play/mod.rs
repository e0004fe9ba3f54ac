//! Interactive terminal game: main menu plus the turn loop.
pub mod commands;
pub mod render;

use anyhow::Result;
use colored::Colorize;
use log::debug;
use skyhop_game::{AirportCatalog, Game};
use std::io::{BufRead, Write};

use commands::Command;

/// Read one line; `None` on end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn prompt<W: Write + ?Sized>(out: &mut W, text: &str) -> Result<()> {
    write!(out, "{text}")?;
    out.flush()?;
    Ok(())
}

/// Show the main menu and play games until the player quits.
pub fn run_menu<C, R, W>(game: &mut Game<C>, mut input: R, out: &mut W) -> Result<()>
where
    C: AirportCatalog,
    R: BufRead,
    W: Write + ?Sized,
{
    loop {
        writeln!(out)?;
        writeln!(out, "{}", "✈  SKYHOP  ✈".bright_cyan().bold())?;
        writeln!(out, "1) Start new game")?;
        writeln!(out, "2) Quit")?;
        prompt(out, "Choose: ")?;
        let Some(line) = read_line(&mut input)? else {
            writeln!(out)?;
            return Ok(());
        };
        match line.trim().to_ascii_lowercase().as_str() {
            "1" | "s" | "start" => {
                game.start()?;
                play_game(game, &mut input, out)?;
            }
            "2" | "q" | "quit" | "exit" => {
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }
            other => writeln!(out, "Unknown choice: {other}")?,
        }
    }
}

/// Turn loop for one started game. Returns when the game ends or input runs
/// out.
pub fn play_game<C, R, W>(game: &mut Game<C>, input: &mut R, out: &mut W) -> Result<()>
where
    C: AirportCatalog,
    R: BufRead,
    W: Write + ?Sized,
{
    let capacity = game.config().start_fuel;
    let limit = game.config().option_limit;

    while game.is_running() {
        if let Some(msg) = game.take_system_msg() {
            writeln!(out, "{}", msg.yellow())?;
        }
        let status = game.status()?;
        render::render_status(out, &status, capacity)?;
        let options = game.options(limit)?;
        let Some(here) = game.state().map(|s| s.player.location.clone()) else {
            break;
        };
        let target = game.get_target_airport().cloned();
        render::render_options(out, &here, &options, target.as_ref())?;
        render::render_commands(out)?;
        prompt(out, "> ")?;

        let Some(line) = read_line(input)? else {
            game.exit_game();
            break;
        };
        let command = Command::parse(&line);
        debug!("command: {command:?}");
        match command {
            Command::Fly(index) => match game.pick(index) {
                Ok(report) => render::render_turn(out, &report)?,
                Err(err) if err.is_recoverable() => writeln!(out, "{}", err.to_string().red())?,
                Err(err) => return Err(err.into()),
            },
            Command::Map => {
                let lines = render::map_lines(game.get_airports(), &here, target.as_ref());
                render::render_map(out, &lines)?;
            }
            Command::Quests => {
                if let Some(state) = game.state() {
                    render::render_quest_log(out, state)?;
                }
            }
            Command::Refresh | Command::Empty => {}
            Command::Quit => game.exit_game(),
            Command::Unknown(text) => {
                writeln!(out, "{}", format!("Unknown command: {text}").red())?;
            }
        }
    }

    if let Some(msg) = game.take_system_msg() {
        writeln!(out, "{}", msg.yellow())?;
    }
    let status = game.status()?;
    writeln!(
        out,
        "Flight log closed: {} quests, {} hops, {} km. Thanks for flying Skyhop!",
        status.points, status.hops, status.km_total
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyhop_game::{GameConfig, JsonCatalog};
    use std::io::Cursor;

    fn run(script: &str) -> String {
        colored::control::set_override(false);
        let mut game = Game::new(
            JsonCatalog::load_from_static().unwrap(),
            GameConfig::default(),
            1337,
        );
        let mut out = Vec::new();
        run_menu(&mut game, Cursor::new(script.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn quit_from_menu() {
        let text = run("2\n");
        assert!(text.contains("SKYHOP"));
        assert!(text.contains("Goodbye!"));
    }

    #[test]
    fn commands_drive_the_loop() {
        let text = run("1\nm\nquests\nhello\n99\n1\nq\n2\n");
        assert!(text.contains("New quest: fly to"));
        assert!(text.contains("Map (@ you, T target, o airport)"));
        assert!(text.contains("Quest log"));
        assert!(text.contains("Unknown command: hello"));
        assert!(text.contains("invalid option number 99"));
        assert!(text.contains("Flew to"));
        assert!(text.contains("WEATHER UPDATE:"));
        assert!(text.contains("Thanks for flying Skyhop!"));
        assert!(text.contains("Goodbye!"));
    }

    #[test]
    fn end_of_input_closes_the_game() {
        let text = run("1\n");
        assert!(text.contains("Flight log closed: 0 quests, 0 hops, 0 km."));
    }
}
