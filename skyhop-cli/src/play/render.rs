//! Terminal rendering. Every function writes to a caller-supplied writer so
//! the interactive loop can be driven from tests.
use colored::Colorize;
use skyhop_game::numbers::round_f64_to_u32;
use skyhop_game::{Airport, GameState, StatusSnapshot, TravelOption, TurnReport};
use std::io::{self, Write};

use super::commands::COMMAND_HELP;
use crate::logic::{progress_km, recommended_option};

pub const FUEL_BAR_CELLS: usize = 10;
pub const MAP_WIDTH: usize = 40;
pub const MAP_HEIGHT: usize = 30;
const MAP_LAT: (f64, f64) = (59.0, 70.0);
const MAP_LON: (f64, f64) = (20.0, 32.0);

fn to_index(value: f64) -> usize {
    usize::try_from(round_f64_to_u32(value)).unwrap_or(0)
}

/// Ten-cell gauge, e.g. `[######----]`.
#[must_use]
pub fn fuel_bar(fuel: f64, capacity: f64) -> String {
    let ratio = if capacity > 0.0 {
        (fuel / capacity).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = to_index(ratio * 10.0).min(FUEL_BAR_CELLS);
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(FUEL_BAR_CELLS - filled)
    )
}

/// Progress marker for an option: `++` at least 25 km closer, `+` at least
/// 5 km, `-` farther away, `.` otherwise.
#[must_use]
pub fn delta_mark(delta_km: f64) -> &'static str {
    if delta_km >= 25.0 {
        "++"
    } else if delta_km >= 5.0 {
        "+"
    } else if delta_km < 0.0 {
        "-"
    } else {
        "."
    }
}

fn map_cell(airport: &Airport) -> Option<(usize, usize)> {
    let (lat_min, lat_max) = MAP_LAT;
    let (lon_min, lon_max) = MAP_LON;
    if !(lat_min..=lat_max).contains(&airport.lat) || !(lon_min..=lon_max).contains(&airport.lon)
    {
        return None;
    }
    let row = to_index((lat_max - airport.lat) / (lat_max - lat_min) * 29.0);
    let col = to_index((airport.lon - lon_min) / (lon_max - lon_min) * 39.0);
    Some((row.min(MAP_HEIGHT - 1), col.min(MAP_WIDTH - 1)))
}

/// ASCII map of the playable area: `o` airport, `T` quest target, `@` player.
#[must_use]
pub fn map_lines(airports: &[Airport], here: &Airport, target: Option<&Airport>) -> Vec<String> {
    let mut grid = vec![vec!['.'; MAP_WIDTH]; MAP_HEIGHT];
    let mut mark = |airport: &Airport, glyph: char| {
        if let Some((row, col)) = map_cell(airport) {
            grid[row][col] = glyph;
        }
    };
    for airport in airports {
        mark(airport, 'o');
    }
    if let Some(target) = target {
        mark(target, 'T');
    }
    mark(here, '@');
    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

pub fn render_status<W: Write + ?Sized>(
    out: &mut W,
    status: &StatusSnapshot,
    capacity: f64,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=== Skyhop ===".bright_cyan().bold())?;
    writeln!(
        out,
        "Location: {} ({}), {}",
        status.name.bold(),
        status.icao,
        status.country
    )?;
    let bar = fuel_bar(status.fuel, capacity);
    let bar = if status.fuel < capacity * 0.25 {
        bar.red()
    } else {
        bar.green()
    };
    writeln!(out, "Fuel: {bar} {:.1} / {capacity:.1}", status.fuel)?;
    writeln!(
        out,
        "Hops: {}   Distance flown: {} km   Points: {}",
        status.hops, status.km_total, status.points
    )?;
    match (&status.quest_target, status.quest_distance) {
        (Some(target), Some(km)) => {
            writeln!(out, "Quest: fly to {} ({km} km away)", target.yellow())?;
        }
        (Some(target), None) => writeln!(out, "Quest: fly to {}", target.yellow())?,
        (None, _) => writeln!(out, "Quest: none")?,
    }
    Ok(())
}

pub fn render_options<W: Write + ?Sized>(
    out: &mut W,
    here: &Airport,
    options: &[TravelOption],
    target: Option<&Airport>,
) -> io::Result<()> {
    writeln!(out, "{}", "Destinations:".bold())?;
    if options.is_empty() {
        writeln!(out, "  (no destinations available)")?;
        return Ok(());
    }
    let recommended = recommended_option(here, options, target);
    for (idx, option) in options.iter().enumerate() {
        let number = idx + 1;
        let mark = target.map_or(".", |t| delta_mark(progress_km(here, option, t)));
        let star = if recommended == Some(number) { "*" } else { " " };
        writeln!(
            out,
            "{star}{number:>2}) {:<34} {:>6.0} km  {mark}",
            option.airport.to_string(),
            option.distance_km
        )?;
    }
    if let Some(number) = recommended {
        writeln!(out, "Recommended hop: {}", number.to_string().green())?;
    }
    Ok(())
}

pub fn render_turn<W: Write + ?Sized>(out: &mut W, report: &TurnReport) -> io::Result<()> {
    writeln!(
        out,
        "Flew to {}: {:.0} km, burned {:.1} fuel (base {:.1}, x{:.2}), {:.1} left.",
        report.destination,
        report.leg_km,
        report.burn,
        report.base_burn,
        report.fuel_factor,
        report.fuel_after
    )?;
    for line in report.event_lines() {
        writeln!(out, "{}", line.cyan())?;
    }
    Ok(())
}

pub fn render_quest_log<W: Write + ?Sized>(out: &mut W, state: &GameState) -> io::Result<()> {
    writeln!(out, "{}", "Quest log".bold())?;
    match &state.active_quest {
        Some(quest) => writeln!(out, "  Active: fly to {}", quest.target_icao)?,
        None => writeln!(out, "  Active: none")?,
    }
    if state.completed_quests.is_empty() {
        writeln!(out, "  Completed: none yet")?;
    } else {
        let done: Vec<&str> = state
            .completed_quests
            .iter()
            .map(|q| q.target_icao.as_str())
            .collect();
        writeln!(out, "  Completed ({}): {}", done.len(), done.join(", "))?;
    }
    Ok(())
}

pub fn render_map<W: Write + ?Sized>(out: &mut W, lines: &[String]) -> io::Result<()> {
    writeln!(out, "{}", "Map (@ you, T target, o airport)".bold())?;
    for line in lines {
        writeln!(out, "  {line}")?;
    }
    Ok(())
}

pub fn render_commands<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    let help: Vec<String> = COMMAND_HELP
        .iter()
        .map(|(key, what)| format!("{} {what}", key.bold()))
        .collect();
    writeln!(out, "Commands: {}", help.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuel_bar_has_ten_cells() {
        assert_eq!(fuel_bar(100.0, 100.0), "[##########]");
        assert_eq!(fuel_bar(0.0, 100.0), "[----------]");
        assert_eq!(fuel_bar(54.0, 100.0), "[#####-----]");
        assert_eq!(fuel_bar(150.0, 100.0), "[##########]");
        assert_eq!(fuel_bar(10.0, 0.0), "[----------]");
    }

    #[test]
    fn delta_marks_follow_thresholds() {
        assert_eq!(delta_mark(25.0), "++");
        assert_eq!(delta_mark(24.9), "+");
        assert_eq!(delta_mark(5.0), "+");
        assert_eq!(delta_mark(4.0), ".");
        assert_eq!(delta_mark(0.0), ".");
        assert_eq!(delta_mark(-0.1), "-");
    }

    #[test]
    fn map_places_player_and_target() {
        let here = Airport::new("EFHK", "Helsinki", "FI", 60.3172, 24.9633);
        let target = Airport::new("EFRO", "Rovaniemi", "FI", 66.5648, 25.8304);
        let outside = Airport::new("ESSA", "Arlanda", "SE", 59.65, 17.92);
        let lines = map_lines(&[here.clone(), target.clone(), outside], &here, Some(&target));
        assert_eq!(lines.len(), MAP_HEIGHT);
        assert!(lines.iter().all(|l| l.chars().count() == MAP_WIDTH));
        let count = |glyph| lines.iter().flat_map(|l| l.chars()).filter(|c| *c == glyph).count();
        assert_eq!(count('@'), 1);
        assert_eq!(count('T'), 1);
        assert_eq!(count('o'), 0, "out-of-area airport is not drawn");
        let player_row = lines.iter().position(|l| l.contains('@')).unwrap();
        let target_row = lines.iter().position(|l| l.contains('T')).unwrap();
        assert!(target_row < player_row, "north is up");
    }

    #[test]
    fn options_show_recommendation_and_marks() {
        colored::control::set_override(false);
        let here = Airport::new("HOME", "Home", "FI", 60.0, 25.0);
        let target = Airport::new("TGT", "Target", "FI", 65.0, 25.0);
        let near = Airport::new("NEAR", "Near", "FI", 60.02, 25.0);
        let far = Airport::new("FAR", "Far", "FI", 62.0, 25.0);
        let options = vec![
            TravelOption {
                distance_km: here.distance_to(&near),
                airport: near,
            },
            TravelOption {
                distance_km: here.distance_to(&far),
                airport: far,
            },
        ];
        let mut buf = Vec::new();
        render_options(&mut buf, &here, &options, Some(&target)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Far (FAR)"));
        assert!(text.contains("Recommended hop: 2"));
        assert!(text.contains("* 2)"));
        assert!(text.lines().any(|l| l.contains("Near (NEAR)") && l.ends_with(" .")));
        assert!(text.lines().any(|l| l.contains("Far (FAR)") && l.ends_with("++")));
    }

    #[test]
    fn status_mentions_quest_and_fuel() {
        colored::control::set_override(false);
        let status = StatusSnapshot {
            icao: "EFHK".into(),
            name: "Helsinki".into(),
            country: "FI".into(),
            km_total: 412,
            hops: 3,
            fuel: 72.4,
            quest_target: Some("EFOU".into()),
            quest_distance: Some(513),
            points: 1,
            system_msg: String::new(),
        };
        let mut buf = Vec::new();
        render_status(&mut buf, &status, 100.0).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Fuel: [#######---] 72.4 / 100.0"));
        assert!(text.contains("Quest: fly to EFOU (513 km away)"));
        assert!(text.contains("Distance flown: 412 km"));
    }
}
