// args.rs - Command line arguments
//
// Chooses the automaton, the grid size and the options passed to
// `GridOptions`. The same arguments drive both the window and the headless
// runner.
//
// ```bash
// # Langton's Ant with the default "RL" rule
// cargo run --bin cells_app
//
// # A four-colour ant rule drawn at 2x zoom
// cargo run --bin cells_app -- --rule RLLR --zoom 2
//
// # 500 generations of a random soup, no window
// cargo run --bin cells_app -- life --headless --ticks 500
// ```

use std::time::Duration;

use cells::{Color, GridOptions, Result};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    /// Langton's Ant and its multi-colour rules
    Ant,
    /// Conway's Game of Life
    Life,
}

#[derive(Parser, Debug)]
#[command(about = "Cellular automata you can draw on")]
pub struct Args {
    /// Which automaton to run
    #[arg(value_enum, default_value_t = Kind::Ant)]
    pub kind: Kind,

    /// Grid width in cells
    #[arg(long, default_value_t = 200)]
    pub width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 150)]
    pub height: usize,

    /// Screen pixels per cell
    #[arg(short, long, default_value_t = 4.0)]
    pub zoom: f32,

    /// Minimum delay between steps, in milliseconds
    #[arg(short, long, default_value_t = 1)]
    pub cooldown: u64,

    /// Steps run each time the cooldown elapses
    #[arg(long, default_value_t = 1)]
    pub batch: u32,

    /// Ant turn rule over L and R
    #[arg(short, long, default_value = "RL")]
    pub rule: String,

    /// Drawing spawns ants instead of painting tiles
    #[arg(long)]
    pub chaos: bool,

    /// Run without a window and log a summary
    #[arg(long)]
    pub headless: bool,

    /// Stop after this many ticks (headless runs default to 1000)
    #[arg(short = 'n', long)]
    pub ticks: Option<u64>,

    /// Seed for the random Game of Life soup
    #[arg(long, default_value_t = 1)]
    pub seed: u64,
}

impl Args {
    /// Builds the options shared by both automata. Validation happens when the
    /// automaton is constructed.
    pub fn grid_options(&self) -> GridOptions {
        GridOptions {
            tiles: vec![Color::BLACK, Color::WHITE],
            zoom: self.zoom,
            step_cooldown: Duration::from_millis(self.cooldown),
            rule: self.rule.clone(),
            chaos: self.chaos,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.grid_options().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_grid_defaults() {
        let args = Args::parse_from(["cells"]);
        assert_eq!(args.kind, Kind::Ant);
        assert_eq!(args.grid_options(), GridOptions::default());
        assert!(!args.headless);
    }

    #[test]
    fn life_with_flags() {
        let args = Args::parse_from(["cells", "life", "--headless", "-n", "30", "--zoom", "2"]);
        assert_eq!(args.kind, Kind::Life);
        assert_eq!(args.ticks, Some(30));
        assert_eq!(args.grid_options().zoom, 2.0);
    }

    #[test]
    fn zero_zoom_is_invalid() {
        let args = Args::parse_from(["cells", "--zoom", "0"]);
        assert!(args.validate().is_err());
    }
}
