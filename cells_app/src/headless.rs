// headless.rs - Runs an automaton on an in-memory surface with the async loop

use std::cell::RefCell;
use std::error::Error;
use std::time::Instant;

use cells::sim_loop;
use cells::{Automaton, GameOfLife, LangtonsAnt, PixelBuffer};
use tracing::info;

use crate::args::{Args, Kind};

const DEFAULT_TICKS: u64 = 1000;

pub fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let options = args.grid_options();
    let surface = PixelBuffer::new(args.width, args.height)?;
    let goal = args.ticks.unwrap_or(DEFAULT_TICKS);
    let started = Instant::now();

    match args.kind {
        Kind::Ant => {
            let mut langton = LangtonsAnt::new(surface, &options)?;
            langton.cells_mut().sim_mut().set_goal(goal);
            langton.spawn_pack(args.width as i64 / 2, args.height as i64 / 2, 10, 5);

            let langton = RefCell::new(langton);
            let ticks = runtime.block_on(sim_loop::run(&langton))?;
            let langton = langton.into_inner();
            info!(
                ticks,
                ants = langton.ants().len(),
                painted = langton.cells().grid().count_nonzero(),
                elapsed = ?started.elapsed(),
                "langton's ant finished"
            );
        }
        Kind::Life => {
            let mut life = GameOfLife::new(surface, &options)?;
            life.randomize(args.seed, 0.3);
            life.cells_mut().sim_mut().set_goal(goal);
            life.start();

            let life = RefCell::new(life);
            let ticks = runtime.block_on(sim_loop::run(&life))?;
            let life = life.into_inner();
            info!(
                ticks,
                population = life.population(),
                elapsed = ?started.elapsed(),
                "game of life finished"
            );
        }
    }
    Ok(())
}
