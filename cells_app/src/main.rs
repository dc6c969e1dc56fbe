// main.rs - Desktop host for the cells automata, plus a headless runner

use std::error::Error;
use std::time::Instant;

use cells::{Automaton, GameOfLife, GridOptions, LangtonsAnt, patterns};
use clap::Parser;
use eframe::egui;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod args;
mod headless;
mod surface;
mod ui;

use args::{Args, Kind};
use surface::TextureSurface;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    args.validate()?;

    if args.headless {
        return headless::run(&args);
    }

    let app = CellsApp::new(&args)?;
    let canvas = [
        args.width as f32 * args.zoom,
        args.height as f32 * args.zoom,
    ];
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([canvas[0].max(640.0) + 20.0, canvas[1] + 140.0]),
        ..Default::default()
    };

    eframe::run_native(
        "cells",
        options,
        Box::new(|_cc| Box::new(app)),
    )?;
    Ok(())
}

/// The automaton shown in the window.
pub enum Simulation {
    Ant(LangtonsAnt<TextureSurface>),
    Life(GameOfLife<TextureSurface>),
}

impl Simulation {
    pub fn automaton(&mut self) -> &mut dyn Automaton<Surface = TextureSurface> {
        match self {
            Simulation::Ant(ant) => ant,
            Simulation::Life(life) => life,
        }
    }

    pub fn automaton_ref(&self) -> &dyn Automaton<Surface = TextureSurface> {
        match self {
            Simulation::Ant(ant) => ant,
            Simulation::Life(life) => life,
        }
    }
}

pub struct CellsApp {
    pub sim: Simulation,
    pub options: GridOptions,
    pub texture: Option<egui::TextureHandle>,
    pub batch: u32,
    pub selected_pattern: usize,
    pub seed: u64,
}

impl CellsApp {
    pub fn new(args: &Args) -> cells::Result<Self> {
        let options = args.grid_options();
        let surface = TextureSurface::new(args.width, args.height);

        let sim = match args.kind {
            Kind::Ant => {
                let mut langton = LangtonsAnt::new(surface, &options)?;
                let (cx, cy) = (args.width as i64 / 2, args.height as i64 / 2);
                langton.spawn_pack(cx, cy, 10, 5);
                Simulation::Ant(langton)
            }
            Kind::Life => {
                let mut life = GameOfLife::new(surface, &options)?;
                if let Some(pattern) = patterns::PATTERNS.last() {
                    life.spawn_centered(&pattern.lifeform());
                }
                Simulation::Life(life)
            }
        };

        let mut app = Self {
            sim,
            options,
            texture: None,
            batch: args.batch.max(1),
            selected_pattern: patterns::PATTERNS.len() - 1,
            seed: args.seed,
        };
        if let Some(goal) = args.ticks {
            app.sim.automaton().cells_mut().sim_mut().set_goal(goal);
        }
        Ok(app)
    }

    /// Runs up to `batch` steps once the cooldown has elapsed.
    pub fn update_generation(&mut self) {
        self.update_generation_at(Instant::now());
    }

    fn update_generation_at(&mut self, now: Instant) {
        let batch = self.batch;
        let automaton = self.sim.automaton();

        let mut result = automaton.advance_if_due(now);
        for _ in 1..batch {
            match result {
                Ok(true) => result = automaton.advance(),
                _ => break,
            }
        }
        // The loop has already stopped itself
        if let Err(err) = result {
            error!(%err, "step failed");
        }
    }

    pub fn apply_selected_pattern(&mut self) {
        if let (Simulation::Life(life), Some(pattern)) =
            (&mut self.sim, patterns::PATTERNS.get(self.selected_pattern))
        {
            life.reset();
            life.spawn_centered(&pattern.lifeform());
            info!(pattern = pattern.name, "applied pattern");
        }
    }

    pub fn apply_random_pattern(&mut self) {
        if let Simulation::Life(life) = &mut self.sim {
            life.randomize(self.seed, 0.3);
            self.seed = self.seed.wrapping_add(1);
        }
    }
}
