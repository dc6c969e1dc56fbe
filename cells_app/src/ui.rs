// ui.rs - Window layout, controls, and pointer forwarding

use std::time::Duration;

use cells::{Automaton, GridOptions, PointerEvent, PointerKind, patterns};
use eframe::egui;
use egui::{Color32, PointerButton, Pos2, Rect, Sense, Vec2};

use crate::{CellsApp, Simulation};

/// Browser-style button numbers: 0 primary, 1 middle, 2 secondary.
fn button_number(button: PointerButton) -> u16 {
    match button {
        PointerButton::Primary => 0,
        PointerButton::Middle => 1,
        PointerButton::Secondary => 2,
        PointerButton::Extra1 => 3,
        PointerButton::Extra2 => 4,
    }
}

/// Maps a raw egui event to a grid pointer event. Presses and moves off the
/// canvas are dropped so a drag never wraps onto the far edge; releases always
/// pass so the pen is lifted.
fn canvas_event(
    event: &egui::Event,
    canvas: Rect,
    pixels_per_point: f32,
    options: &GridOptions,
) -> Option<PointerEvent> {
    let to_grid = |pos: Pos2| {
        let rel = pos - canvas.min;
        options.to_grid(rel.x * pixels_per_point, rel.y * pixels_per_point, pixels_per_point)
    };
    match *event {
        egui::Event::PointerButton { pos, button, pressed, .. } => {
            if pressed && !canvas.contains(pos) {
                return None;
            }
            let kind = if pressed { PointerKind::Down } else { PointerKind::Up };
            let (x, y) = to_grid(pos);
            Some(PointerEvent::new(kind, x, y, button_number(button)))
        }
        egui::Event::PointerMoved(pos) if canvas.contains(pos) => {
            let (x, y) = to_grid(pos);
            Some(PointerEvent::new(PointerKind::Move, x, y, 0))
        }
        _ => None,
    }
}

impl CellsApp {
    fn to_grid(&self, ctx: &egui::Context, canvas: Rect, pos: Pos2) -> (i64, i64) {
        let ppp = ctx.pixels_per_point();
        let rel = pos - canvas.min;
        self.options.to_grid(rel.x * ppp, rel.y * ppp, ppp)
    }

    /// Feeds this frame's raw pointer events to the automaton in arrival order.
    fn forward_pointer(&mut self, ctx: &egui::Context, canvas: Rect, response: &egui::Response) {
        let ppp = ctx.pixels_per_point();
        let events = ctx.input(|i| i.events.clone());
        for event in &events {
            if let Some(pointer) = canvas_event(event, canvas, ppp, &self.options) {
                self.sim.automaton().handle_pointer(pointer);
            }
        }

        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = self.to_grid(ctx, canvas, pos);
            if response.clicked() {
                self.sim.automaton().handle_pointer(PointerEvent::new(PointerKind::Click, x, y, 0));
            } else if response.secondary_clicked() {
                self.sim.automaton().handle_pointer(PointerEvent::new(PointerKind::Click, x, y, 2));
            }
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let running = !self.sim.automaton_ref().is_stopped();
            let button_text = if running { "⏸ Pause" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                let automaton = self.sim.automaton();
                if running {
                    automaton.stop();
                } else {
                    automaton.start();
                }
            }

            if ui.button("⏹ Reset").clicked() {
                self.sim.automaton().reset();
            }

            ui.separator();

            if let Simulation::Ant(langton) = &mut self.sim {
                let mut chaos = langton.chaos();
                if ui.checkbox(&mut chaos, "Chaos").changed() {
                    langton.set_chaos(chaos);
                }
                if ui.button("🐜 Spawn pack").clicked() {
                    let cells = langton.cells();
                    let (cx, cy) = (cells.width() as i64 / 2, cells.height() as i64 / 2);
                    langton.spawn_pack(cx, cy, 10, 5);
                }
            }

            if matches!(self.sim, Simulation::Life(_)) {
                if ui.button("🎲 Random").clicked() {
                    self.apply_random_pattern();
                }

                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.apply_selected_pattern();
                }
            }

            ui.separator();
            ui.label(format!("Generation: {}", self.sim.automaton_ref().sim().ticks()));
        });

        ui.horizontal(|ui| {
            ui.label("Cooldown:");
            let automaton = self.sim.automaton();
            let mut millis = automaton.sim().cooldown().as_millis() as u64;
            if ui.add(egui::Slider::new(&mut millis, 0..=500).suffix(" ms")).changed() {
                automaton.cells_mut().sim_mut().set_cooldown(Duration::from_millis(millis));
            }

            ui.label("Steps per update:");
            ui.add(egui::Slider::new(&mut self.batch, 1..=64));
        });
    }

    fn statistics(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| match &self.sim {
            Simulation::Ant(langton) => {
                ui.label(format!("Ants: {}", langton.ants().len()));
                ui.label(format!("Painted cells: {}", langton.cells().grid().count_nonzero()));
            }
            Simulation::Life(life) => {
                let cells = life.cells();
                let total = cells.width() * cells.height();
                let live = life.population();
                ui.label(format!("Live cells: {}", live));
                ui.label(format!("Dead cells: {}", total - live));
                ui.label(format!("Population: {:.1}%", (live as f32 / total as f32) * 100.0));
            }
        });
    }
}

impl eframe::App for CellsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_generation();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.controls(ui);
            ui.separator();
            ui.label("Left button draws, right button erases. Click to spawn an ant or a cell.");
            ui.separator();

            let cells = self.sim.automaton_ref().cells();
            let size = Vec2::new(
                cells.width() as f32 * self.options.zoom,
                cells.height() as f32 * self.options.zoom,
            );
            let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
            let canvas = response.rect;

            self.forward_pointer(ctx, canvas, &response);

            let surface = self.sim.automaton().cells_mut().surface_mut();
            surface.sync(ctx, &mut self.texture);
            if let Some(texture) = &self.texture {
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                painter.image(texture.id(), canvas, uv, Color32::WHITE);
            }

            ui.separator();
            self.statistics(ui);
        });

        // Keep stepping without waiting for input
        if !self.sim.automaton_ref().is_stopped() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Rect {
        Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(40.0, 40.0))
    }

    fn press(pos: Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::default(),
        }
    }

    #[test]
    fn moves_inside_the_canvas_map_through_zoom() {
        let options = GridOptions::default();
        let event = canvas_event(&egui::Event::PointerMoved(Pos2::new(19.0, 25.0)), canvas(), 1.0, &options);
        assert_eq!(event, Some(PointerEvent::new(PointerKind::Move, 2, 1, 0)));
    }

    #[test]
    fn moves_off_the_canvas_are_dropped() {
        let options = GridOptions::default();
        for pos in [Pos2::new(5.0, 25.0), Pos2::new(19.0, 70.0), Pos2::new(-3.0, -3.0)] {
            assert_eq!(canvas_event(&egui::Event::PointerMoved(pos), canvas(), 1.0, &options), None);
        }
    }

    #[test]
    fn release_off_the_canvas_still_lifts_the_pen() {
        let options = GridOptions::default();
        let outside = Pos2::new(100.0, 100.0);
        assert_eq!(canvas_event(&press(outside, true), canvas(), 1.0, &options), None);
        let up = canvas_event(&press(outside, false), canvas(), 1.0, &options);
        assert!(matches!(up, Some(PointerEvent { kind: PointerKind::Up, .. })));
    }

    #[test]
    fn drag_past_the_edge_leaves_the_far_side_untouched() {
        let options = GridOptions::default();
        let mut life = cells::GameOfLife::new(cells::PixelBuffer::new(10, 10).unwrap(), &options).unwrap();
        let events = [
            press(Pos2::new(12.0, 22.0), true),
            egui::Event::PointerMoved(Pos2::new(12.0, 26.0)),
            egui::Event::PointerMoved(Pos2::new(2.0, 26.0)),
            press(Pos2::new(2.0, 26.0), false),
        ];
        for event in &events {
            if let Some(pointer) = canvas_event(event, canvas(), 1.0, &options) {
                life.handle_pointer(pointer);
            }
        }
        assert!(life.is_alive(0, 1));
        assert_eq!(life.population(), 1);
    }
}
