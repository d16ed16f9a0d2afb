//! UI renderer for the import simulator
//!
//! Draws the menu bar, the case panel with the pathway buttons, the scene
//! canvas and the result overlay. Nothing here mutates the simulation;
//! user intent comes back as [`UiCommand`]s for the event loop to apply.

use crate::layout::Layout;
use crate::rendering::{self, egui_painter, RenderOptions};
use crate::scenario::{self, Pathway};
use crate::simulation::SimulationState;
use crate::ui::Clock;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiCommand {
    SelectPathway(Pathway),
    TogglePause,
    /// The canvas area changed, in logical points.
    Resize { width: f64, height: f64 },
    Exit,
}

/// Renders the whole UI for one frame and collects what the user asked for.
#[allow(clippy::too_many_arguments)]
pub fn render_ui(
    ctx: &egui::Context,
    state: Option<&SimulationState>,
    layout: &Layout,
    paused: bool,
    render_clock: &Clock,
    pathway_keys: &[Pathway],
    show_about_window: &mut bool,
    options: &RenderOptions,
) -> Vec<UiCommand> {
    let mut commands = Vec::new();

    render_menu_bar(ctx, show_about_window, &mut commands);
    render_case_panel(
        ctx,
        state,
        paused,
        render_clock,
        pathway_keys,
        &mut commands,
    );
    render_canvas(ctx, state, layout, options, &mut commands);
    if let Some(state) = state {
        render_result_overlay(ctx, state);
    }
    render_about_window(ctx, show_about_window);

    commands
}

pub fn render_menu_bar(
    ctx: &egui::Context,
    show_about_window: &mut bool,
    commands: &mut Vec<UiCommand>,
) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("Menu", |ui| {
                if ui.button("About").clicked() {
                    *show_about_window = true;
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Exit [ESC]").clicked() {
                    commands.push(UiCommand::Exit);
                }
            });
        });
    });
}

/// Case card, score and one button per bound pathway, numbered like the
/// digit keys.
pub fn render_case_panel(
    ctx: &egui::Context,
    state: Option<&SimulationState>,
    paused: bool,
    render_clock: &Clock,
    pathway_keys: &[Pathway],
    commands: &mut Vec<UiCommand>,
) {
    egui::SidePanel::left("case_panel")
        .min_width(280.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Mitochondrial Protein Import");

            ui.horizontal(|ui| {
                if paused {
                    ui.colored_label(egui::Color32::RED, "⏸ PAUSED");
                } else {
                    ui.colored_label(egui::Color32::GREEN, "▶ RUNNING");
                }
                ui.separator();
                ui.label(format!("{:.0} FPS", render_clock.get_avg_framerate()));
            });
            if ui.button(if paused { "Play" } else { "Pause" }).clicked() {
                commands.push(UiCommand::TogglePause);
            }

            ui.separator();

            let Some(state) = state else {
                ui.label("Waiting for the canvas...");
                return;
            };

            let variant = state.variant();
            ui.horizontal(|ui| {
                ui.label(format!("Case #{}", state.case_index + 1));
                ui.separator();
                ui.label(format!("Score: {}", state.score));
            });
            ui.add_space(4.0);
            ui.label(egui::RichText::new(variant.name).strong().size(18.0));
            ui.label(egui::RichText::new(variant.destination).color(variant.signal_color));
            ui.label(variant.description);

            ui.separator();
            ui.label("Choose the import route:");

            let receptive = state.phase.accepts_selection();
            for (index, &pathway) in pathway_keys.iter().enumerate() {
                let label = format!("[{}] {}", index + 1, pathway.button_label());
                let button = egui::Button::new(label);
                let response = ui
                    .add_enabled(receptive, button)
                    .on_hover_text(route_summary(pathway))
                    .on_disabled_hover_text("The protein is already on its way");
                if response.clicked() {
                    commands.push(UiCommand::SelectPathway(pathway));
                }
            }

            if let Some(selected) = state.selected {
                ui.add_space(4.0);
                ui.label(format!("Selected: {}", selected.button_label()));
            }

            ui.separator();
            ui.collapsing("🎮 Controls", |ui| {
                ui.label(format!("  [1]-[{}] - Choose a pathway", pathway_keys.len()));
                ui.label("  [SPACE] - Play/Pause simulation");
                ui.label("  [ESC] - Exit application");
            });
        });
}

/// Where a route docks and where it leaves the protein.
pub fn route_summary(pathway: Pathway) -> String {
    let machinery = match pathway.docking_complex() {
        Some(id) => scenario::complex(id).label,
        None => "small TIM chaperones",
    };
    format!(
        "Crosses TOM, then {} delivers it to the {}",
        machinery,
        scenario::zone(pathway.destination()).label
    )
}

/// The scene fills the remaining space; its size drives the layout.
fn render_canvas(
    ctx: &egui::Context,
    state: Option<&SimulationState>,
    layout: &Layout,
    options: &RenderOptions,
    commands: &mut Vec<UiCommand>,
) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(egui::Color32::WHITE))
        .show(ctx, |ui| {
            let size = ui.available_size();
            let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());

            let width = f64::from(response.rect.width());
            let height = f64::from(response.rect.height());
            if (width - layout.width).abs() > 0.5 || (height - layout.height).abs() > 0.5 {
                commands.push(UiCommand::Resize { width, height });
            }

            if let Some(state) = state {
                let display_list = rendering::build_frame(state, layout, options);
                egui_painter::paint(&painter, response.rect.min, &display_list);
            }
        });
}

fn render_result_overlay(ctx: &egui::Context, state: &SimulationState) {
    let Some(outcome) = state.phase.outcome() else {
        return;
    };
    let accent = if outcome.correct {
        egui::Color32::from_rgb(0x27, 0xae, 0x60)
    } else {
        egui::Color32::from_rgb(0xc0, 0x39, 0x2b)
    };

    egui::Window::new("Result")
        .id(egui::Id::new("result_overlay"))
        .title_bar(false)
        .anchor(egui::Align2::CENTER_TOP, [0.0, 60.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(outcome.title()).heading().color(accent));
            ui.label(outcome.message());
        });
}

pub fn render_about_window(ctx: &egui::Context, show_about_window: &mut bool) {
    if *show_about_window {
        egui::Window::new("About")
            .open(show_about_window)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("🧬 Mitochondrial Protein Import");
                ui.separator();

                ui.label("Route each precursor through TOM and on to");
                ui.label("TIM23, TIM22, the small TIMs or SAM.");

                ui.separator();

                ui.label("🔧 Technology Stack:");
                ui.label("  • egui for immediate mode GUI");
                ui.label("  • wgpu for GPU-accelerated rendering");
                ui.label("  • nalgebra for vector mathematics");
            });
    }
}
