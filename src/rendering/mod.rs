//! Scene rendering.
//!
//! [`build_frame`] turns the simulation state into a backend-neutral display
//! list without touching the state; [`egui_painter`] draws that list.

mod color;
pub mod egui_painter;

pub use color::Color;

use crate::layout::Layout;
use crate::physics::Position;
use crate::scenario::{DockingComplex, Pathway, ProteinVariant, Zone, ZoneId, COMPLEXES, ZONES};
use crate::simulation::{Phase, SimulationState};

const MEMBRANE_EDGE: Color = Color::rgb(0x55, 0x55, 0x55);
const ZONE_LABEL: Color = Color::rgba(0, 0, 0, 0x80);
const CHAPERONE: Color = Color::rgb(0xf3, 0x9c, 0x12);
const PAM_MOTOR: Color = Color::rgb(0xf1, 0xc4, 0x0f);

const COMPLEX_WIDTH: f64 = 40.0;
const COMPLEX_HEIGHT: f64 = 30.0;
const CHANNEL_WIDTH: f64 = 10.0;
const CHAPERONE_RADIUS: f32 = 4.0;
const HEAD_RADIUS: f32 = 4.0;
const CHAIN_WIDTH: f32 = 5.0;
const LABEL_MARGIN: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextWeight {
    Regular,
    Emphasis,
}

/// One primitive in canvas pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        min: Position,
        max: Position,
        color: Color,
    },
    StrokeRect {
        min: Position,
        max: Position,
        width: f32,
        color: Color,
    },
    Polyline {
        points: Vec<Position>,
        width: f32,
        color: Color,
    },
    FillCircle {
        center: Position,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Position,
        radius: f32,
        width: f32,
        color: Color,
    },
    Text {
        position: Position,
        anchor: TextAnchor,
        text: &'static str,
        size: f32,
        weight: TextWeight,
        color: Color,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub show_trail: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { show_trail: true }
    }
}

/// Paints the whole scene: zones, complexes, chaperones, then the protein.
/// Empty until the surface has an area.
pub fn build_frame(
    state: &SimulationState,
    layout: &Layout,
    options: &RenderOptions,
) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(64);
    if !layout.is_ready() {
        return commands;
    }

    for zone in ZONES.iter() {
        draw_zone(&mut commands, zone, layout);
    }
    for complex in COMPLEXES.iter() {
        draw_complex(&mut commands, complex, layout);
    }

    commands.extend(state.chaperones.iter().map(|chaperone| DrawCommand::FillCircle {
        center: chaperone.position,
        radius: CHAPERONE_RADIUS,
        color: CHAPERONE,
    }));

    if !state.trail.is_empty() {
        draw_protein(&mut commands, state, layout, options);
    }
    commands
}

fn draw_zone(commands: &mut Vec<DrawCommand>, zone: &Zone, layout: &Layout) {
    let top = zone.top * layout.height;
    let bottom = top + zone.height * layout.height;

    commands.push(DrawCommand::FillRect {
        min: Position::new(0.0, top),
        max: Position::new(layout.width, bottom),
        color: zone.color,
    });

    if zone.is_membrane() {
        for y in [top, bottom] {
            commands.push(DrawCommand::Polyline {
                points: vec![Position::new(0.0, y), Position::new(layout.width, y)],
                width: 1.0,
                color: MEMBRANE_EDGE,
            });
        }
    }

    // SAM sits at the right of the outer membrane, so that label goes left.
    let (position, anchor) = if zone.id == ZoneId::OuterMembrane {
        (Position::new(LABEL_MARGIN, (top + bottom) / 2.0 + 5.0), TextAnchor::Left)
    } else {
        (Position::new(layout.width - LABEL_MARGIN, bottom - 10.0), TextAnchor::Right)
    };
    commands.push(DrawCommand::Text {
        position,
        anchor,
        text: zone.label,
        size: 14.0,
        weight: TextWeight::Regular,
        color: ZONE_LABEL,
    });
}

fn draw_complex(commands: &mut Vec<DrawCommand>, complex: &DockingComplex, layout: &Layout) {
    let center = layout.complex_center(complex.id);
    let half = Position::new(COMPLEX_WIDTH / 2.0, COMPLEX_HEIGHT / 2.0);

    if complex.has_import_motor() {
        let motor = center + Position::new(15.0, COMPLEX_HEIGHT / 2.0 + 5.0);
        commands.push(DrawCommand::FillCircle {
            center: motor,
            radius: 10.0,
            color: PAM_MOTOR,
        });
        commands.push(DrawCommand::StrokeCircle {
            center: motor,
            radius: 10.0,
            width: 1.0,
            color: Color::BLACK,
        });
        commands.push(DrawCommand::Text {
            position: center + Position::new(25.0, COMPLEX_HEIGHT / 2.0 + 20.0),
            anchor: TextAnchor::Left,
            text: "PAM",
            size: 10.0,
            weight: TextWeight::Regular,
            color: Color::BLACK,
        });
    }

    commands.push(DrawCommand::FillRect {
        min: center - half,
        max: center + half,
        color: complex.color,
    });
    commands.push(DrawCommand::StrokeRect {
        min: center - half,
        max: center + half,
        width: 2.0,
        color: Color::BLACK,
    });

    let channel = Position::new(CHANNEL_WIDTH / 2.0, COMPLEX_HEIGHT / 2.0);
    commands.push(DrawCommand::FillRect {
        min: center - channel,
        max: center + channel,
        color: Color::WHITE,
    });

    commands.push(DrawCommand::Text {
        position: center + Position::new(0.0, COMPLEX_HEIGHT + 12.0),
        anchor: TextAnchor::Center,
        text: complex.label,
        size: 11.0,
        weight: TextWeight::Emphasis,
        color: Color::BLACK,
    });
}

fn draw_protein(
    commands: &mut Vec<DrawCommand>,
    state: &SimulationState,
    layout: &Layout,
    options: &RenderOptions,
) {
    let variant = state.variant();

    if let Phase::Complete { .. } = state.phase {
        match state.selected {
            Some(Pathway::TomTim22) => {
                return draw_multipass(commands, state.position.x, layout, variant)
            }
            Some(Pathway::TomSam) => {
                return draw_beta_barrel(commands, state.position.x, layout, variant)
            }
            _ => {}
        }
    }

    if options.show_trail {
        commands.push(DrawCommand::Polyline {
            points: state.trail.oldest_first().copied().collect(),
            width: CHAIN_WIDTH,
            color: variant.color,
        });
    }
    commands.push(DrawCommand::FillCircle {
        center: state.position,
        radius: HEAD_RADIUS,
        color: variant.signal_color,
    });
}

/// Resting pose of a carrier protein: a chain looping through the inner
/// membrane several times.
fn draw_multipass(
    commands: &mut Vec<DrawCommand>,
    x: f64,
    layout: &Layout,
    variant: &ProteinVariant,
) {
    let membrane_y = layout.zone_top(ZoneId::InnerMembrane);
    let points = (-20..=20)
        .map(|i| {
            let offset = f64::from(i);
            Position::new(x + offset, membrane_y + (offset * 0.5).sin() * 15.0)
        })
        .collect();
    commands.push(DrawCommand::Polyline {
        points,
        width: CHAIN_WIDTH,
        color: variant.color,
    });
}

/// Resting pose of a porin: a barrel outline with its beta strands.
fn draw_beta_barrel(
    commands: &mut Vec<DrawCommand>,
    x: f64,
    layout: &Layout,
    variant: &ProteinVariant,
) {
    let center = Position::new(x, layout.zone_top(ZoneId::OuterMembrane) + 15.0);
    commands.push(DrawCommand::StrokeRect {
        min: center - Position::new(10.0, 15.0),
        max: center + Position::new(10.0, 15.0),
        width: 4.0,
        color: variant.color,
    });
    commands.push(DrawCommand::Polyline {
        points: vec![
            center + Position::new(-8.0, -12.0),
            center + Position::new(8.0, -5.0),
            center + Position::new(-8.0, 5.0),
            center + Position::new(8.0, 12.0),
        ],
        width: 2.0,
        color: variant.color,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Outcome;

    fn layout() -> Layout {
        Layout::new(1000.0, 800.0)
    }

    fn circles_of(commands: &[DrawCommand], wanted: Color) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { color, .. } if *color == wanted))
            .count()
    }

    fn heads_at(commands: &[DrawCommand], at: Position) -> usize {
        commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    DrawCommand::FillCircle { center, radius, .. }
                        if *center == at && *radius == HEAD_RADIUS
                )
            })
            .count()
    }

    #[test]
    fn nothing_is_drawn_before_the_surface_is_ready() {
        let state = SimulationState::new(&layout());
        assert!(build_frame(&state, &Layout::default(), &RenderOptions::default()).is_empty());
    }

    #[test]
    fn static_scene_has_every_zone_and_complex() {
        let state = SimulationState::new(&layout());
        let commands = build_frame(&state, &layout(), &RenderOptions::default());

        let zone_fills = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { min, .. } if min.x == 0.0))
            .count();
        assert_eq!(zone_fills, ZONES.len());

        for complex in COMPLEXES.iter() {
            assert!(commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Text { text, .. } if *text == complex.label)));
        }
        assert_eq!(circles_of(&commands, PAM_MOTOR), 1);
    }

    #[test]
    fn protein_draws_trail_and_head_once_it_has_moved() {
        let mut state = SimulationState::new(&layout());
        let empty = build_frame(&state, &layout(), &RenderOptions::default());
        assert_eq!(heads_at(&empty, state.position), 0);

        state.trail.push(Position::new(500.0, 22.0));
        state.trail.push(Position::new(500.0, 24.0));
        let commands = build_frame(&state, &layout(), &RenderOptions::default());

        let chain = commands.iter().find_map(|c| match c {
            DrawCommand::Polyline { points, color, .. } if *color == state.variant().color => {
                Some(points)
            }
            _ => None,
        });
        assert_eq!(chain.map(|p| p[0]), Some(Position::new(500.0, 22.0)));
        assert_eq!(heads_at(&commands, state.position), 1);

        let hidden = build_frame(&state, &layout(), &RenderOptions { show_trail: false });
        assert_eq!(hidden.len(), commands.len() - 1);
    }

    #[test]
    fn completed_sam_round_draws_barrel_instead_of_head() {
        let mut state = SimulationState::new(&layout());
        state.selected = Some(Pathway::TomSam);
        state.trail.push(state.position);
        state.phase = Phase::Complete {
            tick: 0,
            outcome: Outcome::judge(Some(Pathway::TomSam), Pathway::TomTim23),
        };

        let commands = build_frame(&state, &layout(), &RenderOptions::default());
        assert_eq!(heads_at(&commands, state.position), 0);
        assert!(commands.iter().any(|c| matches!(
            c,
            DrawCommand::StrokeRect { width, color, .. }
                if *width == 4.0 && *color == state.variant().color
        )));
    }

    #[test]
    fn chaperones_are_drawn_as_orange_discs() {
        let mut state = SimulationState::new(&layout());
        let mut rng = crate::physics::SequenceRandom::constant(0.4);
        state
            .chaperones
            .spawn_batch(Position::new(500.0, 300.0), &mut rng);
        let commands = build_frame(&state, &layout(), &RenderOptions::default());
        assert_eq!(circles_of(&commands, CHAPERONE), 6);
    }
}
