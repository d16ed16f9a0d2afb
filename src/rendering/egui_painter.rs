use egui::{Align2, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use super::{DrawCommand, TextAnchor, TextWeight};
use crate::physics::Position;

/// Draws a display list with its canvas origin at `origin` in screen points.
pub fn paint(painter: &Painter, origin: Pos2, commands: &[DrawCommand]) {
    let to_screen = |p: &Position| origin + Vec2::new(p.x as f32, p.y as f32);

    for command in commands {
        match command {
            DrawCommand::FillRect { min, max, color } => {
                let rect = Rect::from_min_max(to_screen(min), to_screen(max));
                painter.rect_filled(rect, 0.0, *color);
            }
            DrawCommand::StrokeRect { min, max, width, color } => {
                painter.rect_stroke(
                    Rect::from_min_max(to_screen(min), to_screen(max)),
                    0.0,
                    Stroke::new(*width, *color),
                );
            }
            DrawCommand::Polyline { points, width, color } => {
                if points.len() < 2 {
                    continue;
                }
                let points = points.iter().map(to_screen).collect();
                painter.add(Shape::line(points, Stroke::new(*width, *color)));
            }
            DrawCommand::FillCircle { center, radius, color } => {
                painter.circle_filled(to_screen(center), *radius, *color);
            }
            DrawCommand::StrokeCircle { center, radius, width, color } => {
                painter.circle_stroke(to_screen(center), *radius, Stroke::new(*width, *color));
            }
            DrawCommand::Text { position, anchor, text, size, weight, color } => {
                let align = match anchor {
                    TextAnchor::Left => Align2::LEFT_BOTTOM,
                    TextAnchor::Center => Align2::CENTER_BOTTOM,
                    TextAnchor::Right => Align2::RIGHT_BOTTOM,
                };
                let font = match weight {
                    TextWeight::Regular => FontId::proportional(*size),
                    // egui's default fonts carry no bold face
                    TextWeight::Emphasis => FontId::proportional(*size + 1.0),
                };
                painter.text(to_screen(position), align, *text, font, (*color).into());
            }
        }
    }
}
