use crate::physics::Position;
use crate::scenario::{self, ComplexId, ZoneId};

/// Pixel size of the drawing surface and the geometry derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
}

impl Layout {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Nothing is simulated or drawn until the surface has an area.
    pub fn is_ready(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Applies a new surface size and returns the horizontal scale factor
    /// to carry in-flight positions across, if there was a previous width.
    pub fn resize(&mut self, width: f64, height: f64) -> Option<f64> {
        let old_width = self.width;
        self.width = width.max(0.0);
        self.height = height.max(0.0);

        if old_width > 0.0 && self.width > 0.0 && old_width != self.width {
            Some(self.width / old_width)
        } else {
            None
        }
    }

    pub fn zone_top(&self, id: ZoneId) -> f64 {
        scenario::zone(id).top * self.height
    }

    pub fn zone_height(&self, id: ZoneId) -> f64 {
        scenario::zone(id).height * self.height
    }

    pub fn zone_bottom(&self, id: ZoneId) -> f64 {
        self.zone_top(id) + self.zone_height(id)
    }

    pub fn zone_center_y(&self, id: ZoneId) -> f64 {
        self.zone_top(id) + self.zone_height(id) / 2.0
    }

    pub fn complex_x(&self, id: ComplexId) -> f64 {
        scenario::complex(id).x * self.width
    }

    /// Centre of a complex: its fractional x, vertically centred in its host zone.
    pub fn complex_center(&self, id: ComplexId) -> Position {
        let complex = scenario::complex(id);
        Position::new(self.complex_x(id), self.zone_center_y(complex.zone))
    }

    /// Where a new protein appears at the start of a round.
    pub fn spawn_point(&self) -> Position {
        let x = if self.width > 0.0 { self.width * 0.5 } else { 300.0 };
        Position::new(x, 20.0)
    }
}
