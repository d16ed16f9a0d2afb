//! Static catalogue for the import scenario.
//!
//! Zones are horizontal bands given as fractions of the drawing surface
//! height, docking complexes sit at a fractional x inside a host zone, and
//! protein variants are served round-robin, one per case.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::rendering::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneId {
    Cytosol,
    OuterMembrane,
    IntermembraneSpace,
    InnerMembrane,
    Matrix,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub id: ZoneId,
    /// Top edge as a fraction of the surface height.
    pub top: f64,
    /// Band height as a fraction of the surface height.
    pub height: f64,
    pub color: Color,
    pub label: &'static str,
}

impl Zone {
    pub fn is_membrane(&self) -> bool {
        matches!(self.id, ZoneId::OuterMembrane | ZoneId::InnerMembrane)
    }
}

/// Drawing order is top to bottom.
pub const ZONES: [Zone; 5] = [
    Zone {
        id: ZoneId::Cytosol,
        top: 0.0,
        height: 0.25,
        color: Color::rgb(0xf9, 0xf9, 0xf9),
        label: "Cytosol",
    },
    Zone {
        id: ZoneId::OuterMembrane,
        top: 0.25,
        height: 0.05,
        color: Color::rgb(0x95, 0xa5, 0xa6),
        label: "Outer Membrane",
    },
    Zone {
        id: ZoneId::IntermembraneSpace,
        top: 0.30,
        height: 0.20,
        color: Color::rgb(0xff, 0xf9, 0xc4),
        label: "Intermembrane Space",
    },
    Zone {
        id: ZoneId::InnerMembrane,
        top: 0.50,
        height: 0.05,
        color: Color::rgb(0x7f, 0x8c, 0x8d),
        label: "Inner Membrane",
    },
    Zone {
        id: ZoneId::Matrix,
        top: 0.55,
        height: 0.45,
        color: Color::rgb(0xe8, 0xf6, 0xf3),
        label: "Matrix",
    },
];

pub fn zone(id: ZoneId) -> &'static Zone {
    match id {
        ZoneId::Cytosol => &ZONES[0],
        ZoneId::OuterMembrane => &ZONES[1],
        ZoneId::IntermembraneSpace => &ZONES[2],
        ZoneId::InnerMembrane => &ZONES[3],
        ZoneId::Matrix => &ZONES[4],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplexId {
    Tom,
    Sam,
    Tim23,
    Tim22,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockingComplex {
    pub id: ComplexId,
    /// Horizontal centre as a fraction of the surface width.
    pub x: f64,
    pub zone: ZoneId,
    pub color: Color,
    pub label: &'static str,
}

impl DockingComplex {
    /// TIM23 hands its cargo to the PAM import motor on the matrix side.
    pub fn has_import_motor(&self) -> bool {
        self.id == ComplexId::Tim23
    }
}

const OUTER_MEMBRANE_BLUE: Color = Color::rgb(0x34, 0x98, 0xdb);
const INNER_MEMBRANE_GREEN: Color = Color::rgb(0x2e, 0xcc, 0x71);

pub const COMPLEXES: [DockingComplex; 4] = [
    DockingComplex {
        id: ComplexId::Tom,
        x: 0.5,
        zone: ZoneId::OuterMembrane,
        color: OUTER_MEMBRANE_BLUE,
        label: "TOM",
    },
    DockingComplex {
        id: ComplexId::Sam,
        x: 0.85,
        zone: ZoneId::OuterMembrane,
        color: OUTER_MEMBRANE_BLUE,
        label: "SAM",
    },
    DockingComplex {
        id: ComplexId::Tim23,
        x: 0.5,
        zone: ZoneId::InnerMembrane,
        color: INNER_MEMBRANE_GREEN,
        label: "TIM23",
    },
    DockingComplex {
        id: ComplexId::Tim22,
        x: 0.2,
        zone: ZoneId::InnerMembrane,
        color: INNER_MEMBRANE_GREEN,
        label: "TIM22",
    },
];

pub fn complex(id: ComplexId) -> &'static DockingComplex {
    match id {
        ComplexId::Tom => &COMPLEXES[0],
        ComplexId::Sam => &COMPLEXES[1],
        ComplexId::Tim23 => &COMPLEXES[2],
        ComplexId::Tim22 => &COMPLEXES[3],
    }
}

/// One of the four routes a protein can take after crossing TOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pathway {
    TomTim23,
    TomTim22,
    TomSmallTims,
    TomSam,
}

impl Pathway {
    pub const ALL: [Pathway; 4] = [
        Pathway::TomTim23,
        Pathway::TomTim22,
        Pathway::TomSmallTims,
        Pathway::TomSam,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Pathway::TomTim23 => "tom_tim23",
            Pathway::TomTim22 => "tom_tim22",
            Pathway::TomSmallTims => "tom_small_tims",
            Pathway::TomSam => "tom_sam",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Pathway::TomTim23 => "TOM -> TIM23 (Matrix)",
            Pathway::TomTim22 => "TOM -> TIM22 (Inner Membrane)",
            Pathway::TomSmallTims => "TOM -> small TIMs (IMS)",
            Pathway::TomSam => "TOM -> SAM (Outer Membrane)",
        }
    }

    /// The complex that finishes the route, if any. The IMS route ends in
    /// free solution held by small TIM chaperones.
    pub fn docking_complex(self) -> Option<ComplexId> {
        match self {
            Pathway::TomTim23 => Some(ComplexId::Tim23),
            Pathway::TomTim22 => Some(ComplexId::Tim22),
            Pathway::TomSmallTims => None,
            Pathway::TomSam => Some(ComplexId::Sam),
        }
    }

    pub fn destination(self) -> ZoneId {
        match self {
            Pathway::TomTim23 => ZoneId::Matrix,
            Pathway::TomTim22 => ZoneId::InnerMembrane,
            Pathway::TomSmallTims => ZoneId::IntermembraneSpace,
            Pathway::TomSam => ZoneId::OuterMembrane,
        }
    }

    /// Routes that recruit small TIM chaperones in the intermembrane space.
    pub fn recruits_chaperones(self) -> bool {
        matches!(self, Pathway::TomTim22 | Pathway::TomSmallTims)
    }
}

impl fmt::Display for Pathway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pathway identifier `{0}`")]
pub struct ParsePathwayError(pub String);

impl FromStr for Pathway {
    type Err = ParsePathwayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pathway::ALL
            .into_iter()
            .find(|pathway| pathway.id() == s)
            .ok_or_else(|| ParsePathwayError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProteinVariant {
    /// The pathway that delivers this protein to its home compartment.
    pub pathway: Pathway,
    pub name: &'static str,
    pub destination: &'static str,
    pub description: &'static str,
    pub color: Color,
    pub signal_color: Color,
}

const PRECURSOR_RED: Color = Color::rgb(0xe7, 0x4c, 0x3c);

pub const PROTEIN_VARIANTS: [ProteinVariant; 4] = [
    ProteinVariant {
        pathway: Pathway::TomTim23,
        name: "Matrix Enzyme",
        destination: "Target: Matrix",
        description: "Has N-terminal presequence. Needs to cross both membranes to reach the core.",
        color: PRECURSOR_RED,
        signal_color: Color::rgb(0xf1, 0xc4, 0x0f),
    },
    ProteinVariant {
        pathway: Pathway::TomTim22,
        name: "Carrier Protein",
        destination: "Target: Inner Membrane",
        description: "Multipass hydrophobic protein. Needs to be inserted into the Inner Membrane.",
        color: PRECURSOR_RED,
        signal_color: Color::rgb(0x2e, 0xcc, 0x71),
    },
    ProteinVariant {
        pathway: Pathway::TomSmallTims,
        name: "IMS Chaperone",
        destination: "Target: Intermembrane Space",
        description: "Cysteine-rich protein. Needs to be kept in the space between membranes.",
        color: PRECURSOR_RED,
        signal_color: Color::rgb(0xf3, 0x9c, 0x12),
    },
    ProteinVariant {
        pathway: Pathway::TomSam,
        name: "Beta-Barrel Porin",
        destination: "Target: Outer Membrane",
        description: "Beta-sheet structure. Needs to insert into the Outer Membrane.",
        color: PRECURSOR_RED,
        signal_color: Color::rgb(0x9b, 0x59, 0xb6),
    },
];

/// Round-robin: case `n` gets variant `n % len`.
pub fn variant_for_case(case_index: usize) -> &'static ProteinVariant {
    &PROTEIN_VARIANTS[case_index % PROTEIN_VARIANTS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zones_tile_the_surface_without_gaps() {
        let mut expected_top = 0.0;
        for zone in ZONES.iter() {
            assert!(
                (zone.top - expected_top).abs() < 1e-9,
                "{} starts at {}",
                zone.label,
                zone.top
            );
            expected_top += zone.height;
        }
        assert!((expected_top - 1.0).abs() < 1e-9);
    }

    #[test]
    fn lookups_agree_with_tables() {
        for z in ZONES.iter() {
            assert_eq!(zone(z.id).id, z.id);
        }
        for c in COMPLEXES.iter() {
            assert_eq!(complex(c.id).id, c.id);
        }
        assert!(zone(ZoneId::OuterMembrane).is_membrane());
        assert!(!zone(ZoneId::Matrix).is_membrane());
        assert!(complex(ComplexId::Tim23).has_import_motor());
    }

    #[test]
    fn pathway_ids_parse_back() {
        for pathway in Pathway::ALL {
            assert_eq!(pathway.id().parse::<Pathway>(), Ok(pathway));
        }
        assert_eq!(
            "tom_tim44".parse::<Pathway>(),
            Err(ParsePathwayError("tom_tim44".to_string()))
        );
    }

    #[test]
    fn variants_cycle_round_robin() {
        let names: Vec<_> = (0..5).map(|case| variant_for_case(case).name).collect();
        assert_eq!(
            names,
            [
                "Matrix Enzyme",
                "Carrier Protein",
                "IMS Chaperone",
                "Beta-Barrel Porin",
                "Matrix Enzyme"
            ]
        );
    }

    #[test]
    fn every_pathway_has_exactly_one_variant() {
        for pathway in Pathway::ALL {
            let count = PROTEIN_VARIANTS.iter().filter(|v| v.pathway == pathway).count();
            assert_eq!(count, 1, "{pathway}");
        }
    }
}
