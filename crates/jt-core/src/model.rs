//! Closed-form Jahn-Teller model for a d4 ion in an octahedral field.
//!
//! The Q3 mode elongates the octahedron along z. The eg pair splits into
//! dx²-y² and dz², the t2g triplet into dxy and the (dxz, dyz) pair. Values are
//! pedagogical units that the diagram uses directly as y coordinates.

use crate::constants::{
    COUPLING_EG, COUPLING_MAX, COUPLING_MIN, COUPLING_T2G, DISTORTION_MAX, DISTORTION_MIN,
    OCTAHEDRAL_EG, OCTAHEDRAL_T2G,
};

/// Undistorted (Oh) orbital energies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OctahedralLevels {
    pub eg: f32,
    pub t2g: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EgSplit {
    pub dx2y2: f32,
    pub dz2: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct T2gSplit {
    pub dxy: f32,
    pub dxzdyz: f32,
}

/// Tetragonally split (D4h) orbital energies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TetragonalLevels {
    pub eg: EgSplit,
    pub t2g: T2gSplit,
}

/// Energy levels derived from one (distortion, coupling) pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyLevels {
    pub oh: OctahedralLevels,
    pub d4h: TetragonalLevels,
    /// Magnitude of the eg shift.
    pub stabilization_energy: f32,
}

impl EnergyLevels {
    pub fn eg_splitting(&self) -> f32 {
        self.d4h.eg.dz2 - self.d4h.eg.dx2y2
    }

    pub fn t2g_splitting(&self) -> f32 {
        self.d4h.t2g.dxzdyz - self.d4h.t2g.dxy
    }
}

#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(DISTORTION_MIN, DISTORTION_MAX)
}

#[inline]
pub fn clamp_coupling(v: f32) -> f32 {
    v.clamp(COUPLING_MIN, COUPLING_MAX)
}

/// Compute Oh and D4h levels for a normalized Q3 amplitude.
///
/// `distortion` is clamped to \[0, 1\]; `coupling_scale` is applied as given.
pub fn compute_energy_levels(distortion: f32, coupling_scale: f32) -> EnergyLevels {
    let q = clamp01(distortion);
    let eg_shift = COUPLING_EG * q * coupling_scale;
    let t2g_shift = COUPLING_T2G * q * coupling_scale;

    EnergyLevels {
        oh: OctahedralLevels {
            eg: OCTAHEDRAL_EG,
            t2g: OCTAHEDRAL_T2G,
        },
        d4h: TetragonalLevels {
            eg: EgSplit {
                dx2y2: OCTAHEDRAL_EG - eg_shift,
                dz2: OCTAHEDRAL_EG + eg_shift,
            },
            t2g: T2gSplit {
                dxy: OCTAHEDRAL_T2G - t2g_shift,
                dxzdyz: OCTAHEDRAL_T2G + t2g_shift,
            },
        },
        stabilization_energy: eg_shift,
    }
}
