//! Pointy-top hex grid math for tactical battles.
//!
//! Exploration happens on a continuous plane; a battle needs a discrete hex
//! grid. Axial `(q, r)` is the storage form, cube `(x, y, z)` with
//! `x + y + z == 0` is used for rounding and distance.

use glam::Vec2;
use serde::{Deserialize, Serialize};

const SQRT_3: f32 = 1.732_050_8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

impl Axial {
    pub const ORIGIN: Axial = Axial { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub fn to_cube(self) -> Cube {
        Cube {
            x: self.q,
            y: -self.q - self.r,
            z: self.r,
        }
    }
}

impl std::ops::Add for Axial {
    type Output = Axial;

    fn add(self, rhs: Axial) -> Axial {
        Axial::new(self.q + rhs.q, self.r + rhs.r)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cube {
    pub fn to_axial(self) -> Axial {
        Axial::new(self.x, self.z)
    }
}

/// Unit offsets indexed 0..6: E, SE, SW, W, NW, NE. Facing logic depends on
/// this order.
///
/// The turn is clockwise in the frame of [`axial_to_world`], where +y points
/// up (positive `r` moves toward +y). Drawn with +y down, as `render_preview`
/// draws rows, the same sequence appears counter-clockwise.
pub const HEX_DIRECTIONS: [Axial; 6] = [
    Axial::new(1, 0),
    Axial::new(1, -1),
    Axial::new(0, -1),
    Axial::new(-1, 0),
    Axial::new(-1, 1),
    Axial::new(0, 1),
];

/// Nearest hex to a continuous position. `size` is the center-to-corner distance.
pub fn world_to_axial(position: Vec2, size: f32) -> Axial {
    let q = (SQRT_3 / 3.0 * position.x - position.y / 3.0) / size;
    let r = (2.0 / 3.0 * position.y) / size;
    cube_round(q, -q - r, r).to_axial()
}

pub fn axial_to_world(hex: Axial, size: f32) -> Vec2 {
    let q = hex.q as f32;
    let r = hex.r as f32;
    Vec2::new(
        size * (SQRT_3 * q + SQRT_3 / 2.0 * r),
        size * (1.5 * r),
    )
}

/// Rounds each cube component, then rebuilds the one with the largest
/// rounding error so `x + y + z == 0` holds exactly.
fn cube_round(fx: f32, fy: f32, fz: f32) -> Cube {
    let mut x = fx.round();
    let mut y = fy.round();
    let mut z = fz.round();

    let dx = (x - fx).abs();
    let dy = (y - fy).abs();
    let dz = (z - fz).abs();

    if dx > dy && dx > dz {
        x = -y - z;
    } else if dy > dz {
        y = -x - z;
    } else {
        z = -x - y;
    }

    Cube {
        x: x as i32,
        y: y as i32,
        z: z as i32,
    }
}

pub fn hex_distance(a: Axial, b: Axial) -> i32 {
    let a = a.to_cube();
    let b = b.to_cube();
    (a.x - b.x)
        .abs()
        .max((a.y - b.y).abs())
        .max((a.z - b.z).abs())
}

/// Every hex within `radius` steps of `center`: `3r² + 3r + 1` cells.
pub fn hexes_in_radius(center: Axial, radius: i32) -> Vec<Axial> {
    if radius < 0 {
        return Vec::new();
    }
    let mut hexes = Vec::with_capacity((3 * radius * radius + 3 * radius + 1) as usize);
    for dq in -radius..=radius {
        let r_min = (-radius).max(-dq - radius);
        let r_max = radius.min(-dq + radius);
        for dr in r_min..=r_max {
            hexes.push(center + Axial::new(dq, dr));
        }
    }
    hexes
}

/// Neighbor in direction `direction`, taken modulo 6.
pub fn hex_neighbor(hex: Axial, direction: usize) -> Axial {
    hex + HEX_DIRECTIONS[direction % 6]
}

pub fn hex_neighbors(hex: Axial) -> [Axial; 6] {
    HEX_DIRECTIONS.map(|d| hex + d)
}
