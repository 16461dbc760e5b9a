//! Torus sampling and wrapped index generation.

use std::f32::consts::PI;

use crate::error::MeshError;

/// Geometric parameters of the generated torus
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusParams {
    /// Radius of the tube
    pub minor_radius: f32,
    /// Distance from the torus centre to the centre of the tube
    pub major_radius: f32,
    /// Number of grid steps along each angular axis
    pub resolution: u32,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            minor_radius: 0.5,
            major_radius: 1.0,
            resolution: 40,
        }
    }
}

impl TorusParams {
    /// Checks the radii and resolution before any geometry is produced.
    ///
    /// A zero minor radius is accepted and collapses the torus onto a ring.
    pub fn validate(&self) -> Result<(), MeshError> {
        validate_radii(self.minor_radius, self.major_radius)?;
        validate_resolution(self.resolution)?;
        Ok(())
    }
}

fn validate_radii(minor_radius: f32, major_radius: f32) -> Result<(), MeshError> {
    if !(minor_radius.is_finite() && minor_radius >= 0.0) {
        return Err(MeshError::InvalidRadius {
            name: "minor",
            requirement: "finite and non-negative",
            value: minor_radius,
        });
    }
    if !(major_radius.is_finite() && major_radius > 0.0) {
        return Err(MeshError::InvalidRadius {
            name: "major",
            requirement: "finite and positive",
            value: major_radius,
        });
    }
    Ok(())
}

/// Returns the vertex count `resolution²` once it is known that the full
/// index list (`6 · resolution²` entries) is addressable with `u32`.
fn validate_resolution(resolution: u32) -> Result<u32, MeshError> {
    if resolution == 0 {
        return Err(MeshError::InvalidResolution);
    }
    resolution
        .checked_mul(resolution)
        .filter(|count| count.checked_mul(6).is_some())
        .ok_or(MeshError::ResolutionTooLarge(resolution))
}

/// Flattened buffer index of grid vertex `(i, j)`.
///
/// Both coordinates wrap, so `i == resolution` addresses the same vertex as
/// `i == 0`.
#[inline]
pub fn grid_index(i: u32, j: u32, resolution: u32) -> u32 {
    (i % resolution) * resolution + (j % resolution)
}

/// Samples the torus surface on a `resolution × resolution` grid.
///
/// Vertex `(i, j)` sits at angles `u = 2π·i/resolution` around the main axis
/// and `v = 2π·j/resolution` around the tube, with texture coordinate
/// `(i/resolution, j/resolution)`. Both returned vectors have
/// `resolution²` entries in [`grid_index`] order.
pub fn compute_torus_points(
    minor_radius: f32,
    major_radius: f32,
    resolution: u32,
) -> Result<(Vec<[f32; 3]>, Vec<[f32; 2]>), MeshError> {
    validate_radii(minor_radius, major_radius)?;
    let vertex_count = validate_resolution(resolution)? as usize;

    let mut positions = Vec::with_capacity(vertex_count);
    let mut uv_coordinates = Vec::with_capacity(vertex_count);
    let steps = resolution as f32;

    for i in 0..resolution {
        let u = i as f32 * 2.0 * PI / steps;
        let (sin_u, cos_u) = u.sin_cos();

        for j in 0..resolution {
            let v = j as f32 * 2.0 * PI / steps;
            let (sin_v, cos_v) = v.sin_cos();

            let ring = major_radius + minor_radius * cos_v;
            positions.push([ring * cos_u, ring * sin_u, minor_radius * sin_v]);
            uv_coordinates.push([i as f32 / steps, j as f32 / steps]);
        }
    }

    Ok((positions, uv_coordinates))
}

/// Builds the triangle list covering the whole wrapped grid.
///
/// Cell `(i, j)` joins corners `a = (i, j)`, `b = (i+1, j)`, `c = (i, j+1)`
/// and `d = (i+1, j+1)` (wrapped) as triangles `(a, b, d)` and `(a, d, c)`.
/// The winding is counter-clockwise seen from outside the tube, so face
/// normals computed from it point outward.
pub fn generate_indices(resolution: u32) -> Result<Vec<u32>, MeshError> {
    let vertex_count = validate_resolution(resolution)? as usize;
    let mut indices = Vec::with_capacity(vertex_count * 6);

    for i in 0..resolution {
        for j in 0..resolution {
            let a = grid_index(i, j, resolution);
            let b = grid_index(i + 1, j, resolution);
            let c = grid_index(i, j + 1, resolution);
            let d = grid_index(i + 1, j + 1, resolution);

            indices.extend_from_slice(&[a, b, d]);
            indices.extend_from_slice(&[a, d, c]);
        }
    }

    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const EPS: f32 = 1e-5;

    fn assert_close(actual: [f32; 3], expected: [f32; 3]) {
        for axis in 0..3 {
            assert!(
                (actual[axis] - expected[axis]).abs() < EPS,
                "{:?} != {:?}",
                actual,
                expected
            );
        }
    }

    #[test]
    fn test_point_counts_match_resolution() {
        for resolution in [1, 2, 3, 8, 40] {
            let (positions, uvs) = compute_torus_points(0.5, 1.0, resolution).unwrap();
            let expected = (resolution * resolution) as usize;
            assert_eq!(positions.len(), expected);
            assert_eq!(uvs.len(), expected);
        }
    }

    #[test]
    fn test_first_vertex_on_outer_equator() {
        let (positions, _) = compute_torus_points(0.5, 1.0, 4).unwrap();
        assert_eq!(positions[0], [1.5, 0.0, 0.0]);
    }

    #[test]
    fn test_quarter_turn_vertices() {
        let (positions, _) = compute_torus_points(0.5, 2.0, 4).unwrap();

        // v = π/2: top of the tube
        assert_close(positions[grid_index(0, 1, 4) as usize], [2.0, 0.0, 0.5]);
        // v = π: inner equator
        assert_close(positions[grid_index(0, 2, 4) as usize], [1.5, 0.0, 0.0]);
        // u = π/2: rotated a quarter turn about z
        assert_close(positions[grid_index(1, 0, 4) as usize], [0.0, 2.5, 0.0]);
    }

    #[test]
    fn test_zero_minor_radius_collapses_to_ring() {
        let major = 1.25;
        let (positions, _) = compute_torus_points(0.0, major, 12).unwrap();

        for [x, y, z] in positions {
            assert_eq!(z, 0.0);
            assert!(((x * x + y * y).sqrt() - major).abs() < EPS);
        }
    }

    #[test]
    fn test_uv_coordinates() {
        let resolution = 10;
        let (_, uvs) = compute_torus_points(0.5, 1.0, resolution).unwrap();

        assert_eq!(uvs[0], [0.0, 0.0]);
        for uv in &uvs {
            assert!((0.0..1.0).contains(&uv[0]));
            assert!((0.0..1.0).contains(&uv[1]));
        }
        assert_eq!(uvs[grid_index(3, 7, resolution) as usize], [0.3, 0.7]);
    }

    #[test]
    fn test_index_count_and_range() {
        for resolution in [1, 2, 5, 40] {
            let indices = generate_indices(resolution).unwrap();
            let vertex_count = resolution * resolution;
            assert_eq!(indices.len(), (6 * vertex_count) as usize);
            assert!(indices.iter().all(|&i| i < vertex_count));
        }
    }

    #[test]
    fn test_boundary_cells_wrap_to_zero() {
        let resolution = 5;
        let indices = generate_indices(resolution).unwrap();
        let last = resolution - 1;

        for (cell, quad) in indices.chunks(6).enumerate() {
            let i = cell as u32 / resolution;
            let j = cell as u32 % resolution;
            let d = quad[2];

            if i == last {
                // corner b = (i+1, j) wraps back to row 0
                assert_eq!(quad[1], grid_index(0, j, resolution));
            }
            if j == last {
                // corner c = (i, j+1) wraps back to column 0
                assert_eq!(quad[5], grid_index(i, 0, resolution));
            }
            if i == last && j == last {
                assert_eq!(d, 0);
            }
        }
    }

    #[test]
    fn test_every_edge_shared_by_two_triangles() {
        use std::collections::HashMap;

        let resolution = 6;
        let indices = generate_indices(resolution).unwrap();
        let mut edges: HashMap<(u32, u32), u32> = HashMap::new();

        for tri in indices.chunks(3) {
            for k in 0..3 {
                let (p, q) = (tri[k], tri[(k + 1) % 3]);
                *edges.entry((p.min(q), p.max(q))).or_default() += 1;
            }
        }

        // A closed surface has no border edges.
        assert!(edges.values().all(|&count| count == 2));
    }

    #[test]
    fn test_randomized_parameters() {
        let mut rng = StdRng::seed_from_u64(0x7075);

        for _ in 0..25 {
            let resolution = rng.random_range(1..=48);
            let minor = rng.random_range(0.0..2.0);
            let major = rng.random_range(0.1..4.0);

            let (positions, uvs) = compute_torus_points(minor, major, resolution).unwrap();
            let indices = generate_indices(resolution).unwrap();
            let vertex_count = resolution * resolution;

            assert_eq!(positions.len(), vertex_count as usize);
            assert_eq!(uvs.len(), vertex_count as usize);
            assert_eq!(indices.len(), 6 * vertex_count as usize);
            assert!(indices.iter().all(|&i| i < vertex_count));
            assert!(positions.iter().flatten().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert_eq!(
            compute_torus_points(0.5, 1.0, 0),
            Err(MeshError::InvalidResolution)
        );
        assert_eq!(generate_indices(0), Err(MeshError::InvalidResolution));
        assert!(matches!(
            compute_torus_points(-0.5, 1.0, 4),
            Err(MeshError::InvalidRadius { name: "minor", .. })
        ));
        assert!(matches!(
            compute_torus_points(0.5, 0.0, 4),
            Err(MeshError::InvalidRadius { name: "major", .. })
        ));
        assert!(matches!(
            compute_torus_points(f32::NAN, 1.0, 4),
            Err(MeshError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn test_rejects_resolution_overflowing_indices() {
        assert_eq!(
            generate_indices(30_000),
            Err(MeshError::ResolutionTooLarge(30_000))
        );
        assert!(TorusParams {
            resolution: 26_754,
            ..TorusParams::default()
        }
        .validate()
        .is_ok());
    }
}
