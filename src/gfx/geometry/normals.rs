//! Per-vertex normals from an indexed triangle list.

use cgmath::{InnerSpace, Vector3, Zero};

use crate::error::MeshError;

/// Computes smooth vertex normals for an indexed triangle mesh.
///
/// Each triangle contributes its unnormalized face normal
/// `(p1 - p0) × (p2 - p0)` to all three of its vertices, so larger faces
/// weigh more. The sums are normalized at the end. A vertex whose sum is
/// (numerically) zero, for example one no triangle references, keeps a zero
/// normal.
pub fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Result<Vec<[f32; 3]>, MeshError> {
    if indices.len() % 3 != 0 {
        return Err(MeshError::IncompleteTriangle(indices.len()));
    }
    if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
        return Err(MeshError::IndexOutOfRange {
            index,
            vertex_count: positions.len(),
        });
    }

    let mut accumulated = vec![Vector3::<f32>::zero(); positions.len()];

    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);

        let p0 = Vector3::from(positions[i0]);
        let p1 = Vector3::from(positions[i1]);
        let p2 = Vector3::from(positions[i2]);

        let face_normal = (p1 - p0).cross(p2 - p0);

        accumulated[i0] += face_normal;
        accumulated[i1] += face_normal;
        accumulated[i2] += face_normal;
    }

    Ok(accumulated
        .into_iter()
        .map(|normal| {
            let length = normal.magnitude();
            if length > f32::EPSILON {
                (normal / length).into()
            } else {
                [0.0; 3]
            }
        })
        .collect())
}
