extern crate nalgebra as na;

use color_eyre::eyre::{eyre, Result};
use na::{Vector3, Vector6, Matrix3, Matrix4, Isometry, Rotation3, Translation3};
use crate::Float;

pub const ROTATION_TOLERANCE: Float = 1e-6;
pub const SINGULARITY_THRESHOLD: Float = 1e-6;

/// (roll, pitch, yaw, x, y, z)
pub type PoseVector = Vector6<Float>;

pub fn se3(t: &Vector3<Float>, rotation: &Matrix3<Float>) -> Matrix4<Float> {
    Isometry::<Float, Rotation3<Float>,3>::from_parts(Translation3::from(*t), Rotation3::from_matrix_unchecked(*rotation)).to_homogeneous()
}

pub fn rotation_block(pose: &Matrix4<Float>) -> Matrix3<Float> {
    pose.fixed_view::<3,3>(0,0).into_owned()
}

pub fn translation_block(pose: &Matrix4<Float>) -> Vector3<Float> {
    pose.fixed_view::<3,1>(0,3).into_owned()
}

/**
 * R^T*R has to be the identity up to ROTATION_TOLERANCE (Frobenius norm)
 */
pub fn is_rotation_matrix(r: &Matrix3<Float>) -> bool {
    let should_be_identity = r.transpose()*r;
    (Matrix3::<Float>::identity() - should_be_identity).norm() < ROTATION_TOLERANCE
}

/**
 * Decomposes r = Rz(z)*Ry(y)*Rx(x) into (x,y,z).
 * When the pitch is close to +-90 degrees only x-z (resp. x+z) is observable, z is then set to 0.
 * Panics if r is not a rotation matrix.
 */
pub fn rotation_matrix_to_euler_angles(r: &Matrix3<Float>) -> Vector3<Float> {
    assert!(is_rotation_matrix(r), "not a valid rotation matrix: {}", r);
    let sy = (r[(0,0)]*r[(0,0)] + r[(1,0)]*r[(1,0)]).sqrt();

    match sy < SINGULARITY_THRESHOLD {
        false => Vector3::new(
            r[(2,1)].atan2(r[(2,2)]),
            (-r[(2,0)]).atan2(sy),
            r[(1,0)].atan2(r[(0,0)])
        ),
        true => Vector3::new(
            (-r[(1,2)]).atan2(r[(1,1)]),
            (-r[(2,0)]).atan2(sy),
            0.0
        )
    }
}

/**
 * Re-expresses [p1 .. pn] relative to p0. p0 itself is not part of the output.
 */
pub fn rectify_poses(poses: &[Matrix4<Float>]) -> Result<Vec<Matrix4<Float>>> {
    let first_frame = poses.first().ok_or_else(|| eyre!("cannot rectify an empty pose sequence"))?;
    let first_frame_inv = first_frame.try_inverse().ok_or_else(|| eyre!("first pose of the sequence is singular: {}", first_frame))?;
    Ok(poses[1..].iter().map(|p| first_frame_inv*p).collect::<Vec<Matrix4<Float>>>())
}

/**
 * Euler angles of the rotation block followed by the translation.
 */
pub fn mat_to_pose_vector(pose: &Matrix4<Float>) -> PoseVector {
    let euler = rotation_matrix_to_euler_angles(&rotation_block(pose));
    let t = translation_block(pose);
    PoseVector::new(euler[0],euler[1],euler[2],t[0],t[1],t[2])
}

/**
 * Rectifies the poses and flattens them. Returns poses.len()-1 vectors.
 */
pub fn process_poses(poses: &[Matrix4<Float>]) -> Result<Vec<PoseVector>> {
    let rectified_poses = rectify_poses(poses)?;
    Ok(rectified_poses.iter().map(mat_to_pose_vector).collect::<Vec<PoseVector>>())
}
