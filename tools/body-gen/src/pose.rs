//! Relative pose policies between body parts

use std::f64::consts::FRAC_PI_2;

use glam::DVec3;
use rand::RngCore;

use crate::link::PartData;
use crate::transform::Pose;

/// Decides where the head sits in the handle's frame
pub trait PosePolicy {
    /// Sample the rotation and translation applied to the head
    fn sample_head_transformation(
        &self,
        handle: &PartData,
        head: &PartData,
        rng: &mut dyn RngCore,
    ) -> Pose;
}

/// Orthogonal T-shape: the head is rolled a quarter turn and centered on the
/// upper end of the handle's long (Z) axis.
///
/// Deterministic; ignores the head data and the random source.
#[derive(Clone, Copy, Debug, Default)]
pub struct TShape;

impl PosePolicy for TShape {
    fn sample_head_transformation(
        &self,
        handle: &PartData,
        _head: &PartData,
        _rng: &mut dyn RngCore,
    ) -> Pose {
        Pose::new(
            DVec3::new(FRAC_PI_2, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 0.5 * handle.size.z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HANDLE_CONFIG, HEAD_CONFIG, LinkConfig};
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_t_shape_fixed_pose() {
        let mut rng = Pcg64::seed_from_u64(1);
        let mut handle = PartData::sample("handle", &HANDLE_CONFIG, &mut rng);
        handle.size.z = 0.4;

        let pose = TShape.sample_head_transformation(
            &handle,
            &PartData::sample("head", &HEAD_CONFIG, &mut rng),
            &mut rng,
        );
        assert_eq!(pose.rotation, DVec3::new(FRAC_PI_2, 0.0, 0.0));
        assert_eq!(pose.translation, DVec3::new(0.0, 0.0, 0.2));
    }

    #[test]
    fn test_t_shape_ignores_head() {
        let mut rng = Pcg64::seed_from_u64(2);
        let handle = PartData::sample("handle", &HANDLE_CONFIG, &mut rng);
        let small = PartData::sample("head", &HEAD_CONFIG, &mut rng);
        let big_config = LinkConfig {
            mass_range: [5.0, 9.0],
            size_range: [[1.0, 2.0], [1.0, 2.0], [3.0, 4.0]],
            ..HEAD_CONFIG
        };
        let mut big = PartData::sample("head", &big_config, &mut rng);
        big.position = DVec3::new(3.0, -2.0, 1.0);

        let a = TShape.sample_head_transformation(&handle, &small, &mut rng);
        let b = TShape.sample_head_transformation(&handle, &big, &mut rng);
        assert_eq!(a, b);
        assert_eq!(a.translation.z, 0.5 * handle.size.z);
    }
}
