//! Acceleration-limited motion along the axial, lateral and yaw axes.
//!
//! Current velocities ramp toward their targets by at most one acceleration (or braking) step
//! per update and never overshoot. Since targets are clamped to the speed caps when they are
//! set, the current velocities stay within the caps as well.

use super::{Angle, AxisLimits, KinematicLimits, Pose, Position};

/// Robot-frame velocity. Axial is forward, lateral is sideways, yaw is counter-clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct BodyVelocity {
    pub axial: f64,
    pub lateral: f64,
    pub yaw: f64,
}

impl BodyVelocity {
    pub const fn new(axial: f64, lateral: f64, yaw: f64) -> Self {
        Self {
            axial,
            lateral,
            yaw,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct MotionState {
    pose: Pose,
    velocity: BodyVelocity,
    target: BodyVelocity,
    limits: KinematicLimits,
}

impl MotionState {
    pub fn new(pose: Pose, limits: KinematicLimits) -> Self {
        Self {
            pose,
            velocity: BodyVelocity::zero(),
            target: BodyVelocity::zero(),
            limits,
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn velocity(&self) -> BodyVelocity {
        self.velocity
    }

    pub fn target(&self) -> BodyVelocity {
        self.target
    }

    pub fn limits(&self) -> &KinematicLimits {
        &self.limits
    }

    pub fn set_target_linear(&mut self, axial: f64, lateral: f64) {
        let max_speed = self.limits.max_linear_speed();
        self.target.axial = clamp_magnitude(axial, max_speed);
        self.target.lateral = clamp_magnitude(lateral, max_speed);
    }

    pub fn set_target_yaw(&mut self, yaw: f64) {
        self.target.yaw = clamp_magnitude(yaw, self.limits.max_yaw_speed());
    }

    /// Zeroes current and target velocities at once, without ramping.
    pub fn stop(&mut self) {
        self.velocity = BodyVelocity::zero();
        self.target = BodyVelocity::zero();
    }

    /// Teleports the robot. Velocities are kept.
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Advances the state by `dt` seconds.
    ///
    /// Velocities are ramped first; the pose is then integrated with the ramped axial and lateral
    /// velocities, rotated into the field frame by the heading from before this step.
    pub fn update(&mut self, dt: f64) {
        let linear = self.limits.linear();
        let yaw = self.limits.yaw();

        self.velocity.axial = ramp(self.velocity.axial, self.target.axial, &linear, dt);
        self.velocity.lateral = ramp(self.velocity.lateral, self.target.lateral, &linear, dt);
        self.velocity.yaw = ramp(self.velocity.yaw, self.target.yaw, &yaw, dt);

        self.pose = self.pose.advanced(
            Position::new(self.velocity.axial * dt, self.velocity.lateral * dt),
            Angle::new(self.velocity.yaw * dt),
        );
    }
}

/// Moves `current` toward `target` by at most one acceleration or braking step.
///
/// Accelerating means the target is nonzero and the step points the same way as the target,
/// which includes reversing through zero. Slowing down and stopping use the brake cap.
fn ramp(current: f64, target: f64, limits: &AxisLimits, dt: f64) -> f64 {
    let delta = target - current;
    let accelerating = target != 0.0 && delta.signum() == target.signum();
    let cap = if accelerating {
        limits.max_accel() * dt
    } else {
        limits.max_brake_accel() * dt
    };
    current + clamp_magnitude(delta, cap)
}

/// Limits `value` to `[-bound, bound]`.
///
/// Unlike `f64::clamp` this never panics: NaN values pass through unchanged and a NaN bound
/// leaves the value as is.
fn clamp_magnitude(value: f64, bound: f64) -> f64 {
    if value > bound {
        bound
    } else if value < -bound {
        -bound
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    use super::*;

    const EPSILON: f64 = 1e-9;
    const DT: f64 = 1.0 / 60.0;
    const RNG_SEED: u64 = 19878367467712;

    fn limits() -> KinematicLimits {
        KinematicLimits::new(60.0, 60.0, 300.0, PI, PI, 2.0 * PI).unwrap()
    }

    fn state() -> MotionState {
        MotionState::new(Pose::default(), limits())
    }

    #[rstest]
    #[case::within(30.0, -20.0, 30.0, -20.0)]
    #[case::above(90.0, 61.0, 60.0, 60.0)]
    #[case::below(-1000.0, -60.5, -60.0, -60.0)]
    #[case::mixed(120.0, -10.0, 60.0, -10.0)]
    fn test_set_target_linear_clamps(
        #[case] axial: f64,
        #[case] lateral: f64,
        #[case] expected_axial: f64,
        #[case] expected_lateral: f64,
    ) {
        let mut state = state();
        state.set_target_linear(axial, lateral);
        assert_abs_diff_eq!(state.target().axial, expected_axial);
        assert_abs_diff_eq!(state.target().lateral, expected_lateral);
        assert_abs_diff_eq!(state.velocity().axial, 0.0);
    }

    #[rstest]
    #[case(0.5, 0.5)]
    #[case(10.0, PI)]
    #[case(-10.0, -PI)]
    fn test_set_target_yaw_clamps(#[case] yaw: f64, #[case] expected: f64) {
        let mut state = state();
        state.set_target_yaw(yaw);
        assert_abs_diff_eq!(state.target().yaw, expected);
    }

    #[test]
    fn test_targets_stay_within_caps_for_random_inputs() {
        let mut rng = ChaCha8Rng::seed_from_u64(RNG_SEED);
        let mut state = state();

        for _ in 0..1000 {
            let axial = rng.random_range(-1.0e4..=1.0e4);
            let lateral = rng.random_range(-1.0e4..=1.0e4);
            let yaw = rng.random_range(-1.0e2..=1.0e2);
            state.set_target_linear(axial, lateral);
            state.set_target_yaw(yaw);
            assert!(state.target().axial.abs() <= 60.0);
            assert!(state.target().lateral.abs() <= 60.0);
            assert!(state.target().yaw.abs() <= PI);

            state.update(DT);
            assert!(state.velocity().axial.abs() <= 60.0 + EPSILON);
            assert!(state.velocity().lateral.abs() <= 60.0 + EPSILON);
            assert!(state.velocity().yaw.abs() <= PI + EPSILON);
        }
    }

    #[rstest]
    #[case::forward(45.0)]
    #[case::reverse(-45.0)]
    #[case::full(60.0)]
    fn test_ramp_approaches_target_monotonically(#[case] target: f64) {
        let mut state = state();
        state.set_target_linear(target, 0.0);

        let mut previous = 0.0_f64;
        for _ in 0..120 {
            state.update(DT);
            let current = state.velocity().axial;
            assert!(current.abs() >= previous.abs());
            assert!(current.abs() <= target.abs() + EPSILON);
            assert_eq!(current.signum(), target.signum());
            assert!(current.abs() - previous.abs() <= 60.0 * DT + EPSILON);
            previous = current;
        }
        assert_abs_diff_eq!(previous, target, epsilon = EPSILON);
    }

    #[test]
    fn test_ramp_uses_brake_cap_when_target_is_zero() {
        let mut state = state();
        state.set_target_linear(60.0, 0.0);
        for _ in 0..60 {
            state.update(DT);
        }
        assert_abs_diff_eq!(state.velocity().axial, 60.0, epsilon = EPSILON);

        state.set_target_linear(0.0, 0.0);
        state.update(DT);
        assert_abs_diff_eq!(state.velocity().axial, 60.0 - 300.0 * DT, epsilon = EPSILON);

        for _ in 0..11 {
            state.update(DT);
        }
        assert_abs_diff_eq!(state.velocity().axial, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_ramp_uses_accel_cap_when_reversing() {
        assert_abs_diff_eq!(
            ramp(10.0, -10.0, &limits().linear(), DT),
            10.0 - 60.0 * DT,
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(
            ramp(-10.0, 5.0, &limits().linear(), DT),
            -10.0 + 60.0 * DT,
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_full_reversal_takes_two_seconds() {
        let mut state = state();
        state.set_target_linear(60.0, 0.0);
        for _ in 0..60 {
            state.update(DT);
        }
        state.set_target_linear(-60.0, 0.0);

        for _ in 0..119 {
            state.update(DT);
        }
        assert!(state.velocity().axial > -60.0 + 0.5);

        state.update(DT);
        assert_abs_diff_eq!(state.velocity().axial, -60.0, epsilon = 1e-6);
    }

    #[test]
    fn test_ramp_uses_brake_cap_when_slowing_toward_smaller_target() {
        assert_abs_diff_eq!(
            ramp(50.0, 20.0, &limits().linear(), DT),
            50.0 - 300.0 * DT,
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(
            ramp(50.0, 49.0, &limits().linear(), DT),
            49.0,
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_ramp_with_inverted_caps_still_converges() {
        let limits = AxisLimits::new(60.0, 120.0, 30.0).unwrap();
        let mut velocity = 60.0;
        for _ in 0..120 {
            let next = ramp(velocity, 0.0, &limits, DT);
            assert!(next <= velocity);
            assert!(next >= 0.0);
            assert!(velocity - next <= 30.0 * DT + EPSILON);
            velocity = next;
        }
        assert_abs_diff_eq!(velocity, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_yaw_ramp_uses_yaw_caps() {
        let mut state = state();
        state.set_target_yaw(PI);
        state.update(0.5);
        assert_abs_diff_eq!(state.velocity().yaw, 0.5 * PI, epsilon = EPSILON);
        assert_abs_diff_eq!(f64::from(state.pose().heading()), 0.25 * PI, epsilon = EPSILON);

        state.set_target_yaw(0.0);
        state.update(0.1);
        assert_abs_diff_eq!(state.velocity().yaw, 0.5 * PI - 0.2 * PI, epsilon = EPSILON);
    }

    #[rstest]
    #[case::zero_heading(0.0, (1.0, 0.0))]
    #[case::quarter_heading(FRAC_PI_2, (0.0, 1.0))]
    #[case::half_heading(PI, (-1.0, 0.0))]
    fn test_pose_integration_axial(#[case] heading: f64, #[case] direction: (f64, f64)) {
        let mut state = MotionState::new(Pose::new(0.0, 0.0, heading), limits());
        state.velocity = BodyVelocity::new(30.0, 0.0, 0.0);
        state.target = state.velocity;

        state.update(DT);

        assert_abs_diff_eq!(state.pose().x(), direction.0 * 30.0 * DT, epsilon = EPSILON);
        assert_abs_diff_eq!(state.pose().y(), direction.1 * 30.0 * DT, epsilon = EPSILON);
        assert_abs_diff_eq!(f64::from(state.pose().heading()), heading, epsilon = EPSILON);
    }

    #[test]
    fn test_pose_integration_lateral() {
        let mut state = state();
        state.velocity = BodyVelocity::new(0.0, 30.0, 0.0);
        state.target = state.velocity;

        state.update(DT);

        assert_abs_diff_eq!(state.pose().x(), 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(state.pose().y(), 30.0 * DT, epsilon = EPSILON);
    }

    #[test]
    fn test_pose_integration_uses_heading_before_turn() {
        let mut state = state();
        state.velocity = BodyVelocity::new(10.0, 0.0, PI);
        state.target = state.velocity;

        state.update(0.5);

        assert_abs_diff_eq!(state.pose().x(), 5.0, epsilon = EPSILON);
        assert_abs_diff_eq!(state.pose().y(), 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(f64::from(state.pose().heading()), 0.5 * PI, epsilon = EPSILON);
    }

    #[test]
    fn test_heading_is_not_wrapped() {
        let mut state = state();
        state.set_target_yaw(PI);
        for _ in 0..600 {
            state.update(DT);
        }
        assert!(f64::from(state.pose().heading()) > 2.0 * PI);
    }

    #[test]
    fn test_stop_resets_instantaneously() {
        let mut state = state();
        state.set_target_linear(60.0, -60.0);
        state.set_target_yaw(PI);
        for _ in 0..30 {
            state.update(DT);
        }

        state.stop();
        assert_eq!(state.velocity(), BodyVelocity::zero());
        assert_eq!(state.target(), BodyVelocity::zero());

        let pose = state.pose();
        for _ in 0..10 {
            state.update(DT);
        }
        assert_eq!(state.pose(), pose);
    }

    #[test]
    fn test_set_pose_keeps_velocity() {
        let mut state = state();
        state.set_target_linear(60.0, 0.0);
        state.update(DT);
        let velocity = state.velocity();

        state.set_pose(Pose::new(10.0, -5.0, PI));

        assert_eq!(state.pose(), Pose::new(10.0, -5.0, PI));
        assert_eq!(state.velocity(), velocity);
    }

    #[test]
    fn test_nan_dt_propagates_without_panic() {
        let mut state = state();
        state.set_target_linear(60.0, 0.0);
        state.update(f64::NAN);
        assert!(state.pose().x().is_nan());
        assert!(state.pose().y().is_nan());
        assert!(f64::from(state.pose().heading()).is_nan());
    }

    #[test]
    fn test_nan_target_propagates_deterministically() {
        let run = || {
            let mut state = state();
            state.set_target_linear(f64::NAN, 0.0);
            state.update(DT);
            state
        };
        let (first, second) = (run(), run());
        assert!(first.target().axial.is_nan());
        assert!(first.velocity().axial.is_nan());
        assert!(first.pose().x().is_nan());
        assert!(second.pose().x().is_nan());
        assert_eq!(first.velocity().lateral, second.velocity().lateral);
    }

    #[test]
    fn test_negative_dt_does_not_panic() {
        let mut state = state();
        state.set_target_linear(60.0, 0.0);
        state.update(-DT);
        assert!(state.pose().x().is_finite());
    }
}
