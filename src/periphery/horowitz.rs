/// Input slope of an ideal step, in 1/s
pub const STEP_RAMP: f64 = 1e20;

/// Normalized switching voltage
const SWITCHING_VOLTAGE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, derive_new::new)]
pub struct HorowitzDelay {
    /// 50% delay of the stage, second
    pub delay: f64,
    /// Output slope handed to the next stage, 1/s
    pub ramp_output: f64,
}

/// Horowitz approximation of a gate/RC stage delay.
///
/// - `tr`: time constant of the stage
/// - `beta`: ratio of input transition to `tr` sensitivity, 0 for a pure RC stage
/// - `ramp_input`: slope of the input, `STEP_RAMP` for a step
///
/// A non-positive time constant settles instantly and hands on a step.
pub fn horowitz(tr: f64, beta: f64, ramp_input: f64) -> HorowitzDelay {
    if tr.is_nan() || tr <= 0.0 || ramp_input.is_nan() || ramp_input <= 0.0 {
        return HorowitzDelay::new(0.0, STEP_RAMP);
    }

    let vs = SWITCHING_VOLTAGE;
    let alpha = 1.0 / ramp_input / tr;
    let ln_vs = vs.ln();
    let delay = tr * (ln_vs * ln_vs + 2.0 * alpha * beta * (1.0 - vs)).sqrt();
    HorowitzDelay::new(delay, (1.0 - vs) / delay)
}
