//! Time-of-flight expansion of released clouds.
//!
//! A Thomas-Fermi condensate released from a harmonic trap keeps its
//! parabolic shape, with radii R_i(t) = λ_i(t) R_i(0) where the scalars obey
//! the Castin-Dum equations
//!
//! \[
//! \ddot\lambda_i = \frac{\omega_i^2}{\lambda_i \lambda_x \lambda_y \lambda_z},
//! \qquad \lambda_i(0) = 1,\ \dot\lambda_i(0) = 0.
//! \]
//!
//! These are integrated with the classical fourth-order Runge-Kutta method.
//! A non-interacting thermal cloud expands ballistically with
//! b_i(t) = sqrt(1 + ω_i² t²).

use crate::error::{ensure_non_negative, SimbiResult};
use crate::types::Trap;

/// Steps per radian of the fastest trap frequency.
const STEPS_PER_RADIAN: f64 = 200.0;

/// Lower bound on the number of Runge-Kutta steps.
const MIN_STEPS: usize = 100;

/// Scalars and their rates, [λx, λy, λz, λ̇x, λ̇y, λ̇z].
type ScalingState = [f64; 6];

/// Right-hand side of the Castin-Dum equations.
fn castin_dum(state: &ScalingState, frequencies: &[f64; 3]) -> ScalingState {
    let volume = state[0] * state[1] * state[2];
    let mut rhs = [0.0; 6];
    for i in 0..3 {
        rhs[i] = state[i + 3];
        rhs[i + 3] = frequencies[i].powi(2) / (state[i] * volume);
    }
    rhs
}

fn add_scaled(y: &ScalingState, h: f64, k: &ScalingState) -> ScalingState {
    let mut out = *y;
    for (o, k) in out.iter_mut().zip(k.iter()) {
        *o += h * k;
    }
    out
}

/// Performs a single Runge-Kutta step.
fn runge_kutta_step(y: &ScalingState, h: f64, frequencies: &[f64; 3]) -> ScalingState {
    let k1 = castin_dum(y, frequencies);
    let k2 = castin_dum(&add_scaled(y, h / 2.0, &k1), frequencies);
    let k3 = castin_dum(&add_scaled(y, h / 2.0, &k2), frequencies);
    let k4 = castin_dum(&add_scaled(y, h, &k3), frequencies);

    let mut next = *y;
    for i in 0..6 {
        next[i] += h / 6.0 * (k1[i] + 2.0 * (k2[i] + k3[i]) + k4[i]);
    }
    next
}

/// Integrates the Castin-Dum equations up to `time_of_flight`, returning the
/// full state (scalars and rates).
fn integrate_castin_dum(trap: &Trap, time_of_flight: f64) -> SimbiResult<ScalingState> {
    let time_of_flight = ensure_non_negative("time_of_flight", time_of_flight)?;
    let mut y: ScalingState = [1.0, 1.0, 1.0, 0.0, 0.0, 0.0];
    if time_of_flight == 0.0 {
        return Ok(y);
    }

    let frequencies = trap.frequencies();
    let fastest = frequencies.iter().cloned().fold(0.0, f64::max);
    let steps = ((time_of_flight * fastest * STEPS_PER_RADIAN).ceil() as usize).max(MIN_STEPS);
    let h = time_of_flight / steps as f64;

    for _ in 0..steps {
        y = runge_kutta_step(&y, h, &frequencies);
    }
    log::debug!(
        "Castin-Dum expansion over {:.3e} s in {} steps: λ = ({:.4}, {:.4}, {:.4})",
        time_of_flight,
        steps,
        y[0],
        y[1],
        y[2]
    );
    Ok(y)
}

/// Expansion scalars λ_i(t) of a Thomas-Fermi condensate.
pub fn condensate_scalars(trap: &Trap, time_of_flight: f64) -> SimbiResult<[f64; 3]> {
    let y = integrate_castin_dum(trap, time_of_flight)?;
    Ok([y[0], y[1], y[2]])
}

/// Ballistic expansion scalars b_i(t) = sqrt(1 + ω_i² t²) of a thermal cloud.
pub fn thermal_scalars(trap: &Trap, time_of_flight: f64) -> SimbiResult<[f64; 3]> {
    let t = ensure_non_negative("time_of_flight", time_of_flight)?;
    Ok(trap.frequencies().map(|w| (1.0 + (w * t).powi(2)).sqrt()))
}
