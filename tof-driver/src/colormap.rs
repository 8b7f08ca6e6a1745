//! Turbo color ramp, used to encode normalized distance.
//!
//! Polynomial fit of the Turbo colormap. The fit stays within a few percent
//! of the lookup table, which is plenty for telling near zones from far ones.

// Polynomial approximation of the Turbo colormap.
// Taken from https://gist.github.com/mikhailov-work/0d177465a8151eb6ede1768d51d476c7.
// Original LUT: https://gist.github.com/mikhailov-work/ee72ba4191942acecc03fe6da94fc73f.
//
// Copyright 2019 Google LLC.
// SPDX-License-Identifier: Apache-2.0
//
// Authors:
//   Colormap Design: Anton Mikhailov (mikhailov@google.com)
//   GLSL Approximation: Ruofei Du (ruofei@google.com)

const RED_4: [f64; 4] = [0.13572138, 4.61539260, -42.66032258, 132.13108234];
const GREEN_4: [f64; 4] = [0.09140261, 2.19418839, 4.84296658, -14.18503333];
const BLUE_4: [f64; 4] = [0.10667330, 12.64194608, -60.58204836, 110.36276771];
const RED_2: [f64; 2] = [-152.94239396, 59.28637943];
const GREEN_2: [f64; 2] = [4.27729857, 2.82956604];
const BLUE_2: [f64; 2] = [-89.90310912, 27.34824973];

fn channel(coefficients_4: &[f64; 4], coefficients_2: &[f64; 2], x: f64) -> f64 {
    let powers_4 = [1., x, x * x, x * x * x];
    let powers_2 = [x.powi(4), x.powi(5)];
    let value = powers_4
        .iter()
        .zip(coefficients_4.iter())
        .chain(powers_2.iter().zip(coefficients_2.iter()))
        .map(|(p, c)| p * c)
        .sum::<f64>();
    value.clamp(0., 1.)
}

/// RGB components in [0, 1] for a scalar in [0, 1]. Out of range input is clamped.
pub fn turbo_rgb(scalar: f64) -> [f64; 3] {
    let x = if scalar.is_nan() { 0. } else { scalar.clamp(0., 1.) };
    [
        channel(&RED_4, &RED_2, x),
        channel(&GREEN_4, &GREEN_2, x),
        channel(&BLUE_4, &BLUE_2, x),
    ]
}

/// 8-bit RGB for a scalar in [0, 1].
pub fn turbo(scalar: f64) -> [u8; 3] {
    turbo_rgb(scalar).map(|c| (c * 255.).round() as u8)
}
