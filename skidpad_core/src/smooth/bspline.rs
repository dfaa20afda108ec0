//! Clamped parametric B-splines fitted by penalised least squares.
//!
//! The fit minimises `‖B·C - P‖² + λ‖D·C‖²` where `B` is the basis matrix at
//! the chord-length parameters, `C` the control points, `P` the data and `D`
//! the second-difference operator on control points. `λ` is chosen as the
//! largest weight whose residual stays within the smoothing budget `s`, so
//! `s = 0` degenerates to a plain least-squares (interpolating when there are
//! as many control points as data points) fit.

use crate::error::{GeometryError, Result};
use crate::geometry::Point2D;
use nalgebra::DMatrix;

/// Bounds of the log10 search range for the penalty weight, relative to the
/// ratio of the data and penalty matrix traces.
const LOG_LAMBDA_MIN: f64 = -8.0;
const LOG_LAMBDA_MAX: f64 = 8.0;
const LAMBDA_BISECTIONS: usize = 60;

/// A clamped B-spline curve in the plane, parameterised over `[0, 1]`.
#[derive(Debug, Clone)]
pub struct BSpline {
    degree: usize,
    knots: Vec<f64>,
    control: Vec<Point2D>,
}

impl BSpline {
    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn control_points(&self) -> &[Point2D] {
        &self.control
    }

    /// Evaluates the curve; `u` is clamped to `[0, 1]`.
    pub fn evaluate(&self, u: f64) -> Point2D {
        let u = u.clamp(0.0, 1.0);
        let span = find_span(&self.knots, self.control.len(), self.degree, u);
        let basis = basis_functions(&self.knots, span, u, self.degree);

        let (mut x, mut y) = (0.0, 0.0);
        for (j, b) in basis.iter().enumerate() {
            let c = &self.control[span - self.degree + j];
            x += b * c.x;
            y += b * c.y;
        }
        Point2D::new(x, y)
    }

    /// Samples the curve at `count` equally spaced parameters.
    pub fn sample(&self, count: usize) -> Vec<Point2D> {
        match count {
            0 => Vec::new(),
            1 => vec![self.evaluate(0.0)],
            _ => (0..count)
                .map(|i| self.evaluate(i as f64 / (count - 1) as f64))
                .collect(),
        }
    }
}

/// Outcome of a fit.
#[derive(Debug, Clone)]
pub struct SplineFit {
    pub spline: BSpline,

    /// Chord-length parameter of each input point
    pub parameters: Vec<f64>,

    /// Sum of squared residuals at the input points
    pub residual: f64,

    /// Penalty weight that was selected
    pub lambda: f64,
}

/// Normalised cumulative chord length; first is 0, last is exactly 1.
///
/// Requires at least two points with a non-zero total length.
pub fn chord_parameters(points: &[Point2D]) -> Result<Vec<f64>> {
    let mut params = Vec::with_capacity(points.len());
    let mut total = 0.0;
    params.push(0.0);
    for w in points.windows(2) {
        total += (w[1] - w[0]).norm();
        params.push(total);
    }

    if !(total > 0.0 && total.is_finite()) {
        return Err(GeometryError::smoothing(format!(
            "path has zero or non-finite length ({})",
            total
        )));
    }

    for p in params.iter_mut() {
        *p /= total;
    }
    if let Some(last) = params.last_mut() {
        *last = 1.0;
    }
    Ok(params)
}

/// Clamped knot vector with `n_ctrl + degree + 1` entries.
///
/// Interior knots follow the data parameters: averaging when every point gets
/// its own control point, proportional placement otherwise, so that every
/// knot span holds data.
pub fn knot_vector(params: &[f64], n_ctrl: usize, degree: usize) -> Vec<f64> {
    let m = params.len();
    let mut knots = vec![0.0; n_ctrl + degree + 1];
    for k in knots.iter_mut().skip(n_ctrl) {
        *k = 1.0;
    }

    let interior = n_ctrl.saturating_sub(degree + 1);
    if interior == 0 {
        return knots;
    }

    if n_ctrl == m {
        for j in 1..=interior {
            let sum: f64 = params[j..j + degree].iter().sum();
            knots[degree + j] = sum / degree as f64;
        }
    } else {
        let d = m as f64 / (n_ctrl - degree) as f64;
        for j in 1..=interior {
            let jd = j as f64 * d;
            let i = (jd.floor() as usize).clamp(1, m - 1);
            let alpha = jd - i as f64;
            knots[degree + j] = (1.0 - alpha) * params[i - 1] + alpha * params[i];
        }
    }
    knots
}

/// Knot span index `s` with `knots[s] <= u < knots[s + 1]`, in `degree..n_ctrl`.
pub fn find_span(knots: &[f64], n_ctrl: usize, degree: usize, u: f64) -> usize {
    let upto = knots[..n_ctrl].partition_point(|&k| k <= u);
    upto.saturating_sub(1).clamp(degree, n_ctrl - 1)
}

/// The `degree + 1` non-zero basis functions on `span` at `u` (Cox-de Boor).
pub fn basis_functions(knots: &[f64], span: usize, u: f64, degree: usize) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    n[0] = 1.0;

    for j in 1..=degree {
        left[j] = u - knots[span + 1 - j];
        right[j] = knots[span + j] - u;
        let mut saved = 0.0;
        for r in 0..j {
            let denom = right[r + 1] + left[j - r];
            let temp = if denom == 0.0 { 0.0 } else { n[r] / denom };
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }
    n
}

fn design_matrix(params: &[f64], knots: &[f64], n_ctrl: usize, degree: usize) -> DMatrix<f64> {
    let mut b = DMatrix::zeros(params.len(), n_ctrl);
    for (row, &u) in params.iter().enumerate() {
        let span = find_span(knots, n_ctrl, degree, u);
        for (j, value) in basis_functions(knots, span, u, degree).into_iter().enumerate() {
            b[(row, span - degree + j)] = value;
        }
    }
    b
}

/// `DᵀD` for the second-difference operator; zero when `n_ctrl < 3`.
fn difference_penalty(n_ctrl: usize) -> DMatrix<f64> {
    if n_ctrl < 3 {
        return DMatrix::zeros(n_ctrl, n_ctrl);
    }
    let mut d = DMatrix::zeros(n_ctrl - 2, n_ctrl);
    for r in 0..n_ctrl - 2 {
        d[(r, r)] = 1.0;
        d[(r, r + 1)] = -2.0;
        d[(r, r + 2)] = 1.0;
    }
    d.transpose() * d
}

/// Normal equations of the penalised problem, reused across `λ` trials.
struct PenalizedSystem {
    design: DMatrix<f64>,
    data: DMatrix<f64>,
    normal: DMatrix<f64>,
    penalty: DMatrix<f64>,
    rhs: DMatrix<f64>,
}

impl PenalizedSystem {
    fn new(points: &[Point2D], params: &[f64], knots: &[f64], n_ctrl: usize, degree: usize) -> Self {
        let design = design_matrix(params, knots, n_ctrl, degree);
        let data = DMatrix::from_fn(points.len(), 2, |r, c| if c == 0 { points[r].x } else { points[r].y });
        let normal = design.transpose() * &design;
        let rhs = design.transpose() * &data;
        Self {
            design,
            data,
            normal,
            penalty: difference_penalty(n_ctrl),
            rhs,
        }
    }

    fn has_penalty(&self) -> bool {
        self.penalty.trace() > 0.0
    }

    /// Weight scale making `λ = 1` balance data and penalty terms.
    fn lambda_scale(&self) -> f64 {
        let p = self.penalty.trace();
        if p > 0.0 {
            self.normal.trace() / p
        } else {
            1.0
        }
    }

    /// Control points (`n_ctrl × 2`) for a given weight.
    fn solve(&self, lambda: f64) -> Result<DMatrix<f64>> {
        let a = &self.normal + &self.penalty * lambda;
        let solution = match a.clone().cholesky() {
            Some(chol) => Some(chol.solve(&self.rhs)),
            None => a.lu().solve(&self.rhs),
        };

        match solution {
            Some(c) if c.iter().all(|v| v.is_finite()) => Ok(c),
            Some(_) => Err(GeometryError::smoothing(format!(
                "non-finite control points at lambda={:e}",
                lambda
            ))),
            None => Err(GeometryError::smoothing(format!(
                "singular normal equations at lambda={:e}",
                lambda
            ))),
        }
    }

    fn residual(&self, control: &DMatrix<f64>) -> f64 {
        (&self.design * control - &self.data).norm_squared()
    }
}

/// Fits a smoothing B-spline of `degree` through `points`.
///
/// `points` must be free of consecutive duplicates and hold at least
/// `degree + 1` samples. At most `max_control_points` control points are used
/// (never fewer than `degree + 1`).
pub fn fit(
    points: &[Point2D],
    degree: usize,
    smoothing: f64,
    max_control_points: usize,
) -> Result<SplineFit> {
    let m = points.len();
    if degree == 0 || m < degree + 1 {
        return Err(GeometryError::smoothing(format!(
            "degree {} needs at least {} points, got {}",
            degree,
            degree + 1,
            m
        )));
    }

    let params = chord_parameters(points)?;
    let n_ctrl = m.min(max_control_points.max(degree + 1));
    let knots = knot_vector(&params, n_ctrl, degree);
    let system = PenalizedSystem::new(points, &params, &knots, n_ctrl, degree);

    let mut control = system.solve(0.0)?;
    let mut residual = system.residual(&control);
    let mut lambda = 0.0;

    if smoothing > 0.0 && residual < smoothing && system.has_penalty() {
        let scale = system.lambda_scale();

        let stiff = scale * 10f64.powf(LOG_LAMBDA_MAX);
        let stiff_control = system.solve(stiff)?;
        let stiff_residual = system.residual(&stiff_control);

        if stiff_residual <= smoothing {
            control = stiff_control;
            residual = stiff_residual;
            lambda = stiff;
        } else {
            // Residual grows monotonically with the weight: keep the largest
            // weight that still fits the budget.
            let (mut lo, mut hi) = (LOG_LAMBDA_MIN, LOG_LAMBDA_MAX);
            for _ in 0..LAMBDA_BISECTIONS {
                let mid = 0.5 * (lo + hi);
                let trial = scale * 10f64.powf(mid);
                let c = system.solve(trial)?;
                let r = system.residual(&c);
                if r <= smoothing {
                    lo = mid;
                    control = c;
                    residual = r;
                    lambda = trial;
                } else {
                    hi = mid;
                }
            }
        }
    }

    let control: Vec<Point2D> = (0..n_ctrl)
        .map(|i| Point2D::new(control[(i, 0)], control[(i, 1)]))
        .collect();

    Ok(SplineFit {
        spline: BSpline {
            degree,
            knots,
            control,
        },
        parameters: params,
        residual,
        lambda,
    })
}
