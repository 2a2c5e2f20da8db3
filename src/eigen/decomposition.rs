//! Eigen-decomposition of general real square matrices.

use crate::error::{AhpError, Result};

/// Unit roundoff for `f64`.
const EPS: f64 = f64::EPSILON;

/// Default sweep budget factor, scaled by `max(10, n)` as in LAPACK `dhseqr`.
const ITERATIONS_PER_EIGENVALUE: usize = 30;

/// Balancing scales by powers of two so no rounding error is introduced.
const RADIX: f64 = 2.0;

/// Eigenvalues and eigenvectors of a real, not necessarily symmetric,
/// square matrix.
///
/// The matrix is first balanced by a diagonal similarity, then reduced to
/// upper Hessenberg form with Householder reflections, then the Francis implicit double-shift QR algorithm
/// deflates it to real Schur form. Eigenvectors are recovered by
/// back-substitution and transformed back to the original basis.
///
/// Eigenvalues are reported in deflation order (by position on the
/// quasi-triangular diagonal). Complex conjugate pairs occupy consecutive
/// slots with the positive imaginary part first; for such a pair,
/// column `k` of the eigenvector matrix holds the real part and column
/// `k + 1` the imaginary part.
///
/// # References
///
/// - Wilkinson & Reinsch (1971), "Handbook for Automatic Computation,
///   Vol. II: Linear Algebra" (`balanc`, `orthes`, `hqr2`)
/// - Parlett & Reinsch (1969), "Balancing a matrix for calculation of
///   eigenvalues and eigenvectors"
/// - Golub & Van Loan (2013), "Matrix Computations", §7.5
///
/// # Examples
///
/// ```
/// use u_ahp::eigen::EigenDecomposition;
///
/// let a = vec![vec![2.0, 0.0], vec![0.0, 3.0]];
/// let eig = EigenDecomposition::new(&a, 0).unwrap();
/// let mut values = eig.real_eigenvalues().to_vec();
/// values.sort_by(|a, b| a.partial_cmp(b).unwrap());
/// assert!((values[0] - 2.0).abs() < 1e-12);
/// assert!((values[1] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    n: usize,
    /// Real parts of the eigenvalues.
    d: Vec<f64>,
    /// Imaginary parts of the eigenvalues.
    e: Vec<f64>,
    /// Eigenvector matrix, column `k` belongs to eigenvalue `k`.
    v: Vec<Vec<f64>>,
    /// Total QR sweeps performed.
    iterations: usize,
}

impl EigenDecomposition {
    /// Decomposes the square matrix `a`.
    ///
    /// `max_iterations` caps the QR sweeps spent on a single eigenvalue;
    /// `0` selects `30 * max(10, n)`.
    ///
    /// # Errors
    ///
    /// - [`AhpError::InvalidComparison`] if `a` has no rows.
    /// - [`AhpError::DimensionMismatch`] if `a` is not square.
    /// - [`AhpError::NoConvergence`] if the QR iteration stalls.
    pub fn new(a: &[Vec<f64>], max_iterations: usize) -> Result<Self> {
        let n = a.len();
        if n == 0 {
            return Err(AhpError::empty_matrix());
        }
        for row in a {
            if row.len() != n {
                return Err(AhpError::dimension_mismatch("eigen input row", n, row.len()));
            }
        }

        let budget = if max_iterations == 0 {
            ITERATIONS_PER_EIGENVALUE * n.max(10)
        } else {
            max_iterations
        };

        let mut h: Vec<Vec<f64>> = a.to_vec();
        let mut v = vec![vec![0.0; n]; n];
        let mut d = vec![0.0; n];
        let mut e = vec![0.0; n];

        let scale = balance(&mut h);
        reduce_to_hessenberg(&mut h, &mut v);
        let iterations = hessenberg_to_schur(&mut h, &mut v, &mut d, &mut e, budget)?;

        // Undo the balancing: eigenvectors of D⁻¹AD map back through D.
        for (row, &f) in v.iter_mut().zip(&scale) {
            for x in row.iter_mut() {
                *x *= f;
            }
        }

        tracing::trace!(n, iterations, "eigen-decomposition converged");

        Ok(Self {
            n,
            d,
            e,
            v,
            iterations,
        })
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Real parts of the eigenvalues, in deflation order.
    pub fn real_eigenvalues(&self) -> &[f64] {
        &self.d
    }

    /// Imaginary parts of the eigenvalues, in deflation order.
    pub fn imag_eigenvalues(&self) -> &[f64] {
        &self.e
    }

    /// Total number of QR sweeps performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Index of the eigenvalue with the largest real part.
    ///
    /// Ties resolve to the lowest index.
    pub fn dominant_index(&self) -> usize {
        let mut best = 0;
        for k in 1..self.n {
            if self.d[k] > self.d[best] {
                best = k;
            }
        }
        best
    }

    /// Real part of the `k`-th eigenvector.
    ///
    /// # Panics
    /// Panics if `k >= self.size()`.
    pub fn eigenvector_real(&self, k: usize) -> Vec<f64> {
        // The second member of a conjugate pair shares its real part
        // with the first.
        let col = if self.e[k] < 0.0 { k - 1 } else { k };
        self.v.iter().map(|row| row[col]).collect()
    }
}

/// Parlett–Reinsch balancing.
///
/// Replaces `h` with `D⁻¹ h D` for a diagonal `D` of powers of two chosen
/// so that each row and its column have comparable off-diagonal norms.
/// Reciprocal matrices with extreme ratios otherwise lose their small
/// entries to rounding in the QR sweeps. Returns the diagonal of `D`.
fn balance(h: &mut [Vec<f64>]) -> Vec<f64> {
    let n = h.len();
    let mut scale = vec![1.0; n];
    let sqrdx = RADIX * RADIX;

    let mut done = false;
    while !done {
        done = true;
        for i in 0..n {
            let mut c = 0.0;
            let mut r = 0.0;
            for j in (0..n).filter(|&j| j != i) {
                c += h[j][i].abs();
                r += h[i][j].abs();
            }
            if c == 0.0 || r == 0.0 {
                continue;
            }

            let s = c + r;
            let mut f = 1.0;
            let mut g = r / RADIX;
            while c < g {
                f *= RADIX;
                c *= sqrdx;
            }
            g = r * RADIX;
            while c > g {
                f /= RADIX;
                c /= sqrdx;
            }

            if (c + r) / f < 0.95 * s {
                done = false;
                let g = 1.0 / f;
                scale[i] *= f;
                for x in h[i].iter_mut() {
                    *x *= g;
                }
                for row in h.iter_mut() {
                    row[i] *= f;
                }
            }
        }
    }
    scale
}

/// Householder reduction to upper Hessenberg form.
///
/// On return `h` is Hessenberg and `v` holds the accumulated orthogonal
/// similarity transformation.
fn reduce_to_hessenberg(h: &mut [Vec<f64>], v: &mut [Vec<f64>]) {
    let n = h.len();
    let high = n - 1;
    let mut ort = vec![0.0; n];

    for m in 1..high {
        let scale: f64 = (m..=high).map(|i| h[i][m - 1].abs()).sum();
        if scale == 0.0 {
            continue;
        }

        let mut hh = 0.0;
        for i in (m..=high).rev() {
            ort[i] = h[i][m - 1] / scale;
            hh += ort[i] * ort[i];
        }
        let mut g = hh.sqrt();
        if ort[m] > 0.0 {
            g = -g;
        }
        hh -= ort[m] * g;
        ort[m] -= g;

        // H = (I - u u' / h) H (I - u u' / h)
        for j in m..n {
            let mut f = 0.0;
            for i in (m..=high).rev() {
                f += ort[i] * h[i][j];
            }
            f /= hh;
            for i in m..=high {
                h[i][j] -= f * ort[i];
            }
        }
        for row in h.iter_mut().take(high + 1) {
            let mut f = 0.0;
            for j in (m..=high).rev() {
                f += ort[j] * row[j];
            }
            f /= hh;
            for j in m..=high {
                row[j] -= f * ort[j];
            }
        }
        ort[m] *= scale;
        h[m][m - 1] = scale * g;
    }

    for (i, row) in v.iter_mut().enumerate() {
        for (j, x) in row.iter_mut().enumerate() {
            *x = if i == j { 1.0 } else { 0.0 };
        }
    }

    for m in (1..high).rev() {
        if h[m][m - 1] == 0.0 {
            continue;
        }
        for i in (m + 1)..=high {
            ort[i] = h[i][m - 1];
        }
        for j in m..=high {
            let mut g = 0.0;
            for i in m..=high {
                g += ort[i] * v[i][j];
            }
            // Double division avoids possible underflow.
            g = (g / ort[m]) / h[m][m - 1];
            for i in m..=high {
                v[i][j] += g * ort[i];
            }
        }
    }
}

/// Complex division `(xr + i·xi) / (yr + i·yi)`.
fn cdiv(xr: f64, xi: f64, yr: f64, yi: f64) -> (f64, f64) {
    if yr.abs() > yi.abs() {
        let r = yi / yr;
        let d = yr + r * yi;
        ((xr + r * xi) / d, (xi - r * xr) / d)
    } else {
        let r = yr / yi;
        let d = yi + r * yr;
        ((r * xr + xi) / d, (r * xi - xr) / d)
    }
}

/// Francis double-shift QR on a Hessenberg matrix followed by
/// eigenvector back-substitution.
///
/// Returns the total number of QR sweeps.
fn hessenberg_to_schur(
    h: &mut [Vec<f64>],
    v: &mut [Vec<f64>],
    d: &mut [f64],
    e: &mut [f64],
    budget: usize,
) -> Result<usize> {
    let nn = h.len();
    let low = 0usize;
    let high = nn - 1;
    let mut exshift = 0.0;
    let (mut p, mut q, mut r, mut s, mut z) = (0.0f64, 0.0f64, 0.0f64, 0.0f64, 0.0f64);
    let (mut w, mut x, mut y) = (0.0f64, 0.0f64, 0.0f64);
    let mut total_iterations = 0usize;

    let mut norm = 0.0;
    for (i, row) in h.iter().enumerate() {
        for &val in &row[i.saturating_sub(1)..] {
            norm += val.abs();
        }
    }

    // Outer loop over eigenvalue index.
    let mut n = nn as isize - 1;
    let mut iter = 0usize;
    while n >= low as isize {
        let nu = n as usize;

        // Look for a single small sub-diagonal element.
        let mut l = nu;
        while l > low {
            s = h[l - 1][l - 1].abs() + h[l][l].abs();
            if s == 0.0 {
                s = norm;
            }
            if h[l][l - 1] == 0.0 || h[l][l - 1].abs() < EPS * s {
                break;
            }
            l -= 1;
        }

        if l == nu {
            // One root found.
            h[nu][nu] += exshift;
            d[nu] = h[nu][nu];
            e[nu] = 0.0;
            n -= 1;
            iter = 0;
        } else if l + 1 == nu {
            // Two roots found.
            w = h[nu][nu - 1] * h[nu - 1][nu];
            p = (h[nu - 1][nu - 1] - h[nu][nu]) / 2.0;
            q = p * p + w;
            z = q.abs().sqrt();
            h[nu][nu] += exshift;
            h[nu - 1][nu - 1] += exshift;
            x = h[nu][nu];

            if q >= 0.0 {
                // Real pair.
                z = if p >= 0.0 { p + z } else { p - z };
                d[nu - 1] = x + z;
                d[nu] = d[nu - 1];
                if z != 0.0 {
                    d[nu] = x - w / z;
                }
                e[nu - 1] = 0.0;
                e[nu] = 0.0;
                x = h[nu][nu - 1];
                s = x.abs() + z.abs();
                p = x / s;
                q = z / s;
                r = (p * p + q * q).sqrt();
                p /= r;
                q /= r;

                // Row modification.
                for j in (nu - 1)..nn {
                    z = h[nu - 1][j];
                    h[nu - 1][j] = q * z + p * h[nu][j];
                    h[nu][j] = q * h[nu][j] - p * z;
                }
                // Column modification.
                for row in h.iter_mut().take(nu + 1) {
                    z = row[nu - 1];
                    row[nu - 1] = q * z + p * row[nu];
                    row[nu] = q * row[nu] - p * z;
                }
                // Accumulate transformations.
                for row in v.iter_mut().take(high + 1).skip(low) {
                    z = row[nu - 1];
                    row[nu - 1] = q * z + p * row[nu];
                    row[nu] = q * row[nu] - p * z;
                }
            } else {
                // Complex pair.
                d[nu - 1] = x + p;
                d[nu] = x + p;
                e[nu - 1] = z;
                e[nu] = -z;
            }
            n -= 2;
            iter = 0;
        } else {
            // No convergence yet: form the shift.
            x = h[nu][nu];
            y = 0.0;
            w = 0.0;
            if l < nu {
                y = h[nu - 1][nu - 1];
                w = h[nu][nu - 1] * h[nu - 1][nu];
            }

            // Wilkinson's ad hoc shift.
            if iter == 10 {
                exshift += x;
                for (i, row) in h.iter_mut().enumerate().take(nu + 1).skip(low) {
                    row[i] -= x;
                }
                s = h[nu][nu - 1].abs() + h[nu - 1][nu - 2].abs();
                x = 0.75 * s;
                y = x;
                w = -0.4375 * s * s;
            }

            // Exceptional shift for stubborn cycles.
            if iter == 30 {
                s = (y - x) / 2.0;
                s = s * s + w;
                if s > 0.0 {
                    s = s.sqrt();
                    if y < x {
                        s = -s;
                    }
                    s = x - w / ((y - x) / 2.0 + s);
                    for (i, row) in h.iter_mut().enumerate().take(nu + 1).skip(low) {
                        row[i] -= s;
                    }
                    exshift += s;
                    x = 0.964;
                    y = x;
                    w = x;
                }
            }

            iter += 1;
            total_iterations += 1;
            if iter > budget {
                return Err(AhpError::NoConvergence {
                    iterations: total_iterations,
                });
            }

            // Look for two consecutive small sub-diagonal elements.
            let mut m = nu - 2;
            loop {
                z = h[m][m];
                r = x - z;
                s = y - z;
                p = (r * s - w) / h[m + 1][m] + h[m][m + 1];
                q = h[m + 1][m + 1] - z - r - s;
                r = h[m + 2][m + 1];
                s = p.abs() + q.abs() + r.abs();
                p /= s;
                q /= s;
                r /= s;
                if m == l {
                    break;
                }
                if h[m][m - 1].abs() * (q.abs() + r.abs())
                    < EPS * (p.abs() * (h[m - 1][m - 1].abs() + z.abs() + h[m + 1][m + 1].abs()))
                {
                    break;
                }
                m -= 1;
            }

            for i in (m + 2)..=nu {
                h[i][i - 2] = 0.0;
                if i > m + 2 {
                    h[i][i - 3] = 0.0;
                }
            }

            // Double QR step involving rows l..=n and columns m..=n.
            let mut k = m;
            while k < nu {
                let notlast = k != nu - 1;
                if k != m {
                    p = h[k][k - 1];
                    q = h[k + 1][k - 1];
                    r = if notlast { h[k + 2][k - 1] } else { 0.0 };
                    x = p.abs() + q.abs() + r.abs();
                    if x == 0.0 {
                        k += 1;
                        continue;
                    }
                    p /= x;
                    q /= x;
                    r /= x;
                }

                s = (p * p + q * q + r * r).sqrt();
                if p < 0.0 {
                    s = -s;
                }
                if s != 0.0 {
                    if k != m {
                        h[k][k - 1] = -s * x;
                    } else if l != m {
                        h[k][k - 1] = -h[k][k - 1];
                    }
                    p += s;
                    x = p / s;
                    y = q / s;
                    z = r / s;
                    q /= p;
                    r /= p;

                    // Row modification.
                    for j in k..nn {
                        p = h[k][j] + q * h[k + 1][j];
                        if notlast {
                            p += r * h[k + 2][j];
                            h[k + 2][j] -= p * z;
                        }
                        h[k][j] -= p * x;
                        h[k + 1][j] -= p * y;
                    }

                    // Column modification.
                    for row in h.iter_mut().take(nu.min(k + 3) + 1) {
                        p = x * row[k] + y * row[k + 1];
                        if notlast {
                            p += z * row[k + 2];
                            row[k + 2] -= p * r;
                        }
                        row[k] -= p;
                        row[k + 1] -= p * q;
                    }

                    // Accumulate transformations.
                    for row in v.iter_mut().take(high + 1).skip(low) {
                        p = x * row[k] + y * row[k + 1];
                        if notlast {
                            p += z * row[k + 2];
                            row[k + 2] -= p * r;
                        }
                        row[k] -= p;
                        row[k + 1] -= p * q;
                    }
                }
                k += 1;
            }
        }
    }

    if norm == 0.0 {
        return Ok(total_iterations);
    }

    back_substitute(h, d, e, norm);

    // Back transformation to eigenvectors of the original matrix.
    for j in (low..nn).rev() {
        for i in low..=high {
            let mut acc = 0.0;
            for k in low..=j.min(high) {
                acc += v[i][k] * h[k][j];
            }
            v[i][j] = acc;
        }
    }

    Ok(total_iterations)
}

/// Solves for the eigenvectors of the quasi-triangular Schur form in place.
fn back_substitute(h: &mut [Vec<f64>], d: &[f64], e: &[f64], norm: f64) {
    let nn = h.len();
    let (mut r, mut s, mut z) = (0.0f64, 0.0f64, 0.0f64);

    for n in (0..nn).rev() {
        let p = d[n];
        let q = e[n];

        if q == 0.0 {
            // Real vector.
            let mut l = n;
            h[n][n] = 1.0;
            for i in (0..n).rev() {
                let w = h[i][i] - p;
                r = 0.0;
                for j in l..=n {
                    r += h[i][j] * h[j][n];
                }
                if e[i] < 0.0 {
                    z = w;
                    s = r;
                } else {
                    l = i;
                    if e[i] == 0.0 {
                        h[i][n] = if w != 0.0 { -r / w } else { -r / (EPS * norm) };
                    } else {
                        // Solve real equations.
                        let x = h[i][i + 1];
                        let y = h[i + 1][i];
                        let qq = (d[i] - p) * (d[i] - p) + e[i] * e[i];
                        let t = (x * s - z * r) / qq;
                        h[i][n] = t;
                        h[i + 1][n] = if x.abs() > z.abs() {
                            (-r - w * t) / x
                        } else {
                            (-s - y * t) / z
                        };
                    }

                    // Overflow control.
                    let t = h[i][n].abs();
                    if (EPS * t) * t > 1.0 {
                        for row in h.iter_mut().take(n + 1).skip(i) {
                            row[n] /= t;
                        }
                    }
                }
            }
        } else if q < 0.0 {
            // Complex vector; the pair occupies columns n-1 (real) and n (imag).
            let mut l = n - 1;

            if h[n][n - 1].abs() > h[n - 1][n].abs() {
                h[n - 1][n - 1] = q / h[n][n - 1];
                h[n - 1][n] = -(h[n][n] - p) / h[n][n - 1];
            } else {
                let (cr, ci) = cdiv(0.0, -h[n - 1][n], h[n - 1][n - 1] - p, q);
                h[n - 1][n - 1] = cr;
                h[n - 1][n] = ci;
            }
            h[n][n - 1] = 0.0;
            h[n][n] = 1.0;

            for i in (0..n.saturating_sub(1)).rev() {
                let mut ra = 0.0;
                let mut sa = 0.0;
                for j in l..=n {
                    ra += h[i][j] * h[j][n - 1];
                    sa += h[i][j] * h[j][n];
                }
                let w = h[i][i] - p;

                if e[i] < 0.0 {
                    z = w;
                    r = ra;
                    s = sa;
                } else {
                    l = i;
                    if e[i] == 0.0 {
                        let (cr, ci) = cdiv(-ra, -sa, w, q);
                        h[i][n - 1] = cr;
                        h[i][n] = ci;
                    } else {
                        // Solve complex equations.
                        let x = h[i][i + 1];
                        let y = h[i + 1][i];
                        let mut vr = (d[i] - p) * (d[i] - p) + e[i] * e[i] - q * q;
                        let vi = (d[i] - p) * 2.0 * q;
                        if vr == 0.0 && vi == 0.0 {
                            vr = EPS * norm * (w.abs() + q.abs() + x.abs() + y.abs() + z.abs());
                        }
                        let (cr, ci) = cdiv(
                            x * r - z * ra + q * sa,
                            x * s - z * sa - q * ra,
                            vr,
                            vi,
                        );
                        h[i][n - 1] = cr;
                        h[i][n] = ci;
                        if x.abs() > z.abs() + q.abs() {
                            h[i + 1][n - 1] = (-ra - w * h[i][n - 1] + q * h[i][n]) / x;
                            h[i + 1][n] = (-sa - w * h[i][n] - q * h[i][n - 1]) / x;
                        } else {
                            let (cr, ci) = cdiv(-r - y * h[i][n - 1], -s - y * h[i][n], z, q);
                            h[i + 1][n - 1] = cr;
                            h[i + 1][n] = ci;
                        }
                    }

                    // Overflow control.
                    let t = h[i][n - 1].abs().max(h[i][n].abs());
                    if (EPS * t) * t > 1.0 {
                        for row in h.iter_mut().take(n + 1).skip(i) {
                            row[n - 1] /= t;
                            row[n] /= t;
                        }
                    }
                }
            }
        }
    }
}
