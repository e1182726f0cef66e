//! LaTeX rendering of decompositions.

use cg_core::{CgError, ErrorInfo, SignedSquare};

use crate::{Decomposition, State};

/// A half integer (doubled representation) in LaTeX, whole values as plain
/// integers and half-odd values as `\frac{n}{2}`.
pub fn half_latex(twov: i32) -> String {
    let (sign, twov) = if twov < 0 { ("-", -twov) } else { ("", twov) };
    if twov % 2 == 0 {
        format!("{sign}{}", twov / 2)
    } else {
        format!("{sign}\\frac{{{twov}}}{{2}}")
    }
}

/// A subspace path as a bracketed list of half integers.
pub fn path_latex(path: &[i32]) -> String {
    let parts: Vec<String> = path.iter().map(|&twov| half_latex(twov)).collect();
    format!("\\left[{}\\right]", parts.join(","))
}

/// The ket |j,m>.
pub fn jm_latex(twoj: i32, twom: i32) -> String {
    format!(
        "\\left|{},{}\\right\\rangle",
        half_latex(twoj),
        half_latex(twom)
    )
}

/// A signed-square amplitude as a signed square root of a rational.
pub fn amplitude_latex(amplitude: &SignedSquare) -> String {
    let sign = if amplitude.signum() < 0 { "-" } else { "" };
    let magnitude = amplitude.magnitude_squared();
    format!(
        "{sign}\\sqrt{{\\frac{{{}}}{{{}}}}}",
        magnitude.numer(),
        magnitude.denom()
    )
}

fn state_latex(state: &State) -> String {
    format!(
        "{}{}",
        amplitude_latex(&state.amplitude),
        jm_latex(state.twoj, state.twom)
    )
}

impl Decomposition {
    fn indexed(&self, path: &[i32]) -> Result<usize, CgError> {
        self.subspace_index(path).ok_or_else(|| {
            CgError::Invariant(
                ErrorInfo::new("subspace-index", "expanded state references an unknown subspace")
                    .with_context("path", format!("{path:?}")),
            )
        })
    }

    /// Renders the decomposition as LaTeX `align` lines: subspace
    /// compositions, dimensions, total angular momenta, and the expansion of
    /// the input tensor product in the total angular momentum basis.
    pub fn latex(&self) -> Result<String, CgError> {
        let mut out = String::new();

        out.push_str("\\mbox{irreducible subspace compositions} & &");
        for (idx, path) in self.subspace_paths().iter().enumerate() {
            if idx == 0 {
                out.push_str(&format!("{idx}&:{}", path_latex(path)));
            } else {
                out.push_str(&format!("\\qquad {idx}:{}", path_latex(path)));
            }
        }
        out.push_str("\\\\\n");

        out.push_str("\\mbox{irreducible subspace dimensions} & &");
        let dims: Vec<String> = self
            .input_states()
            .iter()
            .map(|state| (state.twoj + 1).to_string())
            .collect();
        out.push_str(&dims.join("\\otimes "));
        out.push_str(" &= ");
        let mut sums = Vec::with_capacity(self.subspace_paths().len());
        for path in self.subspace_paths() {
            let twoj = path.last().copied().unwrap_or(0);
            sums.push(format!("{}_{{{}}}", twoj + 1, self.indexed(path)?));
        }
        out.push_str(&sums.join("\\oplus "));
        out.push_str("\\\\\n");

        out.push_str("\\mbox{irreducible subspace total angular momenta} & &");
        let momenta: Vec<String> = self
            .input_states()
            .iter()
            .map(|state| half_latex(state.twoj))
            .collect();
        out.push_str(&momenta.join("\\otimes "));
        out.push_str(" &= ");
        let mut sums = Vec::with_capacity(self.subspace_paths().len());
        for path in self.subspace_paths() {
            let twoj = path.last().copied().unwrap_or(0);
            let idx = self.indexed(path)?;
            if twoj % 2 != 0 {
                sums.push(format!("\\left({}\\right)_{{{idx}}}", half_latex(twoj)));
            } else {
                sums.push(format!("{}_{{{idx}}}", twoj / 2));
            }
        }
        out.push_str(&sums.join("\\oplus "));
        out.push_str("\\\\\n");

        out.push_str("\\mbox{expansion in total angular momenta basis} & &");
        let kets: Vec<String> = self
            .input_states()
            .iter()
            .map(|state| jm_latex(state.twoj, state.twom))
            .collect();
        out.push_str(&kets.join("\\otimes "));
        out.push_str(" &= ");
        if self.expanded_states().is_empty() {
            out.push('0');
        } else {
            for (idx, state) in self.expanded_states().iter().enumerate() {
                let term = format!(
                    "{}_{{{}}}",
                    state_latex(state),
                    self.indexed(&state.subspace_path)?
                );
                if idx != 0 && !term.starts_with('-') {
                    out.push('+');
                }
                out.push_str(&term);
            }
        }
        out.push_str("\\\\\n");

        Ok(out)
    }
}
