#![deny(missing_docs)]
#![doc = "Decomposition of products of more than two angular momentum states into the total angular momentum basis, built on the CG table query API."]

use std::collections::{BTreeMap, VecDeque};
use std::str::FromStr;

use cg_core::{CgError, ErrorInfo, HalfInt, SignedSquare};
use cg_table::Table;

pub mod latex;

/// An angular momentum eigenstate |j,m> carried with a signed-square
/// amplitude and the subspace path identifying which copy of the
/// 2j+1-dimensional irreducible subspace it lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// Signed-square encoded expansion amplitude.
    pub amplitude: SignedSquare,
    /// Doubled total angular momentum.
    pub twoj: i32,
    /// Doubled z projection.
    pub twom: i32,
    /// Sequence of intermediate doubled j values reached while coupling
    /// left to right; uniquely identifies the subspace.
    pub subspace_path: Vec<i32>,
}

/// Explicit cache of constructed tables keyed by the canonical
/// (larger, smaller) doubled pair. Populated lazily, never evicted; owned by
/// the caller and passed through [`decompose`] so repeated decompositions
/// share the work.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: BTreeMap<(i32, i32), Table>,
}

impl TableCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct tables constructed so far.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no table has been constructed yet.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns the table for the canonical pair, constructing it on first
    /// use.
    pub fn table(&mut self, twojmax: i32, twojmin: i32) -> Result<&Table, CgError> {
        use std::collections::btree_map::Entry;
        match self.tables.entry((twojmax, twojmin)) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(Table::build(twojmax, twojmin)?)),
        }
    }
}

/// The expansion of a tensor product of input states into the total angular
/// momentum basis.
#[derive(Debug)]
pub struct Decomposition {
    input_states: Vec<State>,
    expanded_states: Vec<State>,
    subspace_paths: Vec<Vec<i32>>,
    subspace_index: BTreeMap<Vec<i32>, usize>,
}

impl Decomposition {
    /// The parsed input states, in order.
    pub fn input_states(&self) -> &[State] {
        &self.input_states
    }

    /// The fully expanded states in the total angular momentum basis.
    pub fn expanded_states(&self) -> &[State] {
        &self.expanded_states
    }

    /// All irreducible subspace paths, sorted by total angular momentum
    /// (paths compared right to left).
    pub fn subspace_paths(&self) -> &[Vec<i32>] {
        &self.subspace_paths
    }

    /// Index of a subspace path within [`Decomposition::subspace_paths`].
    pub fn subspace_index(&self, path: &[i32]) -> Option<usize> {
        self.subspace_index.get(path).copied()
    }
}

fn states_format_error() -> CgError {
    CgError::Input(ErrorInfo::new(
        "states-format",
        "input must be in the format j1,m1;j2,m2[;...;jk,mk]",
    ))
}

fn parse_state(part: &str) -> Result<State, CgError> {
    let (j_str, m_str) = part.split_once(',').ok_or_else(states_format_error)?;
    let twoj = HalfInt::from_str(j_str.trim())?.doubled();
    let twom = HalfInt::from_str(m_str.trim())?.doubled();
    if twoj < 0 {
        return Err(CgError::Input(
            ErrorInfo::new("invalid-j", "j must be non-negative").with_context("j", j_str.trim()),
        ));
    }
    if twom > twoj || twom < -twoj || (twoj - twom) % 2 != 0 {
        return Err(CgError::Input(
            ErrorInfo::new("invalid-m", "m must lie in -j..=j and differ from j by an integer")
                .with_context("j", j_str.trim())
                .with_context("m", m_str.trim()),
        ));
    }
    Ok(State {
        amplitude: SignedSquare::one(),
        twoj,
        twom,
        subspace_path: vec![twoj],
    })
}

/// Orders subspace paths by comparing elements right to left, i.e. by final
/// total angular momentum first.
fn cmp_paths(a: &[i32], b: &[i32]) -> std::cmp::Ordering {
    for (x, y) in a.iter().rev().zip(b.iter().rev()) {
        match x.cmp(y) {
            std::cmp::Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

fn extended(path: &[i32], twoj: i32) -> Vec<i32> {
    let mut next = path.to_vec();
    next.push(twoj);
    next
}

/// Decomposes a tensor product of angular momentum eigenstates, given as
/// `j1,m1;j2,m2[;...;jk,mk]` over the `<int>`/`<int>/2` half-integer grammar,
/// into the total angular momentum basis.
///
/// Tables are taken from (and added to) the caller-owned `cache`, one per
/// distinct canonical (j, j') pair encountered while coupling left to right.
pub fn decompose(input: &str, cache: &mut TableCache) -> Result<Decomposition, CgError> {
    let parts: Vec<&str> = input.split(';').collect();
    if parts.len() <= 1 {
        return Err(states_format_error());
    }
    let mut input_states = Vec::with_capacity(parts.len());
    for part in &parts {
        input_states.push(parse_state(part)?);
    }

    // Enumerate the dimensions of all irreducible subspaces breadth first:
    // each coupling step fans a path ending in j1 out to |j1-j2|..=j1+j2.
    let mut queue: VecDeque<(Vec<i32>, i32)> = VecDeque::new();
    queue.push_back((input_states[0].subspace_path.clone(), input_states[0].twoj));
    for state in &input_states[1..] {
        let twoj2 = state.twoj;
        for _ in 0..queue.len() {
            if let Some((prefix, twoj1)) = queue.pop_front() {
                let mut twoj = (twoj1 - twoj2).abs();
                while twoj <= twoj1 + twoj2 {
                    queue.push_back((extended(&prefix, twoj), twoj));
                    twoj += 2;
                }
            }
        }
    }
    let mut subspace_paths: Vec<Vec<i32>> = queue.into_iter().map(|(path, _)| path).collect();
    subspace_paths.sort_by(|a, b| cmp_paths(a, b));
    let subspace_index: BTreeMap<Vec<i32>, usize> = subspace_paths
        .iter()
        .enumerate()
        .map(|(idx, path)| (path.clone(), idx))
        .collect();

    // Expand the tensor product into the |j,m> basis, consuming the input
    // states left to right; `head` holds the partially expanded states.
    let mut head = vec![input_states[0].clone()];
    for state2 in &input_states[1..] {
        let mut next_head = Vec::new();
        for state1 in &head {
            let exchanged = state1.twoj < state2.twoj;
            let (twojmax, twojmin) = if exchanged {
                (state2.twoj, state1.twoj)
            } else {
                (state1.twoj, state2.twoj)
            };
            let twom = state1.twom + state2.twom;
            // Coupling against j = 0 leaves the state untouched.
            if twojmin == 0 {
                next_head.push(State {
                    amplitude: state1.amplitude.clone(),
                    twoj: twojmax,
                    twom,
                    subspace_path: extended(&state1.subspace_path, twojmax),
                });
                continue;
            }
            let table = cache.table(twojmax, twojmin)?;
            let mut twoj = twojmax - twojmin;
            while twoj <= twojmax + twojmin {
                let coeff = if exchanged {
                    table.query_exchanged(twoj, twom, state2.twom, state1.twom)
                } else {
                    table.query(twoj, twom, state1.twom, state2.twom)
                };
                if !coeff.is_zero() {
                    next_head.push(State {
                        amplitude: state1.amplitude.product(&coeff),
                        twoj,
                        twom,
                        subspace_path: extended(&state1.subspace_path, twoj),
                    });
                }
                twoj += 2;
            }
        }
        head = next_head;
    }

    Ok(Decomposition {
        input_states,
        expanded_states: head,
        subspace_paths,
        subspace_index,
    })
}
