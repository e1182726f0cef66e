#![deny(missing_docs)]
#![doc = "Exact Clebsch-Gordan coefficient tables: per-column concurrent construction over signed-square arithmetic, with a symmetry-reducing query surface."]

mod cell;
mod column;
mod latch;
mod table;

pub use table::Table;
