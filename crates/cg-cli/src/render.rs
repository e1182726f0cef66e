//! HTML rendering of a full coefficient table.
//!
//! The renderer is a pure consumer of the table's query API: sections run
//! over m from j1+j2 down to -(j1+j2), and the negative-m half as well as
//! tables constructed in exchanged operand order come out of `query` with
//! the right phases already applied.

use std::fmt::Write;

use cg_core::HalfInt;
use cg_table::Table;

/// Page heading for a table.
pub fn table_title(table: &Table) -> String {
    format!(
        "Clebsch-Gordan Coefficients for j1 = {}, j2 = {}",
        HalfInt::from_doubled(table.twoj1()),
        HalfInt::from_doubled(table.twoj2())
    )
}

/// Renders the full coefficient table as an HTML `<table>` body.
pub fn table_body(table: &Table) -> String {
    let twojmax = table.twoj1() + table.twoj2();
    let mut out = String::new();
    out.push_str("<table>\n");
    out.push_str("  <tr>\n    <td>m</td>\n    <td>m1</td>\n    <td>m2</td>\n  </tr>\n");
    let mut section_idx = 0usize;
    let mut twom = twojmax;
    while twom >= -twojmax {
        render_section(&mut out, table, twom, section_idx);
        section_idx += 1;
        twom -= 2;
    }
    out.push_str("</table>\n");
    out
}

fn render_section(out: &mut String, table: &Table, twom: i32, section_idx: usize) {
    let twoj1 = table.twoj1();
    let twoj2 = table.twoj2();
    let twojmax = twoj1 + twoj2;
    let diff = (twoj1 - twoj2).abs();

    // m1 bounds at |m|; the mirrored half reuses them with negated labels.
    let magnitude = twom.abs();
    let max_twom1 = twoj1.min(magnitude + twoj2);
    let min_twom1 = (-twoj1).max(magnitude - twoj2);
    let rows = ((max_twom1 - min_twom1) / 2 + 1) as usize;
    let depth = (twojmax - magnitude) / 2;
    let max_dj = depth.min(twoj1.min(twoj2));

    // A new j column opens at every m from j1+j2 down to j1-j2.
    if twom >= diff {
        let _ = write!(
            out,
            "  <tr>\n    <td class=\"blank\" colspan=\"3\"></td>\n    \
             <td class=\"jheading\">j = {}</td>\n  </tr>\n",
            HalfInt::from_doubled(twom)
        );
    }

    let stripe = if section_idx % 2 == 0 { "even" } else { "odd" };
    let (m_class, m1_class) = if section_idx % 2 == 0 {
        ("meven", "m1even")
    } else {
        ("modd", "m1odd")
    };
    let sign = if twom < 0 { -1 } else { 1 };
    for l in 0..rows {
        let twom1 = sign * (max_twom1 - 2 * l as i32);
        let twom2 = twom - twom1;
        let _ = write!(out, "  <tr class=\"{stripe}\">\n");
        if l == 0 {
            let _ = write!(
                out,
                "    <td rowspan=\"{rows}\" class=\"{m_class}\">{}</td>\n",
                HalfInt::from_doubled(twom)
            );
        }
        let _ = write!(
            out,
            "    <td class=\"{m1_class}\">{}</td>\n    <td class=\"{m1_class}\">{}</td>\n",
            HalfInt::from_doubled(twom1),
            HalfInt::from_doubled(twom2)
        );
        for dj in 0..=max_dj {
            let twoj = twojmax - 2 * dj;
            let _ = write!(out, "    <td>{}</td>\n", table.query(twoj, twom, twom1, twom2));
        }
        out.push_str("  </tr>\n");
    }
}
