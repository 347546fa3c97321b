//! Plain-text renderer for terminals. Winning quotient cells are marked with `*`.

use std::fmt::Write as _;

use dh_algo::{DisplayCell, DisplayValue};

use crate::{fmt_int, ReportModel};

/// Render the report as aligned plain text (LF line endings, trailing newline).
pub fn render_text(model: &ReportModel) -> String {
    let mut out = String::with_capacity(4 * 1024);
    let t = &model.totals;

    let _ = writeln!(out, "{}", model.title);
    let _ = writeln!(
        out,
        "Seats: {} | Candidates: {} | Total votes: {}",
        t.seats_allocated,
        t.candidates,
        fmt_int(t.total_votes)
    );
    if model.last_seat_tie {
        let _ = writeln!(out, "Note: the last seat was decided between equal quotients.");
    }

    out.push_str("\nVotes\n");
    let rows: Vec<Vec<String>> = model
        .votes
        .iter()
        .map(|r| vec![r.name.clone(), fmt_int(r.votes), format!("{}%", r.share_pct), r.seats.to_string()])
        .collect();
    write_table(&mut out, &["Party", "Votes", "Share", "Seats"], &rows);

    out.push_str("\nSeats\n");
    if model.winners.is_empty() {
        out.push_str("(none)\n");
    } else {
        let rows: Vec<Vec<String>> =
            model.winners.iter().map(|w| vec![w.name.clone(), w.seats.to_string()]).collect();
        write_table(&mut out, &["Party", "Seats"], &rows);
    }

    if !model.matrix.rows.is_empty() {
        out.push_str("\nQuotients (* = seat awarded)\n");
        let mut header = vec!["Party"];
        header.extend(model.matrix.headers.iter().map(String::as_str));
        let rows: Vec<Vec<String>> = model
            .matrix
            .rows
            .iter()
            .map(|r| {
                std::iter::once(r.name.clone())
                    .chain(r.cells.iter().map(cell_text))
                    .collect()
            })
            .collect();
        write_table(&mut out, &header, &rows);
    }

    if let Some(id) = &model.result_id {
        let _ = writeln!(out, "\n{id}");
    }
    out
}

fn cell_text(c: &DisplayCell) -> String {
    let v = match c.value {
        DisplayValue::Int(n) => n.to_string(),
        DisplayValue::Real(x) => format!("{x:.2}"),
    };
    if c.highlighted { format!("*{v}") } else { v }
}

/// First column left-aligned, the rest right-aligned; widths in chars.
fn write_table(out: &mut String, header: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }
    write_line(out, &widths, header.iter().copied());
    for row in rows {
        write_line(out, &widths, row.iter().map(String::as_str));
    }
}

fn write_line<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    let parts: Vec<String> = cells
        .enumerate()
        .map(|(i, cell)| {
            let w = widths.get(i).copied().unwrap_or(0);
            let pad = " ".repeat(w.saturating_sub(cell.chars().count()));
            if i == 0 { format!("{cell}{pad}") } else { format!("{pad}{cell}") }
        })
        .collect();
    let _ = writeln!(out, "{}", parts.join("  ").trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_model;
    use dh_algo::{apportion, Candidate};
    use dh_core::variables::{DisplayRounding, Params};

    #[test]
    fn worked_example_text() {
        let cs = vec![Candidate::new("A", 1000), Candidate::new("B", 500), Candidate::new("C", 250)];
        let p = Params { seats: 4, ..Params::default() };
        let txt = render_text(&build_model(&apportion(&cs, 4), &p, None).unwrap());
        let expected = "\
D'Hondt seat allocation
Seats: 4 | Candidates: 3 | Total votes: 1,750

Votes
Party  Votes   Share  Seats
A      1,000  57.14%      3
B        500  28.57%      1
C        250  14.29%      0

Seats
Party  Seats
A          3
B          1

Quotients (* = seat awarded)
Party     ÷1    ÷2    ÷3   ÷4
A      *1000  *500  *333  250
B       *500   250   167  125
C        250   125    83   62
";
        assert_eq!(txt, expected);
    }

    #[test]
    fn tie_note_and_real_values() {
        let cs = vec![Candidate::new("A", 100), Candidate::new("B", 100)];
        let p = Params { seats: 1, display_rounding: DisplayRounding::None, ..Params::default() };
        let txt = render_text(&build_model(&apportion(&cs, 1), &p, Some("RES:1")).unwrap());
        assert!(txt.contains("decided between equal quotients"));
        assert!(txt.contains("*100.00"));
        assert!(txt.ends_with("RES:1\n"));
    }

    #[test]
    fn no_seats() {
        let p = Params { seats: 0, ..Params::default() };
        let txt = render_text(&build_model(&apportion(&[Candidate::new("A", 1)], 0), &p, None).unwrap());
        assert!(txt.contains("Seats\n(none)\n"));
        assert!(!txt.contains("Quotients"));
    }
}
