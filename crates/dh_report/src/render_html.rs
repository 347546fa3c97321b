// crates/dh_report/src/render_html.rs
//
// Deterministic, offline HTML renderer (embedded template, no external assets).
// User content is auto-escaped by the template engine (`.html` template name).

use minijinja::{context, Environment};

use crate::{fmt_int, ReportError, ReportModel};

static TEMPLATE: &str = r#"<!doctype html>
<html lang="en"><head><meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{{ m.title }}</title>
<style>
body{font-family:system-ui,-apple-system,Segoe UI,Roboto,Ubuntu,Arial,sans-serif;margin:24px}
table{border-collapse:collapse;margin:8px 0 16px}
td,th{padding:4px 8px;border-bottom:1px solid #ddd}
th{text-align:center;font-weight:bold}
td.num{text-align:right}
td.win{background-color:#1f6feb;color:white;font-weight:bold;border:2px solid #0b4eda}
.note{font-style:italic;opacity:0.9}
</style></head><body>
<h1>{{ m.title }}</h1>
<p>Seats: <b>{{ m.totals.seats_allocated }}</b> &nbsp;|&nbsp; Candidates: <b>{{ m.totals.candidates }}</b> &nbsp;|&nbsp; Total votes: <b>{{ m.totals.total_votes | int }}</b></p>
{% if m.last_seat_tie %}<p class="note">The last seat was decided between equal quotients (earlier row wins).</p>{% endif %}

<h2>Votes</h2>
<table><thead><tr><th>Party</th><th>Votes</th><th>Share</th><th>Seats</th></tr></thead><tbody>
{% for r in m.votes %}<tr><td>{{ r.name }}</td><td class="num">{{ r.votes | int }}</td><td class="num">{{ r.share_pct }}%</td><td class="num">{{ r.seats }}</td></tr>
{% endfor %}</tbody></table>

<h2>Seats</h2>
{% if m.winners %}<table><thead><tr><th>Party</th><th>Seats</th></tr></thead><tbody>
{% for w in m.winners %}<tr><td>{{ w.name }}</td><td class="num">{{ w.seats }}</td></tr>
{% endfor %}</tbody></table>{% else %}<p>No seats allocated.</p>{% endif %}

{% if m.matrix.rows %}<h2>Quotients</h2>
<table><thead><tr><th>Party</th>{% for h in m.matrix.headers %}<th>{{ h }}</th>{% endfor %}</tr></thead><tbody>
{% for row in m.matrix.rows %}<tr><td>{{ row.name }}</td>{% for c in row.cells %}<td class="{{ "win" if c.highlighted else "num" }}">{{ c.value }}</td>{% endfor %}</tr>
{% endfor %}</tbody></table>{% endif %}
{% if m.result_id %}<p class="note">{{ m.result_id }}</p>{% endif %}
</body></html>
"#;

/// Render the report as a standalone HTML page. Winning quotient cells carry `class="win"`.
pub fn render_html(model: &ReportModel) -> Result<String, ReportError> {
    let mut env = Environment::new();
    env.add_filter("int", fmt_int);
    env.add_template("report.html", TEMPLATE)
        .map_err(|_| ReportError::Template("add_template"))?;
    let tmpl = env
        .get_template("report.html")
        .map_err(|_| ReportError::Template("get_template"))?;
    tmpl.render(context! { m => model })
        .map_err(|_| ReportError::Template("render_html"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_model;
    use dh_algo::{apportion, Candidate};
    use dh_core::variables::Params;

    fn page(cs: &[Candidate], seats: i64) -> String {
        let p = Params { seats, ..Params::default() };
        render_html(&build_model(&apportion(cs, seats), &p, None).unwrap()).unwrap()
    }

    #[test]
    fn highlights_exactly_the_allocated_cells() {
        let cs = vec![Candidate::new("A", 1000), Candidate::new("B", 500), Candidate::new("C", 250)];
        let html = page(&cs, 4);
        assert_eq!(html.matches("<td class=\"win\">").count(), 4);
        assert!(html.contains("<th>÷4</th>"));
        assert!(html.contains("<td class=\"num\">62</td>"));
        assert!(html.contains("1,000"));
        assert!(html.contains("#1f6feb"));
    }

    #[test]
    fn names_are_escaped() {
        let html = page(&[Candidate::new("<b>X & Y</b>", 5)], 1);
        assert!(html.contains("&lt;b&gt;X &amp; Y&lt;"));
        assert!(!html.contains("<b>X"));
    }

    #[test]
    fn empty_run_has_no_matrix() {
        let html = page(&[], 5);
        assert!(html.contains("No seats allocated."));
        assert!(!html.contains("<h2>Quotients</h2>"));
    }
}
