//! Server-rendered HTML page for the workout log.

use aceest_core::{Category, Listing, Progress, Summary, TIMESTAMP_FORMAT};
use std::fmt::Write;

/// Escape text for use inside HTML element content or attribute values
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the log, summary and progress as a standalone page
pub fn render_page(listing: &Listing, summary: &Summary, progress: &Progress) -> String {
    let mut html = String::new();

    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>ACEest Fitness</title>\n</head>\n<body>\n<h1>ACEest Fitness</h1>\n",
    );

    // Writing into a String cannot fail
    let _ = write!(
        html,
        "<section id=\"summary\">\n<p>Total time: <strong>{} min</strong></p>\n\
         <p class=\"motivation\">{}</p>\n</section>\n",
        summary.total_time,
        escape_html(&summary.motivation.message)
    );

    html.push_str("<section id=\"progress\">\n<table>\n<tr><th>Category</th><th>Minutes</th><th>Share</th></tr>\n");
    for category in Category::ALL {
        let minutes = progress.totals.get(&category).copied().unwrap_or(0);
        let pct = progress.percentages.get(&category).copied().unwrap_or(0.0);
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{:.1}%</td></tr>",
            category, minutes, pct
        );
    }
    html.push_str("</table>\n</section>\n");

    let _ = writeln!(
        html,
        "<section id=\"workouts\">\n<h2>Logged workouts ({})</h2>",
        listing.count
    );
    if listing.workouts.is_empty() {
        html.push_str("<p>No workouts logged yet.</p>\n");
    } else {
        html.push_str("<ul>\n");
        for w in &listing.workouts {
            let _ = writeln!(
                html,
                "<li>[{}] {} - {} min <time>{}</time></li>",
                w.category,
                escape_html(&w.entry.exercise),
                w.entry.duration,
                w.entry.timestamp.format(TIMESTAMP_FORMAT)
            );
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n</body>\n</html>\n");

    html
}
