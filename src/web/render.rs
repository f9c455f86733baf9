//! HTML rendering of quiz views
//!
//! Pages are plain server-rendered forms; the browser's own `min`/`max`
//! checks on number inputs keep values in range before they are posted.

use std::fmt::Write;

use super::chart;
use crate::metrics::Comparison;
use crate::session::{PhotoCard, Screen, View, MAX_AGE, MIN_GUESS};

/// Value shown in a guess input that has not been touched yet
pub const DEFAULT_GUESS: u32 = 18;

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
.grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 1rem; }
.card { border: 1px solid #ccc; border-radius: 8px; padding: 1rem; }
.card img { width: 300px; max-width: 100%; display: block; }
.warning { background: #fff3cd; border: 1px solid #e0c36a; padding: 0.75rem; border-radius: 6px; }
.success { background: #d4edda; border: 1px solid #8fc99b; padding: 0.75rem; border-radius: 6px; }
.caption { color: #666; }
table { border-collapse: collapse; margin: 1rem 0; }
th, td { border: 1px solid #ccc; padding: 0.4rem 1rem; text-align: left; }
"#;

/// Escape text for use in HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a complete HTML document for the view
pub fn page(view: &View) -> String {
    let (title, body) = match &view.screen {
        Screen::Start => ("Age Duel", start_body()),
        Screen::Answering {
            declared_age,
            declared_profession,
            photos,
        } => (
            "Guess the Ages in the Photos",
            answering_body(*declared_age, declared_profession, photos),
        ),
        Screen::Result { comparison, .. } => ("Challenge Results", result_body(comparison)),
    };

    let warning = view
        .warning
        .as_deref()
        .map(|w| format!(r#"<p class="warning">{}</p>"#, escape(w)))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>{title}</title><style>{STYLE}</style></head>\
         <body><h1>{title}</h1>{warning}{body}</body></html>\n"
    )
}

fn start_body() -> String {
    format!(
        r#"<h3>Who guesses ages better? You or the machine?</h3>
<form method="post" action="/start">
<p><label>Your age <input type="number" name="age" min="0" max="{MAX_AGE}" step="1" value="0" required></label></p>
<p><label>Your profession <input type="text" name="profession"></label></p>
<p><button type="submit">Start</button></p>
</form>"#
    )
}

fn answering_body(declared_age: Option<u32>, declared_profession: &str, photos: &[PhotoCard]) -> String {
    let age = declared_age.map(|a| a.to_string()).unwrap_or_default();
    let mut body = format!(
        r#"<p class="caption">Declared age: {} | Profession: {}</p><hr><p>Enter your age guess for each photo:</p><form method="post" action="/finish"><div class="grid">"#,
        age,
        escape(declared_profession)
    );

    for photo in photos {
        let number = photo.index + 1;
        let _ = write!(
            body,
            r#"<div class="card"><img src="/images/{index}" alt="Photo {number}" title="{image}"><p>Photo {number}</p><label>Your guess for Photo {number} <input type="number" name="guess_{index}" min="{MIN_GUESS}" max="{MAX_AGE}" step="1" value="{value}"></label></div>"#,
            index = photo.index,
            image = escape(&photo.image),
            value = photo.guess.unwrap_or(DEFAULT_GUESS),
        );
    }

    body.push_str(r#"</div><hr><p><button type="submit">Finish and See Results</button></p></form>"#);
    body
}

fn result_body(comparison: &Comparison) -> String {
    let mut body = format!(
        r#"<p class="success">Your mean absolute error (MAE): <strong>{:.2} years</strong></p><h3>Comparison with the models:</h3><table><thead><tr><th>Model</th><th>MAE</th></tr></thead><tbody>"#,
        comparison.user_mae
    );

    for row in &comparison.rows {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{:.2}</td></tr>",
            escape(&row.label),
            row.mean_absolute_error
        );
    }
    body.push_str("</tbody></table>");
    body.push_str(&chart::bar_chart(comparison));

    let model_count = comparison.rows.iter().filter(|r| !r.is_user).count();
    let _ = write!(
        body,
        r#"<p class="success">Experiment finished. You beat {} of {} models. Compare your performance with the AI!</p><form method="post" action="/restart"><button type="submit">Start Over</button></form>"#,
        comparison.models_beaten(),
        model_count
    );
    body
}
