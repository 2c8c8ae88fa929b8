//! HTML snippets inserted by the controllers.

const CLASS_OK: &str = "green-text";
const CLASS_ERROR: &str = "red-text";

pub const NO_PLOTS: &str = "No plots available.";
pub const CONNECTION_LOST: &str = "Connection to the log stream was lost.";

pub fn escape_html(text: &str) -> String {
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

/// One line of log output. Error lines are rendered bold and red.
pub fn log_line(text: &str, error: bool) -> String {
    if error {
        format!(
            r#"<pre class="log-line {CLASS_ERROR}"><code class="log-error">{}</code></pre>"#,
            escape_html(text)
        )
    } else {
        format!(
            r#"<pre class="log-line {CLASS_OK}"><code>{}</code></pre>"#,
            escape_html(text)
        )
    }
}

/// Gallery tile for a generated plot image.
pub fn plot_tile(src: &str, caption: &str) -> String {
    format!(
        r#"<div class="col s12 m6 plot-tile"><img class="responsive-img materialboxed" src="{}" alt="{}"></div>"#,
        escape_html(src),
        escape_html(caption)
    )
}

/// Stand-in shown in the gallery when a run produced no plots.
pub fn plot_placeholder() -> String {
    format!(r#"<div class="col s12 plot-placeholder"><p class="grey-text">{NO_PLOTS}</p></div>"#)
}

/// Notification markup: trimmed, escaped, one `<br />` per newline.
pub fn message_html(message: &str) -> String {
    message
        .trim()
        .lines()
        .map(escape_html)
        .collect::<Vec<_>>()
        .join("<br />")
}
