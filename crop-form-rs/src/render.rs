//! HTML page rendering
//!
//! One page: the measurement form plus a result modal. The modal carries
//! `data-show="true"` only when the view model has something to display;
//! `/static/script.js` opens and dismisses it.

use std::fmt::Write;

use crate::validation::REQUIRED_FIELDS;
use crate::view_model::ViewModel;

/// Form labels for each required field
fn field_label(name: &str) -> &'static str {
    match name {
        "N" => "Nitrogen (N)",
        "P" => "Phosphorus (P)",
        "K" => "Potassium (K)",
        "temperature" => "Temperature (°C)",
        "humidity" => "Humidity (%)",
        "ph" => "Soil pH",
        "rainfall" => "Rainfall (mm)",
        _ => "Measurement",
    }
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Narrative text as paragraphs; blank lines split paragraphs, single newlines become `<br>`
pub fn format_content(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|para| !para.is_empty())
        .map(|para| format!("<p>{}</p>", escape_html(para).replace('\n', "<br>")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_form(vm: &ViewModel, out: &mut String) {
    out.push_str("    <form method=\"POST\" action=\"/\" class=\"measurement-form\">\n");
    for name in REQUIRED_FIELDS {
        let value = vm.input_value(name).unwrap_or("");
        let _ = write!(
            out,
            "      <label for=\"{id}\">{label}</label>\n      \
             <input type=\"number\" step=\"any\" id=\"{id}\" name=\"{id}\" value=\"{value}\" required>\n",
            id = name,
            label = escape_html(field_label(name)),
            value = escape_html(value),
        );
    }
    out.push_str("      <button type=\"submit\">Get Recommendation</button>\n");
    out.push_str("    </form>\n");
}

fn render_modal(vm: &ViewModel, out: &mut String) {
    let _ = write!(
        out,
        "    <div id=\"result-modal\" class=\"modal-overlay\" data-show=\"{}\">\n",
        vm.has_result()
    );
    out.push_str("      <div class=\"modal-content\">\n");
    out.push_str("        <button id=\"modal-close-btn\" class=\"modal-close\" aria-label=\"Close\">&times;</button>\n");

    if let Some(crop) = &vm.crop {
        let _ = write!(
            out,
            "        <h2 class=\"crop-name\">Recommended crop: {}</h2>\n",
            escape_html(crop)
        );
    }

    if let Some(fertilizer) = &vm.fertilizer {
        let _ = write!(
            out,
            "        <h3 class=\"fertilizer-name\">Recommended fertilizer: {}</h3>\n",
            escape_html(fertilizer)
        );
    }

    if let Some(content) = &vm.crop_content {
        let _ = write!(
            out,
            "        <div class=\"crop-content\">\n{}\n        </div>\n",
            format_content(content)
        );
    }

    out.push_str("      </div>\n");
    out.push_str("    </div>\n");
}

/// Render the full page for a view model
pub fn render_page(vm: &ViewModel) -> String {
    let mut out = String::with_capacity(4096);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("  <meta charset=\"utf-8\">\n");
    out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str("  <title>Crop Advisor</title>\n");
    out.push_str("  <link rel=\"stylesheet\" href=\"/static/style.css\">\n");
    out.push_str("</head>\n<body>\n  <main class=\"container\">\n");
    out.push_str("    <h1>Crop Recommendation</h1>\n");
    out.push_str("    <p class=\"subtitle\">Enter your soil and climate measurements.</p>\n");

    render_form(vm, &mut out);
    render_modal(vm, &mut out);

    out.push_str("  </main>\n");
    out.push_str("  <script src=\"/static/script.js\"></script>\n");
    out.push_str("</body>\n</html>\n");

    out
}
