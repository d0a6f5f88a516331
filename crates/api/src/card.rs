//! Performance card widget.
//!
//! Pure string templating: each card ships its own `<style>` block scoped
//! under a randomized class name so multiple cards on one page don't fight
//! over CSS.

use rand::Rng;

/// Map a symbolic status color to its hex value, defaulting to green for
/// anything unrecognized.
pub fn status_color(color: &str) -> &'static str {
    match color {
        "green" => "#22c55e",
        "red" => "#ef4444",
        "orange" => "#f97316",
        "blue" => "#3b82f6",
        "purple" => "#8b5cf6",
        "yellow" => "#ECC244",
        _ => "#22c55e",
    }
}

/// Pick white or dark text based on the perceptual luminance of the
/// background color. Backgrounds below the 0.5 threshold get white text.
pub fn text_color(bg_color: &str) -> &'static str {
    let hex = bg_color.trim_start_matches('#');

    let channel = |range: std::ops::Range<usize>| {
        hex.get(range).and_then(|s| u8::from_str_radix(s, 16).ok())
    };

    let (r, g, b) = match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => (r as f64, g as f64, b as f64),
        _ => return "#1f2937",
    };

    let luminance = (0.299 * r + 0.587 * g + 0.114 * b) / 255.0;

    if luminance < 0.5 {
        "#ffffff"
    } else {
        "#1f2937"
    }
}

/// Render a performance card.
///
/// `status_color` is a symbolic name (`green`, `red`, `orange`, `blue`,
/// `purple`, `yellow`); the badge text color is derived from the resolved
/// background so it stays readable.
pub fn performance_card(
    title: &str,
    score: &str,
    subtitle: &str,
    status_text: &str,
    status_color_name: &str,
    ranking_text: &str,
) -> String {
    let stat_color = status_color(status_color_name);
    let text_color = text_color(stat_color);

    // Randomized class scope; uniqueness is probabilistic, which is fine
    // for a handful of cards per page.
    let card_id = format!("card-{}", rand::rng().random_range(1000..10000));

    format!(
        r##"<style>
.performance-card-{card_id} {{
    background: #374151;
    border-radius: 16px;
    padding: 24px;
    box-shadow: 0 10px 25px rgba(0, 0, 0, 0.3), 0 4px 6px rgba(0, 0, 0, 0.2);
    border-left: 4px solid #3b82f6;
    margin: 8px 0;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', sans-serif;
    height: 280px;
    display: flex;
    flex-direction: column;
    justify-content: space-between;
}}
.performance-card-{card_id} .card-title {{
    font-size: 16px;
    font-weight: 600;
    color: #f9fafb;
    margin-bottom: 16px;
    line-height: 1.3;
}}
.performance-card-{card_id} .card-score {{
    font-size: 48px;
    font-weight: 800;
    color: #ef4444;
    margin: 8px 0;
    line-height: 1;
    letter-spacing: -0.02em;
}}
.performance-card-{card_id} .card-subtitle {{
    font-size: 14px;
    color: #d1d5db;
    margin-bottom: 16px;
    font-weight: 500;
}}
.performance-card-{card_id} .status-badge {{
    background-color: {stat_color} !important;
    color: {text_color};
    padding: 6px 16px;
    border-radius: 20px;
    font-size: 12px;
    font-weight: 600;
    display: inline-block;
    margin: 12px 0;
    box-shadow: 0 2px 4px rgba(0, 0, 0, 0.3);
    width: fit-content;
}}
.performance-card-{card_id} .ranking-text {{
    font-size: 13px;
    color: #d1d5db;
    margin-top: auto;
    line-height: 1.4;
}}
</style>
<div class="performance-card-{card_id}">
    <div>
        <div class="card-title">{title}</div>
        <div class="card-score">{score}</div>
        <div class="card-subtitle">{subtitle}</div>
        <div class="status-badge">{status_text}</div>
    </div>
    <div class="ranking-text">{ranking_text}</div>
</div>
"##
    )
}
