//! Console frequency summary.
//!
//! Renders a column's value counts as a horizontal text bar chart, the
//! console stand-in for the descriptive bar charts this data usually feeds.

use core::fmt::Write;
use owo_colors::OwoColorize;

/// Maximum bar width in characters; bars are scaled to the largest count.
const MAX_BAR_WIDTH: usize = 40;

/// Render value counts as a bar chart into `out`.
pub fn render_value_counts<W: Write>(title: &str, counts: &[(String, usize)], use_colors: bool, out: &mut W) -> core::fmt::Result {
    if use_colors {
        writeln!(out, "\n{}", title.bold())?;
    } else {
        writeln!(out, "\n{title}")?;
    }

    let Some(max_count) = counts.iter().map(|(_, c)| *c).max() else {
        writeln!(out, "  (no rows)")?;
        return Ok(());
    };

    let label_width = counts.iter().map(|(v, _)| v.chars().count()).max().unwrap_or(0);

    for (value, count) in counts {
        let width = (count * MAX_BAR_WIDTH).div_ceil(max_count);
        let bar: String = "▇".repeat(width);

        if use_colors {
            writeln!(out, "  {value:<label_width$}  {} {count}", bar.cyan())?;
        } else {
            writeln!(out, "  {value:<label_width$}  {bar} {count}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> Vec<(String, usize)> {
        vec![("disciplinary".to_string(), 4), ("institutional".to_string(), 2), ("other".to_string(), 1)]
    }

    #[test]
    fn test_render_without_colors() {
        let mut out = String::new();
        render_value_counts("Repository types", &counts(), false, &mut out).unwrap();

        assert!(out.contains("Repository types"));
        assert!(out.contains("disciplinary"));
        // Largest count gets the full-width bar.
        assert!(out.contains(&"▇".repeat(MAX_BAR_WIDTH)));
        assert!(out.ends_with("1\n"));
    }

    #[test]
    fn test_render_scales_bars() {
        let mut out = String::new();
        render_value_counts("t", &counts(), false, &mut out).unwrap();

        // 2/4 of the max count gives half the bar width.
        assert!(out.contains(&format!("{} 2", "▇".repeat(MAX_BAR_WIDTH / 2))));
    }

    #[test]
    fn test_render_empty_counts() {
        let mut out = String::new();
        render_value_counts("t", &[], false, &mut out).unwrap();
        assert!(out.contains("(no rows)"));
    }

    #[test]
    fn test_render_with_colors_emits_ansi() {
        let mut out = String::new();
        render_value_counts("t", &counts(), true, &mut out).unwrap();
        assert!(out.contains("\x1b["));
    }
}
