use std::fmt::Write;

use crate::classify::{Classification, Tier};
use crate::report::{LegendEntry, Report};

/// Markdown rendering of the report model. Color tokens are printed
/// textually; fill styling belongs to richer renderers consuming the same
/// model.
pub fn render_markdown(report: &Report) -> String {
    let mut output = String::new();

    for line in &report.header.lines {
        let text = match &line.link {
            Some(url) => format!("[{}]({})", line.text, url),
            None => line.text.clone(),
        };
        if line.emphasized {
            let _ = writeln!(output, "# {text}");
        } else {
            let _ = writeln!(output, "{text}");
        }
    }

    let _ = writeln!(
        output,
        "Generated at {}",
        report.header.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(advisory) = &report.header.advisory {
        let _ = writeln!(output, "{advisory}");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Legend");
    for entry in &report.legend {
        let _ = writeln!(output, "- {} ({})", entry.label, entry.color);
    }
    let _ = writeln!(output);

    for section in &report.sections {
        let _ = writeln!(
            output,
            "## Section {} ({} semester {})",
            section.section, section.branch, section.semester
        );

        if section.rows.is_empty() {
            let _ = writeln!(output, "No classified faculty for this section.");
            let _ = writeln!(output);
            continue;
        }

        let _ = writeln!(
            output,
            "| Faculty | Subjects | Likes | Dislikes | Recommendation | Color |"
        );
        let _ = writeln!(output, "| --- | --- | --- | --- | --- | --- |");

        for row in &section.rows {
            let (label, color) = match row.classification {
                Classification::Ranked { ratio, tier } => (
                    format!("{} ({:.2})", tier_label(&report.legend, tier), ratio),
                    row.color.clone().unwrap_or_default(),
                ),
                Classification::Insufficient => ("Insufficient data".to_string(), String::new()),
            };
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} |",
                row.faculty_name,
                row.subject_codes.join(", "),
                row.like_count,
                row.dislike_count,
                label,
                color
            );
        }

        let noted: Vec<_> = section.rows.iter().filter(|r| !r.comments.is_empty()).collect();
        if !noted.is_empty() {
            let _ = writeln!(output);
            let _ = writeln!(output, "### Review notes");
            for row in noted {
                for comment in &row.comments {
                    let _ = writeln!(output, "- {}: {}", row.faculty_name, comment);
                }
            }
        }

        let _ = writeln!(output);
    }

    output
}

fn tier_label(legend: &[LegendEntry], tier: Tier) -> String {
    legend
        .iter()
        .find(|entry| entry.tier == tier)
        .map(|entry| entry.label.clone())
        .unwrap_or_else(|| format!("{tier:?}"))
}
