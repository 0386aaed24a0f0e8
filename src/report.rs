use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::SectionBlock;
use crate::classify::{Classification, Tier};

#[derive(Debug, Clone, Serialize)]
pub struct HeaderLine {
    pub text: String,
    pub emphasized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Header {
    pub lines: Vec<HeaderLine>,
    pub generated_at: DateTime<Utc>,
    pub advisory: Option<String>,
}

impl Header {
    pub fn for_run(
        branch: &str,
        semester: u32,
        generated_at: DateTime<Utc>,
        min_sample: u32,
        portal_url: Option<&str>,
    ) -> Self {
        let mut lines = vec![
            HeaderLine {
                text: "Faculty Recommendation Report".to_string(),
                emphasized: true,
                link: None,
            },
            HeaderLine {
                text: format!("Generated for {branch} semester {semester}"),
                emphasized: false,
                link: None,
            },
        ];

        if let Some(url) = portal_url {
            lines.push(HeaderLine {
                text: "Share your feedback on the review portal".to_string(),
                emphasized: false,
                link: Some(url.to_string()),
            });
        }

        Header {
            lines,
            generated_at,
            advisory: Some(format!(
                "Faculty with fewer than {min_sample} total reactions are listed without a recommendation."
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegendStyle {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegendConfig {
    #[serde(default = "default_highly_recommended_style")]
    pub highly_recommended: LegendStyle,
    #[serde(default = "default_recommended_style")]
    pub recommended: LegendStyle,
    #[serde(default = "default_average_style")]
    pub average: LegendStyle,
    #[serde(default = "default_moderate_style")]
    pub moderate: LegendStyle,
    #[serde(default = "default_avoid_style")]
    pub avoid: LegendStyle,
}

fn style(label: &str, color: &str) -> LegendStyle {
    LegendStyle {
        label: label.to_string(),
        color: color.to_string(),
    }
}

fn default_highly_recommended_style() -> LegendStyle {
    style("Highly Recommended", "92D050")
}

fn default_recommended_style() -> LegendStyle {
    style("Recommended", "C6E0B4")
}

fn default_average_style() -> LegendStyle {
    style("Average", "FFE699")
}

fn default_moderate_style() -> LegendStyle {
    style("Moderate", "F8CBAD")
}

fn default_avoid_style() -> LegendStyle {
    style("Avoid", "FF7C80")
}

impl Default for LegendConfig {
    fn default() -> Self {
        LegendConfig {
            highly_recommended: default_highly_recommended_style(),
            recommended: default_recommended_style(),
            average: default_average_style(),
            moderate: default_moderate_style(),
            avoid: default_avoid_style(),
        }
    }
}

impl LegendConfig {
    pub fn style(&self, tier: Tier) -> &LegendStyle {
        match tier {
            Tier::HighlyRecommended => &self.highly_recommended,
            Tier::Recommended => &self.recommended,
            Tier::Average => &self.average,
            Tier::Moderate => &self.moderate,
            Tier::Avoid => &self.avoid,
        }
    }

    pub fn entries(&self) -> Vec<LegendEntry> {
        Tier::ALL
            .iter()
            .map(|tier| {
                let style = self.style(*tier);
                LegendEntry {
                    tier: *tier,
                    label: style.label.clone(),
                    color: style.color.clone(),
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub tier: Tier,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub faculty_name: String,
    pub subject_codes: Vec<String>,
    pub like_count: u32,
    pub dislike_count: u32,
    pub classification: Classification,
    pub color: Option<String>,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSection {
    pub branch: String,
    pub semester: u32,
    pub section: u32,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub header: Header,
    pub legend: Vec<LegendEntry>,
    pub sections: Vec<ReportSection>,
}

/// Decorates already-classified blocks with legend colors. No filtering or
/// classification happens here; an empty block list yields a report with
/// only the header and legend.
pub fn build(blocks: Vec<SectionBlock>, header: Header, legend: &LegendConfig) -> Report {
    let sections = blocks
        .into_iter()
        .map(|block| ReportSection {
            branch: block.branch,
            semester: block.semester,
            section: block.section,
            rows: block
                .rows
                .into_iter()
                .map(|row| {
                    let color = row
                        .classification
                        .tier()
                        .map(|tier| legend.style(tier).color.clone());
                    ReportRow {
                        faculty_name: row.faculty_name,
                        subject_codes: row.subject_codes,
                        like_count: row.like_count,
                        dislike_count: row.dislike_count,
                        classification: row.classification,
                        color,
                        comments: row.comments,
                    }
                })
                .collect(),
        })
        .collect();

    Report {
        header,
        legend: legend.entries(),
        sections,
    }
}
