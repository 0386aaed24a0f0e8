use serde::{Deserialize, Serialize};

use crate::models::FacultyRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    HighlyRecommended,
    Recommended,
    Average,
    Moderate,
    Avoid,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::HighlyRecommended,
        Tier::Recommended,
        Tier::Average,
        Tier::Moderate,
        Tier::Avoid,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    Insufficient,
    Ranked { ratio: f64, tier: Tier },
}

impl Classification {
    pub fn tier(&self) -> Option<Tier> {
        match self {
            Classification::Ranked { tier, .. } => Some(*tier),
            Classification::Insufficient => None,
        }
    }

    pub fn ratio(&self) -> Option<f64> {
        match self {
            Classification::Ranked { ratio, .. } => Some(*ratio),
            Classification::Insufficient => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_min_sample")]
    pub min_sample: u32,
    #[serde(default = "default_highly_recommended")]
    pub highly_recommended: f64,
    #[serde(default = "default_recommended")]
    pub recommended: f64,
    #[serde(default = "default_average")]
    pub average: f64,
    #[serde(default = "default_moderate")]
    pub moderate: f64,
}

fn default_min_sample() -> u32 {
    5
}

fn default_highly_recommended() -> f64 {
    0.8
}

fn default_recommended() -> f64 {
    0.6
}

fn default_average() -> f64 {
    0.4
}

fn default_moderate() -> f64 {
    0.2
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            min_sample: default_min_sample(),
            highly_recommended: default_highly_recommended(),
            recommended: default_recommended(),
            average: default_average(),
            moderate: default_moderate(),
        }
    }
}

/// Buckets a like/dislike pair. Below `min_sample` total reactions no ratio
/// is computed; otherwise the ratio is rounded to two decimals first and each
/// boundary is an inclusive lower bound of its own tier.
pub fn classify(likes: u32, dislikes: u32, thresholds: &Thresholds) -> Classification {
    let total = likes + dislikes;
    if total < thresholds.min_sample {
        return Classification::Insufficient;
    }

    let ratio = (likes as f64 / total as f64 * 100.0).round() / 100.0;
    let tier = if ratio >= thresholds.highly_recommended {
        Tier::HighlyRecommended
    } else if ratio >= thresholds.recommended {
        Tier::Recommended
    } else if ratio >= thresholds.average {
        Tier::Average
    } else if ratio >= thresholds.moderate {
        Tier::Moderate
    } else {
        Tier::Avoid
    };

    Classification::Ranked { ratio, tier }
}

#[derive(Debug, Clone)]
pub struct Standing {
    pub name: String,
    pub like_count: u32,
    pub dislike_count: u32,
    pub classification: Classification,
}

pub fn rank(faculty: &[FacultyRecord], thresholds: &Thresholds) -> Vec<Standing> {
    let mut standings: Vec<Standing> = faculty
        .iter()
        .map(|record| Standing {
            name: record.name.clone(),
            like_count: record.like_count,
            dislike_count: record.dislike_count,
            classification: classify(record.like_count, record.dislike_count, thresholds),
        })
        .collect();

    standings.sort_by(|a, b| {
        sort_key(b)
            .partial_cmp(&sort_key(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    standings
}

fn sort_key(standing: &Standing) -> f64 {
    match standing.classification {
        Classification::Ranked { ratio, .. } => ratio,
        Classification::Insufficient => -1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn record(name: &str, likes: u32, dislikes: u32) -> FacultyRecord {
        FacultyRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            like_count: likes,
            dislike_count: dislikes,
            subjects: vec!["Artificial Intelligence".to_string()],
            section_memberships: Vec::new(),
            review_comments: Vec::new(),
        }
    }

    #[test]
    fn below_min_sample_is_insufficient() {
        let thresholds = Thresholds::default();
        assert_eq!(classify(0, 0, &thresholds), Classification::Insufficient);
        assert_eq!(classify(4, 0, &thresholds), Classification::Insufficient);
        assert_eq!(classify(0, 4, &thresholds), Classification::Insufficient);
    }

    #[test]
    fn boundaries_are_inclusive_lower_bounds() {
        let thresholds = Thresholds::default();

        let highly = classify(8, 2, &thresholds);
        assert_eq!(highly.tier(), Some(Tier::HighlyRecommended));
        assert!((highly.ratio().unwrap() - 0.80).abs() < 1e-9);

        let recommended = classify(79, 21, &thresholds);
        assert_eq!(recommended.tier(), Some(Tier::Recommended));
        assert!((recommended.ratio().unwrap() - 0.79).abs() < 1e-9);

        let moderate = classify(2, 8, &thresholds);
        assert_eq!(moderate.tier(), Some(Tier::Moderate));
        assert!((moderate.ratio().unwrap() - 0.20).abs() < 1e-9);

        let avoid = classify(1, 9, &thresholds);
        assert_eq!(avoid.tier(), Some(Tier::Avoid));
        assert!((avoid.ratio().unwrap() - 0.10).abs() < 1e-9);
    }

    #[test]
    fn middle_tiers_cover_the_rest() {
        let thresholds = Thresholds::default();
        assert_eq!(classify(3, 2, &thresholds).tier(), Some(Tier::Recommended));
        assert_eq!(classify(3, 3, &thresholds).tier(), Some(Tier::Average));
        assert_eq!(classify(2, 3, &thresholds).tier(), Some(Tier::Average));
    }

    #[test]
    fn rounding_happens_before_bucketing() {
        let thresholds = Thresholds::default();
        // 239/300 = 0.7966.. rounds to 0.80 and lands in the top tier.
        let result = classify(239, 61, &thresholds);
        assert_eq!(result.tier(), Some(Tier::HighlyRecommended));
        assert!((result.ratio().unwrap() - 0.80).abs() < 1e-9);
    }

    #[test]
    fn every_small_input_gets_a_result() {
        let thresholds = Thresholds::default();
        for likes in 0..=20 {
            for dislikes in 0..=20 {
                let result = classify(likes, dislikes, &thresholds);
                if likes + dislikes < thresholds.min_sample {
                    assert_eq!(result, Classification::Insufficient);
                } else {
                    assert!(result.tier().is_some());
                }
            }
        }
    }

    #[test]
    fn custom_thresholds_are_honored() {
        let thresholds = Thresholds {
            min_sample: 2,
            highly_recommended: 0.9,
            recommended: 0.7,
            average: 0.5,
            moderate: 0.3,
        };
        assert_eq!(classify(9, 1, &thresholds).tier(), Some(Tier::HighlyRecommended));
        assert_eq!(classify(8, 2, &thresholds).tier(), Some(Tier::Recommended));
        assert_eq!(classify(1, 1, &thresholds).tier(), Some(Tier::Average));
        assert_eq!(classify(1, 0, &thresholds), Classification::Insufficient);
    }

    #[test]
    fn rank_orders_by_ratio_with_insufficient_last() {
        let thresholds = Thresholds::default();
        let faculty = vec![
            record("Low", 1, 9),
            record("Sparse", 1, 0),
            record("High", 9, 1),
            record("Mid", 3, 3),
        ];

        let standings = rank(&faculty, &thresholds);
        let names: Vec<&str> = standings.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low", "Sparse"]);
        assert_eq!(standings[3].classification, Classification::Insufficient);
    }
}
