use std::collections::HashSet;

use crate::classify::{classify, Classification, Thresholds};
use crate::curriculum;
use crate::models::FacultyRecord;
use crate::subjects::SubjectCodec;

#[derive(Debug, Clone)]
pub struct SectionBlock {
    pub branch: String,
    pub semester: u32,
    pub section: u32,
    pub rows: Vec<SectionRow>,
}

#[derive(Debug, Clone)]
pub struct SectionRow {
    pub faculty_name: String,
    pub subject_codes: Vec<String>,
    pub like_count: u32,
    pub dislike_count: u32,
    pub classification: Classification,
    pub comments: Vec<String>,
}

/// Emits one block per section 1..=section_count in ascending order, empty
/// blocks included. Within a block, faculty keep their snapshot order; a
/// faculty whose filtered subject list is empty contributes no row.
pub fn aggregate(
    faculty: &[FacultyRecord],
    branch: &str,
    semester: u32,
    section_count: u32,
    allow: &HashSet<String>,
    thresholds: &Thresholds,
    codec: &SubjectCodec,
) -> Vec<SectionBlock> {
    (1..=section_count)
        .map(|section| {
            let mut rows = Vec::new();
            for record in faculty {
                if !record.teaches_in(branch, semester, section) {
                    continue;
                }

                let filtered = curriculum::filter_subjects(&record.subjects, allow);
                if filtered.is_empty() {
                    continue;
                }

                rows.push(SectionRow {
                    faculty_name: record.name.clone(),
                    subject_codes: filtered.iter().map(|s| codec.encode(s)).collect(),
                    like_count: record.like_count,
                    dislike_count: record.dislike_count,
                    classification: classify(record.like_count, record.dislike_count, thresholds),
                    comments: record.review_comments.clone(),
                });
            }

            SectionBlock {
                branch: branch.to_string(),
                semester,
                section,
                rows,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Tier;
    use crate::models::SectionRef;
    use uuid::Uuid;

    fn record(
        name: &str,
        likes: u32,
        dislikes: u32,
        subjects: &[&str],
        sections: &[(&str, u32, u32)],
    ) -> FacultyRecord {
        FacultyRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            like_count: likes,
            dislike_count: dislikes,
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            section_memberships: sections
                .iter()
                .map(|(branch, semester, section)| SectionRef {
                    branch: branch.to_string(),
                    semester: *semester,
                    section: *section,
                })
                .collect(),
            review_comments: Vec::new(),
        }
    }

    fn allow_list(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn emits_every_section_in_ascending_order() {
        let codec = SubjectCodec::known().unwrap();
        let thresholds = Thresholds::default();
        let faculty = vec![record(
            "Meera Krishnan",
            10,
            2,
            &["Artificial Intelligence"],
            &[("Computer Science", 6, 2)],
        )];

        let blocks = aggregate(
            &faculty,
            "Computer Science",
            6,
            5,
            &allow_list(&["Artificial Intelligence"]),
            &thresholds,
            &codec,
        );

        let sections: Vec<u32> = blocks.iter().map(|b| b.section).collect();
        assert_eq!(sections, vec![1, 2, 3, 4, 5]);
        assert!(blocks[0].rows.is_empty());
        assert_eq!(blocks[1].rows.len(), 1);
    }

    #[test]
    fn faculty_with_no_relevant_subjects_is_excluded() {
        let codec = SubjectCodec::known().unwrap();
        let thresholds = Thresholds::default();
        let faculty = vec![record(
            "Farhan Qureshi",
            10,
            2,
            &["Operating Systems"],
            &[("Computer Science", 6, 1)],
        )];

        let blocks = aggregate(
            &faculty,
            "Computer Science",
            6,
            1,
            &allow_list(&["Artificial Intelligence"]),
            &thresholds,
            &codec,
        );

        assert!(blocks[0].rows.is_empty());
    }

    #[test]
    fn other_branches_and_semesters_are_ignored() {
        let codec = SubjectCodec::known().unwrap();
        let thresholds = Thresholds::default();
        let faculty = vec![
            record(
                "Meera Krishnan",
                10,
                2,
                &["Artificial Intelligence"],
                &[("Information Science", 6, 1)],
            ),
            record(
                "Rohit Shetty",
                10,
                2,
                &["Artificial Intelligence"],
                &[("Computer Science", 5, 1)],
            ),
        ];

        let blocks = aggregate(
            &faculty,
            "Computer Science",
            6,
            1,
            &allow_list(&["Artificial Intelligence"]),
            &thresholds,
            &codec,
        );

        assert!(blocks[0].rows.is_empty());
    }

    #[test]
    fn rows_keep_snapshot_order_and_filtered_codes() {
        let codec = SubjectCodec::known().unwrap();
        let thresholds = Thresholds::default();
        let faculty = vec![
            record(
                "Anita Deshpande",
                25,
                5,
                &["Web Technologies", "Operating Systems", "Cloud Computing"],
                &[("Computer Science", 6, 1)],
            ),
            record(
                "Meera Krishnan",
                42,
                6,
                &["Artificial Intelligence"],
                &[("Computer Science", 6, 1)],
            ),
        ];

        let blocks = aggregate(
            &faculty,
            "Computer Science",
            6,
            1,
            &allow_list(&["Artificial Intelligence", "Web Technologies", "Cloud Computing"]),
            &thresholds,
            &codec,
        );

        let rows = &blocks[0].rows;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].faculty_name, "Anita Deshpande");
        assert_eq!(rows[0].subject_codes, vec!["WT", "CC"]);
        assert_eq!(rows[1].faculty_name, "Meera Krishnan");
        assert_eq!(rows[1].subject_codes, vec!["AI"]);
    }

    #[test]
    fn end_to_end_section_scenario() {
        let codec = SubjectCodec::known().unwrap();
        let thresholds = Thresholds::default();
        let faculty = vec![
            record(
                "A",
                8,
                2,
                &["Artificial Intelligence"],
                &[("Computer Science", 6, 3)],
            ),
            record(
                "B",
                3,
                3,
                &["Artificial Intelligence"],
                &[("Computer Science", 6, 3)],
            ),
        ];

        let blocks = aggregate(
            &faculty,
            "Computer Science",
            6,
            3,
            &allow_list(&["Artificial Intelligence"]),
            &thresholds,
            &codec,
        );

        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].rows.is_empty());
        assert!(blocks[1].rows.is_empty());

        let rows = &blocks[2].rows;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].faculty_name, "A");
        assert_eq!(rows[0].subject_codes, vec!["AI"]);
        assert_eq!(rows[0].classification.tier(), Some(Tier::HighlyRecommended));
        assert!((rows[0].classification.ratio().unwrap() - 0.80).abs() < 1e-9);
        assert_eq!(rows[1].faculty_name, "B");
        assert_eq!(rows[1].classification.tier(), Some(Tier::Average));
        assert!((rows[1].classification.ratio().unwrap() - 0.50).abs() < 1e-9);
    }
}
