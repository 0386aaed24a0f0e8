use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurriculumError {
    #[error("branch {0} not found")]
    BranchNotFound(String),
    #[error("semester {semester} not found for branch {branch}")]
    SemesterNotFound { branch: String, semester: u32 },
    #[error("reviews are disabled for {branch} semester {semester}")]
    ReviewsDisabled { branch: String, semester: u32 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Curriculum {
    pub branches: Vec<BranchPlan>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BranchPlan {
    pub name: String,
    pub semesters: Vec<SemesterPlan>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SemesterPlan {
    pub number: u32,
    pub section_count: u32,
    #[serde(default = "default_reviews_enabled")]
    pub reviews_enabled: bool,
    pub subjects: Vec<String>,
}

fn default_reviews_enabled() -> bool {
    true
}

impl Curriculum {
    pub fn resolve(&self, branch: &str, semester: u32) -> Result<&SemesterPlan, CurriculumError> {
        let branch_plan = self
            .branches
            .iter()
            .find(|b| b.name == branch)
            .ok_or_else(|| CurriculumError::BranchNotFound(branch.to_string()))?;

        let plan = branch_plan
            .semesters
            .iter()
            .find(|s| s.number == semester)
            .ok_or_else(|| CurriculumError::SemesterNotFound {
                branch: branch_plan.name.clone(),
                semester,
            })?;

        if !plan.reviews_enabled {
            return Err(CurriculumError::ReviewsDisabled {
                branch: branch_plan.name.clone(),
                semester,
            });
        }

        Ok(plan)
    }
}

impl Default for Curriculum {
    fn default() -> Self {
        let subjects =
            |names: &[&str]| -> Vec<String> { names.iter().map(|s| s.to_string()).collect() };
        Curriculum {
            branches: vec![
                BranchPlan {
                    name: "Computer Science".to_string(),
                    semesters: vec![
                        SemesterPlan {
                            number: 5,
                            section_count: 3,
                            reviews_enabled: true,
                            subjects: subjects(&[
                                "Database Management Systems",
                                "Operating Systems",
                                "Computer Networks",
                                "Theory of Computation",
                                "Software Engineering",
                            ]),
                        },
                        SemesterPlan {
                            number: 6,
                            section_count: 3,
                            reviews_enabled: true,
                            subjects: subjects(&[
                                "Artificial Intelligence",
                                "Machine Learning",
                                "Compiler Design",
                                "Web Technologies",
                                "Cloud Computing",
                            ]),
                        },
                    ],
                },
                BranchPlan {
                    name: "Information Science".to_string(),
                    semesters: vec![SemesterPlan {
                        number: 6,
                        section_count: 2,
                        reviews_enabled: false,
                        subjects: subjects(&["Artificial Intelligence", "Data Mining"]),
                    }],
                },
            ],
        }
    }
}

/// Stable filter: keeps the input order, drops subjects outside the
/// allow-list.
pub fn filter_subjects(subjects: &[String], allow: &HashSet<String>) -> Vec<String> {
    subjects
        .iter()
        .filter(|subject| allow.contains(subject.as_str()))
        .cloned()
        .collect()
}
