use std::collections::HashMap;

use anyhow::ensure;

const KNOWN_SUBJECTS: &[(&str, &str)] = &[
    ("Artificial Intelligence", "AI"),
    ("Machine Learning", "ML"),
    ("Data Structures and Algorithms", "DSA"),
    ("Database Management Systems", "DBMS"),
    ("Operating Systems", "OS"),
    ("Computer Networks", "CN"),
    ("Software Engineering", "SE"),
    ("Theory of Computation", "TOC"),
    ("Compiler Design", "CD"),
    ("Object Oriented Programming", "OOP"),
    ("Computer Organization and Architecture", "COA"),
    ("Discrete Mathematics", "DM"),
    ("Web Technologies", "WT"),
    ("Cloud Computing", "CC"),
    ("Cyber Security", "CSEC"),
    ("Data Mining", "DMG"),
];

/// Bidirectional subject-name/abbreviation table. Unknown inputs pass
/// through unchanged in both directions.
#[derive(Debug, Clone)]
pub struct SubjectCodec {
    to_code: HashMap<String, String>,
    to_name: HashMap<String, String>,
}

impl SubjectCodec {
    pub fn known() -> anyhow::Result<Self> {
        Self::from_table(KNOWN_SUBJECTS)
    }

    pub fn from_table(entries: &[(&str, &str)]) -> anyhow::Result<Self> {
        let mut to_code = HashMap::new();
        let mut to_name = HashMap::new();

        for (name, code) in entries {
            ensure!(
                to_code.insert(name.to_string(), code.to_string()).is_none(),
                "duplicate subject name in codec table: {name}"
            );
            ensure!(
                to_name.insert(code.to_string(), name.to_string()).is_none(),
                "duplicate subject code in codec table: {code}"
            );
        }

        Ok(SubjectCodec { to_code, to_name })
    }

    pub fn encode(&self, name: &str) -> String {
        self.to_code
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    pub fn decode(&self, code: &str) -> String {
        self.to_name
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }
}
