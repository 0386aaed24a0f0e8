use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct FacultyRecord {
    pub id: Uuid,
    pub name: String,
    pub like_count: u32,
    pub dislike_count: u32,
    pub subjects: Vec<String>,
    pub section_memberships: Vec<SectionRef>,
    pub review_comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionRef {
    pub branch: String,
    pub semester: u32,
    pub section: u32,
}

impl FacultyRecord {
    pub fn teaches_in(&self, branch: &str, semester: u32, section: u32) -> bool {
        self.section_memberships
            .iter()
            .any(|m| m.branch == branch && m.semester == semester && m.section == section)
    }
}
