use std::collections::HashMap;

use anyhow::Context;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{FacultyRecord, SectionRef};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let faculty: Vec<(Uuid, &str, i32, i32, Vec<&str>, Vec<(&str, i32, i32)>)> = vec![
        (
            Uuid::parse_str("3d7f5d6f-24f7-4e8e-8b4b-3e7e44b4a7b2")?,
            "Meera Krishnan",
            42,
            6,
            vec!["Artificial Intelligence", "Machine Learning"],
            vec![("Computer Science", 6, 1), ("Computer Science", 6, 2)],
        ),
        (
            Uuid::parse_str("0c22f1f1-9184-4fd4-9b21-28c68a6a89dc")?,
            "Rohit Shetty",
            18,
            12,
            vec!["Compiler Design", "Theory of Computation"],
            vec![("Computer Science", 6, 1), ("Computer Science", 5, 3)],
        ),
        (
            Uuid::parse_str("d5a0a1a2-2a3c-44c2-8f73-60b7897a9dd2")?,
            "Anita Deshpande",
            25,
            5,
            vec!["Web Technologies", "Cloud Computing"],
            vec![("Computer Science", 6, 2), ("Computer Science", 6, 3)],
        ),
        (
            Uuid::parse_str("7f0a2b1c-55d8-4a53-9a40-1f2f9a3b6c4d")?,
            "Farhan Qureshi",
            30,
            20,
            vec!["Operating Systems", "Computer Networks"],
            vec![("Computer Science", 5, 1), ("Computer Science", 5, 2)],
        ),
        (
            Uuid::parse_str("9b61c0de-7c4f-4d8a-b2e1-6a5d4c3b2a19")?,
            "Lakshmi Nair",
            2,
            1,
            vec!["Database Management Systems"],
            vec![("Computer Science", 5, 1)],
        ),
        (
            Uuid::parse_str("4e8d7c6b-5a49-4382-9170-8f6e5d4c3b2a")?,
            "Daniel D'Souza",
            8,
            22,
            vec!["Artificial Intelligence"],
            vec![("Computer Science", 6, 3)],
        ),
    ];

    for (id, name, likes, dislikes, subjects, sections) in faculty {
        let faculty_id: Uuid = sqlx::query(
            r#"
            INSERT INTO faculty_review.faculty (id, full_name, like_count, dislike_count)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (full_name) DO UPDATE
            SET like_count = EXCLUDED.like_count, dislike_count = EXCLUDED.dislike_count
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(likes)
        .bind(dislikes)
        .fetch_one(pool)
        .await?
        .get("id");

        for (position, subject) in subjects.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO faculty_review.faculty_subjects (faculty_id, subject, position)
                VALUES ($1, $2, $3)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(faculty_id)
            .bind(subject)
            .bind(position as i32)
            .execute(pool)
            .await?;
        }

        for (branch, semester, section) in sections {
            sqlx::query(
                r#"
                INSERT INTO faculty_review.faculty_sections (faculty_id, branch, semester, section)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(faculty_id)
            .bind(branch)
            .bind(semester)
            .bind(section)
            .execute(pool)
            .await?;
        }
    }

    let reviews = vec![
        (
            "seed-101",
            "Meera Krishnan",
            "Explains concepts with real datasets",
            NaiveDate::from_ymd_opt(2026, 1, 20).context("invalid date")?,
        ),
        (
            "seed-102",
            "Rohit Shetty",
            "Strict grading but fair coverage",
            NaiveDate::from_ymd_opt(2026, 1, 28).context("invalid date")?,
        ),
        (
            "seed-103",
            "Daniel D'Souza",
            "Lectures rarely go beyond the slides",
            NaiveDate::from_ymd_opt(2026, 2, 3).context("invalid date")?,
        ),
    ];

    for (source_key, name, comment, posted_at) in reviews {
        let faculty_id: Uuid =
            sqlx::query("SELECT id FROM faculty_review.faculty WHERE full_name = $1")
                .bind(name)
                .fetch_one(pool)
                .await?
                .get("id");

        sqlx::query(
            r#"
            INSERT INTO faculty_review.reviews (id, faculty_id, comment, posted_at, source_key)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(faculty_id)
        .bind(comment)
        .bind(posted_at)
        .bind(source_key)
        .execute(pool)
        .await?;
    }

    Ok(())
}

/// Snapshot of every faculty assigned anywhere in (branch, semester), with
/// ordered deduplicated subjects, full membership set, and review text.
pub async fn fetch_faculty(
    pool: &PgPool,
    branch: &str,
    semester: u32,
) -> anyhow::Result<Vec<FacultyRecord>> {
    let base = sqlx::query(
        "SELECT DISTINCT f.id, f.full_name, f.like_count, f.dislike_count \
         FROM faculty_review.faculty f \
         JOIN faculty_review.faculty_sections fs ON fs.faculty_id = f.id \
         WHERE fs.branch = $1 AND fs.semester = $2 \
         ORDER BY f.full_name",
    )
    .bind(branch)
    .bind(semester as i32)
    .fetch_all(pool)
    .await?;

    let mut records: Vec<FacultyRecord> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for row in base {
        let id: Uuid = row.get("id");
        let likes: i32 = row.get("like_count");
        let dislikes: i32 = row.get("dislike_count");
        index.insert(id, records.len());
        records.push(FacultyRecord {
            id,
            name: row.get("full_name"),
            like_count: likes.max(0) as u32,
            dislike_count: dislikes.max(0) as u32,
            subjects: Vec::new(),
            section_memberships: Vec::new(),
            review_comments: Vec::new(),
        });
    }

    if records.is_empty() {
        return Ok(records);
    }

    let ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();

    let subject_rows = sqlx::query(
        "SELECT faculty_id, subject FROM faculty_review.faculty_subjects \
         WHERE faculty_id = ANY($1) \
         ORDER BY faculty_id, position, subject",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    for row in subject_rows {
        let id: Uuid = row.get("faculty_id");
        if let Some(&i) = index.get(&id) {
            let subject: String = row.get("subject");
            if !records[i].subjects.contains(&subject) {
                records[i].subjects.push(subject);
            }
        }
    }

    let section_rows = sqlx::query(
        "SELECT faculty_id, branch, semester, section FROM faculty_review.faculty_sections \
         WHERE faculty_id = ANY($1)",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    for row in section_rows {
        let id: Uuid = row.get("faculty_id");
        if let Some(&i) = index.get(&id) {
            let semester: i32 = row.get("semester");
            let section: i32 = row.get("section");
            records[i].section_memberships.push(SectionRef {
                branch: row.get("branch"),
                semester: semester.max(0) as u32,
                section: section.max(0) as u32,
            });
        }
    }

    let review_rows = sqlx::query(
        "SELECT faculty_id, comment FROM faculty_review.reviews \
         WHERE faculty_id = ANY($1) \
         ORDER BY posted_at DESC",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    for row in review_rows {
        let id: Uuid = row.get("faculty_id");
        if let Some(&i) = index.get(&id) {
            records[i].review_comments.push(row.get("comment"));
        }
    }

    Ok(records)
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        full_name: String,
        branch: String,
        semester: i32,
        section: i32,
        subjects: String,
        like_count: i32,
        dislike_count: i32,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let faculty_id: Uuid = sqlx::query(
            r#"
            INSERT INTO faculty_review.faculty (id, full_name, like_count, dislike_count)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (full_name) DO UPDATE
            SET like_count = EXCLUDED.like_count, dislike_count = EXCLUDED.dislike_count
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&row.full_name)
        .bind(row.like_count)
        .bind(row.dislike_count)
        .fetch_one(pool)
        .await?
        .get("id");

        let subjects = row
            .subjects
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty());
        for (position, subject) in subjects.enumerate() {
            sqlx::query(
                r#"
                INSERT INTO faculty_review.faculty_subjects (faculty_id, subject, position)
                VALUES ($1, $2, $3)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(faculty_id)
            .bind(subject)
            .bind(position as i32)
            .execute(pool)
            .await?;
        }

        let result = sqlx::query(
            r#"
            INSERT INTO faculty_review.faculty_sections (faculty_id, branch, semester, section)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(faculty_id)
        .bind(&row.branch)
        .bind(row.semester)
        .bind(row.section)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    Ok(inserted)
}
