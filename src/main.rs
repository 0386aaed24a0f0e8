use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use sqlx::postgres::PgPoolOptions;

use faculty_recommend::{aggregate, classify, config, db, render, report, subjects};

#[derive(Parser)]
#[command(name = "faculty-recommend")]
#[command(about = "Faculty recommendation reports from like/dislike feedback", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Markdown,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Import faculty roster rows from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Print classified faculty for a branch/semester, best ratio first
    Standings {
        #[arg(long)]
        branch: String,
        #[arg(long)]
        semester: u32,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Generate the per-section recommendation report
    Report {
        #[arg(long)]
        branch: String,
        #[arg(long)]
        semester: u32,
        #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
        format: ReportFormat,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a production Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let inserted = db::import_csv(&pool, &csv).await?;
            println!("Inserted {inserted} roster rows from {}.", csv.display());
        }
        Commands::Standings {
            branch,
            semester,
            limit,
            config,
        } => {
            let config = config::AppConfig::load(config.as_deref())?;
            config.curriculum.resolve(&branch, semester)?;

            let faculty = db::fetch_faculty(&pool, &branch, semester).await?;
            let standings = classify::rank(&faculty, &config.thresholds);

            if standings.is_empty() {
                println!("No faculty assigned for this branch and semester.");
                return Ok(());
            }

            println!("Faculty standings for {branch} semester {semester}:");
            for standing in standings.iter().take(limit) {
                match standing.classification {
                    classify::Classification::Ranked { ratio, tier } => {
                        println!(
                            "- {} ratio {:.2} ({}) from {} likes / {} dislikes",
                            standing.name,
                            ratio,
                            config.legend.style(tier).label,
                            standing.like_count,
                            standing.dislike_count
                        );
                    }
                    classify::Classification::Insufficient => {
                        println!(
                            "- {} has insufficient feedback ({} likes / {} dislikes)",
                            standing.name, standing.like_count, standing.dislike_count
                        );
                    }
                }
            }
        }
        Commands::Report {
            branch,
            semester,
            format,
            out,
            config,
        } => {
            let config = config::AppConfig::load(config.as_deref())?;
            let plan = config.curriculum.resolve(&branch, semester)?;

            let faculty = db::fetch_faculty(&pool, &branch, semester).await?;
            let allow: HashSet<String> = plan.subjects.iter().cloned().collect();
            let codec = subjects::SubjectCodec::known()?;

            let blocks = aggregate::aggregate(
                &faculty,
                &branch,
                semester,
                plan.section_count,
                &allow,
                &config.thresholds,
                &codec,
            );
            let header = report::Header::for_run(
                &branch,
                semester,
                Utc::now(),
                config.thresholds.min_sample,
                config.portal_url.as_deref(),
            );
            let built = report::build(blocks, header, &config.legend);

            let body = match format {
                ReportFormat::Markdown => render::render_markdown(&built),
                ReportFormat::Json => serde_json::to_string_pretty(&built)?,
            };
            std::fs::write(&out, body)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
