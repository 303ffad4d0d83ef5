//! Course seeding.

use chrono::{Duration, Utc};
use coursehub_models::CourseId;
use fake::Fake;
use fake::faker::lorem::en::{Sentence, Words};
use rand::Rng;
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;

use super::models::{CourseSeed, SEED_MARKER};

pub fn generate_courses(count: usize) -> Vec<CourseSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let mut rng = rand::thread_rng();
            let words: Vec<String> = Words(2..4).fake();
            let title = format!("{} {}", capitalize(&words.join(" ")), idx + 1);
            let sentence: String = Sentence(6..14).fake();

            let start_date = Utc::now().date_naive() + Duration::days(rng.gen_range(-60..60));
            let end_date = start_date + Duration::days(rng.gen_range(30..150));

            CourseSeed {
                title,
                description: format!("{} {}", sentence, SEED_MARKER),
                credits: rng.gen_range(1..=10),
                start_date,
                end_date,
                is_active: rng.gen_bool(0.8),
            }
        })
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub async fn seed_courses(
    db: &PgPool,
    count: usize,
) -> Result<Vec<CourseId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("📚 Seeding {} courses...", count);

    let courses = generate_courses(count);
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(courses.len());

    // 6 params per course
    const BATCH_SIZE: usize = 1000;

    for chunk in courses.chunks(BATCH_SIZE) {
        let mut query = String::from(
            "INSERT INTO courses (title, description, credits, start_date, end_date, is_active) VALUES ",
        );
        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            let p = i * 6;
            query.push_str(&format!(
                "(${}, ${}, ${}, ${}, ${}, ${})",
                p + 1,
                p + 2,
                p + 3,
                p + 4,
                p + 5,
                p + 6
            ));
        }
        query.push_str(" RETURNING id");

        let mut q = sqlx::query_scalar::<_, CourseId>(&query);
        for course in chunk {
            q = q
                .bind(&course.title)
                .bind(&course.description)
                .bind(course.credits)
                .bind(course.start_date)
                .bind(course.end_date)
                .bind(course.is_active);
        }
        ids.extend(q.fetch_all(&mut *tx).await?);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} courses in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}
