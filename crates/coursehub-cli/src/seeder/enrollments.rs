//! Random enrollments between seeded students and courses.

use coursehub_models::{CourseId, StudentId};
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;

use super::models::EnrollmentSeed;

/// Each student gets between zero and `max_per_student` distinct courses.
pub fn generate_enrollments(
    student_ids: &[StudentId],
    course_ids: &[CourseId],
    max_per_student: usize,
) -> Vec<EnrollmentSeed> {
    let max_per_student = max_per_student.min(course_ids.len());

    student_ids
        .par_iter()
        .flat_map(|&student_id| {
            let mut rng = rand::thread_rng();
            let count = rng.gen_range(0..=max_per_student);
            let chosen: Vec<CourseId> = course_ids
                .choose_multiple(&mut rng, count)
                .copied()
                .collect();
            chosen
                .into_iter()
                .map(|course_id| {
                    let is_completed = rng.gen_bool(0.3);
                    // Grades run 2.0..=6.0 in half steps; only some are graded.
                    let grade = if is_completed || rng.gen_bool(0.2) {
                        Some(f64::from(rng.gen_range(4..=12_i32)) / 2.0)
                    } else {
                        None
                    };
                    EnrollmentSeed {
                        student_id,
                        course_id,
                        grade,
                        is_completed,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_enrollments(
    db: &PgPool,
    student_ids: &[StudentId],
    course_ids: &[CourseId],
    max_per_student: usize,
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let enrollments = generate_enrollments(student_ids, course_ids, max_per_student);
    println!("📝 Seeding {} enrollments...", enrollments.len());

    let mut tx = db.begin().await?;
    let mut inserted = 0;

    // 4 params per enrollment
    const BATCH_SIZE: usize = 2000;

    for chunk in enrollments.chunks(BATCH_SIZE) {
        let mut query = String::from(
            "INSERT INTO enrollments (student_id, course_id, grade, is_completed) VALUES ",
        );
        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            let p = i * 4;
            query.push_str(&format!("(${}, ${}, ${}, ${})", p + 1, p + 2, p + 3, p + 4));
        }
        query.push_str(" ON CONFLICT (student_id, course_id) DO NOTHING");

        let mut q = sqlx::query(&query);
        for enrollment in chunk {
            q = q
                .bind(enrollment.student_id)
                .bind(enrollment.course_id)
                .bind(enrollment.grade)
                .bind(enrollment.is_completed);
        }
        inserted += q.execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} enrollments in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}
