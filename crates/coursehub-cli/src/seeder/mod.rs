//! Database seeding with fake courses, students and enrollments.
//!
//! - [`courses`] - Course generation and insertion
//! - [`students`] - Students and their matching `User` accounts
//! - [`enrollments`] - Random student/course pairs
//! - [`models`] - Seed records and configuration
//!
//! Data is generated in parallel with Rayon and inserted with multi-row
//! `INSERT` statements inside one transaction per table. All seeded accounts
//! share a single bcrypt hash computed at a low cost.

pub mod courses;
pub mod enrollments;
pub mod models;
pub mod students;

pub use models::{SEED_EMAIL_DOMAIN, SEED_MARKER, SEED_PASSWORD, SeedConfig};

use coursehub_core::password::hash_password_with_cost;
use sqlx::PgPool;
use std::time::Instant;

const SEED_BCRYPT_COST: u32 = 4;

/// Seeds courses, students (with accounts) and enrollments.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!("   - Courses: {}", config.num_courses);
    println!("   - Students: {}", config.num_students);
    println!(
        "   - Enrollments per student: up to {}",
        config.max_enrollments_per_student
    );

    let password_hash = hash_password_with_cost(SEED_PASSWORD, SEED_BCRYPT_COST)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let course_ids = courses::seed_courses(db, config.num_courses).await?;
    let student_ids = students::seed_students(db, config.num_students, &password_hash).await?;
    let enrolled = enrollments::seed_enrollments(
        db,
        &student_ids,
        &course_ids,
        config.max_enrollments_per_student,
    )
    .await?;

    println!(
        "\n✅ Seeding complete! Created {} courses, {} students, {} enrollments in {:?}",
        course_ids.len(),
        student_ids.len(),
        enrolled,
        start_time.elapsed()
    );
    println!("\n📝 Default password for all seeded accounts: {}", SEED_PASSWORD);

    Ok(())
}

/// Removes seeded rows. Admin accounts and hand-entered data stay.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing all seeded data...");

    let email_pattern = format!("%@{}", SEED_EMAIL_DOMAIN);
    let mut tx = db.begin().await?;

    // Enrollments go with their students and courses.
    let students = sqlx::query("DELETE FROM students WHERE email LIKE $1")
        .bind(&email_pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let courses = sqlx::query("DELETE FROM courses WHERE description LIKE $1")
        .bind(format!("%{}", SEED_MARKER))
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let accounts =
        sqlx::query("DELETE FROM accounts WHERE email LIKE $1 AND primary_role = 'User'")
            .bind(&email_pattern)
            .execute(&mut *tx)
            .await?
            .rows_affected();

    tx.commit().await?;

    println!(
        "\n✅ Cleared {} students, {} courses, {} accounts in {:?}",
        students,
        courses,
        accounts,
        start_time.elapsed()
    );

    Ok(())
}
