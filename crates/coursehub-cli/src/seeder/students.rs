//! Student seeding, plus one `User` account per student so that
//! self-enrollment can be tried with any seeded email.

use chrono::{Duration, Utc};
use coursehub_models::{AccountId, Role, StudentId};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rand::Rng;
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;

use super::models::{SEED_EMAIL_DOMAIN, StudentSeed};

pub fn generate_students(count: usize) -> Vec<StudentSeed> {
    let today = Utc::now().date_naive();

    (0..count)
        .into_par_iter()
        .map(|idx| {
            let mut rng = rand::thread_rng();
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();

            let email = format!(
                "{}.{}+student{}@{}",
                email_part(&first_name),
                email_part(&last_name),
                idx,
                SEED_EMAIL_DOMAIN
            );

            StudentSeed {
                first_name,
                last_name,
                email,
                date_of_birth: today - Duration::days(rng.gen_range(18 * 365..35 * 365)),
                enrollment_date: today - Duration::days(rng.gen_range(0..4 * 365)),
            }
        })
        .collect()
}

fn email_part(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

pub async fn seed_students(
    db: &PgPool,
    count: usize,
    password_hash: &str,
) -> Result<Vec<StudentId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students with matching accounts...", count);

    let students = generate_students(count);
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(students.len());

    // 5 params per student, 4 per account
    const BATCH_SIZE: usize = 1000;

    for chunk in students.chunks(BATCH_SIZE) {
        let mut query = String::from(
            "INSERT INTO students (first_name, last_name, email, date_of_birth, enrollment_date) VALUES ",
        );
        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            let p = i * 5;
            query.push_str(&format!(
                "(${}, ${}, ${}, ${}, ${})",
                p + 1,
                p + 2,
                p + 3,
                p + 4,
                p + 5
            ));
        }
        query.push_str(" RETURNING id");

        let mut q = sqlx::query_scalar::<_, StudentId>(&query);
        for student in chunk {
            q = q
                .bind(&student.first_name)
                .bind(&student.last_name)
                .bind(&student.email)
                .bind(student.date_of_birth)
                .bind(student.enrollment_date);
        }
        ids.extend(q.fetch_all(&mut *tx).await?);

        let mut query =
            String::from("INSERT INTO accounts (id, email, password_hash, primary_role) VALUES ");
        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            let p = i * 4;
            query.push_str(&format!("(${}, ${}, ${}, ${})", p + 1, p + 2, p + 3, p + 4));
        }
        query.push_str(" ON CONFLICT DO NOTHING");

        let mut q = sqlx::query(&query);
        for student in chunk {
            q = q
                .bind(AccountId::new())
                .bind(&student.email)
                .bind(password_hash)
                .bind(Role::User);
        }
        q.execute(&mut *tx).await?;
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}
