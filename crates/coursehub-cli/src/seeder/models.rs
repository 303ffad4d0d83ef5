//! Seed records and seeding configuration.

use chrono::NaiveDate;
use coursehub_models::{CourseId, StudentId};

/// Appended to every seeded course description so `clear-seed` can find them.
pub const SEED_MARKER: &str = "[seed]";

/// Every seeded account and student uses an address on this domain.
pub const SEED_EMAIL_DOMAIN: &str = "example.com";

/// Password shared by every seeded `User` account.
pub const SEED_PASSWORD: &str = "password123";

pub struct CourseSeed {
    pub title: String,
    pub description: String,
    pub credits: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

pub struct StudentSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub enrollment_date: NaiveDate,
}

pub struct EnrollmentSeed {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub grade: Option<f64>,
    pub is_completed: bool,
}

/// Complete configuration for database seeding.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub num_courses: usize,
    pub num_students: usize,
    /// Upper bound on enrollments per student; the actual count is random.
    pub max_enrollments_per_student: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_courses: 10,
            num_students: 50,
            max_enrollments_per_student: 3,
        }
    }
}

impl SeedConfig {
    pub fn new(num_courses: usize, num_students: usize) -> Self {
        Self {
            num_courses,
            num_students,
            ..Default::default()
        }
    }

    pub fn with_max_enrollments(mut self, max_enrollments_per_student: usize) -> Self {
        self.max_enrollments_per_student = max_enrollments_per_student;
        self
    }
}
