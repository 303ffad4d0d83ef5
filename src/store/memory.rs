//! In-process store honouring the same rules as the SQL schema: cascading
//! deletes, the `(student_id, course_id)` uniqueness and case-insensitive
//! account emails.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use coursehub_core::{AppError, ListQuery, PaginatedList};
use tokio::sync::RwLock;

use crate::modules::auth::model::{Account, AccountId, AccountRecord, Role};
use crate::modules::auth::repository::AccountRepository;
use crate::modules::courses::model::{Course, CourseForm, CourseId, CourseSort};
use crate::modules::courses::repository::CourseRepository;
use crate::modules::enrollments::model::{
    Enrollment, EnrollmentDetails, EnrollmentId, EnrollmentSort, NewEnrollment,
};
use crate::modules::enrollments::repository::EnrollmentRepository;
use crate::modules::students::model::{Student, StudentForm, StudentId, StudentSort};
use crate::modules::students::repository::StudentRepository;

#[derive(Default)]
struct Tables {
    students: BTreeMap<StudentId, Student>,
    courses: BTreeMap<CourseId, Course>,
    enrollments: BTreeMap<EnrollmentId, Enrollment>,
    accounts: BTreeMap<AccountId, AccountRecord>,
    next_student: i64,
    next_course: i64,
    next_enrollment: i64,
}

impl Tables {
    fn details(&self, enrollment: &Enrollment) -> Option<EnrollmentDetails> {
        let student = self.students.get(&enrollment.student_id)?;
        let course = self.courses.get(&enrollment.course_id)?;
        Some(EnrollmentDetails {
            id: enrollment.id,
            student_id: enrollment.student_id,
            course_id: enrollment.course_id,
            grade: enrollment.grade,
            enrollment_date: enrollment.enrollment_date,
            is_completed: enrollment.is_completed,
            student_first_name: student.first_name.clone(),
            student_last_name: student.last_name.clone(),
            course_title: course.title.clone(),
        })
    }

    fn check_references(&self, new: &NewEnrollment) -> Result<(), AppError> {
        if !self.students.contains_key(&new.student_id) || !self.courses.contains_key(&new.course_id)
        {
            return Err(AppError::bad_request(anyhow!(
                "Referenced student or course does not exist"
            )));
        }
        Ok(())
    }

    fn pair_taken(&self, new: &NewEnrollment, except: Option<EnrollmentId>) -> bool {
        self.enrollments.values().any(|e| {
            Some(e.id) != except && e.student_id == new.student_id && e.course_id == new.course_id
        })
    }
}

/// Repository implementation over in-memory tables, for tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored enrollments, for assertions.
    pub async fn enrollment_count(&self) -> usize {
        self.tables.read().await.enrollments.len()
    }
}

fn check_grade(grade: Option<f64>) -> Result<(), AppError> {
    match grade {
        Some(g) if !(2.0..=6.0).contains(&g) => Err(AppError::bad_request(anyhow!(
            "Value violates constraint enrollments_grade_check"
        ))),
        _ => Ok(()),
    }
}

// Descending orders reverse the id tiebreak too, like the SQL `ORDER BY`.
fn by_key<K: Ord>(a: K, b: K, a_id: i64, b_id: i64, descending: bool) -> Ordering {
    let ord = a.cmp(&b).then(a_id.cmp(&b_id));
    if descending { ord.reverse() } else { ord }
}

/// `NULLS LAST` ascending, `NULLS FIRST` descending.
fn by_grade(a: Option<f64>, b: Option<f64>, a_id: i64, b_id: i64, descending: bool) -> Ordering {
    let ord = match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then(a_id.cmp(&b_id));
    if descending { ord.reverse() } else { ord }
}

#[async_trait]
impl StudentRepository for MemoryStore {
    async fn list(&self, query: &ListQuery<StudentSort>) -> Result<PaginatedList<Student>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Student> = tables
            .students
            .values()
            .filter(|s| query.matches_any(&[s.first_name.as_str(), s.last_name.as_str(), s.email.as_str()]))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let (x, y) = (a.id.into_inner(), b.id.into_inner());
            match query.sort {
                StudentSort::LastNameAsc => by_key(&a.last_name, &b.last_name, x, y, false),
                StudentSort::LastNameDesc => by_key(&a.last_name, &b.last_name, x, y, true),
                StudentSort::EmailAsc => by_key(&a.email, &b.email, x, y, false),
                StudentSort::EmailDesc => by_key(&a.email, &b.email, x, y, true),
            }
        });

        Ok(PaginatedList::from_rows(rows, query.page))
    }

    async fn find(&self, id: StudentId) -> Result<Option<Student>, AppError> {
        Ok(self.tables.read().await.students.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .students
            .values()
            .find(|s| s.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert(&self, form: &StudentForm) -> Result<Student, AppError> {
        let mut tables = self.tables.write().await;
        tables.next_student += 1;
        let student = Student {
            id: StudentId(tables.next_student),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            date_of_birth: form.date_of_birth,
            enrollment_date: form.enrollment_date,
        };
        tables.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update(&self, id: StudentId, form: &StudentForm) -> Result<Option<Student>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.students.get_mut(&id).map(|student| {
            student.first_name = form.first_name.clone();
            student.last_name = form.last_name.clone();
            student.email = form.email.clone();
            student.date_of_birth = form.date_of_birth;
            student.enrollment_date = form.enrollment_date;
            student.clone()
        }))
    }

    async fn delete(&self, id: StudentId) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let removed = tables.students.remove(&id).is_some();
        if removed {
            tables.enrollments.retain(|_, e| e.student_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn list(&self, query: &ListQuery<CourseSort>) -> Result<PaginatedList<Course>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Course> = tables
            .courses
            .values()
            .filter(|c| query.matches_any(&[c.title.as_str(), c.description.as_str()]))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let (x, y) = (a.id.into_inner(), b.id.into_inner());
            match query.sort {
                CourseSort::TitleAsc => by_key(&a.title, &b.title, x, y, false),
                CourseSort::TitleDesc => by_key(&a.title, &b.title, x, y, true),
                CourseSort::CreditsAsc => by_key(a.credits, b.credits, x, y, false),
                CourseSort::CreditsDesc => by_key(a.credits, b.credits, x, y, true),
            }
        });

        Ok(PaginatedList::from_rows(rows, query.page))
    }

    async fn find(&self, id: CourseId) -> Result<Option<Course>, AppError> {
        Ok(self.tables.read().await.courses.get(&id).cloned())
    }

    async fn insert(&self, form: &CourseForm) -> Result<Course, AppError> {
        let mut tables = self.tables.write().await;
        tables.next_course += 1;
        let course = Course {
            id: CourseId(tables.next_course),
            title: form.title.clone(),
            description: form.description.clone(),
            credits: form.credits,
            start_date: form.start_date,
            end_date: form.end_date,
            is_active: form.is_active,
        };
        tables.courses.insert(course.id, course.clone());
        Ok(course)
    }

    async fn update(&self, id: CourseId, form: &CourseForm) -> Result<Option<Course>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.courses.get_mut(&id).map(|course| {
            course.title = form.title.clone();
            course.description = form.description.clone();
            course.credits = form.credits;
            course.start_date = form.start_date;
            course.end_date = form.end_date;
            course.is_active = form.is_active;
            course.clone()
        }))
    }

    async fn delete(&self, id: CourseId) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let removed = tables.courses.remove(&id).is_some();
        if removed {
            tables.enrollments.retain(|_, e| e.course_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl EnrollmentRepository for MemoryStore {
    async fn list(
        &self,
        query: &ListQuery<EnrollmentSort>,
    ) -> Result<PaginatedList<EnrollmentDetails>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<EnrollmentDetails> = tables
            .enrollments
            .values()
            .filter_map(|e| tables.details(e))
            .filter(|d| {
                query.matches_any(&[
                    d.student_first_name.as_str(),
                    d.student_last_name.as_str(),
                    d.course_title.as_str(),
                ])
            })
            .collect();

        rows.sort_by(|a, b| {
            let (x, y) = (a.id.into_inner(), b.id.into_inner());
            match query.sort {
                EnrollmentSort::DateAsc => by_key(a.enrollment_date, b.enrollment_date, x, y, false),
                EnrollmentSort::DateDesc => by_key(a.enrollment_date, b.enrollment_date, x, y, true),
                EnrollmentSort::GradeAsc => by_grade(a.grade, b.grade, x, y, false),
                EnrollmentSort::GradeDesc => by_grade(a.grade, b.grade, x, y, true),
            }
        });

        Ok(PaginatedList::from_rows(rows, query.page))
    }

    async fn find(&self, id: EnrollmentId) -> Result<Option<EnrollmentDetails>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.enrollments.get(&id).and_then(|e| tables.details(e)))
    }

    async fn insert(&self, new: &NewEnrollment) -> Result<Option<Enrollment>, AppError> {
        let mut tables = self.tables.write().await;
        tables.check_references(new)?;
        check_grade(new.grade)?;
        if tables.pair_taken(new, None) {
            return Ok(None);
        }

        tables.next_enrollment += 1;
        let enrollment = Enrollment {
            id: EnrollmentId(tables.next_enrollment),
            student_id: new.student_id,
            course_id: new.course_id,
            grade: new.grade,
            enrollment_date: new.enrollment_date,
            is_completed: new.is_completed,
        };
        tables.enrollments.insert(enrollment.id, enrollment.clone());
        Ok(Some(enrollment))
    }

    async fn update(
        &self,
        id: EnrollmentId,
        new: &NewEnrollment,
    ) -> Result<Option<Enrollment>, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.enrollments.contains_key(&id) {
            return Ok(None);
        }
        tables.check_references(new)?;
        check_grade(new.grade)?;
        if tables.pair_taken(new, Some(id)) {
            return Err(AppError::bad_request(anyhow!(
                "A record with the same values already exists"
            )));
        }

        Ok(tables.enrollments.get_mut(&id).map(|enrollment| {
            enrollment.student_id = new.student_id;
            enrollment.course_id = new.course_id;
            enrollment.grade = new.grade;
            enrollment.enrollment_date = new.enrollment_date;
            enrollment.is_completed = new.is_completed;
            enrollment.clone()
        }))
    }

    async fn delete(&self, id: EnrollmentId) -> Result<bool, AppError> {
        Ok(self.tables.write().await.enrollments.remove(&id).is_some())
    }

    async fn enrolled_course_ids(
        &self,
        student_id: StudentId,
        course_ids: &[CourseId],
    ) -> Result<Vec<CourseId>, AppError> {
        let tables = self.tables.read().await;
        let mut ids: Vec<CourseId> = tables
            .enrollments
            .values()
            .filter(|e| e.student_id == student_id && course_ids.contains(&e.course_id))
            .map(|e| e.course_id)
            .collect();
        ids.sort();
        Ok(ids)
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Account>, AppError> {
        let tables = self.tables.read().await;
        let mut accounts: Vec<Account> =
            tables.accounts.values().cloned().map(Account::from).collect();
        accounts.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(accounts)
    }

    async fn find(&self, id: AccountId) -> Result<Option<Account>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .accounts
            .get(&id)
            .cloned()
            .map(Account::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert(
        &self,
        email: &str,
        password_hash: &str,
        role: Option<Role>,
    ) -> Result<Option<Account>, AppError> {
        let mut tables = self.tables.write().await;
        if tables
            .accounts
            .values()
            .any(|a| a.email.eq_ignore_ascii_case(email))
        {
            return Ok(None);
        }

        let record = AccountRecord {
            id: AccountId::new(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            primary_role: role,
            created_at: Utc::now(),
        };
        tables.accounts.insert(record.id, record.clone());
        Ok(Some(record.into()))
    }

    async fn set_role(&self, id: AccountId, role: Option<Role>) -> Result<Option<Account>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.accounts.get_mut(&id).map(|record| {
            record.primary_role = role;
            Account::from(record.clone())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn student_form(last_name: &str, email: &str) -> StudentForm {
        StudentForm {
            id: None,
            first_name: "Test".into(),
            last_name: last_name.into(),
            email: email.into(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
        }
    }

    fn course_form(title: &str, credits: i32) -> CourseForm {
        CourseForm {
            id: None,
            title: title.into(),
            description: format!("{} description", title),
            credits,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_students_sorted_by_last_name_then_email_desc() {
        let store = MemoryStore::new();
        for (name, email) in [("Young", "b@x.io"), ("Adams", "c@x.io"), ("Marsh", "a@x.io")] {
            StudentRepository::insert(&store, &student_form(name, email))
                .await
                .unwrap();
        }

        let page = StudentRepository::list(&store, &ListQuery::default()).await.unwrap();
        let names: Vec<_> = page.items.iter().map(|s| s.last_name.as_str()).collect();
        assert_eq!(names, ["Adams", "Marsh", "Young"]);

        let query = ListQuery::<StudentSort>::new(None, Some("email_desc"), None);
        let page = StudentRepository::list(&store, &query).await.unwrap();
        let emails: Vec<_> = page.items.iter().map(|s| s.email.as_str()).collect();
        assert_eq!(emails, ["c@x.io", "b@x.io", "a@x.io"]);
    }

    #[tokio::test]
    async fn test_duplicate_pair_is_not_inserted() {
        let store = MemoryStore::new();
        let student = StudentRepository::insert(&store, &student_form("Doe", "d@x.io"))
            .await
            .unwrap();
        let course = CourseRepository::insert(&store, &course_form("Biology", 4))
            .await
            .unwrap();

        let new = NewEnrollment::starting_now(student.id, course.id);
        assert!(EnrollmentRepository::insert(&store, &new).await.unwrap().is_some());
        assert!(EnrollmentRepository::insert(&store, &new).await.unwrap().is_none());
        assert_eq!(store.enrollment_count().await, 1);
    }

    #[tokio::test]
    async fn test_dangling_reference_is_rejected() {
        let store = MemoryStore::new();
        let new = NewEnrollment::starting_now(StudentId(99), CourseId(99));
        let err = EnrollmentRepository::insert(&store, &new).await.unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
    }

    #[tokio::test]
    async fn test_grade_sort_puts_ungraded_last() {
        let store = MemoryStore::new();
        let course = CourseRepository::insert(&store, &course_form("Chemistry", 3))
            .await
            .unwrap();
        for (i, grade) in [Some(5.0), None, Some(3.0)].into_iter().enumerate() {
            let student = StudentRepository::insert(
                &store,
                &student_form(&format!("S{}", i), &format!("s{}@x.io", i)),
            )
            .await
            .unwrap();
            let mut new = NewEnrollment::starting_now(student.id, course.id);
            new.grade = grade;
            EnrollmentRepository::insert(&store, &new).await.unwrap();
        }

        let query = ListQuery::<EnrollmentSort>::new(None, Some("Grade"), None);
        let grades: Vec<_> = EnrollmentRepository::list(&store, &query)
            .await
            .unwrap()
            .items
            .iter()
            .map(|d| d.grade)
            .collect();
        assert_eq!(grades, [Some(3.0), Some(5.0), None]);
    }

    #[tokio::test]
    async fn test_account_emails_are_case_insensitive() {
        let store = MemoryStore::new();
        let first = AccountRepository::insert(&store, "Ada@Example.com", "hash", Some(Role::User))
            .await
            .unwrap();
        assert!(first.is_some());

        let second = AccountRepository::insert(&store, "ada@example.com", "hash", None)
            .await
            .unwrap();
        assert!(second.is_none());

        let found = AccountRepository::find_by_email(&store, "ADA@EXAMPLE.COM")
            .await
            .unwrap();
        assert_eq!(found.map(|a| a.primary_role), Some(Some(Role::User)));
    }
}
