//! MySQL implementation of the StudentRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use sm_core::domain::entities::student::{NewStudent, Student, StudentWithOwner};
use sm_core::errors::DomainError;
use sm_core::repositories::StudentRepository;

use super::db_error;

const STUDENT_COLUMNS: &str = "s.id, s.name, s.age, s.email, s.phone, s.gender, s.course, \
                               s.address, s.image, s.created_by, s.created_at";

/// MySQL implementation of StudentRepository
pub struct MySqlStudentRepository {
    pool: MySqlPool,
}

impl MySqlStudentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_student(row: &sqlx::mysql::MySqlRow) -> Result<Student, DomainError> {
        Ok(Student {
            id: row.try_get("id").map_err(|e| db_error("Failed to get id", e))?,
            name: row
                .try_get("name")
                .map_err(|e| db_error("Failed to get name", e))?,
            age: row.try_get("age").map_err(|e| db_error("Failed to get age", e))?,
            email: row
                .try_get("email")
                .map_err(|e| db_error("Failed to get email", e))?,
            phone: row
                .try_get("phone")
                .map_err(|e| db_error("Failed to get phone", e))?,
            gender: row
                .try_get("gender")
                .map_err(|e| db_error("Failed to get gender", e))?,
            course: row
                .try_get("course")
                .map_err(|e| db_error("Failed to get course", e))?,
            address: row
                .try_get("address")
                .map_err(|e| db_error("Failed to get address", e))?,
            image: row
                .try_get("image")
                .map_err(|e| db_error("Failed to get image", e))?,
            created_by: row
                .try_get("created_by")
                .map_err(|e| db_error("Failed to get created_by", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("Failed to get created_at", e))?,
        })
    }
}

#[async_trait]
impl StudentRepository for MySqlStudentRepository {
    async fn list_with_owner(&self) -> Result<Vec<StudentWithOwner>, DomainError> {
        let query = format!(
            "SELECT {}, u.name AS owner_name \
             FROM students s \
             LEFT JOIN users u ON s.created_by = u.id \
             ORDER BY s.created_at DESC, s.id DESC",
            STUDENT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list students", e))?;

        rows.iter()
            .map(|row| {
                Ok(StudentWithOwner {
                    student: Self::row_to_student(row)?,
                    owner_name: row
                        .try_get("owner_name")
                        .map_err(|e| db_error("Failed to get owner_name", e))?,
                })
            })
            .collect()
    }

    async fn list(&self) -> Result<Vec<Student>, DomainError> {
        let query = format!(
            "SELECT {} FROM students s ORDER BY s.created_at DESC, s.id DESC",
            STUDENT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list students", e))?;

        rows.iter().map(Self::row_to_student).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DomainError> {
        let query = format!("SELECT {} FROM students s WHERE s.id = ? LIMIT 1", STUDENT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Database query failed", e))?;

        result.as_ref().map(Self::row_to_student).transpose()
    }

    async fn create(
        &self,
        student: NewStudent,
        image: Option<String>,
        created_by: i64,
    ) -> Result<Student, DomainError> {
        let query = r#"
            INSERT INTO students
                (name, age, email, phone, gender, course, address, image, created_by)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&student.name)
            .bind(student.age)
            .bind(&student.email)
            .bind(&student.phone)
            .bind(&student.gender)
            .bind(&student.course)
            .bind(&student.address)
            .bind(&image)
            .bind(created_by)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to create student", e))?;

        Ok(Student {
            id: result.last_insert_id() as i64,
            name: student.name,
            age: student.age,
            email: student.email,
            phone: student.phone,
            gender: student.gender,
            course: student.course,
            address: student.address,
            image,
            created_by,
            created_at: Utc::now(),
        })
    }

    async fn update(
        &self,
        id: i64,
        owner_id: i64,
        student: NewStudent,
        image: Option<String>,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE students
            SET name = ?, age = ?, email = ?, phone = ?,
                gender = ?, course = ?, address = ?, image = ?
            WHERE id = ? AND created_by = ?
        "#;

        let result = sqlx::query(query)
            .bind(&student.name)
            .bind(student.age)
            .bind(&student.email)
            .bind(&student.phone)
            .bind(&student.gender)
            .bind(&student.course)
            .bind(&student.address)
            .bind(&image)
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update student", e))?;

        // An update writing identical values reports zero changed rows
        if result.rows_affected() > 0 {
            return Ok(true);
        }
        let owned = sqlx::query("SELECT 1 FROM students WHERE id = ? AND created_by = ?")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check student", e))?;
        Ok(owned.is_some())
    }

    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM students WHERE id = ? AND created_by = ?")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete student", e))?;

        Ok(result.rows_affected() > 0)
    }
}
