//! Summary of the student table handed to the assistant as grounding facts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::student::Student;

/// Course label used for students without one
pub const DEFAULT_COURSE: &str = "General";

/// One turn of assistant conversation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Speaker, e.g. `USER` or `CHATBOT`
    pub role: String,
    pub message: String,
}

/// Database facts: total count, per-course counts and a compact student list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentContext {
    pub total_students: usize,
    pub course_counts: BTreeMap<String, usize>,
    /// Comma separated description of every student, or `None`
    pub student_list: String,
}

impl StudentContext {
    pub fn from_students(students: &[Student]) -> Self {
        let mut course_counts = BTreeMap::new();
        for student in students {
            let course = student
                .course
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(DEFAULT_COURSE);
            *course_counts.entry(course.to_string()).or_insert(0) += 1;
        }

        let student_list = if students.is_empty() {
            "None".to_string()
        } else {
            students
                .iter()
                .map(describe)
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            total_students: students.len(),
            course_counts,
            student_list,
        }
    }

    /// Render the facts block embedded in the assistant preamble
    pub fn to_facts(&self) -> String {
        let counts = self
            .course_counts
            .iter()
            .map(|(course, count)| format!("{}: {}", course, count))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "DATABASE DATA:\n- Total Students: {}\n- Courses: {}\n- Student List: {}",
            self.total_students,
            if counts.is_empty() { "None".to_string() } else { counts },
            self.student_list
        )
    }
}

fn describe(student: &Student) -> String {
    let details = [
        student.course.clone(),
        student.age.map(|a| format!("age {}", a)),
        student.email.clone(),
        student.phone.clone(),
        student.gender.clone(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>();

    if details.is_empty() {
        student.name.clone()
    } else {
        format!("{} ({})", student.name, details.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn student(name: &str, course: Option<&str>, age: Option<i32>) -> Student {
        Student {
            id: 1,
            name: name.to_string(),
            age,
            email: None,
            phone: None,
            gender: None,
            course: course.map(String::from),
            address: None,
            image: None,
            created_by: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_context() {
        let context = StudentContext::from_students(&[]);

        assert_eq!(context.total_students, 0);
        assert!(context.course_counts.is_empty());
        assert_eq!(context.student_list, "None");
        assert!(context.to_facts().contains("Total Students: 0"));
    }

    #[test]
    fn test_counts_missing_course_as_general() {
        let students = vec![
            student("Ann", Some("Math"), Some(20)),
            student("Ben", Some("Math"), None),
            student("Cid", None, None),
        ];
        let context = StudentContext::from_students(&students);

        assert_eq!(context.total_students, 3);
        assert_eq!(context.course_counts["Math"], 2);
        assert_eq!(context.course_counts[DEFAULT_COURSE], 1);
        assert_eq!(context.student_list, "Ann (Math, age 20), Ben (Math), Cid");
    }
}
