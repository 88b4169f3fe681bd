use super::entities::{Student, StudentEnrollment};
use crate::models::common::PaginationInfo;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StudentDetailResponse {
    pub student: Student,
    pub enrollments: Vec<StudentEnrollment>,
}

#[derive(Debug, Serialize)]
pub struct StudentListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Student>,
}
