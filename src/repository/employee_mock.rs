#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, RwLock};

use crate::AdminError;

use super::employee::{Employee, EmployeeRepository};

#[derive(Clone, Default)]
pub struct MockEmployeeRepository {
    pub employees: Arc<RwLock<Vec<Employee>>>,
}

impl MockEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeRepository for MockEmployeeRepository {
    async fn insert_employee(&self, employee: Employee) -> Result<Employee, AdminError> {
        let mut employees = self.employees.write().unwrap();
        if employees.iter().any(|e| e.email == employee.email) {
            return Err(AdminError::Conflict("Email already registered".to_owned()));
        }
        employees.push(employee.clone());
        Ok(employee)
    }

    async fn find_employee_by_id(&self, id: &str) -> Result<Option<Employee>, AdminError> {
        let employees = self.employees.read().unwrap();
        Ok(employees.iter().find(|e| e.id == id).cloned())
    }

    async fn find_employee_by_email(&self, email: &str) -> Result<Option<Employee>, AdminError> {
        let employees = self.employees.read().unwrap();
        Ok(employees.iter().find(|e| e.email == email).cloned())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, AdminError> {
        let employees = self.employees.read().unwrap();
        let mut list: Vec<Employee> = employees.iter().rev().cloned().collect();
        // stable: later inserts stay first on equal timestamps
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn set_employee_active(
        &self,
        id: &str,
        is_active: bool,
    ) -> Result<Option<Employee>, AdminError> {
        let mut employees = self.employees.write().unwrap();
        Ok(employees.iter_mut().find(|e| e.id == id).map(|e| {
            e.is_active = is_active;
            e.updated_at = Utc::now();
            e.clone()
        }))
    }

    async fn count_employees(&self) -> Result<u64, AdminError> {
        Ok(self.employees.read().unwrap().len() as u64)
    }

    async fn count_employees_with_role(&self, role_id: &str) -> Result<u64, AdminError> {
        let employees = self.employees.read().unwrap();
        Ok(employees.iter().filter(|e| e.role == role_id).count() as u64)
    }
}
