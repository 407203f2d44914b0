use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub employee_id: i64,
    pub full_name: String,
    pub birth_year: i32,
    pub department: String,
    pub image_url: Option<String>,
}

/// Record fields submitted by the create form, before any image is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub employee_id: i64,
    pub full_name: String,
    pub birth_year: i32,
    pub department: String,
}

impl NewEmployee {
    pub fn into_employee(self, image_url: Option<String>) -> Employee {
        Employee {
            employee_id: self.employee_id,
            full_name: self.full_name,
            birth_year: self.birth_year,
            department: self.department,
            image_url,
        }
    }
}
