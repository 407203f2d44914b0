//! In-memory stores that record every call, for service and handler tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::db::RecordStore;
use crate::errors::AppError;
use crate::models::employee::Employee;
use crate::services::employee_service::EmployeeService;
use crate::utils::s3::ObjectStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub key: String,
    pub size: usize,
    pub content_type: String,
}

#[derive(Default)]
pub struct FakeObjectStore {
    pub uploads: Mutex<Vec<Upload>>,
    pub fail: Mutex<bool>,
}

impl FakeObjectStore {
    pub fn failing() -> Self {
        let store = Self::default();
        *store.fail.lock().unwrap() = true;
        store
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        if *self.fail.lock().unwrap() {
            return Err(AppError::ObjectStoreFailure("simulated outage".to_string()));
        }
        self.uploads.lock().unwrap().push(Upload {
            key: key.to_string(),
            size: bytes.len(),
            content_type: content_type.to_string(),
        });
        Ok(format!("https://fake-bucket.local/{}", key))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordCall {
    Scan,
    Put(i64),
    Delete(i64),
}

#[derive(Default)]
pub struct FakeRecordStore {
    pub rows: Mutex<BTreeMap<i64, Employee>>,
    pub calls: Mutex<Vec<RecordCall>>,
    pub fail_scan: Mutex<bool>,
    /// Delete of this id fails; earlier deletes stick.
    pub fail_delete_of: Mutex<Option<i64>>,
}

impl FakeRecordStore {
    pub fn with_rows(rows: Vec<Employee>) -> Self {
        let store = Self::default();
        {
            let mut map = store.rows.lock().unwrap();
            for row in rows {
                map.insert(row.employee_id, row);
            }
        }
        store
    }

    pub fn calls(&self) -> Vec<RecordCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn row(&self, employee_id: i64) -> Option<Employee> {
        self.rows.lock().unwrap().get(&employee_id).cloned()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.rows.lock().unwrap().keys().copied().collect()
    }
}

#[async_trait]
impl RecordStore for FakeRecordStore {
    async fn scan_all(&self) -> Result<Vec<Employee>, AppError> {
        self.calls.lock().unwrap().push(RecordCall::Scan);
        if *self.fail_scan.lock().unwrap() {
            return Err(AppError::RecordStoreFailure("simulated outage".to_string()));
        }
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn put(&self, employee: &Employee) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(RecordCall::Put(employee.employee_id));
        self.rows
            .lock()
            .unwrap()
            .insert(employee.employee_id, employee.clone());
        Ok(())
    }

    async fn delete(&self, employee_id: i64) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(RecordCall::Delete(employee_id));
        if *self.fail_delete_of.lock().unwrap() == Some(employee_id) {
            return Err(AppError::RecordStoreFailure("simulated outage".to_string()));
        }
        self.rows.lock().unwrap().remove(&employee_id);
        Ok(())
    }
}

pub fn service(objects: &Arc<FakeObjectStore>, records: &Arc<FakeRecordStore>) -> EmployeeService {
    EmployeeService::new(objects.clone(), records.clone())
}

pub fn employee(employee_id: i64, full_name: &str) -> Employee {
    Employee {
        employee_id,
        full_name: full_name.to_string(),
        birth_year: 1985,
        department: "Ops".to_string(),
        image_url: None,
    }
}
