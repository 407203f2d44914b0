use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::RecordStore;
use crate::errors::AppError;
use crate::models::employee::{Employee, NewEmployee};
use crate::models::file::ImageUpload;
use crate::utils::s3::ObjectStore;
use crate::utils::validation;

/// Orchestrates the list, create and delete workflows over the two stores.
///
/// The stores are independent: nothing here is transactional. Create always
/// uploads the photo before writing the row, so a visible row never points at
/// a missing blob. Blobs are never removed.
pub struct EmployeeService {
    objects: Arc<dyn ObjectStore>,
    records: Arc<dyn RecordStore>,
}

impl EmployeeService {
    pub fn new(objects: Arc<dyn ObjectStore>, records: Arc<dyn RecordStore>) -> Self {
        Self { objects, records }
    }

    pub async fn list(&self) -> Result<Vec<Employee>, AppError> {
        self.records.scan_all().await
    }

    pub async fn create(
        &self,
        new_employee: NewEmployee,
        image: Option<ImageUpload>,
    ) -> Result<Employee, AppError> {
        // Reject before anything is persisted.
        let image = match image {
            Some(upload) => {
                let extension = validation::validate_image(&upload)?;
                Some((upload, extension))
            }
            None => None,
        };

        let image_url = match image {
            Some((upload, extension)) => {
                let key = object_key(new_employee.employee_id, &extension);
                let url = self
                    .objects
                    .put_object(&key, upload.bytes, &upload.content_type)
                    .await?;
                log::info!("Stored photo for employee {} at {}", new_employee.employee_id, key);
                Some(url)
            }
            None => None,
        };

        let employee = new_employee.into_employee(image_url);
        self.records.put(&employee).await?;
        log::info!("Saved employee {}", employee.employee_id);

        Ok(employee)
    }

    /// Deletes the selected ids one at a time, last submitted first, stopping
    /// at the first failure. Ids already deleted stay deleted.
    pub async fn delete_selected(&self, selected: Vec<String>) -> Result<usize, AppError> {
        let ids = parse_selection(&selected)?;

        for (done, employee_id) in ids.iter().rev().enumerate() {
            if let Err(err) = self.records.delete(*employee_id).await {
                log::error!(
                    "Batch delete stopped at employee {} after {} of {} deletions",
                    employee_id,
                    done,
                    ids.len()
                );
                return Err(err);
            }
        }

        if !ids.is_empty() {
            log::info!("Deleted {} employees", ids.len());
        }
        Ok(ids.len())
    }
}

/// `<employee id>_<unix millis>_<random>.<ext>`
fn object_key(employee_id: i64, extension: &str) -> String {
    format!(
        "{}_{}_{}.{}",
        employee_id,
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        extension
    )
}

/// Parses every selected name as an id, in submission order, without duplicates.
fn parse_selection(selected: &[String]) -> Result<Vec<i64>, AppError> {
    let mut seen = HashSet::new();
    let mut ids = Vec::with_capacity(selected.len());

    for raw in selected {
        let employee_id = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::BadRequest(format!("Invalid employee id: {}", raw)))?;
        if seen.insert(employee_id) {
            ids.push(employee_id);
        }
    }

    Ok(ids)
}
