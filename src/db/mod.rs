mod item;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::employee::Employee;

use item::EMPLOYEE_ID_KEY;

/// Table storage for employee records, keyed by employee id.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every record in the table, in no particular order.
    async fn scan_all(&self) -> Result<Vec<Employee>, AppError>;

    /// Insert-or-replace keyed by `employee_id`.
    async fn put(&self, employee: &Employee) -> Result<(), AppError>;

    async fn delete(&self, employee_id: i64) -> Result<(), AppError>;
}

pub fn create_dynamo_client(sdk_config: &SdkConfig) -> DynamoClient {
    DynamoClient::new(sdk_config)
}

pub struct DynamoRecordStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoRecordStore {
    pub fn new(client: DynamoClient, config: &AppConfig) -> Self {
        Self {
            client,
            table_name: config.table_name.clone(),
        }
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn scan_all(&self) -> Result<Vec<Employee>, AppError> {
        let mut employees = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|err| {
                    log::error!("Error scanning table {}: {:?}", self.table_name, err);
                    AppError::RecordStoreFailure("Scan failed".to_string())
                })?;

            for row in output.items() {
                match item::from_item(row) {
                    Ok(employee) => employees.push(employee),
                    Err(reason) => {
                        log::warn!("Skipping malformed row in {}: {}", self.table_name, reason)
                    }
                }
            }

            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        log::debug!("Scanned {} records from {}", employees.len(), self.table_name);
        Ok(employees)
    }

    async fn put(&self, employee: &Employee) -> Result<(), AppError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item::to_item(employee)))
            .send()
            .await
            .map_err(|err| {
                log::error!("Error saving employee {}: {:?}", employee.employee_id, err);
                AppError::RecordStoreFailure("Put failed".to_string())
            })?;

        Ok(())
    }

    async fn delete(&self, employee_id: i64) -> Result<(), AppError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(EMPLOYEE_ID_KEY, AttributeValue::N(employee_id.to_string()))
            .send()
            .await
            .map_err(|err| {
                log::error!("Error deleting employee {}: {:?}", employee_id, err);
                AppError::RecordStoreFailure("Delete failed".to_string())
            })?;

        Ok(())
    }
}
