use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

use crate::models::employee::Employee;

// The partition key. Put and delete must agree on this name.
pub const EMPLOYEE_ID_KEY: &str = "employeeId";
const FULL_NAME: &str = "fullName";
const BIRTH_YEAR: &str = "birthYear";
const DEPARTMENT: &str = "department";
const IMAGE_URL: &str = "imageUrl";

pub type Item = HashMap<String, AttributeValue>;

pub fn to_item(employee: &Employee) -> Item {
    let mut item = HashMap::new();
    item.insert(
        EMPLOYEE_ID_KEY.to_string(),
        AttributeValue::N(employee.employee_id.to_string()),
    );
    item.insert(FULL_NAME.to_string(), AttributeValue::S(employee.full_name.clone()));
    item.insert(
        BIRTH_YEAR.to_string(),
        AttributeValue::N(employee.birth_year.to_string()),
    );
    item.insert(DEPARTMENT.to_string(), AttributeValue::S(employee.department.clone()));
    if let Some(url) = &employee.image_url {
        item.insert(IMAGE_URL.to_string(), AttributeValue::S(url.clone()));
    }
    item
}

pub fn from_item(item: &Item) -> Result<Employee, String> {
    Ok(Employee {
        employee_id: number(item, EMPLOYEE_ID_KEY)?,
        full_name: string(item, FULL_NAME)?,
        birth_year: number(item, BIRTH_YEAR)?,
        department: string(item, DEPARTMENT)?,
        image_url: item.get(IMAGE_URL).and_then(|value| value.as_s().ok()).cloned(),
    })
}

fn string(item: &Item, name: &str) -> Result<String, String> {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .cloned()
        .ok_or_else(|| format!("missing string attribute {}", name))
}

fn number<T: std::str::FromStr>(item: &Item, name: &str) -> Result<T, String> {
    let raw = item
        .get(name)
        .and_then(|value| value.as_n().ok())
        .ok_or_else(|| format!("missing number attribute {}", name))?;
    raw.parse::<T>()
        .map_err(|_| format!("attribute {} is not a valid number: {}", name, raw))
}
