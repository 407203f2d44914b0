use actix_multipart::{Field, Multipart};
use actix_web::http::header::{self, ContentType};
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use validator::Validate;

use crate::errors::AppError;
use crate::models::employee::NewEmployee;
use crate::models::file::ImageUpload;
use crate::services::employee_service::EmployeeService;
use crate::utils::validation::{self, MAX_UPLOAD_BYTES};
use crate::views::Views;

const MAX_TEXT_FIELD_BYTES: usize = 4 * 1024;

#[derive(Debug, Validate)]
struct SaveEmployeeForm {
    employee_id: i64,
    #[validate(length(min = 1, max = 100))]
    full_name: String,
    #[validate(range(min = 1900, max = 2100))]
    birth_year: i32,
    #[validate(length(min = 1, max = 100))]
    department: String,
}

impl From<SaveEmployeeForm> for NewEmployee {
    fn from(form: SaveEmployeeForm) -> Self {
        NewEmployee {
            employee_id: form.employee_id,
            full_name: form.full_name,
            birth_year: form.birth_year,
            department: form.department,
        }
    }
}

fn see_listing() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

fn malformed(err: impl std::fmt::Display) -> AppError {
    AppError::BadRequest(format!("Malformed form body: {}", err))
}

/// Reads a whole field, failing once it grows past `limit`.
async fn read_field(
    field: &mut Field,
    limit: usize,
    too_large: fn(usize) -> AppError,
) -> Result<Vec<u8>, AppError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(malformed)?;
        if data.len() + chunk.len() > limit {
            return Err(too_large(limit));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

fn field_too_large(limit: usize) -> AppError {
    AppError::BadRequest(format!("Form field exceeds {} bytes", limit))
}

fn image_too_large(limit: usize) -> AppError {
    AppError::PayloadTooLarge(format!("File size exceeds {} byte limit", limit))
}

async fn read_text(field: &mut Field) -> Result<String, AppError> {
    let data = read_field(field, MAX_TEXT_FIELD_BYTES, field_too_large).await?;
    String::from_utf8(data)
        .map_err(|_| AppError::BadRequest("Form fields must be UTF-8".to_string()))
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{} is required", name)))
}

fn parse_number<T: std::str::FromStr>(value: &Option<String>, name: &str) -> Result<T, AppError> {
    let raw = required(value, name)?;
    raw.parse::<T>()
        .map_err(|_| AppError::BadRequest(format!("{} must be a whole number", name)))
}

pub async fn list_employees(
    service: web::Data<EmployeeService>,
    views: web::Data<Views>,
) -> Result<HttpResponse, AppError> {
    let employees = service.list().await?;
    let html = views.render_index(employees)?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}

pub async fn save_employee(
    service: web::Data<EmployeeService>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let mut employee_id = None;
    let mut full_name = None;
    let mut birth_year = None;
    let mut department = None;
    let mut image = None;

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(malformed)?;
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "maNhanSu" => employee_id = Some(read_text(&mut field).await?),
            "hoTen" => full_name = Some(read_text(&mut field).await?),
            "namSinh" => birth_year = Some(read_text(&mut field).await?),
            "phongBan" => department = Some(read_text(&mut field).await?),
            "image" => {
                let file_name = field
                    .content_disposition()
                    .and_then(|disposition| disposition.get_filename())
                    .unwrap_or_default()
                    .to_string();
                let content_type = field
                    .content_type()
                    .map(|mime| mime.to_string())
                    .unwrap_or_default();
                let bytes = read_field(&mut field, MAX_UPLOAD_BYTES, image_too_large).await?;

                // Browsers send an empty part when no file was chosen.
                if !(file_name.is_empty() && bytes.is_empty()) {
                    image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            _ => {
                log::debug!("Ignoring unexpected form field {}", name);
                read_field(&mut field, MAX_TEXT_FIELD_BYTES, field_too_large).await?;
            }
        }
    }

    let form = SaveEmployeeForm {
        employee_id: parse_number(&employee_id, "maNhanSu")?,
        full_name: required(&full_name, "hoTen")?.to_string(),
        birth_year: parse_number(&birth_year, "namSinh")?,
        department: required(&department, "phongBan")?.to_string(),
    };
    validation::validate_payload(&form)?;

    service.create(form.into(), image).await?;
    Ok(see_listing())
}

/// Urlencoded batch delete: each submitted field name is a selected id.
pub async fn delete_employees(
    service: web::Data<EmployeeService>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let selected = url::form_urlencoded::parse(&body)
        .map(|(name, _)| name.into_owned())
        .collect::<Vec<_>>();

    service.delete_selected(selected).await?;
    Ok(see_listing())
}

pub async fn delete_employees_multipart(
    service: web::Data<EmployeeService>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let mut selected = Vec::new();

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(malformed)?;
        if let Some(name) = field.name() {
            selected.push(name.to_string());
        }
        read_text(&mut field).await?;
    }

    service.delete_selected(selected).await?;
    Ok(see_listing())
}
