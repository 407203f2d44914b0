use handlebars::Handlebars;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::employee::Employee;

const INDEX: &str = "index";

#[derive(Serialize)]
struct IndexPage<'a> {
    count: usize,
    employees: &'a [Employee],
}

/// HTML templates, compiled once at startup.
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string(INDEX, include_str!("../../templates/index.hbs"))
            .map_err(|err| AppError::Render(format!("Failed to register template: {}", err)))?;

        Ok(Self { registry })
    }

    /// Rows are sorted by id for display only.
    pub fn render_index(&self, mut employees: Vec<Employee>) -> Result<String, AppError> {
        employees.sort_by_key(|employee| employee.employee_id);

        self.registry
            .render(
                INDEX,
                &IndexPage {
                    count: employees.len(),
                    employees: &employees,
                },
            )
            .map_err(|err| AppError::Render(err.to_string()))
    }
}
