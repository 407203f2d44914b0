pub mod employee;

use actix_web::guard::{self, GuardContext};
use actix_web::http::header;
use actix_web::web;

fn is_multipart(ctx: &GuardContext) -> bool {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(employee::list_employees)),
    )
    .service(
        web::resource("/save")
            .route(web::post().to(employee::save_employee)),
    )
    .service(
        web::resource("/delete")
            .route(
                web::post()
                    .guard(guard::fn_guard(is_multipart))
                    .to(employee::delete_employees_multipart),
            )
            .route(web::post().to(employee::delete_employees)),
    );
}
