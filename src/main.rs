mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;
mod utils;
mod views;

#[cfg(test)]
mod testing;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::DynamoRecordStore;
use crate::services::employee_service::EmployeeService;
use crate::utils::s3::S3ObjectStore;
use crate::views::Views;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().map_err(to_io_error)?;

    let sdk_config = utils::aws::load_sdk_config(&config).await;
    let objects = S3ObjectStore::new(utils::s3::create_s3_client(&sdk_config, &config), &config);
    let records = DynamoRecordStore::new(db::create_dynamo_client(&sdk_config), &config);

    let service = web::Data::new(EmployeeService::new(Arc::new(objects), Arc::new(records)));
    let views = web::Data::new(Views::new().map_err(to_io_error)?);

    info!(
        "Starting server at {}:{} (bucket {}, table {})",
        config.host, config.port, config.bucket_name, config.table_name
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(service.clone())
            .app_data(views.clone())
            .configure(handlers::configure)
    })
    .bind(config.bind_address())?
    .run()
    .await
}

fn to_io_error(err: errors::AppError) -> std::io::Error {
    log::error!("{}", err);
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}
