pub mod aws;
pub mod s3;
pub mod validation;
