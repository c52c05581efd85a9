pub mod s3_gateway;
pub mod storage_service;

#[cfg(test)]
pub mod memory;
