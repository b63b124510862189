pub mod errors;
pub mod models;
pub mod otp;
pub mod ports;
pub mod service;
pub mod session;
