pub mod log;

pub use log::LogNotificationGateway;
