pub mod employee;
pub mod one_time_code;
pub mod refresh_session;
pub mod subject;

pub use employee::PostgresEmployeeRepository;
pub use one_time_code::PostgresOneTimeCodeRepository;
pub use refresh_session::PostgresRefreshSessionRepository;
pub use subject::PostgresSubjectRepository;
