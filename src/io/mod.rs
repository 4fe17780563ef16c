pub mod reporting;
pub mod traffic;
