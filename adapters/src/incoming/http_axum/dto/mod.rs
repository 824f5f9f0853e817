pub mod common_responses;
pub mod requests;
pub mod responses;
