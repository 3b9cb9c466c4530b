pub mod dashboard;
pub mod login;
pub mod resources;
pub mod subjects;
pub mod topic_detail;
pub mod topics;
