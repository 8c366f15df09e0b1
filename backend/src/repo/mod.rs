pub mod migrations;
pub mod plans;
pub mod rules;
pub mod specialties;
pub mod subjects;
