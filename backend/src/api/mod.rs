pub mod academ;
pub mod health;
pub mod plans;
pub mod specialties;
pub mod subjects;
pub mod upload;
