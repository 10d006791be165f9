pub mod application;
pub mod controller;
pub mod scheduler;
