// src/models/mod.rs

pub mod assessment;
pub mod id;
pub mod submission;
