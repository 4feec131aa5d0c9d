//! Scolaris - School Administration Core
//!
//! This crate implements the student-enrollment wizard: a four-step flow that
//! assembles an enrolled student, optional parent records, and a mandatory
//! guardian into a single atomic creation request.

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
