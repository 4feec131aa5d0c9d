//! Ports - contracts between the application core and the outside world.
//!
//! Transport, persistence, and caching live behind these traits; the crate
//! ships no adapter implementations (collaborator concerns), only test
//! doubles.

mod enrollment_gateway;
mod event_publisher;
mod person_search;

pub use enrollment_gateway::EnrollmentGateway;
pub use event_publisher::EventPublisher;
pub use person_search::PersonSearchGateway;
