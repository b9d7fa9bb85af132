pub mod dashboard;
pub mod events;
pub mod home;
pub mod issues;
pub mod session;
pub mod snapshot;
