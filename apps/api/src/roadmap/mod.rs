// Roadmaps: stored milestone lists per role, scheduled onto a day budget on read.

pub mod handlers;
pub mod schedule;
pub mod store;
