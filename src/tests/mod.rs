// Test modules for the journeys-harness crate
//
// Each source module has a corresponding test module focused on the
// behavior scenarios rely on. Anything that needs a live HTTP peer lives
// in the integration tests under tests/ instead.

pub mod schema;
