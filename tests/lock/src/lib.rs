//! Shared fixtures for the lock tests and the `route_fixture` binary.
