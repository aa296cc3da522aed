pub mod fake_transport;
pub mod fixtures;

/// Log output for a failing test: `RUST_LOG=backoffice_core=debug cargo test`.
pub fn init_logging() {
    backoffice_core::logging::init();
}
