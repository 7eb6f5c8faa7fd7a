//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `linkpack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("linkpack_core ping={}", linkpack_core::ping());
    println!("linkpack_core version={}", linkpack_core::core_version());
}
