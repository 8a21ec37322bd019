//! Bindgen entry point for generating Swift/Kotlin bindings
//!
//! cargo run --features uniffi --bin uniffi-bindgen generate --library <lib> --language swift --out-dir <dir>

fn main() {
    uniffi::uniffi_bindgen_main()
}
