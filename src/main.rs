//! FormalChip CLI binary.
//!
//! All logic lives in the library; main.rs only invokes `cli::run()` and
//! maps its exit code.

fn main() {
    let code = formalchip::cli::run();
    std::process::exit(code);
}
