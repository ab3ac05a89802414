//! Birdid CLI entry point.

#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

fn main() {
    if let Err(e) = birdid::run() {
        eprintln!("error: {}", birdid::data::error_message(&e));
        std::process::exit(1);
    }
}
