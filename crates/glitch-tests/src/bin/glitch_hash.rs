//! Prints `name digest` for every golden case.

use glitch_tests::golden::{cases, digest, run_case};

fn main() {
    println!("# glitch-rs golden digests (SHA256 of width, height, RGBA)");
    for case in cases() {
        println!("{} {}", case.name, digest(&run_case(&case)));
    }
}
