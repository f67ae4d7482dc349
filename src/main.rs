//! poselog main entrypoint.

use poselog::run;

fn main() {
    if let Err(e) = run() {
        poselog::ui::messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
