// SPDX-License-Identifier: MPL-2.0
use lens_crop::cli::{self, Command, USAGE};
use std::process::ExitCode;

fn main() -> ExitCode {
    lens_crop::logging::init();

    let args = match Command::from_env() {
        Ok(Command::Help) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Ok(Command::Crop(args)) => args,
        Err(err) => {
            eprintln!("lens_crop: {err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match cli::run(&args) {
        Ok(info) => {
            println!(
                "{},{},{},{}",
                info.rect.origin.x, info.rect.origin.y, info.rect.size.width, info.rect.size.height
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "crop failed");
            ExitCode::FAILURE
        }
    }
}
