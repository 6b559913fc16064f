use std::env::args_os;
use std::process::ExitCode;

use binpix::{render_to_png, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match render_to_png(&arguments) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Rendering failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
