mod config;

use clap::Parser;
use config::Config;
use mrc_x64::{Address, Error, MemoryReference};
use std::process::ExitCode;
use tracing::{error, Level};

const BYTES_TO_PRINT: usize = 6;

fn encode(text: &str, fixed: bool) -> mrc_x64::Result<Address> {
    let reference: MemoryReference = text.parse()?;

    if !fixed {
        return Address::from_reference(&reference);
    }

    match reference {
        MemoryReference {
            base: Some(base),
            index: None,
            disp,
        } => Address::fixed(base, disp),
        _ => Err(Error::IllegalAddressingMode(
            "a fixed-width address takes a base register only",
        )),
    }
}

fn format_address(address: &Address) -> String {
    let mut b: String = address
        .bytes()
        .iter()
        .map(|b| format!("{:02X} ", b))
        .collect();

    for _ in address.length()..BYTES_TO_PRINT {
        b.push_str("   ");
    }

    format!("{:02X}  {}  {}", address.rex().bits(), b, address)
}

fn main() -> ExitCode {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_max_level(if config.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    for text in &config.addresses {
        match encode(text, config.fixed) {
            Ok(address) => println!("{}", format_address(&address)),
            Err(err) => {
                error!("Could not encode address. ({}) ({})", text, err);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
