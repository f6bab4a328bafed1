use clap::Parser;

/// Print the ModR/M, SIB and displacement bytes of x86-64 memory operands.
#[derive(Debug, Parser)]
#[command(name = "mrc-x64-ea", version)]
pub struct Config {
    /// Always use a 32-bit displacement (base-only addresses).
    #[arg(long)]
    pub fixed: bool,

    /// Log the selected encoding of every address.
    #[arg(short, long)]
    pub verbose: bool,

    /// Addresses in Intel syntax, e.g. "[rbx+rcx*4+0x10]".
    #[arg(required = true)]
    pub addresses: Vec<String>,
}
