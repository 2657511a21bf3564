//! Shape first-order terms interactively by rewrite rules.

use clap::Parser;
use shaperepl::{Error, Opt, Shell};
use std::io;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env("LOG").init();

    let opt = Opt::parse();

    let mut shell = Shell::new(&opt, io::stdout().lock());
    // scripts given on the command line are run as if loaded
    for file in &opt.files {
        shell.load(file)?;
    }

    if !opt.batch && !shell.quit() {
        shell.repl(io::stdin().lock())?;
    }
    Ok(())
}
