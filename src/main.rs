use clap::Parser;

use schema_doc::cli::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let output = args.command.run(args.format)?;
    println!("{}", output);
    Ok(())
}
