use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use svgscene::Color;
use svgscene_tools::commands;
use svgscene_tools::utils::term;

#[derive(Parser)]
#[command(name = "svg2png")]
#[command(about = "Render an SVG document to a PNG image", long_about = None)]
#[command(version)]
struct Cli {
    /// SVG file to render
    #[arg(value_hint = clap::ValueHint::FilePath)]
    input: PathBuf,

    /// PNG file to write
    #[arg(value_hint = clap::ValueHint::FilePath)]
    output: PathBuf,

    /// Canvas colour behind all shapes (#rrggbb, #rgb or a colour name)
    #[arg(short, long, default_value = "white")]
    background: Color,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    if let Err(e) = run() {
        term::report_error(&e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    term::init_color();

    // Default level depends on --debug (overridden by RUST_LOG)
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    commands::convert::execute(&cli.input, &cli.output, cli.background)
}
