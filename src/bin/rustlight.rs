//! Command-line interface for rustlight
//! This binary highlights Rust source files, or the Rust code blocks of an HTML page.
//!
//! Usage:
//!   rustlight `<path>` [--format `<format>`]     - Highlight a source file (`-` reads stdin)
//!   rustlight `<path>` --page                   - Highlight every code block of an HTML page
//!   rustlight --list-formats                    - List all available output formats
//!
//! Configuration is layered: embedded defaults, then `--config <file>`, then `--set key=value`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use env_logger::Env;
use rustlight::highlight::{FormatRegistry, HighlightConfig, Loader, PageHighlighter};
use std::error::Error;
use std::io::Read;

fn build_cli() -> Command {
    Command::new("rustlight")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Highlight Rust snippets for documentation pages")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the input file, or '-' for stdin")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (e.g., 'html', 'ansi', 'token-json')")
                .default_value("html"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("YAML file layered over the default configuration"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .value_name("KEY=VALUE")
                .help("Override one configuration key (e.g., 'render.markup=inline')")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .help("Treat the input as an HTML page and rewrite its code blocks")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let matches = build_cli().get_matches();
    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let registry = FormatRegistry::with_defaults();

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return Ok(());
    }

    let config = load_config(matches)?;
    let path = matches
        .get_one::<String>("path")
        .ok_or("missing input path")?;
    let source = read_input(path)?;

    if matches.get_flag("page") {
        let highlighter = PageHighlighter::new(&config)?;
        print!("{}", highlighter.highlight_page(&source));
        return Ok(());
    }

    let format = matches
        .get_one::<String>("format")
        .map_or("html", String::as_str);
    let tokens = rustlight::tokenize(&source);
    let output = registry.serialize(&tokens, format, &config)?;
    print!("{}", output);
    Ok(())
}

fn load_config(matches: &ArgMatches) -> Result<HighlightConfig, Box<dyn Error>> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(assignments) = matches.get_many::<String>("set") {
        for assignment in assignments {
            loader = loader.set_override_str(assignment)?;
        }
    }
    Ok(loader.build()?)
}

fn read_input(path: &str) -> Result<String, Box<dyn Error>> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }
    std::fs::read_to_string(path).map_err(|e| format!("reading {}: {}", path, e).into())
}

/// Handle the --list-formats flag
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available output formats:\n");
    for name in registry.list_formats() {
        println!("  {}", name);
        if let Some(formatter) = registry.get(&name) {
            println!("    {}", formatter.description());
        }
    }
}
