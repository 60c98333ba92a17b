use blokmat::catalog::{BlockDefinition, BlockShape};
use blokmat::prelude::*;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Compiles and runs block workspaces saved by the math editor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to an editor config JSON file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Education level, overriding the config (genel, ilkokul, ortaokul, lise)
    #[arg(short, long, global = true)]
    level: Option<Level>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a workspace and run it, printing the console output
    Run {
        /// Path to the workspace XML file
        workspace: PathBuf,
        /// Print the generated code before running
        #[arg(long)]
        show_code: bool,
        /// Write the drawing of the run as SVG
        #[arg(long)]
        svg: Option<PathBuf>,
        /// Write the drawing request of the run as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Print the generated code of a workspace without running it
    Code {
        /// Path to the workspace XML file
        workspace: PathBuf,
    },
    /// List the blocks available at a level
    Catalog,
    /// Write the starter workspace of a level
    Starter {
        /// Where to write the workspace XML
        output: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EditorConfig::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to load config '{}': {}",
                path.display(),
                e
            ))
        }),
        None => EditorConfig::default(),
    };
    if let Some(level) = cli.level {
        config = config.with_level(level);
    }

    match cli.command {
        Command::Run {
            workspace,
            show_code,
            svg,
            json,
        } => run_workspace(config, workspace, show_code, svg, json),
        Command::Code { workspace } => {
            let mut editor = open_editor(config, &workspace);
            let code = editor
                .generate_code()
                .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
            println!("{}", code);
        }
        Command::Catalog => print_catalog(config.level),
        Command::Starter { output } => {
            Workspace::starter(config.level)
                .save(&output)
                .unwrap_or_else(|e| {
                    exit_with_error(&format!(
                        "Failed to write workspace '{}': {}",
                        output.display(),
                        e
                    ))
                });
            println!("Starter workspace for '{}' written to {}", config.level, output.display());
        }
    }
}

fn open_editor(config: EditorConfig, path: &PathBuf) -> Editor {
    let workspace = Workspace::load(path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load workspace '{}': {}",
            path.display(),
            e
        ))
    });
    let mut editor = Editor::new(config);
    editor.load_workspace(workspace);
    editor
}

fn run_workspace(
    config: EditorConfig,
    path: PathBuf,
    show_code: bool,
    svg_path: Option<PathBuf>,
    json_path: Option<PathBuf>,
) {
    let total_start = Instant::now();
    let mut editor = open_editor(config, &path);
    println!(
        "\nLoaded {} block(s) for level '{}'",
        editor.workspace().block_count(),
        editor.level()
    );

    // --- 1. Code generation ---
    let compile_start = Instant::now();
    let code = editor
        .generate_code()
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)))
        .to_string();
    let compile_duration = compile_start.elapsed();
    if show_code {
        println!("\n--- Generated Code ---\n{}", code);
    }

    // --- 2. Execution ---
    let run_start = Instant::now();
    let lines = editor
        .run()
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)))
        .to_vec();
    let run_duration = run_start.elapsed();

    println!("\n--- Output ---");
    for line in &lines {
        println!("{}", line);
    }

    // --- 3. Drawing ---
    match editor.visualization() {
        Some(visualization) => {
            println!("\nDrawing: {}", visualization.tag());
            if let Some(json_path) = &json_path {
                let json = visualization.to_json().unwrap_or_else(|e| {
                    exit_with_error(&format!("Failed to serialize drawing: {}", e))
                });
                write_file(json_path, &json);
            }
        }
        None => println!("\nNo drawing requested."),
    }
    if let Some(svg_path) = &svg_path {
        match editor.render_svg() {
            Ok(Some(svg)) => write_file(svg_path, &svg),
            Ok(None) => println!("Nothing to render, {} not written.", svg_path.display()),
            Err(e) => exit_with_error(&format!("Rendering failed: {}", e)),
        }
    }

    println!("\n--- Summary ---");
    println!("Code Generation:  {:?}", compile_duration);
    println!("Execution:        {:?}", run_duration);
    println!("Total:            {:?}", total_start.elapsed());
}

fn print_catalog(level: Level) {
    let compiler = Compiler::new(level);
    println!("--- {} ({}) ---", level.title(), level);
    for definition in compiler
        .catalog()
        .iter()
        .sorted_by(|a, b| a.block_type.cmp(&b.block_type))
    {
        println!("  {:<32} {}", definition.block_type, describe(definition));
    }
    println!("\n{} block(s)", compiler.catalog().len());
}

fn describe(definition: &BlockDefinition) -> String {
    let shape = match definition.shape {
        BlockShape::Statement => "statement".to_string(),
        BlockShape::Output(ty) => format!("-> {}", ty),
        BlockShape::Flexible(ty) => format!("statement | -> {}", ty),
    };
    let slots = definition.slots.iter().map(|slot| slot.name).join(", ");
    if slots.is_empty() {
        shape
    } else {
        format!("{} [{}]", shape, slots)
    }
}

fn write_file(path: &PathBuf, contents: &str) {
    fs::write(path, contents).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to write '{}': {}", path.display(), e))
    });
    println!("Wrote {}", path.display());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
