//! Sable compiler command-line interface.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sable::codegen::CppBackendOptions;
use sable::frontend::{dump_ast_json, dump_ast_text, AstDumpOptions};
use sable::ir::print_module;
use sable::lsp::Server;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sable")]
#[command(version)]
#[command(about = "Compiler for the Sable language")]
#[command(long_about = r#"
Sable is a small statically-typed, expression-oriented language. The
compiler lexes, parses, type-checks, lowers to a linear IR, runs
optimization passes, and emits C++ source files.

Example usage:
  sable compile input.sb --out-dir generated/
  sable parse input.sb --json
  sable check input.sb
  sable ir input.sb
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a source file to C++ header and source files
    Compile {
        /// Input source file
        input: PathBuf,

        /// Output directory (default: print to stdout)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Module name (default: input file stem)
        #[arg(long)]
        module_name: Option<String>,

        /// Namespace for generated declarations
        #[arg(long)]
        namespace: Option<String>,

        /// Skip the header file
        #[arg(long)]
        no_header: bool,

        /// Skip the source file
        #[arg(long)]
        no_source: bool,
    },

    /// Print the parsed AST (for debugging)
    Parse {
        /// Input source file
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Omit node ids
        #[arg(long)]
        no_ids: bool,

        /// Omit source spans
        #[arg(long)]
        no_spans: bool,
    },

    /// Analyze a source file and report diagnostics
    Check {
        /// Input source file
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the optimized IR
    Ir {
        /// Input source file
        input: PathBuf,

        /// Module name (default: input file stem)
        #[arg(long)]
        module_name: Option<String>,
    },

    /// Run the language server on stdio
    Lsp,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile { input, out_dir, module_name, namespace, no_header, no_source } => {
            cmd_compile(input, out_dir, module_name, namespace, no_header, no_source)
        }
        Commands::Parse { input, json, no_ids, no_spans } => cmd_parse(input, json, no_ids, no_spans),
        Commands::Check { input, json } => cmd_check(input, json),
        Commands::Ir { input, module_name } => cmd_ir(input, module_name),
        Commands::Lsp => cmd_lsp(),
    }
}

fn read_source(input: &Path) -> Result<String> {
    fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}

fn module_name_for(input: &Path, explicit: Option<String>) -> String {
    explicit.unwrap_or_else(|| {
        input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "module".to_string())
    })
}

fn cmd_compile(
    input: PathBuf,
    out_dir: Option<PathBuf>,
    module_name: Option<String>,
    namespace: Option<String>,
    no_header: bool,
    no_source: bool,
) -> Result<()> {
    let source = read_source(&input)?;
    let name = module_name_for(&input, module_name);

    let mut options = CppBackendOptions {
        emit_header: !no_header,
        emit_source: !no_source,
        ..Default::default()
    };
    if let Some(namespace) = namespace {
        options.namespace_name = namespace;
    }

    let output = sable::compile_to_cpp(&source, &name, options)?;

    for diagnostic in &output.diagnostics {
        eprintln!("{}", diagnostic);
    }

    match out_dir {
        Some(dir) => {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            for file in &output.files {
                let path = dir.join(&file.path);
                fs::write(&path, &file.contents)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("Wrote {} bytes to {}", file.contents.len(), path.display());
            }
        }
        None => {
            for file in &output.files {
                println!("// ==== {} ====", file.path);
                print!("{}", file.contents);
            }
        }
    }

    Ok(())
}

fn cmd_parse(input: PathBuf, json: bool, no_ids: bool, no_spans: bool) -> Result<()> {
    let source = read_source(&input)?;

    let mut ast = sable::frontend::AstContext::new();
    let root = sable::parse_source(&source, &mut ast)?;

    let options = AstDumpOptions {
        include_ids: !no_ids,
        include_spans: !no_spans,
    };
    if json {
        print!("{}", dump_ast_json(&ast, root, &options));
    } else {
        print!("{}", dump_ast_text(&ast, root, &options));
    }
    Ok(())
}

fn cmd_check(input: PathBuf, json: bool) -> Result<()> {
    let source = read_source(&input)?;
    let analysis = sable::analyze_source(&source)?;

    if json {
        let rendered: Vec<_> = analysis.diagnostics.iter().map(|d| d.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        for diagnostic in &analysis.diagnostics {
            println!("{}", diagnostic);
        }
    }

    if analysis.diagnostics.is_empty() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

fn cmd_ir(input: PathBuf, module_name: Option<String>) -> Result<()> {
    let source = read_source(&input)?;
    let name = module_name_for(&input, module_name);

    let (module, diagnostics) = sable::lower_source(&source, &name)?;
    for diagnostic in &diagnostics {
        eprintln!("{}", diagnostic);
    }
    print!("{}", print_module(&module));
    Ok(())
}

fn cmd_lsp() -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    let code = Server::new().run(&mut input, &mut output);
    std::process::exit(code);
}
