use std::{fs::read_to_string, path::PathBuf, process, rc::Rc, time::Instant};

use clap::{Parser, ValueEnum};
use funclang::{
    display_error,
    errors::errors::Error,
    generator::generator::{compile, FailurePolicy},
    lexer::lexer::tokenize,
    parser::parser::parse,
};
use inkwell::context::Context;

#[derive(Parser)]
#[command(name = "funclang")]
#[command(about = "Compiles a small functional language to LLVM IR")]
struct Args {
    /// Path to the source file to compile
    file: PathBuf,

    /// What to print to stdout
    #[arg(long, value_enum, default_value_t = Emit::Ir)]
    emit: Emit,

    /// Also write the textual module to this path
    #[arg(long)]
    output: Option<PathBuf>,

    /// JIT-execute the last top-level expression and print its value
    #[arg(long)]
    run: bool,

    /// Keep lowering the remaining top-level units after one fails
    #[arg(long)]
    keep_going: bool,

    /// Print the time taken by each stage
    #[arg(long)]
    timings: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Emit {
    Ast,
    Ir,
}

fn main() {
    let args = Args::parse();

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| args.file.display().to_string());

    let source = read_to_string(&args.file).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", args.file.display(), e);
        process::exit(1);
    });

    let start = Instant::now();

    let tokens = tokenize(source.clone(), Some(file_name.clone()))
        .unwrap_or_else(|e| fail(&e, &source, &file_name));
    if args.timings {
        println!("Tokenized in {:?}", start.elapsed());
    }

    let parse_start = Instant::now();
    let nodes = parse(tokens, Rc::new(file_name.clone()))
        .unwrap_or_else(|e| fail(&e, &source, &file_name));
    if args.timings {
        println!("Parsed in {:?}", parse_start.elapsed());
    }

    if let Emit::Ast = args.emit {
        for node in &nodes {
            println!("{}", node);
        }
    }

    let policy = if args.keep_going {
        FailurePolicy::SkipUnit
    } else {
        FailurePolicy::Abort
    };

    let context = Context::create();
    let compile_start = Instant::now();
    let compilation = compile(&nodes, &context, &file_name, policy);
    if args.timings {
        println!("Lowered in {:?}", compile_start.elapsed());
    }

    if !compilation.errors.is_empty() {
        for error in &compilation.errors {
            display_error(error, &source, &file_name);
        }
        process::exit(1);
    }

    compilation
        .context
        .configure_target()
        .unwrap_or_else(|e| fail(&e, &source, &file_name));
    compilation
        .context
        .verify()
        .unwrap_or_else(|e| fail(&e, &source, &file_name));

    if let Emit::Ir = args.emit {
        print!("{}", compilation.context.print_to_string());
    }

    if let Some(output) = &args.output {
        compilation
            .context
            .save_module_to_file(output)
            .unwrap_or_else(|e| fail(&e, &source, &file_name));
        if args.timings {
            println!("Saved module to {}", output.display());
        }
    }

    if args.timings {
        println!("Total time for IR generation: {:?}", start.elapsed());
    }

    if args.run {
        let Some(entry) = compilation.last_entry_function() else {
            eprintln!("Nothing to run: '{}' has no top-level expression", file_name);
            process::exit(1);
        };

        let run_start = Instant::now();
        let value = compilation
            .context
            .run_function(entry)
            .unwrap_or_else(|e| fail(&e, &source, &file_name));
        if args.timings {
            println!("Ran in {:?}", run_start.elapsed());
        }

        println!("{}", value);
    }
}

fn fail(error: &Error, source: &str, file_name: &str) -> ! {
    display_error(error, source, file_name);
    process::exit(1);
}
