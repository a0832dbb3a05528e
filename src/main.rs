use std::{env, fs, path::PathBuf, process, time::Instant};

use pixc::{
    codegen::codegen::generate, display_error, lexer::lexer::Scanner, parser::parser::parse,
    type_checker::type_checker::check,
};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: pixc <program.pix>");
        process::exit(2);
    }

    let file_path = &args[1];
    let source = match fs::read_to_string(file_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {file_path}: {error}");
            process::exit(1);
        }
    };

    let start = Instant::now();

    let parse_start = Instant::now();
    let program = match parse(Scanner::new(&source)) {
        Ok(program) => program,
        Err(error) => {
            display_error(&error, &source, file_path);
            process::exit(1);
        }
    };
    println!("Parsed in {:?}", parse_start.elapsed());

    let check_start = Instant::now();
    let checked = match check(&program) {
        Ok(checked) => checked,
        Err(error) => {
            display_error(&error, &source, file_path);
            process::exit(1);
        }
    };
    println!("Type checked in {:?}", check_start.elapsed());

    let generate_start = Instant::now();
    let java = generate(&checked);
    println!("Generated in {:?}", generate_start.elapsed());

    // The generated class must live in a file named after it.
    let out_path = PathBuf::from(file_path).with_file_name(format!("{}.java", checked.name));
    if let Err(error) = fs::write(&out_path, java) {
        eprintln!("Failed to write {}: {error}", out_path.display());
        process::exit(1);
    }

    println!("Wrote {}", out_path.display());
    println!("Total time: {:?}", start.elapsed());
}
