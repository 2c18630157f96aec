//! Compile packet signature files and report the first diagnostic of each.
//!
//! Usage:
//!   sigcheck [OPTIONS] FILE.sig ...
//!   sigcheck < file.sig
//!
//! Options:
//!   --dump, -d   Print the compiled signatures of each valid file
//!
//! If no files are given, reads one source from stdin. Exit code 1 if any
//! input fails to compile.

use pktsig::{compile, compile_file, dump};
use std::io::Read;

fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let dump_sets = if let Some(pos) = args.iter().position(|a| a == "--dump" || a == "-d") {
        args.remove(pos);
        true
    } else {
        false
    };

    let mut has_error = false;

    if args.is_empty() {
        let mut src = String::new();
        std::io::stdin().read_to_string(&mut src)?;
        match compile(&src) {
            Ok(set) => {
                println!("<stdin>: {} signature(s)", set.len());
                if dump_sets {
                    print!("{}", dump::render_set(&set));
                }
            }
            Err(e) => {
                eprintln!("<stdin>: error: {}", e);
                has_error = true;
            }
        }
    } else {
        for path in &args {
            match compile_file(path) {
                Ok(set) => {
                    println!("{}: {} signature(s)", path, set.len());
                    if dump_sets {
                        print!("{}", dump::render_set(&set));
                    }
                }
                Err(e) => {
                    eprintln!("{}: error: {}", path, e);
                    has_error = true;
                }
            }
        }
    }

    if has_error {
        std::process::exit(1);
    }
    Ok(())
}
