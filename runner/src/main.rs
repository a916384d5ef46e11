#[macro_use]
extern crate log;

use std::env;
use std::process;

use wasm_object::read_module_file;

fn main() {
    env_logger::init();

    let path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: runner <object.wasm>");
            process::exit(2);
        }
    };

    let mut trace: Vec<String> = vec![];
    match read_module_file(&path, &mut trace) {
        Ok(module) => {
            for line in &trace {
                println!("{}", line);
            }
            info!(
                "{}: {} functions, {} relocs, {} symbols",
                path,
                module.functions.len(),
                module.relocs.len(),
                module.symbols.len()
            );
        }
        Err(e) => {
            for line in &trace {
                println!("{}", line);
            }
            eprintln!("{}: {}", path, e);
            process::exit(1);
        }
    }
}
