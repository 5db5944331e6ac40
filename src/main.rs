use clap::{Arg, ArgAction, Command as ClapCommand};
use log::error;
use std::collections::HashMap;
use std::path::Path;
use std::process;

use tifflike::tiff::properties;
use tifflike::{QuickHash, TiffReader, TiffResult};

fn run(input: &str, show_properties: bool, show_hash: bool) -> TiffResult<()> {
    let path = Path::new(input);
    let tiff = TiffReader::open(path)?;

    println!(
        "{} with {} directories",
        if tiff.is_big_tiff() { "BigTIFF" } else { "TIFF" },
        tiff.directory_count()
    );
    print!("{}", tiff);

    if show_properties || show_hash {
        let mut props = HashMap::new();
        let mut quickhash = QuickHash::new();
        // hash the smallest pyramid level, read properties from the first
        let lowest = tiff.directory_count() - 1;
        properties::init_properties_and_hash(
            &tiff,
            path,
            Some(&mut props),
            &mut quickhash,
            lowest,
            0,
        )?;

        if show_properties {
            let mut keys: Vec<&String> = props.keys().collect();
            keys.sort();
            for key in keys {
                println!("{}: {}", key, props[key]);
            }
        }
        if show_hash {
            match quickhash.hexdigest() {
                Some(digest) => println!("quickhash: {}", digest),
                None => println!("quickhash: not available"),
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let matches = ClapCommand::new("tifflike")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Dump TIFF/BigTIFF directory structure")
        .arg(
            Arg::new("input")
                .help("Input TIFF file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("properties")
                .short('p')
                .long("properties")
                .help("Extract the well-known slide properties")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("hash")
                .long("hash")
                .help("Compute the quickhash of the lowest-resolution level")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let input = match matches.get_one::<String>("input") {
        Some(input) => input,
        None => {
            eprintln!("Error: missing input file");
            process::exit(1);
        }
    };

    if let Err(e) = run(
        input,
        matches.get_flag("properties"),
        matches.get_flag("hash"),
    ) {
        error!("Failed to process {}: {}", input, e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
