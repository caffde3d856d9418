// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The driver.  Loads an image, runs an ordered list of edit
//! operations against it, and snapshots the image to an
//! operation-specific file after each one that changes anything.

extern crate clap;

use clap::{App, Arg};
use log::warn;
use seamedit::{Editor, Error};
use std::fs;
use std::path::PathBuf;
use std::process;

const OPS: [&str; 4] = [
    "highlight-greenest",
    "highlight-lowest-energy",
    "remove",
    "undo",
];

// The snapshot filenames are part of the editor's fixed vocabulary.
fn snapshot_name(op: &str) -> &'static str {
    match op {
        "highlight-greenest" => "highlightedGreen.png",
        "highlight-lowest-energy" => "highlightLowestEnergy.png",
        "remove" => "removedSeam.png",
        _ => "undidSeam.png",
    }
}

fn run() -> Result<(), Error> {
    let matches = App::new("seamedit")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Reversible content-aware seam editing")
        .arg(
            Arg::with_name("image")
                .help("The image to edit")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("ops")
                .help("Operations to run, in order")
                .possible_values(&OPS)
                .multiple(true)
                .index(2),
        )
        .arg(
            Arg::with_name("outdir")
                .long("outdir")
                .short("d")
                .takes_value(true)
                .default_value("target")
                .help("Directory for the per-operation snapshots"),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .short("o")
                .takes_value(true)
                .help("Also write the final image here"),
        )
        .get_matches();

    let mut editor = Editor::load(matches.value_of("image").unwrap())?;
    let outdir = PathBuf::from(matches.value_of("outdir").unwrap());
    fs::create_dir_all(&outdir)?;

    if let Some(ops) = matches.values_of("ops") {
        for op in ops {
            let outcome = match op {
                "highlight-greenest" => editor.highlight_greenest(),
                "highlight-lowest-energy" => editor.highlight_lowest_energy_seam(),
                "remove" => editor.remove_highlighted(),
                _ => editor.undo(),
            };
            match outcome {
                Ok(()) => editor.save(outdir.join(snapshot_name(op)))?,
                Err(err @ Error::NothingHighlighted) | Err(err @ Error::NothingToUndo) => {
                    // A no-op, not a fault: report it and keep going.
                    println!("{}", err);
                    warn!("{}: {}", op, err);
                }
                Err(err) => return Err(err),
            }
        }
    }

    if let Some(output) = matches.value_of("output") {
        editor.save(output)?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("seamedit: {}", err);
        process::exit(1);
    }
}
