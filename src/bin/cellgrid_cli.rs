//! CLI tool for cellgrid - applies one grid operation to a JSON document
//!
//! Usage:
//!   cellgrid_cli <doc.json> check                     # Validate the first grid
//!   cellgrid_cli <doc.json> merge 0 0 1 1             # Print the edited document
//!   cellgrid_cli <doc.json> insert-col 2 -o out.json  # Write it to a file
//!
//! Logging is controlled with `RUST_LOG` (default `cellgrid=info`).

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use cellgrid::grid::{
    get_selected, grid_at, insert_column, insert_row, merge_cells, move_column, move_row,
    remove_column, remove_row, split_cells, validate, GridEntry,
};
use cellgrid::host::memory::{Document, Node};
use cellgrid::{CellPoint, GridConfig, GridError, GridSelection, Path};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: cellgrid_cli <input.json> <command> [args...] [-o output.json] [--config config.json]

Commands:
  check
  insert-col <index> [width]
  remove-col <index>
  insert-row <index> [height]
  remove-row <index>
  move-col <from> <to>
  move-row <from> <to>
  merge <row0> <col0> <row1> <col1>
  split <row0> <col0> <row1> <col1>
  selected <row0> <col0> <row1> <col1>";

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn number<T: std::str::FromStr>(args: &[String], at: usize) -> T {
    let Some(raw) = args.get(at) else {
        fail(USAGE);
    };
    match raw.parse() {
        Ok(value) => value,
        Err(_) => fail(&format!("Invalid number: {raw}")),
    }
}

fn optional<T: std::str::FromStr>(args: &[String], at: usize) -> Option<T> {
    args.get(at).map(|_| number(args, at))
}

fn rect(args: &[String]) -> GridSelection {
    GridSelection::new(
        CellPoint::new(number(args, 1), number(args, 2)),
        CellPoint::new(number(args, 3), number(args, 4)),
    )
}

/// First top-level grid of the document.
fn first_grid(doc: &Document) -> Option<GridEntry<Node>> {
    (0..doc.children().len()).find_map(|index| grid_at(doc, &Path::new(vec![index])))
}

/// Run `command` against the first grid, returning JSON to print.
fn run(doc: &mut Document, command: &[String]) -> Result<String, GridError> {
    let Some(grid) = first_grid(doc) else {
        return Err(GridError::Other("document has no grid".into()));
    };
    let Some(name) = command.first() else {
        fail(USAGE);
    };
    info!(command = %name, path = %grid.path, "running");

    match name.as_str() {
        "check" => {
            validate(doc, &grid)?;
            return Ok("\"ok\"".to_string());
        }
        "selected" => {
            let selected = get_selected(doc, &grid, rect(command));
            return Ok(serde_json::to_string_pretty(&selected)?);
        }
        "insert-col" => {
            let template = doc.cell_template();
            insert_column(doc, &grid, number(command, 1), &template, optional(command, 2))?;
        }
        "remove-col" => {
            remove_column(doc, &grid, number(command, 1))?;
        }
        "insert-row" => {
            let (row, cell) = (doc.row_template(), doc.cell_template());
            insert_row(doc, &grid, number(command, 1), &row, &cell, optional(command, 2))?;
        }
        "remove-row" => {
            remove_row(doc, &grid, number(command, 1))?;
        }
        "move-col" => {
            if move_column(doc, &grid, number(command, 1), number(command, 2))?.is_none() {
                info!("move is a no-op");
            }
        }
        "move-row" => {
            if move_row(doc, &grid, number(command, 1), number(command, 2))?.is_none() {
                info!("move is a no-op");
            }
        }
        "merge" => {
            merge_cells(doc, &grid, Some(rect(command)))?;
        }
        "split" => {
            if split_cells(doc, &grid, Some(rect(command)))?.is_none() {
                info!("nothing to split");
            }
        }
        other => fail(&format!("Unknown command: {other}\n\n{USAGE}")),
    }

    if let Some(grid) = grid_at(doc, &grid.path) {
        validate(doc, &grid)?;
    }
    doc.to_json()
}

fn main() {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| "cellgrid=info".to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_env_filter(env_filter)
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let output_path = take_flag(&mut args, "-o");
    let config_path = take_flag(&mut args, "--config");

    if args.len() < 2 {
        fail(USAGE);
    }
    let input_path = args.remove(0);

    // Read config
    let config = match config_path {
        Some(path) => match fs::read_to_string(&path)
            .map_err(GridError::from)
            .and_then(|json| GridConfig::from_json(&json))
        {
            Ok(config) => config,
            Err(e) => fail(&format!("Error reading config {path}: {e}")),
        },
        None => GridConfig::default(),
    };

    // Read input document
    let mut doc = match fs::read_to_string(&input_path)
        .map_err(GridError::from)
        .and_then(|json| Document::from_json(&json, config))
    {
        Ok(doc) => doc,
        Err(e) => fail(&format!("Error reading {input_path}: {e}")),
    };

    let json = match run(&mut doc, &args) {
        Ok(json) => json,
        Err(e) => fail(&format!("Error: {e}")),
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                fail(&format!("Error writing {path}: {e}"));
            }
            eprintln!("Written: {path}");
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}

/// Remove `flag` and its value from `args`, returning the value.
fn take_flag(args: &mut Vec<String>, flag: &str) -> Option<String> {
    let at = args.iter().position(|arg| arg == flag)?;
    args.remove(at);
    if at < args.len() {
        Some(args.remove(at))
    } else {
        fail(USAGE);
    }
}
