//! Small helpers shared across CLI tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use super::{Cli, CliError, GraphArgs, QueryArgs, run_cli};

/// Medici family ties from the Florentine marriage network.
pub(super) const FLORENTINE: &str = "\
# family ties
Acciaiuoli Medici
Albizzi Ginori
Albizzi Guadagni
Albizzi Medici
Barbadori Castellani
Barbadori Medici
Bischeri Guadagni
Bischeri Peruzzi
Bischeri Strozzi
Castellani Peruzzi
Castellani Strozzi
Guadagni Lamberteschi
Guadagni Tornabuoni
Medici Ridolfi
Medici Salviati
Medici Tornabuoni
Pazzi Salviati
Peruzzi Strozzi
Ridolfi Strozzi
Ridolfi Tornabuoni
";

pub(super) const PATH: &str = "a b\nb c\nc d\n";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_edge_list(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

pub(super) fn undirected(path: PathBuf) -> GraphArgs {
    GraphArgs {
        path,
        undirected: true,
        name: None,
    }
}

pub(super) fn query(m: u32, k: u32) -> QueryArgs {
    QueryArgs {
        m,
        k,
        weighted: false,
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
