//! Man page generator for fscc
//!
//! Writes `fscc.1` plus one `fscc-<command>.1` page per subcommand.
//!
//! Usage: cargo run --bin gen-manpage -- [output-dir]

use clap::{Command, CommandFactory};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[path = "../cli.rs"]
mod cli;

/// File name of the page for `sub`, or of the top-level page when `None`
fn page_name(root: &str, sub: Option<&str>) -> String {
    match sub {
        Some(sub) => format!("{}-{}.1", root, sub),
        None => format!("{}.1", root),
    }
}

fn render(man: clap_mangen::Man, path: &Path) -> io::Result<()> {
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(path, buffer)?;
    println!("  {}", path.display());
    Ok(())
}

/// Render the top-level page and one page per visible subcommand
fn generate(cmd: &Command, output_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let root = cmd.get_name().to_string();
    let mut written = Vec::new();

    let path = output_dir.join(page_name(&root, None));
    render(clap_mangen::Man::new(cmd.clone()), &path)?;
    written.push(path);

    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        let path = output_dir.join(page_name(&root, Some(sub.get_name())));
        let title = format!("{}-{}", root, sub.get_name()).to_uppercase();
        render(clap_mangen::Man::new(sub.clone()).title(title), &path)?;
        written.push(path);
    }

    Ok(written)
}

fn main() -> io::Result<()> {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("man"));

    fs::create_dir_all(&output_dir)?;

    println!("Man pages generated:");
    let written = generate(&cli::Cli::command(), &output_dir)?;

    println!("\nTo view:");
    println!("  man -l {}", written[0].display());
    println!("\nTo install system-wide (requires sudo):");
    println!(
        "  sudo cp {}/*.1 /usr/local/share/man/man1/",
        output_dir.display()
    );
    println!("  sudo mandb");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_name() {
        assert_eq!(page_name("fscc", None), "fscc.1");
        assert_eq!(page_name("fscc", Some("append-status")), "fscc-append-status.1");
    }

    #[test]
    fn test_generate_one_page_per_subcommand() {
        let dir = std::env::temp_dir().join(format!("fscc-man-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let cmd = cli::Cli::command();
        let written = generate(&cmd, &dir).unwrap();

        assert_eq!(written.len(), 1 + cmd.get_subcommands().count());
        assert_eq!(written[0], dir.join("fscc.1"));
        for name in ["fscc-get.1", "fscc-set.1", "fscc-dump.1", "fscc-list-ports.1"] {
            let page = fs::read_to_string(dir.join(name)).unwrap();
            assert!(page.contains(".TH"), "{} has no title header", name);
        }

        fs::remove_dir_all(&dir).unwrap();
    }
}
