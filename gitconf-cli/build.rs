//! Build script for gitconf-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, ArgGroup, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

fn name_arg() -> Arg {
    Arg::new("name")
        .value_name("NAME")
        .required(true)
        .help("Name in section[.subsection].key form")
}

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("gitconf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read and edit git-style configuration files")
        .long_about(
            "Read configuration merged from the system, per-user and repository files, \
             and edit any one of them",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("system")
                .long("system")
                .help("Use the system-wide config file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("global")
                .long("global")
                .help("Use the per-user config file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("local")
                .long("local")
                .help("Use the repository config file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .value_name("PATH")
                .help("Use the given config file"),
        )
        .arg(
            Arg::new("include")
                .long("include")
                .help("Merge lower-precedence files into the selected one when reading")
                .action(ArgAction::SetTrue),
        )
        .group(ArgGroup::new("source").args(["system", "global", "local", "file"]))
        .subcommands(vec![
            Command::new("get")
                .about("Print the effective value of each name")
                .arg(name_arg().num_args(1..)),
            Command::new("get-all")
                .about("Print every value of each name")
                .arg(name_arg().num_args(1..)),
            Command::new("list")
                .about("List all values")
                .long_about("Print every key/value pair as text, JSON or YAML"),
            Command::new("add")
                .about("Append a value")
                .arg(name_arg())
                .arg(Arg::new("value").required(true)),
            Command::new("set")
                .about("Set a value, replacing the last one")
                .arg(name_arg())
                .arg(Arg::new("value").required(true)),
            Command::new("unset")
                .about("Remove the last value of a name")
                .arg(name_arg()),
            Command::new("unset-all")
                .about("Remove every value of a name")
                .arg(name_arg()),
            Command::new("show-path")
                .about("Print the repository metadata directory")
                .long_about("Display the metadata directory, or with --common the shared one"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("gitconf.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
