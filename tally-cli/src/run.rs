use clap::{Args, Subcommand};
use log::debug;
use std::{
    fmt,
    hash::Hash,
    io::{self, Write},
    num::ParseIntError,
};
use tally_multiset::{DisplayMode, Multiset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    String,
    Int,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct Operands {
    /// Comma-separated elements of the left multiset.
    #[arg(long, value_delimiter = ',')]
    pub left: Vec<String>,

    /// Comma-separated elements of the right multiset.
    #[arg(long, value_delimiter = ',')]
    pub right: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Render a multiset built from the given elements.
    Show {
        items: Vec<String>,

        /// Also print the multiplicity of every distinct element.
        #[arg(long)]
        counts: bool,
    },
    /// Render the union (pointwise maximum) of two multisets.
    Union(Operands),
    /// Render the intersection (pointwise minimum) of two multisets.
    Intersect(Operands),
    /// Print whether the left multiset is contained in the right one.
    Subset(Operands),
    /// Print whether two multisets hold the same elements with the same multiplicities.
    Equals(Operands),
}

pub struct Config {
    pub mode: DisplayMode,
    pub elements: ElementKind,
    pub command: Command,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{value:?} is not an integer: {source}")]
    InvalidInt {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn parse_string(value: &str) -> Result<String, CliError> {
    Ok(value.to_string())
}

fn parse_int(value: &str) -> Result<i64, CliError> {
    value
        .trim()
        .parse()
        .map_err(|source| CliError::InvalidInt {
            value: value.to_string(),
            source,
        })
}

fn collect<A: Eq + Hash>(
    items: &[String],
    parse: impl Fn(&str) -> Result<A, CliError>,
) -> Result<Multiset<A>, CliError> {
    items.iter().map(|item| parse(item.as_str())).collect()
}

fn execute<A, P>(
    command: &Command,
    mode: DisplayMode,
    out: &mut dyn Write,
    parse: P,
) -> Result<(), CliError>
where
    A: Eq + Hash + Ord + Clone + fmt::Display + fmt::Debug,
    P: Fn(&str) -> Result<A, CliError>,
{
    let operands = |operands: &Operands| -> Result<(Multiset<A>, Multiset<A>), CliError> {
        Ok((
            collect(&operands.left, &parse)?,
            collect(&operands.right, &parse)?,
        ))
    };

    match command {
        Command::Show { items, counts } => {
            let multiset = collect(items, &parse)?;
            writeln!(out, "{}", multiset.show(mode))?;
            if *counts {
                let mut entries: Vec<(&A, usize)> = multiset.iter().collect();
                entries.sort();
                for (item, count) in entries {
                    writeln!(out, "{}: {}", item, count)?;
                }
            }
        }
        Command::Union(pair) => {
            let (left, right) = operands(pair)?;
            writeln!(out, "{}", left.union(&right).show(mode))?;
        }
        Command::Intersect(pair) => {
            let (left, right) = operands(pair)?;
            writeln!(out, "{}", left.intersection(&right).show(mode))?;
        }
        Command::Subset(pair) => {
            let (left, right) = operands(pair)?;
            writeln!(out, "{}", left.is_subset(&right))?;
        }
        Command::Equals(pair) => {
            let (left, right) = operands(pair)?;
            writeln!(out, "{}", left == right)?;
        }
    }
    Ok(())
}

pub fn run(config: Config, out: &mut dyn Write) -> Result<(), CliError> {
    debug!(
        "running {:?} over {:?} elements in {} mode",
        config.command, config.elements, config.mode
    );
    match config.elements {
        ElementKind::String => execute(&config.command, config.mode, out, parse_string),
        ElementKind::Int => execute(&config.command, config.mode, out, parse_int),
    }
}
