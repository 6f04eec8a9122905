//! ALICE-BIND CLI
//!
//! Command-line front end over the module table: list exports, call them by
//! name, read attributes and exercise the person record.
//!
//! Author: ALICE-BIND contributors

#![allow(clippy::needless_pass_by_value)]

#[cfg(feature = "cli")]
use alice_bind::prelude::*;
#[cfg(feature = "cli")]
use std::collections::BTreeMap;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "alice-bind")]
#[command(version = alice_bind::VERSION)]
#[command(about = "ALICE-BIND: binding pattern catalogue", long_about = None)]
struct Cli {
    /// Log filter (overrides ALICE_BIND_LOG)
    #[arg(long, global = true)]
    log: Option<String>,

    /// Shorthand for --log alice_bind=debug
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// List every export of the module table
    List,

    /// Call an export by name (`key=value` passes a keyword argument)
    Call {
        /// Function, class or `Class.static_method`
        name: String,
        /// Arguments: ints, floats, true/false, None, JSON lists, or text
        args: Vec<String>,
    },

    /// Read a module attribute or enum member (`Color.WHITE`)
    Attr {
        /// Attribute name
        name: String,
    },

    /// Build a person through the table and optionally assign its age
    Person {
        /// Initial age (stored as given)
        #[arg(short, long)]
        age: i64,
        /// Name
        #[arg(short, long)]
        name: String,
        /// New age to apply through the validating setter
        #[arg(long)]
        set_age: Option<i64>,
    },

    /// Print a greeting (generic when no name is given)
    Greet {
        /// Name to greet
        name: Option<String>,
    },

    /// List Color members
    Colors,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let mut config = LogConfig::from_env();
    if cli.verbose {
        config = config.with_filter("alice_bind=debug");
    }
    if let Some(filter) = cli.log {
        config = config.with_filter(filter);
    }
    init_logging(&config);

    let module = build_module();
    let result = match cli.command {
        Commands::List => {
            cmd_list(&module);
            Ok(())
        }
        Commands::Call { name, args } => cmd_call(&module, &name, args),
        Commands::Attr { name } => cmd_attr(&module, &name),
        Commands::Person { age, name, set_age } => cmd_person(&module, age, name, set_age),
        Commands::Greet { name } => {
            AdultPerson::greet(name.as_deref());
            Ok(())
        }
        Commands::Colors => {
            for color in Color::ALL {
                println!("{} = {}", color, color.value());
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI not enabled. Build with --features cli");
    std::process::exit(1);
}

#[cfg(feature = "cli")]
fn cmd_list(module: &Module) {
    println!("{}", module.doc());
    println!();
    for (name, export) in module.exports() {
        println!("{:<10} {:<16} {}", export.kind(), name, export.summary());
    }
}

#[cfg(feature = "cli")]
fn cmd_call(module: &Module, name: &str, raw_args: Vec<String>) -> Result<()> {
    let mut args = Vec::new();
    let mut kwargs = BTreeMap::new();
    for raw in raw_args {
        match split_keyword(&raw) {
            Some((key, value)) => {
                kwargs.insert(key.to_string(), Value::parse_literal(value));
            }
            None => args.push(Value::parse_literal(&raw)),
        }
    }

    let result = module.call_with(name, args, kwargs)?;
    if !result.is_none() {
        print_json(&result);
    }
    Ok(())
}

/// `name=value` where `name` is an identifier
#[cfg(feature = "cli")]
fn split_keyword(raw: &str) -> Option<(&str, &str)> {
    let (key, value) = raw.split_once('=')?;
    let is_ident = !key.is_empty()
        && !key.starts_with(|c: char| c.is_ascii_digit())
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    is_ident.then_some((key, value))
}

#[cfg(feature = "cli")]
fn cmd_attr(module: &Module, name: &str) -> Result<()> {
    let value = module.attribute(name)?;
    print_json(&value);
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_person(module: &Module, age: i64, name: String, set_age: Option<i64>) -> Result<()> {
    let person = module.call("AdultPerson", vec![Value::Int(age), Value::from(name)])?;
    println!("{}", module.call_method(&person, "__repr__", vec![])?);
    if age < MIN_AGE as i64 {
        println!("warning: constructed below the minimum age of {}", MIN_AGE);
    }

    if let Some(new_age) = set_age {
        module.set_attr(&person, "age", Value::Int(new_age))?;
        println!("{}", module.call_method(&person, "__repr__", vec![])?);
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn print_json(value: &Value) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{}", json),
        Err(_) => println!("{}", value.repr()),
    }
}
