use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use adt_generator::DeclarationKind;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Kind {
    AlgebraicType,
    ValueObject,
}

impl From<Kind> for DeclarationKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::AlgebraicType => DeclarationKind::AlgebraicType,
            Kind::ValueObject => DeclarationKind::ValueObject,
        }
    }
}

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[arg(value_parser, help = "The declaration file")]
    pub input: PathBuf,

    #[arg(
        long,
        value_enum,
        help = "The declaration dialect; `.value` files default to value-object, anything else to algebraic-type"
    )]
    pub kind: Option<Kind>,

    #[arg(long = "include", value_name = "TAG", help = "Enable a plugin tag for this run")]
    pub includes: Vec<String>,

    #[arg(long = "exclude", value_name = "TAG", help = "Disable a plugin tag for this run")]
    pub excludes: Vec<String>,

    #[arg(long, help = "Pretty-print the generated JSON")]
    pub pretty: bool,

    #[arg(short, long, action = ArgAction::Count, help = "Log more; repeat for even more")]
    pub verbose: u8,
}

impl Cli {
    pub fn kind(&self) -> DeclarationKind {
        self.kind
            .map(DeclarationKind::from)
            .unwrap_or_else(|| DeclarationKind::from_path(&self.input))
    }
}
