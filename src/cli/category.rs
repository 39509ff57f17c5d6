//! Category CLI commands

use clap::{Subcommand, ValueEnum};

use super::CommandContext;
use crate::display::format_category_table;
use crate::error::PfResult;
use crate::models::CategoryKind;
use crate::services::CategoryService;

/// Income or expense, as typed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for CategoryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => CategoryKind::Income,
            KindArg::Expense => CategoryKind::Expense,
        }
    }
}

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List {
        /// Only income or only expense categories
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Income or expense
        #[arg(short, long, value_enum)]
        kind: KindArg,
        /// Icon shown next to the name
        #[arg(short, long)]
        icon: Option<String>,
    },
}

/// Handle a category command
pub fn handle_category_command(ctx: &CommandContext, cmd: CategoryCommands) -> PfResult<()> {
    match cmd {
        CategoryCommands::List { kind } => {
            let categories = ctx.read(|api, rc| {
                CategoryService::new(api, rc).list(kind.map(CategoryKind::from))
            })?;
            print!("{}", format_category_table(&categories));
        }

        CategoryCommands::Add { name, kind, icon } => {
            let category = ctx.write(|api, rc| {
                CategoryService::new(api, rc).create(&name, kind.into(), icon.clone())
            })?;
            println!("Created category: {}", category);
            println!("  Type: {}", kind_label(category.kind));
            println!("  ID: {}", category.id);
        }
    }

    Ok(())
}

fn kind_label(kind: Option<CategoryKind>) -> String {
    kind.map(|k| k.to_string())
        .unwrap_or_else(|| "-".to_string())
}
