//! # Command Line
//!
//! `shopsmart` drives the cart from a terminal. Each invocation hydrates the
//! saved cart, applies one command, persists, and prints the result as JSON.
//!
//! ```text
//! shopsmart add --id tent-2p --name "Trail Tent" --price-cents 18999
//! shopsmart set tent-2p 3
//! shopsmart remove tent-2p
//! shopsmart show
//! shopsmart clear
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use shopsmart_core::{Money, Product};

/// ShopSmart cart from the command line.
#[derive(Debug, Parser)]
#[command(name = "shopsmart", version, about)]
pub struct Cli {
    /// SQLite file the cart is saved in
    #[arg(long, global = true, env = "SHOPSMART_STORE_PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Print the cart and its totals
    Show,

    /// Add a product, merging with an existing line
    Add(AddArgs),

    /// Remove a product's line
    Remove {
        /// Product id
        id: String,
    },

    /// Replace a line's quantity
    #[command(allow_negative_numbers = true)]
    Set {
        /// Product id
        id: String,

        /// New quantity, at least 1
        quantity: i64,
    },

    /// Remove every line
    Clear,
}

#[derive(Debug, clap::Args)]
pub struct AddArgs {
    /// Product id
    #[arg(long)]
    pub id: String,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// Unit price in cents
    #[arg(long)]
    pub price_cents: i64,

    /// Catalog category
    #[arg(long, default_value = "")]
    pub category: String,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Quantity to add
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub quantity: i64,
}

impl AddArgs {
    /// The product this invocation describes.
    pub fn product(&self) -> Product {
        let product = Product::new(
            self.id.clone(),
            self.name.clone(),
            Money::from_cents(self.price_cents),
        )
        .with_category(self.category.clone());

        match &self.image {
            Some(image) => product.with_image(image.clone()),
            None => product,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "shopsmart",
            "add",
            "--id",
            "tent-2p",
            "--name",
            "Trail Tent",
            "--price-cents",
            "18999",
            "--quantity",
            "2",
        ])
        .unwrap();

        let CartCommand::Add(args) = cli.command else {
            panic!("expected add");
        };
        let product = args.product();
        assert_eq!(product.id, "tent-2p");
        assert_eq!(product.price(), Money::from_cents(18999));
        assert_eq!(args.quantity, 2);
    }

    #[test]
    fn test_parse_set_with_store() {
        let cli = Cli::try_parse_from(["shopsmart", "--store", "/tmp/c.db", "set", "a", "-1"])
            .unwrap();

        assert_eq!(cli.store, Some(PathBuf::from("/tmp/c.db")));
        assert!(matches!(
            cli.command,
            CartCommand::Set { ref id, quantity: -1 } if id == "a"
        ));
    }

    #[test]
    fn test_missing_subcommand_fails() {
        assert!(Cli::try_parse_from(["shopsmart"]).is_err());
    }
}
