//! # Terminal Shell
//!
//! Line-oriented front end: parses one command per line, calls into
//! [`commands`](crate::commands), renders the result as text.
//!
//! ## Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  read line ──► ShellCommand::parse ──► Shell::execute ──► render        │
//! │      ▲               │                      │                 │         │
//! │      │          ShellError             ApiError               │         │
//! │      │               └──────► print ◄───────┘                 │         │
//! │      └───────────────────────────────────────────────────────┘         │
//! │                                                                         │
//! │  `quit` or end of input leaves the loop.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Output goes to the writer handed in (stdout in production); logs go to
//! stderr, so the two never interleave on one stream.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;
use widget_core::CatalogItem;

use crate::commands::{self, CartResponse};
use crate::error::ApiError;
use crate::state::{CartSession, CatalogState, ConfigState, OrderConfirmation};

const HELP: &str = "\
Commands:
  products              list the catalog
  show <sku>            show one product
  cart                  show the cart
  add <sku>             add one unit of a product
  qty <sku> <n>         set the quantity of a cart line
  remove <sku>          remove a cart line
  order                 place the order
  dispatch <json>       apply a raw transition request
  reload                re-read the catalog
  help                  show this text
  quit                  exit";

// =============================================================================
// Parsing
// =============================================================================

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Products,
    Show(String),
    Cart,
    Add(String),
    Quantity(String, i64),
    Remove(String),
    Order,
    Dispatch(String),
    Reload,
    Help,
    Quit,
}

/// Why an input line could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{0}' is not a whole number")]
    InvalidNumber(String),
}

impl ShellCommand {
    /// Parses a line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ShellError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let mut args = rest.split_whitespace();

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "products" | "ls" => ShellCommand::Products,
            "show" => ShellCommand::Show(required(args.next(), "show", "a SKU")?),
            "cart" => ShellCommand::Cart,
            "add" => ShellCommand::Add(required(args.next(), "add", "a SKU")?),
            "qty" => {
                let sku = required(args.next(), "qty", "a SKU and a quantity")?;
                let raw = required(args.next(), "qty", "a quantity")?;
                let qty = raw
                    .parse::<i64>()
                    .map_err(|_| ShellError::InvalidNumber(raw.clone()))?;
                ShellCommand::Quantity(sku, qty)
            }
            "remove" | "rm" => ShellCommand::Remove(required(args.next(), "remove", "a SKU")?),
            "order" => ShellCommand::Order,
            "dispatch" => {
                if rest.is_empty() {
                    return Err(ShellError::MissingArgument {
                        command: "dispatch",
                        argument: "a JSON transition request",
                    });
                }
                ShellCommand::Dispatch(rest.to_string())
            }
            "reload" => ShellCommand::Reload,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn required(
    arg: Option<&str>,
    command: &'static str,
    argument: &'static str,
) -> Result<String, ShellError> {
    arg.map(str::to_string)
        .ok_or(ShellError::MissingArgument { command, argument })
}

// =============================================================================
// Execution
// =============================================================================

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The shell and the state it drives.
#[derive(Debug)]
pub struct Shell {
    config: ConfigState,
    catalog: CatalogState,
    cart: CartSession,
}

impl Shell {
    pub fn new(config: ConfigState, catalog: CatalogState) -> Self {
        Shell {
            config,
            catalog,
            cart: CartSession::new(),
        }
    }

    pub fn cart(&self) -> &CartSession {
        &self.cart
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Welcome to {}. Type 'help' for commands.",
            self.config.store_name
        )?;

        for line in input.lines() {
            let line = line?;
            match ShellCommand::parse(&line) {
                Ok(Some(command)) => {
                    if self.execute(command, out)? == Flow::Quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(error) => writeln!(out, "error: {}", error)?,
            }
            out.flush()?;
        }

        Ok(())
    }

    /// Runs one command and writes its output.
    pub fn execute<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> io::Result<Flow> {
        debug!(?command, "shell command");

        match command {
            ShellCommand::Products => self.render_products(out)?,
            ShellCommand::Show(sku) => match commands::get_product_by_sku(&self.catalog, &sku) {
                Ok(item) => self.render_product(&item, out)?,
                Err(error) => render_error(&error, out)?,
            },
            ShellCommand::Cart => {
                let response = commands::get_cart(&self.cart, &self.config);
                self.render_cart(&response, out)?;
            }
            ShellCommand::Add(sku) => {
                let result = commands::add_to_cart(&self.catalog, &mut self.cart, &self.config, &sku);
                self.render_result(result, out)?;
            }
            ShellCommand::Quantity(sku, qty) => {
                let result = commands::update_cart_item(&mut self.cart, &self.config, &sku, qty);
                self.render_result(result, out)?;
            }
            ShellCommand::Remove(sku) => {
                let result = commands::remove_from_cart(&mut self.cart, &self.config, &sku);
                self.render_result(result, out)?;
            }
            ShellCommand::Dispatch(raw) => {
                let result = commands::dispatch_transition(&mut self.cart, &self.config, &raw);
                self.render_result(result, out)?;
            }
            ShellCommand::Order => match commands::place_order(&mut self.cart) {
                Ok(confirmation) => self.render_confirmation(&confirmation, out)?,
                Err(error) => render_error(&error, out)?,
            },
            ShellCommand::Reload => {
                let count = commands::reload_catalog(&mut self.catalog);
                writeln!(out, "Catalog reloaded: {} product(s).", count)?;
            }
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render_products<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let entries = commands::list_products(&self.catalog, &self.cart);
        if entries.is_empty() {
            return writeln!(out, "No products available.");
        }

        writeln!(out, "Products")?;
        for entry in entries {
            let marker = if entry.in_cart { "  [Item in Cart]" } else { "" };
            writeln!(
                out,
                "  {:<12} {:<24} {:>10}{}",
                entry.item.sku.as_str(),
                entry.item.name,
                self.config.format_currency(entry.item.price),
                marker
            )?;
        }
        Ok(())
    }

    fn render_product<W: Write>(&self, item: &CatalogItem, out: &mut W) -> io::Result<()> {
        writeln!(out, "{} ({})", item.name, item.sku)?;
        writeln!(out, "  Price: {}", self.config.format_currency(item.price))?;
        match self.cart.store().state().get(item.sku.as_str()) {
            Some(line) => writeln!(out, "  In cart: {}", line.qty),
            None => writeln!(out, "  Not in cart"),
        }
    }

    fn render_cart<W: Write>(&self, response: &CartResponse, out: &mut W) -> io::Result<()> {
        if response.lines.is_empty() {
            return match self.cart.last_order() {
                Some(_) => writeln!(out, "Thank you for your order."),
                None => writeln!(out, "Your cart is empty."),
            };
        }

        writeln!(out, "Cart")?;
        for entry in &response.lines {
            writeln!(
                out,
                "  {:<12} {:<24} {:>4} x {:>10} = {:>10}  (qty 1-{})",
                entry.line.sku.as_str(),
                entry.line.name,
                entry.line.qty,
                self.config.format_currency(entry.line.price),
                self.config.format_currency(entry.line_total),
                entry.max_quantity
            )?;
        }
        writeln!(out, "Total Items: {}", response.total_items)?;
        writeln!(
            out,
            "Total Price: {}",
            self.config.format_currency(response.total_price)
        )
    }

    fn render_confirmation<W: Write>(
        &self,
        confirmation: &OrderConfirmation,
        out: &mut W,
    ) -> io::Result<()> {
        writeln!(out, "Thank you for your order.")?;
        writeln!(
            out,
            "Order {} placed at {}: {} item(s), {}",
            confirmation.order_id,
            confirmation.placed_at.format("%Y-%m-%d %H:%M:%S UTC"),
            confirmation.total_items,
            self.config.format_currency(confirmation.total_price)
        )
    }

    fn render_result<W: Write>(
        &self,
        result: Result<CartResponse, ApiError>,
        out: &mut W,
    ) -> io::Result<()> {
        match result {
            Ok(response) => self.render_cart(&response, out),
            Err(error) => render_error(&error, out),
        }
    }
}

fn render_error<W: Write>(error: &ApiError, out: &mut W) -> io::Result<()> {
    writeln!(out, "error {}", error)
}

// =============================================================================
// Unit Tests
// =============================================================================
