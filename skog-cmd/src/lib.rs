//! Command implementations for the skog CLI.
//!
//! Provides subcommands for valuing a stand selection, summing the
//! harvest-class filter and normalising a submitted price form.

use clap::Subcommand;
use skog_utils::number::DEFAULT_LOCALE;

pub mod filter;
pub mod loader;
pub mod prices;
pub mod value;

#[derive(Subcommand)]
pub enum Command {
    /// Value a selection of stands
    Value {
        /// Stand dataset (CSV or JSON export, optionally .gz)
        #[arg(short = 's', long)]
        stands: String,

        /// Price configuration JSON (all prices unset when omitted)
        #[arg(short = 'p', long)]
        prices: Option<String>,

        /// Stand ids, applied as map clicks in the given order
        #[arg(long = "select", required = true, num_args = 1..)]
        select: Vec<String>,

        /// Use multi-select mode (adds a total row)
        #[arg(long)]
        multi: bool,

        /// Locale used for number formatting
        #[arg(long, default_value = DEFAULT_LOCALE)]
        locale: String,

        /// Print the raw summary as JSON instead of formatted rows
        #[arg(long)]
        json: bool,
    },

    /// Sum volume and value for harvest classes 4 and/or 5
    Filter {
        /// Stand dataset (CSV or JSON export, optionally .gz)
        #[arg(short = 's', long)]
        stands: String,

        /// Price configuration JSON (all prices unset when omitted)
        #[arg(short = 'p', long)]
        prices: Option<String>,

        /// Include harvest class 4
        #[arg(long)]
        hk4: bool,

        /// Include harvest class 5
        #[arg(long)]
        hk5: bool,

        /// Locale used for number formatting
        #[arg(long, default_value = DEFAULT_LOCALE)]
        locale: String,
    },

    /// Store every unset price as 0, as the price form does on submit
    Prices {
        /// Price configuration JSON to normalise
        #[arg(short = 'i', long)]
        input: String,

        /// Output path (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Value {
            stands,
            prices,
            select,
            multi,
            locale,
            json,
        } => value::run_value(&stands, prices.as_deref(), &select, multi, &locale, json),
        Command::Filter {
            stands,
            prices,
            hk4,
            hk5,
            locale,
        } => filter::run_filter(&stands, prices.as_deref(), hk4, hk5, &locale),
        Command::Prices { input, output } => prices::run_prices(&input, output.as_deref()),
    }
}
