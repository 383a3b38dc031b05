use clap::{Args, Parser, Subcommand};

use crate::db::ClientFilter;
use crate::models::ClientUpdate;

/// Manage clients and their phone numbers in Postgres
#[derive(Debug, Parser)]
#[command(name = "client_manager", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a client, optionally with phone numbers
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        /// May be repeated
        #[arg(long = "phone", value_name = "PHONE")]
        phones: Vec<String>,
    },
    /// Attach a phone number to an existing client
    AddPhone { client_id: i32, phone: String },
    /// Change a client's fields; only the given ones are touched
    Update {
        client_id: i32,
        #[command(flatten)]
        changes: UpdateArgs,
    },
    /// Remove one phone number from a client
    DeletePhone { client_id: i32, phone: String },
    /// Remove a client and all of its phone numbers
    Delete { client_id: i32 },
    /// Search clients; without filters every client is listed
    Find {
        #[command(flatten)]
        filter: FilterArgs,
        /// Print results as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Browse matching clients interactively
    Browse {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Run a short sample session against the store
    Demo,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Replaces all current phone numbers; may be repeated
    #[arg(long = "phone", value_name = "PHONE", conflicts_with = "clear_phones")]
    pub phones: Vec<String>,
    /// Remove all phone numbers
    #[arg(long)]
    pub clear_phones: bool,
}

impl From<UpdateArgs> for ClientUpdate {
    fn from(args: UpdateArgs) -> Self {
        let phones = if args.clear_phones {
            Some(Vec::new())
        } else if args.phones.is_empty() {
            None
        } else {
            Some(args.phones)
        };

        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phones,
        }
    }
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

impl From<FilterArgs> for ClientFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
        }
    }
}
