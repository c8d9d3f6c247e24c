use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "employee-pairs")]
#[command(about = "Find the pair of employees who worked together the longest", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the longest-working pair as JSON
    Analyze {
        /// Assignment file: EmpID, ProjectID, DateFrom, DateTo
        file: PathBuf,

        /// Print every overlapping pair, longest first
        #[arg(long)]
        all: bool,

        /// Date that open-ended tenures run until (YYYY-MM-DD); defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Check an assignment file and report how many records it holds
    Validate {
        file: PathBuf,
    },
}
