//! Line-oriented shell over the [`Service`].

use std::io::{self, BufRead, Write};

use clap::{error::ErrorKind, Parser, Subcommand};
use common::{datetime::Year, Clock, Money};
use itertools::Itertools as _;
use service::{
    command,
    domain::{scooter, Ride, Scooter},
    query::{self, report, scooter::ById},
    read::ride::Active,
    Command as _, Query as _,
};
use tracing as log;

use crate::{AsError, Error, Service};

/// Single line of the shell input.
#[derive(Debug, Parser)]
#[command(name = "scooter-rental", no_binary_name = true)]
pub struct Line {
    /// [`Instruction`] to be executed.
    #[command(subcommand)]
    pub instruction: Instruction,
}

impl Line {
    /// Parses the provided `input` line.
    ///
    /// # Errors
    ///
    /// Errors if the `input` is not a valid [`Instruction`].
    pub fn parse(input: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(input.split_whitespace())
    }
}

/// Instruction of the shell.
#[derive(Clone, Debug, Eq, PartialEq, Subcommand)]
pub enum Instruction {
    /// Adds a new scooter to the inventory.
    Add {
        /// ID of the new scooter.
        id: scooter::Id,

        /// Price of renting the new scooter for a single minute.
        #[arg(allow_negative_numbers = true)]
        price_per_minute: Money,
    },

    /// Removes a scooter from the inventory.
    Remove {
        /// ID of the scooter to remove.
        id: scooter::Id,
    },

    /// Lists all the scooters.
    List,

    /// Shows a single scooter.
    Get {
        /// ID of the scooter to show.
        id: scooter::Id,
    },

    /// Starts renting a scooter.
    Start {
        /// ID of the scooter to rent.
        id: scooter::Id,
    },

    /// Ends renting a scooter and shows the price of the ride.
    End {
        /// ID of the rented scooter.
        id: scooter::Id,
    },

    /// Lists completed rides.
    History {
        /// Year the rides ended in.
        year: Option<Year>,
    },

    /// Shows the income of the rental company.
    Income {
        /// Year the rides ended in.
        year: Option<Year>,

        /// Count the rides in progress as if they ended now.
        #[arg(long)]
        active: bool,
    },

    /// Leaves the shell.
    Quit,
}

/// Outcome of an [`Instruction`] execution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Text to be shown.
    Reply(String),

    /// Shell should be left.
    Quit,
}

/// Executes the provided [`Instruction`] on the [`Service`].
///
/// # Errors
///
/// If the [`Service`] fails to execute the [`Instruction`].
pub fn execute<Clk: Clock>(
    service: &Service<Clk>,
    instruction: Instruction,
) -> Result<Outcome, Error> {
    let reply = match instruction {
        Instruction::Add {
            id,
            price_per_minute,
        } => {
            let scooter = service
                .execute(command::AddScooter {
                    id,
                    price_per_minute,
                })
                .map_err(AsError::into_error)?;
            format!(
                "`Scooter(id: {})` added at {} per minute",
                scooter.id, scooter.price_per_minute,
            )
        }
        Instruction::Remove { id } => {
            let scooter = service
                .execute(command::RemoveScooter { id })
                .map_err(AsError::into_error)?;
            format!("`Scooter(id: {})` removed", scooter.id)
        }
        Instruction::List => {
            let scooters = service
                .execute(query::scooters::All::by(()))
                .map_err(AsError::into_error)?;
            if scooters.is_empty() {
                "No scooters".to_owned()
            } else {
                scooters.iter().map(scooter_row).join("\n")
            }
        }
        Instruction::Get { id } => {
            let scooter =
                service.execute(ById(id)).map_err(AsError::into_error)?;
            scooter_row(&scooter)
        }
        Instruction::Start { id } => {
            let Active(ride) = service
                .execute(command::StartRent { scooter_id: id })
                .map_err(AsError::into_error)?;
            format!(
                "`Scooter(id: {})` rented at {}",
                ride.scooter_id,
                ride.started_at.to_rfc3339(),
            )
        }
        Instruction::End { id } => {
            let price = service
                .execute(command::EndRent {
                    scooter_id: id.clone(),
                })
                .map_err(AsError::into_error)?;
            format!("`Scooter(id: {id})` returned, price: {price}")
        }
        Instruction::History { year } => {
            let rides = service
                .execute(query::rides::History::by(year))
                .map_err(AsError::into_error)?;
            if rides.is_empty() {
                "No rides".to_owned()
            } else {
                rides.iter().map(ride_row).join("\n")
            }
        }
        Instruction::Income { year, active } => {
            let income = service
                .execute(report::Income {
                    year,
                    include_active: active,
                })
                .map_err(AsError::into_error)?;
            format!("Income: {income}")
        }
        Instruction::Quit => return Ok(Outcome::Quit),
    };
    Ok(Outcome::Reply(reply))
}

/// Runs the shell reading [`Instruction`]s from the `input` line by line,
/// until it ends or [`Instruction::Quit`] is read.
///
/// # Errors
///
/// If reading the `input` or writing the `output` fails.
pub fn run<Clk: Clock>(
    service: &Service<Clk>,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    writeln!(output, "Welcome to {}!", service.name())?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let instruction = match Line::parse(&line) {
            Ok(Line { instruction }) => instruction,
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion,
                ) =>
            {
                write!(output, "{}", e.render())?;
                continue;
            }
            Err(e) => {
                writeln!(output, "{}", e.into_error().brief())?;
                continue;
            }
        };

        match execute(service, instruction) {
            Ok(Outcome::Reply(reply)) => writeln!(output, "{reply}")?,
            Ok(Outcome::Quit) => break,
            Err(e) => {
                log::debug!("`{line}` failed: {e}");
                writeln!(output, "{}", e.brief())?;
            }
        }
    }

    Ok(())
}

/// Formats the provided [`Scooter`] as a table row.
fn scooter_row(scooter: &Scooter) -> String {
    format!(
        "{}\t{}\t{}",
        scooter.id,
        scooter.price_per_minute,
        if scooter.is_rented { "rented" } else { "available" },
    )
}

/// Formats the provided [`Ride`] as a table row.
fn ride_row(ride: &Ride) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        ride.scooter_id,
        ride.started_at.to_rfc3339(),
        ride.ended_at.map(|at| at.to_rfc3339()).unwrap_or_default(),
        ride.price.map(|p| p.to_string()).unwrap_or_default(),
    )
}
