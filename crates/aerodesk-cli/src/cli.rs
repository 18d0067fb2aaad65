//! Command definitions and their handlers.

use aerodesk_client::routes::ROUTES;
use aerodesk_client::RestClient;
use aerodesk_common::models::FlightSearch;
use anyhow::Context;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

/// AeroDesk flight booking client
#[derive(Debug, Parser)]
#[command(name = "aerodesk", version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL, including the `/api` prefix. Overrides configuration.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and store the token
    Login { username: String, password: String },

    /// Forget the stored token
    Logout,

    /// Show the user the stored token belongs to
    Whoami,

    /// Show whether a usable token is stored
    Status,

    /// Flight queries
    #[command(subcommand)]
    Flights(FlightCommands),

    /// Orders of the signed-in user
    #[command(subcommand)]
    Orders(OrderCommands),

    /// Admin dashboard overview
    Dashboard,

    /// Print the application route table
    Routes,
}

#[derive(Debug, Subcommand)]
pub enum FlightCommands {
    /// List every flight
    List,

    /// Show one flight by id
    Get { id: i64 },

    /// Search by route and departure window (times as `2025-03-01T08:00:00`)
    Search {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        start: Option<NaiveDateTime>,
        #[arg(long)]
        end: Option<NaiveDateTime>,
    },

    /// Flights operated by one airline
    Airline { name: String },
}

#[derive(Debug, Subcommand)]
pub enum OrderCommands {
    /// Orders with flight details
    Mine,

    /// Cancel an order
    Cancel { id: i64 },
}

pub async fn execute_command(command: Commands, rest: &RestClient) -> anyhow::Result<()> {
    match command {
        Commands::Login { username, password } => {
            rest.login(&username, &password).await?;
            print_json(&rest.session().current_user())
        }
        Commands::Logout => {
            rest.logout()?;
            print_json(&json!({ "loggedIn": false }))
        }
        Commands::Whoami => {
            let user = rest.session().current_user().context("not logged in")?;
            print_json(&user)
        }
        Commands::Status => print_json(&json!({
            "baseUrl": rest.base_url(),
            "loggedIn": rest.session().is_logged_in(),
            "user": rest.session().current_user(),
        })),
        Commands::Flights(cmd) => match cmd {
            FlightCommands::List => print_json(&rest.list_flights().await?),
            FlightCommands::Get { id } => print_json(&rest.get_flight(id).await?),
            FlightCommands::Search { from, to, start, end } => {
                let search = FlightSearch {
                    departure_city: from,
                    arrival_city: to,
                    start_time: start,
                    end_time: end,
                };
                print_json(&rest.search_flights(&search).await?)
            }
            FlightCommands::Airline { name } => {
                print_json(&rest.list_flights_by_airline(&name).await?)
            }
        },
        Commands::Orders(cmd) => match cmd {
            OrderCommands::Mine => {
                let user = rest.session().current_user().context("not logged in")?;
                print_json(&rest.list_order_details(user.id).await?)
            }
            OrderCommands::Cancel { id } => {
                rest.cancel_order(id).await?;
                print_json(&json!({ "orderId": id, "cancelled": true }))
            }
        },
        Commands::Dashboard => print_json(&rest.dashboard_overview().await?),
        Commands::Routes => print_json(&ROUTES),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
