mod commands;
mod forecast_service;
mod render;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use commands::{CityRef, Command};
use hourcast_core::Config;
use hourcast_weather::{
    CityList, CoordinateResolver, Endpoints, ForecastBoard, ForecastReply, ForecastWindower,
    WeatherProvider,
};

#[tokio::main]
async fn main() -> Result<()> {
    hourcast_core::init()?;

    let (config, _warnings) = Config::load_validated()
        .map_err(|e| {
            eprintln!("{}", e.user_message());
            e
        })
        .context("Failed to load configuration")?;

    let mut board = build_board(&config)?;
    tracing::info!("hourcast started");

    println!("hourcast - hourly temperatures for your cities (type 'help')");
    print!("{}", render::cities(board.cities()));

    let (tx, mut rx) = mpsc::unbounded_channel::<ForecastReply>();

    let initial = board.initial_city().to_string();
    if let Ok(pending) = board.prepare_city(&initial).await {
        forecast_service::request_forecast(&tx, board.windower().clone(), pending);
    } else {
        print!("{}", render::board(&board));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                if !handle_command(&mut board, &tx, Command::parse(&line)).await {
                    break;
                }
            }
            Some(reply) = rx.recv() => {
                match board.complete(reply) {
                    Ok(false) => {}
                    _ => print!("{}", render::board(&board)),
                }
            }
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}

fn build_board(config: &Config) -> Result<ForecastBoard> {
    let endpoints = Endpoints {
        geocoding_url: config.weather.geocoding_url.clone(),
        forecast_url: config.weather.forecast_url.clone(),
    };
    let provider = WeatherProvider::new(endpoints, config.weather.request_timeout())
        .context("Failed to create weather client")?;

    let windower = ForecastWindower::new(provider.clone(), config.weather.reference_offset_hours);
    Ok(ForecastBoard::new(
        CoordinateResolver::new(provider),
        windower,
        CityList::new(&config.cities.seed),
        config.cities.initial.clone(),
    ))
}

/// Run one command. Returns false when the session should end.
async fn handle_command(
    board: &mut ForecastBoard,
    tx: &mpsc::UnboundedSender<ForecastReply>,
    command: Command,
) -> bool {
    let prepared = match command {
        Command::Quit => return false,
        Command::Empty => return true,
        Command::Help => {
            println!("{}", commands::HELP);
            return true;
        }
        Command::List => {
            print!("{}", render::cities(board.cities()));
            return true;
        }
        Command::Unknown(text) => {
            println!("Unknown command: {} (type 'help')", text);
            return true;
        }
        Command::Show(city) => {
            let name = match city {
                CityRef::Name(name) => name,
                CityRef::Index(index) => match index.checked_sub(1).and_then(|i| board.cities().get(i)) {
                    Some(name) => name.to_string(),
                    None => {
                        println!("No city #{} (type 'list')", index);
                        return true;
                    }
                },
            };
            board.prepare_city(&name).await
        }
        Command::Add(name) => {
            let prepared = board.prepare_add(&name).await;
            if prepared.is_ok() {
                print!("{}", render::cities(board.cities()));
            }
            prepared
        }
    };

    match prepared {
        Ok(pending) => {
            println!("Fetching forecast for {}...", pending.city);
            forecast_service::request_forecast(tx, board.windower().clone(), pending);
        }
        Err(_) => print!("{}", render::board(board)),
    }
    true
}
