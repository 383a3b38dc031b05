use anyhow::Result;
use clap::Parser;
use tracing::info;

use client_manager::cli::{Cli, Command};
use client_manager::config::Config;
use client_manager::db::{self, ClientFilter, Database};
use client_manager::models::{ClientUpdate, ClientWithPhones, NewClient};
use client_manager::{logging, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?;
    logging::init(&config.log_level);

    // Connect and make sure both tables exist
    let db = db::init(&config).await?;

    let result = run(&db, cli.command).await;

    db.close().await;

    result
}

async fn run(db: &Database, command: Command) -> Result<()> {
    match command {
        Command::Add {
            first_name,
            last_name,
            email,
            phones,
        } => {
            let client = NewClient {
                first_name,
                last_name,
                email,
                phones,
            };
            let id = db.add_client(&client).await?;
            println!("{id}");
        }
        Command::AddPhone { client_id, phone } => {
            db.add_phone(client_id, &phone).await?;
        }
        Command::Update { client_id, changes } => {
            db.update_client(client_id, &ClientUpdate::from(changes)).await?;
        }
        Command::DeletePhone { client_id, phone } => {
            db.delete_phone(client_id, &phone).await?;
        }
        Command::Delete { client_id } => {
            db.delete_client(client_id).await?;
        }
        Command::Find { filter, json } => {
            let clients = db.find_clients(&ClientFilter::from(filter)).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&clients)?);
            } else {
                print_clients(&clients);
            }
        }
        Command::Browse { filter } => {
            ui::browse(db, &ClientFilter::from(filter)).await?;
        }
        Command::Demo => demo(db).await?,
    }

    Ok(())
}

fn print_clients(clients: &[ClientWithPhones]) {
    for client in clients {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            client.id,
            client.first_name,
            client.last_name,
            client.email,
            client.phones.join(", ")
        );
    }
}

/// Sample session: three clients, one edit, one phone removal, two searches, one deletion
async fn demo(db: &Database) -> Result<()> {
    let nikolai = db
        .add_client(
            &NewClient::new("Николай", "Васильевич", "Nike.Vas@internet.ru")
                .with_phones(["+905053454422", "+905053453311"]),
        )
        .await?;
    db.add_client(
        &NewClient::new("Иван", "Александрович", "Ivan.Alex@internet.ru")
            .with_phones(["+905053450000"]),
    )
    .await?;
    let dmitry = db
        .add_client(&NewClient::new("Дмитрий", "Дмитриевич", "Dim.Dim@internet.ru"))
        .await?;

    db.update_client(
        nikolai,
        &ClientUpdate {
            first_name: Some("Никита".to_string()),
            phones: Some(vec!["+79876540000".to_string(), "+79876541123".to_string()]),
            ..Default::default()
        },
    )
    .await?;

    db.delete_phone(nikolai, "+79876541123").await?;

    let by_first_name = ClientFilter {
        first_name: Some("Николай".to_string()),
        ..Default::default()
    };
    print_clients(&db.find_clients(&by_first_name).await?);

    let by_email = ClientFilter {
        email: Some("Ivan.Alex@internet.ru".to_string()),
        ..Default::default()
    };
    print_clients(&db.find_clients(&by_email).await?);

    db.delete_client(dmitry).await?;
    info!("demo finished");

    Ok(())
}
