use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "cdb-cli")]
#[command(about = "Command-line client for the Computer Database API", long_about = None)]
struct Cli {
    /// API base URL, including the prefix
    #[arg(short, long, default_value = "http://127.0.0.1:8080/api/v1")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every company
    Companies,
    /// Show one company
    Company { id: String },
    /// Create a company
    CreateCompany {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
    },
    /// Replace a company's name and location (its models are dropped)
    UpdateCompany {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
    },
    /// Delete a company and all of its computer models
    DeleteCompany { id: String },
    /// List the computer models of a company
    Models { company_id: String },
    /// Show one computer model
    Model { company_id: String, model_id: String },
    /// Add a computer model to a company
    AddModel {
        company_id: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        release: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let (res, expected) = match cli.command {
        Commands::Companies => (
            client.get(format!("{}/companies", base)).send().await?,
            StatusCode::OK,
        ),
        Commands::Company { id } => (
            client.get(format!("{}/companies/{}", base, id)).send().await?,
            StatusCode::OK,
        ),
        Commands::CreateCompany { id, name, location } => (
            client
                .post(format!("{}/companies", base))
                .json(&json!({ "id": id, "name": name, "location": location }))
                .send()
                .await?,
            StatusCode::CREATED,
        ),
        Commands::UpdateCompany { id, name, location } => (
            client
                .put(format!("{}/companies/{}", base, id))
                .json(&json!({ "id": id, "name": name, "location": location }))
                .send()
                .await?,
            StatusCode::OK,
        ),
        Commands::DeleteCompany { id } => (
            client.delete(format!("{}/companies/{}", base, id)).send().await?,
            StatusCode::NO_CONTENT,
        ),
        Commands::Models { company_id } => (
            client
                .get(format!("{}/companies/{}/computer-models", base, company_id))
                .send()
                .await?,
            StatusCode::OK,
        ),
        Commands::Model { company_id, model_id } => (
            client
                .get(format!("{}/companies/{}/computer-models/{}", base, company_id, model_id))
                .send()
                .await?,
            StatusCode::OK,
        ),
        Commands::AddModel { company_id, id, name, release } => (
            client
                .post(format!("{}/companies/{}/computer-models", base, company_id))
                .json(&json!({ "id": id, "name": name, "release": release }))
                .send()
                .await?,
            StatusCode::CREATED,
        ),
    };

    print_response(res, expected).await
}

async fn print_response(
    res: reqwest::Response,
    expected: StatusCode,
) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if status != expected {
        let text = res.text().await.unwrap_or_default();
        return Err(format!("unexpected status code {}: {}", status, text).into());
    }

    let text = res.text().await?;
    if text.is_empty() {
        println!("{}", status);
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
