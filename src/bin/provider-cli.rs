use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use provider_mocks::session::decode_session_id;

#[derive(Parser)]
#[command(name = "provider-cli")]
#[command(about = "Client for the Fink and Pearl mock endpoints", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service status
    Health,
    /// Open a Fink session for an account
    Session {
        account_id: String,
        #[arg(long)]
        currency: Option<String>,
    },
    /// Ask the server to decode a Fink session id
    Lookup { session_id: String },
    /// Submit a Fink transfer
    Transfer {
        account_id: String,
        amount: f64,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Run a Pearl student verification
    Student {
        person_id: String,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Run a Pearl university verification
    University {
        university_id: String,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Decode a Fink session id locally, without contacting the server
    Decode { session_id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{base}/health")).send().await?;
            print_response(res).await?;
        }
        Commands::Session {
            account_id,
            currency,
        } => {
            let body = json!({ "finkAccountId": account_id, "currency": currency });
            let res = client
                .post(format!("{base}/api/fink/sessions"))
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Lookup { session_id } => {
            let mut url = reqwest::Url::parse(&format!("{base}/api/fink/sessions"))?;
            url.path_segments_mut()
                .map_err(|_| "base URL cannot carry a path")?
                .push(&session_id);
            let res = client.get(url).send().await?;
            print_response(res).await?;
        }
        Commands::Transfer {
            account_id,
            amount,
            currency,
            description,
        } => {
            let body = json!({
                "sourceAccount": { "id": account_id },
                "transaction": {
                    "amount": amount,
                    "currency": currency,
                    "description": description,
                },
            });
            let res = client
                .post(format!("{base}/api/fink/transfers"))
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Student {
            person_id,
            full_name,
        } => {
            let body = json!({ "personId": person_id, "fullName": full_name });
            let res = client
                .post(format!("{base}/api/pearl/student-verifications"))
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::University {
            university_id,
            full_name,
        } => {
            let body = json!({
                "student": { "universityId": university_id, "fullName": full_name },
                "context": { "requestedBySystem": "provider-cli" },
            });
            let res = client
                .post(format!("{base}/api/pearl/university-verifications"))
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Decode { session_id } => {
            let decoded = decode_session_id(&session_id);
            let out = json!({ "uuid": decoded.uuid, "tag": decoded.tag });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
