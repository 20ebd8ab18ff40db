use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "actuator-cli")]
#[command(about = "Management CLI for the RPC runtime actuator", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8081")]
    url: String,

    #[arg(short, long, default_value = "/actuator")]
    base_path: String,

    /// Bearer token, when the actuator requires one
    #[arg(short, long)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the enabled endpoints
    Links,
    /// Show every configuration object grouped by kind
    Configs,
    /// Tear down registries, protocols, services and references
    Shutdown,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(key) = &cli.key {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", key))?,
        );
    }

    let base = format!("{}{}", cli.url.trim_end_matches('/'), cli.base_path.trim_end_matches('/'));

    let res = match cli.command {
        Commands::Links => client.get(&base).headers(headers).send().await?,
        Commands::Configs => {
            client
                .get(format!("{}/dubboconfigs", base))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Shutdown => {
            client
                .post(format!("{}/dubboshutdown", base))
                .headers(headers)
                .send()
                .await?
        }
    };
    print_response(res).await?;

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: actuator returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
