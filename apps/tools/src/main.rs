use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{forms::ChallengeFields, AdminClient};
use shared::domain::ChallengeId;
use shared::protocol::CreateChallengeRequest;

#[derive(Parser, Debug)]
#[command(about = "Scripted admin operations against the challenges API")]
struct Cli {
    #[arg(long, default_value = "http://localhost:8080")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a challenge directly, bypassing the console form.
    CreateChallenge {
        name: String,
        points: i64,
        description: String,
        #[arg(long, default_value = "")]
        photo_url: String,
    },
    ShowChallenge {
        challenge_id: i64,
    },
    /// Fetch the current record and approve it unchanged.
    ApproveChallenge {
        challenge_id: i64,
    },
    DeleteChallenge {
        challenge_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = AdminClient::new(&cli.server_url)?;

    match cli.command {
        Command::CreateChallenge {
            name,
            points,
            description,
            photo_url,
        } => {
            let request = CreateChallengeRequest {
                challenge_name: name.clone(),
                points: Some(points),
                description,
                photo_url,
            };
            client.create_challenge(&request).await?;
            println!("created challenge '{name}' worth {points} points");
        }
        Command::ShowChallenge { challenge_id } => {
            let detail = client.fetch_challenge(ChallengeId(challenge_id)).await?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Command::ApproveChallenge { challenge_id } => {
            let id = ChallengeId(challenge_id);
            let detail = client.fetch_challenge(id).await?;
            let mut fields = ChallengeFields::default();
            fields.populate(&detail);
            client.approve_challenge(id, &fields.approve_request()).await?;
            println!("approved challenge_id={challenge_id}");
        }
        Command::DeleteChallenge { challenge_id } => {
            client.delete_challenge(ChallengeId(challenge_id)).await?;
            println!("deleted challenge_id={challenge_id}");
        }
    }

    Ok(())
}
