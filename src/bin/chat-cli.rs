//! Terminal chat against the language model, no speech.

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use chat_relay::{
    config::Config,
    services::{
        chatbot::{primary_reply, select_model},
        completion::OpenAiClient,
        conversation::{Conversation, DEFAULT_SYSTEM_PROMPT, is_exit_command},
    },
};

#[derive(Debug, Parser)]
#[command(name = "chat-cli", about = "Chat with the language model from your terminal")]
struct Args {
    /// Model identifier, defaults to OPENAI_MODEL or gpt-5-nano.
    #[arg(long)]
    model: Option<String>,

    /// System message the transcript starts with.
    #[arg(long, default_value = DEFAULT_SYSTEM_PROMPT)]
    system_prompt: String,

    /// Label printed in front of each reply.
    #[arg(long, default_value = "Dachikou")]
    persona: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let client = OpenAiClient::new(&config.openai).context("building language model client")?;
    let model = select_model(args.model.as_deref(), &config.openai.default_model).to_owned();

    let mut conversation = Conversation::new(args.system_prompt);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Chat started. Type 'exit' to quit.\n");

    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!("\nInterrupted. Exiting.");
                break;
            }
        };

        let Some(line) = line else {
            println!();
            break;
        };
        let input = line.trim();
        if is_exit_command(input) {
            println!("Bye!");
            break;
        }
        if input.is_empty() {
            continue;
        }

        conversation.push_user(input);

        let reply = tokio::select! {
            reply = primary_reply(&client, &model, conversation.messages()) => reply,
            _ = tokio::signal::ctrl_c() => {
                println!("\nInterrupted. Exiting.");
                break;
            }
        };

        match reply {
            Ok(reply) => {
                println!("{}: {}\n", args.persona, reply);
                conversation.push_assistant(reply);
            }
            Err(e) => {
                eprintln!("[Error] {e}");
                break;
            }
        }
    }

    Ok(())
}
