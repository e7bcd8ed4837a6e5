use clap::{self, Parser};
use detectionio::{JsonObject, Message, Validate};

#[derive(clap::Parser)]
struct Cmd {
    /// JSON detection message to read
    file: String,
    /// Print a one line summary of the message
    #[arg(short, long)]
    summary: bool,
    /// Print the message as re-encoded JSON
    #[arg(short, long)]
    json: bool,
}

fn main() {
    let _ = env_logger::builder().try_init();
    let cmd = Cmd::parse();
    let text = std::fs::read_to_string(&cmd.file).unwrap();
    let message: Message = text.parse().expect("Cannot read message");
    if cmd.summary {
        println!("{} {}", message.type_name(), message.id());
    }
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&message.to_json()).unwrap());
    }
    let defects = message.validate();
    if defects.is_empty() {
        println!("valid");
    }
    for defect in defects {
        println!("{}", defect);
    }
}
