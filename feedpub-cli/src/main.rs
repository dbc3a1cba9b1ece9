use clap::Parser;
use dotenv::dotenv;
use feedpub_publisher::{
    AtpService, DEFAULT_PDS, PublishRequest, PublishedRecord, did_document, publish,
};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "feedpub", version, about, long_about = None)]
struct Cli {
    /// The handle to publish the feed under. Ex: smokesignal.events
    #[arg(short, long, env = "BLUE_SKY_HANDLE")]
    user: String,
    /// The password for the handle publishing the feed
    #[arg(short, long, env = "BLUE_SKY_PASSWORD", hide_env_values = true)]
    password: String,
    /// The name of the feed. Ex: What's Hot
    #[arg(short, long)]
    name: String,
    /// The description of the feed. Ex: Top trending content from the whole network
    #[arg(short, long)]
    description: String,
    /// The path to the avatar image for the feed. Ex: ./path/to/avatar.jpeg
    #[arg(short, long)]
    image: Option<PathBuf>,
    /// The server hostname servicing the feed. Ex: feeds.smokesignal.events
    #[arg(short, long)]
    server: String,
    /// The rkey of a feed being updated
    #[arg(short, long)]
    rkey: Option<String>,
    /// The PDS the account lives on
    #[arg(long, env = "FEEDPUB_PDS", default_value = DEFAULT_PDS)]
    pds: String,
    /// Also print the did.json the feed server has to serve
    #[arg(long)]
    print_did_document: bool,
}

impl Cli {
    fn publish_request(&self) -> PublishRequest {
        PublishRequest {
            handle: self.user.clone(),
            password: self.password.clone(),
            display_name: self.name.clone(),
            description: self.description.clone(),
            server: self.server.clone(),
            rkey: self.rkey.clone(),
            image: self.image.clone(),
        }
    }
}

fn report(published: &PublishedRecord) -> String {
    format!("Feed URI : {}", published.uri)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    info!("publishing to {}", cli.pds);

    let service = AtpService::new(&cli.pds);
    let published = publish(&service, &cli.publish_request()).await?;

    println!("{}", report(&published));
    if cli.print_did_document {
        println!("{}", serde_json::to_string_pretty(&did_document(&cli.server))?);
    }

    Ok(())
}
