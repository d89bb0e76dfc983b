use clap::{Parser, Subcommand};
use log::debug;
use std::sync::Arc;

use recipe_recommender::render::PAGE_STYLES;
use recipe_recommender::{ClientConfig, HeadlessPage, HttpBackend, PageController, UiEvent};

#[derive(Parser)]
#[command(name = "recipe-recommender", version, about = "Get recipe ideas from your ingredients")]
struct Cli {
    /// Backend base URL (overrides configuration)
    #[arg(long)]
    base_url: Option<String>,

    /// Prepend the page stylesheet to the rendered output
    #[arg(long)]
    with_styles: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recommend recipes for the given ingredients
    Recommend {
        #[arg(required = true)]
        ingredients: Vec<String>,
    },
    /// Show the recipes you saved
    Mine,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = ClientConfig::load()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    debug!("{:#?}", config);

    let backend = HttpBackend::new(&config)?;
    let page = Arc::new(HeadlessPage::new());
    let controller = PageController::new(backend, Arc::clone(&page), &config)?;

    match cli.command {
        Command::Recommend { ingredients } => {
            for ingredient in &ingredients {
                controller.add_ingredient(ingredient.trim());
            }
            controller.dispatch(UiEvent::GetRecipesClicked).await;
        }
        Command::Mine => controller.dispatch(UiEvent::ShowMyRecipesClicked).await,
    }

    for message in page.message_log() {
        eprintln!("[{}] {}", message.kind.as_str(), message.text);
    }

    if cli.with_styles {
        println!("<style>{}</style>", PAGE_STYLES);
    }
    println!("{}", page.results_html());

    Ok(())
}
