//! OneirVision CLI binary: run the HTTP API or interpret dreams locally.
//!
//! Subcommands: `serve`, `interpret`, `symbols`, `prompt`. Dream text comes from
//! `-m/--message`, the positional words, or stdin when both are empty.

mod logging;
mod render;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use oneir::{build_prompt, DreamAnalyzer, DreamInterpretationRequest, MockTextGenerator};
use tokio::io::AsyncReadExt;

#[derive(Parser, Debug)]
#[command(name = "oneirvision")]
#[command(about = "OneirVision: dream interpretation, symbols and images")]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Run the HTTP API (default 127.0.0.1:5000 or ONEIR_BIND_ADDR)
    Serve(ServeArgs),
    /// Interpret a dream with the configured text model
    Interpret(InterpretArgs),
    /// Look up dictionary symbols in a dream, without calling a model
    Symbols(TextArgs),
    /// Print the prompt that would be sent to the model
    Prompt(TextArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct ServeArgs {
    /// Listen address, overrides ONEIR_BIND_ADDR
    #[arg(long, value_name = "ADDR")]
    addr: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
struct TextArgs {
    /// Dream text (or pass as positional words)
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    #[arg(trailing_var_arg = true)]
    rest: Vec<String>,

    /// Output JSON instead of text
    #[arg(long)]
    json: bool,

    /// With --json, pretty-print
    #[arg(long)]
    pretty: bool,
}

#[derive(clap::Args, Debug, Clone)]
struct InterpretArgs {
    #[command(flatten)]
    text: TextArgs,

    /// Moods felt during the dream (repeatable)
    #[arg(long = "mood", value_name = "MOOD")]
    moods: Vec<String>,

    /// Also generate an image of the dream
    #[arg(long)]
    image: bool,

    /// Art style for --image
    #[arg(long, value_name = "STYLE", requires = "image")]
    style: Option<String>,
}

async fn dream_text(args: &TextArgs) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(m) = args.message.as_ref().filter(|m| !m.trim().is_empty()) {
        return Ok(m.clone());
    }
    if !args.rest.is_empty() {
        return Ok(args.rest.join(" "));
    }
    let mut buf = String::new();
    tokio::io::stdin().read_to_string(&mut buf).await?;
    Ok(buf.trim().to_string())
}

fn print_json(
    value: &impl serde::Serialize,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", s);
    Ok(())
}

async fn interpret(
    args: &InterpretArgs,
    settings: &config::Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = DreamInterpretationRequest {
        description: dream_text(&args.text).await?,
        date: None,
        moods: args.moods.clone(),
    };
    let analyzer = DreamAnalyzer::from_settings(settings)?;
    if args.image {
        let result = analyzer.analyze(&request, args.style.as_deref()).await?;
        if args.text.json {
            print_json(&result, args.text.pretty)?;
        } else {
            print!("{}", render::analysis(&result));
        }
    } else {
        let result = analyzer.interpret(&request).await?;
        if args.text.json {
            print_json(&result, args.text.pretty)?;
        } else {
            print!("{}", render::interpretation(&result));
        }
    }
    Ok(())
}

async fn symbols(
    args: &TextArgs,
    settings: &config::Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = dream_text(args).await?;
    // Symbol lookup never calls the model.
    let found = DreamAnalyzer::new(Arc::new(MockTextGenerator::canned()))
        .with_max_symbols(settings.max_symbols)
        .symbols(&text);
    if args.json {
        print_json(&serde_json::json!({ "symbols": found }), args.pretty)?;
    } else {
        print!("{}", render::symbols(&found));
    }
    Ok(())
}

async fn prompt(args: &TextArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = dream_text(args).await?;
    if text.trim().is_empty() {
        return Err(oneir::DreamError::MissingInput("dream text").into());
    }
    let prompt = build_prompt(&text);
    if args.json {
        print_json(&serde_json::json!({ "prompt": prompt }), args.pretty)?;
    } else {
        println!("{}", prompt);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = config::load_and_apply("oneirvision", None) {
        eprintln!("oneirvision: config not loaded: {}", e);
    }
    let _log_guard = logging::init()?;
    let settings = config::Settings::from_env();

    let args = Args::parse();
    let result = match &args.cmd {
        Command::Serve(sa) => {
            if let Err(e) = serve::run_serve(&settings, sa.addr.as_deref()).await {
                eprintln!("serve error: {}", e);
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Interpret(ia) => interpret(ia, &settings).await,
        Command::Symbols(ta) => symbols(ta, &settings).await,
        Command::Prompt(ta) => prompt(ta).await,
    };
    if let Err(e) = result {
        eprintln!("oneirvision: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
