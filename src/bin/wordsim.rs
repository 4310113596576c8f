//! WORDSIM CLI
//!
//! Interactive menu for word similarity search, plus a one-shot `query`
//! subcommand for scripting.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use wordsim::output::write_ranking;
use wordsim::vector::{checked_k, DEFAULT_DIMENSION};
use wordsim::{Config, Direction, Session};

/// WORDSIM - Similarity Search with Word Embeddings
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Embedding file to load at startup
    #[arg(short, long)]
    embeddings: Option<PathBuf>,

    /// Output file for results
    #[arg(short, long, global = true, default_value = wordsim::config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Vector dimension of the embedding file
    #[arg(short, long, default_value_t = DEFAULT_DIMENSION)]
    dimension: usize,

    /// List least similar words first
    #[arg(long, global = true)]
    ascending: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a single query and exit
    Query {
        /// Word to search for
        word: String,

        /// Number of results
        #[arg(short, default_value_t = 10)]
        k: usize,

        /// Print results to stdout instead of the output file
        #[arg(long)]
        stdout: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so prompts and results on stdout stay clean
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("wordsim=info".parse()?))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let direction = if args.ascending {
        Direction::Ascending
    } else {
        Direction::Descending
    };
    let config = Config::default()
        .with_output(args.output)
        .with_dimension(args.dimension)
        .with_direction(direction);
    let session = Session::new(config);

    match args.command {
        Some(Command::Query { word, k, stdout }) => {
            let embeddings = args
                .embeddings
                .context("--embeddings is required for a one-shot query")?;
            session.load(&embeddings)?;
            run_query(&session, &word, k, stdout)
        }
        None => {
            if let Some(path) = &args.embeddings {
                if let Err(e) = session.load(path) {
                    eprintln!("Error: {}", e);
                }
            }
            run_menu(&session)
        }
    }
}

fn run_query(session: &Session, word: &str, k: usize, stdout: bool) -> anyhow::Result<()> {
    if stdout {
        let ranking = session.find_similar(word, k)?;
        let mut out = io::stdout().lock();
        write_ranking(&mut out, &ranking)?;
    } else {
        session.write_similar(word, k)?;
    }
    Ok(())
}

fn run_menu(session: &Session) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print_menu(session);

        let Some(choice) = prompt(&mut input, "Enter your choice: ")? else {
            break;
        };

        let result = match choice.as_str() {
            "1" => specify_embeddings(session, &mut input),
            "2" => specify_output(session, &mut input),
            "3" => find_similar(session, &mut input),
            "4" => options(session, &mut input),
            "5" | "q" | "quit" | "exit" => break,
            "6" => show_stats(session),
            "" => continue,
            _ => {
                println!("Invalid choice. Please try again.");
                Ok(())
            }
        };

        if let Err(e) = result {
            eprintln!("Error: {:#}", e);
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn print_menu(session: &Session) {
    let config = session.config();
    println!(
        r#"
************************************************************
*          Similarity Search with Word Embeddings          *
************************************************************
1. Specify Embedding File
2. Specify Output File (current: '{}')
3. Find Similar Words
4. Options (current: {})
5. Quit
6. Stats"#,
        config.output.display(),
        config.direction
    );
}

/// Print a prompt and read one trimmed line; None on end of input
fn prompt<R: BufRead>(input: &mut R, message: &str) -> io::Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn specify_embeddings<R: BufRead>(session: &Session, input: &mut R) -> anyhow::Result<()> {
    let Some(path) = prompt(input, "Enter the path of the embedding file: ")? else {
        return Ok(());
    };

    let stats = session.load(&path)?;
    println!(
        "Word vectors loaded successfully: {} words ({} padded, {} truncated, {} duplicates).",
        stats.embeddings, stats.padded, stats.truncated, stats.duplicates
    );
    Ok(())
}

fn specify_output<R: BufRead>(session: &Session, input: &mut R) -> anyhow::Result<()> {
    let Some(path) = prompt(input, "Please enter the path for your output file: ")? else {
        return Ok(());
    };
    if path.is_empty() {
        println!("Output file unchanged.");
        return Ok(());
    }

    session.set_output(path);
    println!("Output file path set.");
    Ok(())
}

fn find_similar<R: BufRead>(session: &Session, input: &mut R) -> anyhow::Result<()> {
    let Some(word) = prompt(input, "Enter a word: ")? else {
        return Ok(());
    };
    let word = word.to_lowercase();

    if !session.store().contains(&word) {
        println!("Word not found, please enter another.");
        return Ok(());
    }

    let Some(count) = prompt(input, "Enter the number of similar words to find: ")? else {
        return Ok(());
    };
    let k: i64 = count
        .parse()
        .with_context(|| format!("not a number: '{}'", count))?;
    let k = checked_k(k)?;

    let ranking = session.write_similar(&word, k)?;
    println!(
        "{} similar words written to {}.",
        ranking.len(),
        session.config().output.display()
    );
    Ok(())
}

fn options<R: BufRead>(session: &Session, input: &mut R) -> anyhow::Result<()> {
    let message = "Do you wish to populate the output file from highest similarity or from \
                   lowest similarity?\nInput 0 for highest, 1 for lowest: ";
    let Some(choice) = prompt(input, message)? else {
        return Ok(());
    };

    let direction = match choice.as_str() {
        "0" => Ok(Direction::Descending),
        "1" => Ok(Direction::Ascending),
        other => other.parse::<Direction>(),
    };
    match direction {
        Ok(direction) => session.set_direction(direction),
        Err(_) => println!("Invalid choice. Please try again."),
    }
    Ok(())
}

fn show_stats(session: &Session) -> anyhow::Result<()> {
    let store = session.store();
    let config = session.config();

    match &config.embeddings {
        Some(path) => println!(
            "Embeddings: {} ({} words, dimension {})",
            path.display(),
            store.len(),
            store.dimension()
        ),
        None => println!("Embeddings: none loaded"),
    }
    println!("{}", session.metrics().summary());
    Ok(())
}
