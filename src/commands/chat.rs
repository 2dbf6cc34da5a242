//! Interactive chat session

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;

use colored::Colorize;

use pagechat::cli::SourceArgs;
use pagechat::error::{PageChatError, Result};
use pagechat::fetch::SourceRetriever;
use pagechat::Answer;

use super::{describe_build, Session};

/// Run a question/answer loop on stdin
///
/// The corpus is built in the background, so questions asked before it is
/// ready get the loading message, like the page widget.
pub fn cmd_chat(args: SourceArgs) -> Result<()> {
    let Session {
        config,
        sources,
        engine,
    } = Session::prepare(args)?;
    let engine = Arc::new(engine);
    let interactive = atty::is(atty::Stream::Stdin);

    println!("\n{}", config.title.bold());
    println!("{}\n", config.subtitle.dimmed());
    println!("{} {}", "Bot:".cyan().bold(), config.welcome);

    let builder = {
        let engine = Arc::clone(&engine);
        let retriever = SourceRetriever::from_config(&config);
        let selector = config.selector.clone();
        thread::spawn(move || match engine.build(&sources, &selector, &retriever) {
            Ok(report) => {
                if interactive {
                    eprintln!("{}", describe_build(&report).dimmed());
                }
            }
            Err(e) => report_build_error(&e),
        })
    };

    if !interactive {
        // Piped questions would otherwise race the build and all get "Loading content..."
        if let Err(e) = wait_for_build(builder) {
            report_build_error(&e);
        }
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("{} ", "You:".bold());
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let query = line?;
        let query = query.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query, "quit" | "exit") {
            break;
        }
        if !interactive {
            println!("{} {}", "You:".bold(), query);
        }

        let answer = engine.answer(query, config.max_sentences);
        let text = match answer {
            Answer::NoMatch => config.no_match.as_str(),
            _ => answer.text(),
        };
        println!("{} {}", "Bot:".cyan().bold(), text);
    }

    Ok(())
}

/// Wait for the background build, turning a panic into a build error
fn wait_for_build(handle: thread::JoinHandle<()>) -> Result<()> {
    handle
        .join()
        .map_err(|_| PageChatError::retrieval("pages", "build thread panicked"))
}

fn report_build_error(e: &PageChatError) {
    eprintln!("  {} Could not load pages: {}", "✗".red(), e);
    if let Some(hint) = e.hint() {
        eprintln!("  {}", hint);
    }
}
