//! One-shot commands: ask, rank, sentences, contact

use colored::Colorize;
use serde_json::json;

use pagechat::cli::SourceArgs;
use pagechat::error::Result;
use pagechat::Answer;

use super::{describe_build, Session};

/// Answer a single question
pub fn cmd_ask(query: &str, args: SourceArgs, json: bool) -> Result<()> {
    let session = Session::prepare(args)?;
    let report = session.build()?;
    let answer = session.engine.answer(query, session.config.max_sentences);

    if json {
        let out = json!({
            "query": query,
            "answer": answer.text(),
            "found": answer.is_found(),
            "build": report,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match answer {
        Answer::NoMatch => println!("{}", session.config.no_match.dimmed()),
        Answer::Guidance => println!("{}", answer.text().yellow()),
        _ => println!("{}", answer),
    }
    Ok(())
}

/// Show every matching sentence with its score
pub fn cmd_rank(query: &str, args: SourceArgs, json: bool) -> Result<()> {
    let session = Session::prepare(args)?;
    session.build()?;
    let ranked = session.engine.rank(query);

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    if ranked.is_empty() {
        println!("{}", "No sentence matched.".dimmed());
        return Ok(());
    }

    let shown = session.config.max_sentences;
    for (i, scored) in ranked.iter().enumerate() {
        let marker = if i < shown { "●".green() } else { "○".dimmed() };
        println!(
            "{} {:>3}  {}  {}",
            marker,
            scored.score,
            format!("#{}", scored.position).dimmed(),
            scored.sentence
        );
    }
    println!(
        "\n{}",
        format!("{} matched, top {} form the answer", ranked.len(), shown.min(ranked.len())).dimmed()
    );
    Ok(())
}

/// Dump the sentence corpus
pub fn cmd_sentences(args: SourceArgs, json: bool) -> Result<()> {
    let session = Session::prepare(args)?;
    let report = session.build()?;
    let sentences = session.engine.sentences();

    if json {
        println!("{}", serde_json::to_string_pretty(&sentences)?);
        return Ok(());
    }

    println!("{}\n", describe_build(&report));
    for (i, sentence) in sentences.iter().enumerate() {
        println!("{} {}", format!("{:>4}", i).dimmed(), sentence);
    }
    println!("\n  Fingerprint: {}", &report.fingerprint[..16]);
    Ok(())
}

/// Show contact details from the last source
pub fn cmd_contact(args: SourceArgs, json: bool) -> Result<()> {
    let session = Session::prepare(args)?;
    session.build()?;
    let contact = session.engine.contact();

    if json {
        println!("{}", serde_json::to_string_pretty(&contact)?);
        return Ok(());
    }

    let show = |label: &str, value: &str| {
        if value.is_empty() {
            println!("  {:<9} {}", label, "(not found)".dimmed());
        } else {
            println!("  {:<9} {}", label, value);
        }
    };
    println!();
    show("Phone:", &contact.phone);
    show("Email:", &contact.email);
    show("LinkedIn:", &contact.profile_url);
    Ok(())
}
