// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `rehearse shell` command implementation.
//!
//! Runs one interview round in the terminal against the configured engine.
//! `/evaluate` prints the round evaluation, `/quit` exits.

use std::str::FromStr;

use clap::Args;
use colored::Colorize;
use rehearse_config::RehearseConfig;
use rehearse_core::{Evaluation, Level, RehearseError, Role, RoundType, Session, SessionSpec};
use rehearse_engine::InterviewEngine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Target company (see GET /companies for the list).
    #[arg(long, default_value = "Google")]
    pub company: String,
    #[arg(long, default_value = "Software Engineer")]
    pub role: String,
    /// L3, L4 or L5.
    #[arg(long, default_value = "L4")]
    pub level: String,
    /// coding, design or behavioral.
    #[arg(long, default_value = "coding")]
    pub round: String,
    #[arg(long, default_value_t = 3)]
    pub years: u32,
    #[arg(long, default_value = "Python")]
    pub language: String,
}

impl ShellArgs {
    fn into_spec(self) -> Result<SessionSpec, RehearseError> {
        let persona = rehearse_persona::persona(&self.company).ok_or_else(|| {
            RehearseError::InvalidRequest(format!(
                "unknown company {:?}; known: {}",
                self.company,
                rehearse_persona::companies().join(", ")
            ))
        })?;
        let level = Level::from_str(&self.level)
            .map_err(|_| RehearseError::InvalidRequest(format!("unknown level {:?}", self.level)))?;
        let round_type = RoundType::from_str(&self.round).map_err(|_| {
            RehearseError::InvalidRequest(format!("unknown round type {:?}", self.round))
        })?;

        Ok(SessionSpec {
            company: persona.name.to_string(),
            role: self.role,
            level,
            years_of_experience: self.years,
            preferred_language: self.language,
            round_type,
            resume_text: None,
            job_description: None,
        })
    }
}

/// Runs the interactive interview loop.
pub async fn run_shell(config: RehearseConfig, args: ShellArgs) -> Result<(), RehearseError> {
    crate::serve::init_tracing("warn");

    let mut session = Session::new(args.into_spec()?);
    let engine = InterviewEngine::from_config(&config).await;

    let mut rl = DefaultEditor::new()
        .map_err(|e| RehearseError::Internal(format!("failed to initialize readline: {e}")))?;

    println!(
        "{} {} {} {} round ({} mode)",
        "rehearse".bold().green(),
        session.company(),
        session.level(),
        session.round_type(),
        engine.active_mode()
    );
    println!(
        "Type {} for feedback, {} to exit.\n",
        "/evaluate".yellow(),
        "/quit".yellow()
    );

    let sentinel = session.round_type().start_sentinel();
    let greeting = engine.get_interviewer_response(&mut session, &sentinel).await;
    session.state_mut().record(Role::Interviewer, greeting.clone());
    print_interviewer(&greeting);

    let prompt = format!("{}> ", "you".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if trimmed == "/evaluate" {
                    let evaluation = engine.evaluate_round(&session).await;
                    print_evaluation(&evaluation);
                    continue;
                }

                session.state_mut().record(Role::Candidate, trimmed);
                let reply = engine.get_interviewer_response(&mut session, trimmed).await;
                session.state_mut().record(Role::Interviewer, reply.clone());
                print_interviewer(&reply);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

fn print_interviewer(text: &str) {
    println!("\n{}\n{text}\n", "interviewer".bold().cyan());
}

fn score_text(score: &serde_json::Value) -> String {
    match score {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn print_evaluation(evaluation: &Evaluation) {
    let card = &evaluation.scorecard;
    println!("\n{}", "evaluation".bold().magenta());
    let extra = card.extra.iter().map(|(label, score)| (label.as_str(), score));
    for (label, score) in card.named().into_iter().chain(extra) {
        println!("  {label:<22} {}/5", score_text(score));
    }
    println!("  {:<22} {}", "Recommendation", evaluation.hiring_recommendation.bold());
    for signal in &evaluation.strong_signals {
        println!("  {} {signal}", "+".green());
    }
    for signal in &evaluation.weak_signals {
        println!("  {} {signal}", "-".red());
    }
    println!("\n{}\n", evaluation.detailed_feedback);
    println!("{} {}\n", "Plan:".bold(), evaluation.improvement_plan);
    if let Some(mode) = evaluation.mode {
        println!("{}", format!("(generated in {mode} mode)").dimmed());
    }
}
