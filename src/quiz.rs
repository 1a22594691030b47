use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use mcq_revision::catalog::CatalogError;
use mcq_revision::scoring::Evaluation;
use mcq_revision::session::{QuestionSnapshot, QuizSession, SessionError, Summary};
use mcq_revision::{ModuleCatalog, QuestionData, SetMetadata};

use crate::display::{
    accent, question_difficulty_color, status_marker, BOLD, DIM, GREEN, MAGENTA, RED, RESET,
};

/// Runs one interactive session against the chosen module, driving the
/// library only through its transitions and snapshots.
pub fn run(catalog: &ModuleCatalog, module_id: &str) -> anyhow::Result<()> {
    let set = match catalog.load_question_set(module_id) {
        Ok(set) => set,
        Err(CatalogError::ModuleNotFound { .. }) => {
            eprintln!("no module with id {module_id:?}; available modules:");
            for module in catalog.modules() {
                eprintln!("  {}", module.id);
            }

            bail!("module {module_id:?} not found");
        }
        Err(err) => return Err(err).context(format!("failed to load module {module_id:?}")),
    };

    if let Some(module) = catalog.module(module_id) {
        println!("{BOLD}{}{RESET}", module.name);
        println!("{}", module.description);
    }
    println!(
        "{DIM}{} · {}{RESET}\n",
        set.metadata.domain, set.metadata.source,
    );

    log::info!(
        "starting session for module {module_id} with {} questions",
        set.questions.len(),
    );

    let metadata = set.metadata;
    let mut session = QuizSession::new(set.questions);
    let stdin = io::stdin();

    loop {
        while !session.is_complete() {
            let question = {
                let snapshot = session
                    .snapshot()
                    .context("session in progress but no snapshot")?;
                render_header(&snapshot);

                snapshot.question.clone()
            };
            render_question(&question);

            let Some(evaluation) = prompt_answer(&stdin, &mut session, &question)? else {
                println!("Aborted.");
                return Ok(());
            };

            render_feedback(&question, &evaluation);

            print!("{DIM}[Enter] to continue{RESET} ");
            io::stdout().flush()?;
            if read_line(&stdin)?.is_none() {
                return Ok(());
            }

            session.advance()?;
            println!();
        }

        render_summary(&session.summary()?, &metadata);

        print!("Restart? [y/N] ");
        io::stdout().flush()?;
        let Some(line) = read_line(&stdin)? else {
            return Ok(());
        };

        if !line.trim().eq_ignore_ascii_case("y") || session.total() == 0 {
            return Ok(());
        }

        session.restart();
        println!();
    }
}

/// Prompts until a submission is accepted. Returns `None` when the user
/// quits or stdin closes.
fn prompt_answer(
    stdin: &io::Stdin,
    session: &mut QuizSession,
    question: &QuestionData,
) -> anyhow::Result<Option<Evaluation>> {
    loop {
        print!("{BOLD}>{RESET} ");
        io::stdout().flush()?;

        let Some(line) = read_line(stdin)? else {
            return Ok(None);
        };
        let line = line.trim();

        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        let selected: BTreeSet<String> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .collect();

        match session.submit_answer(&question.id, selected) {
            Ok(evaluation) => return Ok(Some(evaluation)),
            Err(err @ (SessionError::EmptySelection | SessionError::UnknownChoice { .. })) => {
                println!("{RED}{err}{RESET}");
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn render_header(snapshot: &QuestionSnapshot<'_>) {
    println!(
        "{BOLD}{} / {}{RESET} {DIM}({:.0}% through){RESET}  Score: {}/{}",
        snapshot.position,
        snapshot.total,
        snapshot.progress * 100.0,
        snapshot.running_score,
        snapshot.position - 1,
    );
}

fn render_question(question: &QuestionData) {
    let difficulty_color = question_difficulty_color(question.difficulty);
    let badge = question.difficulty.label().to_uppercase();

    print!("{DIM}Topic: {}{RESET}", question.topic);
    if let Some(chapter) = &question.chapter {
        print!(" {DIM}· Chapter: {chapter}{RESET}");
    }
    print!("  {difficulty_color}[{badge}]{RESET}");
    if question.multiple_answers() {
        print!(" {MAGENTA}[MULTIPLE]{RESET}");
    }
    println!();

    println!("\n{BOLD}{}{RESET}", question.prompt);
    if question.multiple_answers() {
        println!("{DIM}Select all correct answers.{RESET}");
    }
    println!();

    for choice in &question.choices {
        println!("  {BOLD}{}{RESET}. {}", choice.id, choice.text);
    }

    println!(
        "\n{DIM}Enter choice id(s), separated by spaces or commas; 'quit' aborts.{RESET}"
    );
}

fn render_feedback(question: &QuestionData, evaluation: &Evaluation) {
    println!();

    for (choice, status) in question.choices.iter().zip(&evaluation.choice_statuses) {
        let (marker, color) = status_marker(*status);
        println!("  {color}{marker} {}. {}{RESET}", choice.id, choice.text);
    }

    if evaluation.is_correct {
        println!("\n{GREEN}{BOLD}Correct!{RESET}");
    } else {
        println!("\n{RED}{BOLD}Incorrect{RESET}");

        let correct_ids = question.correct_choice_ids();
        let answers: Vec<String> = correct_ids
            .iter()
            .filter_map(|id| question.choice(id))
            .map(|choice| format!("{}. {}", choice.id, choice.text))
            .collect();

        println!(
            "Correct answer{}: {BOLD}{}{RESET}",
            if correct_ids.len() > 1 { "s" } else { "" },
            answers.join(", "),
        );
    }

    println!("{DIM}Source: {}{RESET}", question.source_document);
}

fn render_summary(summary: &Summary, metadata: &SetMetadata) {
    let accent_color = accent("blue");

    println!("{BOLD}Quiz Complete!{RESET} {DIM}({}){RESET}", metadata.domain);
    println!(
        "\n  {BOLD}{}{RESET} / {} · {accent_color}{:.1}%{RESET}",
        summary.score_count, summary.total_count, summary.percentage,
    );
    println!("  {BOLD}{}{RESET}", summary.grade.label());
    println!(
        "\n  Correct: {GREEN}{}{RESET}  Incorrect: {RED}{}{RESET}  Total: {}",
        summary.score_count,
        summary.total_count - summary.score_count,
        summary.total_count,
    );
    println!();
}

/// Reads one line; `None` on end of input.
fn read_line(stdin: &io::Stdin) -> anyhow::Result<Option<String>> {
    let mut line = String::new();
    let read = stdin.lock().read_line(&mut line)?;

    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}
