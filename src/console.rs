//! Console surface — stdin/stdout driver for the three workflow screens.
//!
//! The real deployment surface is whatever front-end hosts the session; this
//! is the reference one. Screen text follows the original activity sheet:
//! input form, assessment + revision form, summary preview and send.

use tokio::io::{AsyncBufReadExt, BufReader, Stdin};

use crate::error::Error;
use crate::session::{InputForm, Revision, SessionManager, SessionState};

struct Console {
    lines: tokio::io::Lines<BufReader<Stdin>>,
}

impl Console {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print a prompt and read one trimmed line.
    async fn ask(&mut self, label: &str) -> anyhow::Result<String> {
        println!("{label}");
        eprint!("> ");
        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => anyhow::bail!("input closed"),
        }
    }

    /// Like `ask`, but an empty line keeps the pre-filled value.
    async fn ask_prefilled(&mut self, label: &str, current: &str) -> anyhow::Result<String> {
        let typed = self
            .ask(&format!("{label}\n(currently: {current})\n(press Enter to keep)"))
            .await?;
        if typed.is_empty() {
            Ok(current.to_string())
        } else {
            Ok(typed)
        }
    }
}

/// Drive one full session over stdin/stdout.
pub async fn run(manager: &SessionManager) -> anyhow::Result<()> {
    let mut console = Console::new();
    let mut state = SessionState::new();

    input_screen(manager, &mut console, &mut state).await?;
    followup_screen(manager, &mut console, &mut state).await?;
    send_screen(manager, &state).await
}

async fn input_screen(
    manager: &SessionManager,
    console: &mut Console,
    state: &mut SessionState,
) -> anyhow::Result<()> {
    println!("🔬 Step 1: Fill in your investigation details\n");

    loop {
        let form = InputForm {
            names: console
                .ask("0. What are your names? (separate with commas)")
                .await?,
            research_question: console.ask("1. What is your research question?").await?,
            evidence: console
                .ask("2. What key evidence did you collect during the investigation?")
                .await?,
            meaning: console.ask("3. What do you think it means?").await?,
            teacher_email: console
                .ask("4. What is your teacher's email address?")
                .await?,
        };

        match manager.submit_input(state, form) {
            Ok(_) => return Ok(()),
            Err(Error::Session(e)) => {
                println!("\n❌ {e}. Please fill out all fields before submitting.\n");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

async fn followup_screen(
    manager: &SessionManager,
    console: &mut Console,
    state: &mut SessionState,
) -> anyhow::Result<()> {
    println!("\n💬 Step 2: Revise your answers with the coach\n");

    loop {
        println!("Scoring your answers...");
        let pending = manager.prepare_followup(state).await?;

        println!("\n{}\n", pending.reply.assessment);
        println!(
            "{}, your question: {}",
            pending.evidence_person, pending.reply.evidence_question
        );
        println!(
            "{}, your question: {}\n",
            pending.explanation_person, pending.reply.explanation_question
        );

        let Some(answers) = state.answers.as_ref() else {
            anyhow::bail!("session entered the follow-up phase without answers");
        };
        let (current_evidence, current_meaning) =
            (answers.evidence.clone(), answers.meaning.clone());

        let revision = Revision {
            updated_evidence: console
                .ask_prefilled("Update your evidence:", &current_evidence)
                .await?,
            updated_meaning: console
                .ask_prefilled("Update your interpretation:", &current_meaning)
                .await?,
        };

        let action = console
            .ask("[s] submit revisions for another round, [f] finish and send to your teacher")
            .await?;

        let outcome = match action.as_str() {
            "f" | "F" => manager.finish(state, revision),
            _ => manager.submit_revision(state, revision),
        };

        match outcome {
            Ok(mode) if mode.is_terminal() => return Ok(()),
            Ok(_) => continue,
            Err(Error::Session(e)) => {
                println!("\n❌ {e}. Please answer both questions.\n");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

async fn send_screen(manager: &SessionManager, state: &SessionState) -> anyhow::Result<()> {
    println!("\n📋 Step 3: Send your work to your teacher\n");
    println!("Email preview:\n\n{}\n", manager.preview(state)?);

    match manager.send_summary(state).await {
        Ok(report) => {
            println!(
                "✅ Email sent to {}! Message ID: {}",
                report.recipient, report.message_id
            );
        }
        Err(e) => {
            // Terminal state: report the failure, do not retry automatically.
            println!("❌ Failed to send email: {e}");
        }
    }
    Ok(())
}
