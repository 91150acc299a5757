//! Stdin demo — walks the production onboarding catalog in the terminal.
//!
//! Numbers toggle (or choose) options, `ok` confirms a multi-choice step,
//! `/search <text>` narrows searchable lists, `/reset` starts over, `/quit`
//! exits. The finished profile is printed as JSON on the way out.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

use skill_swap::auth::User;
use skill_swap::config::WizardConfig;
use skill_swap::dashboard::{CompletionSink, Dashboard, spawn_completion_forwarder};
use skill_swap::wizard::{StepKind, WizardController, catalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let name = std::env::var("SKILL_SWAP_USER").unwrap_or_else(|_| "friend".to_string());
    let user = User::new(&name, format!("{}@demo.skillswap.local", name.to_lowercase()));

    let registry = Arc::new(catalog::default_registry()?);
    let controller = WizardController::new(registry, WizardConfig::default(), user);

    let dashboard = Arc::new(Dashboard::new());
    let sink: Arc<dyn CompletionSink> = dashboard.clone();
    let _forwarder = spawn_completion_forwarder(controller.subscribe(), sink);

    eprintln!("💬 Skill Swap onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Numbers pick options, 'ok' confirms, /search <text>, /reset, /quit\n");

    controller.start().await?;

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();
    let mut printed = 0usize;
    let mut query = String::new();

    loop {
        render(&controller, &mut printed, &query).await;

        if controller.snapshot().await.completed {
            break;
        }

        eprint!("> ");
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        match input {
            "" => {}
            "/quit" => break,
            "/reset" => {
                controller.reset().await;
                printed = 0;
                query.clear();
                controller.start().await?;
            }
            "ok" => {
                if let Err(e) = controller.confirm().await {
                    eprintln!("! {e}");
                }
                query.clear();
            }
            _ if input.starts_with("/search ") => {
                query = input["/search ".len()..].trim().to_string();
            }
            _ => {
                if let Err(e) = pick(&controller, &query, input).await {
                    eprintln!("! {e}");
                }
            }
        }
    }

    // The forwarder may still be delivering; the controller's own copy is
    // already final once `completed` is observed.
    if let Some(profile) = controller.finished_profile().await {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    }
    Ok(())
}

/// Apply a numeric pick against the currently visible option list.
async fn pick(controller: &WizardController, query: &str, input: &str) -> anyhow::Result<()> {
    let Ok(index) = input.parse::<usize>() else {
        anyhow::bail!("unrecognized input {input:?} (expected an option number)");
    };
    let visible = controller.filtered_options(query).await;
    let Some(option) = index.checked_sub(1).and_then(|i| visible.get(i)) else {
        anyhow::bail!("no option #{index}");
    };

    let snapshot = controller.snapshot().await;
    let Some(step) = snapshot.current_step else {
        anyhow::bail!("the flow is already complete");
    };
    if step.kind.is_multi() {
        controller.toggle_selection(option).await?;
    } else {
        controller.choose_single(option).await?;
    }
    Ok(())
}

/// Wait out the typing indicator, then print new transcript entries and the
/// current option list.
async fn render(controller: &WizardController, printed: &mut usize, query: &str) {
    loop {
        if !controller.snapshot().await.is_typing {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let snapshot = controller.snapshot().await;
    for entry in &snapshot.transcript[*printed..] {
        match entry.sender {
            skill_swap::wizard::Sender::Bot => println!("🤖 {}", entry.text),
            skill_swap::wizard::Sender::User => println!("   you: {}", entry.text),
        }
    }
    *printed = snapshot.transcript.len();

    let Some(step) = snapshot.current_step else {
        return;
    };
    let (current, total) = snapshot.progress;
    eprintln!("   [{current}/{total}] ({})", step.kind);

    let visible = controller.filtered_options(query).await;
    if step.kind == StepKind::SearchableMultiChoice && !query.is_empty() {
        eprintln!("   search: {query:?} ({} match(es))", visible.len());
    }
    for (i, option) in visible.iter().enumerate() {
        let mark = if snapshot.selection.contains(option) {
            "✔"
        } else {
            " "
        };
        eprintln!("   {mark} {}. {option}", i + 1);
    }
    if !snapshot.selection.is_empty() {
        eprintln!("   selected: {}", snapshot.selection.join(", "));
    }
}
