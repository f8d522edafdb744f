//! Scripted walk through the task list.
//!
//! Plays a short session against the store and prints the list after each
//! step, as a view subscribed to snapshots would re-render it.

use todomvc::{view, AppConfig, AppState, TaskId, TodoApp};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn show(step: &str, state: &AppState) {
    println!(">>> {step}");
    println!("{}", view::render(state));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todomvc=debug,todomvc_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== TodoMVC ===\n");

    let app = TodoApp::new(AppConfig::default())?;
    let mut snapshots = app.subscribe();

    // The renderer: re-draw whenever a new snapshot is published
    let renderer = tokio::spawn(async move {
        let mut frames = 0_usize;
        while snapshots.changed().await.is_ok() {
            frames += 1;
            tracing::debug!(frames, "Snapshot received");
        }
        frames
    });

    show("Start", &app.snapshot().await);

    app.submit_new_task("Buy milk").await?;
    app.submit_new_task("Write documentation").await?;
    show("Add two tasks", &app.snapshot().await);

    if let Err(error) = app.submit_new_task("").await {
        println!(">>> Empty title refused: {error}\n");
    }

    app.toggle(TaskId::new(1), true).await?;
    show("Complete the first task", &app.snapshot().await);

    app.set_editing(TaskId::new(3), true).await?;
    show("Start editing task 3", &app.snapshot().await);
    app.commit_edit(TaskId::new(3), "Write the README").await?;
    show("Commit the edit", &app.snapshot().await);

    app.navigate("#/active").await?;
    show("Show active", &app.snapshot().await);
    app.navigate("#/completed").await?;
    show("Show completed", &app.snapshot().await);
    if let Err(error) = app.navigate("#/archived").await {
        println!(">>> {error}\n");
    }
    app.navigate("#/").await?;

    app.clear_completed().await?;
    show("Clear completed", &app.snapshot().await);

    app.toggle_all(true).await?;
    show("Mark all as complete", &app.snapshot().await);

    app.remove(TaskId::new(2)).await?;
    show("Remove task 2", &app.snapshot().await);

    let final_state = app.snapshot().await;
    println!("Final snapshot:\n{}", serde_json::to_string_pretty(&final_state)?);

    app.shutdown();
    drop(app);
    let frames = renderer.await?;
    println!("\nSnapshots published: {frames}");

    println!("\n=== Demo Complete ===");
    Ok(())
}
