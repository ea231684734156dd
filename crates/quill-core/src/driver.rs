//! Async host loop: feeds input events to an [`Editor`] and fires its timers
//! when their deadlines pass.

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use crate::editor::Editor;
use crate::input::InputEvent;

/// Run until the sender side closes, then let any pending timers fire and
/// hand the editor back.
pub async fn run(mut editor: Editor, mut events: mpsc::UnboundedReceiver<InputEvent>) -> Editor {
    loop {
        let pending = editor.next_deadline();
        let deadline = pending.map(Instant::from_std).unwrap_or_else(Instant::now);

        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(event) => {
                        if let Err(e) = editor.handle(event, Instant::now().into_std()) {
                            tracing::warn!("Event failed: {e}");
                        }
                    }
                    None => break,
                }
            }

            _ = sleep_until(deadline), if pending.is_some() => {
                editor.poll_timers(Instant::now().into_std());
            }
        }
    }

    while let Some(deadline) = editor.next_deadline() {
        sleep_until(Instant::from_std(deadline)).await;
        editor.poll_timers(Instant::now().into_std());
    }
    tracing::debug!("Driver stopped");
    editor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_drains_timers_after_input_closes() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(InputEvent::Type { text: "x = 1".into() }).unwrap();
        drop(tx);

        let started = Instant::now();
        let editor = run(Editor::new(Settings::default()), rx).await;
        assert!(!editor.tags().is_empty());
        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
