use std::io::{BufRead, BufReader};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::Result;
use owo_colors::OwoColorize;
use studibot_core::reminder::{Notification, Notifier};
use tokio::sync::mpsc;

use crate::app::App;
use crate::render::Render;

/// Prints each notification before handing it on.
struct EchoNotifier {
    inner: Arc<dyn Notifier>,
}

impl Notifier for EchoNotifier {
    fn notify(&self, notification: &Notification) {
        println!(
            "{} {}",
            chrono::Local::now().format("%H:%M").dimmed(),
            notification.render()
        );
        self.inner.notify(notification);
    }
}

pub async fn run(app: &App, no_desktop: bool) -> Result<()> {
    let notifier = Arc::new(EchoNotifier {
        inner: App::notifier(no_desktop),
    });
    let engine = app.reminders(notifier);
    let period = app.config.reminder_interval();

    println!(
        "Checking reminders every {} min. Press Enter to check now, Ctrl-C to stop.",
        period.as_secs() / 60
    );

    let (trigger, manual) = mpsc::channel(1);
    spawn_enter_trigger(BufReader::new(std::io::stdin()), trigger);

    engine
        .run(period, manual, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;

    Ok(())
}

/// Queue a scan for every line read from `input`.
///
/// Runs on a plain thread: a blocked read there can't hold up runtime
/// shutdown, and the thread dies with the process.
fn spawn_enter_trigger(
    input: impl BufRead + Send + 'static,
    trigger: mpsc::Sender<()>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        for line in input.lines() {
            if line.is_err() {
                break;
            }
            // A scan already queued covers this keypress too
            if trigger.try_send(()).is_err() && trigger.is_closed() {
                break;
            }
        }
    })
}
