use std::fmt;
use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Long-running work the CLI shows a spinner for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    LoadingCalendar,
    CheckingReminders,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Activity::LoadingCalendar => "Loading Google Calendar",
            Activity::CheckingReminders => "Checking reminders",
        };
        f.write_str(label)
    }
}

pub fn create_spinner(activity: Activity) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/"])
        .template("{msg} {spinner}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    spinner.set_style(style);
    spinner.set_message(activity.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Await `work` behind a spinner, clearing it once the work is done.
pub async fn with_spinner<T>(activity: Activity, work: impl Future<Output = T>) -> T {
    let spinner = create_spinner(activity);
    let output = work.await;
    spinner.finish_and_clear();
    output
}
