use anyhow::Result;
use owo_colors::OwoColorize;
use studibot_core::ReminderSettings;

use crate::app::App;
use crate::render::Render;

pub fn run(app: &App, task_days: Option<u32>, exam_days: Option<u32>) -> Result<()> {
    let mut settings = ReminderSettings::load(&app.store);

    if task_days.is_some() || exam_days.is_some() {
        if let Some(days) = task_days {
            settings.task_lead_days = days;
        }
        if let Some(days) = exam_days {
            settings.exam_lead_days = days;
        }
        settings.save(&app.store);
        println!("{}", "Reminder settings saved".green());
    }

    println!("{}", "Reminders".bold());
    println!("{}", settings.render());

    Ok(())
}
