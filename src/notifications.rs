/// Cross-platform notification support
/// Currently only implements macOS notifications

#[cfg(target_os = "macos")]
use std::process::Command;

/// Send a notification when a task's due date is approaching
pub fn notify_task_due(task_title: &str, minutes: u32) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "'{}' is due within {} minutes" with title "Focal - Due Soon""#,
            task_title.replace('"', "\\\""),
            minutes
        );

        let _ = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = (task_title, minutes);
    }
}

/// Send a notification when a work phase completes and rest begins
pub fn notify_work_phase_done(cycles_completed: u32) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "Work phase {} complete - time to rest" with title "Focal - Timer""#,
            cycles_completed
        );

        let _ = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = cycles_completed;
    }
}
