//! Command handlers bridging parsed arguments to the core session.
//!
//! Each handler drives the session, then renders the core Display
//! implementations through the terminal renderer. Output formatting lives in
//! the core display module; this layer only decides what to show when.

use anyhow::{bail, Context, Result};
use stride_core::{
    params::{MoveTask, TaskRef},
    Plan, PlanEvent, Session,
};

use crate::args::{PlanCommands, TaskCommands};
use crate::renderer::TerminalRenderer;

pub struct Cli {
    session: Session,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(session: Session, renderer: TerminalRenderer) -> Self {
        Self { session, renderer }
    }

    pub async fn handle_plan_command(mut self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Show => self.show_plan().await,
            PlanCommands::Adopt(args) => self.adopt_plan(&args.file).await,
            PlanCommands::Extend(args) => self.extend_plan(&args.file).await,
            PlanCommands::Delete(args) => self.delete_plan(args.confirm).await,
            PlanCommands::History => self.history().await,
            PlanCommands::Progress => self.progress().await,
        }
    }

    pub async fn handle_task_command(mut self, command: TaskCommands) -> Result<()> {
        self.require_plan().await?;
        match command {
            TaskCommands::Start(args) => self.start_task(args.into()).await,
            TaskCommands::Pause(args) => self.pause_task(args.into()).await,
            TaskCommands::Complete(args) => self.complete_task(args.into()).await,
            TaskCommands::Reopen(args) => self.reopen_task(args.into()).await,
            TaskCommands::Move(args) => self.move_task(args.into()).await,
        }
    }

    pub async fn today(mut self) -> Result<()> {
        self.require_plan().await?;
        let view = self.session.today().await?;
        self.renderer.render(&view.to_string())
    }

    pub async fn streak(mut self) -> Result<()> {
        // A streak can outlive a plan, so no plan is required here.
        self.session.load().await?;
        let days = self.session.streak().await?;
        let message = match days {
            0 => "No streak yet. Complete a task today to start one.".to_string(),
            1 => "Streak: 1 day.".to_string(),
            n => format!("Streak: {n} days in a row."),
        };
        self.renderer.render(&message)
    }

    pub async fn calendar(mut self) -> Result<()> {
        self.require_plan().await?;
        let events = self.session.calendar_events()?;
        if events.is_empty() {
            return self.renderer.render("No scheduled tasks.");
        }
        let mut output = String::from("# Scheduled tasks\n\n");
        for event in &events {
            output.push_str(&format!("{event}\n"));
        }
        self.renderer.render(&output)
    }

    async fn show_plan(&mut self) -> Result<()> {
        self.require_plan().await?;
        let plan = self.current_plan()?;
        let states = self.session.week_states()?;

        let mut output = plan.to_string();
        output.push_str("## Week states\n\n");
        for (week, state) in plan.weeks.iter().zip(&states) {
            output.push_str(&format!("- Week {}: {state}\n", week.week_number));
        }
        self.renderer.render(&output)
    }

    async fn adopt_plan(&mut self, file: &std::path::Path) -> Result<()> {
        let document = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read plan document {}", file.display()))?;
        let plan: Plan = serde_json::from_str(&document)
            .with_context(|| format!("Invalid plan document {}", file.display()))?;

        let summary = self.session.adopt_plan(plan).await?;
        self.renderer
            .render(&format!("Adopted plan:\n\n{summary}"))
    }

    async fn extend_plan(&mut self, file: &std::path::Path) -> Result<()> {
        self.require_plan().await?;
        let document = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read plan document {}", file.display()))?;
        let extended: Plan = serde_json::from_str(&document)
            .with_context(|| format!("Invalid plan document {}", file.display()))?;

        self.session.extend_plan(extended).await?;
        let total = self.current_plan()?.weeks.len();
        self.renderer
            .render(&format!("Plan extended to {total} weeks."))
    }

    async fn delete_plan(&mut self, confirmed: bool) -> Result<()> {
        self.require_plan().await?;
        if !confirmed {
            bail!("Deletion requires --confirm. The plan is archived to history first.");
        }
        self.session.delete_plan().await?;
        self.renderer.render("Plan archived and deleted.")
    }

    async fn history(&mut self) -> Result<()> {
        let entries = self.session.history().await?;
        if entries.is_empty() {
            return self.renderer.render("No archived plans.");
        }
        let mut output = String::from("# Archived plans\n\n");
        for entry in &entries {
            output.push_str(&entry.to_string());
        }
        self.renderer.render(&output)
    }

    async fn progress(&mut self) -> Result<()> {
        self.require_plan().await?;
        let progress = self.session.progress()?;
        self.renderer.render(&progress.to_string())
    }

    async fn start_task(&mut self, task_ref: TaskRef) -> Result<()> {
        self.session.start_task(&task_ref).await?;
        let title = self.task_title(&task_ref);
        self.renderer.render(&format!("Started '{title}'."))
    }

    async fn pause_task(&mut self, task_ref: TaskRef) -> Result<()> {
        self.session.pause_task(&task_ref).await?;
        let task = self
            .session
            .current_plan()
            .and_then(|plan| plan.task(task_ref.week_index, task_ref.task_index));
        let banked = task.map_or(0, |t| t.time_spent_seconds);
        self.renderer.render(&format!(
            "Paused '{}' ({banked} seconds banked).",
            task.map_or("task", |t| t.title.as_str())
        ))
    }

    async fn complete_task(&mut self, task_ref: TaskRef) -> Result<()> {
        let events = self.session.complete_task(&task_ref).await?;
        let title = self.task_title(&task_ref);

        let mut output = format!("Completed '{title}'.\n");
        for event in &events {
            match event {
                PlanEvent::WeekCompleted { week_number } => {
                    output.push_str(&format!(
                        "🎉 Week {week_number} complete! The next week is unlocked.\n"
                    ));
                }
                PlanEvent::PlanCompleted => {
                    output.push_str("🏆 Plan complete! Every task is done.\n");
                }
            }
        }
        output.push_str(&format!("\n{}\n", self.session.progress()?));
        self.renderer.render(&output)
    }

    async fn reopen_task(&mut self, task_ref: TaskRef) -> Result<()> {
        self.session.reopen_task(&task_ref).await?;
        let title = self.task_title(&task_ref);
        self.renderer.render(&format!("Reopened '{title}'."))
    }

    async fn move_task(&mut self, request: MoveTask) -> Result<()> {
        self.session.move_task(&request).await?;
        self.renderer.render(&format!(
            "Moved task to week {}, position {}.",
            request.dest_week + 1,
            request.dest_index + 1
        ))
    }

    /// Loads the stored plan and fails with a hint when none exists.
    async fn require_plan(&mut self) -> Result<()> {
        if !self.session.load().await? {
            bail!("No plan found. Adopt one with `stride plan adopt <file>`.");
        }
        Ok(())
    }

    fn current_plan(&self) -> Result<&Plan> {
        // require_plan ran first on every path that reaches here.
        self.session
            .current_plan()
            .context("No plan loaded")
    }

    fn task_title(&self, task_ref: &TaskRef) -> String {
        self.session
            .current_plan()
            .and_then(|plan| plan.task(task_ref.week_index, task_ref.task_index))
            .map_or_else(|| "task".to_string(), |t| t.title.clone())
    }
}
