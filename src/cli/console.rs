use colored::*;
use std::io::{self, Write};

use crate::core::SessionEvent;
use crate::models::IntakeData;

/// Console handles all terminal I/O with colored formatting
pub struct Console {
    user_color: Color,
    agent_color: Color,
    tool_color: Color,
}

impl Console {
    /// Create a new Console with default colors
    pub fn new() -> Self {
        Self {
            user_color: Color::Cyan,
            agent_color: Color::Green,
            tool_color: Color::Magenta,
        }
    }

    /// Create a new Console with custom colors
    pub fn with_colors(user_color: Color, agent_color: Color, tool_color: Color) -> Self {
        Self {
            user_color,
            agent_color,
            tool_color,
        }
    }

    /// Print a welcome banner
    pub fn print_banner(&self, session_id: &str) {
        println!("{}", "=".repeat(60).bright_blue());
        println!("{}", "  Patient Intake".bright_blue().bold());
        println!("{}", format!("  session {}", session_id).bright_black());
        println!("{}", "=".repeat(60).bright_blue());
        println!();
        println!("Type as the patient and press Enter. Type 'exit' or 'quit' to end the session.");
        println!();
    }

    /// Print one session event
    pub fn print_event(&self, event: &SessionEvent) {
        match event {
            SessionEvent::AgentEntered {
                agent,
                carried,
                merged,
            } => {
                self.print_separator();
                self.print_system(&format!(
                    "{} is now active ({} items carried, {} merged)",
                    agent.bold(),
                    carried,
                    merged
                ));
            }
            SessionEvent::Transferred { from, to } => {
                self.print_system(&format!("handing off {} -> {}", from, to));
            }
            SessionEvent::ReplyRequested { .. } => {}
            SessionEvent::AssistantText { agent, text } | SessionEvent::Say { agent, text } => {
                self.print_agent(agent, text);
            }
            SessionEvent::ToolStarted { name, arguments, .. } => {
                println!(
                    "{} {} {}",
                    "Tool:".color(self.tool_color).bold(),
                    format!("[{}]", name).color(self.tool_color),
                    arguments.to_string().bright_black()
                );
            }
            SessionEvent::ToolFinished {
                output, is_error, ..
            } => self.print_tool_result(output, *is_error),
            SessionEvent::Completed { session_id } => {
                self.print_separator();
                self.print_system(&format!("intake {} complete", session_id));
            }
            SessionEvent::Error(message) => self.print_error(message),
        }
    }

    /// Print a user message with colored formatting
    pub fn print_user(&self, message: &str) {
        println!("{} {}", "Patient:".color(self.user_color).bold(), message);
    }

    /// Print an agent utterance
    pub fn print_agent(&self, agent: &str, message: &str) {
        println!(
            "{} {}",
            format!("{}:", agent).color(self.agent_color).bold(),
            message.color(self.agent_color)
        );
    }

    /// Print a system message (errors, info, etc.)
    pub fn print_system(&self, message: &str) {
        println!("{} {}", "System:".yellow().bold(), message);
    }

    /// Print an error message
    pub fn print_error(&self, error: &str) {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }

    /// Print a tool result
    pub fn print_tool_result(&self, result: &str, is_error: bool) {
        if is_error {
            println!("{} {}", "Tool Error:".red().bold(), result);
        } else {
            println!("{}", result.bright_black());
        }
    }

    /// Print the collected records
    pub fn print_summary(&self, data: &IntakeData) {
        self.print_separator();
        match serde_json::to_string_pretty(data) {
            Ok(json) => println!("{}", json.bright_black()),
            Err(e) => self.print_error(&e.to_string()),
        }
    }

    /// Print a separator line
    pub fn print_separator(&self) {
        println!("{}", "-".repeat(60).bright_black());
    }

    /// Read a line of input from the user
    pub fn read_input(&self) -> io::Result<String> {
        print!("{} ", ">".color(self.user_color).bold());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
