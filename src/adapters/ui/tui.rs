//! Inquire-based interactive mode: pick a feature, supply a payload, see the validated answer.

use crate::adapters::ui::payload::{parse_payload, read_payload};
use crate::adapters::ui::progress::spinner;
use crate::domain::{Feature, Generated};
use crate::usecases::InsightService;
use inquire::{Select, Text};
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

enum MenuChoice {
    Run(Feature),
    Quit,
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuChoice::Run(feature) => write!(f, "{} ({})", feature.label(), feature.name()),
            MenuChoice::Quit => f.write_str("Quit"),
        }
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    service: Arc<InsightService>,
}

impl TuiInputPort {
    pub fn new(service: Arc<InsightService>) -> Self {
        Self { service }
    }

    /// Main menu loop. Returns when the user picks Quit or cancels a prompt.
    pub async fn run(&self) -> anyhow::Result<()> {
        loop {
            let mut options: Vec<MenuChoice> = Feature::ALL.into_iter().map(MenuChoice::Run).collect();
            options.push(MenuChoice::Quit);

            let feature = match Select::new("What do you want to plan?", options).prompt() {
                Ok(MenuChoice::Run(feature)) => feature,
                Ok(MenuChoice::Quit) => return Ok(()),
                Err(inquire::InquireError::OperationCanceled)
                | Err(inquire::InquireError::OperationInterrupted) => return Ok(()),
                Err(e) => return Err(e.into()),
            };

            let payload = match self.prompt_payload(feature) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("✗ {}", e);
                    continue;
                }
            };

            let pb = spinner(format!("Asking Gemini: {}", feature.label()));
            let result = self.service.run(feature, &payload).await;
            pb.finish_and_clear();

            match result {
                Ok(generated) => {
                    if let Generated::RawText(_) = &generated {
                        eprintln!("⚠ The assistant did not answer in the expected format; showing raw text.");
                    }
                    println!("{:#}", serde_json::to_value(&generated)?);
                }
                Err(e) if e.is_config() => return Err(e.into()),
                Err(e) => {
                    warn!(feature = %feature, error = %e, "request failed");
                    eprintln!("✗ {}", e);
                }
            }
        }
    }

    fn prompt_payload(&self, feature: Feature) -> anyhow::Result<Value> {
        if feature == Feature::Assistant {
            let query = Text::new("Your question:").prompt()?;
            let context_path = Text::new("Context JSON file (optional):")
                .with_help_message("Leave empty for no context")
                .prompt()?;
            let context = if context_path.trim().is_empty() {
                Value::Null
            } else {
                read_payload(Some(context_path.trim()))?
            };
            return Ok(json!({"query": query, "context": context}));
        }

        let path = Text::new("Payload JSON file:")
            .with_help_message("Leave empty to type JSON inline")
            .prompt()?;
        if !path.trim().is_empty() {
            return read_payload(Some(path.trim()));
        }
        let inline = Text::new("Payload JSON:").prompt()?;
        parse_payload("inline payload", &inline)
    }
}
