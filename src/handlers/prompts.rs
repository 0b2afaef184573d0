use anyhow::Result;
use tracing::info;

use crate::prompts::{PromptPreset, PromptStore, PromptUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCommand {
    Show,
    Presets,
    Apply { update: PromptUpdate, save: bool },
    Reset,
}

fn render_config(store: &PromptStore) -> Result<String> {
    let source = if store.is_custom() {
        format!("custom ({})", store.path().display())
    } else {
        "preset".to_string()
    };
    let json = serde_json::to_string_pretty(store.config())?;
    Ok(format!("source: {source}\n{json}\n"))
}

/// Runs one prompt-configuration command and returns the text to print.
pub fn prompts_handler(store: &mut PromptStore, command: PromptCommand) -> Result<String> {
    match command {
        PromptCommand::Show => render_config(store),
        PromptCommand::Presets => {
            let mut output = String::new();
            for preset in PromptPreset::ALL {
                output.push_str(&format!(
                    "{}: {}\n",
                    preset,
                    preset.config().product_type
                ));
            }
            Ok(output)
        }
        PromptCommand::Apply { update, save } => {
            store.apply(update);
            if save {
                store.save()?;
                info!("Prompt config saved to {}", store.path().display());
            }
            let mut output = render_config(store)?;
            if !save {
                output.push_str("(not saved; pass --save to persist)\n");
            }
            Ok(output)
        }
        PromptCommand::Reset => {
            store.reset_to_default()?;
            info!("Prompt config reset to default preset");
            render_config(store)
        }
    }
}
