use crate::commands::{CmdMessage, CmdResult};
use crate::config::DashConfig;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the effective configuration.
    Show,
    /// Print a commented `dashstore.toml`.
    Template,
}

pub fn run(config: &DashConfig, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::Show => {
            let mut result = CmdResult::default().with_config(config.clone());
            if let Some(path) = DashConfig::config_path() {
                result.add_message(CmdMessage::info(format!(
                    "Config file: {}",
                    path.display()
                )));
            }
            Ok(result)
        }
        ConfigAction::Template => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info(DashConfig::template()));
            Ok(result)
        }
    }
}
